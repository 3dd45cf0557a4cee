// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;

use kurbo::{Point, Rect};

use crate::affine::{DragTransform, NullTransform, ResizeTransform};
use crate::chain::TransformChain;
use crate::expand::ExpandTransform;

/// The kind of a [`ViewTransform`], used for untyped lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TransformKind {
    /// [`NullTransform`]: identity after the chain.
    Null,
    /// [`DragTransform`]: translation.
    Drag,
    /// [`ResizeTransform`]: scale about an anchor.
    Resize,
    /// [`ExpandTransform`]: container expansion displacement.
    Expand,
}

/// Shared behavior of every view transform.
///
/// A transform owns a [`TransformChain`] of pre-transforms. Mapping a rect or
/// point first folds it through the chain, then applies the transform's own
/// mapping ([`Transform::apply_rect`] / [`Transform::apply_point`]), so a
/// transform `T` with chain `[A, B]` composes as `T ∘ B ∘ A`.
pub trait Transform<K: Eq + Hash> {
    /// Returns the pre-transform chain.
    fn chain(&self) -> &TransformChain<K>;

    /// Returns the pre-transform chain for mutation.
    fn chain_mut(&mut self) -> &mut TransformChain<K>;

    /// Applies only this transform's own mapping to `rect`, skipping the chain.
    fn apply_rect(&self, id: &K, rect: Rect) -> Rect;

    /// Applies only this transform's own mapping to `point`, skipping the chain.
    fn apply_point(&self, id: &K, point: Point) -> Point;

    /// Maps `rect` of element `id` through the chain and then this transform.
    #[must_use]
    fn transform_rect(&self, id: &K, rect: Rect) -> Rect {
        self.apply_rect(id, self.chain().transform_rect(id, rect))
    }

    /// Maps `point` of element `id` through the chain and then this transform.
    #[must_use]
    fn transform_point(&self, id: &K, point: Point) -> Point {
        self.apply_point(id, self.chain().transform_point(id, point))
    }

    /// Appends `transform` to the end of the pre-transform chain.
    fn add_pre_transform(&mut self, transform: impl Into<ViewTransform<K>>)
    where
        Self: Sized,
    {
        self.chain_mut().push(transform);
    }

    /// Returns every transform of `kind` in the chain tree.
    ///
    /// See [`TransformChain::collect_by_kind`] for the ordering.
    #[must_use]
    fn collect_by_kind(&self, kind: TransformKind) -> Vec<&ViewTransform<K>> {
        self.chain().collect_by_kind(kind)
    }

    /// Returns every transform of variant `T` in the chain tree.
    ///
    /// See [`TransformChain::transforms_of`] for the ordering.
    #[must_use]
    fn transforms_of<'a, T: TransformVariant<K>>(&'a self) -> Vec<&'a T>
    where
        Self: Sized,
        K: 'a,
    {
        self.chain().transforms_of::<T>()
    }
}

/// A concrete transform type that can be recovered from a [`ViewTransform`].
///
/// Implemented by the four variant structs; this is what makes
/// [`TransformChain::transforms_of`] return typed references.
pub trait TransformVariant<K>: Sized {
    /// The kind this variant reports.
    const KIND: TransformKind;

    /// Returns the variant if `transform` holds one.
    fn from_view_transform(transform: &ViewTransform<K>) -> Option<&Self>;
}

/// Any view transform.
///
/// This is the element type of a [`TransformChain`]. Construct one from a
/// variant with `.into()`.
#[derive(Clone, Debug)]
pub enum ViewTransform<K> {
    /// See [`NullTransform`].
    Null(NullTransform<K>),
    /// See [`DragTransform`].
    Drag(DragTransform<K>),
    /// See [`ResizeTransform`].
    Resize(ResizeTransform<K>),
    /// See [`ExpandTransform`].
    Expand(ExpandTransform<K>),
}

impl<K> ViewTransform<K> {
    /// Returns the kind of this transform.
    #[must_use]
    pub fn kind(&self) -> TransformKind {
        match self {
            Self::Null(_) => TransformKind::Null,
            Self::Drag(_) => TransformKind::Drag,
            Self::Resize(_) => TransformKind::Resize,
            Self::Expand(_) => TransformKind::Expand,
        }
    }

    /// Returns the inner transform as `T`, if it is one.
    #[must_use]
    pub fn downcast_ref<T: TransformVariant<K>>(&self) -> Option<&T> {
        T::from_view_transform(self)
    }

    // The chain is reachable without `K: Eq + Hash` so lookups can walk it.
    pub(crate) fn pre_transforms(&self) -> &TransformChain<K> {
        match self {
            Self::Null(t) => &t.chain,
            Self::Drag(t) => &t.chain,
            Self::Resize(t) => &t.chain,
            Self::Expand(t) => &t.chain,
        }
    }
}

impl<K: Eq + Hash> Transform<K> for ViewTransform<K> {
    fn chain(&self) -> &TransformChain<K> {
        self.pre_transforms()
    }

    fn chain_mut(&mut self) -> &mut TransformChain<K> {
        match self {
            Self::Null(t) => &mut t.chain,
            Self::Drag(t) => &mut t.chain,
            Self::Resize(t) => &mut t.chain,
            Self::Expand(t) => &mut t.chain,
        }
    }

    fn apply_rect(&self, id: &K, rect: Rect) -> Rect {
        match self {
            Self::Null(t) => t.apply_rect(id, rect),
            Self::Drag(t) => t.apply_rect(id, rect),
            Self::Resize(t) => t.apply_rect(id, rect),
            Self::Expand(t) => t.apply_rect(id, rect),
        }
    }

    fn apply_point(&self, id: &K, point: Point) -> Point {
        match self {
            Self::Null(t) => t.apply_point(id, point),
            Self::Drag(t) => t.apply_point(id, point),
            Self::Resize(t) => t.apply_point(id, point),
            Self::Expand(t) => t.apply_point(id, point),
        }
    }
}

macro_rules! impl_variant {
    ($ty:ident, $variant:ident) => {
        impl<K> TransformVariant<K> for $ty<K> {
            const KIND: TransformKind = TransformKind::$variant;

            fn from_view_transform(transform: &ViewTransform<K>) -> Option<&Self> {
                match transform {
                    ViewTransform::$variant(t) => Some(t),
                    _ => None,
                }
            }
        }

        impl<K> From<$ty<K>> for ViewTransform<K> {
            fn from(transform: $ty<K>) -> Self {
                Self::$variant(transform)
            }
        }
    };
}

impl_variant!(NullTransform, Null);
impl_variant!(DragTransform, Drag);
impl_variant!(ResizeTransform, Resize);
impl_variant!(ExpandTransform, Expand);
