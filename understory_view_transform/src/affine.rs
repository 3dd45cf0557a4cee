// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The affine variants: identity, translation, and scale about an anchor.

use core::hash::Hash;

use kurbo::{Point, Rect, Vec2};

use crate::chain::TransformChain;
use crate::transform::{Transform, ViewTransform};

/// Identity transform.
///
/// Maps everything to itself after running the chain. This is the safe
/// default root when no gesture is active, and a convenient container for a
/// chain of unrelated transforms.
#[derive(Clone, Debug)]
pub struct NullTransform<K> {
    pub(crate) chain: TransformChain<K>,
}

impl<K> Default for NullTransform<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> NullTransform<K> {
    /// Creates an identity transform with an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            chain: TransformChain::new(),
        }
    }

    /// Creates an identity transform over an existing chain.
    #[must_use]
    pub fn with_chain(chain: TransformChain<K>) -> Self {
        Self { chain }
    }

    /// Appends `transform` to the chain and returns `self`.
    #[must_use]
    pub fn with_pre_transform(mut self, transform: impl Into<ViewTransform<K>>) -> Self {
        self.chain.push(transform);
        self
    }
}

impl<K: Eq + Hash> Transform<K> for NullTransform<K> {
    fn chain(&self) -> &TransformChain<K> {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut TransformChain<K> {
        &mut self.chain
    }

    fn apply_rect(&self, _id: &K, rect: Rect) -> Rect {
        rect
    }

    fn apply_point(&self, _id: &K, point: Point) -> Point {
        point
    }
}

/// Translation of an in-progress drag.
///
/// Rect sizes are unchanged.
#[derive(Clone, Debug)]
pub struct DragTransform<K> {
    offset: Vec2,
    pub(crate) chain: TransformChain<K>,
}

impl<K> DragTransform<K> {
    /// Creates a drag by `(dx, dy)`.
    #[must_use]
    pub const fn new(dx: f64, dy: f64) -> Self {
        Self {
            offset: Vec2::new(dx, dy),
            chain: TransformChain::new(),
        }
    }

    /// Appends `transform` to the chain and returns `self`.
    #[must_use]
    pub fn with_pre_transform(mut self, transform: impl Into<ViewTransform<K>>) -> Self {
        self.chain.push(transform);
        self
    }

    /// Returns the drag offset.
    #[must_use]
    pub fn offset(&self) -> Vec2 {
        self.offset
    }
}

impl<K: Eq + Hash> Transform<K> for DragTransform<K> {
    fn chain(&self) -> &TransformChain<K> {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut TransformChain<K> {
        &mut self.chain
    }

    fn apply_rect(&self, _id: &K, rect: Rect) -> Rect {
        rect + self.offset
    }

    fn apply_point(&self, _id: &K, point: Point) -> Point {
        point + self.offset
    }
}

/// Scale about a fixed anchor, for an in-progress resize.
///
/// A point `p` maps to `anchor + (p - anchor) * (scale_w, scale_h)`. The two
/// scale factors may differ.
///
/// Rects are mapped by their top-left and bottom-right corners and rebuilt
/// from the mapped corners. The result is always normalized, so a negative
/// scale mirrors a rect about the anchor instead of producing a negative
/// width or height.
#[derive(Clone, Debug)]
pub struct ResizeTransform<K> {
    anchor: Point,
    scale_w: f64,
    scale_h: f64,
    pub(crate) chain: TransformChain<K>,
}

impl<K> ResizeTransform<K> {
    /// Creates a resize about `anchor` by `scale_w` horizontally and
    /// `scale_h` vertically.
    #[must_use]
    pub const fn new(anchor: Point, scale_w: f64, scale_h: f64) -> Self {
        Self {
            anchor,
            scale_w,
            scale_h,
            chain: TransformChain::new(),
        }
    }

    /// Appends `transform` to the chain and returns `self`.
    #[must_use]
    pub fn with_pre_transform(mut self, transform: impl Into<ViewTransform<K>>) -> Self {
        self.chain.push(transform);
        self
    }

    /// Returns the fixed point of the scale.
    #[must_use]
    pub fn anchor(&self) -> Point {
        self.anchor
    }

    /// Returns the horizontal scale factor.
    #[must_use]
    pub fn scale_w(&self) -> f64 {
        self.scale_w
    }

    /// Returns the vertical scale factor.
    #[must_use]
    pub fn scale_h(&self) -> f64 {
        self.scale_h
    }

    fn scale_point(&self, point: Point) -> Point {
        Point::new(
            self.anchor.x + (point.x - self.anchor.x) * self.scale_w,
            self.anchor.y + (point.y - self.anchor.y) * self.scale_h,
        )
    }
}

impl<K: Eq + Hash> Transform<K> for ResizeTransform<K> {
    fn chain(&self) -> &TransformChain<K> {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut TransformChain<K> {
        &mut self.chain
    }

    fn apply_rect(&self, _id: &K, rect: Rect) -> Rect {
        let top_left = self.scale_point(Point::new(rect.x0, rect.y0));
        let bottom_right = self.scale_point(Point::new(rect.x1, rect.y1));
        Rect::from_points(top_left, bottom_right)
    }

    fn apply_point(&self, _id: &K, point: Point) -> Point {
        self.scale_point(point)
    }
}
