// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use alloc::vec::Vec;
use core::hash::Hash;
use core::slice;

use kurbo::{Point, Rect};

use crate::transform::{Transform, TransformKind, TransformVariant, ViewTransform};

/// An ordered, append-only list of pre-transforms.
///
/// Every transform owns one of these. Mapping through a chain folds the input
/// through each member in insertion order, feeding each member the previous
/// member's result. An empty chain is the identity.
///
/// Members may own chains of their own, so a chain is the root of a tree.
/// [`TransformChain::collect_by_kind`] and [`TransformChain::transforms_of`]
/// search that whole tree without mutating it.
#[derive(Clone, Debug)]
pub struct TransformChain<K> {
    transforms: Vec<ViewTransform<K>>,
}

impl<K> Default for TransformChain<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TransformChain<K> {
    /// Creates an empty chain.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            transforms: Vec::new(),
        }
    }

    /// Returns the number of direct members.
    #[must_use]
    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    /// Returns `true` if the chain has no members.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Iterates over the direct members in insertion order.
    pub fn iter(&self) -> slice::Iter<'_, ViewTransform<K>> {
        self.transforms.iter()
    }

    /// Appends `transform` to the end of the chain.
    ///
    /// No de-duplication is performed.
    pub fn push(&mut self, transform: impl Into<ViewTransform<K>>) {
        self.transforms.push(transform.into());
    }

    /// Returns every transform of `kind` in this chain tree.
    ///
    /// The direct members of this chain that match come first, in insertion
    /// order. They are followed by the matches found recursively in each
    /// member's own chain, visiting members in insertion order. Returns an
    /// empty list when nothing matches.
    #[must_use]
    pub fn collect_by_kind(&self, kind: TransformKind) -> Vec<&ViewTransform<K>> {
        let mut out = Vec::new();
        self.collect_matching(&|t: &ViewTransform<K>| t.kind() == kind, &mut out);
        out
    }

    /// Returns every transform of variant `T` in this chain tree.
    ///
    /// Same ordering as [`TransformChain::collect_by_kind`], but the results
    /// are the concrete variant, so callers can read its parameters directly:
    ///
    /// ```rust
    /// use kurbo::Point;
    /// use understory_view_transform::{DragTransform, ResizeTransform, TransformChain};
    ///
    /// let mut chain = TransformChain::<u32>::new();
    /// chain.push(DragTransform::new(5.0, 0.0));
    /// chain.push(ResizeTransform::new(Point::new(10.0, 10.0), 2.0, 2.0));
    ///
    /// let resizes = chain.transforms_of::<ResizeTransform<u32>>();
    /// assert_eq!(resizes.len(), 1);
    /// assert_eq!(resizes[0].anchor(), Point::new(10.0, 10.0));
    /// ```
    #[must_use]
    pub fn transforms_of<T: TransformVariant<K>>(&self) -> Vec<&T> {
        let mut matches = Vec::new();
        self.collect_matching(&|t: &ViewTransform<K>| t.kind() == T::KIND, &mut matches);
        matches
            .into_iter()
            .filter_map(T::from_view_transform)
            .collect()
    }

    fn collect_matching<'a, F>(&'a self, matches: &F, out: &mut Vec<&'a ViewTransform<K>>)
    where
        F: Fn(&ViewTransform<K>) -> bool,
    {
        out.extend(self.transforms.iter().filter(|t| matches(t)));
        for transform in &self.transforms {
            transform.pre_transforms().collect_matching(matches, out);
        }
    }
}

impl<K: Eq + Hash> TransformChain<K> {
    /// Folds `rect` through every member, in insertion order.
    #[must_use]
    pub fn transform_rect(&self, id: &K, rect: Rect) -> Rect {
        self.transforms
            .iter()
            .fold(rect, |acc, t| t.transform_rect(id, acc))
    }

    /// Folds `point` through every member, in insertion order.
    #[must_use]
    pub fn transform_point(&self, id: &K, point: Point) -> Point {
        self.transforms
            .iter()
            .fold(point, |acc, t| t.transform_point(id, acc))
    }
}

impl<K> FromIterator<ViewTransform<K>> for TransformChain<K> {
    fn from_iter<I: IntoIterator<Item = ViewTransform<K>>>(iter: I) -> Self {
        Self {
            transforms: iter.into_iter().collect(),
        }
    }
}

impl<K> Extend<ViewTransform<K>> for TransformChain<K> {
    fn extend<I: IntoIterator<Item = ViewTransform<K>>>(&mut self, iter: I) {
        self.transforms.extend(iter);
    }
}

impl<'a, K> IntoIterator for &'a TransformChain<K> {
    type Item = &'a ViewTransform<K>;
    type IntoIter = slice::Iter<'a, ViewTransform<K>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;

    use kurbo::{Point, Rect};

    use super::TransformChain;
    use crate::{
        DragTransform, NullTransform, ResizeTransform, Transform, TransformKind, TransformVariant,
        ViewTransform,
    };

    #[test]
    fn empty_chain_is_identity() {
        let chain = TransformChain::<u32>::new();
        let rect = Rect::new(1.0, 2.0, 3.0, 4.0);
        assert!(chain.is_empty());
        assert_eq!(chain.transform_rect(&7, rect), rect);
        assert_eq!(chain.transform_point(&7, Point::new(5.0, 6.0)), Point::new(5.0, 6.0));
    }

    #[test]
    fn fold_feeds_each_member_the_previous_result() {
        let mut chain = TransformChain::<u32>::new();
        chain.push(DragTransform::new(10.0, 0.0));
        chain.push(ResizeTransform::new(Point::ZERO, 2.0, 2.0));
        chain.push(DragTransform::new(0.0, 1.0));

        // ((1, 1) + (10, 0)) * 2 + (0, 1)
        assert_eq!(chain.transform_point(&0, Point::new(1.0, 1.0)), Point::new(22.0, 3.0));

        let rect = Rect::from_origin_size((0.0, 0.0), (5.0, 5.0));
        assert_eq!(
            chain.transform_rect(&0, rect),
            Rect::from_origin_size((20.0, 1.0), (10.0, 10.0))
        );
    }

    #[test]
    fn push_does_not_deduplicate() {
        let mut chain = TransformChain::<u32>::new();
        chain.push(DragTransform::new(1.0, 1.0));
        chain.push(DragTransform::new(1.0, 1.0));
        assert_eq!(chain.len(), 2);
        assert_eq!(chain.transform_point(&0, Point::ZERO), Point::new(2.0, 2.0));
    }

    #[test]
    fn collect_lists_direct_matches_before_nested_ones() {
        let inner = DragTransform::new(3.0, 0.0).with_pre_transform(DragTransform::new(4.0, 0.0));
        let outer = NullTransform::new().with_pre_transform(inner);

        let mut chain = TransformChain::<u32>::new();
        chain.push(outer);
        chain.push(DragTransform::new(1.0, 0.0));
        chain.push(DragTransform::new(2.0, 0.0));

        let dxs: Vec<f64> = chain
            .transforms_of::<DragTransform<u32>>()
            .iter()
            .map(|d| d.offset().x)
            .collect();
        assert_eq!(dxs, [1.0, 2.0, 3.0, 4.0]);

        let nulls = chain.collect_by_kind(TransformKind::Null);
        assert_eq!(nulls.len(), 1);
        assert_eq!(nulls[0].chain().len(), 1);
    }

    #[test]
    fn collect_by_kind_agrees_with_typed_lookup() {
        let chain: TransformChain<u32> = [
            ViewTransform::from(ResizeTransform::new(Point::ZERO, 2.0, 2.0)),
            DragTransform::new(1.0, 0.0)
                .with_pre_transform(ResizeTransform::new(Point::ZERO, 3.0, 3.0))
                .into(),
        ]
        .into_iter()
        .collect();

        let by_kind = chain.collect_by_kind(ResizeTransform::<u32>::KIND);
        let typed = chain.transforms_of::<ResizeTransform<u32>>();
        assert_eq!(by_kind.len(), 2);
        assert_eq!(typed.len(), 2);
        assert_eq!(typed[0].scale_w(), 2.0);
        assert_eq!(typed[1].scale_w(), 3.0);
    }

    #[test]
    fn collect_without_matches_is_empty() {
        let mut chain = TransformChain::<u32>::new();
        chain.push(DragTransform::new(1.0, 0.0));
        assert!(chain.collect_by_kind(TransformKind::Expand).is_empty());
        assert!(TransformChain::<u32>::new().transforms_of::<NullTransform<u32>>().is_empty());
    }
}
