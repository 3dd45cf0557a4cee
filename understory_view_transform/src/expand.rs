// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Expand/collapse displacement.

use core::fmt;
use core::hash::Hash;

use hashbrown::HashSet;
use kurbo::{Line, ParamCurve, Point, Rect, Vec2};
use log::{debug, trace};

use crate::chain::TransformChain;
use crate::transform::{Transform, ViewTransform};

/// Penalty added to intersection parameters that fall outside `[0, 1]`.
const OUTSIDE_PENALTY: f64 = 10.0;

/// Error returned when an [`ExpandTransform`] is built from inconsistent geometry.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExpandError {
    /// A coordinate of the shape, center, or delta is NaN or infinite.
    NonFinite,
    /// The shape has a negative width or height.
    NegativeShape {
        /// Width of the shape.
        width: f64,
        /// Height of the shape.
        height: f64,
    },
    /// The delta collapses the shape past zero size.
    CollapsedPastZero {
        /// Width the expanded shape would have.
        width: f64,
        /// Height the expanded shape would have.
        height: f64,
    },
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NonFinite => write!(f, "expand geometry contains a non-finite coordinate"),
            Self::NegativeShape { width, height } => {
                write!(f, "expand shape has negative size {width}x{height}")
            }
            Self::CollapsedPastZero { width, height } => write!(
                f,
                "expand delta collapses the shape past zero size ({width}x{height})"
            ),
        }
    }
}

impl core::error::Error for ExpandError {}

/// Displacement caused by expanding (or collapsing) a container element.
///
/// The container's `shape` grows to `shape.inflate(dx, dy)`: left and top
/// edges move out by `dx`/`dy`, right and bottom edges move out by the same
/// amount. Every other point is pushed along the ray from the center of
/// `shape` through it, by exactly as much as the point where that ray crosses the shape
/// boundary is pushed. The field is continuous and agrees with the expansion
/// on the boundary itself.
///
/// Rects of the expanded element have both corners displaced, so the element
/// grows. Rects of any other element have their center displaced and keep
/// their size. Elements in the exclude set pass through unchanged after the
/// chain.
///
/// [`ExpandTransform::undo_point`] and [`ExpandTransform::undo_rect`] run the
/// inverse mapping, for recovering pre-expansion positions when collapsing.
///
/// When the shape or the expanded shape has zero width or height there is no
/// usable edge, and points map to themselves in both directions. The same
/// holds for a point on the shape's center, where the ray has no direction.
#[derive(Clone, Debug)]
pub struct ExpandTransform<K> {
    expanded: K,
    shape: Rect,
    expanded_shape: Rect,
    center: Point,
    delta: Vec2,
    exclude: HashSet<K>,
    pub(crate) chain: TransformChain<K>,
}

impl<K: Eq + Hash> ExpandTransform<K> {
    /// Creates an expansion of element `expanded` from `shape` by `delta`.
    ///
    /// `center` is the caller's anchor for the gesture and is only stored;
    /// the displacement rays always start at the center of `shape`. Elements
    /// listed in `exclude` are never displaced.
    ///
    /// # Errors
    ///
    /// Returns an [`ExpandError`] if any coordinate is non-finite, the shape
    /// has negative size, or a negative `delta` collapses the shape past zero
    /// size.
    pub fn new(
        expanded: K,
        shape: Rect,
        center: Point,
        delta: Vec2,
        exclude: impl IntoIterator<Item = K>,
    ) -> Result<Self, ExpandError> {
        if let Err(err) = validate(shape, center, delta) {
            debug!(err:%; "Rejected expand transform");
            return Err(err);
        }
        let exclude: HashSet<K> = exclude.into_iter().collect();
        debug!(
            shape:?, delta:?, excluded = exclude.len();
            "Created expand transform"
        );
        Ok(Self {
            expanded,
            shape,
            expanded_shape: shape.inflate(delta.x, delta.y),
            center,
            delta,
            exclude,
            chain: TransformChain::new(),
        })
    }

    /// Creates an expansion anchored at the center of `shape`.
    ///
    /// # Errors
    ///
    /// See [`ExpandTransform::new`].
    pub fn centered(
        expanded: K,
        shape: Rect,
        delta: Vec2,
        exclude: impl IntoIterator<Item = K>,
    ) -> Result<Self, ExpandError> {
        Self::new(expanded, shape, shape.center(), delta, exclude)
    }

    /// Returns `true` if `id` bypasses the displacement.
    #[must_use]
    pub fn is_excluded(&self, id: &K) -> bool {
        self.exclude.contains(id)
    }

    /// Maps `point` from expanded space back to where it was before the
    /// expansion.
    ///
    /// The chain runs first and excluded elements are returned as the chain
    /// leaves them, as in the forward mapping.
    #[must_use]
    pub fn undo_point(&self, id: &K, point: Point) -> Point {
        let point = self.chain.transform_point(id, point);
        if self.is_excluded(id) {
            return point;
        }
        point + self.inverse_displacement(point)
    }

    /// Maps `rect` from expanded space back to where it was before the
    /// expansion.
    ///
    /// Undoes [`Transform::apply_rect`]: the expanded element has its corners
    /// mapped back individually, other elements move by their center.
    #[must_use]
    pub fn undo_rect(&self, id: &K, rect: Rect) -> Rect {
        let rect = self.chain.transform_rect(id, rect);
        if self.is_excluded(id) {
            return rect;
        }
        self.map_rect(id, rect, |p| p + self.inverse_displacement(p))
    }

    fn map_rect(&self, id: &K, rect: Rect, map: impl Fn(Point) -> Point) -> Rect {
        if *id == self.expanded {
            let top_left = map(Point::new(rect.x0, rect.y0));
            let bottom_right = map(Point::new(rect.x1, rect.y1));
            return Rect::new(top_left.x, top_left.y, bottom_right.x, bottom_right.y);
        }
        Rect::from_center_size(map(rect.center()), rect.size())
    }
}

impl<K> ExpandTransform<K> {
    /// Appends `transform` to the chain and returns `self`.
    #[must_use]
    pub fn with_pre_transform(mut self, transform: impl Into<ViewTransform<K>>) -> Self {
        self.chain.push(transform);
        self
    }

    /// Returns the id of the element being expanded.
    #[must_use]
    pub fn expanded_element(&self) -> &K {
        &self.expanded
    }

    /// Returns the shape before expansion.
    #[must_use]
    pub fn shape(&self) -> Rect {
        self.shape
    }

    /// Returns the shape after expansion.
    #[must_use]
    pub fn expanded_shape(&self) -> Rect {
        self.expanded_shape
    }

    /// Returns the anchor passed at construction.
    #[must_use]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Returns the per-side expansion.
    #[must_use]
    pub fn delta(&self) -> Vec2 {
        self.delta
    }

    // `inflate` keeps the center, so both directions share the ray origin.
    fn displacement(&self, point: Point) -> Vec2 {
        displacement(self.shape.center(), point, self.shape, self.expanded_shape)
    }

    fn inverse_displacement(&self, point: Point) -> Vec2 {
        displacement(self.shape.center(), point, self.expanded_shape, self.shape)
    }
}

impl<K: Eq + Hash> Transform<K> for ExpandTransform<K> {
    fn chain(&self) -> &TransformChain<K> {
        &self.chain
    }

    fn chain_mut(&mut self) -> &mut TransformChain<K> {
        &mut self.chain
    }

    fn apply_rect(&self, id: &K, rect: Rect) -> Rect {
        if self.is_excluded(id) {
            return rect;
        }
        self.map_rect(id, rect, |p| p + self.displacement(p))
    }

    fn apply_point(&self, id: &K, point: Point) -> Point {
        if self.is_excluded(id) {
            return point;
        }
        point + self.displacement(point)
    }
}

fn validate(shape: Rect, center: Point, delta: Vec2) -> Result<(), ExpandError> {
    if !(shape.is_finite() && center.is_finite() && delta.is_finite()) {
        return Err(ExpandError::NonFinite);
    }
    if shape.width() < 0.0 || shape.height() < 0.0 {
        return Err(ExpandError::NegativeShape {
            width: shape.width(),
            height: shape.height(),
        });
    }
    let expanded = shape.inflate(delta.x, delta.y);
    if expanded.width() < 0.0 || expanded.height() < 0.0 {
        return Err(ExpandError::CollapsedPastZero {
            width: expanded.width(),
            height: expanded.height(),
        });
    }
    Ok(())
}

/// Edges of `rect` in the order top, right, bottom, left, each running
/// clockwise (in a y-down space) from one corner to the next.
fn edges(rect: Rect) -> [Line; 4] {
    let tl = Point::new(rect.x0, rect.y0);
    let tr = Point::new(rect.x1, rect.y0);
    let br = Point::new(rect.x1, rect.y1);
    let bl = Point::new(rect.x0, rect.y1);
    [
        Line::new(tl, tr),
        Line::new(tr, br),
        Line::new(br, bl),
        Line::new(bl, tl),
    ]
}

/// Parameter along `a` of the intersection of the infinite lines through `a`
/// and `b`, or `None` when they are parallel or either is degenerate.
fn intersection_param(a: Line, b: Line) -> Option<f64> {
    let da = a.p0 - a.p1;
    let db = b.p0 - b.p1;
    let denom = da.cross(db);
    if denom == 0.0 {
        return None;
    }
    let t = (a.p0 - b.p0).cross(db) / denom;
    t.is_finite().then_some(t)
}

fn is_degenerate(rect: Rect) -> bool {
    rect.width() <= f64::EPSILON || rect.height() <= f64::EPSILON
}

/// Scores how well a parameter sits within its segment; lower is better.
fn closeness(t: f64) -> f64 {
    if t < 0.0 {
        OUTSIDE_PENALTY - t
    } else if t > 1.0 {
        OUTSIDE_PENALTY + t
    } else {
        t
    }
}

/// Displacement of `point` when `from` is stretched into `to`.
///
/// Picks the edge of `from` that the segment `center -> point` most plausibly
/// crosses, then returns the offset between the same-parameter points on the
/// matching edges of `to` and `from`.
fn displacement(center: Point, point: Point, from: Rect, to: Rect) -> Vec2 {
    if is_degenerate(from) || is_degenerate(to) {
        trace!(from:?, to:?; "Degenerate expand shape, point left in place");
        return Vec2::ZERO;
    }

    let centroid = Line::new(center, point);
    let mut best: Option<(f64, usize, f64)> = None;
    for (index, edge) in edges(from).into_iter().enumerate() {
        let (Some(t), Some(u)) = (
            intersection_param(edge, centroid),
            intersection_param(centroid, edge),
        ) else {
            continue;
        };
        let metric = closeness(t).max(closeness(u));
        if best.is_none_or(|(best_metric, ..)| metric < best_metric) {
            best = Some((metric, index, t));
        }
    }

    let Some((_, index, t)) = best else {
        trace!(point:?; "No edge crossing for expand ray, point left in place");
        return Vec2::ZERO;
    };
    edges(to)[index].eval(t) - edges(from)[index].eval(t)
}
