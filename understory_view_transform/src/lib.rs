// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Understory View Transform: composable transforms for live diagram interaction.
//!
//! Diagram elements keep their geometry in model space. While the user drags,
//! resizes, or expands a container, the renderer and hit testing need the
//! geometry as it looks _during_ the gesture. This crate models that mapping
//! as a small set of transforms:
//! - [`NullTransform`]: identity.
//! - [`DragTransform`]: translation.
//! - [`ResizeTransform`]: scale about an anchor, possibly non-uniform.
//! - [`ExpandTransform`]: the non-affine displacement of expanding or
//!   collapsing a container, with an inverse mapping.
//!
//! Every transform owns a [`TransformChain`] of pre-transforms that run before
//! its own mapping, in insertion order. Chains nest, so a resize started on an
//! already-dragged view composes by pushing the drag into the resize's chain.
//! [`ViewTransform`] is the closed enum over the four variants and is the
//! element type of a chain.
//!
//! It does **not** own any scene, document, or renderer. Callers are expected
//! to:
//! - Build one transform per active gesture and drop it when the gesture ends.
//! - Call [`Transform::transform_rect`] / [`Transform::transform_point`] per
//!   element per frame.
//! - Use [`Transform::transforms_of`] to recover a live transform (for example
//!   the current resize, to place a handle) instead of tracking it separately.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Rect};
//! use understory_view_transform::{DragTransform, ResizeTransform, Transform};
//!
//! // The element was dragged by (10, 0), then a resize started.
//! let resize = ResizeTransform::new(Point::new(0.0, 0.0), 2.0, 2.0)
//!     .with_pre_transform(DragTransform::new(10.0, 0.0));
//!
//! let rect = Rect::from_origin_size((0.0, 0.0), (5.0, 5.0));
//! assert_eq!(
//!     resize.transform_rect(&"task", rect),
//!     Rect::from_origin_size((20.0, 0.0), (10.0, 10.0)),
//! );
//!
//! // Interaction code can find the drag again without keeping it around.
//! let drags = resize.transforms_of::<DragTransform<&str>>();
//! assert_eq!(drags[0].offset().x, 10.0);
//! ```
//!
//! ## Expanding a container
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_view_transform::{ExpandTransform, Transform};
//!
//! let shape = Rect::from_origin_size((0.0, 0.0), (100.0, 100.0));
//! let expand = ExpandTransform::centered("group", shape, Vec2::new(20.0, 20.0), ["viewport"])?;
//!
//! // A sibling directly above the container is pushed up by the expansion.
//! let moved = expand.transform_point(&"sibling", Point::new(50.0, -10.0));
//! assert!((moved.y - -30.0).abs() < 1e-9);
//!
//! // Collapsing recovers the original position.
//! let back = expand.undo_point(&"sibling", moved);
//! assert!((back.y - -10.0).abs() < 1e-9);
//!
//! // Excluded elements are never displaced.
//! let fixed = expand.transform_point(&"viewport", Point::new(50.0, -10.0));
//! assert_eq!(fixed, Point::new(50.0, -10.0));
//! # Ok::<(), understory_view_transform::ExpandError>(())
//! ```
//!
//! ## Design notes
//!
//! - All mapping operations are total. Degenerate expand geometry (a shape
//!   with zero width or height, or a point on the shape's center) leaves
//!   points where they are rather than producing NaN.
//! - Inconsistent expand parameters are rejected at construction with an
//!   [`ExpandError`].
//! - Transforms are plain values; nothing is shared or global.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod affine;
mod chain;
mod expand;
mod transform;

pub use affine::{DragTransform, NullTransform, ResizeTransform};
pub use chain::TransformChain;
pub use expand::{ExpandError, ExpandTransform};
pub use transform::{Transform, TransformKind, TransformVariant, ViewTransform};
