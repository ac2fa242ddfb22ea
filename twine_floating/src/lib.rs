// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Twine Floating: keep a floating element anchored to a reference and visible.
//!
//! ## Overview
//!
//! Given the bounds of a reference element (a trigger), the natural size of a
//! floating element (a menu or tooltip panel), and a boundary (usually the
//! viewport), [`compute_position`] returns where the floating element goes.
//!
//! The pipeline is deliberately small:
//!
//! - [`Placement`]: one of twelve canonical placements (`bottom-start`, `top`, ...).
//! - [`Offset`]: gap along the main axis and skid along the cross axis.
//! - Flip: when the preferred placement overflows, try the opposite alignment, then
//!   the opposite side, then both, falling back to the best fit.
//! - Shift: clamp along the cross axis so the element stays inside the boundary.
//! - [`SizeSync`]: copy the reference width and/or height.
//! - Arrow: an [`ArrowOffset`] that points at the reference center.
//!
//! The [`Positioner`] trait lets embedders replace the [`Solver`].
//!
//! ## Example
//!
//! ```rust
//! use kurbo::{Rect, Size};
//! use twine_floating::{Offset, PositionOptions, Positioner, Rects, Solver};
//!
//! let rects = Rects {
//!     reference: Rect::new(100.0, 570.0, 180.0, 590.0),
//!     floating: Size::new(120.0, 80.0),
//!     arrow: None,
//! };
//! let options = PositionOptions {
//!     offset: Offset { main_axis: 4.0, cross_axis: 0.0 },
//!     ..PositionOptions::default()
//! };
//! // Not enough room below the trigger: the panel flips above it.
//! let pos = Solver.position(&rects, Rect::new(0.0, 0.0, 800.0, 600.0), &options);
//! assert_eq!(pos.placement.to_string(), "top-start");
//! assert_eq!(pos.y, 570.0 - 80.0 - 4.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod placement;
mod solver;

pub use placement::{Alignment, ParseError, Placement, Side, Strategy};
pub use solver::{
    ArrowOffset, Offset, Position, PositionOptions, Positioner, Rects, SizeSync, Solver,
    compute_position,
};
