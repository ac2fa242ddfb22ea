// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The placement pipeline.
//!
//! Positioning runs in a fixed order, each step working on the result of the
//! previous one:
//!
//! 1. size sync: optionally copy the reference width and/or height,
//! 2. base coordinates for the requested [`Placement`],
//! 3. offset along the main and cross axes,
//! 4. flip to another placement when the preferred one overflows the boundary,
//! 5. shift along the cross axis to stay inside the boundary,
//! 6. arrow offset, centered on the reference and clamped to the floating box.
//!
//! All coordinates are viewport coordinates.

use core::str::FromStr;

use kurbo::{Point, Rect, Size};
use smallvec::SmallVec;

use crate::placement::{Alignment, ParseError, Placement, Side, Strategy};

/// Distance between reference and floating element.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Offset {
    /// Gap along the main axis, away from the reference.
    pub main_axis: f64,
    /// Skid along the cross axis.
    pub cross_axis: f64,
}

impl FromStr for Offset {
    type Err = ParseError;

    /// `"8"` or `"8 4"` (main axis, then cross axis).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_ascii_whitespace().map(str::parse::<f64>);
        let err = || ParseError::new("offset", s);
        let main_axis = match parts.next() {
            Some(v) => v.map_err(|_| err())?,
            None => return Ok(Self::default()),
        };
        let cross_axis = match parts.next() {
            Some(v) => v.map_err(|_| err())?,
            None => 0.0,
        };
        if parts.next().is_some() {
            return Err(err());
        }
        Ok(Self {
            main_axis,
            cross_axis,
        })
    }
}

/// Which reference dimensions the floating element copies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SizeSync {
    /// Copy the width.
    Width,
    /// Copy the height.
    Height,
    /// Copy both.
    Both,
}

impl SizeSync {
    /// Whether the width is copied.
    pub fn width(self) -> bool {
        matches!(self, Self::Width | Self::Both)
    }

    /// Whether the height is copied.
    pub fn height(self) -> bool {
        matches!(self, Self::Height | Self::Both)
    }
}

impl FromStr for SizeSync {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "width" => Ok(Self::Width),
            "height" => Ok(Self::Height),
            "both" => Ok(Self::Both),
            _ => Err(ParseError::new("sync", s)),
        }
    }
}

/// Solver configuration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PositionOptions {
    /// Preferred placement.
    pub placement: Placement,
    /// CSS position strategy, passed through to the result.
    pub strategy: Strategy,
    /// Gap and skid.
    pub offset: Offset,
    /// Boundary padding for flipping, `None` to never flip.
    pub flip: Option<f64>,
    /// Boundary padding for shifting, `None` to never shift.
    pub shift: Option<f64>,
    /// Reference dimensions to copy.
    pub sync: Option<SizeSync>,
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self {
            placement: Placement::default(),
            strategy: Strategy::default(),
            offset: Offset::default(),
            flip: Some(0.0),
            shift: Some(0.0),
            sync: None,
        }
    }
}

/// Geometry fed into the solver.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rects {
    /// Bounds of the reference (trigger).
    pub reference: Rect,
    /// Natural size of the floating element.
    pub floating: Size,
    /// Size of the arrow element, if any.
    pub arrow: Option<Size>,
}

/// Arrow position relative to the floating element. Only the cross-axis
/// coordinate is set.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct ArrowOffset {
    /// Left offset, for top/bottom placements.
    pub x: Option<f64>,
    /// Top offset, for left/right placements.
    pub y: Option<f64>,
}

/// Solver output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Position {
    /// Left edge of the floating element.
    pub x: f64,
    /// Top edge of the floating element.
    pub y: f64,
    /// Placement actually used, after flipping.
    pub placement: Placement,
    /// Strategy from the options.
    pub strategy: Strategy,
    /// Floating size after size sync.
    pub size: Size,
    /// Arrow offset, when an arrow was supplied.
    pub arrow: Option<ArrowOffset>,
}

impl Position {
    /// Bounds of the floating element.
    pub fn rect(&self) -> Rect {
        Rect::from_origin_size((self.x, self.y), self.size)
    }
}

/// Something that can place a floating element next to a reference.
pub trait Positioner {
    /// Compute where the floating element goes.
    fn position(&self, rects: &Rects, boundary: Rect, options: &PositionOptions) -> Position;
}

/// The default [`Positioner`].
#[derive(Copy, Clone, Debug, Default)]
pub struct Solver;

impl Positioner for Solver {
    fn position(&self, rects: &Rects, boundary: Rect, options: &PositionOptions) -> Position {
        let reference = rects.reference;
        let mut size = rects.floating;
        if let Some(sync) = options.sync {
            if sync.width() {
                size.width = reference.width();
            }
            if sync.height() {
                size.height = reference.height();
            }
        }

        let place = |p: Placement| apply_offset(base_coords(reference, size, p), p, options.offset);

        let mut placement = options.placement;
        if let Some(padding) = options.flip {
            placement = choose_placement(placement, boundary, padding, |p| {
                Rect::from_origin_size(place(p), size)
            });
        }
        let Point { mut x, mut y } = place(placement);

        if let Some(padding) = options.shift {
            if placement.side.is_vertical() {
                x = clamp(x, boundary.x0 + padding, boundary.x1 - size.width - padding);
            } else {
                y = clamp(y, boundary.y0 + padding, boundary.y1 - size.height - padding);
            }
        }

        let arrow = rects.arrow.map(|arrow| {
            if placement.side.is_vertical() {
                let center = reference.x0 + reference.width() / 2.0 - arrow.width / 2.0 - x;
                ArrowOffset {
                    x: Some(clamp(center, 0.0, size.width - arrow.width)),
                    y: None,
                }
            } else {
                let center = reference.y0 + reference.height() / 2.0 - arrow.height / 2.0 - y;
                ArrowOffset {
                    x: None,
                    y: Some(clamp(center, 0.0, size.height - arrow.height)),
                }
            }
        });

        Position {
            x,
            y,
            placement,
            strategy: options.strategy,
            size,
            arrow,
        }
    }
}

/// Run the default [`Solver`].
///
/// ```
/// use kurbo::{Rect, Size};
/// use twine_floating::{compute_position, PositionOptions, Rects};
///
/// let rects = Rects {
///     reference: Rect::new(10.0, 10.0, 60.0, 30.0),
///     floating: Size::new(100.0, 40.0),
///     arrow: None,
/// };
/// let viewport = Rect::new(0.0, 0.0, 800.0, 600.0);
/// let pos = compute_position(&rects, viewport, &PositionOptions::default());
/// assert_eq!((pos.x, pos.y), (10.0, 30.0));
/// assert_eq!(pos.placement.to_string(), "bottom-start");
/// ```
pub fn compute_position(rects: &Rects, boundary: Rect, options: &PositionOptions) -> Position {
    Solver.position(rects, boundary, options)
}

fn clamp(value: f64, min: f64, max: f64) -> f64 {
    value.min(max).max(min)
}

fn base_coords(reference: Rect, floating: Size, placement: Placement) -> Point {
    let center_x = reference.x0 + reference.width() / 2.0 - floating.width / 2.0;
    let center_y = reference.y0 + reference.height() / 2.0 - floating.height / 2.0;
    let mut p = match placement.side {
        Side::Top => Point::new(center_x, reference.y0 - floating.height),
        Side::Bottom => Point::new(center_x, reference.y1),
        Side::Right => Point::new(reference.x1, center_y),
        Side::Left => Point::new(reference.x0 - floating.width, center_y),
    };
    let (cross, common) = if placement.side.is_vertical() {
        (&mut p.x, reference.width() / 2.0 - floating.width / 2.0)
    } else {
        (&mut p.y, reference.height() / 2.0 - floating.height / 2.0)
    };
    match placement.alignment {
        Some(Alignment::Start) => *cross -= common,
        Some(Alignment::End) => *cross += common,
        None => {}
    }
    p
}

fn apply_offset(mut p: Point, placement: Placement, offset: Offset) -> Point {
    let main = match placement.side {
        Side::Top | Side::Left => -offset.main_axis,
        Side::Bottom | Side::Right => offset.main_axis,
    };
    if placement.side.is_vertical() {
        p.y += main;
        p.x += offset.cross_axis;
    } else {
        p.x += main;
        p.y += offset.cross_axis;
    }
    p
}

/// Positive values are how far the rect sticks out past each padded edge.
#[derive(Copy, Clone, Debug)]
struct Overflow {
    top: f64,
    right: f64,
    bottom: f64,
    left: f64,
}

impl Overflow {
    fn of(rect: Rect, boundary: Rect, padding: f64) -> Self {
        Self {
            top: boundary.y0 + padding - rect.y0,
            right: rect.x1 - (boundary.x1 - padding),
            bottom: rect.y1 - (boundary.y1 - padding),
            left: boundary.x0 + padding - rect.x0,
        }
    }

    fn side(&self, side: Side) -> f64 {
        match side {
            Side::Top => self.top,
            Side::Right => self.right,
            Side::Bottom => self.bottom,
            Side::Left => self.left,
        }
    }

    /// Main-side overflow and, for aligned placements, the worst cross-side overflow.
    fn checked(&self, placement: Placement) -> (f64, f64) {
        let main = self.side(placement.side);
        let cross = match placement.alignment {
            None => 0.0,
            Some(_) if placement.side.is_vertical() => self.left.max(self.right),
            Some(_) => self.top.max(self.bottom),
        };
        (main, cross)
    }
}

fn choose_placement(
    preferred: Placement,
    boundary: Rect,
    padding: f64,
    rect_for: impl Fn(Placement) -> Rect,
) -> Placement {
    let mut candidates: SmallVec<[Placement; 4]> = SmallVec::new();
    for p in [
        preferred,
        preferred.flipped_alignment(),
        preferred.flipped(),
        preferred.flipped().flipped_alignment(),
    ] {
        if !candidates.contains(&p) {
            candidates.push(p);
        }
    }
    let scored: SmallVec<[(Placement, f64, f64); 4]> = candidates
        .iter()
        .map(|&p| {
            let (main, cross) = Overflow::of(rect_for(p), boundary, padding).checked(p);
            (p, main, cross)
        })
        .collect();

    if let Some(&(p, ..)) = scored.iter().find(|(_, main, cross)| *main <= 0.0 && *cross <= 0.0) {
        if p != preferred {
            log::trace!("flip {preferred} -> {p}");
        }
        return p;
    }
    let fits_main = scored
        .iter()
        .filter(|(_, main, _)| *main <= 0.0)
        .min_by(|a, b| a.2.total_cmp(&b.2));
    let best = fits_main.or_else(|| {
        scored
            .iter()
            .min_by(|a, b| (a.1.max(0.0) + a.2.max(0.0)).total_cmp(&(b.1.max(0.0) + b.2.max(0.0))))
    });
    best.map_or(preferred, |&(p, ..)| p)
}
