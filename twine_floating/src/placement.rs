// Copyright 2025 the Twine Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Placement vocabulary: sides, alignments, and positioning strategies.

use alloc::string::{String, ToString};
use core::fmt;
use core::str::FromStr;

/// Error returned when an attribute value does not name a known variant.
#[derive(Clone, PartialEq, Eq)]
pub struct ParseError {
    /// What was being parsed (`"placement"`, `"strategy"`, ...).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}

impl ParseError {
    /// Create an error for `value`.
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

impl fmt::Debug for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ParseError {{ kind: {:?}, value: {:?} }}", self.kind, self.value)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "`{}` is not a valid {}", self.value, self.kind)
    }
}

impl core::error::Error for ParseError {}

/// Side of the reference the floating element is placed on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Side {
    /// Above.
    Top,
    /// To the right.
    Right,
    /// Below.
    Bottom,
    /// To the left.
    Left,
}

impl Side {
    /// The side across the reference.
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// `true` for top and bottom, where the main axis is vertical.
    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::Top => "top",
            Self::Right => "right",
            Self::Bottom => "bottom",
            Self::Left => "left",
        }
    }
}

/// Alignment along the cross axis. Absent means centered.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Alignment {
    /// Align the leading edges.
    Start,
    /// Align the trailing edges.
    End,
}

impl Alignment {
    /// The other alignment.
    pub fn opposite(self) -> Self {
        match self {
            Self::Start => Self::End,
            Self::End => Self::Start,
        }
    }
}

/// A side plus an optional alignment, such as `bottom-start`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    /// Side of the reference.
    pub side: Side,
    /// Cross-axis alignment, `None` for centered.
    pub alignment: Option<Alignment>,
}

impl Default for Placement {
    fn default() -> Self {
        Self::new(Side::Bottom, Some(Alignment::Start))
    }
}

impl Placement {
    /// Create a placement.
    pub const fn new(side: Side, alignment: Option<Alignment>) -> Self {
        Self { side, alignment }
    }

    /// Same alignment on the opposite side.
    #[must_use]
    pub fn flipped(self) -> Self {
        Self::new(self.side.opposite(), self.alignment)
    }

    /// Same side with the opposite alignment. Centered placements are unchanged.
    #[must_use]
    pub fn flipped_alignment(self) -> Self {
        Self::new(self.side, self.alignment.map(Alignment::opposite))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.side.as_str())?;
        match self.alignment {
            Some(Alignment::Start) => f.write_str("-start"),
            Some(Alignment::End) => f.write_str("-end"),
            None => Ok(()),
        }
    }
}

impl FromStr for Placement {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (side, alignment) = match s.trim().split_once('-') {
            Some((side, "start")) => (side, Some(Alignment::Start)),
            Some((side, "end")) => (side, Some(Alignment::End)),
            Some(_) => return Err(ParseError::new("placement", s)),
            None => (s.trim(), None),
        };
        let side = match side {
            "top" => Side::Top,
            "right" => Side::Right,
            "bottom" => Side::Bottom,
            "left" => Side::Left,
            _ => return Err(ParseError::new("placement", s)),
        };
        Ok(Self::new(side, alignment))
    }
}

/// CSS `position` used for the floating element.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Relative to the nearest positioned ancestor.
    Absolute,
    /// Relative to the viewport.
    #[default]
    Fixed,
}

impl Strategy {
    /// CSS keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Absolute => "absolute",
            Self::Fixed => "fixed",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "absolute" => Ok(Self::Absolute),
            "fixed" => Ok(Self::Fixed),
            _ => Err(ParseError::new("strategy", s)),
        }
    }
}
