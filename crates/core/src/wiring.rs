//! Wiring-direction resolution
//!
//! A panel's LED strip enters at one corner and leaves at another. Which
//! corners those are depends on the start edges, the run orientation and,
//! for serpentine wiring, on the parity of the panel dimension along which
//! the runs alternate. The resolver is a pure function of those inputs.
//!
//! ```text
//! Horizontal serpentine, 3 wide, 4 high (even rows):
//!   in ->  0  1  2
//!          5  4  3
//!          6  7  8
//!  out <- 11 10  9
//! ```

use crate::types::{Orientation, StartH, StartV};
use serde::{Deserialize, Serialize};

/// A corner of a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl Corner {
    /// The corner named by a pair of start edges
    pub fn from_start(start_v: StartV, start_h: StartH) -> Self {
        match (start_v, start_h) {
            (StartV::Top, StartH::Left) => Corner::TopLeft,
            (StartV::Top, StartH::Right) => Corner::TopRight,
            (StartV::Bottom, StartH::Left) => Corner::BottomLeft,
            (StartV::Bottom, StartH::Right) => Corner::BottomRight,
        }
    }

    pub fn is_top(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::TopRight)
    }

    pub fn is_left(&self) -> bool {
        matches!(self, Corner::TopLeft | Corner::BottomLeft)
    }

    /// The diagonally opposite corner
    pub fn diagonal(&self) -> Self {
        match self {
            Corner::TopLeft => Corner::BottomRight,
            Corner::TopRight => Corner::BottomLeft,
            Corner::BottomLeft => Corner::TopRight,
            Corner::BottomRight => Corner::TopLeft,
        }
    }

    /// True when both corners share exactly one edge
    pub fn is_adjacent_to(&self, other: &Corner) -> bool {
        (self.is_top() == other.is_top()) != (self.is_left() == other.is_left())
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Corner::TopLeft => "top-left",
            Corner::TopRight => "top-right",
            Corner::BottomLeft => "bottom-left",
            Corner::BottomRight => "bottom-right",
        }
    }
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// An arrow drawn at a panel corner, rotated by a multiple of 90 degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WiringIndicator {
    pub corner: Corner,
    /// Clockwise rotation of the arrow glyph, in degrees
    pub rotation: i16,
}

impl WiringIndicator {
    pub fn new(corner: Corner, rotation: i16) -> Self {
        Self { corner, rotation }
    }
}

impl std::fmt::Display for WiringIndicator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}°)", self.corner, self.rotation)
    }
}

/// Entry and exit indicators for one panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WiringIndicators {
    pub entry: WiringIndicator,
    pub exit: WiringIndicator,
}

impl WiringIndicators {
    /// True when the strip leaves on a corner sharing an edge with the entry
    pub fn exits_adjacent(&self) -> bool {
        self.entry.corner.is_adjacent_to(&self.exit.corner)
    }
}

/// Derive the entry and exit indicators of a panel.
///
/// `width_units` and `height_units` are the LED counts along each axis; only
/// their parity matters.
pub fn resolve_wiring(
    start_h: StartH,
    start_v: StartV,
    orientation: Orientation,
    serpentine: bool,
    width_units: u32,
    height_units: u32,
) -> WiringIndicators {
    let entry_corner = Corner::from_start(start_v, start_h);
    let horizontal = orientation == Orientation::Horizontal;

    let rotation = match (entry_corner, horizontal) {
        (Corner::TopLeft | Corner::BottomLeft, true) => -180,
        (Corner::TopRight | Corner::BottomRight, true) => 0,
        (Corner::TopLeft | Corner::TopRight, false) => -90,
        (Corner::BottomLeft | Corner::BottomRight, false) => 90,
    };

    let entry = WiringIndicator::new(entry_corner, rotation);
    let mut exit = WiringIndicator::new(entry_corner.diagonal(), rotation);

    if serpentine {
        // An even number of runs ends on the side it started from
        if horizontal && height_units % 2 == 0 {
            exit = match entry_corner {
                Corner::TopLeft => WiringIndicator::new(Corner::BottomLeft, 0),
                Corner::TopRight => WiringIndicator::new(Corner::BottomRight, 180),
                Corner::BottomLeft => WiringIndicator::new(Corner::TopLeft, 0),
                Corner::BottomRight => WiringIndicator::new(Corner::TopRight, -180),
            };
        } else if !horizontal && width_units % 2 == 0 {
            exit = match entry_corner {
                Corner::TopLeft => WiringIndicator::new(Corner::TopRight, 90),
                Corner::TopRight => WiringIndicator::new(Corner::TopLeft, 90),
                Corner::BottomLeft => WiringIndicator::new(Corner::BottomRight, -90),
                Corner::BottomRight => WiringIndicator::new(Corner::BottomLeft, -90),
            };
        }
    }

    WiringIndicators { entry, exit }
}

// ============================================================================
// Tests
// ============================================================================
