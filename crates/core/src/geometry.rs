//! Grid arithmetic for the panel canvas
//!
//! Panels live on a canvas quantized to a grid step (`scale_factor` pixels
//! per grid unit). Each grid unit stands for a block of real LED pixels
//! (`grid_factor_x` × `grid_factor_y`). This module infers that block size
//! from imported device coordinates and converts between the two spaces.

use serde::{Deserialize, Serialize};

/// Units at or above this value, when divisible by 4, are split into quarters.
const QUARTER_THRESHOLD: u32 = 20;

/// Units at or above this value, when divisible by 2, are split into halves.
const HALF_THRESHOLD: u32 = 10;

/// Real LED pixels represented by one grid unit along each axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommonUnit {
    pub x: u32,
    pub y: u32,
}

impl CommonUnit {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Replace zero components with 1 so the unit can be used as a divisor
    pub fn at_least_one(self) -> Self {
        Self {
            x: self.x.max(1),
            y: self.y.max(1),
        }
    }
}

/// Greatest common divisor, with `gcd(a, 0) == a`
pub fn gcd(a: u32, b: u32) -> u32 {
    let (mut a, mut b) = (a, b);
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

/// Fold `gcd` over the x and y offsets independently.
///
/// The accumulator starts at the first offset pair, so a single offset
/// yields itself. Returns `None` for an empty input.
pub fn common_offset_unit<I>(offsets: I) -> Option<CommonUnit>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    let mut offsets = offsets.into_iter();
    let (first_x, first_y) = offsets.next()?;
    let unit = offsets.fold(CommonUnit::new(first_x, first_y), |acc, (x, y)| {
        CommonUnit::new(gcd(acc.x, x), gcd(acc.y, y))
    });
    Some(unit)
}

/// Split a coarse unit into a finer editing granularity.
///
/// Quarters are tried before halves; both axes must qualify together.
pub fn refine_unit(unit: CommonUnit) -> CommonUnit {
    let CommonUnit { x, y } = unit;
    if x >= QUARTER_THRESHOLD && y >= QUARTER_THRESHOLD && x % 4 == 0 && y % 4 == 0 {
        CommonUnit::new(x / 4, y / 4)
    } else if x >= HALF_THRESHOLD && y >= HALF_THRESHOLD && x % 2 == 0 && y % 2 == 0 {
        CommonUnit::new(x / 2, y / 2)
    } else {
        unit
    }
}

/// Infer the grid unit implied by a set of panel offsets.
///
/// Callers must not pass an empty set; `None` signals that violation.
/// The result may contain zero components (all offsets zero on an axis).
pub fn largest_common_unit<I>(offsets: I) -> Option<CommonUnit>
where
    I: IntoIterator<Item = (u32, u32)>,
{
    common_offset_unit(offsets).map(refine_unit)
}

/// Infer the grid unit from panel footprints given as `(x, y, width, height)`.
///
/// Like [`largest_common_unit`], except an axis whose offsets are all zero
/// takes the gcd of the panel extents on that axis instead. A component can
/// still be zero when every extent on that axis is zero too.
pub fn infer_grid_unit<I>(footprints: I) -> Option<CommonUnit>
where
    I: IntoIterator<Item = (u32, u32, u32, u32)>,
{
    let footprints: Vec<_> = footprints.into_iter().collect();
    let mut unit = common_offset_unit(footprints.iter().map(|&(x, y, _, _)| (x, y)))?;
    if unit.x == 0 || unit.y == 0 {
        let extents = common_offset_unit(footprints.iter().map(|&(_, _, w, h)| (w, h)))?;
        if unit.x == 0 {
            unit.x = extents.x;
        }
        if unit.y == 0 {
            unit.y = extents.y;
        }
    }
    Some(refine_unit(unit))
}

/// Round a pixel value to the nearest multiple of `step`
pub fn snap_to_grid(value: i32, step: i32) -> i32 {
    if step <= 0 {
        return value;
    }
    ((f64::from(value) / f64::from(step)).round() * f64::from(step)) as i32
}

/// Convert a real LED-pixel value into canvas pixels
pub fn real_to_canvas(value: u32, scale_factor: u32, grid_factor: u32) -> i32 {
    let grid_factor = grid_factor.max(1);
    (f64::from(value) * f64::from(scale_factor) / f64::from(grid_factor)).round() as i32
}

/// Convert canvas pixels back into real LED pixels, clamped at zero
pub fn canvas_to_real(pixels: i32, scale_factor: u32, grid_factor: u32) -> u32 {
    if scale_factor == 0 || pixels <= 0 {
        return 0;
    }
    (f64::from(pixels) / f64::from(scale_factor) * f64::from(grid_factor)).round() as u32
}

// ============================================================================
// Tests
// ============================================================================
