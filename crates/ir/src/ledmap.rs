//! LED index map
//!
//! A rectangular grid of cells, each lit or dark. Lighting a cell hands it
//! the next LED index; darkening one drops its index and shifts every later
//! index down by one, so the lit cells always carry exactly `0..led_count`.
//!
//! The map a device reads lists the cells row by row, with `-1` for dark
//! cells: `{"leds":[0,1,-1,2]}`.

use ledmap_core::{MapperError, MapperResult};
use serde::{Deserialize, Serialize};

/// Width and height of a freshly opened grid
pub const DEFAULT_GRID_SIZE: u32 = 10;

/// Largest width or height a grid takes
pub const MAX_GRID_SIZE: u32 = 1024;

/// Value written for a dark cell
pub const DARK_CELL: i64 = -1;

// ============================================================================
// LedMap
// ============================================================================

/// The row-major index list a device reads
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedMap {
    pub leds: Vec<i64>,
}

impl LedMap {
    /// Number of lit cells
    pub fn lit(&self) -> usize {
        self.leds.iter().filter(|&&led| led != DARK_CELL).count()
    }
}

// ============================================================================
// LedGrid
// ============================================================================

/// Whether a pointer stroke lights or darkens the cells it crosses.
///
/// The stroke takes its action from the cell it starts on, so dragging across
/// a mix of cells only ever changes them one way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintAction {
    Light,
    Darken,
}

/// Grid of cells with their LED indices
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedGrid {
    width: u32,
    height: u32,
    cells: Vec<Option<u32>>,
    led_count: u32,
}

impl Default for LedGrid {
    fn default() -> Self {
        Self::new(DEFAULT_GRID_SIZE, DEFAULT_GRID_SIZE)
    }
}

impl LedGrid {
    /// Create a dark grid, clamped to `1..=MAX_GRID_SIZE` cells each way
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.clamp(1, MAX_GRID_SIZE);
        let height = height.clamp(1, MAX_GRID_SIZE);
        Self {
            width,
            height,
            cells: vec![None; (width * height) as usize],
            led_count: 0,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of lit cells
    pub fn led_count(&self) -> u32 {
        self.led_count
    }

    /// Change the grid size. Every cell goes dark.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Self::new(width, height);
        tracing::debug!("LED grid reset to {}x{}", self.width, self.height);
    }

    /// Darken every cell
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = None);
        self.led_count = 0;
    }

    fn offset(&self, x: u32, y: u32) -> MapperResult<usize> {
        if x >= self.width || y >= self.height {
            return Err(MapperError::CellOutOfRange {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((y * self.width + x) as usize)
    }

    /// LED index of a cell, `None` when dark or outside the grid
    pub fn index_at(&self, x: u32, y: u32) -> Option<u32> {
        let offset = self.offset(x, y).ok()?;
        self.cells.get(offset).copied().flatten()
    }

    pub fn is_lit(&self, x: u32, y: u32) -> bool {
        self.index_at(x, y).is_some()
    }

    /// Light a cell with the next index; false when it was already lit
    pub fn light(&mut self, x: u32, y: u32) -> MapperResult<bool> {
        let offset = self.offset(x, y)?;
        if self.cells[offset].is_some() {
            return Ok(false);
        }
        self.cells[offset] = Some(self.led_count);
        self.led_count += 1;
        Ok(true)
    }

    /// Darken a cell and close the gap in the numbering; false when it was
    /// already dark
    pub fn darken(&mut self, x: u32, y: u32) -> MapperResult<bool> {
        let offset = self.offset(x, y)?;
        let Some(removed) = self.cells[offset].take() else {
            return Ok(false);
        };
        for index in self.cells.iter_mut().flatten() {
            if *index > removed {
                *index -= 1;
            }
        }
        self.led_count -= 1;
        Ok(true)
    }

    /// Toggle the cell a stroke starts on and return the stroke's action
    pub fn press(&mut self, x: u32, y: u32) -> MapperResult<PaintAction> {
        if self.is_lit(x, y) {
            self.darken(x, y)?;
            Ok(PaintAction::Darken)
        } else {
            self.light(x, y)?;
            Ok(PaintAction::Light)
        }
    }

    /// Apply a stroke's action to a cell it crosses
    pub fn paint(&mut self, x: u32, y: u32, action: PaintAction) -> MapperResult<bool> {
        match action {
            PaintAction::Light => self.light(x, y),
            PaintAction::Darken => self.darken(x, y),
        }
    }

    /// Row-major index list, `-1` for dark cells
    pub fn to_led_map(&self) -> LedMap {
        LedMap {
            leds: self
                .cells
                .iter()
                .map(|cell| cell.map_or(DARK_CELL, i64::from))
                .collect(),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
