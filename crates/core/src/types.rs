//! Core types used throughout the LED panel mapper
//!
//! This module contains the fundamental geometric primitives and the panel
//! wiring enums shared by the layout store, the interaction controller and
//! the config codec.

use serde::{Deserialize, Serialize};

// ============================================================================
// Unique Identifiers
// ============================================================================

/// Identifier of a panel within one layout.
///
/// Ids are small positive integers handed out as `max(existing) + 1`.
pub type PanelId = u32;

// ============================================================================
// Geometry Types
// ============================================================================

/// Position on the 2D canvas, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a new position
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Create a position at the origin (0, 0)
    pub fn zero() -> Self {
        Self { x: 0, y: 0 }
    }

    /// Add an offset to this position, saturating at the `i32` range
    pub fn offset(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
        }
    }
}

impl std::ops::Add for Position {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        self.offset(other.x, other.y)
    }
}

impl std::ops::Sub for Position {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            x: self.x.saturating_sub(other.x),
            y: self.y.saturating_sub(other.y),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Size of a panel on the canvas, in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    /// Create a new size
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Create a square size
    pub fn square(side: i32) -> Self {
        Self {
            width: side,
            height: side,
        }
    }

    /// Create a zero size
    pub fn zero() -> Self {
        Self {
            width: 0,
            height: 0,
        }
    }

    /// Calculate the area
    pub fn area(&self) -> i64 {
        i64::from(self.width) * i64::from(self.height)
    }

    /// True when either side is zero or negative
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub position: Position,
    pub size: Size,
}

impl Rect {
    /// Create a new rectangle
    pub fn new(position: Position, size: Size) -> Self {
        Self { position, size }
    }

    /// Create a rectangle from coordinates and dimensions
    pub fn from_xywh(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            position: Position::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub fn x(&self) -> i32 {
        self.position.x
    }

    pub fn y(&self) -> i32 {
        self.position.y
    }

    pub fn width(&self) -> i32 {
        self.size.width
    }

    pub fn height(&self) -> i32 {
        self.size.height
    }

    /// Right edge (exclusive), saturating at `i32::MAX`
    pub fn right(&self) -> i32 {
        self.position.x.saturating_add(self.size.width)
    }

    /// Bottom edge (exclusive), saturating at `i32::MAX`
    pub fn bottom(&self) -> i32 {
        self.position.y.saturating_add(self.size.height)
    }

    /// True when the rectangle has no area
    pub fn is_empty(&self) -> bool {
        self.size.is_empty()
    }

    /// Check if a point lies inside the half-open rectangle
    pub fn contains(&self, point: Position) -> bool {
        point.x >= self.x()
            && point.x < self.right()
            && point.y >= self.y()
            && point.y < self.bottom()
    }

    /// Check if the open interiors of two rectangles overlap.
    ///
    /// Rectangles that only share an edge do not intersect, and a rectangle
    /// without area never intersects anything.
    pub fn intersects(&self, other: &Rect) -> bool {
        if self.is_empty() || other.is_empty() {
            return false;
        }
        !(self.x() >= other.right()
            || self.right() <= other.x()
            || self.y() >= other.bottom()
            || self.bottom() <= other.y())
    }

    /// Get the union of two rectangles (bounding box containing both)
    pub fn union(&self, other: &Rect) -> Self {
        let min_x = self.x().min(other.x());
        let min_y = self.y().min(other.y());
        let max_x = self.right().max(other.right());
        let max_y = self.bottom().max(other.bottom());

        Self::from_xywh(
            min_x,
            min_y,
            max_x.saturating_sub(min_x),
            max_y.saturating_sub(min_y),
        )
    }

    /// Bounding box of a set of rectangles, `None` for an empty set
    pub fn enclosing<I>(rects: I) -> Option<Rect>
    where
        I: IntoIterator<Item = Rect>,
    {
        rects.into_iter().reduce(|acc, rect| acc.union(&rect))
    }

    /// Move the rectangle by the given offset
    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self {
            position: self.position.offset(dx, dy),
            size: self.size,
        }
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} @ {}", self.size, self.position)
    }
}

// ============================================================================
// Wiring Types
// ============================================================================

/// Horizontal edge where the LED data line enters a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartH {
    #[default]
    Left,
    Right,
}

impl StartH {
    /// The opposite edge
    pub fn toggled(self) -> Self {
        match self {
            StartH::Left => StartH::Right,
            StartH::Right => StartH::Left,
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StartH::Left => "left",
            StartH::Right => "right",
        }
    }
}

impl std::fmt::Display for StartH {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Vertical edge where the LED data line enters a panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartV {
    #[default]
    Top,
    Bottom,
}

impl StartV {
    /// The opposite edge
    pub fn toggled(self) -> Self {
        match self {
            StartV::Top => StartV::Bottom,
            StartV::Bottom => StartV::Top,
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            StartV::Top => "top",
            StartV::Bottom => "bottom",
        }
    }
}

impl std::fmt::Display for StartV {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Whether LEDs inside a panel run along rows or columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The other orientation
    pub fn toggled(self) -> Self {
        match self {
            Orientation::Horizontal => Orientation::Vertical,
            Orientation::Vertical => Orientation::Horizontal,
        }
    }

    /// Get the display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Orientation::Horizontal => "horizontal",
            Orientation::Vertical => "vertical",
        }
    }
}

impl std::fmt::Display for Orientation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Canvas axis, used when adjusting per-axis grid factors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    X,
    Y,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // Position tests
    #[test]
    fn test_position_offset() {
        let pos = Position::new(10, 20);
        let new_pos = pos.offset(5, -10);
        assert_eq!(new_pos, Position::new(15, 10));
    }

    #[test]
    fn test_position_add_sub() {
        let p1 = Position::new(10, 20);
        let p2 = Position::new(5, 5);
        assert_eq!(p1 + p2, Position::new(15, 25));
        assert_eq!(p1 - p2, Position::new(5, 15));
    }

    // Size tests
    #[test]
    fn test_size_area_and_empty() {
        assert_eq!(Size::new(10, 5).area(), 50);
        assert!(Size::zero().is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::square(50).is_empty());
    }

    // Rect tests
    #[test]
    fn test_rect_edges() {
        let rect = Rect::from_xywh(10, 20, 100, 50);
        assert_eq!(rect.right(), 110);
        assert_eq!(rect.bottom(), 70);
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::from_xywh(10, 10, 100, 50);
        assert!(rect.contains(Position::new(50, 30)));
        assert!(rect.contains(Position::new(10, 10)));
        assert!(!rect.contains(Position::new(110, 30)));
        assert!(!rect.contains(Position::new(5, 30)));
    }

    #[test]
    fn test_rect_intersects_overlap() {
        let r1 = Rect::from_xywh(0, 0, 50, 50);
        let r2 = Rect::from_xywh(25, 25, 50, 50);
        assert!(r1.intersects(&r2));
        assert!(r2.intersects(&r1));
    }

    #[test]
    fn test_rect_intersects_disjoint() {
        let r1 = Rect::from_xywh(0, 0, 50, 50);
        let r2 = Rect::from_xywh(100, 100, 50, 50);
        assert!(!r1.intersects(&r2));
        assert!(!r2.intersects(&r1));
    }

    #[test]
    fn test_rect_touching_edges_do_not_intersect() {
        let left = Rect::from_xywh(0, 0, 50, 50);
        let right = Rect::from_xywh(50, 0, 50, 50);
        let below = Rect::from_xywh(0, 50, 50, 50);
        let corner = Rect::from_xywh(50, 50, 50, 50);
        assert!(!left.intersects(&right));
        assert!(!right.intersects(&left));
        assert!(!left.intersects(&below));
        assert!(!left.intersects(&corner));
    }

    #[test]
    fn test_rect_containment_intersects() {
        let outer = Rect::from_xywh(0, 0, 200, 200);
        let inner = Rect::from_xywh(50, 50, 10, 10);
        assert!(outer.intersects(&inner));
        assert!(inner.intersects(&outer));
        assert!(outer.intersects(&outer));
    }

    #[test]
    fn test_rect_empty_never_intersects() {
        let outer = Rect::from_xywh(0, 0, 200, 200);
        let degenerate = Rect::from_xywh(50, 50, 0, 10);
        assert!(!outer.intersects(&degenerate));
        assert!(!degenerate.intersects(&outer));
    }

    #[test]
    fn test_rect_union() {
        let r1 = Rect::from_xywh(0, 0, 50, 50);
        let r2 = Rect::from_xywh(25, 25, 50, 50);
        assert_eq!(r1.union(&r2), Rect::from_xywh(0, 0, 75, 75));
    }

    #[test]
    fn test_rect_enclosing() {
        let rects = vec![
            Rect::from_xywh(100, 0, 50, 50),
            Rect::from_xywh(0, 50, 50, 100),
            Rect::from_xywh(50, 20, 10, 10),
        ];
        assert_eq!(Rect::enclosing(rects), Some(Rect::from_xywh(0, 0, 150, 150)));
        assert_eq!(Rect::enclosing(Vec::new()), None);
    }

    #[test]
    fn test_far_edges_saturate() {
        let far = Rect::from_xywh(i32::MAX - 10, 0, 100, i32::MAX);
        assert_eq!(far.right(), i32::MAX);
        assert_eq!(far.bottom(), i32::MAX);

        let near = Rect::from_xywh(-100, 0, 10, 10);
        assert_eq!(near.union(&far), Rect::from_xywh(-100, 0, i32::MAX, i32::MAX));
        assert_eq!(
            Position::new(i32::MAX, i32::MIN).offset(1, -1),
            Position::new(i32::MAX, i32::MIN)
        );
        assert_eq!(Position::new(i32::MIN, 0) - Position::new(1, 0), Position::new(i32::MIN, 0));
    }

    #[test]
    fn test_rect_translate() {
        let rect = Rect::from_xywh(10, 10, 5, 5).translate(-10, 30);
        assert_eq!(rect, Rect::from_xywh(0, 40, 5, 5));
    }

    // Wiring enum tests
    #[test]
    fn test_toggles_are_involutions() {
        assert_eq!(StartH::Left.toggled(), StartH::Right);
        assert_eq!(StartH::Left.toggled().toggled(), StartH::Left);
        assert_eq!(StartV::Top.toggled(), StartV::Bottom);
        assert_eq!(Orientation::Horizontal.toggled(), Orientation::Vertical);
    }

    #[test]
    fn test_wiring_defaults() {
        assert_eq!(StartH::default(), StartH::Left);
        assert_eq!(StartV::default(), StartV::Top);
        assert_eq!(Orientation::default(), Orientation::Horizontal);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(StartH::Right.to_string(), "right");
        assert_eq!(StartV::Bottom.to_string(), "bottom");
        assert_eq!(Orientation::Vertical.to_string(), "vertical");
        assert_eq!(Rect::from_xywh(1, 2, 3, 4).to_string(), "3x4 @ (1, 2)");
    }
}
