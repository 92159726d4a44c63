//! Containment queries for the game's flat geometry
//!
//! Everything here is axis-aligned or circular: bricks are rectangles in
//! screen space (y grows downward), the detector is a circle. Rectangle
//! bounds are inclusive; the detector test is strictly inside.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle anchored at its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub pos: Vec2,
    pub size: Vec2,
}

impl Rect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    /// Check if a point is inside the rectangle (edges count as inside)
    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.pos.x
            && point.x <= self.pos.x + self.size.x
            && point.y >= self.pos.y
            && point.y <= self.pos.y + self.size.y
    }

    /// Center point of the rectangle
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }
}

/// Check if a point is strictly inside a circle
///
/// Strict so a ray grazing the detector's rim does not count as detected.
#[inline]
pub fn circle_contains(center: Vec2, radius: f32, point: Vec2) -> bool {
    point.distance(center) < radius
}
