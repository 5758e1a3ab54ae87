//! Exact collision geometry used to judge the outcome of a simulation.

use crate::math::{Point2d, Vector2d};
use cgmath::prelude::*;

/// An axis-aligned rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
    /// The corner with the smallest coordinates.
    pub min: Point2d,
    /// The extents along each axis, which must be non-negative.
    pub size: Vector2d,
}

/// A disc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Disc {
    pub centre: Point2d,
    pub radius: f64,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(min: Point2d, size: Vector2d) -> Self {
        Self { min, size }
    }

    /// The corner with the largest coordinates.
    pub fn max(&self) -> Point2d {
        self.min + self.size
    }

    /// The point within the rectangle closest to `point`.
    pub fn closest_point(&self, point: Point2d) -> Point2d {
        let max = self.max();
        Point2d::new(
            point.x.clamp(self.min.x, max.x),
            point.y.clamp(self.min.y, max.y),
        )
    }
}

/// Determines whether a rectangle and a disc overlap. Touching counts as overlapping.
pub fn rect_disc_overlap(rect: &Rect, disc: &Disc) -> bool {
    let closest = rect.closest_point(disc.centre);
    closest.distance2(disc.centre) <= disc.radius * disc.radius
}
