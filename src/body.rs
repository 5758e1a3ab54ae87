use crate::math::{Point2d, Vector2d};
use serde::{Deserialize, Serialize};

/// The position, velocity and acceleration of a simulated body,
/// in m, m/s and m/s<sup>2</sup>.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct KinematicBody {
    /// The position in m.
    pub pos: Point2d,
    /// The velocity in m/s.
    pub vel: Vector2d,
    /// The acceleration in m/s<sup>2</sup>.
    pub acc: Vector2d,
}

impl KinematicBody {
    /// Creates a new body.
    pub fn new(pos: Point2d, vel: Vector2d, acc: Vector2d) -> Self {
        Self { pos, vel, acc }
    }

    /// Creates a body moving at a constant velocity.
    pub fn moving(pos: Point2d, vel: Vector2d) -> Self {
        Self::new(pos, vel, Vector2d::new(0.0, 0.0))
    }

    /// Advances the position by `dt` seconds at the current velocity.
    pub fn translate(&mut self, dt: f64) {
        self.pos += self.vel * dt;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn translate() {
        let mut body = KinematicBody::moving(Point2d::new(1.0, 2.0), Vector2d::new(0.0, 3.0));
        body.translate(0.5);
        assert_approx_eq!(body.pos.x, 1.0);
        assert_approx_eq!(body.pos.y, 3.5);
    }
}
