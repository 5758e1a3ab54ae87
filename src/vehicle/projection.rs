//! Worst-case projections of where the pedestrian could be.

use crate::body::KinematicBody;
use crate::config::{SensorAccuracy, VehicleAttributes};
use crate::math::time_to_reach;
use crate::sampler::PedestrianSample;
use crate::util::Interval;
use serde::Serialize;

/// The region the pedestrian could occupy by the time the vehicle reaches it.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct OccupancyInterval {
    /// The lateral extents the pedestrian could occupy, in m.
    pub lateral: Interval<f64>,
    /// The longitudinal distance from the vehicle's front to the nearest
    /// plausible pedestrian edge, in m. Negative once they overlap.
    pub distance: f64,
    /// The longitudinal extent of the plausible pedestrian position, in m.
    pub depth: f64,
    /// The projected time until the vehicle reaches the pedestrian, in s.
    pub time_to_reach: f64,
}

impl OccupancyInterval {
    /// Whether the vehicle's front has passed the farthest plausible pedestrian edge.
    pub fn in_the_clear(&self) -> bool {
        self.distance + self.depth < 0.0
    }
}

/// The inputs common to every projection.
#[derive(Clone, Copy, Debug)]
pub struct Projector<'a> {
    pub sensor: &'a SensorAccuracy,
    pub vehicle: &'a VehicleAttributes,
    /// The pedestrian's radius in m.
    pub radius: f64,
}

impl<'a> Projector<'a> {
    /// Projects the worst-case pedestrian occupancy.
    ///
    /// The upper lateral bound grows with both the age of the sample and the
    /// time the vehicle needs to arrive, as the pedestrian may keep walking
    /// throughout.
    ///
    /// # Parameters
    /// * `sample` - The latest pedestrian sample
    /// * `now` - The current simulation time in s
    /// * `body` - The vehicle's kinematic state
    pub fn project(
        &self,
        sample: &PedestrianSample,
        now: f64,
        body: &KinematicBody,
    ) -> OccupancyInterval {
        let margin = self.sensor.location + self.radius;
        let front = body.pos.x + self.vehicle.length;
        let distance = sample.pos.x - margin - front;

        let time_to_reach = time_to_reach(body.acc.x, body.vel.x, distance);
        let elapsed = now - sample.captured_at;
        let horizon = elapsed + time_to_reach + self.vehicle.decel_activation_delay;
        let max_speed = self.sensor.max_pedestrian_speed + self.sensor.speed;

        OccupancyInterval {
            lateral: Interval {
                min: sample.pos.y - margin,
                max: sample.pos.y + margin + max_speed * horizon,
            },
            distance,
            depth: 2.0 * margin,
            time_to_reach,
        }
    }

    /// The lateral extents the pedestrian could occupy at the time of the
    /// sample, without projecting its motion.
    pub fn current_lateral(&self, sample: &PedestrianSample) -> Interval<f64> {
        let leading = self.radius + self.sensor.location;
        let trailing = self.radius + self.sensor.heading;
        if sample.lateral_vel < 0.0 {
            Interval::new(sample.pos.y - leading, sample.pos.y + trailing)
        } else {
            Interval::new(sample.pos.y - trailing, sample.pos.y + leading)
        }
    }
}
