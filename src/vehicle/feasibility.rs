use super::projection::OccupancyInterval;
use crate::body::KinematicBody;
use crate::config::VehicleAttributes;
use crate::math::time_to_stop;
use crate::util::Interval;

/// The outcome of checking whether the vehicle may keep driving.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Feasibility {
    /// Whether braking now still stops the vehicle before it reaches the pedestrian.
    pub can_stop: bool,
    /// Whether the pedestrian must be on the low side of the vehicle's lane.
    pub clear_below: bool,
    /// Whether the pedestrian must be on the high side of the vehicle's lane.
    pub clear_above: bool,
    /// Whether the vehicle has passed the pedestrian.
    pub in_the_clear: bool,
}

impl Feasibility {
    /// Evaluates the stopping feasibility against a projected occupancy.
    ///
    /// # Parameters
    /// * `body` - The vehicle's kinematic state
    /// * `attrs` - The vehicle's attributes
    /// * `range` - The projected pedestrian occupancy
    pub fn evaluate(
        body: &KinematicBody,
        attrs: &VehicleAttributes,
        range: &OccupancyInterval,
    ) -> Self {
        let dec = attrs.worst_case_dec();
        let stop = time_to_stop(body.vel.x, dec, attrs.decel_activation_delay);
        let lane = Interval::new(body.pos.y, body.pos.y + attrs.width);
        Self {
            can_stop: stop < range.time_to_reach,
            clear_below: range.lateral.below(lane.min),
            clear_above: range.lateral.above(lane.max),
            in_the_clear: range.in_the_clear(),
        }
    }

    /// Whether it is safe to continue towards the cruising speed.
    pub fn can_continue(&self) -> bool {
        self.can_stop || self.clear_below || self.clear_above || self.in_the_clear
    }
}
