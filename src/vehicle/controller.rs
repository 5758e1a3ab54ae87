use crate::config::VehicleAttributes;
use serde::{Deserialize, Serialize};

/// A command the controller asks of the actuators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Accelerate,
    Decelerate,
}

/// What the vehicle's actuators are doing, as reported for display.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Actuation {
    /// No new command took effect this tick.
    #[default]
    Unchanged,
    Accelerating,
    Decelerating,
    Stopped,
}

/// Latches actuation requests so that the vehicle cannot switch between
/// accelerating and braking faster than its actuators allow.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ActuationTimers {
    /// The time of the most recent acceleration request, in s.
    last_accel_request: f64,
    /// The time of the most recent deceleration request, in s.
    last_decel_request: f64,
}

impl ActuationTimers {
    /// Creates timers as if both commands had been requested at `now`.
    pub fn new(now: f64) -> Self {
        Self {
            last_accel_request: now,
            last_decel_request: now,
        }
    }

    /// Records a request and returns the acceleration to command, if the
    /// actuators may switch to it yet.
    ///
    /// Braking only engages once acceleration has not been requested for the
    /// activation delay; acceleration only resumes once braking has not been
    /// requested for the release delay.
    pub fn request(
        &mut self,
        request: Request,
        now: f64,
        attrs: &VehicleAttributes,
    ) -> Option<f64> {
        match request {
            Request::Decelerate => {
                self.last_decel_request = now;
                (now - self.last_accel_request > attrs.decel_activation_delay)
                    .then(|| attrs.worst_case_dec())
            }
            Request::Accelerate => {
                self.last_accel_request = now;
                (now - self.last_decel_request > attrs.brake_release_delay)
                    .then(|| attrs.max_acc)
            }
        }
    }
}
