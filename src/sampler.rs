//! Pedestrian sensing.

use crate::body::KinematicBody;
use crate::config::{non_negative, ConfigError, SensorAccuracy};
use crate::math::Point2d;
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};

/// A snapshot of the pedestrian's state as reported by the vehicle's sensor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PedestrianSample {
    /// The reported position of the pedestrian's centre, in m.
    pub pos: Point2d,
    /// The reported lateral velocity, in m/s.
    pub lateral_vel: f64,
    /// The simulation time at which the sample was taken, in s.
    pub captured_at: f64,
}

/// A sensor which reports the pedestrian's state to the vehicle.
pub trait PedestrianSampler {
    /// Samples the pedestrian.
    ///
    /// # Parameters
    /// * `truth` - The pedestrian's true kinematic state
    /// * `now` - The current simulation time in s
    fn sample(&mut self, truth: KinematicBody, now: f64) -> PedestrianSample;
}

/// A sensor that reports the pedestrian's true state.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExactSampler;

impl PedestrianSampler for ExactSampler {
    fn sample(&mut self, truth: KinematicBody, now: f64) -> PedestrianSample {
        PedestrianSample {
            pos: truth.pos,
            lateral_vel: truth.vel.y,
            captured_at: now,
        }
    }
}

/// A sensor with normally distributed errors, clamped to its stated accuracy.
pub struct NoisySampler {
    rng: StdRng,
    location: Normal<f64>,
    speed: Normal<f64>,
    max_location_err: f64,
    max_speed_err: f64,
}

impl NoisySampler {
    /// Creates a sensor whose errors have a standard deviation of half the stated accuracy.
    pub fn new(accuracy: &SensorAccuracy, seed: u64) -> Result<Self, ConfigError> {
        non_negative("sensor.location", accuracy.location)?;
        non_negative("sensor.speed", accuracy.speed)?;
        Ok(Self {
            rng: StdRng::seed_from_u64(seed),
            location: Normal::new(0.0, 0.5 * accuracy.location)?,
            speed: Normal::new(0.0, 0.5 * accuracy.speed)?,
            max_location_err: accuracy.location,
            max_speed_err: accuracy.speed,
        })
    }

    fn location_err(&mut self) -> f64 {
        let max = self.max_location_err;
        self.location.sample(&mut self.rng).clamp(-max, max)
    }
}

impl PedestrianSampler for NoisySampler {
    fn sample(&mut self, truth: KinematicBody, now: f64) -> PedestrianSample {
        let dx = self.location_err();
        let dy = self.location_err();
        let dv = self
            .speed
            .sample(&mut self.rng)
            .clamp(-self.max_speed_err, self.max_speed_err);
        PedestrianSample {
            pos: Point2d::new(truth.pos.x + dx, truth.pos.y + dy),
            lateral_vel: truth.vel.y + dv,
            captured_at: now,
        }
    }
}
