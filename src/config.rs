//! Physical constants and tolerances of a simulation.

use crate::util::kph;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// An invalid simulation configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{field}` must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("`{field}` must not be negative, got {value}")]
    Negative { field: &'static str, value: f64 },
    #[error("`vehicle.max_dec` must be a negative number, got {0}")]
    DecelerationNotNegative(f64),
    #[error("`vehicle.brake_accuracy` must lie in [0, 1), got {0}")]
    BrakeAccuracy(f64),
    #[error("invalid sensor noise distribution: {0}")]
    Noise(#[from] rand_distr::NormalError),
    #[error("malformed configuration: {0}")]
    Json(#[from] serde_json::Error),
}

/// The complete configuration of a simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub course: CourseAttributes,
    pub vehicle: VehicleAttributes,
    pub sensor: SensorAccuracy,
    pub pedestrian: PedestrianAttributes,
}

/// The attributes of the simulated stretch of road.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourseAttributes {
    /// The length of the course in m. The vehicle has cleared it once its rear passes this point.
    pub length: f64,
    /// The width of the course in m. The vehicle's lane is centred on it.
    pub width: f64,
    /// The number of simulation ticks per simulated second.
    pub frames_per_second: f64,
    /// How long the vehicle must be stopped before the simulation ends, in s.
    pub stall_timeout: f64,
}

/// The attributes of the autonomous vehicle.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleAttributes {
    /// The vehicle length in m, along the direction of travel.
    pub length: f64,
    /// The vehicle width in m.
    pub width: f64,
    /// The maximum acceleration of the vehicle, in m/s^2.
    pub max_acc: f64,
    /// The nominal maximum deceleration, a negative number in m/s^2.
    pub max_dec: f64,
    /// The relative variance of the brake-by-wire deceleration.
    pub brake_accuracy: f64,
    /// The cruising speed in m/s.
    pub steady_state_speed: f64,
    /// The time the brakes take to reach full deceleration, in s.
    pub decel_activation_delay: f64,
    /// The time the brakes take to release, in s.
    pub brake_release_delay: f64,
    /// The minimum longitudinal gap to a pedestrian in the lane, in m.
    pub safety_buffer: f64,
}

/// The tolerances of the pedestrian sensor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorAccuracy {
    /// Location accuracy in m.
    pub location: f64,
    /// Speed accuracy in m/s.
    pub speed: f64,
    /// Heading accuracy, as a lateral margin in m behind the direction of travel.
    pub heading: f64,
    /// The fastest a pedestrian is assumed to move, in m/s.
    pub max_pedestrian_speed: f64,
    /// How often the pedestrian is sampled, in s.
    pub sample_interval: f64,
}

/// The attributes of the pedestrian.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PedestrianAttributes {
    /// The radius in m.
    pub radius: f64,
}

impl Default for CourseAttributes {
    fn default() -> Self {
        Self {
            length: 50.0,
            width: 20.0,
            frames_per_second: 100.0,
            stall_timeout: 1.0,
        }
    }
}

impl Default for VehicleAttributes {
    fn default() -> Self {
        Self {
            length: 5.0,
            width: 2.0,
            max_acc: 2.4525,
            max_dec: -6.867,
            brake_accuracy: 0.02,
            steady_state_speed: kph(50.0),
            decel_activation_delay: 0.2,
            brake_release_delay: 0.1,
            safety_buffer: 0.5,
        }
    }
}

impl Default for SensorAccuracy {
    fn default() -> Self {
        Self {
            location: 0.5,
            speed: 0.2,
            heading: 5.0,
            max_pedestrian_speed: kph(10.0),
            sample_interval: 0.1,
        }
    }
}

impl Default for PedestrianAttributes {
    fn default() -> Self {
        Self { radius: 0.25 }
    }
}

impl CourseAttributes {
    /// The lateral coordinate of the centre of the vehicle's lane.
    pub fn lane_centre(&self) -> f64 {
        0.5 * self.width
    }

    /// The duration of a single tick in s.
    pub fn dt(&self) -> f64 {
        1.0 / self.frames_per_second
    }
}

impl VehicleAttributes {
    /// The deceleration the brakes are guaranteed to deliver, accounting for their variance.
    pub fn worst_case_dec(&self) -> f64 {
        self.max_dec * (1.0 - self.brake_accuracy)
    }

    /// Returns these attributes with slow-acting brakes.
    pub fn with_degraded_brakes(self) -> Self {
        Self {
            decel_activation_delay: 0.9,
            ..self
        }
    }
}

impl SimulationConfig {
    /// Parses a configuration from JSON and validates it.
    /// Missing fields take their default values.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that every value is physically meaningful.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let Self {
            course,
            vehicle,
            sensor,
            pedestrian,
        } = self;

        positive("course.length", course.length)?;
        positive("course.width", course.width)?;
        positive("course.frames_per_second", course.frames_per_second)?;
        positive("course.stall_timeout", course.stall_timeout)?;

        positive("vehicle.length", vehicle.length)?;
        positive("vehicle.width", vehicle.width)?;
        positive("vehicle.max_acc", vehicle.max_acc)?;
        positive("vehicle.steady_state_speed", vehicle.steady_state_speed)?;
        if !vehicle.max_dec.is_finite() || vehicle.max_dec >= 0.0 {
            return Err(ConfigError::DecelerationNotNegative(vehicle.max_dec));
        }
        if !(0.0..1.0).contains(&vehicle.brake_accuracy) {
            return Err(ConfigError::BrakeAccuracy(vehicle.brake_accuracy));
        }
        non_negative("vehicle.decel_activation_delay", vehicle.decel_activation_delay)?;
        non_negative("vehicle.brake_release_delay", vehicle.brake_release_delay)?;
        non_negative("vehicle.safety_buffer", vehicle.safety_buffer)?;

        non_negative("sensor.location", sensor.location)?;
        non_negative("sensor.speed", sensor.speed)?;
        non_negative("sensor.heading", sensor.heading)?;
        non_negative("sensor.max_pedestrian_speed", sensor.max_pedestrian_speed)?;
        positive("sensor.sample_interval", sensor.sample_interval)?;

        positive("pedestrian.radius", pedestrian.radius)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value >= 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::Negative { field, value })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn defaults_are_valid() {
        let config = SimulationConfig::default();
        assert!(config.validate().is_ok());
        assert_approx_eq!(config.vehicle.worst_case_dec(), -6.72966);
        assert_approx_eq!(config.course.lane_centre(), 10.0);
        assert_approx_eq!(config.course.dt(), 0.01);
    }

    #[test]
    fn partial_json() {
        let config = SimulationConfig::from_json(
            r#"{ "vehicle": { "steady_state_speed": 10.0 }, "course": { "length": 80.0 } }"#,
        )
        .unwrap();
        assert_approx_eq!(config.vehicle.steady_state_speed, 10.0);
        assert_approx_eq!(config.vehicle.length, 5.0);
        assert_approx_eq!(config.course.length, 80.0);
        assert_approx_eq!(config.sensor.sample_interval, 0.1);
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = SimulationConfig::default();
        config.vehicle.max_dec = 3.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::DecelerationNotNegative(_))
        ));

        let mut config = SimulationConfig::default();
        config.course.frames_per_second = 0.0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NotPositive {
                field: "course.frames_per_second",
                ..
            })
        ));

        let mut config = SimulationConfig::default();
        config.vehicle.brake_release_delay = -0.1;
        assert!(matches!(config.validate(), Err(ConfigError::Negative { .. })));

        assert!(matches!(
            SimulationConfig::from_json("{ not json"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn degraded_brakes() {
        let attrs = VehicleAttributes::default().with_degraded_brakes();
        assert_approx_eq!(attrs.decel_activation_delay, 0.9);
        assert_approx_eq!(attrs.brake_release_delay, 0.1);
    }
}
