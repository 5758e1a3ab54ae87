//! Initial conditions of a simulation, including the canned presets.

use crate::config::SimulationConfig;
use crate::math::Point2d;
use crate::pedestrian::{MotionProfile, PedestrianScenario};
use crate::util::kph;
use serde::{Deserialize, Serialize};

/// The longitudinal position of the pedestrian in every preset, in m.
const PRESET_PEDESTRIAN_X: f64 = 35.0;

/// The lateral offset from the lane centre at which moving pedestrians start, in m.
const PRESET_START_OFFSET: f64 = -7.0;

/// The pedestrian's walking speed in the presets, in km/h.
const PRESET_WALKING_SPEED: f64 = 10.0;

/// The number of presets.
pub const NUM_PRESETS: usize = 10;

/// The initial conditions of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub pedestrian: PedestrianScenario,
    /// The starting position of the vehicle's rear corner with the smallest lateral coordinate.
    pub vehicle_position: Point2d,
}

impl Scenario {
    /// Creates a scenario with the vehicle centred in its lane at the start of the course.
    pub fn new(pedestrian: PedestrianScenario, config: &SimulationConfig) -> Self {
        let lane_centre = config.course.lane_centre();
        Self {
            pedestrian,
            vehicle_position: Point2d::new(0.0, lane_centre - 0.5 * config.vehicle.width),
        }
    }

    /// A pedestrian standing still, `offset` metres from the lane centre,
    /// `x` metres along the course.
    pub fn static_pedestrian(x: f64, offset: f64, config: &SimulationConfig) -> Self {
        let pedestrian = PedestrianScenario {
            profile: MotionProfile::Constant,
            position: Point2d::new(x, config.course.lane_centre() + offset),
            lateral_vel: 0.0,
        };
        Self::new(pedestrian, config)
    }

    /// Gets one of the canned presets, numbered from 1 to [NUM_PRESETS].
    ///
    /// * 1-4: the pedestrian walks towards the lane and stops at an offset of 0, -2, -3 or -5 m.
    /// * 5-7: the pedestrian stands at an offset of 0, -2 or -4 m, then walks off
    ///   at 1.5, 1.8 or 1.1 s.
    /// * 8-10: the pedestrian stands still at an offset of 0, -2 or -4 m.
    pub fn preset(index: usize, config: &SimulationConfig) -> Option<Self> {
        let lane_centre = config.course.lane_centre();
        let walking = kph(PRESET_WALKING_SPEED);
        let (profile, offset, lateral_vel) = match index {
            1..=4 => {
                let stop_offset = [0.0, -2.0, -3.0, -5.0][index - 1];
                let profile = MotionProfile::MoveThenStop {
                    stop_at: lane_centre + stop_offset,
                };
                (profile, PRESET_START_OFFSET, walking)
            }
            5..=7 => {
                let (offset, move_at) = [(0.0, 1.5), (-2.0, 1.8), (-4.0, 1.1)][index - 5];
                (MotionProfile::StaticThenMove { move_at }, offset, walking)
            }
            8..=10 => {
                let offset = [0.0, -2.0, -4.0][index - 8];
                (MotionProfile::Constant, offset, 0.0)
            }
            _ => return None,
        };
        let pedestrian = PedestrianScenario {
            profile,
            position: Point2d::new(PRESET_PEDESTRIAN_X, lane_centre + offset),
            lateral_vel,
        };
        Some(Self::new(pedestrian, config))
    }

    /// Gets all the presets, in order.
    pub fn presets(config: &SimulationConfig) -> impl Iterator<Item = Scenario> + '_ {
        (1..=NUM_PRESETS).filter_map(move |i| Self::preset(i, config))
    }
}
