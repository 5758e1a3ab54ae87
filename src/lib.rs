pub use body::KinematicBody;
pub use cgmath;
pub use collision::{rect_disc_overlap, Disc, Rect};
pub use config::{
    ConfigError, CourseAttributes, PedestrianAttributes, SensorAccuracy, SimulationConfig,
    VehicleAttributes,
};
pub use pedestrian::{MotionProfile, Pedestrian, PedestrianScenario};
pub use sampler::{ExactSampler, NoisySampler, PedestrianSample, PedestrianSampler};
pub use scenario::{Scenario, NUM_PRESETS};
pub use simulation::{Simulation, SimulationContext, Verdict};
pub use util::{kph, Interval};
pub use vehicle::{Actuation, Vehicle};

mod body;
mod collision;
mod config;
mod debug;
pub mod math;
mod pedestrian;
mod sampler;
mod scenario;
mod simulation;
mod util;
pub mod vehicle;
