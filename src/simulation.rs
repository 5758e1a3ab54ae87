use crate::collision::{rect_disc_overlap, Disc};
use crate::config::{ConfigError, SimulationConfig};
#[cfg(feature = "debug")]
use crate::debug::take_debug_frame;
use crate::pedestrian::Pedestrian;
use crate::sampler::{ExactSampler, PedestrianSampler};
use crate::scenario::Scenario;
use crate::vehicle::Vehicle;

/// The simulated clock, passed into every per-tick update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SimulationContext {
    /// The current simulation time in s.
    pub time: f64,
    /// The duration of a tick in s.
    pub dt: f64,
}

impl SimulationContext {
    /// Creates a context at time zero.
    pub fn new(dt: f64) -> Self {
        Self { time: 0.0, dt }
    }

    /// Advances the clock by one tick.
    pub fn advance(&mut self) {
        self.time += self.dt;
    }
}

/// The state of a simulation after a tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Verdict {
    /// The simulation has not finished.
    Continue,
    /// The vehicle hit the pedestrian.
    CollisionFailure,
    /// The vehicle cleared the course. `time_lost` is the time taken beyond
    /// driving the course at the cruising speed, in s.
    ClearedSuccess { time_lost: f64 },
    /// The vehicle came to a halt and stayed there, so the pedestrian
    /// is assumed to have stopped in its path.
    StalledSuccess,
}

impl Verdict {
    /// Whether the simulation has finished.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Verdict::Continue)
    }

    /// Whether the vehicle avoided the pedestrian.
    pub fn is_success(&self) -> bool {
        matches!(
            self,
            Verdict::ClearedSuccess { .. } | Verdict::StalledSuccess
        )
    }
}

/// A simulation of a vehicle approaching a pedestrian.
pub struct Simulation {
    /// The simulation's configuration.
    config: SimulationConfig,
    /// The simulated clock.
    ctx: SimulationContext,
    /// The current frame of simulation.
    frame: usize,
    /// The pedestrian.
    pedestrian: Pedestrian,
    /// The autonomous vehicle.
    vehicle: Vehicle,
    /// The vehicle's pedestrian sensor.
    sampler: Box<dyn PedestrianSampler>,
    /// The time it would take to clear the course at the cruising speed, in s.
    theoretical_time: f64,
    /// The verdict after the last tick.
    verdict: Verdict,
    /// Debugging information from the previously simulated frame.
    #[cfg(feature = "debug")]
    debug: serde_json::Value,
}

impl Simulation {
    /// Creates a new simulation with an exact pedestrian sensor.
    pub fn new(config: SimulationConfig, scenario: &Scenario) -> Result<Self, ConfigError> {
        config.validate()?;

        let ctx = SimulationContext::new(config.course.dt());
        let pedestrian = Pedestrian::new(&config.pedestrian, &scenario.pedestrian);
        let mut sampler = ExactSampler;
        let vehicle = Vehicle::new(
            &config.vehicle,
            &config.sensor,
            pedestrian.radius(),
            scenario.vehicle_position,
            sampler.sample(pedestrian.body(), ctx.time),
        );
        let distance = config.course.length - scenario.vehicle_position.x;
        let theoretical_time = distance / config.vehicle.steady_state_speed;

        Ok(Self {
            config,
            ctx,
            frame: 0,
            pedestrian,
            vehicle,
            sampler: Box::new(sampler),
            theoretical_time,
            verdict: Verdict::Continue,
            #[cfg(feature = "debug")]
            debug: serde_json::Value::Null,
        })
    }

    /// Replaces the vehicle's pedestrian sensor.
    pub fn set_sampler(&mut self, sampler: impl PedestrianSampler + 'static) {
        self.sampler = Box::new(sampler);
    }

    /// Advances the simulation by one tick and returns the verdict.
    /// Once a terminal verdict is reached the simulation no longer advances.
    pub fn step(&mut self) -> Verdict {
        if self.verdict.is_terminal() {
            return self.verdict;
        }

        self.pedestrian.step(&self.ctx);
        self.vehicle.update(&self.ctx, self.sampler.as_mut(), self.pedestrian.body());
        self.verdict = self.judge();
        if self.verdict.is_terminal() {
            log::info!("t={:.2} {:?}", self.ctx.time, self.verdict);
        }

        self.ctx.advance();
        self.frame += 1;

        #[cfg(feature = "debug")]
        {
            self.debug = take_debug_frame();
        }

        self.verdict
    }

    /// Steps the simulation until it finishes or `max_time` seconds have been simulated.
    pub fn run(&mut self, max_time: f64) -> Verdict {
        while !self.verdict.is_terminal() && self.ctx.time < max_time {
            self.step();
        }
        self.verdict
    }

    /// Judges the outcome of the tick just simulated, using the true positions.
    fn judge(&self) -> Verdict {
        let disc = Disc {
            centre: self.pedestrian.position(),
            radius: self.pedestrian.radius(),
        };
        if rect_disc_overlap(&self.vehicle.footprint(), &disc) {
            Verdict::CollisionFailure
        } else if self.vehicle.position().x > self.config.course.length {
            // Positions are already integrated to the end of the tick.
            let elapsed = self.ctx.time + self.ctx.dt;
            Verdict::ClearedSuccess {
                time_lost: elapsed - self.theoretical_time,
            }
        } else if self.ctx.time - self.vehicle.last_moving() > self.config.course.stall_timeout {
            Verdict::StalledSuccess
        } else {
            Verdict::Continue
        }
    }

    /// The simulation's configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// The current simulation time in s.
    pub fn time(&self) -> f64 {
        self.ctx.time
    }

    /// Gets the current simulation frame index.
    pub fn frame(&self) -> usize {
        self.frame
    }

    /// The verdict after the last tick.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// The autonomous vehicle.
    pub fn vehicle(&self) -> &Vehicle {
        &self.vehicle
    }

    /// The pedestrian.
    pub fn pedestrian(&self) -> &Pedestrian {
        &self.pedestrian
    }

    /// The time it would take to clear the course at the cruising speed, in s.
    pub fn theoretical_time(&self) -> f64 {
        self.theoretical_time
    }

    /// Gets the debugging information for the previously simulated frame as JSON array.
    #[cfg(feature = "debug")]
    pub fn debug(&mut self) -> serde_json::Value {
        self.debug.clone()
    }
}
