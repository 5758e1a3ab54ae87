use self::controller::{ActuationTimers, Request};
use self::feasibility::Feasibility;
use self::projection::{OccupancyInterval, Projector};
use crate::body::KinematicBody;
use crate::collision::Rect;
use crate::config::{SensorAccuracy, VehicleAttributes};
use crate::debug::{debug_interval, debug_value};
use crate::math::{Point2d, Vector2d};
use crate::sampler::{PedestrianSample, PedestrianSampler};
use crate::simulation::SimulationContext;
use crate::util::Interval;

pub use controller::Actuation;

pub mod controller;
pub mod feasibility;
pub mod projection;

/// The simulated autonomous vehicle.
#[derive(Clone, Debug)]
pub struct Vehicle {
    /// The vehicle's attributes.
    attrs: VehicleAttributes,
    /// The tolerances of the pedestrian sensor.
    sensor: SensorAccuracy,
    /// The pedestrian's radius in m.
    ped_radius: f64,
    /// The kinematic state. `pos` is the rear corner with the smallest lateral coordinate.
    body: KinematicBody,
    /// The most recent pedestrian sample.
    sample: PedestrianSample,
    /// The actuation latches.
    timers: ActuationTimers,
    /// What the actuators did in the last tick.
    actuation: Actuation,
    /// The occupancy projected in the last tick.
    occupancy: Option<OccupancyInterval>,
    /// The last time the vehicle was moving, in s.
    last_moving: f64,
}

impl Vehicle {
    /// Creates a new vehicle travelling at its cruising speed.
    ///
    /// # Parameters
    /// * `attrs` - The vehicle's attributes
    /// * `sensor` - The tolerances of its pedestrian sensor
    /// * `ped_radius` - The radius of the pedestrian in m
    /// * `pos` - The position of the vehicle's rear corner with the smallest lateral coordinate
    /// * `sample` - The initial pedestrian sample
    pub(crate) fn new(
        attrs: &VehicleAttributes,
        sensor: &SensorAccuracy,
        ped_radius: f64,
        pos: Point2d,
        sample: PedestrianSample,
    ) -> Self {
        Self {
            attrs: *attrs,
            sensor: *sensor,
            ped_radius,
            body: KinematicBody::moving(pos, Vector2d::new(attrs.steady_state_speed, 0.0)),
            timers: ActuationTimers::new(sample.captured_at),
            last_moving: sample.captured_at,
            sample,
            actuation: Actuation::Unchanged,
            occupancy: None,
        }
    }

    /// The vehicle's attributes.
    pub fn attributes(&self) -> &VehicleAttributes {
        &self.attrs
    }

    /// The vehicle's kinematic state.
    pub fn body(&self) -> KinematicBody {
        self.body
    }

    /// The position of the vehicle's rear corner with the smallest lateral coordinate.
    pub fn position(&self) -> Point2d {
        self.body.pos
    }

    /// The longitudinal position of the front of the vehicle in m.
    pub fn pos_front(&self) -> f64 {
        self.body.pos.x + self.attrs.length
    }

    /// The vehicle's velocity in m/s.
    pub fn vel(&self) -> f64 {
        self.body.vel.x
    }

    /// The commanded acceleration in m/s<sup>2</sup>.
    pub fn acc(&self) -> f64 {
        self.body.acc.x
    }

    /// What the actuators did in the last tick.
    pub fn actuation(&self) -> Actuation {
        self.actuation
    }

    /// The pedestrian sample the vehicle is currently acting on.
    pub fn sample(&self) -> &PedestrianSample {
        &self.sample
    }

    /// The pedestrian occupancy projected in the last tick.
    pub fn occupancy(&self) -> Option<&OccupancyInterval> {
        self.occupancy.as_ref()
    }

    /// The last time the vehicle was moving, in s.
    pub fn last_moving(&self) -> f64 {
        self.last_moving
    }

    /// The lateral extents of the vehicle.
    pub fn lateral(&self) -> Interval<f64> {
        Interval::new(self.body.pos.y, self.body.pos.y + self.attrs.width)
    }

    /// The vehicle's footprint.
    pub fn footprint(&self) -> Rect {
        Rect::new(
            self.body.pos,
            Vector2d::new(self.attrs.length, self.attrs.width),
        )
    }

    fn projector(&self) -> Projector<'_> {
        Projector {
            sensor: &self.sensor,
            vehicle: &self.attrs,
            radius: self.ped_radius,
        }
    }

    /// Samples, decides and moves the vehicle for one tick.
    ///
    /// # Parameters
    /// * `ctx` - The current simulation context
    /// * `sampler` - The pedestrian sensor
    /// * `truth` - The pedestrian's true kinematic state
    pub(crate) fn update(
        &mut self,
        ctx: &SimulationContext,
        sampler: &mut dyn PedestrianSampler,
        truth: KinematicBody,
    ) {
        self.refresh_sample(ctx.time, sampler, truth);
        self.control(ctx.time);
        self.integrate(ctx.dt);
        self.body.translate(ctx.dt);
        if self.body.vel.x > 0.0 {
            self.last_moving = ctx.time;
        }
        log::trace!(
            "t={:.2} x={:.3} v={:.3} a={:.3} {:?}",
            ctx.time,
            self.body.pos.x,
            self.body.vel.x,
            self.body.acc.x,
            self.actuation
        );
    }

    /// Takes a new pedestrian sample if the current one is older than the sampling interval.
    fn refresh_sample(
        &mut self,
        now: f64,
        sampler: &mut dyn PedestrianSampler,
        truth: KinematicBody,
    ) {
        if now - self.sample.captured_at > self.sensor.sample_interval {
            self.sample = sampler.sample(truth, now);
            log::debug!(
                "t={:.2} sampled pedestrian at ({:.3}, {:.3})",
                now,
                self.sample.pos.x,
                self.sample.pos.y
            );
        }
    }

    /// Decides whether to accelerate or brake, and applies the command if
    /// the actuators allow it.
    fn control(&mut self, now: f64) {
        let projector = self.projector();
        let range = projector.project(&self.sample, now, &self.body);
        let feasibility = Feasibility::evaluate(&self.body, &self.attrs, &range);

        let request = if feasibility.can_continue() {
            let current = projector.current_lateral(&self.sample);
            let close = range.distance.abs() < self.attrs.safety_buffer;
            if close && current.overlaps(&self.lateral()) {
                Request::Decelerate
            } else {
                Request::Accelerate
            }
        } else {
            Request::Decelerate
        };

        debug_interval("occupancy", range.lateral);
        debug_value("distance", range.distance);

        let prev = self.actuation;
        self.actuation = match self.timers.request(request, now, &self.attrs) {
            Some(acc) => {
                self.body.acc.x = acc;
                match request {
                    Request::Accelerate => Actuation::Accelerating,
                    Request::Decelerate => Actuation::Decelerating,
                }
            }
            None => Actuation::Unchanged,
        };
        if self.actuation != prev && self.actuation != Actuation::Unchanged {
            log::debug!("t={:.2} {:?} ({:?})", now, self.actuation, feasibility);
        }
        self.occupancy = Some(range);
    }

    /// Integrates the velocity, keeping it between zero and the cruising speed.
    fn integrate(&mut self, dt: f64) {
        let max_vel = self.attrs.steady_state_speed;
        let body = &mut self.body;
        if body.acc.x < 0.0 || body.vel.x < max_vel {
            body.vel.x += body.acc.x * dt;
            if body.vel.x > max_vel {
                body.vel.x = max_vel;
                body.acc.x = 0.0;
            }
            if body.vel.x <= 0.0 {
                body.vel.x = 0.0;
                body.acc.x = 0.0;
            }
        }
        if body.vel.x == 0.0 {
            self.actuation = Actuation::Stopped;
        }
    }
}
