use crate::body::KinematicBody;
use crate::config::PedestrianAttributes;
use crate::math::{Point2d, Vector2d};
use crate::simulation::SimulationContext;
use serde::{Deserialize, Serialize};

/// How a pedestrian moves over the course of a simulation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MotionProfile {
    /// Moves at a constant velocity throughout.
    Constant,
    /// Moves until its lateral position reaches `stop_at`, then stands still.
    MoveThenStop { stop_at: f64 },
    /// Stands still until the simulation time reaches `move_at`, then moves.
    StaticThenMove { move_at: f64 },
}

/// The initial state of a pedestrian.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PedestrianScenario {
    pub profile: MotionProfile,
    /// The starting position of the pedestrian's centre, in m.
    pub position: Point2d,
    /// The lateral velocity in m/s, while moving.
    pub lateral_vel: f64,
}

/// A simulated pedestrian, walking across the vehicle's lane.
#[derive(Clone, Debug)]
pub struct Pedestrian {
    body: KinematicBody,
    radius: f64,
    profile: MotionProfile,
}

impl Pedestrian {
    /// Creates a new pedestrian.
    pub(crate) fn new(attributes: &PedestrianAttributes, scenario: &PedestrianScenario) -> Self {
        let vel = Vector2d::new(0.0, scenario.lateral_vel);
        Self {
            body: KinematicBody::moving(scenario.position, vel),
            radius: attributes.radius,
            profile: scenario.profile,
        }
    }

    /// The pedestrian's true kinematic state.
    pub fn body(&self) -> KinematicBody {
        self.body
    }

    /// The coordinates of the centre of the pedestrian.
    pub fn position(&self) -> Point2d {
        self.body.pos
    }

    /// The pedestrian's radius in m.
    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Whether the pedestrian moves during the current tick.
    fn is_moving(&self, ctx: &SimulationContext) -> bool {
        match self.profile {
            MotionProfile::Constant => true,
            MotionProfile::MoveThenStop { stop_at } => self.body.pos.y < stop_at,
            MotionProfile::StaticThenMove { move_at } => ctx.time >= move_at,
        }
    }

    /// Advances the pedestrian by one tick.
    pub(crate) fn step(&mut self, ctx: &SimulationContext) {
        if self.is_moving(ctx) {
            self.body.translate(ctx.dt);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn run(profile: MotionProfile, ticks: usize) -> Pedestrian {
        let mut ped = Pedestrian::new(
            &PedestrianAttributes::default(),
            &PedestrianScenario {
                profile,
                position: Point2d::new(35.0, 3.0),
                lateral_vel: 2.0,
            },
        );
        let mut ctx = SimulationContext::new(0.01);
        for _ in 0..ticks {
            ped.step(&ctx);
            ctx.advance();
        }
        ped
    }

    #[test]
    fn constant() {
        let ped = run(MotionProfile::Constant, 100);
        assert_approx_eq!(ped.position().y, 5.0, 1e-9);
        assert_approx_eq!(ped.position().x, 35.0);
    }

    #[test]
    fn move_then_stop() {
        let ped = run(MotionProfile::MoveThenStop { stop_at: 4.0 }, 200);
        assert!(ped.position().y >= 4.0);
        assert!(ped.position().y < 4.03);
    }

    #[test]
    fn static_then_move() {
        let ped = run(MotionProfile::StaticThenMove { move_at: 0.5 }, 50);
        assert_approx_eq!(ped.position().y, 3.0);
        let ped = run(MotionProfile::StaticThenMove { move_at: 0.5 }, 100);
        assert!(ped.position().y > 3.9 && ped.position().y < 4.1);
    }
}
