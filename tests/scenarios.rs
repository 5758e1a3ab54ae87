//! End-to-end simulations of the vehicle approaching a pedestrian.

use ped_brake_sim::{
    math::stopping_distance, Actuation, NoisySampler, Scenario, Simulation, SimulationConfig,
    Verdict,
};

const MAX_TIME: f64 = 60.0;

fn run(config: SimulationConfig, scenario: &Scenario) -> Simulation {
    let mut sim = Simulation::new(config, scenario).unwrap();
    sim.run(MAX_TIME);
    sim
}

/// The gap between the front of the vehicle and the pedestrian's edge at the start.
fn initial_gap(config: &SimulationConfig, scenario: &Scenario) -> f64 {
    scenario.pedestrian.position.x
        - config.pedestrian.radius
        - (scenario.vehicle_position.x + config.vehicle.length)
}

/// The distance the vehicle covers from cruising speed before it stops,
/// braking as late as its activation delay permits.
fn worst_case_stop(config: &SimulationConfig) -> f64 {
    let vehicle = &config.vehicle;
    stopping_distance(
        vehicle.steady_state_speed,
        vehicle.worst_case_dec(),
        vehicle.decel_activation_delay,
    )
}

/// A static pedestrian placed `margin` metres beyond the worst-case stopping distance.
fn static_in_path(config: &SimulationConfig, margin: f64) -> Scenario {
    let origin = Scenario::static_pedestrian(0.0, 0.0, config);
    let x = worst_case_stop(config) + margin - initial_gap(config, &origin);
    Scenario::static_pedestrian(x, 0.0, config)
}

/// Test that a pedestrian who stops short of the lane only delays the vehicle.
#[test]
fn pedestrian_stops_short_of_lane() {
    let config = SimulationConfig::default();
    let scenario = Scenario::preset(2, &config).unwrap();
    let sim = run(config, &scenario);
    match sim.verdict() {
        Verdict::ClearedSuccess { time_lost } => {
            assert!(time_lost > 0.0);
            assert!(time_lost < 10.0);
        }
        verdict => panic!("unexpected verdict {:?}", verdict),
    }
}

/// Test that a pedestrian who stops well before the lane barely delays the vehicle.
#[test]
fn pedestrian_stops_far_from_lane() {
    let config = SimulationConfig::default();
    let scenario = Scenario::preset(4, &config).unwrap();
    let sim = run(config, &scenario);
    match sim.verdict() {
        Verdict::ClearedSuccess { time_lost } => {
            assert!(time_lost > 0.0);
            assert!(time_lost < 2.0);
        }
        verdict => panic!("unexpected verdict {:?}", verdict),
    }
}

/// Test that the vehicle stops short of a pedestrian standing in its lane.
#[test]
fn static_pedestrian_in_path_stalls() {
    let config = SimulationConfig::default();
    let scenario = Scenario::preset(8, &config).unwrap();
    let sim = run(config, &scenario);
    assert_eq!(sim.verdict(), Verdict::StalledSuccess);
    assert_eq!(sim.vehicle().vel(), 0.0);
    assert_eq!(sim.vehicle().actuation(), Actuation::Stopped);

    let pedestrian = sim.pedestrian();
    let gap = pedestrian.position().x - pedestrian.radius() - sim.vehicle().pos_front();
    assert!(gap > 0.0);
    assert!(gap < 1.5);
}

fn degraded() -> SimulationConfig {
    let mut config = SimulationConfig::default();
    config.vehicle = config.vehicle.with_degraded_brakes();
    config
}

/// Test that with healthy brakes the outcome for a static pedestrian flips
/// right at the closed-form stopping distance.
#[test]
fn static_pedestrian_matches_stopping_distance() {
    let config = SimulationConfig::default();
    for margin in [0.25, 1.1, 3.0] {
        let scenario = static_in_path(&config, margin);
        assert_eq!(
            run(config, &scenario).verdict(),
            Verdict::StalledSuccess,
            "margin {}",
            margin
        );
    }

    let near = static_in_path(&config, -0.25);
    assert_eq!(run(config, &near).verdict(), Verdict::CollisionFailure);
}

/// Test that with degraded brakes a static pedestrian is avoided with room
/// to spare, and hit when inside the stopping distance.
#[test]
fn static_pedestrian_with_degraded_brakes() {
    let config = degraded();

    let far = static_in_path(&config, 2.0);
    assert_eq!(run(config, &far).verdict(), Verdict::StalledSuccess);

    let near = static_in_path(&config, -0.5);
    assert_eq!(run(config, &near).verdict(), Verdict::CollisionFailure);
}

/// Test that a vehicle with slow brakes which stops more than the safety
/// buffer short of a static pedestrian sets off again, and cannot brake in
/// time once it is moving.
#[test]
fn degraded_brakes_creep_into_static_pedestrian() {
    let config = degraded();
    let scenario = static_in_path(&config, 1.1);
    let mut sim = Simulation::new(config, &scenario).unwrap();
    let mut stopped_at = None;
    while !sim.verdict().is_terminal() && sim.time() < MAX_TIME {
        sim.step();
        if stopped_at.is_none() && sim.vehicle().vel() == 0.0 {
            stopped_at = Some(sim.vehicle().pos_front());
        }
    }
    assert_eq!(sim.verdict(), Verdict::CollisionFailure);
    let stopped_at = stopped_at.expect("vehicle never stopped");
    assert!(sim.vehicle().pos_front() > stopped_at);

    let config = SimulationConfig::default();
    let scenario = static_in_path(&config, 1.1);
    assert_eq!(run(config, &scenario).verdict(), Verdict::StalledSuccess);
}

/// Test that a pedestrian standing beside the lane does not slow the vehicle down.
#[test]
fn static_pedestrian_beside_lane() {
    let config = SimulationConfig::default();
    let scenario = Scenario::preset(10, &config).unwrap();
    let sim = run(config, &scenario);
    assert!(matches!(sim.verdict(), Verdict::ClearedSuccess { .. }));
}

/// Test that every preset finishes without a collision, and that the vehicle's
/// velocity stays within its limits throughout.
#[test]
fn presets_avoid_collision() {
    let config = SimulationConfig::default();
    for scenario in Scenario::presets(&config) {
        let mut sim = Simulation::new(config, &scenario).unwrap();
        while !sim.verdict().is_terminal() && sim.time() < MAX_TIME {
            sim.step();
            let vel = sim.vehicle().vel();
            assert!(vel >= 0.0);
            assert!(vel <= config.vehicle.steady_state_speed);
        }
        assert!(sim.verdict().is_success(), "{:?}", scenario);
    }
}

/// Test that a terminal verdict stops the simulation.
#[test]
fn terminal_verdict_is_final() {
    let config = SimulationConfig::default();
    let scenario = Scenario::preset(8, &config).unwrap();
    let mut sim = run(config, &scenario);
    let frame = sim.frame();
    let time = sim.time();
    assert_eq!(sim.step(), Verdict::StalledSuccess);
    assert_eq!(sim.frame(), frame);
    assert_eq!(sim.time(), time);
}

/// Test that an undisturbed vehicle clears the course in the theoretical time.
#[test]
fn empty_road() {
    let config = SimulationConfig::default();
    let scenario = Scenario::static_pedestrian(35.0, -9.0, &config);
    let sim = run(config, &scenario);
    match sim.verdict() {
        Verdict::ClearedSuccess { time_lost } => {
            assert!(time_lost > -1e-9);
            assert!(time_lost < 0.02);
        }
        verdict => panic!("unexpected verdict {:?}", verdict),
    }
}

/// Test that a noisy sensor gives reproducible runs for a given seed.
#[test]
fn noisy_sensor_is_reproducible() {
    let config = SimulationConfig::default();
    let scenario = Scenario::preset(8, &config).unwrap();
    for seed in 0..3 {
        let runs: Vec<_> = (0..2)
            .map(|_| {
                let mut sim = Simulation::new(config, &scenario).unwrap();
                sim.set_sampler(NoisySampler::new(&config.sensor, seed).unwrap());
                let verdict = sim.run(MAX_TIME);
                (verdict, sim.frame())
            })
            .collect();
        assert!(runs[0].0.is_terminal());
        assert_eq!(runs[0], runs[1]);
    }
}

/// Test that an invalid configuration is rejected.
#[test]
fn invalid_config() {
    let mut config = SimulationConfig::default();
    config.vehicle.steady_state_speed = 0.0;
    let scenario = Scenario::preset(1, &config).unwrap();
    assert!(Simulation::new(config, &scenario).is_err());
}
