use std::error::Error;

use ped_brake_sim::{Scenario, Simulation, SimulationConfig, Verdict, NUM_PRESETS};
use serde::Deserialize;

/// Give up on a simulation after this many simulated seconds.
const MAX_TIME: f64 = 120.0;

/// A scenario loaded from a JSON file.
#[derive(Deserialize)]
struct ScenarioFile {
    #[serde(default)]
    config: SimulationConfig,
    scenario: Scenario,
}

fn main() -> Result<(), Box<dyn Error>> {
    match std::env::args().nth(1) {
        Some(path) => {
            let content = std::fs::read_to_string(path)?;
            let file: ScenarioFile = serde_json::from_str(&content)?;
            let verdict = run(file.config, &file.scenario)?;
            println!("{}", describe(verdict));
        }
        None => {
            let normal = SimulationConfig::default();
            let mut degraded = normal;
            degraded.vehicle = degraded.vehicle.with_degraded_brakes();

            println!(
                "{:>6}  {:<32}  {:<32}",
                "preset", "normal brakes", "degraded brakes"
            );
            for index in 1..=NUM_PRESETS {
                let mut row = vec![];
                for config in [normal, degraded] {
                    let scenario = Scenario::preset(index, &config).ok_or("unknown preset")?;
                    row.push(describe(run(config, &scenario)?));
                }
                println!("{:>6}  {:<32}  {:<32}", index, row[0], row[1]);
            }
        }
    }
    Ok(())
}

fn run(config: SimulationConfig, scenario: &Scenario) -> Result<Verdict, Box<dyn Error>> {
    let mut sim = Simulation::new(config, scenario)?;
    Ok(sim.run(MAX_TIME))
}

fn describe(verdict: Verdict) -> String {
    match verdict {
        Verdict::Continue => "did not finish".into(),
        Verdict::CollisionFailure => "failed: collision".into(),
        Verdict::ClearedSuccess { time_lost } => {
            let time_lost = (time_lost * 100.0).trunc() / 100.0;
            format!("succeeded: {:.2} s lost", time_lost)
        }
        Verdict::StalledSuccess => "succeeded: collision avoided".into(),
    }
}
