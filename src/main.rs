use orbsim::{NVec3, Scenario, ScenarioConfig, SimulationOutput};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Run an n-body scenario and report the final state")]
struct Args {
    /// Scenario file; bare names are looked up in the crate's `scenarios/` directory
    #[arg(short, default_value = "sun_earth.yaml")]
    file_name: String,
}

fn scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

fn report(output: &SimulationOutput, g: f64) {
    info!("final state after {} steps:\n{}", output.steps, output.final_state);
    for e in &output.merges {
        info!(
            step = e.step,
            t = e.t,
            kept = %e.merge.kept,
            absorbed = %e.merge.absorbed,
            mass = e.merge.mass,
            "merge"
        );
    }
    for t in &output.trajectories {
        if let (Some(first), Some(last)) = (t.points().first(), t.last()) {
            info!(
                body = t.name(),
                samples = t.len(),
                max_r = t.max_distance_from(&NVec3::zeros()),
                displacement = (last - first).norm(),
                "trajectory"
            );
        }
    }
    let sys = &output.final_state;
    info!(
        total_mass = sys.total_mass(),
        momentum = sys.total_momentum().norm(),
        energy = sys.total_energy(g),
        "conserved quantities"
    );
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let path = scenario_path(&args.file_name);
    let cfg = ScenarioConfig::load(&path)
        .with_context(|| format!("failed to load scenario {}", path.display()))?;

    let scenario = Scenario::build_scenario(cfg).context("invalid scenario")?;
    let g = scenario.parameters.G;
    info!("initial bodies:");
    for b in &scenario.bodies {
        info!("{b}");
    }

    let output = scenario.into_simulation()?.run().context("simulation failed")?;
    report(&output, g);

    Ok(())
}
