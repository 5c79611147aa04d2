//! Run a seeded propagation from a JSON request and print each step.
//!
//! ```text
//! RUST_LOG=smolder_engine=debug cargo run -p smolder-engine --example quickstart
//! ```

use smolder_engine::{ChaChaSource, EngineConfig, PropagationWorld, SimulationRequest};
use tracing_subscriber::EnvFilter;

const REQUEST: &str = r#"{
    "grid": [
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.0, 0.0],
        [0.0, 0.0, 0.5, 0.0]
    ],
    "wind_factor": 1.5,
    "steps": 4
}"#;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let request: SimulationRequest = serde_json::from_str(REQUEST)?;
    let (grid, params) = request.validate()?;
    let mut world =
        PropagationWorld::new(grid, params, EngineConfig::default(), ChaChaSource::new(42))?;

    println!("step 0");
    print_grid(world.snapshot().iter_rows());
    while world.remaining_steps() > 0 {
        let result = world.step_sync()?;
        println!(
            "step {} ({} activations, {} us)",
            result.step, result.metrics.activations, result.metrics.kernel_us
        );
        print_grid(result.snapshot.iter_rows());
    }

    let response = smolder_engine::SimulationResponse::from(world.into_grid());
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

fn print_grid<'a>(rows: impl Iterator<Item = &'a [f64]>) {
    for row in rows {
        let cells: Vec<String> = row.iter().map(|v| format!("{v:.2}")).collect();
        println!("  {}", cells.join(" "));
    }
}
