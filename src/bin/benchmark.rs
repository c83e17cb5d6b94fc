//! Generation timing: serial vs parallel neighbour counting

use std::time::Instant;

use rand::SeedableRng;
use rand::rngs::StdRng;

use cell_sandbox::{Algorithm, LogicalInput, Sandbox, SandboxConfig, SandboxError};

fn benchmark(cells_per_side: u32, algorithm: Algorithm, iterations: u32) -> Result<f64, SandboxError> {
    let mut config = SandboxConfig::default();
    config.level.width = cells_per_side * config.cell.width;
    config.level.height = cells_per_side * config.cell.height;
    config.simulation.algorithm = algorithm;

    let mut sandbox = Sandbox::new(&config)?;
    sandbox.randomize(&mut StdRng::seed_from_u64(42), 0.3);
    sandbox.set_key(LogicalInput::StartSimulation, true);

    let start = Instant::now();
    for _ in 0..iterations {
        sandbox.frame();
    }
    Ok(start.elapsed().as_secs_f64() * 1000.0 / iterations as f64)
}

fn main() -> Result<(), SandboxError> {
    println!("=== Cell Sandbox Generation Benchmark ===\n");

    let sizes = [40, 100, 200, 400, 800];
    let iterations = 20;

    println!("{:>10} {:>12} {:>12} {:>10}", "Size", "Serial", "Parallel", "Speedup");
    println!("{:-<48}", "");

    for size in sizes {
        let serial_ms = benchmark(size, Algorithm::Serial, iterations)?;
        let parallel_ms = benchmark(size, Algorithm::Parallel, iterations)?;

        println!(
            "{:>10} {:>12.2} {:>12.2} {:>9.1}x",
            format!("{size}x{size}"),
            serial_ms,
            parallel_ms,
            serial_ms / parallel_ms
        );
    }
    Ok(())
}
