//! One generation of the automaton over the cell grid.
//!
//! Alive flags are snapshotted before anything is mutated, so every cell sees
//! its neighbours as they were in the previous generation.

use rayon::prelude::*;
use tracing::debug;

use super::{Algorithm, CellGrid, EntityRegistry, Rule};

/// Outcome of a single generation.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct GenerationReport {
    pub population: usize,
    pub births: usize,
    pub deaths: usize,
}

/// Neighbour counts for every cell of the snapshot, row-major.
fn neighbor_counts(grid: &CellGrid, alive: &[bool], algorithm: Algorithm) -> Vec<u8> {
    let (width, _) = grid.dimensions();
    let count = |idx: usize| grid.count_live_neighbors(alive, idx / width, idx % width);

    match algorithm {
        Algorithm::Serial => (0..alive.len()).map(count).collect(),
        Algorithm::Parallel => (0..alive.len()).into_par_iter().map(count).collect(),
    }
}

/// Advance every cell in `grid` by one generation under `rule`.
///
/// Each cell's `alive_neighbors` is overwritten with the count it was
/// evaluated against.
pub fn advance(
    grid: &CellGrid,
    registry: &mut EntityRegistry,
    rule: &dyn Rule,
    algorithm: Algorithm,
) -> GenerationReport {
    let alive = grid.alive_snapshot(registry);
    let counts = neighbor_counts(grid, &alive, algorithm);

    let mut report = GenerationReport::default();
    for ((&handle, &was_alive), &neighbors) in grid.handles().iter().zip(&alive).zip(&counts) {
        let Some(thing) = registry.get_mut(handle).and_then(|e| e.as_cell_mut()) else {
            continue;
        };
        thing.data.alive_neighbors = neighbors;
        thing.data.state = rule.evolve(thing.data.state, neighbors);

        let now_alive = thing.data.is_alive();
        match (was_alive, now_alive) {
            (false, true) => report.births += 1,
            (true, false) => report.deaths += 1,
            _ => {}
        }
        if now_alive {
            report.population += 1;
        }
    }

    debug!(
        population = report.population,
        births = report.births,
        deaths = report.deaths,
        algorithm = algorithm.name(),
        "generation advanced"
    );
    report
}
