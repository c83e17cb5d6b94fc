use rand::Rng;
use tracing::{info, trace, warn};

use crate::config::SandboxConfig;
use crate::domain::{
    presets, simulation, AddressLedger, Algorithm, Allocation, CellData, CellGrid, CellState,
    EntityRegistry, GenerationReport, Pattern, Rect, Rule, default_rule,
};
use crate::error::SandboxError;

use super::{viewport, Camera, InputState, LogicalInput};

/// One cell as handed to the renderer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Renderable {
    pub rect: Rect,
    pub alive: bool,
}

/// Sandbox owns the world and runs it one frame at a time.
///
/// Everything fallible happens in [`Sandbox::new`]; once built, no
/// operation can fail.
pub struct Sandbox {
    registry: EntityRegistry,
    grid: CellGrid,
    camera: Camera,
    ledger: AddressLedger,
    input: InputState,
    rule: Box<dyn Rule>,
    algorithm: Algorithm,
    pan_step: i32,
    generation: u64,
}

impl Sandbox {
    /// Build the registry, the cell grid and the camera from `config`.
    ///
    /// If anything fails after the registry exists, the allocations recorded
    /// so far are released before the error is returned.
    ///
    /// # Errors
    ///
    /// [`SandboxError::NonIntegerGrid`] if the level does not divide into
    /// whole cells, [`SandboxError::LevelTooLarge`] or
    /// [`SandboxError::ScreenTooLarge`] if a rectangle would overflow screen
    /// coordinates, [`SandboxError::CapacityOverflow`] or
    /// [`SandboxError::Allocation`] if the registry cannot be sized.
    pub fn new(config: &SandboxConfig) -> Result<Self, SandboxError> {
        let (width, height) = config.grid_dimensions()?;
        let headroom = config.registry.headroom;
        let overflow = || SandboxError::CapacityOverflow {
            cells: width.saturating_mul(height),
            headroom,
        };
        // camera + every cell + spare slots
        let capacity = width
            .checked_mul(height)
            .and_then(|cells| cells.checked_add(1))
            .and_then(|slots| slots.checked_add(headroom))
            .ok_or_else(overflow)?;

        let mut registry = EntityRegistry::new(capacity)?;
        let mut ledger = AddressLedger::new();
        ledger.record(Allocation::EntityTable { capacity });

        let (grid, camera) = match Self::populate(config, &mut registry, &mut ledger) {
            Ok(parts) => parts,
            Err(err) => {
                let released = release_all(&mut ledger);
                warn!(released, error = %err, "sandbox build failed");
                return Err(err);
            }
        };

        let mut sandbox = Self {
            registry,
            grid,
            camera,
            ledger,
            input: InputState::new(),
            rule: default_rule(),
            algorithm: config.simulation.algorithm,
            pan_step: config.viewport.pan_step,
            generation: 0,
        };

        if let Some(name) = config.simulation.seed_pattern.as_deref() {
            match presets::by_name(name) {
                Some(pattern) => {
                    let row = height.saturating_sub(pattern.height) / 2;
                    let column = width.saturating_sub(pattern.width) / 2;
                    let placed = sandbox.place_pattern(&pattern, row, column);
                    info!(pattern = pattern.name, row, column, placed, "seed pattern placed");
                }
                None => warn!(pattern = name, "unknown seed pattern, starting empty"),
            }
        }

        info!(
            width,
            height,
            entities = sandbox.registry.len(),
            capacity,
            algorithm = sandbox.algorithm.name(),
            rule = sandbox.rule.name(),
            "sandbox ready"
        );
        Ok(sandbox)
    }

    /// Create the grid cells, then the camera.
    fn populate(
        config: &SandboxConfig,
        registry: &mut EntityRegistry,
        ledger: &mut AddressLedger,
    ) -> Result<(CellGrid, Camera), SandboxError> {
        let grid = CellGrid::build(
            config.level.width,
            config.level.height,
            config.cell.into(),
            registry,
            ledger,
        )?;
        let camera = Camera::spawn(config.screen.width, config.screen.height, registry, ledger)?;
        Ok((grid, camera))
    }

    /// Feed one key transition into the input state.
    pub fn set_key(&mut self, input: LogicalInput, pressed: bool) {
        let was_started = self.input.is_started();
        self.input.set_key(input, pressed);
        if !was_started && self.input.is_started() {
            info!(population = self.population(), "simulation started");
        }
    }

    /// Flip every cell whose bounds strictly contain the pixel.
    ///
    /// Ignored once the simulation has started. Returns how many cells
    /// flipped.
    pub fn toggle_cell_at(&mut self, pixel_x: i32, pixel_y: i32) -> usize {
        if self.input.is_started() {
            return 0;
        }
        let mut flipped = 0;
        for &handle in self.grid.handles() {
            let entity = &mut self.registry[handle];
            if !entity.bounds().contains_strict(pixel_x, pixel_y) {
                continue;
            }
            if let Some(thing) = entity.as_cell_mut() {
                thing.data.state = thing.data.state.toggle();
                flipped += 1;
            }
        }
        flipped
    }

    /// Kill every cell. Ignored once the simulation has started.
    pub fn clear(&mut self) {
        if self.input.is_started() {
            return;
        }
        self.set_all(|_| CellState::Dead);
    }

    /// Bring each cell alive with probability `density`. Ignored once the
    /// simulation has started.
    pub fn randomize<R: Rng>(&mut self, rng: &mut R, density: f64) {
        if self.input.is_started() {
            return;
        }
        let density = density.clamp(0.0, 1.0);
        self.set_all(|_| CellState::from_alive(rng.random_bool(density)));
    }

    /// Stamp `pattern` with its top-left corner at `(row, column)`. Ignored
    /// once the simulation has started.
    pub fn place_pattern(&mut self, pattern: &Pattern, row: usize, column: usize) -> usize {
        if self.input.is_started() {
            return 0;
        }
        pattern.place_on(&self.grid, &mut self.registry, row, column)
    }

    fn set_all(&mut self, mut state: impl FnMut(&CellData) -> CellState) {
        for &handle in self.grid.handles() {
            if let Some(thing) = self.registry[handle].as_cell_mut() {
                thing.data.state = state(&thing.data);
            }
        }
    }

    /// Run one frame: pan every non-camera entity, then advance one
    /// generation if the simulation has started.
    pub fn frame(&mut self) -> Option<GenerationReport> {
        viewport::pan_all(&mut self.registry, &self.input, self.pan_step);

        if !self.input.is_started() {
            return None;
        }
        let report = simulation::advance(
            &self.grid,
            &mut self.registry,
            self.rule.as_ref(),
            self.algorithm,
        );
        self.generation += 1;
        Some(report)
    }

    /// Every cell's current rectangle and state, row-major.
    pub fn renderables(&self) -> impl Iterator<Item = Renderable> + '_ {
        self.grid
            .handles()
            .iter()
            .filter_map(|&handle| self.registry[handle].as_cell())
            .map(|thing| Renderable {
                rect: thing.graphics,
                alive: thing.data.is_alive(),
            })
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&CellData> {
        self.grid
            .cell_at(&self.registry, row, column)
            .map(|thing| &thing.data)
    }

    /// Alive neighbours of `(row, column)` in the current grid.
    pub fn count_live_neighbors(&self, row: usize, column: usize) -> u8 {
        let alive = self.grid.alive_snapshot(&self.registry);
        self.grid.count_live_neighbors(&alive, row, column)
    }

    pub fn population(&self) -> usize {
        self.renderables().filter(|r| r.alive).count()
    }

    pub const fn generation(&self) -> u64 {
        self.generation
    }

    pub const fn is_started(&self) -> bool {
        self.input.is_started()
    }

    pub const fn grid(&self) -> &CellGrid {
        &self.grid
    }

    pub const fn registry(&self) -> &EntityRegistry {
        &self.registry
    }

    pub const fn camera(&self) -> &Camera {
        &self.camera
    }

    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Number of allocations waiting for release at shutdown.
    pub fn tracked_allocations(&self) -> usize {
        self.ledger.len()
    }

    /// Tear the sandbox down, releasing every tracked allocation once.
    /// Returns how many were released.
    pub fn shutdown(mut self) -> usize {
        let released = release_all(&mut self.ledger);
        info!(released, generation = self.generation, "sandbox shut down");
        released
    }
}

fn release_all(ledger: &mut AddressLedger) -> usize {
    ledger.drain_all(|allocation| trace!(?allocation, "released"))
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    /// 6x6 grid of 10px cells.
    fn small_config() -> SandboxConfig {
        let mut config = SandboxConfig::default();
        config.level.width = 60;
        config.level.height = 60;
        config.screen.width = 200;
        config.screen.height = 100;
        config
    }

    fn sandbox() -> Sandbox {
        Sandbox::new(&small_config()).expect("valid config")
    }

    fn alive_cells(sandbox: &Sandbox) -> Vec<(usize, usize)> {
        let (width, height) = sandbox.grid().dimensions();
        let mut cells = Vec::new();
        for row in 0..height {
            for column in 0..width {
                if sandbox.cell(row, column).is_some_and(|c| c.is_alive()) {
                    cells.push((row, column));
                }
            }
        }
        cells
    }

    #[test]
    fn test_new_builds_grid_and_camera() {
        let sandbox = sandbox();
        assert_eq!(sandbox.grid().dimensions(), (6, 6));
        assert_eq!(sandbox.registry().len(), 37);
        assert_eq!(sandbox.registry().capacity(), 47);
        assert!(sandbox.registry()[sandbox.camera().handle()].is_camera());
        assert_eq!(sandbox.population(), 0);
    }

    #[test]
    fn test_new_rejects_non_integer_level() {
        let mut config = small_config();
        config.level.height = 65;
        assert!(matches!(
            Sandbox::new(&config),
            Err(SandboxError::NonIntegerGrid { level_height: 65, .. })
        ));
    }

    #[test]
    fn test_new_rejects_level_overflowing_coordinates() {
        let mut config = small_config();
        config.level.width = 3_000_000;
        config.level.height = 10;
        config.cell.x_padding = 10_000;
        assert!(matches!(
            Sandbox::new(&config),
            Err(SandboxError::LevelTooLarge { level_width: 3_000_000, .. })
        ));
    }

    #[test]
    fn test_new_rejects_overflowing_headroom() {
        let mut config = small_config();
        config.registry.headroom = usize::MAX;
        assert!(matches!(
            Sandbox::new(&config),
            Err(SandboxError::CapacityOverflow { cells: 36, headroom: usize::MAX })
        ));
    }

    #[test]
    fn test_failed_camera_releases_grid_allocations() {
        let mut config = small_config();
        config.screen.width = u32::MAX;
        assert!(matches!(
            Sandbox::new(&config),
            Err(SandboxError::ScreenTooLarge { width: u32::MAX, .. })
        ));

        let mut registry = EntityRegistry::new(64).expect("registry");
        let mut ledger = AddressLedger::new();
        let result = Sandbox::populate(&config, &mut registry, &mut ledger);
        assert!(result.is_err());
        // the grid was built before the camera failed
        assert_eq!(ledger.len(), 36 * 4 + 1);
        assert_eq!(release_all(&mut ledger), 36 * 4 + 1);
        assert!(ledger.is_empty());
    }

    #[test]
    fn test_toggle_flips_single_cell_and_back() {
        let mut sandbox = sandbox();
        assert_eq!(sandbox.toggle_cell_at(25, 35), 1);
        assert_eq!(alive_cells(&sandbox), vec![(3, 2)]);

        assert_eq!(sandbox.toggle_cell_at(25, 35), 1);
        assert!(alive_cells(&sandbox).is_empty());
    }

    #[test]
    fn test_toggle_on_cell_edge_hits_nothing() {
        let mut sandbox = sandbox();
        assert_eq!(sandbox.toggle_cell_at(20, 35), 0);
        assert_eq!(sandbox.toggle_cell_at(500, 500), 0);
    }

    #[test]
    fn test_toggle_in_overlap_flips_both_cells() {
        let mut config = small_config();
        config.cell.x_padding = 5;
        let mut sandbox = Sandbox::new(&config).expect("valid config");

        // column 0 spans x 0..10, column 1 spans x 5..15
        assert_eq!(sandbox.toggle_cell_at(7, 5), 2);
        assert_eq!(alive_cells(&sandbox), vec![(0, 0), (0, 1)]);

        assert_eq!(sandbox.toggle_cell_at(3, 5), 1);
        assert_eq!(alive_cells(&sandbox), vec![(0, 1)]);
    }

    #[test]
    fn test_toggle_ignored_after_start() {
        let mut sandbox = sandbox();
        sandbox.set_key(LogicalInput::StartSimulation, true);
        assert_eq!(sandbox.toggle_cell_at(25, 35), 0);
        assert_eq!(sandbox.population(), 0);
    }

    #[test]
    fn test_toggle_follows_panned_rectangles() {
        let mut sandbox = sandbox();
        sandbox.set_key(LogicalInput::PanLeft, true);
        sandbox.frame();
        sandbox.set_key(LogicalInput::PanLeft, false);

        // cell (0, 0) now spans x 10..20
        assert_eq!(sandbox.toggle_cell_at(15, 5), 1);
        assert_eq!(alive_cells(&sandbox), vec![(0, 0)]);
    }

    #[test]
    fn test_no_generation_before_start() {
        let mut sandbox = sandbox();
        sandbox.place_pattern(&presets::blinker(), 1, 1);
        assert_eq!(sandbox.frame(), None);
        assert_eq!(sandbox.generation(), 0);
        assert_eq!(sandbox.population(), 3);
    }

    #[test]
    fn test_glider_after_four_frames() {
        let mut sandbox = sandbox();
        sandbox.place_pattern(&presets::glider(), 0, 0);
        let before = alive_cells(&sandbox);

        sandbox.set_key(LogicalInput::StartSimulation, true);
        sandbox.set_key(LogicalInput::StartSimulation, false);
        for _ in 0..4 {
            assert!(sandbox.frame().is_some());
        }

        let expected: Vec<_> = before.iter().map(|&(r, c)| (r + 1, c + 1)).collect();
        assert_eq!(alive_cells(&sandbox), expected);
        assert_eq!(sandbox.generation(), 4);
    }

    #[test]
    fn test_pan_right_drifts_every_cell() {
        let mut sandbox = sandbox();
        let homes: Vec<_> = sandbox.registry().iter().map(|e| (e.home_x, e.home_y)).collect();

        sandbox.set_key(LogicalInput::PanRight, true);
        for _ in 0..3 {
            sandbox.frame();
        }
        sandbox.set_key(LogicalInput::PanRight, false);
        sandbox.frame();
        sandbox.set_key(LogicalInput::PanRight, true);
        for _ in 0..2 {
            sandbox.frame();
        }

        for (entity, &(hx, hy)) in sandbox.registry().iter().zip(&homes) {
            if entity.is_camera() {
                assert_eq!((entity.home_x, entity.home_y), (hx, hy));
            } else {
                assert_eq!((entity.home_x, entity.home_y), (hx - 50, hy));
                assert_eq!((entity.x, entity.y), (entity.home_x, entity.home_y));
            }
        }
        let first = sandbox.renderables().next().unwrap();
        assert_eq!(first.rect, Rect::new(-50, 0, 10, 10));
    }

    #[test]
    fn test_count_live_neighbors_at_corner() {
        let mut sandbox = sandbox();
        sandbox.randomize(&mut StdRng::seed_from_u64(1), 1.0);
        assert_eq!(sandbox.count_live_neighbors(0, 0), 3);
        assert_eq!(sandbox.count_live_neighbors(2, 2), 8);

        sandbox.clear();
        assert_eq!(sandbox.count_live_neighbors(2, 2), 0);
    }

    #[test]
    fn test_randomize_respects_density_bounds() {
        let mut sandbox = sandbox();
        let mut rng = StdRng::seed_from_u64(7);
        sandbox.randomize(&mut rng, 0.0);
        assert_eq!(sandbox.population(), 0);
        sandbox.randomize(&mut rng, 1.0);
        assert_eq!(sandbox.population(), 36);
    }

    #[test]
    fn test_seed_pattern_placed_at_centre() {
        let mut config = small_config();
        config.simulation.seed_pattern = Some("block".to_string());
        let sandbox = Sandbox::new(&config).unwrap();
        assert_eq!(alive_cells(&sandbox), vec![(2, 2), (2, 3), (3, 2), (3, 3)]);
    }

    #[test]
    fn test_unknown_seed_pattern_starts_empty() {
        let mut config = small_config();
        config.simulation.seed_pattern = Some("nope".to_string());
        let sandbox = Sandbox::new(&config).unwrap();
        assert_eq!(sandbox.population(), 0);
    }

    #[test]
    fn test_shutdown_releases_every_allocation() {
        let sandbox = sandbox();
        // table + 4 per cell + grid array + camera rect + camera entity
        let expected = 1 + 36 * 4 + 1 + 2;
        assert_eq!(sandbox.tracked_allocations(), expected);
        assert_eq!(sandbox.shutdown(), expected);
    }
}
