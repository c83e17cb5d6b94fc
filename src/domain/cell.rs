use super::Rect;

/// State of a single cell in the automaton.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum CellState {
    #[default]
    Dead,
    Alive,
}

impl CellState {
    /// Check if the cell is currently alive
    pub const fn is_alive(self) -> bool {
        matches!(self, CellState::Alive)
    }

    pub const fn from_alive(alive: bool) -> Self {
        if alive { CellState::Alive } else { CellState::Dead }
    }

    pub const fn toggle(self) -> Self {
        match self {
            CellState::Alive => CellState::Dead,
            CellState::Dead => CellState::Alive,
        }
    }
}

/// Simulation state of one grid cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellData {
    pub column: usize,
    pub row: usize,
    pub state: CellState,
    /// Alive neighbours seen by the last generation. Recomputed every step.
    pub alive_neighbors: u8,
}

impl CellData {
    /// A dead cell at `(row, column)`.
    pub const fn new(row: usize, column: usize) -> Self {
        Self {
            column,
            row,
            state: CellState::Dead,
            alive_neighbors: 0,
        }
    }

    pub const fn is_alive(&self) -> bool {
        self.state.is_alive()
    }
}

/// A cell's simulation data paired with its on-screen bounds.
///
/// `graphics` is what panning moves and what the renderer draws.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CellThing {
    pub data: CellData,
    pub graphics: Rect,
}

impl CellThing {
    pub const fn new(data: CellData, graphics: Rect) -> Self {
        Self { data, graphics }
    }
}
