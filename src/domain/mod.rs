mod rect;
mod cell;
mod rules;
mod entity;
mod ledger;
mod grid;
mod patterns;
mod algorithm;
pub mod simulation;

pub use rect::Rect;
pub use cell::{CellData, CellState, CellThing};
pub use rules::{Rule, ConwayRule, default_rule};
pub use entity::{Entity, EntityHandle, EntityKind, EntityRegistry};
pub use ledger::{AddressLedger, Allocation};
pub use grid::{CellGrid, GridGeometry, grid_dimensions};
pub use patterns::{Pattern, presets};
pub use algorithm::Algorithm;
pub use simulation::GenerationReport;
