//! Error types for the sandbox.
//!
//! Every error here is fatal and can only surface during startup. Once the
//! frame loop is running no operation returns one.

use std::collections::TryReserveError;

use crate::config::ConfigError;

/// Errors raised while building the sandbox.
#[derive(Debug, thiserror::Error)]
pub enum SandboxError {
    /// The level does not divide into a whole number of cells.
    #[error(
        "level {level_width}x{level_height} does not divide into {cell_width}x{cell_height} cells"
    )]
    NonIntegerGrid {
        /// Level width in pixels.
        level_width: u32,
        /// Level height in pixels.
        level_height: u32,
        /// Cell width in pixels.
        cell_width: u32,
        /// Cell height in pixels.
        cell_height: u32,
    },

    /// A cell rectangle would not fit the `i32` screen coordinate space.
    #[error(
        "level {level_width}x{level_height} with {x_padding}x{y_padding} cell spacing overflows screen coordinates"
    )]
    LevelTooLarge {
        level_width: u32,
        level_height: u32,
        x_padding: u32,
        y_padding: u32,
    },

    /// The screen size does not fit the `i32` screen coordinate space.
    #[error("screen {width}x{height} overflows screen coordinates")]
    ScreenTooLarge { width: u32, height: u32 },

    /// Camera, cells and headroom add up to more entities than `usize` holds.
    #[error("{cells} cells plus {headroom} spare slots overflow the entity count")]
    CapacityOverflow { cells: usize, headroom: usize },

    /// Storage for the entity registry could not be reserved.
    #[error("could not reserve {capacity} entity slots")]
    Allocation {
        capacity: usize,
        #[source]
        source: TryReserveError,
    },

    /// The entity registry has no room left for another entity.
    #[error("entity registry is full (capacity {capacity})")]
    RegistryFull {
        /// Fixed capacity the registry was created with.
        capacity: usize,
    },

    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
