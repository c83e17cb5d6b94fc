// Domain layer - entities, grid, simulation
pub mod domain;

// Application layer - input state, viewport, sandbox
pub mod application;

// Startup configuration and errors
pub mod config;
pub mod error;

// Infrastructure layer - rendering, input
pub mod rendering;
pub mod input;

// Re-exports for convenience
pub use domain::{Algorithm, CellGrid, EntityRegistry, Pattern, presets};
pub use application::{Camera, InputState, LogicalInput, Sandbox};
pub use config::SandboxConfig;
pub use error::SandboxError;
