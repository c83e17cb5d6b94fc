mod camera;
mod input_state;
mod sandbox;
pub mod viewport;

pub use camera::Camera;
pub use input_state::{InputState, LogicalInput, PanDirection};
pub use sandbox::{Renderable, Sandbox};
