use macroquad::prelude::*;
use tracing::debug;

use crate::application::{LogicalInput, Sandbox};

/// Chance of a cell starting alive when randomizing with `R`.
pub const RANDOM_DENSITY: f64 = 0.3;

const KEY_BINDINGS: [(KeyCode, LogicalInput); 5] = [
    (KeyCode::Up, LogicalInput::PanUp),
    (KeyCode::Down, LogicalInput::PanDown),
    (KeyCode::Left, LogicalInput::PanLeft),
    (KeyCode::Right, LogicalInput::PanRight),
    (KeyCode::Space, LogicalInput::StartSimulation),
];

/// Logical input bound to a physical key, if any.
pub fn map_key(key: KeyCode) -> Option<LogicalInput> {
    KEY_BINDINGS
        .iter()
        .find(|(bound, _)| *bound == key)
        .map(|&(_, input)| input)
}

/// Forward this frame's key presses and releases to the sandbox.
pub fn process_keyboard_input(sandbox: &mut Sandbox) {
    for (key, input) in KEY_BINDINGS {
        if is_key_pressed(key) {
            sandbox.set_key(input, true);
        }
        if is_key_released(key) {
            sandbox.set_key(input, false);
        }
    }

    // editing helpers; the sandbox ignores them once running
    if is_key_pressed(KeyCode::R) {
        sandbox.randomize(&mut ::rand::rng(), RANDOM_DENSITY);
    }
    if is_key_pressed(KeyCode::C) {
        sandbox.clear();
    }
}

/// Toggle the cell under the cursor on a left click.
pub fn handle_mouse_toggle(sandbox: &mut Sandbox) {
    if !is_mouse_button_pressed(MouseButton::Left) {
        return;
    }
    let (x, y) = mouse_position();
    let flipped = sandbox.toggle_cell_at(x as i32, y as i32);
    debug!(x, y, flipped, "cell toggle");
}

/// True when the window is closing or Escape was pressed.
pub fn quit_requested() -> bool {
    is_quit_requested() || is_key_pressed(KeyCode::Escape)
}
