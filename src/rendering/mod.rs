use macroquad::prelude::*;

use crate::application::{Renderable, Sandbox};

const CELL_COLOR: Color = BLACK;
const BACKGROUND: Color = WHITE;
const STATUS_COLOR: Color = Color { r: 0.2, g: 0.2, b: 0.8, a: 1.0 };

/// Alive cells are filled, dead cells outlined.
fn draw_cell(cell: &Renderable) {
    let Renderable { rect, alive } = *cell;
    let (x, y, w, h) = (rect.x as f32, rect.y as f32, rect.w as f32, rect.h as f32);
    if alive {
        draw_rectangle(x, y, w, h, CELL_COLOR);
    } else {
        draw_rectangle_lines(x, y, w, h, 1.0, CELL_COLOR);
    }
}

/// Draw every cell inside the camera viewport.
pub fn draw_grid(sandbox: &Sandbox) {
    let camera = sandbox.camera();
    sandbox
        .renderables()
        .filter(|cell| camera.is_visible(&cell.rect))
        .for_each(|cell| draw_cell(&cell));
}

/// One-line status in the bottom-left corner.
fn draw_status(sandbox: &Sandbox) {
    let mode = if sandbox.is_started() { "Running" } else { "Editing" };
    let status = format!(
        "{mode} | Generation: {} | Population: {} | {}",
        sandbox.generation(),
        sandbox.population(),
        sandbox.algorithm().name(),
    );
    draw_text(&status, 10.0, screen_height() - 10.0, 20.0, STATUS_COLOR);
}

pub fn draw_frame(sandbox: &Sandbox) {
    clear_background(BACKGROUND);
    draw_grid(sandbox);
    draw_status(sandbox);
}
