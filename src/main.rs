use std::path::Path;
use std::time::{Duration, Instant};

use anyhow::Context;
use macroquad::prelude::*;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use cell_sandbox::{Sandbox, SandboxConfig, input, rendering};

fn window_conf() -> Conf {
    Conf {
        window_title: "Cell Sandbox".to_owned(),
        window_width: 1280,
        window_height: 720,
        ..Default::default()
    }
}

/// Load the config named on the command line (or the defaults) and build
/// the sandbox from it.
fn startup() -> anyhow::Result<(SandboxConfig, Sandbox)> {
    let config = match std::env::args().nth(1) {
        Some(path) => SandboxConfig::from_file(Path::new(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => SandboxConfig::default(),
    };
    info!(
        level_width = config.level.width,
        level_height = config.level.height,
        cell_width = config.cell.width,
        cell_height = config.cell.height,
        "configuration loaded"
    );

    let sandbox = Sandbox::new(&config).context("building sandbox")?;
    Ok((config, sandbox))
}

#[macroquad::main(window_conf)]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    let (config, mut sandbox) = match startup() {
        Ok(ready) => ready,
        Err(err) => {
            error!("startup failed: {err:#}");
            std::process::exit(1);
        }
    };

    request_new_screen_size(config.screen.width as f32, config.screen.height as f32);
    // close the window through the loop so the sandbox is shut down cleanly
    prevent_quit();

    let frame_budget = Duration::from_millis(config.simulation.frame_delay_ms);
    loop {
        let frame_start = Instant::now();
        if input::quit_requested() {
            break;
        }

        input::process_keyboard_input(&mut sandbox);
        input::handle_mouse_toggle(&mut sandbox);
        sandbox.frame();
        rendering::draw_frame(&sandbox);

        if let Some(rest) = frame_budget.checked_sub(frame_start.elapsed()) {
            std::thread::sleep(rest);
        }
        next_frame().await;
    }

    sandbox.shutdown();
}
