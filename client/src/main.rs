use std::{
    sync::{Arc, RwLock},
    thread,
};

use clap::Parser;
use libca::AutomatonGrid;
use log::{debug, info};
use ticker::TickerHost;

mod cli;
mod config;
mod console;
mod logging;
mod renderer;
mod ticker;

pub struct State {
    grid: AutomatonGrid,
    ticker: Option<TickerHost>,
    tick_millis: u64,
}

impl State {
    pub fn new(grid: AutomatonGrid, tick_millis: u64) -> Self {
        Self {
            grid,
            ticker: None,
            tick_millis,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let args = cli::Args::parse();
    let config = args.resolve_config()?;

    logging::init(config.verbosity)?;
    debug!("Config: {config:?}");

    let (mut grid, layout) = config.build_grid()?;
    info!(
        "{} on a {}x{} grid in a {}x{} window",
        grid.rule(),
        layout.grid_width,
        layout.grid_height,
        layout.window_width,
        layout.window_height
    );

    logging::observe_rows(&mut grid);

    if !config.per_click_iteration {
        grid.produce_all_remaining_rows();
    }

    let state_arc = Arc::new(RwLock::new(State::new(grid, config.tick_millis)));

    let console_state_arc = state_arc.clone();
    thread::spawn(move || console::run_console(console_state_arc));

    renderer::run(state_arc, layout, config.per_click_iteration)
}
