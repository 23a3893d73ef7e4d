use std::{
    io,
    process::exit,
    sync::{Arc, RwLock, RwLockWriteGuard},
    time::Duration,
};

use anyhow::{Context, anyhow, bail};
use log::{error, info};

use crate::{
    State,
    ticker::{TickerHost, rows::RowTicker},
};

#[derive(Debug, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Exit,
}

/// Reads commands from stdin until it closes.
pub fn run_console(state_arc: Arc<RwLock<State>>) {
    for line_res in io::stdin().lines() {
        let line = match line_res {
            Ok(line) => line,
            Err(e) => {
                error!("Couldn't read console input: {e}");
                break;
            }
        };

        if line.trim().is_empty() {
            continue;
        }

        match handle_cmd(&state_arc, line.split_whitespace()) {
            Ok(Reply::Text(text)) => println!("{text}"),
            Ok(Reply::Exit) => exit(0),
            Err(e) => eprintln!("! {e:?}"),
        }
    }
}

pub fn handle_cmd<'a, I>(state_arc: &Arc<RwLock<State>>, mut args: I) -> anyhow::Result<Reply>
where
    I: Iterator<Item = &'a str>,
{
    let reply = match args.next().context("No command")? {
        "step" => {
            let times = args.next().unwrap_or("1").parse::<usize>()?;

            let mut state = lock(state_arc)?;
            let produced = (0..times)
                .take_while(|_| state.grid.produce_next_row().is_some())
                .count();

            format!("OK {produced} row(s), next row {}", state.grid.next_row())
        }

        "finish" => {
            let produced = lock(state_arc)?.grid.produce_all_remaining_rows();
            format!("OK {produced} row(s)")
        }

        "run" => {
            let mut state = lock(state_arc)?;
            let millis = match args.next() {
                Some(millis) => millis.parse::<u64>()?,
                None => state.tick_millis,
            };

            if state.grid.is_complete() {
                bail!("Grid is already complete");
            }

            let running = state.ticker.as_ref().is_some_and(TickerHost::is_running);
            if running && let Some(ticker) = state.ticker.as_mut() {
                ticker.set_rate(millis);
            } else {
                info!("Producing a row every {millis}ms");
                state.ticker = Some(TickerHost::start(
                    state_arc.clone(),
                    Duration::from_millis(millis),
                    Box::new(RowTicker),
                ));
            }

            "OK".to_owned()
        }

        "stop" => {
            let ticker = lock(state_arc)?.ticker.take();
            match ticker {
                Some(ticker) => ticker.stop(),
                None => bail!("Nothing is running"),
            }

            "OK".to_owned()
        }

        "row" => {
            let index = args.next().context("missing row index")?.parse::<usize>()?;

            lock(state_arc)?
                .grid
                .row_text(index)
                .with_context(|| format!("Row {index} hasn't been produced yet"))?
        }

        "status" => {
            let state = lock(state_arc)?;
            let grid = &state.grid;
            format!(
                "{}, {}x{}, {}, next row {}, {:?}",
                grid.rule(),
                grid.width(),
                grid.height(),
                grid.seed_policy(),
                grid.next_row(),
                grid.state()
            )
        }

        "exit" => return Ok(Reply::Exit),

        _ => bail!("Unknown command"),
    };

    Ok(Reply::Text(reply))
}

fn lock(state_arc: &Arc<RwLock<State>>) -> anyhow::Result<RwLockWriteGuard<'_, State>> {
    state_arc.write().map_err(|_| anyhow!("State lock poisoned"))
}
