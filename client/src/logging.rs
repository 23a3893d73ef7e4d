use anyhow::bail;
use libca::{AutomatonGrid, render_row};
use log::{LevelFilter, info, trace};

/// Maps the `-v` level to a log filter. Levels 3 and 4 both mean `debug`,
/// 5 and up also dump every produced row.
pub fn level_for_verbosity(verbosity: i8) -> anyhow::Result<LevelFilter> {
    let level = match verbosity {
        -1 => LevelFilter::Off,
        0 => LevelFilter::Error,
        1 => LevelFilter::Warn,
        2 => LevelFilter::Info,
        3 | 4 => LevelFilter::Debug,
        5..=7 => LevelFilter::Trace,
        _ => bail!("Verbosity {verbosity} is outside [-1,7]"),
    };

    Ok(level)
}

/// `RUST_LOG` takes precedence over the verbosity level when it is set.
pub fn init(verbosity: i8) -> anyhow::Result<()> {
    let level = level_for_verbosity(verbosity)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level.as_str()))
        .format_timestamp_micros()
        .try_init()?;

    info!("Log level set to: {level}");
    Ok(())
}

/// Logs each produced row as text and announces completion.
pub fn observe_rows(grid: &mut AutomatonGrid) {
    grid.add_observer(|event| {
        if log::log_enabled!(log::Level::Trace) {
            trace!("{}: {}", event.index, render_row(event.cells));
        }

        if event.complete {
            info!("All {} rows drawn", event.index + 1);
        }
    });
}

#[cfg(test)]
mod tests {
    use libca::{RuleTable, SeedPolicy};

    use super::*;

    #[test]
    fn verbosity_levels() {
        assert_eq!(level_for_verbosity(-1).unwrap(), LevelFilter::Off);
        assert_eq!(level_for_verbosity(0).unwrap(), LevelFilter::Error);
        assert_eq!(level_for_verbosity(2).unwrap(), LevelFilter::Info);
        assert_eq!(level_for_verbosity(4).unwrap(), LevelFilter::Debug);
        assert_eq!(level_for_verbosity(7).unwrap(), LevelFilter::Trace);
        assert!(level_for_verbosity(8).is_err());
        assert!(level_for_verbosity(-2).is_err());
    }

    #[test_log::test]
    fn row_observer_does_not_disturb_production() {
        let mut grid = AutomatonGrid::new(
            5,
            3,
            RuleTable::default(),
            SeedPolicy::from_text(Some("00100")).unwrap(),
        )
        .unwrap();
        observe_rows(&mut grid);

        assert_eq!(grid.produce_all_remaining_rows(), 3);
        assert_eq!(grid.row_text(2).unwrap(), "11100");
    }
}
