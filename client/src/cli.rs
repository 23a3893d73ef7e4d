use std::path::PathBuf;

use clap::Parser;

use crate::config::ViewerConfig;

/// Draws an elementary cellular automaton, one generation per pixel row.
#[derive(Debug, Parser)]
#[command(version, about)]
pub struct Args {
    /// JSON config file; flags given here override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Rule number to use, 0-255
    #[arg(short, long, allow_negative_numbers = true)]
    pub rule: Option<i64>,

    /// Draw window width
    #[arg(long)]
    pub window_width: Option<u32>,

    /// Draw window height
    #[arg(long)]
    pub window_height: Option<u32>,

    /// X scale factor
    #[arg(short, long)]
    pub x_scale: Option<f32>,

    /// Y scale factor
    #[arg(short, long)]
    pub y_scale: Option<f32>,

    /// File name with the initial line
    #[arg(short = 'f', long)]
    pub init_line: Option<PathBuf>,

    /// Generate one line per mouse click
    #[arg(long)]
    pub per_click_iteration: bool,

    /// Verbosity level [-1,7]
    #[arg(
        short,
        long,
        allow_negative_numbers = true,
        value_parser = clap::value_parser!(i8).range(-1..=7)
    )]
    pub verbose: Option<i8>,

    /// Seed with alternating cells instead of random ones
    #[arg(long)]
    pub alternating: bool,

    /// Seed for the random initial line
    #[arg(long)]
    pub rng_seed: Option<u64>,
}

impl Args {
    /// Loads `--config` (or the defaults) and layers the flags on top.
    pub fn resolve_config(&self) -> anyhow::Result<ViewerConfig> {
        let mut config = match &self.config {
            Some(path) => ViewerConfig::load(path)?,
            None => ViewerConfig::default(),
        };

        self.apply(&mut config);
        Ok(config)
    }

    fn apply(&self, config: &mut ViewerConfig) {
        if let Some(rule) = self.rule {
            config.rule = rule;
        }
        if let Some(window_width) = self.window_width {
            config.window_width = window_width;
        }
        if let Some(window_height) = self.window_height {
            config.window_height = window_height;
        }
        if let Some(x_scale) = self.x_scale {
            config.x_scale = x_scale;
        }
        if let Some(y_scale) = self.y_scale {
            config.y_scale = y_scale;
        }
        if let Some(init_line) = &self.init_line {
            config.seed_file = Some(init_line.clone());
        }
        if let Some(verbose) = self.verbose {
            config.verbosity = verbose;
        }
        if let Some(rng_seed) = self.rng_seed {
            config.rng_seed = Some(rng_seed);
        }

        config.per_click_iteration |= self.per_click_iteration;
        config.alternating_seed |= self.alternating;
    }
}
