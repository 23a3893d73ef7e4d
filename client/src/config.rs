use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, bail, ensure};
use libca::{AutomatonGrid, RuleTable, SeedPolicy, strip_line_ending};
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub rule: i64,

    pub window_width: u32,
    pub window_height: u32,

    /// Screen pixels per cell along each axis.
    pub x_scale: f32,
    pub y_scale: f32,

    /// Produce one row per left click instead of drawing the whole grid up front.
    pub per_click_iteration: bool,

    /// -1 silences logging, 7 logs everything.
    pub verbosity: i8,

    /// File holding row 0 as '0'/'1' characters.
    pub seed_file: Option<PathBuf>,

    /// Seed row 0 with alternating cells instead of random ones when no seed file is given.
    pub alternating_seed: bool,

    /// Makes random seeding reproducible.
    pub rng_seed: Option<u64>,

    /// Delay between rows for the console `run` command.
    pub tick_millis: u64,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            rule: 110,
            window_width: 400,
            window_height: 300,
            x_scale: 2.0,
            y_scale: 2.0,
            per_click_iteration: false,
            verbosity: 0,
            seed_file: None,
            alternating_seed: false,
            rng_seed: None,
            tick_millis: 200,
        }
    }
}

/// Window size in screen pixels and grid size in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub window_width: u32,
    pub window_height: u32,
    pub grid_width: usize,
    pub grid_height: usize,
}

impl ViewerConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let config_serialized = fs::read(path)
            .with_context(|| format!("Couldn't read config {}", path.display()))?;
        serde_json::from_slice(&config_serialized).context("Couldn't deserialize config")
    }

    /// Reads the seed file, if any, with its trailing line ending removed.
    pub fn load_seed_text(&self) -> anyhow::Result<Option<String>> {
        let Some(seed_file) = &self.seed_file else {
            return Ok(None);
        };

        let seed_text = fs::read_to_string(seed_file)
            .with_context(|| format!("Couldn't read seed file {}", seed_file.display()))?;

        Ok(Some(strip_line_ending(&seed_text).to_owned()))
    }

    pub fn seed_policy(&self, seed_text: Option<&str>) -> anyhow::Result<SeedPolicy> {
        match seed_text {
            Some(text) if !text.is_empty() => {
                SeedPolicy::from_text(Some(text)).context("Invalid seed row")
            }
            _ if self.alternating_seed => Ok(SeedPolicy::Alternating),
            _ => Ok(SeedPolicy::Random),
        }
    }

    /// Each cell covers `x_scale` by `y_scale` window pixels.
    pub fn layout(&self) -> anyhow::Result<Layout> {
        ensure!(
            self.x_scale > 0.0 && self.y_scale > 0.0,
            "Scale factors must be positive, got {}x{}",
            self.x_scale,
            self.y_scale
        );

        let grid_width = (self.window_width as f32 / self.x_scale) as usize;
        let grid_height = (self.window_height as f32 / self.y_scale) as usize;

        if grid_width == 0 || grid_height == 0 {
            bail!(
                "Window {}x{} at scale {}x{} leaves no room for cells",
                self.window_width,
                self.window_height,
                self.x_scale,
                self.y_scale
            );
        }

        Ok(Layout {
            window_width: self.window_width,
            window_height: self.window_height,
            grid_width,
            grid_height,
        })
    }

    pub fn build_grid(&self) -> anyhow::Result<(AutomatonGrid, Layout)> {
        let rule = RuleTable::new(self.rule).context("Invalid rule")?;

        let seed_text = self.load_seed_text()?;
        let seed = self.seed_policy(seed_text.as_deref())?;
        let layout = self.layout()?;

        let rng = match self.rng_seed {
            Some(rng_seed) => StdRng::seed_from_u64(rng_seed),
            None => StdRng::from_os_rng(),
        };

        let grid = AutomatonGrid::with_rng(layout.grid_width, layout.grid_height, rule, seed, rng)
            .context("Couldn't create automaton grid")?;

        Ok((grid, layout))
    }
}
