use std::fmt;

use rand::Rng;

use crate::{
    cell::{Cell, parse_row},
    error::CaError,
};

/// How row 0 of a grid is populated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SeedPolicy {
    /// Cells copied into the leftmost columns; remaining columns start dead.
    /// An empty sequence falls back to [`SeedPolicy::Random`].
    Explicit(Vec<Cell>),

    /// Every cell is an independent fair coin flip.
    #[default]
    Random,

    /// Even columns alive, odd columns dead.
    Alternating,
}

impl SeedPolicy {
    /// `None` or empty text means random seeding.
    pub fn from_text(text: Option<&str>) -> Result<Self, CaError> {
        match text {
            Some(text) if !text.is_empty() => parse_row(text).map(SeedPolicy::Explicit),
            _ => Ok(SeedPolicy::Random),
        }
    }

    pub(crate) fn check_fits(&self, width: usize) -> Result<(), CaError> {
        match self {
            SeedPolicy::Explicit(cells) if cells.len() > width => Err(CaError::SeedTooLong {
                len: cells.len(),
                width,
            }),
            _ => Ok(()),
        }
    }

    /// Fills `row` in place. `row` must start out all dead.
    pub(crate) fn fill<R>(&self, row: &mut [Cell], rng: &mut R)
    where
        R: Rng + ?Sized,
    {
        match self {
            SeedPolicy::Explicit(cells) if !cells.is_empty() => {
                row[..cells.len()].copy_from_slice(cells);
            }
            SeedPolicy::Explicit(_) | SeedPolicy::Random => {
                for cell in row {
                    *cell = Cell::from(rng.random_bool(0.5));
                }
            }
            SeedPolicy::Alternating => {
                for (column, cell) in row.iter_mut().enumerate() {
                    *cell = Cell::from(column % 2 == 0);
                }
            }
        }
    }
}

impl fmt::Display for SeedPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SeedPolicy::Explicit(cells) if !cells.is_empty() => {
                write!(f, "explicit seed of {} cells", cells.len())
            }
            SeedPolicy::Explicit(_) | SeedPolicy::Random => f.write_str("random seed"),
            SeedPolicy::Alternating => f.write_str("alternating seed"),
        }
    }
}
