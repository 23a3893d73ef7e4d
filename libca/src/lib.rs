//! Elementary (3-cell neighborhood) binary cellular automata.
//!
//! A [`RuleTable`] is built once from a rule number and an [`AutomatonGrid`] applies
//! it row by row, wrapping around at the row edges.

pub use cell::{Cell, parse_row, render_row, strip_line_ending};
pub use error::CaError;
pub use grid::{AutomatonGrid, GridState, ProducedRow, RowEvent, RowObserver};
pub use pos::Position;
pub use rule::{Neighborhood, RuleTable};
pub use seed::SeedPolicy;

pub mod cell;
pub mod error;
pub mod grid;
pub mod pos;
pub mod rule;
pub mod seed;
