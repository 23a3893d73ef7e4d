use std::fmt;

use rand::{SeedableRng, rngs::StdRng};

use crate::{
    cell::{Cell, render_row},
    error::CaError,
    pos::Position,
    rule::RuleTable,
    seed::SeedPolicy,
};

/// Lifecycle of a grid. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GridState {
    Empty,
    Seeded,
    Partial,
    Complete,
}

/// A row that was just written by [`AutomatonGrid::produce_next_row`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProducedRow<'a> {
    pub index: usize,
    pub cells: &'a [Cell],
}

/// Passed to every observer after a row is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowEvent<'a> {
    pub index: usize,
    pub cells: &'a [Cell],
    pub complete: bool,
}

pub type RowObserver = Box<dyn FnMut(&RowEvent) + Send + Sync>;

/// A `width x height` bitmap of generations, filled top to bottom.
///
/// Rows `0..next_row` hold computed generations. Rows from `next_row` on are
/// storage only and are never handed out.
pub struct AutomatonGrid {
    width: usize,
    height: usize,
    rule: RuleTable,
    seed: SeedPolicy,
    rng: StdRng,
    cells: Vec<Cell>,
    next_row: usize,
    observers: Vec<RowObserver>,
}

impl AutomatonGrid {
    pub fn new(
        width: usize,
        height: usize,
        rule: RuleTable,
        seed: SeedPolicy,
    ) -> Result<Self, CaError> {
        Self::with_rng(width, height, rule, seed, StdRng::from_os_rng())
    }

    /// Like [`AutomatonGrid::new`] but random seeding draws from `rng`.
    pub fn with_rng(
        width: usize,
        height: usize,
        rule: RuleTable,
        seed: SeedPolicy,
        rng: StdRng,
    ) -> Result<Self, CaError> {
        let invalid_dimensions = CaError::InvalidDimensions { width, height };

        if width == 0 || height == 0 {
            return Err(invalid_dimensions);
        }

        seed.check_fits(width)?;

        let len = width.checked_mul(height).ok_or(invalid_dimensions.clone())?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| invalid_dimensions)?;
        cells.resize(len, Cell::Dead);

        Ok(Self {
            width,
            height,
            rule,
            seed,
            rng,
            cells,
            next_row: 0,
            observers: Vec::new(),
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn rule(&self) -> &RuleTable {
        &self.rule
    }

    pub fn seed_policy(&self) -> &SeedPolicy {
        &self.seed
    }

    /// Index of the row the next production step writes.
    pub fn next_row(&self) -> usize {
        self.next_row
    }

    pub fn state(&self) -> GridState {
        match self.next_row {
            0 => GridState::Empty,
            n if n == self.height => GridState::Complete,
            1 => GridState::Seeded,
            _ => GridState::Partial,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.next_row >= self.height
    }

    /// Registers a callback run after every produced row.
    pub fn add_observer<F>(&mut self, observer: F)
    where
        F: FnMut(&RowEvent) + Send + Sync + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    /// Writes the next row and returns it, or `None` once every row is populated.
    pub fn produce_next_row(&mut self) -> Option<ProducedRow<'_>> {
        if self.is_complete() {
            return None;
        }

        let index = self.next_row;
        if index == 0 {
            let row = &mut self.cells[..self.width];
            self.seed.fill(row, &mut self.rng);
        } else {
            self.derive_row(index);
        }
        self.next_row += 1;

        self.notify(index);

        Some(ProducedRow {
            index,
            cells: self.row_slice(index),
        })
    }

    /// Produces rows until the grid is complete and returns how many were written.
    pub fn produce_all_remaining_rows(&mut self) -> usize {
        let mut produced = 0;
        while self.produce_next_row().is_some() {
            produced += 1;
        }
        produced
    }

    pub fn row(&self, index: usize) -> Option<&[Cell]> {
        (index < self.next_row).then(|| self.row_slice(index))
    }

    pub fn row_text(&self, index: usize) -> Option<String> {
        self.row(index).map(render_row)
    }

    /// Populated rows, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells[..self.next_row * self.width].chunks_exact(self.width)
    }

    pub fn cell<P>(&self, pos: P) -> Option<Cell>
    where
        P: Into<Position>,
    {
        let Position { column, row } = pos.into();

        if column >= self.width {
            return None;
        }

        self.row(row).map(|cells| cells[column])
    }

    /// Computes row `index` from row `index - 1`, treating the previous row as a ring.
    fn derive_row(&mut self, index: usize) {
        let width = self.width;
        let (above, rest) = self.cells[(index - 1) * width..].split_at_mut(width);
        let current = &mut rest[..width];

        for (column, cell) in current.iter_mut().enumerate() {
            let left = above[if column == 0 { width - 1 } else { column - 1 }];
            let middle = above[column];
            let right = above[(column + 1) % width];

            *cell = self.rule.lookup(left, middle, right);
        }
    }

    fn notify(&mut self, index: usize) {
        if self.observers.is_empty() {
            return;
        }

        let event = RowEvent {
            index,
            cells: &self.cells[index * self.width..(index + 1) * self.width],
            complete: self.next_row >= self.height,
        };

        for observer in &mut self.observers {
            observer(&event);
        }
    }

    fn row_slice(&self, index: usize) -> &[Cell] {
        let start = index * self.width;
        &self.cells[start..start + self.width]
    }
}

impl fmt::Debug for AutomatonGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AutomatonGrid")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("rule", &self.rule)
            .field("seed", &self.seed)
            .field("next_row", &self.next_row)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
