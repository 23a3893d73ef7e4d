use crate::State;

use super::Ticker;

/// Produces one grid row per tick until the grid is complete.
pub struct RowTicker;

impl Ticker for RowTicker {
    fn tick(&mut self, state: &mut State) -> bool {
        state.grid.produce_next_row();
        !state.grid.is_complete()
    }
}
