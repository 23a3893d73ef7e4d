/// A cell coordinate inside a grid. `row` counts generations from the seed row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub column: usize,
    pub row: usize,
}

impl From<[usize; 2]> for Position {
    fn from([column, row]: [usize; 2]) -> Self {
        Self { column, row }
    }
}

impl From<(usize, usize)> for Position {
    fn from((column, row): (usize, usize)) -> Self {
        Self { column, row }
    }
}

impl From<Position> for [usize; 2] {
    fn from(value: Position) -> Self {
        [value.column, value.row]
    }
}
