use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::CaError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Dead,

    Alive,
}

impl Cell {
    pub const DEAD_CHAR: char = '0';
    pub const ALIVE_CHAR: char = '1';

    pub fn from_char(character: char) -> Option<Self> {
        match character {
            Self::DEAD_CHAR => Some(Cell::Dead),
            Self::ALIVE_CHAR => Some(Cell::Alive),
            _ => None,
        }
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Dead => Self::DEAD_CHAR,
            Cell::Alive => Self::ALIVE_CHAR,
        }
    }

    pub fn is_alive(self) -> bool {
        self == Cell::Alive
    }

    pub fn toggled(self) -> Self {
        match self {
            Cell::Dead => Cell::Alive,
            Cell::Alive => Cell::Dead,
        }
    }
}

impl From<bool> for Cell {
    fn from(alive: bool) -> Self {
        if alive { Cell::Alive } else { Cell::Dead }
    }
}

impl From<Cell> for bool {
    fn from(cell: Cell) -> Self {
        cell.is_alive()
    }
}

/// Parses a row written as `'0'`/`'1'` characters.
///
/// Line endings are not accepted; callers reading rows from files should pass the
/// text through [`strip_line_ending`] first.
pub fn parse_row(text: &str) -> Result<Vec<Cell>, CaError> {
    text.chars()
        .enumerate()
        .map(|(position, character)| {
            Cell::from_char(character).ok_or(CaError::InvalidSeedCharacter {
                character,
                position,
            })
        })
        .collect()
}

/// Renders a row as `'0'`/`'1'` characters, the inverse of [`parse_row`].
pub fn render_row(cells: &[Cell]) -> String {
    cells.iter().map(|cell| cell.to_char()).join("")
}

/// Strips a single trailing `\n` or `\r\n`.
pub fn strip_line_ending(text: &str) -> &str {
    let text = text.strip_suffix('\n').unwrap_or(text);
    text.strip_suffix('\r').unwrap_or(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chars_map_both_ways() {
        for cell in [Cell::Dead, Cell::Alive] {
            assert_eq!(Cell::from_char(cell.to_char()), Some(cell));
        }
        assert_eq!(Cell::from_char('2'), None);
        assert_eq!(Cell::from_char(' '), None);
    }

    #[test]
    fn parse_then_render_is_identity() {
        let text = "0110100111";
        assert_eq!(render_row(&parse_row(text).unwrap()), text);
    }

    #[test]
    fn parse_reports_offending_character() {
        assert_eq!(
            parse_row("01x1"),
            Err(CaError::InvalidSeedCharacter {
                character: 'x',
                position: 2
            })
        );
    }

    #[test]
    fn parse_rejects_line_endings() {
        assert!(parse_row("0101\n").is_err());
        assert_eq!(parse_row(strip_line_ending("0101\r\n")).unwrap().len(), 4);
    }

    #[test]
    fn strip_line_ending_removes_one_ending_only() {
        assert_eq!(strip_line_ending("01\n"), "01");
        assert_eq!(strip_line_ending("01\r\n"), "01");
        assert_eq!(strip_line_ending("01\n\n"), "01\n");
        assert_eq!(strip_line_ending("01"), "01");
    }

    #[test]
    fn empty_text_is_empty_row() {
        assert_eq!(parse_row("").unwrap(), Vec::<Cell>::new());
        assert_eq!(render_row(&[]), "");
    }

    #[test]
    fn bool_conversion() {
        assert_eq!(Cell::from(true), Cell::Alive);
        assert!(!bool::from(Cell::Dead));
        assert_eq!(Cell::Alive.toggled(), Cell::Dead);
    }
}
