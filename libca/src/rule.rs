use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{cell::Cell, error::CaError};

/// The three cells above a position, read left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Neighborhood {
    pub left: Cell,
    pub middle: Cell,
    pub right: Cell,
}

impl Neighborhood {
    /// Every neighborhood, ordered by [`Neighborhood::index`] (`000` first, `111` last).
    pub const ALL: [Neighborhood; 8] = {
        let mut all = [Neighborhood::new(Cell::Dead, Cell::Dead, Cell::Dead); 8];
        let mut index = 0;
        while index < 8 {
            all[index] = Neighborhood::from_index(index);
            index += 1;
        }
        all
    };

    pub const fn new(left: Cell, middle: Cell, right: Cell) -> Self {
        Self {
            left,
            middle,
            right,
        }
    }

    /// Reads the neighborhood as a 3-bit number: left is bit 2, right is bit 0.
    pub const fn index(self) -> usize {
        (self.left as usize) << 2 | (self.middle as usize) << 1 | self.right as usize
    }

    const fn from_index(index: usize) -> Self {
        const fn bit(index: usize, shift: usize) -> Cell {
            if (index >> shift) & 1 == 1 { Cell::Alive } else { Cell::Dead }
        }

        Self::new(bit(index, 2), bit(index, 1), bit(index, 0))
    }
}

/// Lookup table for an elementary automaton rule.
///
/// The output for a neighborhood is bit [`Neighborhood::index`] of the rule number,
/// so rule 110 (`01101110`) maps `111` to dead and `000` to dead, `001` to alive and so on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RuleTable {
    number: u8,
    outputs: [Cell; 8],
}

impl RuleTable {
    pub fn new(rule_number: i64) -> Result<Self, CaError> {
        u8::try_from(rule_number)
            .map(Self::from)
            .map_err(|_| CaError::InvalidRuleNumber(rule_number))
    }

    pub fn number(&self) -> u8 {
        self.number
    }

    pub fn lookup(&self, left: Cell, middle: Cell, right: Cell) -> Cell {
        self.lookup_neighborhood(Neighborhood::new(left, middle, right))
    }

    pub fn lookup_neighborhood(&self, neighborhood: Neighborhood) -> Cell {
        self.outputs[neighborhood.index()]
    }
}

impl From<u8> for RuleTable {
    fn from(number: u8) -> Self {
        let outputs = Neighborhood::ALL.map(|neighborhood| {
            Cell::from((number >> neighborhood.index()) & 1 == 1)
        });

        Self { number, outputs }
    }
}

impl TryFrom<i64> for RuleTable {
    type Error = CaError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RuleTable> for i64 {
    fn from(rule: RuleTable) -> Self {
        rule.number.into()
    }
}

impl FromStr for RuleTable {
    type Err = CaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let number = s
            .trim()
            .parse::<i64>()
            .map_err(|_| CaError::InvalidRuleText(s.to_owned()))?;
        Self::new(number)
    }
}

impl Default for RuleTable {
    fn default() -> Self {
        Self::from(110)
    }
}

impl fmt::Display for RuleTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {} ({:08b})", self.number, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn neighborhood(text: &str) -> Neighborhood {
        let cells = crate::cell::parse_row(text).unwrap();
        Neighborhood::new(cells[0], cells[1], cells[2])
    }

    #[test]
    fn rule_110_table() {
        let rule = RuleTable::from(110);
        let expected = [
            ("000", Cell::Dead),
            ("001", Cell::Alive),
            ("010", Cell::Alive),
            ("011", Cell::Alive),
            ("100", Cell::Dead),
            ("101", Cell::Alive),
            ("110", Cell::Alive),
            ("111", Cell::Dead),
        ];

        for (text, output) in expected {
            assert_eq!(rule.lookup_neighborhood(neighborhood(text)), output, "{text}");
        }
    }

    #[test]
    fn extreme_bits_follow_rule_number() {
        for number in 0..=255u8 {
            let rule = RuleTable::from(number);
            let all_alive = rule.lookup(Cell::Alive, Cell::Alive, Cell::Alive);
            assert_eq!(all_alive.is_alive(), number & 0b1000_0000 != 0, "rule {number}");
        }
    }

    #[test]
    fn parity_decides_all_dead_output() {
        for number in 0..=255u8 {
            let rule = RuleTable::from(number);
            let expected = if number % 2 == 0 { Cell::Dead } else { Cell::Alive };
            assert_eq!(rule.lookup(Cell::Dead, Cell::Dead, Cell::Dead), expected, "rule {number}");
        }
    }

    #[test]
    fn same_number_same_table() {
        for number in 0..=255 {
            assert_eq!(RuleTable::new(number), RuleTable::new(number));
        }
    }

    #[test]
    fn out_of_range_numbers_are_rejected() {
        assert_eq!(RuleTable::new(256), Err(CaError::InvalidRuleNumber(256)));
        assert_eq!(RuleTable::new(-1), Err(CaError::InvalidRuleNumber(-1)));
        assert!(RuleTable::new(0).is_ok());
        assert!(RuleTable::new(255).is_ok());
    }

    #[test]
    fn parses_from_text() {
        assert_eq!("30".parse::<RuleTable>().unwrap().number(), 30);
        assert_eq!(" 90 ".parse::<RuleTable>().unwrap().number(), 90);
        assert_eq!("300".parse::<RuleTable>(), Err(CaError::InvalidRuleNumber(300)));
        assert_eq!(
            "rule".parse::<RuleTable>(),
            Err(CaError::InvalidRuleText("rule".to_owned()))
        );
        assert_eq!(
            CaError::InvalidRuleText("rule".to_owned()).to_string(),
            "\"rule\" is not a rule number"
        );
    }

    #[test]
    fn neighborhood_order() {
        for (index, neighborhood) in Neighborhood::ALL.iter().enumerate() {
            assert_eq!(neighborhood.index(), index);
        }
        assert_eq!(Neighborhood::ALL[0], neighborhood("000"));
        assert_eq!(Neighborhood::ALL[6], neighborhood("110"));
    }

    #[test]
    fn display_shows_binary() {
        assert_eq!(RuleTable::from(110).to_string(), "rule 110 (01101110)");
        assert_eq!(RuleTable::from(1).to_string(), "rule 1 (00000001)");
    }
}
