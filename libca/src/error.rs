use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CaError {
    #[error("rule number {0} is outside 0..=255")]
    InvalidRuleNumber(i64),

    #[error("{0:?} is not a rule number")]
    InvalidRuleText(String),

    #[error("grid dimensions must be positive and fit in memory, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("seed of length {len} does not fit a grid of width {width}")]
    SeedTooLong { len: usize, width: usize },

    #[error("seed character {character:?} at position {position} is not '0' or '1'")]
    InvalidSeedCharacter { character: char, position: usize },
}
