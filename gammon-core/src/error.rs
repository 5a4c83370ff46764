//! Error types for board construction, rule configuration and notation parsing.

/// Errors raised when a board or geometry is inconsistent.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("inner-board index {inner} must lie strictly between 0 and bear-off index {bear_off}")]
    InnerOutOfRange { inner: usize, bear_off: usize },

    #[error("bear-off index {bear_off} needs {slots} slots, more than the supported {max}")]
    TooManySlots {
        bear_off: usize,
        slots: usize,
        max: usize,
    },

    #[error("a side needs between 1 and 127 checkers, not {0}")]
    CheckerLimit(u8),

    #[error("layout has {actual} slots, expected {expected}")]
    SlotCount { expected: usize, actual: usize },

    #[error("checker on slot {index} belongs to the wrong side")]
    MisplacedChecker { index: usize },

    #[error("{side} has {count} checkers on the board, more than the {limit} allowed")]
    TooManyCheckers {
        side: &'static str,
        count: usize,
        limit: usize,
    },
}

/// Errors raised by rule configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RulesError {
    #[error("doublet usage budget must be at least 1")]
    ZeroDoubletUses,

    #[error("unknown variant \"{0}\" (expected standard, half or mini)")]
    UnknownVariant(String),

    #[error("die face {0} is outside 1..=6")]
    InvalidDie(u8),
}

/// Errors raised while parsing checker-play notation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum NotationError {
    #[error("\"{0}\" is missing the ':' between roll and moves")]
    MissingSeparator(String),

    #[error("\"{0}\" is not a roll of two dice")]
    InvalidRoll(String),

    #[error("\"{0}\" is not a move")]
    InvalidMove(String),

    #[error("\"{0}\" does not move toward home")]
    BackwardMove(String),

    #[error("\"{0}\" names a point outside the board")]
    OutOfRange(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_board_error_display() {
        let err = BoardError::SlotCount {
            expected: 26,
            actual: 24,
        };
        assert_eq!(err.to_string(), "layout has 24 slots, expected 26");
    }

    #[test]
    fn test_rules_error_display() {
        assert_eq!(
            RulesError::ZeroDoubletUses.to_string(),
            "doublet usage budget must be at least 1"
        );
        assert_eq!(
            RulesError::InvalidDie(0).to_string(),
            "die face 0 is outside 1..=6"
        );
    }

    #[test]
    fn test_notation_error_display() {
        let err = NotationError::InvalidMove("13-11".to_string());
        assert_eq!(err.to_string(), "\"13-11\" is not a move");
    }
}
