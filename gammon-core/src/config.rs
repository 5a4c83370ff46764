//! Rule configuration shared by the tools and bindings.

use serde::{Deserialize, Serialize};

use crate::applier::RollApplier;
use crate::board::{Board, Variant};
use crate::error::RulesError;

/// Board variant and doublet handling.
///
/// Every field is optional when deserializing:
///
/// ```json
/// { "variant": "mini", "doublet_uses": 2 }
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Rules {
    pub variant: Variant,
    /// How many times a doublet is played (4 standard, 2 without the doublet bonus).
    pub doublet_uses: u8,
}

impl Default for Rules {
    fn default() -> Self {
        Rules {
            variant: Variant::Standard,
            doublet_uses: RollApplier::STANDARD.doublet_uses(),
        }
    }
}

impl Rules {
    /// Validate the doublet budget and build the matching applier.
    pub fn applier(&self) -> Result<RollApplier, RulesError> {
        RollApplier::new(self.doublet_uses)
    }

    pub fn starting_board(&self) -> Board {
        Board::starting(self.variant)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let rules: Rules = serde_json::from_str("{}").unwrap();
        assert_eq!(rules, Rules::default());
        assert_eq!(rules.applier(), Ok(RollApplier::STANDARD));
        assert_eq!(rules.starting_board(), Board::starting(Variant::Standard));
    }

    #[test]
    fn test_partial_override() {
        let rules: Rules = serde_json::from_str(r#"{"variant":"half","doublet_uses":2}"#).unwrap();
        assert_eq!(rules.variant, Variant::Half);
        assert_eq!(rules.applier(), Ok(RollApplier::doublet_disabled()));
        assert_eq!(rules.starting_board().bear_off_index(), 17);
    }

    #[test]
    fn test_invalid_rules() {
        let rules: Rules = serde_json::from_str(r#"{"doublet_uses":0}"#).unwrap();
        assert_eq!(rules.applier(), Err(RulesError::ZeroDoubletUses));

        assert!(serde_json::from_str::<Rules>(r#"{"variant":"huge"}"#).is_err());
        assert!(serde_json::from_str::<Rules>(r#"{"doublets":3}"#).is_err());
    }
}
