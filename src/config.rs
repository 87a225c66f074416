use serde::{Deserialize, Serialize};

/// Which `k` shares take part when a document supplies more than the threshold.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionOrder {
    /// The `k` shares with the smallest $x$ (numerically, not lexicographically).
    #[default]
    AscendingX,
    /// The first `k` shares in the order the document lists them.
    Declaration,
}

/// Encodes how a `ShareSet` is turned into a secret.
///
/// The arithmetic mode is not set here; it comes from the `ShareSet`'s modulus.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoveryConfig {
    /// How to pick the `k` shares that are interpolated.
    pub selection: SelectionOrder,
    /// Treat an inexact (non-integer) rational result as an error instead of a warning.
    pub deny_inexact: bool,
}

impl RecoveryConfig {
    pub fn new(selection: SelectionOrder, deny_inexact: bool) -> Self {
        RecoveryConfig {
            selection,
            deny_inexact,
        }
    }
}

#[cfg(test)]
mod test {
    use crate::config::{RecoveryConfig, SelectionOrder};

    #[test]
    fn test_defaults() {
        let c = RecoveryConfig::default();
        assert_eq!(c.selection, SelectionOrder::AscendingX);
        assert!(!c.deny_inexact);
    }

    #[test]
    fn test_deserialize_partial() {
        let c: RecoveryConfig = serde_json::from_str(r#"{ "selection": "declaration" }"#).unwrap();
        assert_eq!(c, RecoveryConfig::new(SelectionOrder::Declaration, false));

        let c: RecoveryConfig = serde_json::from_str(r#"{ "deny_inexact": true }"#).unwrap();
        assert_eq!(c, RecoveryConfig::new(SelectionOrder::AscendingX, true));
    }
}
