use serde::{Deserialize, Serialize};
use std::fmt;

/// Scoring policy selector passed through to the service.
///
/// The core never interprets or validates the value; the constants below are
/// the identifiers the service currently recognizes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Strategy(String);

impl Strategy {
    pub const SMART_BALANCE: &'static str = "smart_balance";
    pub const FASTEST_WINS: &'static str = "fastest_wins";
    pub const HIGH_IMPACT: &'static str = "high_impact";
    pub const DEADLINE_DRIVEN: &'static str = "deadline_driven";

    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Strategy {
    fn default() -> Self {
        Self::new(Self::SMART_BALANCE)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for Strategy {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_smart_balance() {
        assert_eq!(Strategy::default().as_str(), "smart_balance");
    }

    #[test]
    fn unknown_values_pass_through() {
        let s = Strategy::from("made_up");
        assert_eq!(s.to_string(), "made_up");
        assert_eq!(serde_json::to_string(&s).unwrap(), "\"made_up\"");
    }
}
