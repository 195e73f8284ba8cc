use std::fmt;
use std::str::FromStr;
use serde::{Deserialize, Serialize};
use crate::errors::AegisError;

/// Subscription level. Gates remediation access and picks the orchestration path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    #[default]
    Free,
    Pro,
    Premium,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Free => "FREE",
            Tier::Pro => "PRO",
            Tier::Premium => "PREMIUM",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = AegisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "FREE" => Ok(Tier::Free),
            "PRO" => Ok(Tier::Pro),
            "PREMIUM" => Ok(Tier::Premium),
            other => Err(AegisError::InvalidInput(format!("Unknown tier: {}", other))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_case_insensitive() {
        assert_eq!("pro".parse::<Tier>().unwrap(), Tier::Pro);
        assert_eq!(" Premium ".parse::<Tier>().unwrap(), Tier::Premium);
    }

    #[test]
    fn test_parse_unknown_tier() {
        assert!("ENTERPRISE".parse::<Tier>().is_err());
    }

    #[test]
    fn test_serde_uppercase() {
        assert_eq!(serde_json::to_string(&Tier::Premium).unwrap(), "\"PREMIUM\"");
        let tier: Tier = serde_json::from_str("\"FREE\"").unwrap();
        assert_eq!(tier, Tier::Free);
    }
}
