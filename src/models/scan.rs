use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;
use regex::Regex;
use serde::{Deserialize, Serialize};
use crate::errors::AegisError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is a valid regex"));
static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s().-]+$").expect("mobile pattern is a valid regex"));
const MAX_VALUE_LENGTH: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScanInputType {
    Email,
    Mobile,
    Social,
}

impl ScanInputType {
    pub const ALL: [ScanInputType; 3] = [Self::Email, Self::Mobile, Self::Social];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Email => "EMAIL",
            Self::Mobile => "MOBILE",
            Self::Social => "SOCIAL",
        }
    }
}

impl fmt::Display for ScanInputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScanInputType {
    type Err = AegisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "EMAIL" => Ok(Self::Email),
            "MOBILE" | "PHONE" => Ok(Self::Mobile),
            "SOCIAL" => Ok(Self::Social),
            other => Err(AegisError::InvalidInput(format!("Unsupported scan type: {}", other))),
        }
    }
}

/// An identity submitted for scanning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanInput {
    #[serde(rename = "type")]
    pub input_type: ScanInputType,
    pub value: String,
}

impl ScanInput {
    pub fn new(input_type: ScanInputType, value: &str) -> Self {
        Self { input_type, value: value.trim().to_string() }
    }

    pub fn email(value: &str) -> Self {
        Self::new(ScanInputType::Email, value)
    }

    /// Reject values that cannot belong to the declared input type.
    pub fn validate(&self) -> Result<(), AegisError> {
        let value = self.value.trim();
        if value.is_empty() {
            return Err(AegisError::InvalidInput("Scan value required".into()));
        }
        if value.len() > MAX_VALUE_LENGTH {
            return Err(AegisError::InvalidInput(format!(
                "Scan value exceeds {} characters", MAX_VALUE_LENGTH
            )));
        }

        match self.input_type {
            ScanInputType::Email => {
                if !EMAIL_RE.is_match(value) {
                    return Err(AegisError::InvalidInput(format!("Invalid email address: {}", value)));
                }
            }
            ScanInputType::Mobile => {
                let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
                if !MOBILE_RE.is_match(value) || !(7..=15).contains(&digits) {
                    return Err(AegisError::InvalidInput(format!("Invalid mobile number: {}", value)));
                }
            }
            ScanInputType::Social => {
                if value.chars().any(char::is_whitespace) {
                    return Err(AegisError::InvalidInput(format!("Invalid social handle: {}", value)));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_validation() {
        assert!(ScanInput::email("pro@aegis.com").validate().is_ok());
        assert!(ScanInput::email("not-an-email").validate().is_err());
        assert!(ScanInput::email("a@b").validate().is_err());
        assert!(ScanInput::email("   ").validate().is_err());
    }

    #[test]
    fn test_mobile_validation() {
        assert!(ScanInput::new(ScanInputType::Mobile, "+1 (555) 010-9999").validate().is_ok());
        assert!(ScanInput::new(ScanInputType::Mobile, "12345").validate().is_err());
        assert!(ScanInput::new(ScanInputType::Mobile, "555-CALL-NOW").validate().is_err());
    }

    #[test]
    fn test_social_validation() {
        assert!(ScanInput::new(ScanInputType::Social, "@aegis_ops").validate().is_ok());
        assert!(ScanInput::new(ScanInputType::Social, "two words").validate().is_err());
    }

    #[test]
    fn test_patterns_compile() {
        assert!(EMAIL_RE.is_match("a@b.co"));
        assert!(MOBILE_RE.is_match("+44 20 7946 0958"));
    }

    #[test]
    fn test_new_trims_value() {
        let input = ScanInput::email("  user@example.com \n");
        assert_eq!(input.value, "user@example.com");
    }

    #[test]
    fn test_type_field_serialization() {
        let input = ScanInput::new(ScanInputType::Mobile, "+15550100");
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["type"], "MOBILE");
        assert_eq!(json["value"], "+15550100");
    }

    #[test]
    fn test_parse_input_type() {
        assert_eq!("email".parse::<ScanInputType>().unwrap(), ScanInputType::Email);
        assert_eq!("phone".parse::<ScanInputType>().unwrap(), ScanInputType::Mobile);
        assert!("fax".parse::<ScanInputType>().is_err());
    }
}
