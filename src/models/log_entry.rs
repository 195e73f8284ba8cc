use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Info,
    Success,
    Warning,
    Error,
}

/// One progress event. Entries form an append-only, ordered sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub message: String,
    #[serde(rename = "type")]
    pub level: LogLevel,
}

impl LogEntry {
    pub fn new(timestamp: String, message: impl Into<String>, level: LogLevel) -> Self {
        Self { timestamp, message: message.into(), level }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape() {
        let entry = LogEntry::new("2026-01-01T00:00:00.000Z".into(), "Vault handshake", LogLevel::Success);
        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["type"], "success");
        assert_eq!(json["message"], "Vault handshake");
        assert_eq!(json["timestamp"], "2026-01-01T00:00:00.000Z");
        assert_eq!(json.as_object().unwrap().len(), 3);
    }
}
