use serde_json::{json, Value};
use std::sync::LazyLock;

pub static CONFIG_SCHEMA: LazyLock<Value> = LazyLock::new(|| {
    json!({
        "$schema": "http://json-schema.org/draft-07/schema#",
        "type": "object",
        "properties": {
            "mode": { "type": "string", "enum": ["SIMULATION", "REAL"] },
            "services": {
                "type": "object",
                "propertyNames": {
                    "enum": ["HUNTER", "EMAILREP", "NUMVERIFY", "GOOGLE_SEARCH", "VIRUSTOTAL"]
                },
                "additionalProperties": {
                    "type": "object",
                    "properties": {
                        "enabled": { "type": "boolean" },
                        "api_key": { "type": "string" }
                    },
                    "additionalProperties": false
                }
            },
            "llm": {
                "type": "object",
                "properties": {
                    "provider": { "type": "string" },
                    "model": { "type": "string" },
                    "api_key": { "type": "string" },
                    "base_url": { "type": "string", "format": "uri" },
                    "prompts_dir": { "type": "string" }
                }
            },
            "pacing": {
                "type": "object",
                "properties": {
                    "enabled": { "type": "boolean" },
                    "scale": { "type": "number", "minimum": 0 }
                }
            },
            "storage": {
                "type": "object",
                "properties": {
                    "audit_log": { "type": "string" },
                    "reports_dir": { "type": "string" },
                    "public_base_url": { "type": "string", "format": "uri" }
                }
            },
            "accounts": {
                "type": "array",
                "items": {
                    "type": "object",
                    "required": ["email", "tier"],
                    "properties": {
                        "email": { "type": "string" },
                        "name": { "type": "string" },
                        "tier": { "type": "string", "enum": ["FREE", "PRO", "PREMIUM"] }
                    }
                }
            },
            "api_token": { "type": "string" }
        }
    })
});
