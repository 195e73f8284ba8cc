use std::collections::HashMap;
use serde::{Deserialize, Serialize};
use crate::models::Tier;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Account {
    pub email: String,
    #[serde(default)]
    pub name: String,
    pub tier: Tier,
}

impl Account {
    pub fn new(email: &str, name: &str, tier: Tier) -> Self {
        Self { email: email.to_string(), name: name.to_string(), tier }
    }
}

/// Identity → license lookup. Unknown identities are on the free tier.
#[derive(Debug, Clone, Default)]
pub struct AccountDirectory {
    by_email: HashMap<String, Account>,
}

impl AccountDirectory {
    pub fn new(accounts: &[Account]) -> Self {
        let by_email = accounts
            .iter()
            .map(|a| (normalize(&a.email), a.clone()))
            .collect();
        Self { by_email }
    }

    pub fn get(&self, identity: &str) -> Option<&Account> {
        self.by_email.get(&normalize(identity))
    }

    pub fn tier_for(&self, identity: &str) -> Tier {
        self.get(identity).map(|a| a.tier).unwrap_or(Tier::Free)
    }

    pub fn len(&self) -> usize {
        self.by_email.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_email.is_empty()
    }
}

fn normalize(identity: &str) -> String {
    identity.trim().to_lowercase()
}
