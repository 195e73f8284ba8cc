use crate::models::Tier;

pub const ACCESS_DENIED_MESSAGE: &str =
    "Access Denied. Automated remediation is restricted to PRO and PREMIUM tiers.";

/// Whether `tier` may trigger automated remediation.
///
/// Both the HTTP transport and the orchestrator dispatch consult this; it is
/// the only place the threshold is defined.
pub fn can_remediate(tier: Tier) -> bool {
    match tier {
        Tier::Free => false,
        Tier::Pro | Tier::Premium => true,
    }
}
