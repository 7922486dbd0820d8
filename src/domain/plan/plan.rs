//! Plan definitions.

use serde::{Deserialize, Serialize};

/// Plan identifier.
///
/// `Free` is the implicit tier of every account without an entitlement;
/// the paid tiers mirror the purchase options offered at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanId {
    Free,
    Basic,
    Premium,
    Enterprise,
}

impl PlanId {
    /// Returns true if this plan is purchasable.
    pub fn is_paid(&self) -> bool {
        !matches!(self, PlanId::Free)
    }

    /// Returns the wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanId::Free => "free",
            PlanId::Basic => "basic",
            PlanId::Premium => "premium",
            PlanId::Enterprise => "enterprise",
        }
    }

    /// Parses a plan id from its wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(PlanId::Free),
            "basic" => Some(PlanId::Basic),
            "premium" => Some(PlanId::Premium),
            "enterprise" => Some(PlanId::Enterprise),
            _ => None,
        }
    }
}

impl std::fmt::Display for PlanId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A catalog plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    /// Catalog identifier.
    pub id: PlanId,

    /// Display name.
    pub name: &'static str,

    /// Price in minor currency units (paise). Zero for the free tier.
    pub price_minor: u64,

    /// ISO currency code.
    pub currency: &'static str,

    /// Upload limit counted over non-rejected media; `None` is unlimited.
    pub upload_limit: Option<u32>,

    /// Feature tags surfaced to clients.
    pub features: &'static [&'static str],
}

impl Plan {
    /// True iff `count` more uploads would still be within the limit.
    pub fn within_upload_limit(&self, count: u32) -> bool {
        match self.upload_limit {
            None => true,
            Some(limit) => count < limit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_is_not_paid() {
        assert!(!PlanId::Free.is_paid());
        assert!(PlanId::Basic.is_paid());
        assert!(PlanId::Enterprise.is_paid());
    }

    #[test]
    fn parse_round_trips_with_as_str() {
        for id in [PlanId::Free, PlanId::Basic, PlanId::Premium, PlanId::Enterprise] {
            assert_eq!(PlanId::parse(id.as_str()), Some(id));
        }
        assert_eq!(PlanId::parse("platinum"), None);
    }

    #[test]
    fn plan_id_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&PlanId::Premium).unwrap(), "\"premium\"");
    }

    #[test]
    fn limit_comparison_is_strict() {
        let plan = Plan {
            id: PlanId::Basic,
            name: "Basic",
            price_minor: 10_000,
            currency: "INR",
            upload_limit: Some(2),
            features: &[],
        };
        assert!(plan.within_upload_limit(0));
        assert!(plan.within_upload_limit(1));
        assert!(!plan.within_upload_limit(2));
    }

    #[test]
    fn unlimited_plan_accepts_any_count() {
        let plan = Plan {
            id: PlanId::Enterprise,
            name: "Enterprise",
            price_minor: 100_000,
            currency: "INR",
            upload_limit: None,
            features: &[],
        };
        assert!(plan.within_upload_limit(u32::MAX));
    }
}
