//! Static plan catalog.
//!
//! Prices are minor currency units (paise): basic ₹100, premium ₹500,
//! enterprise ₹1000. The catalog is the only source of order amounts.

use once_cell::sync::Lazy;

use super::{Plan, PlanId};

static PLANS: Lazy<Vec<Plan>> = Lazy::new(|| {
    vec![
        Plan {
            id: PlanId::Free,
            name: "Free",
            price_minor: 0,
            currency: "INR",
            upload_limit: Some(20),
            features: &["uploads"],
        },
        Plan {
            id: PlanId::Basic,
            name: "Basic",
            price_minor: 10_000,
            currency: "INR",
            upload_limit: Some(200),
            features: &["uploads", "private_albums"],
        },
        Plan {
            id: PlanId::Premium,
            name: "Premium",
            price_minor: 50_000,
            currency: "INR",
            upload_limit: Some(1_000),
            features: &["uploads", "private_albums", "video"],
        },
        Plan {
            id: PlanId::Enterprise,
            name: "Enterprise",
            price_minor: 100_000,
            currency: "INR",
            upload_limit: None,
            features: &["uploads", "private_albums", "video", "priority_support"],
        },
    ]
});

/// Read-only access to the plan catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlanCatalog;

impl PlanCatalog {
    /// Creates a catalog handle.
    pub fn new() -> Self {
        Self
    }

    /// Looks up a plan by id.
    pub fn get(&self, id: PlanId) -> &'static Plan {
        PLANS
            .iter()
            .find(|p| p.id == id)
            .expect("catalog contains every PlanId variant")
    }

    /// Looks up a plan by its wire name, `None` for unknown names.
    pub fn find(&self, name: &str) -> Option<&'static Plan> {
        PlanId::parse(name).map(|id| self.get(id))
    }

    /// The tier every account holds without an entitlement.
    pub fn default_plan(&self) -> &'static Plan {
        self.get(PlanId::Free)
    }

    /// All catalog plans in ascending price order.
    pub fn all(&self) -> &'static [Plan] {
        &PLANS
    }
}
