use healthplan_macro::Entity;
use serde::{Deserialize, Serialize};

/// A health plan offered to members
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Entity)]
#[serde(rename_all = "camelCase")]
#[resource(path = "/api/v1/healthplans")]
pub struct HealthPlan {
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub provider: String,
    pub monthly_fee: f64,
    #[serde(default = "active_by_default")]
    pub active: bool,
}

fn active_by_default() -> bool {
    true
}

impl HealthPlan {
    pub fn new(name: impl Into<String>, provider: impl Into<String>, monthly_fee: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            provider: provider.into(),
            monthly_fee,
            active: true,
        }
    }
}
