use serde::{Deserialize, Serialize};

/// Aggregates computed by the backend from the vendor's order history.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analytics {
    #[serde(default)]
    pub total_orders: Option<i64>,
    #[serde(default, deserialize_with = "super::amount::deserialize_optional")]
    pub total_revenue: Option<String>,
    #[serde(default, deserialize_with = "super::amount::deserialize_optional")]
    pub avg_order_value: Option<String>,
}
