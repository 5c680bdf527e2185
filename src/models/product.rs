use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "super::amount::deserialize")]
    pub price: String,
    #[serde(default)]
    pub prep_time_minutes: i64,
    #[serde(default)]
    pub is_available: bool,
}

/// Body of the product create/update calls.
///
/// `description` always serializes, as `null` when cleared.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub name: String,
    pub description: Option<String>,
    pub price: String,
    pub prep_time_minutes: i64,
    pub is_available: bool,
}
