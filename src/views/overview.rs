use crate::services::admin::status_label;
use crate::services::Dashboard;

use super::{money, row};

pub fn render_overview(dashboard: &Dashboard) -> String {
    let analytics = dashboard.analytics.clone().unwrap_or_default();
    let vendor = &dashboard.vendor;

    let total_orders = analytics.total_orders.unwrap_or(0).to_string();
    let revenue = non_empty_or(analytics.total_revenue.as_deref(), "0.00");
    let average = non_empty_or(analytics.avg_order_value.as_deref(), "0.00");

    [
        row("Total Orders", &total_orders),
        row("Revenue", &money(revenue)),
        row("Avg Order", &money(average)),
        row("Shop Status", status_label(vendor.is_open)),
        String::new(),
        "Shop Details".to_string(),
        row("Name", &vendor.name),
        row("Location", &vendor.location),
        row("Delivery Time", vendor.delivery_time.as_deref().unwrap_or_default()),
        row("Rating", vendor.rating.as_deref().unwrap_or_default()),
    ]
    .join("\n")
}

/// A bare `0` (numeric zero from the backend) falls back like a missing value.
fn non_empty_or<'a>(value: Option<&'a str>, fallback: &'a str) -> &'a str {
    value.filter(|v| !v.is_empty() && *v != "0").unwrap_or(fallback)
}
