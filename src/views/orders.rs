use chrono::{DateTime, Utc};
use crate::models::Order;
use crate::utils::format_local;

use super::money;

pub fn render_orders(orders: &[Order]) -> String {
    render_orders_with(orders, format_local)
}

/// Same as [`render_orders`] with a caller-supplied timestamp format.
pub fn render_orders_with<F>(orders: &[Order], format_time: F) -> String
where
    F: Fn(DateTime<Utc>) -> String,
{
    let mut lines = vec![format!("Orders ({})", orders.len())];

    if orders.is_empty() {
        lines.push("No orders yet".to_string());
        return lines.join("\n");
    }

    for order in orders {
        lines.push(format!(
            "Order #{} [{}] {}",
            order.id,
            order.status,
            money(&order.total_amount)
        ));
        lines.push(format!("   {}", format_time(order.created_at)));

        let actions = order.status.actions();
        if !actions.is_empty() {
            let labels: Vec<String> = actions.iter().map(ToString::to_string).collect();
            lines.push(format!("   Actions: {}", labels.join(" | ")));
        }
    }

    lines.join("\n")
}
