use crate::models::Vendor;
use crate::services::admin::status_label;

use super::row;

/// `shop_open` is the local switch state, which may not have reached the backend yet.
pub fn render_settings(vendor: &Vendor, shop_open: bool) -> String {
    [
        row("Shop Status", status_label(shop_open)),
        "  Toggle your shop open or closed".to_string(),
        String::new(),
        "Shop Details".to_string(),
        row("Shop Name", &vendor.name),
        row("Description", vendor.description.as_deref().unwrap_or_default()),
        row("Location", &vendor.location),
        row("Delivery Time", vendor.delivery_time.as_deref().unwrap_or_default()),
    ]
    .join("\n")
}
