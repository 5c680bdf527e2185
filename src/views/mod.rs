//! Plain-text rendering of the admin screen for the terminal.

mod orders;
mod overview;
mod products;
mod settings;

pub use orders::{render_orders, render_orders_with};
pub use overview::render_overview;
pub use products::{render_product_dialog, render_products};
pub use settings::render_settings;

use crate::forms::FieldErrors;
use crate::notifications::Notification;
use crate::services::{Dashboard, ScreenView, Tab};

pub(crate) fn money(amount: &str) -> String {
    format!("${}", amount)
}

pub(crate) fn row(label: &str, value: &str) -> String {
    format!("  {:<14} {}", label, value)
}

pub fn render_header(view: &ScreenView) -> String {
    match view {
        ScreenView::NoShop { .. } => "Vendor Admin".to_string(),
        ScreenView::Dashboard(dashboard) => {
            format!("{}\nVendor Dashboard", dashboard.vendor.name)
        }
    }
}

pub fn render_tab_bar(view: &ScreenView, active: Tab) -> String {
    view.tabs()
        .iter()
        .map(|tab| {
            if *tab == active {
                format!("[{}]", tab.label())
            } else {
                tab.label().to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

pub fn render_tab(dashboard: &Dashboard, tab: Tab) -> String {
    match tab {
        Tab::Overview => render_overview(dashboard),
        Tab::Products => render_products(&dashboard.products),
        Tab::Orders => render_orders(&dashboard.orders),
        Tab::Settings => render_settings(&dashboard.vendor, dashboard.shop_open),
    }
}

/// Full screen: header, then either the no-shop card or the tab bar and active tab.
pub fn render_screen(view: &ScreenView, active: Tab) -> String {
    let mut sections = vec![render_header(view)];

    match view {
        ScreenView::NoShop { actions } => {
            sections.push("No Shop Found".to_string());
            sections.push(
                "You don't have a shop yet. Apply to become a vendor and start selling."
                    .to_string(),
            );
            for action in actions {
                sections.push(format!("→ {} ({})", action.label(), action.route()));
            }
        }
        ScreenView::Dashboard(dashboard) => {
            sections.push(render_tab_bar(view, active));
            sections.push(render_tab(dashboard, active));
        }
    }

    sections.join("\n\n")
}

pub fn render_notifications(notifications: &[Notification]) -> String {
    notifications
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_field_errors(errors: &FieldErrors) -> String {
    errors
        .iter()
        .map(|(field, message)| format!("  {}: {}", field, message))
        .collect::<Vec<_>>()
        .join("\n")
}
