use crate::models::Product;
use crate::services::ProductDialog;

use super::{money, row};

pub fn render_products(products: &[Product]) -> String {
    let mut lines = vec![format!("Products ({})", products.len())];

    if products.is_empty() {
        lines.push("No products yet".to_string());
        lines.push("Add your first product to start selling".to_string());
        return lines.join("\n");
    }

    for product in products {
        let badge = if product.is_available { "Available" } else { "Unavailable" };
        lines.push(format!("#{} {} [{}]", product.id, product.name, badge));
        if let Some(description) = product.description.as_deref().filter(|d| !d.is_empty()) {
            lines.push(format!("   {}", description));
        }
        lines.push(format!(
            "   {} · {} min",
            money(&product.price),
            product.prep_time_minutes
        ));
    }

    lines.join("\n")
}

pub fn render_product_dialog(dialog: &ProductDialog) -> String {
    let form = &dialog.form;
    [
        dialog.title().to_string(),
        row("Product Name", &form.name),
        row("Description", &form.description),
        row("Price ($)", &form.price),
        row("Prep Time", &form.prep_time_minutes),
        row("Available", if form.is_available { "yes" } else { "no" }),
    ]
    .join("\n")
}
