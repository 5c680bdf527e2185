mod amount;
mod analytics;
mod order;
mod product;
mod vendor;

pub use analytics::Analytics;
pub use order::{Order, OrderAction, OrderStatus, StatusChange, UnknownStatus};
pub use product::{Product, ProductInput};
pub use vendor::{ShopUpdate, Vendor};
