pub mod admin;
pub mod api;

pub use admin::{Dashboard, Outcome, ProductDialog, ScreenAction, ScreenView, Tab, VendorAdminScreen};
pub use api::{ApiService, VendorAdminApi};
