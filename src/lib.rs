pub mod clients;
pub mod config;
pub mod error;
pub mod forms;
pub mod models;
pub mod notifications;
pub mod services;
pub mod storage;
pub mod utils;
pub mod views;

pub use error::{Error, Result};
pub use services::{ApiService, VendorAdminApi, VendorAdminScreen};
