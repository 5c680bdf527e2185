use thiserror::Error;

use crate::forms::FieldErrors;
use crate::models::OrderStatus;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("HTTP error: {0}")]
    Http(#[from] rquest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Unauthorized - sign in required")]
    Unauthorized,

    #[error("Forbidden - Access denied")]
    Forbidden,

    #[error("Rate limit exceeded")]
    RateLimit,

    /// Any other non-2xx response, rendered the way the backend reports it.
    #[error("{status}: {body}")]
    Status { status: u16, body: String },

    #[error("Validation failed: {0}")]
    Validation(FieldErrors),

    #[error("Product {0} not found")]
    ProductNotFound(i64),

    #[error("Order {0} not found")]
    OrderNotFound(i64),

    #[error("Order {order_id} is {status}; cannot {action}")]
    ActionUnavailable {
        order_id: i64,
        status: OrderStatus,
        action: &'static str,
    },

    #[error("No shop found for the current user")]
    NoShop,

    #[error("Product dialog is not open")]
    NoProductDialog,
}
