pub mod cache;

pub use cache::{QueryCache, QueryKey, Slot};
