//! Request cache for the admin screen.
//!
//! One slot per GET endpoint. Mutations mark the slots they affect stale and
//! the next read refetches them; fresh slots are served without a request.

use std::future::Future;
use chrono::{DateTime, Utc};
use tracing::debug;
use crate::error::Result;
use crate::models::{Analytics, Order, Product, Vendor};
use crate::services::api::{ANALYTICS_PATH, ORDERS_PATH, PRODUCTS_PATH, SHOP_PATH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Shop,
    Products,
    Orders,
    Analytics,
}

impl QueryKey {
    pub const ALL: [QueryKey; 4] = [
        QueryKey::Shop,
        QueryKey::Products,
        QueryKey::Orders,
        QueryKey::Analytics,
    ];

    pub fn path(self) -> &'static str {
        match self {
            QueryKey::Shop => SHOP_PATH,
            QueryKey::Products => PRODUCTS_PATH,
            QueryKey::Orders => ORDERS_PATH,
            QueryKey::Analytics => ANALYTICS_PATH,
        }
    }
}

#[derive(Debug)]
pub struct Slot<T> {
    key: QueryKey,
    value: Option<T>,
    fetched_at: Option<DateTime<Utc>>,
    stale: bool,
}

impl<T: Clone> Slot<T> {
    pub fn new(key: QueryKey) -> Self {
        Self {
            key,
            value: None,
            fetched_at: None,
            stale: true,
        }
    }

    pub fn is_fresh(&self) -> bool {
        self.value.is_some() && !self.stale
    }

    pub fn peek(&self) -> Option<&T> {
        self.value.as_ref()
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.fetched_at
    }

    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn clear(&mut self) {
        self.value = None;
        self.fetched_at = None;
        self.stale = true;
    }

    /// Returns the cached value when fresh, otherwise runs `fetch` and stores
    /// its result. A failed fetch leaves the slot as it was.
    pub async fn get_or_fetch<F, Fut>(&mut self, fetch: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let (false, Some(value)) = (self.stale, self.value.as_ref()) {
            debug!(query = self.key.path(), "Cache hit");
            return Ok(value.clone());
        }

        debug!(query = self.key.path(), "Fetching");
        let value = fetch().await?;
        self.value = Some(value.clone());
        self.fetched_at = Some(Utc::now());
        self.stale = false;
        Ok(value)
    }
}

#[derive(Debug)]
pub struct QueryCache {
    pub shop: Slot<Option<Vendor>>,
    pub products: Slot<Vec<Product>>,
    pub orders: Slot<Vec<Order>>,
    pub analytics: Slot<Analytics>,
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::new()
    }
}

impl QueryCache {
    pub fn new() -> Self {
        Self {
            shop: Slot::new(QueryKey::Shop),
            products: Slot::new(QueryKey::Products),
            orders: Slot::new(QueryKey::Orders),
            analytics: Slot::new(QueryKey::Analytics),
        }
    }

    pub fn invalidate(&mut self, key: QueryKey) {
        debug!(query = key.path(), "Invalidating query");
        match key {
            QueryKey::Shop => self.shop.invalidate(),
            QueryKey::Products => self.products.invalidate(),
            QueryKey::Orders => self.orders.invalidate(),
            QueryKey::Analytics => self.analytics.invalidate(),
        }
    }

    pub fn is_fresh(&self, key: QueryKey) -> bool {
        match key {
            QueryKey::Shop => self.shop.is_fresh(),
            QueryKey::Products => self.products.is_fresh(),
            QueryKey::Orders => self.orders.is_fresh(),
            QueryKey::Analytics => self.analytics.is_fresh(),
        }
    }

    pub fn clear(&mut self) {
        self.shop.clear();
        self.products.clear();
        self.orders.clear();
        self.analytics.clear();
    }
}
