use std::sync::Arc;
use async_trait::async_trait;
use http::Method;
use tracing::{debug, info};
use crate::clients::HttpClient;
use crate::error::Result;
use crate::models::{
    Analytics, Order, OrderStatus, Product, ProductInput, ShopUpdate, StatusChange, Vendor,
};

pub const SHOP_PATH: &str = "/api/vendor-admin/shop";
pub const PRODUCTS_PATH: &str = "/api/vendor-admin/products";
pub const ORDERS_PATH: &str = "/api/vendor-admin/orders";
pub const ANALYTICS_PATH: &str = "/api/vendor-admin/analytics";

pub fn product_path(id: i64) -> String {
    format!("{}/{}", PRODUCTS_PATH, id)
}

pub fn order_status_path(id: i64) -> String {
    format!("/api/orders/{}/status", id)
}

/// The backend calls the admin screen depends on.
#[async_trait]
pub trait VendorAdminApi: Send + Sync {
    async fn fetch_shop(&self) -> Result<Option<Vendor>>;
    async fn update_shop(&self, update: &ShopUpdate) -> Result<()>;
    async fn list_products(&self) -> Result<Vec<Product>>;
    async fn create_product(&self, input: &ProductInput) -> Result<()>;
    async fn update_product(&self, id: i64, input: &ProductInput) -> Result<()>;
    async fn delete_product(&self, id: i64) -> Result<()>;
    async fn list_orders(&self) -> Result<Vec<Order>>;
    async fn set_order_status(&self, id: i64, status: OrderStatus) -> Result<()>;
    async fn fetch_analytics(&self) -> Result<Analytics>;
}

#[derive(Clone)]
pub struct ApiService {
    client: Arc<HttpClient>,
}

impl ApiService {
    pub fn new(client: Arc<HttpClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl VendorAdminApi for ApiService {
    async fn fetch_shop(&self) -> Result<Option<Vendor>> {
        let shop: Option<Vendor> = self.client.get_optional_json(SHOP_PATH).await?;
        debug!(found = shop.is_some(), "Fetched shop");
        Ok(shop)
    }

    async fn update_shop(&self, update: &ShopUpdate) -> Result<()> {
        self.client.send_json(Method::PUT, SHOP_PATH, Some(update)).await?;
        info!(is_open = ?update.is_open, "Shop updated");
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        let products: Vec<Product> = self.client.get_json(PRODUCTS_PATH).await?;
        debug!(count = products.len(), "Fetched products");
        Ok(products)
    }

    async fn create_product(&self, input: &ProductInput) -> Result<()> {
        self.client.send_json(Method::POST, PRODUCTS_PATH, Some(input)).await?;
        info!(name = %input.name, "Product created");
        Ok(())
    }

    async fn update_product(&self, id: i64, input: &ProductInput) -> Result<()> {
        self.client.send_json(Method::PUT, &product_path(id), Some(input)).await?;
        info!(product_id = id, "Product updated");
        Ok(())
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        self.client.send_json::<()>(Method::DELETE, &product_path(id), None).await?;
        info!(product_id = id, "Product deleted");
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        let orders: Vec<Order> = self.client.get_json(ORDERS_PATH).await?;
        debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    async fn set_order_status(&self, id: i64, status: OrderStatus) -> Result<()> {
        let body = StatusChange { status };
        self.client.send_json(Method::PATCH, &order_status_path(id), Some(&body)).await?;
        info!(order_id = id, status = %status, "Order status updated");
        Ok(())
    }

    async fn fetch_analytics(&self) -> Result<Analytics> {
        self.client.get_json(ANALYTICS_PATH).await
    }
}
