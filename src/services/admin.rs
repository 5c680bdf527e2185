use tracing::{error, info, warn};
use crate::error::{Error, Result};
use crate::forms::{ProductForm, ShopForm};
use crate::models::{Analytics, Order, OrderStatus, Product, ShopUpdate, Vendor};
use crate::notifications::{Notification, Notifications};
use crate::services::api::VendorAdminApi;
use crate::storage::{QueryCache, QueryKey};

pub const PROFILE_ROUTE: &str = "/profile";
pub const BECOME_VENDOR_ROUTE: &str = "/become-vendor";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Overview,
    Products,
    Orders,
    Settings,
}

impl Tab {
    pub const ALL: [Tab; 4] = [Tab::Overview, Tab::Products, Tab::Orders, Tab::Settings];

    pub fn label(self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Products => "Products",
            Tab::Orders => "Orders",
            Tab::Settings => "Settings",
        }
    }
}

/// Navigation offered when the current user has no shop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreenAction {
    BecomeVendor,
}

impl ScreenAction {
    pub fn route(self) -> &'static str {
        match self {
            ScreenAction::BecomeVendor => BECOME_VENDOR_ROUTE,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScreenAction::BecomeVendor => "Become a Vendor",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Dashboard {
    pub vendor: Vendor,
    pub products: Vec<Product>,
    pub orders: Vec<Order>,
    pub analytics: Option<Analytics>,
    /// Local switch state; may run ahead of `vendor.is_open`.
    pub shop_open: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ScreenView {
    NoShop { actions: Vec<ScreenAction> },
    Dashboard(Box<Dashboard>),
}

impl ScreenView {
    pub fn tabs(&self) -> &'static [Tab] {
        match self {
            ScreenView::NoShop { .. } => &[],
            ScreenView::Dashboard(_) => &Tab::ALL,
        }
    }

    pub fn actions(&self) -> &[ScreenAction] {
        match self {
            ScreenView::NoShop { actions } => actions,
            ScreenView::Dashboard(_) => &[],
        }
    }

    pub fn back_route(&self) -> &'static str {
        PROFILE_ROUTE
    }

    pub fn dashboard(&self) -> Option<&Dashboard> {
        match self {
            ScreenView::Dashboard(dashboard) => Some(dashboard),
            ScreenView::NoShop { .. } => None,
        }
    }
}

/// Whether a user action reached the backend successfully. Failures have
/// already been reported through a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Failed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductDialog {
    pub editing: Option<Product>,
    pub form: ProductForm,
}

impl ProductDialog {
    pub fn title(&self) -> &'static str {
        if self.editing.is_some() { "Edit Product" } else { "Add Product" }
    }

    pub fn submit_label(&self) -> &'static str {
        if self.editing.is_some() { "Update" } else { "Create" }
    }
}

pub struct VendorAdminScreen<A> {
    api: A,
    cache: QueryCache,
    shop_open: Option<bool>,
    dialog: Option<ProductDialog>,
    notifications: Notifications,
}

impl<A: VendorAdminApi> VendorAdminScreen<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            cache: QueryCache::new(),
            shop_open: None,
            dialog: None,
            notifications: Notifications::default(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    /// Fetches whatever is stale and builds the view. Product, order and
    /// analytics queries only run once a shop exists.
    pub async fn load(&mut self) -> Result<ScreenView> {
        let api = &self.api;
        let vendor = self.cache.shop.get_or_fetch(|| api.fetch_shop()).await?;

        let Some(vendor) = vendor else {
            info!("No shop for current user");
            self.shop_open = None;
            self.dialog = None;
            return Ok(ScreenView::NoShop {
                actions: vec![ScreenAction::BecomeVendor],
            });
        };

        let shop_open = *self.shop_open.get_or_insert(vendor.is_open);

        let QueryCache { products, orders, analytics, .. } = &mut self.cache;
        let (products_result, orders_result, analytics_result) = tokio::join!(
            products.get_or_fetch(|| api.list_products()),
            orders.get_or_fetch(|| api.list_orders()),
            analytics.get_or_fetch(|| api.fetch_analytics()),
        );

        let products = products_result.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load products");
            self.cache.products.peek().cloned().unwrap_or_default()
        });
        let orders = orders_result.unwrap_or_else(|e| {
            warn!(error = %e, "Failed to load orders");
            self.cache.orders.peek().cloned().unwrap_or_default()
        });
        let analytics = match analytics_result {
            Ok(analytics) => Some(analytics),
            Err(e) => {
                warn!(error = %e, "Failed to load analytics");
                self.cache.analytics.peek().cloned()
            }
        };

        Ok(ScreenView::Dashboard(Box::new(Dashboard {
            vendor,
            products,
            orders,
            analytics,
            shop_open,
        })))
    }

    pub fn shop_open(&self) -> Option<bool> {
        self.shop_open
    }

    pub fn shop_status_label(&self) -> &'static str {
        status_label(self.shop_open.unwrap_or(false))
    }

    /// Flips the local switch right away and returns the update to send.
    pub fn switch_shop_open(&mut self, open: bool) -> ShopUpdate {
        self.shop_open = Some(open);
        ShopUpdate::open(open)
    }

    pub async fn commit_shop_toggle(&mut self, update: ShopUpdate) -> Outcome {
        match self.api.update_shop(&update).await {
            Ok(()) => {
                self.cache.invalidate(QueryKey::Shop);
                let title = if update.is_open.unwrap_or(false) {
                    "Shop is now open"
                } else {
                    "Shop is now closed"
                };
                self.notify(Notification::success(title));
                Outcome::Applied
            }
            Err(e) => self.fail("Failed to update shop", e),
        }
    }

    pub async fn toggle_shop_open(&mut self, open: bool) -> Outcome {
        let update = self.switch_shop_open(open);
        self.commit_shop_toggle(update).await
    }

    pub async fn save_shop(&mut self, form: &ShopForm) -> Result<Outcome> {
        let update = form.submit().map_err(Error::Validation)?;

        Ok(match self.api.update_shop(&update).await {
            Ok(()) => {
                self.cache.invalidate(QueryKey::Shop);
                self.notify(Notification::success("Shop updated successfully"));
                Outcome::Applied
            }
            Err(e) => self.fail("Failed to update shop", e),
        })
    }

    pub fn open_add_product(&mut self) -> &mut ProductDialog {
        self.dialog.insert(ProductDialog {
            editing: None,
            form: ProductForm::default(),
        })
    }

    pub fn open_edit_product(&mut self, id: i64) -> Result<&mut ProductDialog> {
        let product = self
            .cache
            .products
            .peek()
            .and_then(|products| products.iter().find(|p| p.id == id))
            .cloned()
            .ok_or(Error::ProductNotFound(id))?;

        Ok(self.dialog.insert(ProductDialog {
            form: ProductForm::from_product(&product),
            editing: Some(product),
        }))
    }

    pub fn product_dialog(&self) -> Option<&ProductDialog> {
        self.dialog.as_ref()
    }

    pub fn product_form_mut(&mut self) -> Option<&mut ProductForm> {
        self.dialog.as_mut().map(|dialog| &mut dialog.form)
    }

    pub fn close_product_dialog(&mut self) {
        self.dialog = None;
    }

    /// Creates or updates depending on whether the dialog was opened for
    /// editing. The dialog stays open with its input when the request fails.
    pub async fn submit_product_dialog(&mut self) -> Result<Outcome> {
        let dialog = self.dialog.as_ref().ok_or(Error::NoProductDialog)?;
        let input = dialog.form.submit().map_err(Error::Validation)?;
        let editing = dialog.editing.as_ref().map(|product| product.id);

        let (result, success, failure) = match editing {
            Some(id) => (
                self.api.update_product(id, &input).await,
                "Product updated successfully",
                "Failed to update product",
            ),
            None => (
                self.api.create_product(&input).await,
                "Product created successfully",
                "Failed to create product",
            ),
        };

        Ok(match result {
            Ok(()) => {
                self.cache.invalidate(QueryKey::Products);
                self.dialog = None;
                self.notify(Notification::success(success));
                Outcome::Applied
            }
            Err(e) => self.fail(failure, e),
        })
    }

    pub async fn delete_product(&mut self, id: i64) -> Outcome {
        match self.api.delete_product(id).await {
            Ok(()) => {
                self.cache.invalidate(QueryKey::Products);
                self.notify(Notification::success("Product deleted"));
                Outcome::Applied
            }
            Err(e) => self.fail("Failed to delete product", e),
        }
    }

    pub async fn advance_order(&mut self, id: i64) -> Result<Outcome> {
        let status = self.order_status(id)?;
        let next = status.next().ok_or(Error::ActionUnavailable {
            order_id: id,
            status,
            action: "advance",
        })?;
        Ok(self.set_order_status(id, next).await)
    }

    pub async fn cancel_order(&mut self, id: i64) -> Result<Outcome> {
        let status = self.order_status(id)?;
        if !status.can_cancel() {
            return Err(Error::ActionUnavailable {
                order_id: id,
                status,
                action: "cancel",
            });
        }
        Ok(self.set_order_status(id, OrderStatus::Cancelled).await)
    }

    pub fn drain_notifications(&mut self) -> Vec<Notification> {
        self.notifications.drain()
    }

    fn order_status(&self, id: i64) -> Result<OrderStatus> {
        self.cache
            .orders
            .peek()
            .and_then(|orders| orders.iter().find(|o| o.id == id))
            .map(|order| order.status)
            .ok_or(Error::OrderNotFound(id))
    }

    async fn set_order_status(&mut self, id: i64, status: OrderStatus) -> Outcome {
        match self.api.set_order_status(id, status).await {
            Ok(()) => {
                self.cache.invalidate(QueryKey::Orders);
                self.cache.invalidate(QueryKey::Analytics);
                self.notify(Notification::success("Order updated"));
                Outcome::Applied
            }
            Err(e) => self.fail("Failed to update order", e),
        }
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    fn fail(&mut self, title: &str, e: Error) -> Outcome {
        error!(error = %e, "{}", title);
        self.notify(Notification::failure(title));
        Outcome::Failed
    }
}

pub fn status_label(open: bool) -> &'static str {
    if open { "Open" } else { "Closed" }
}
