use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use vendor_admin::models::{
    Analytics, Order, OrderStatus, Product, ProductInput, ShopUpdate, Vendor,
};
use vendor_admin::notifications::Notification;
use vendor_admin::services::{Outcome, ScreenAction, ScreenView, Tab, VendorAdminScreen};
use vendor_admin::storage::QueryKey;
use vendor_admin::{Error, Result, VendorAdminApi};

#[derive(Debug, Clone, PartialEq)]
enum Call {
    FetchShop,
    UpdateShop(ShopUpdate),
    ListProducts,
    CreateProduct(ProductInput),
    UpdateProduct(i64, ProductInput),
    DeleteProduct(i64),
    ListOrders,
    SetOrderStatus(i64, OrderStatus),
    FetchAnalytics,
}

/// In-memory backend that records every call and applies mutations.
#[derive(Default)]
struct FakeBackend {
    shop: Mutex<Option<Vendor>>,
    products: Mutex<Vec<Product>>,
    orders: Mutex<Vec<Order>>,
    calls: Mutex<Vec<Call>>,
    fail_mutations: AtomicBool,
    fail_lists: AtomicBool,
}

impl FakeBackend {
    fn with_shop() -> Self {
        let backend = FakeBackend::default();
        *backend.shop.lock().unwrap() = Some(Vendor {
            id: Some(3),
            name: "Corner Deli".to_string(),
            description: None,
            location: "Main St".to_string(),
            delivery_time: Some("15-25 min".to_string()),
            rating: Some("4.5".to_string()),
            is_open: true,
        });
        *backend.products.lock().unwrap() = vec![Product {
            id: 7,
            name: "Tea".to_string(),
            description: Some("Black".to_string()),
            price: "1.20".to_string(),
            prep_time_minutes: 3,
            is_available: true,
        }];
        *backend.orders.lock().unwrap() = vec![
            order(41, OrderStatus::Pending),
            order(42, OrderStatus::Preparing),
            order(43, OrderStatus::Completed),
        ];
        backend
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    fn count(&self, wanted: &Call) -> usize {
        self.calls().iter().filter(|call| *call == wanted).count()
    }

    fn mutation_result(&self) -> Result<()> {
        if self.fail_mutations.load(Ordering::SeqCst) {
            Err(Error::Status {
                status: 500,
                body: "Internal Server Error".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

fn order(id: i64, status: OrderStatus) -> Order {
    Order {
        id,
        status,
        total_amount: "23.40".to_string(),
        created_at: Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap(),
    }
}

#[async_trait]
impl VendorAdminApi for FakeBackend {
    async fn fetch_shop(&self) -> Result<Option<Vendor>> {
        self.record(Call::FetchShop);
        Ok(self.shop.lock().unwrap().clone())
    }

    async fn update_shop(&self, update: &ShopUpdate) -> Result<()> {
        self.record(Call::UpdateShop(update.clone()));
        self.mutation_result()?;
        if let Some(shop) = self.shop.lock().unwrap().as_mut() {
            if let Some(open) = update.is_open {
                shop.is_open = open;
            }
            if let Some(name) = &update.name {
                shop.name = name.clone();
            }
        }
        Ok(())
    }

    async fn list_products(&self) -> Result<Vec<Product>> {
        self.record(Call::ListProducts);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(Error::RateLimit);
        }
        Ok(self.products.lock().unwrap().clone())
    }

    async fn create_product(&self, input: &ProductInput) -> Result<()> {
        self.record(Call::CreateProduct(input.clone()));
        self.mutation_result()?;
        let mut products = self.products.lock().unwrap();
        let id = products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        products.push(Product {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
            price: input.price.clone(),
            prep_time_minutes: input.prep_time_minutes,
            is_available: input.is_available,
        });
        Ok(())
    }

    async fn update_product(&self, id: i64, input: &ProductInput) -> Result<()> {
        self.record(Call::UpdateProduct(id, input.clone()));
        self.mutation_result()
    }

    async fn delete_product(&self, id: i64) -> Result<()> {
        self.record(Call::DeleteProduct(id));
        self.mutation_result()?;
        self.products.lock().unwrap().retain(|p| p.id != id);
        Ok(())
    }

    async fn list_orders(&self) -> Result<Vec<Order>> {
        self.record(Call::ListOrders);
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(Error::RateLimit);
        }
        Ok(self.orders.lock().unwrap().clone())
    }

    async fn set_order_status(&self, id: i64, status: OrderStatus) -> Result<()> {
        self.record(Call::SetOrderStatus(id, status));
        self.mutation_result()?;
        for order in self.orders.lock().unwrap().iter_mut().filter(|o| o.id == id) {
            order.status = status;
        }
        Ok(())
    }

    async fn fetch_analytics(&self) -> Result<Analytics> {
        self.record(Call::FetchAnalytics);
        Ok(Analytics {
            total_orders: Some(3),
            total_revenue: Some("70.20".to_string()),
            avg_order_value: Some("23.40".to_string()),
        })
    }
}

async fn loaded_screen() -> VendorAdminScreen<FakeBackend> {
    let mut screen = VendorAdminScreen::new(FakeBackend::with_shop());
    screen.load().await.unwrap();
    screen
}

#[tokio::test]
async fn without_shop_only_vendor_application_is_offered() {
    let mut screen = VendorAdminScreen::new(FakeBackend::default());

    let view = screen.load().await.unwrap();

    assert_eq!(view.actions(), &[ScreenAction::BecomeVendor]);
    assert_eq!(view.actions()[0].route(), "/become-vendor");
    assert!(view.tabs().is_empty());
    assert!(view.dashboard().is_none());
    assert_eq!(view.back_route(), "/profile");
    // product, order and analytics queries stay disabled
    assert_eq!(screen.api().calls(), vec![Call::FetchShop]);
}

#[tokio::test]
async fn dashboard_loads_every_query_once() {
    let mut screen = VendorAdminScreen::new(FakeBackend::with_shop());

    let view = screen.load().await.unwrap();
    let dashboard = view.dashboard().unwrap();

    assert_eq!(view.tabs(), &Tab::ALL);
    assert_eq!(Tab::default(), Tab::Overview);
    assert_eq!(dashboard.products.len(), 1);
    assert_eq!(dashboard.orders.len(), 3);
    assert_eq!(dashboard.analytics.as_ref().unwrap().total_orders, Some(3));
    assert!(dashboard.shop_open);

    screen.load().await.unwrap();
    let api = screen.api();
    assert_eq!(api.count(&Call::FetchShop), 1);
    assert_eq!(api.count(&Call::ListProducts), 1);
    assert_eq!(api.count(&Call::ListOrders), 1);
    assert_eq!(api.count(&Call::FetchAnalytics), 1);
}

#[tokio::test]
async fn failed_secondary_query_degrades_to_empty_list() {
    let backend = FakeBackend::with_shop();
    backend.fail_lists.store(true, Ordering::SeqCst);
    let mut screen = VendorAdminScreen::new(backend);

    let view = screen.load().await.unwrap();
    let dashboard = view.dashboard().unwrap();

    assert!(dashboard.products.is_empty());
    assert!(dashboard.orders.is_empty());
    assert!(dashboard.analytics.is_some());
}

#[tokio::test]
async fn shop_toggle_is_reflected_before_backend_confirms() {
    let mut screen = loaded_screen().await;
    assert_eq!(screen.shop_status_label(), "Open");

    let update = screen.switch_shop_open(false);

    assert_eq!(screen.shop_status_label(), "Closed");
    assert_eq!(screen.api().count(&Call::UpdateShop(ShopUpdate::open(false))), 0);

    let outcome = screen.commit_shop_toggle(update).await;

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(screen.api().count(&Call::UpdateShop(ShopUpdate::open(false))), 1);
    assert_eq!(
        screen.drain_notifications(),
        vec![Notification::success("Shop is now closed")]
    );
    assert!(!screen.cache().is_fresh(QueryKey::Shop));
    assert!(screen.cache().is_fresh(QueryKey::Products));

    let view = screen.load().await.unwrap();
    assert!(!view.dashboard().unwrap().shop_open);
    assert!(!view.dashboard().unwrap().vendor.is_open);
    assert_eq!(screen.api().count(&Call::FetchShop), 2);
    assert_eq!(screen.api().count(&Call::ListProducts), 1);
}

#[tokio::test]
async fn failed_toggle_notifies_once_and_keeps_local_state() {
    let mut screen = loaded_screen().await;
    screen.api().fail_mutations.store(true, Ordering::SeqCst);

    let outcome = screen.toggle_shop_open(false).await;

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(screen.shop_status_label(), "Closed");
    let notifications = screen.drain_notifications();
    assert_eq!(notifications.len(), 1);
    assert!(notifications[0].is_failure());
    assert_eq!(screen.api().count(&Call::UpdateShop(ShopUpdate::open(false))), 1);
}

#[tokio::test]
async fn adding_product_sends_defaults_and_refetches_products() {
    let mut screen = loaded_screen().await;

    let dialog = screen.open_add_product();
    assert_eq!(dialog.title(), "Add Product");
    assert_eq!(dialog.submit_label(), "Create");
    dialog.form.name = "Lentil soup".to_string();
    dialog.form.price = "5.25".to_string();
    dialog.form.prep_time_minutes = "about ten".to_string();

    let outcome = screen.submit_product_dialog().await.unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert!(screen.product_dialog().is_none());
    assert_eq!(
        screen.api().calls().last(),
        Some(&Call::CreateProduct(ProductInput {
            name: "Lentil soup".to_string(),
            description: None,
            price: "5.25".to_string(),
            prep_time_minutes: 10,
            is_available: true,
        }))
    );
    assert_eq!(
        screen.drain_notifications(),
        vec![Notification::success("Product created successfully")]
    );

    let view = screen.load().await.unwrap();
    assert_eq!(view.dashboard().unwrap().products.len(), 2);
    assert_eq!(screen.api().count(&Call::ListProducts), 2);
    assert_eq!(screen.api().count(&Call::ListOrders), 1);
}

#[tokio::test]
async fn invalid_product_form_is_not_submitted() {
    let mut screen = loaded_screen().await;
    screen.open_add_product();
    let before = screen.api().calls().len();

    let err = screen.submit_product_dialog().await.unwrap_err();

    match err {
        Error::Validation(errors) => {
            assert_eq!(errors.get("name"), Some("Name is required"));
            assert_eq!(errors.get("price"), Some("Price is required"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(screen.api().calls().len(), before);
    assert!(screen.product_dialog().is_some());
}

#[tokio::test]
async fn editing_product_prefills_and_updates_by_id() {
    let mut screen = loaded_screen().await;

    let dialog = screen.open_edit_product(7).unwrap();
    assert_eq!(dialog.title(), "Edit Product");
    assert_eq!(dialog.form.prep_time_minutes, "3");
    dialog.form.price = "1.50".to_string();
    dialog.form.description.clear();

    screen.submit_product_dialog().await.unwrap();

    assert_eq!(
        screen.api().calls().last(),
        Some(&Call::UpdateProduct(
            7,
            ProductInput {
                name: "Tea".to_string(),
                description: None,
                price: "1.50".to_string(),
                prep_time_minutes: 3,
                is_available: true,
            }
        ))
    );
    assert_eq!(
        screen.drain_notifications(),
        vec![Notification::success("Product updated successfully")]
    );
}

#[tokio::test]
async fn editing_unknown_product_fails_locally() {
    let mut screen = loaded_screen().await;
    assert!(matches!(
        screen.open_edit_product(99),
        Err(Error::ProductNotFound(99))
    ));
}

#[tokio::test]
async fn failed_create_keeps_dialog_open() {
    let mut screen = loaded_screen().await;
    screen.api().fail_mutations.store(true, Ordering::SeqCst);
    let form = &mut screen.open_add_product().form;
    form.name = "Scone".to_string();
    form.price = "2.00".to_string();

    let outcome = screen.submit_product_dialog().await.unwrap();

    assert_eq!(outcome, Outcome::Failed);
    assert_eq!(screen.product_dialog().unwrap().form.name, "Scone");
    assert_eq!(
        screen.drain_notifications(),
        vec![Notification::failure("Failed to create product")]
    );
    assert!(screen.cache().is_fresh(QueryKey::Products));
}

#[tokio::test]
async fn deleting_product_invalidates_catalog() {
    let mut screen = loaded_screen().await;

    assert_eq!(screen.delete_product(7).await, Outcome::Applied);
    assert_eq!(
        screen.drain_notifications(),
        vec![Notification::success("Product deleted")]
    );

    let view = screen.load().await.unwrap();
    assert!(view.dashboard().unwrap().products.is_empty());
}

#[tokio::test]
async fn advancing_order_refetches_orders_and_analytics() {
    let mut screen = loaded_screen().await;

    let outcome = screen.advance_order(42).await.unwrap();

    assert_eq!(outcome, Outcome::Applied);
    assert_eq!(screen.api().count(&Call::SetOrderStatus(42, OrderStatus::Ready)), 1);
    assert!(!screen.cache().is_fresh(QueryKey::Orders));
    assert!(!screen.cache().is_fresh(QueryKey::Analytics));
    assert!(screen.cache().is_fresh(QueryKey::Products));
    assert_eq!(
        screen.drain_notifications(),
        vec![Notification::success("Order updated")]
    );

    let view = screen.load().await.unwrap();
    let advanced = view
        .dashboard()
        .unwrap()
        .orders
        .iter()
        .find(|o| o.id == 42)
        .unwrap();
    assert_eq!(advanced.status, OrderStatus::Ready);
    assert_eq!(screen.api().count(&Call::FetchAnalytics), 2);
    assert_eq!(screen.api().count(&Call::ListProducts), 1);
}

#[tokio::test]
async fn only_pending_orders_can_be_cancelled() {
    let mut screen = loaded_screen().await;

    assert!(matches!(
        screen.cancel_order(42).await,
        Err(Error::ActionUnavailable { order_id: 42, status: OrderStatus::Preparing, .. })
    ));
    assert_eq!(screen.cancel_order(41).await.unwrap(), Outcome::Applied);
    assert_eq!(
        screen.api().count(&Call::SetOrderStatus(41, OrderStatus::Cancelled)),
        1
    );
}

#[tokio::test]
async fn terminal_orders_cannot_advance() {
    let mut screen = loaded_screen().await;

    assert!(matches!(
        screen.advance_order(43).await,
        Err(Error::ActionUnavailable { status: OrderStatus::Completed, .. })
    ));
    assert!(matches!(
        screen.advance_order(404).await,
        Err(Error::OrderNotFound(404))
    ));
    assert!(screen
        .api()
        .calls()
        .iter()
        .all(|call| !matches!(call, Call::SetOrderStatus(..))));
}

#[tokio::test]
async fn saving_shop_validates_then_puts_full_form() {
    let mut screen = loaded_screen().await;
    let view = screen.load().await.unwrap();
    let vendor = view.dashboard().unwrap().vendor.clone();

    let mut form = vendor_admin::forms::ShopForm::from_vendor(&vendor);
    form.location.clear();
    assert!(matches!(
        screen.save_shop(&form).await,
        Err(Error::Validation(_))
    ));

    form.location = "Harbour Rd".to_string();
    form.name = "Harbour Deli".to_string();
    assert_eq!(screen.save_shop(&form).await.unwrap(), Outcome::Applied);
    assert_eq!(
        screen.drain_notifications(),
        vec![Notification::success("Shop updated successfully")]
    );

    let view = screen.load().await.unwrap();
    assert_eq!(view.dashboard().unwrap().vendor.name, "Harbour Deli");
    assert!(matches!(view, ScreenView::Dashboard(_)));
}
