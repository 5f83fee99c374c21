//! Cart manager: the single owner of the session's cart.
//!
//! Every mutation runs the same pipeline:
//!
//! ```text
//! operation
//!   ↓
//! 1. Take the write gate (one mutation in flight at a time)
//!   ↓
//! 2. Fetch what the decision needs from the inventory service
//!   ↓
//! 3. Handle the command against the current snapshot (pure, produces events)
//!   ↓
//! 4. Apply events to a copy of the snapshot
//!   ↓
//! 5. Persist the new cart (awaited; failure aborts, nothing is swapped)
//!   ↓
//! 6. Swap the snapshot and publish it to subscribers
//! ```
//!
//! A rejected operation stops at whichever step rejected it. The cart is left
//! as it was and exactly one notice goes to the reporter.
//!
//! The gate is held across the inventory fetches, so two calls against the
//! same product cannot both read the old amount and both commit. Readers never
//! take the gate: `cart()` always returns the last committed snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::Utc;
use tokio::sync::Mutex;

use rocketcart_cart::{
    AddPlan, AppendProduct, Cart, CartCommand, CartError, CartEvent, CartOperation,
    IncrementAmount, Notice, RemoveLineItem, SetAmount,
};
use rocketcart_core::{Aggregate, AggregateRoot, ProductId};
use rocketcart_events::{Event, EventBus, Subscription};
use rocketcart_inventory::Stock;
use rocketcart_products::Product;

use crate::inventory::InventoryService;
use crate::reporter::OutcomeReporter;
use crate::storage::{CartStorage, StorageError};

pub struct CartManager<I, S, R, B> {
    inventory: I,
    storage: S,
    reporter: R,
    bus: B,
    storage_key: String,
    snapshot: RwLock<Arc<Cart>>,
    write_gate: Mutex<()>,
}

impl<I, S, R, B> CartManager<I, S, R, B>
where
    I: InventoryService,
    S: CartStorage,
    R: OutcomeReporter,
    B: EventBus<Arc<Cart>>,
{
    /// Seed the cart from `storage_key` and take ownership of the collaborators.
    ///
    /// A missing value starts an empty cart. So does a value that no longer
    /// parses; it is logged and left in place until the next commit overwrites
    /// it. Only a failing storage read is an error.
    pub async fn load(
        inventory: I,
        storage: S,
        reporter: R,
        bus: B,
        storage_key: impl Into<String>,
    ) -> Result<Self, StorageError> {
        let storage_key = storage_key.into();

        let cart = match storage.get(&storage_key).await? {
            None => Cart::new(),
            Some(raw) => match serde_json::from_str::<Cart>(&raw) {
                Ok(cart) => cart,
                Err(err) => {
                    tracing::warn!(key = %storage_key, "ignoring unreadable stored cart: {err}");
                    Cart::new()
                }
            },
        };

        tracing::info!(key = %storage_key, items = cart.len(), "cart loaded");

        Ok(Self {
            inventory,
            storage,
            reporter,
            bus,
            storage_key,
            snapshot: RwLock::new(Arc::new(cart)),
            write_gate: Mutex::new(()),
        })
    }

    /// The last committed cart.
    pub fn cart(&self) -> Arc<Cart> {
        self.snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Receive every snapshot committed from now on.
    pub fn subscribe(&self) -> Subscription<Arc<Cart>> {
        self.bus.subscribe()
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    /// Add one unit of `product_id`, appending it if it is not in the cart yet.
    pub async fn add_product(&self, product_id: ProductId) {
        if let Err(err) = self.try_add_product(product_id).await {
            self.report_failure(CartOperation::Add, &err);
        }
    }

    /// Drop the line item for `product_id`.
    pub async fn remove_product(&self, product_id: ProductId) {
        if let Err(err) = self.try_remove_product(product_id).await {
            self.report_failure(CartOperation::Remove, &err);
        }
    }

    /// Set the amount of `product_id` to exactly `amount`. Non-positive amounts are ignored.
    pub async fn update_product_amount(&self, product_id: ProductId, amount: i64) {
        if let Err(err) = self.try_update_product_amount(product_id, amount).await {
            self.report_failure(CartOperation::UpdateAmount, &err);
        }
    }

    pub async fn try_add_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let _gate = self.write_gate.lock().await;
        let base = self.cart();

        let stock = self.fetch_stock(product_id).await?;
        let occurred_at = Utc::now();

        let command = match base.plan_add(product_id, &stock)? {
            AddPlan::Increment => CartCommand::IncrementAmount(IncrementAmount {
                product_id,
                stock,
                occurred_at,
            }),
            AddPlan::Append => {
                let product = self.fetch_product(product_id).await?;
                CartCommand::AppendProduct(AppendProduct {
                    product,
                    stock,
                    occurred_at,
                })
            }
        };

        self.execute(base, command).await
    }

    pub async fn try_remove_product(&self, product_id: ProductId) -> Result<Arc<Cart>, CartError> {
        let _gate = self.write_gate.lock().await;
        let base = self.cart();

        let command = CartCommand::RemoveLineItem(RemoveLineItem {
            product_id,
            occurred_at: Utc::now(),
        });

        self.execute(base, command).await
    }

    pub async fn try_update_product_amount(
        &self,
        product_id: ProductId,
        amount: i64,
    ) -> Result<Arc<Cart>, CartError> {
        if amount <= 0 {
            tracing::debug!(%product_id, amount, "ignoring non-positive amount");
            return Ok(self.cart());
        }

        let _gate = self.write_gate.lock().await;
        let base = self.cart();

        if !base.contains(product_id) {
            return Err(CartError::NotFound(product_id));
        }

        let stock = self.fetch_stock(product_id).await?;
        let command = CartCommand::SetAmount(SetAmount {
            product_id,
            amount,
            stock,
            occurred_at: Utc::now(),
        });

        self.execute(base, command).await
    }

    async fn fetch_stock(&self, product_id: ProductId) -> Result<Stock, CartError> {
        self.inventory.stock(product_id).await.map_err(|err| {
            tracing::error!(%product_id, "stock lookup failed: {err}");
            CartError::operation_failed(err.to_string())
        })
    }

    async fn fetch_product(&self, product_id: ProductId) -> Result<Product, CartError> {
        self.inventory.product(product_id).await.map_err(|err| {
            tracing::error!(%product_id, "catalog lookup failed: {err}");
            CartError::operation_failed(err.to_string())
        })
    }

    /// Decide, evolve a copy, commit. No events means nothing to commit.
    async fn execute(&self, base: Arc<Cart>, command: CartCommand) -> Result<Arc<Cart>, CartError> {
        let events = base.handle(&command)?;
        if events.is_empty() {
            return Ok(base);
        }

        let mut next = Cart::clone(&base);
        for event in &events {
            next.apply(event);
        }

        self.commit(next, &events).await
    }

    async fn commit(&self, next: Cart, events: &[CartEvent]) -> Result<Arc<Cart>, CartError> {
        let payload = serde_json::to_string(&next)
            .map_err(|e| CartError::operation_failed(format!("failed to serialize cart: {e}")))?;

        self.storage
            .set(&self.storage_key, &payload)
            .await
            .map_err(|err| {
                tracing::error!(key = %self.storage_key, "failed to persist cart: {err}");
                CartError::operation_failed(err.to_string())
            })?;

        let next = Arc::new(next);
        *self.snapshot.write().unwrap_or_else(PoisonError::into_inner) = next.clone();

        for event in events {
            tracing::info!(
                event_type = event.event_type(),
                version = next.version(),
                items = next.len(),
                "cart committed"
            );
        }

        if let Err(err) = self.bus.publish(next.clone()) {
            tracing::error!("failed to publish cart snapshot: {err}");
        }

        Ok(next)
    }

    fn report_failure(&self, operation: CartOperation, err: &CartError) {
        tracing::warn!(%operation, "cart operation rejected: {err}");
        self.reporter.report(Notice::for_error(operation, err));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use rocketcart_cart::NoticeKind;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use rocketcart_events::{InMemoryBusError, InMemoryEventBus};
    use serde_json::{Number, Value, json};

    use crate::inventory::InMemoryInventory;
    use crate::reporter::BusReporter;
    use crate::storage::InMemoryStorage;

    const KEY: &str = "@RocketShoes:cart";

    type TestManager = CartManager<
        Arc<InMemoryInventory>,
        Arc<InMemoryStorage>,
        BusReporter<Arc<InMemoryEventBus<Notice>>>,
        Arc<InMemoryEventBus<Arc<Cart>>>,
    >;

    struct Harness {
        manager: TestManager,
        inventory: Arc<InMemoryInventory>,
        storage: Arc<InMemoryStorage>,
        notices: Subscription<Notice>,
        snapshots: Subscription<Arc<Cart>>,
    }

    fn pid(id: u64) -> ProductId {
        ProductId::new(id)
    }

    fn product(id: u64) -> Product {
        Product::new(pid(id), format!("Tênis {id}"), format!("tenis-{id}.jpg"), Number::from(139))
    }

    fn stored(items: &[(u64, u32)]) -> String {
        let items: Vec<Value> = items
            .iter()
            .map(|(id, amount)| {
                json!({
                    "id": id,
                    "title": format!("Tênis {id}"),
                    "image": format!("tenis-{id}.jpg"),
                    "price": 139,
                    "amount": amount
                })
            })
            .collect();
        Value::Array(items).to_string()
    }

    async fn harness(inventory: InMemoryInventory, storage: InMemoryStorage) -> Harness {
        let inventory = Arc::new(inventory);
        let storage = Arc::new(storage);
        let notice_bus = Arc::new(InMemoryEventBus::new());
        let notices = notice_bus.subscribe();

        let manager = CartManager::load(
            inventory.clone(),
            storage.clone(),
            BusReporter::new(notice_bus),
            Arc::new(InMemoryEventBus::new()),
            KEY,
        )
        .await
        .unwrap();
        let snapshots = manager.subscribe();

        Harness {
            manager,
            inventory,
            storage,
            notices,
            snapshots,
        }
    }

    fn amounts(cart: &Cart) -> Vec<(u64, u32)> {
        cart.items()
            .iter()
            .map(|item| (item.product_id().get(), item.amount()))
            .collect()
    }

    #[tokio::test]
    async fn load_starts_empty_without_stored_value() {
        let h = harness(InMemoryInventory::new(), InMemoryStorage::new()).await;
        assert!(h.manager.cart().is_empty());
        assert_eq!(h.manager.storage_key(), KEY);
    }

    #[tokio::test]
    async fn load_restores_stored_cart_in_order() {
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(3, 1), (1, 2)]));
        let h = harness(InMemoryInventory::new(), storage).await;
        assert_eq!(amounts(&h.manager.cart()), vec![(3, 1), (1, 2)]);
    }

    #[tokio::test]
    async fn load_ignores_unreadable_value_without_overwriting_it() {
        let storage = InMemoryStorage::new().with_entry(KEY, "{not json");
        let h = harness(InMemoryInventory::new(), storage).await;
        assert!(h.manager.cart().is_empty());
        assert_eq!(h.storage.raw(KEY).as_deref(), Some("{not json"));
        assert_eq!(h.storage.writes(), 0);
    }

    #[tokio::test]
    async fn add_new_product_appends_with_amount_one_and_commits_once() {
        let inventory = InMemoryInventory::new().with_product(product(5), 3);
        let h = harness(inventory, InMemoryStorage::new()).await;

        h.manager.add_product(pid(5)).await;

        let cart = h.manager.cart();
        assert_eq!(amounts(&cart), vec![(5, 1)]);
        assert_eq!(cart.line_item(pid(5)).unwrap().product().title(), Some("Tênis 5"));
        assert_eq!(h.storage.writes(), 1);
        assert_eq!(h.snapshots.drain().len(), 1);
        assert!(h.notices.drain().is_empty());

        let persisted: Value = serde_json::from_str(&h.storage.raw(KEY).unwrap()).unwrap();
        assert_eq!(
            persisted,
            json!([{ "id": 5, "title": "Tênis 5", "image": "tenis-5.jpg", "price": 139, "amount": 1 }])
        );
    }

    #[tokio::test]
    async fn add_existing_product_increments_without_catalog_fetch() {
        let inventory = InMemoryInventory::new().with_product(product(1), 5);
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(1, 1), (2, 1)]));
        let h = harness(inventory, storage).await;

        h.manager.add_product(pid(1)).await;

        assert_eq!(amounts(&h.manager.cart()), vec![(1, 2), (2, 1)]);
        assert_eq!(h.inventory.product_requests(), 0);
    }

    #[tokio::test]
    async fn add_beyond_stock_reports_insufficient_stock_and_changes_nothing() {
        let inventory = InMemoryInventory::new().with_product(product(1), 2);
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(1, 2)]));
        let h = harness(inventory, storage).await;
        let before = h.manager.cart();

        h.manager.add_product(pid(1)).await;

        let after = h.manager.cart();
        assert!(Arc::ptr_eq(&before, &after));
        assert_eq!(amounts(&after), vec![(1, 2)]);
        assert_eq!(h.storage.writes(), 0);
        assert!(h.snapshots.drain().is_empty());

        let notices = h.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::InsufficientStock);
        assert_eq!(notices[0].message, "Quantidade solicitada fora de estoque");
    }

    #[tokio::test]
    async fn add_out_of_stock_product_skips_catalog_fetch() {
        let inventory = InMemoryInventory::new().with_product(product(4), 0);
        let h = harness(inventory, InMemoryStorage::new()).await;

        h.manager.add_product(pid(4)).await;

        assert!(h.manager.cart().is_empty());
        assert_eq!(h.inventory.product_requests(), 0);
        let notices = h.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].message, "Produto sem estoque");
    }

    #[tokio::test]
    async fn add_with_unreachable_inventory_reports_generic_failure() {
        let inventory = InMemoryInventory::new().with_product(product(1), 5);
        inventory.set_offline(true);
        let h = harness(inventory, InMemoryStorage::new()).await;

        let err = h.manager.try_add_product(pid(1)).await.unwrap_err();
        assert!(matches!(err, CartError::OperationFailed(_)));

        h.manager.add_product(pid(1)).await;
        let notices = h.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::OperationFailed);
        assert_eq!(notices[0].message, "Erro na adição do produto");
    }

    #[tokio::test]
    async fn add_of_unknown_product_is_an_operation_failure() {
        let inventory = InMemoryInventory::new();
        inventory.set_stock(pid(8), 4);
        let h = harness(inventory, InMemoryStorage::new()).await;

        h.manager.add_product(pid(8)).await;

        assert!(h.manager.cart().is_empty());
        assert_eq!(h.inventory.product_requests(), 1);
        assert_eq!(h.notices.drain()[0].kind, NoticeKind::OperationFailed);
    }

    #[tokio::test]
    async fn removing_twice_reports_not_found_the_second_time() {
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(1, 1), (2, 3)]));
        let h = harness(InMemoryInventory::new(), storage).await;

        h.manager.remove_product(pid(1)).await;
        assert_eq!(amounts(&h.manager.cart()), vec![(2, 3)]);
        assert!(h.notices.drain().is_empty());

        let before = h.manager.cart();
        h.manager.remove_product(pid(1)).await;
        assert!(Arc::ptr_eq(&before, &h.manager.cart()));
        assert_eq!(h.storage.writes(), 1);

        let notices = h.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::NotFound);
        assert_eq!(notices[0].message, "Erro na remoção do produto");
    }

    #[tokio::test]
    async fn remove_never_consults_inventory() {
        let inventory = InMemoryInventory::new();
        inventory.set_offline(true);
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(1, 1)]));
        let h = harness(inventory, storage).await;

        h.manager.remove_product(pid(1)).await;

        assert!(h.manager.cart().is_empty());
        assert_eq!(h.inventory.stock_requests(), 0);
    }

    #[tokio::test]
    async fn update_with_non_positive_amount_is_a_strict_no_op() {
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(1, 2)]));
        let h = harness(InMemoryInventory::new(), storage).await;
        let before = h.manager.cart();

        h.manager.update_product_amount(pid(1), 0).await;
        h.manager.update_product_amount(pid(1), -4).await;
        h.manager.update_product_amount(pid(99), 0).await;

        assert!(Arc::ptr_eq(&before, &h.manager.cart()));
        assert_eq!(h.inventory.stock_requests(), 0);
        assert_eq!(h.storage.writes(), 0);
        assert!(h.notices.drain().is_empty());
        assert!(h.snapshots.drain().is_empty());
    }

    #[tokio::test]
    async fn update_missing_product_reports_not_found_before_stock_lookup() {
        let h = harness(InMemoryInventory::new(), InMemoryStorage::new()).await;

        h.manager.update_product_amount(pid(3), 2).await;

        assert_eq!(h.inventory.stock_requests(), 0);
        let notices = h.notices.drain();
        assert_eq!(notices[0].kind, NoticeKind::NotFound);
        assert_eq!(notices[0].message, "Erro na alteração de quantidade do produto");
    }

    #[tokio::test]
    async fn update_sets_exact_amount_within_stock() {
        let inventory = InMemoryInventory::new().with_product(product(1), 6);
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(1, 1), (2, 1)]));
        let h = harness(inventory, storage).await;

        h.manager.update_product_amount(pid(1), 6).await;
        assert_eq!(amounts(&h.manager.cart()), vec![(1, 6), (2, 1)]);

        h.manager.update_product_amount(pid(1), 7).await;
        assert_eq!(amounts(&h.manager.cart()), vec![(1, 6), (2, 1)]);
        assert_eq!(h.notices.drain()[0].kind, NoticeKind::InsufficientStock);
    }

    #[tokio::test]
    async fn update_against_empty_stock_reports_out_of_stock() {
        let inventory = InMemoryInventory::new().with_product(product(1), 0);
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(1, 1)]));
        let h = harness(inventory, storage).await;

        h.manager.update_product_amount(pid(1), 1).await;

        assert_eq!(h.notices.drain()[0].kind, NoticeKind::OutOfStock);
        assert_eq!(amounts(&h.manager.cart()), vec![(1, 1)]);
    }

    #[tokio::test]
    async fn storage_failure_is_an_operation_failure_and_nothing_is_swapped() {
        let inventory = InMemoryInventory::new().with_product(product(1), 5);
        let h = harness(inventory, InMemoryStorage::new()).await;
        h.storage.fail_writes(true);
        let before = h.manager.cart();

        h.manager.add_product(pid(1)).await;

        assert!(Arc::ptr_eq(&before, &h.manager.cart()));
        assert!(h.snapshots.drain().is_empty());
        assert_eq!(h.storage.raw(KEY), None);
        assert_eq!(h.notices.drain()[0].kind, NoticeKind::OperationFailed);

        h.storage.fail_writes(false);
        h.manager.add_product(pid(1)).await;
        assert_eq!(amounts(&h.manager.cart()), vec![(1, 1)]);
    }

    #[tokio::test]
    async fn every_commit_publishes_a_distinct_snapshot() {
        let inventory = InMemoryInventory::new()
            .with_product(product(1), 5)
            .with_product(product(2), 5);
        let h = harness(inventory, InMemoryStorage::new()).await;

        h.manager.add_product(pid(1)).await;
        h.manager.add_product(pid(2)).await;
        h.manager.update_product_amount(pid(2), 3).await;

        let snapshots = h.snapshots.drain();
        assert_eq!(snapshots.len(), 3);
        assert!(!Arc::ptr_eq(&snapshots[1], &snapshots[2]));
        // Product 1 was untouched by the last update, so its line item is shared.
        assert!(Arc::ptr_eq(&snapshots[1].items()[0], &snapshots[2].items()[0]));
        assert!(!Arc::ptr_eq(&snapshots[1].items()[1], &snapshots[2].items()[1]));
        assert_eq!(snapshots[1].amount_of(pid(2)), Some(1));
        assert_eq!(snapshots[2].amount_of(pid(2)), Some(3));
        assert_eq!(h.storage.writes(), 3);
    }

    #[tokio::test]
    async fn concurrent_adds_for_the_same_product_are_serialized() {
        let inventory = InMemoryInventory::new()
            .with_latency(Duration::from_millis(10))
            .with_product(product(1), 1);
        let h = harness(inventory, InMemoryStorage::new()).await;

        tokio::join!(h.manager.add_product(pid(1)), h.manager.add_product(pid(1)));

        assert_eq!(amounts(&h.manager.cart()), vec![(1, 1)]);
        assert_eq!(h.storage.writes(), 1);
        let notices = h.notices.drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].kind, NoticeKind::InsufficientStock);
    }

    #[tokio::test]
    async fn load_keeps_items_with_irregular_catalog_fields() {
        let seeded = json!([
            { "id": 1, "title": "Tênis 1", "image": "tenis-1.jpg", "price": 139, "amount": 2 },
            { "id": 2, "title": "b", "price": 1, "amount": 1 },
            { "id": 3, "title": "c", "image": null, "price": "179.90", "amount": 1 }
        ]);
        let inventory = InMemoryInventory::new().with_product(product(4), 2);
        let storage = InMemoryStorage::new().with_entry(KEY, seeded.to_string());
        let h = harness(inventory, storage).await;

        assert_eq!(amounts(&h.manager.cart()), vec![(1, 2), (2, 1), (3, 1)]);

        h.manager.add_product(pid(4)).await;

        let persisted: Value = serde_json::from_str(&h.storage.raw(KEY).unwrap()).unwrap();
        let persisted = persisted.as_array().unwrap();
        assert_eq!(persisted.len(), 4);
        assert_eq!(&persisted[..3], seeded.as_array().unwrap().as_slice());
        assert_eq!(persisted[3]["id"], json!(4));
    }

    #[tokio::test]
    async fn load_returns_storage_read_failure_without_reporting() {
        let storage = InMemoryStorage::new().with_entry(KEY, stored(&[(1, 1)]));
        storage.fail_reads(true);
        let notice_bus = Arc::new(InMemoryEventBus::new());
        let notices = notice_bus.subscribe();

        let result = CartManager::load(
            InMemoryInventory::new(),
            storage,
            BusReporter::new(notice_bus),
            InMemoryEventBus::<Arc<Cart>>::new(),
            KEY,
        )
        .await;

        assert!(matches!(result, Err(StorageError::Unavailable(_))));
        assert!(notices.drain().is_empty());
    }

    /// Bus whose every publish fails; subscriptions never receive anything.
    #[derive(Default)]
    struct BrokenBus {
        inner: InMemoryEventBus<Arc<Cart>>,
        attempts: AtomicUsize,
    }

    impl EventBus<Arc<Cart>> for BrokenBus {
        type Error = InMemoryBusError;

        fn publish(&self, _message: Arc<Cart>) -> Result<(), Self::Error> {
            self.attempts.fetch_add(1, Ordering::SeqCst);
            Err(InMemoryBusError::Poisoned)
        }

        fn subscribe(&self) -> Subscription<Arc<Cart>> {
            self.inner.subscribe()
        }
    }

    #[tokio::test]
    async fn publish_failure_does_not_undo_the_commit() {
        let inventory = InMemoryInventory::new().with_product(product(1), 5);
        let storage = Arc::new(InMemoryStorage::new());
        let bus = Arc::new(BrokenBus::default());
        let notice_bus = Arc::new(InMemoryEventBus::new());
        let notices = notice_bus.subscribe();

        let manager = CartManager::load(
            inventory,
            storage.clone(),
            BusReporter::new(notice_bus),
            bus.clone(),
            KEY,
        )
        .await
        .unwrap();

        let committed = manager.try_add_product(pid(1)).await.unwrap();
        manager.add_product(pid(1)).await;

        assert_eq!(bus.attempts.load(Ordering::SeqCst), 2);
        assert_eq!(committed.amount_of(pid(1)), Some(1));
        assert_eq!(amounts(&manager.cart()), vec![(1, 2)]);
        assert_eq!(storage.writes(), 2);
        assert!(notices.drain().is_empty());
    }
}
