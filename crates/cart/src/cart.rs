use std::collections::HashSet;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use rocketcart_core::entity::find_by_id;
use rocketcart_core::{Aggregate, AggregateRoot, DomainError, DomainResult, Entity, ProductId};
use rocketcart_events::Event;
use rocketcart_inventory::Stock;
use rocketcart_products::Product;

use crate::error::CartError;

/// Field names a line item owns on top of the catalog record.
const RESERVED_FIELDS: &[&str] = &["amount"];

/// A product held in the cart together with its quantity.
///
/// Serialized flat: the catalog record's fields plus `amount`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    #[serde(flatten)]
    product: Product,
    amount: u32,
}

impl LineItem {
    pub fn new(product: Product, amount: u32) -> DomainResult<Self> {
        if amount == 0 {
            return Err(DomainError::validation(format!(
                "line item for product {} must hold at least one unit",
                product.id
            )));
        }
        Ok(Self {
            product: product.without_reserved(RESERVED_FIELDS),
            amount,
        })
    }

    pub fn product(&self) -> &Product {
        &self.product
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    pub fn amount(&self) -> u32 {
        self.amount
    }

    /// A fresh line item with the same product and a new quantity.
    fn with_amount(&self, amount: u32) -> Self {
        Self {
            product: self.product.clone(),
            amount,
        }
    }
}

impl Entity for LineItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.product.id
    }
}

/// Aggregate root: the shopper's cart.
///
/// Line items are shared behind `Arc`. A transition replaces only the items it
/// changes, so two snapshots share every untouched item and differ by pointer
/// on every touched one.
///
/// Equality compares line items only; `version` counts transitions applied in
/// this session and is not persisted.
#[derive(Debug, Clone, Default)]
pub struct Cart {
    items: Vec<Arc<LineItem>>,
    version: u64,
}

impl PartialEq for Cart {
    fn eq(&self, other: &Self) -> bool {
        self.items == other.items
    }
}

impl Eq for Cart {}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from previously stored line items.
    ///
    /// Rejects duplicate product ids. Zero amounts are already ruled out by
    /// `LineItem`'s constructor, but stored data bypasses it, so they are
    /// checked here too.
    pub fn from_items(items: Vec<LineItem>) -> DomainResult<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            if !seen.insert(item.product_id()) {
                return Err(DomainError::invariant(format!(
                    "duplicate line item for product {}",
                    item.product_id()
                )));
            }
            if item.amount == 0 {
                return Err(DomainError::invariant(format!(
                    "line item for product {} has zero amount",
                    item.product_id()
                )));
            }
        }

        Ok(Self {
            items: items.into_iter().map(Arc::new).collect(),
            version: 0,
        })
    }

    pub fn items(&self) -> &[Arc<LineItem>] {
        &self.items
    }

    pub fn line_item(&self, product_id: ProductId) -> Option<&Arc<LineItem>> {
        find_by_id(&self.items, &product_id).map(|(_, item)| item)
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.line_item(product_id).is_some()
    }

    pub fn amount_of(&self, product_id: ProductId) -> Option<u32> {
        self.line_item(product_id).map(|item| item.amount)
    }

    /// Number of distinct products.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Decide how an add request should be carried out against `stock`.
    ///
    /// Checks everything that can be checked before the catalog record is
    /// needed, so a rejected add never triggers a catalog fetch.
    pub fn plan_add(&self, product_id: ProductId, stock: &Stock) -> Result<AddPlan, CartError> {
        ensure_stock_matches(product_id, stock)?;
        stock.ensure_available()?;

        match self.line_item(product_id) {
            Some(item) => {
                stock.ensure_satisfies(u64::from(item.amount) + 1)?;
                Ok(AddPlan::Increment)
            }
            None => Ok(AddPlan::Append),
        }
    }
}

impl Serialize for Cart {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.items.iter().map(|item| &**item))
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let items = Vec::<LineItem>::deserialize(deserializer)?;
        Cart::from_items(items).map_err(serde::de::Error::custom)
    }
}

impl AggregateRoot for Cart {
    fn version(&self) -> u64 {
        self.version
    }
}

/// Outcome of [`Cart::plan_add`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddPlan {
    /// The product is already in the cart; bump its amount by one.
    Increment,
    /// The product is new; fetch its catalog record and append it.
    Append,
}

/// Command: IncrementAmount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncrementAmount {
    pub product_id: ProductId,
    pub stock: Stock,
    pub occurred_at: DateTime<Utc>,
}

/// Command: AppendProduct.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendProduct {
    pub product: Product,
    pub stock: Stock,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveLineItem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoveLineItem {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetAmount.
///
/// `amount` is signed because it comes straight from user input; zero and
/// negative values are accepted and ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SetAmount {
    pub product_id: ProductId,
    pub amount: i64,
    pub stock: Stock,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartCommand {
    IncrementAmount(IncrementAmount),
    AppendProduct(AppendProduct),
    RemoveLineItem(RemoveLineItem),
    SetAmount(SetAmount),
}

/// Event: LineItemAppended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemAppended {
    pub item: LineItem,
    pub occurred_at: DateTime<Utc>,
}

/// Event: AmountChanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmountChanged {
    pub product_id: ProductId,
    pub amount: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: LineItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItemRemoved {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartEvent {
    LineItemAppended(LineItemAppended),
    AmountChanged(AmountChanged),
    LineItemRemoved(LineItemRemoved),
}

impl Event for CartEvent {
    fn event_type(&self) -> &'static str {
        match self {
            CartEvent::LineItemAppended(_) => "cart.line_item.appended",
            CartEvent::AmountChanged(_) => "cart.line_item.amount_changed",
            CartEvent::LineItemRemoved(_) => "cart.line_item.removed",
        }
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            CartEvent::LineItemAppended(e) => e.occurred_at,
            CartEvent::AmountChanged(e) => e.occurred_at,
            CartEvent::LineItemRemoved(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Cart {
    type Command = CartCommand;
    type Event = CartEvent;
    type Error = CartError;

    fn apply(&mut self, event: &Self::Event) {
        match event {
            CartEvent::LineItemAppended(e) => {
                self.items.push(Arc::new(e.item.clone()));
            }
            CartEvent::AmountChanged(e) => {
                if let Some((pos, item)) = find_by_id(&self.items, &e.product_id) {
                    let changed = Arc::new(item.with_amount(e.amount));
                    self.items[pos] = changed;
                }
            }
            CartEvent::LineItemRemoved(e) => {
                self.items.retain(|item| item.product_id() != e.product_id);
            }
        }

        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        match command {
            CartCommand::IncrementAmount(cmd) => self.handle_increment(cmd),
            CartCommand::AppendProduct(cmd) => self.handle_append(cmd),
            CartCommand::RemoveLineItem(cmd) => self.handle_remove(cmd),
            CartCommand::SetAmount(cmd) => self.handle_set_amount(cmd),
        }
    }
}

impl Cart {
    fn handle_increment(&self, cmd: &IncrementAmount) -> Result<Vec<CartEvent>, CartError> {
        ensure_stock_matches(cmd.product_id, &cmd.stock)?;
        cmd.stock.ensure_available()?;

        let current = self
            .amount_of(cmd.product_id)
            .ok_or(CartError::NotFound(cmd.product_id))?;
        let requested = u64::from(current) + 1;
        cmd.stock.ensure_satisfies(requested)?;

        Ok(vec![CartEvent::AmountChanged(AmountChanged {
            product_id: cmd.product_id,
            amount: to_amount(requested)?,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_append(&self, cmd: &AppendProduct) -> Result<Vec<CartEvent>, CartError> {
        let product_id = cmd.product.id;
        ensure_stock_matches(product_id, &cmd.stock)?;
        cmd.stock.ensure_available()?;

        if self.contains(product_id) {
            return Err(DomainError::invariant(format!(
                "product {product_id} is already in the cart"
            ))
            .into());
        }

        Ok(vec![CartEvent::LineItemAppended(LineItemAppended {
            item: LineItem::new(cmd.product.clone(), 1)?,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_remove(&self, cmd: &RemoveLineItem) -> Result<Vec<CartEvent>, CartError> {
        if !self.contains(cmd.product_id) {
            return Err(CartError::NotFound(cmd.product_id));
        }

        Ok(vec![CartEvent::LineItemRemoved(LineItemRemoved {
            product_id: cmd.product_id,
            occurred_at: cmd.occurred_at,
        })])
    }

    fn handle_set_amount(&self, cmd: &SetAmount) -> Result<Vec<CartEvent>, CartError> {
        let Ok(requested) = u64::try_from(cmd.amount) else {
            return Ok(vec![]);
        };
        if requested == 0 {
            return Ok(vec![]);
        }

        if !self.contains(cmd.product_id) {
            return Err(CartError::NotFound(cmd.product_id));
        }

        ensure_stock_matches(cmd.product_id, &cmd.stock)?;
        cmd.stock.ensure_satisfies(requested)?;

        Ok(vec![CartEvent::AmountChanged(AmountChanged {
            product_id: cmd.product_id,
            amount: to_amount(requested)?,
            occurred_at: cmd.occurred_at,
        })])
    }
}

fn ensure_stock_matches(product_id: ProductId, stock: &Stock) -> Result<(), CartError> {
    if stock.id != product_id {
        return Err(CartError::operation_failed(format!(
            "stock record for product {} returned for product {product_id}",
            stock.id
        )));
    }
    Ok(())
}

fn to_amount(requested: u64) -> Result<u32, CartError> {
    u32::try_from(requested)
        .map_err(|_| CartError::operation_failed(format!("amount {requested} out of range")))
}
