use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use rocketcart_core::ProductId;

const TITLE: &str = "title";
const IMAGE: &str = "image";
const PRICE: &str = "price";

/// Catalog record as served by `GET products/{id}`.
///
/// Only `id` is interpreted. Every other field, `title`, `image` and `price`
/// included, is kept as the exact JSON the catalog sent: a record with a null
/// image or a string price loads, persists and reloads unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl Product {
    pub fn new(
        id: ProductId,
        title: impl Into<String>,
        image: impl Into<String>,
        price: Number,
    ) -> Self {
        Self {
            id,
            attributes: Map::new(),
        }
        .with_attribute(TITLE, Value::String(title.into()))
        .with_attribute(IMAGE, Value::String(image.into()))
        .with_attribute(PRICE, Value::Number(price))
    }

    /// Add an extra catalog attribute.
    pub fn with_attribute(mut self, key: impl Into<String>, value: Value) -> Self {
        self.attributes.insert(key.into(), value);
        self
    }

    /// The title, when the catalog sent it as a string.
    pub fn title(&self) -> Option<&str> {
        self.attributes.get(TITLE).and_then(Value::as_str)
    }

    /// The image URL, when the catalog sent it as a string.
    pub fn image(&self) -> Option<&str> {
        self.attributes.get(IMAGE).and_then(Value::as_str)
    }

    /// The price exactly as sent; may be a number, a string or absent.
    pub fn price(&self) -> Option<&Value> {
        self.attributes.get(PRICE)
    }

    /// Drop any attribute that collides with a field the cart owns.
    ///
    /// Catalog records do not carry a quantity; if one shows up anyway it must
    /// not shadow the line item's `amount`.
    pub fn without_reserved(mut self, reserved: &[&str]) -> Self {
        for key in reserved {
            self.attributes.remove(*key);
        }
        self
    }
}
