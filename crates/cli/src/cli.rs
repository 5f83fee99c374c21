//! Command-line interface definitions.

use std::fmt::Write as _;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use rocketcart_cart::Cart;
use rocketcart_core::ProductId;
use rocketcart_observability::LogFormat;
use serde_json::Value;

/// RocketCart - shopping cart backed by a remote inventory service.
#[derive(Parser, Debug)]
#[command(name = "rocketcart")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Override the inventory service base URL
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Override the SQLite file holding the cart
    #[arg(long, global = true)]
    pub db_path: Option<PathBuf>,

    /// Log output format (json or pretty)
    #[arg(long, global = true, default_value = "pretty")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    /// Print the current cart
    Show,

    /// Add one unit of a product
    Add {
        product_id: ProductId,
    },

    /// Remove a product from the cart
    Remove {
        product_id: ProductId,
    },

    /// Set the amount of a product already in the cart
    Update {
        product_id: ProductId,

        /// Desired amount; zero or negative is ignored
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

/// One line per item, in cart order.
pub fn render(cart: &Cart) -> String {
    if cart.is_empty() {
        return "cart is empty\n".to_string();
    }

    let mut out = String::new();
    for item in cart.items() {
        let product = item.product();
        let price = match product.price() {
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
            None => "-".to_string(),
        };
        let _ = writeln!(
            out,
            "{:>6}  {:<40}  x{:<4} {}",
            product.id,
            product.title().unwrap_or("(untitled)"),
            item.amount(),
            price
        );
    }
    out
}
