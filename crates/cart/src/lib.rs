//! Shopping cart domain module.
//!
//! The cart is an ordered list of line items keyed by product id. All three
//! mutations (add/increment, remove, set amount) are pure transitions on
//! [`Cart`]; stock records and catalog records they depend on are fetched by
//! the caller and passed in through the command.

pub mod cart;
pub mod error;
pub mod notice;

pub use cart::{
    AddPlan, AmountChanged, AppendProduct, Cart, CartCommand, CartEvent, IncrementAmount,
    LineItem, LineItemAppended, LineItemRemoved, RemoveLineItem, SetAmount,
};
pub use error::{CartError, CartOperation};
pub use notice::{Notice, NoticeKind};
