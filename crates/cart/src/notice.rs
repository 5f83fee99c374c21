//! User-facing outcome messages.
//!
//! Every rejected operation produces exactly one notice. The message text is
//! fixed per error kind; not-found and unexpected failures share a generic
//! message that names the operation.

use crate::error::{CartError, CartOperation};

pub const OUT_OF_STOCK_MESSAGE: &str = "Produto sem estoque";
pub const INSUFFICIENT_STOCK_MESSAGE: &str = "Quantidade solicitada fora de estoque";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NoticeKind {
    OutOfStock,
    InsufficientStock,
    NotFound,
    OperationFailed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub operation: CartOperation,
    pub kind: NoticeKind,
    pub message: &'static str,
}

impl Notice {
    pub fn for_error(operation: CartOperation, error: &CartError) -> Self {
        let kind = match error {
            CartError::OutOfStock(_) => NoticeKind::OutOfStock,
            CartError::InsufficientStock { .. } => NoticeKind::InsufficientStock,
            CartError::NotFound(_) => NoticeKind::NotFound,
            CartError::OperationFailed(_) => NoticeKind::OperationFailed,
        };

        let message = match kind {
            NoticeKind::OutOfStock => OUT_OF_STOCK_MESSAGE,
            NoticeKind::InsufficientStock => INSUFFICIENT_STOCK_MESSAGE,
            NoticeKind::NotFound | NoticeKind::OperationFailed => generic_failure(operation),
        };

        Self {
            operation,
            kind,
            message,
        }
    }
}

fn generic_failure(operation: CartOperation) -> &'static str {
    match operation {
        CartOperation::Add => "Erro na adição do produto",
        CartOperation::Remove => "Erro na remoção do produto",
        CartOperation::UpdateAmount => "Erro na alteração de quantidade do produto",
    }
}

impl core::fmt::Display for Notice {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.message)
    }
}
