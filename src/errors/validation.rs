use rust_decimal::Decimal;
use thiserror::Error;

use crate::structs::HoldingId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Cannot sell {requested} of holding {etf_id}: only {available} held")]
    SaleExceedsHolding {
        etf_id: HoldingId,
        requested: Decimal,
        available: Decimal,
    },
    #[error("{field} must be strictly positive, got {value}")]
    NonPositiveQuantity { field: &'static str, value: Decimal },
    #[error("{field} must not be negative, got {value}")]
    NegativeValue { field: &'static str, value: Decimal },
    #[error("Holding {0} does not exist")]
    UnknownHolding(HoldingId),
    #[error("Holding {id} tracks {stored}, cannot merge a lot of {incoming}")]
    TickerMismatch {
        id: HoldingId,
        stored: String,
        incoming: String,
    },
    #[error("{field} is out of range: {quantity} units at {price}")]
    AmountOverflow {
        field: &'static str,
        quantity: Decimal,
        price: Decimal,
    },
    #[error("{kind} id {id} is already used")]
    DuplicateId { kind: &'static str, id: String },
    #[error("Malformed date {0:?}, expected YYYY-MM-DD")]
    MalformedDate(String),
}
