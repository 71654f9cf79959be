use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;

use super::Etf;

pub type HoldingId = String;

/* A user's position in one ETF. The descriptive ETF fields are flattened so the serialized
shape is the ETF record plus the position fields. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Holding {
    pub id: HoldingId,
    #[serde(flatten)]
    pub etf: Etf,
    pub quantity: Decimal,
    pub average_price: Decimal,
    pub added_at: DateTime<Utc>,
    #[serde(default)]
    pub price_stale: bool, // last refresh of the ticker failed, current_price is the last known one
}

impl Holding {
    pub fn new(id: &str, etf: Etf, quantity: Decimal, average_price: Decimal) -> Self {
        Self {
            id: id.to_string(),
            etf,
            quantity,
            average_price,
            added_at: Utc::now(),
            price_stale: false,
        }
    }

    pub fn ticker(&self) -> &str {
        &self.etf.ticker
    }

    pub fn is_empty(&self) -> bool {
        self.quantity == dec!(0)
    }

    /// Capital currently tied in the position at cost.
    pub fn invested(&self) -> Decimal {
        self.quantity.saturating_mul(self.average_price)
    }

    /// Mark-to-market profit, None when no price is known for the ticker.
    pub fn unrealized_profit(&self) -> Option<Decimal> {
        self.etf
            .current_price
            .map(|price| self.quantity.saturating_mul(price - self.average_price))
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quantity < dec!(0) {
            return Err(ValidationError::NegativeValue {
                field: "quantity",
                value: self.quantity,
            });
        }
        if self.average_price < dec!(0) {
            return Err(ValidationError::NegativeValue {
                field: "averagePrice",
                value: self.average_price,
            });
        }
        if let Some(price) = self.etf.current_price {
            if price < dec!(0) {
                return Err(ValidationError::NegativeValue {
                    field: "currentPrice",
                    value: price,
                });
            }
        }
        checked_amount("averagePrice", self.quantity, self.average_price)?;
        if let Some(price) = self.etf.current_price {
            checked_amount("currentPrice", self.quantity, price)?;
        }
        Ok(())
    }
}

/* quantity * price, refused when it does not fit in a Decimal */
pub(crate) fn checked_amount(
    field: &'static str,
    quantity: Decimal,
    price: Decimal,
) -> Result<Decimal, ValidationError> {
    quantity
        .checked_mul(price)
        .ok_or(ValidationError::AmountOverflow {
            field,
            quantity,
            price,
        })
}
