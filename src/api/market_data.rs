use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hashbrown::HashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ApiError;

/* Latest market figures for one ticker */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub ticker: String,
    pub current_price: Decimal,
    pub change_price: Decimal,
    pub change_rate: Decimal, // %
    pub volume: u64,
    pub as_of: DateTime<Utc>,
}

/* Source of live prices. Calls may fail or lag, the portfolio treats a failure as a stale price. */
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    async fn quote(&self, ticker: &str) -> Result<Quote, ApiError>;
}

/* Prices from an in-memory table: offline runs and tests */
#[derive(Debug, Clone, Default)]
pub struct FixedQuotes {
    prices: HashMap<String, Decimal>,
}

impl FixedQuotes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, ticker: &str, price: Decimal) -> Self {
        self.prices.insert(ticker.to_string(), price);
        self
    }
}

#[async_trait]
impl MarketDataProvider for FixedQuotes {
    async fn quote(&self, ticker: &str) -> Result<Quote, ApiError> {
        let price = self
            .prices
            .get(ticker)
            .ok_or_else(|| ApiError::CouldNotFindPrice {
                ticker: ticker.to_string(),
            })?;
        Ok(Quote {
            ticker: ticker.to_string(),
            current_price: *price,
            change_price: Decimal::ZERO,
            change_rate: Decimal::ZERO,
            volume: 0,
            as_of: Utc::now(),
        })
    }
}
