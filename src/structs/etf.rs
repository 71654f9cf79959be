use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Currency;

/* Descriptive record of a listed ETF, as the market-data side knows it.
`current_price` stays None until a quote has been applied. */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Etf {
    pub ticker: String,
    pub name: String,
    #[serde(default)]
    pub current_price: Option<Decimal>,
    #[serde(default)]
    pub change_rate: Decimal, // %
    #[serde(default)]
    pub change_price: Decimal,
    #[serde(default)]
    pub trading_volume: u64,
    #[serde(default)]
    pub market_cap: Decimal,
    #[serde(default)]
    pub dividend_yield: Decimal, // %
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub listing_date: Option<NaiveDate>,
    #[serde(default)]
    pub management_fee: Decimal, // %
    #[serde(default)]
    pub manager: String,
    #[serde(default)]
    pub currency: Currency,
}

impl Etf {
    pub fn new(ticker: &str, name: &str) -> Self {
        Self {
            ticker: ticker.to_string(),
            name: name.to_string(),
            ..Default::default()
        }
    }

    pub fn with_price(mut self, price: Decimal) -> Self {
        self.current_price = Some(price);
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = category.to_string();
        self
    }
}
