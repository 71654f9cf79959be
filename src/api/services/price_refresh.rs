use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

use crate::{
    api::{MarketDataProvider, Quote},
    errors::ApiError,
    structs::HoldingLedger,
};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshReport {
    pub updated: Vec<(String, Decimal)>,
    pub failed: Vec<(String, String)>, // ticker, reason
}

impl RefreshReport {
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/* Ask the provider for every ticker, one after the other. Nothing is applied here so the ledger
is never seen half refreshed. */
pub async fn fetch_quotes(
    tickers: &[String],
    provider: &dyn MarketDataProvider,
) -> Vec<(String, Result<Quote, ApiError>)> {
    let mut quotes = Vec::with_capacity(tickers.len());
    for ticker in tickers {
        quotes.push((ticker.clone(), provider.quote(ticker).await));
    }
    quotes
}

/* Apply fetched quotes: a fresh price replaces the known one, a failure keeps the known price
and flags it as stale */
pub fn apply_quotes(
    ledger: &mut HoldingLedger,
    quotes: Vec<(String, Result<Quote, ApiError>)>,
) -> RefreshReport {
    let mut report = RefreshReport::default();
    for (ticker, quote) in quotes {
        match quote {
            Ok(quote) => {
                ledger.apply_quote(&ticker, quote.current_price);
                report.updated.push((ticker, quote.current_price));
            }
            Err(e) => {
                warn!(ticker = %ticker, error = %e, "Price refresh failed, keeping last known price");
                ledger.mark_stale(&ticker);
                report.failed.push((ticker, e.to_string()));
            }
        }
    }
    info!(
        updated = report.updated.len(),
        failed = report.failed.len(),
        "Prices refreshed"
    );
    report
}

pub async fn refresh_ledger_prices(
    ledger: &mut HoldingLedger,
    provider: &dyn MarketDataProvider,
) -> RefreshReport {
    let quotes = fetch_quotes(&ledger.tickers(), provider).await;
    apply_quotes(ledger, quotes)
}
