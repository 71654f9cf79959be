use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::HoldingId;

/* Portfolio level figures, always rebuilt from holdings, sales and dividends.
`stale_holdings` lists the holdings whose unrealized profit could not be marked to a fresh price. */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_invested: Decimal,
    pub total_dividend: Decimal,
    pub total_realized_profit: Decimal,
    pub total_unrealized_profit: Decimal,
    pub total_return: Decimal,
    pub total_return_rate: Decimal,
    pub is_stale: bool,
    pub stale_holdings: Vec<HoldingId>,
}
