use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::functions::{profit_rate, realized_profit};

use super::{Holding, HoldingId};

pub type SaleId = String;

/* A completed sale. Profit fields are frozen at the holding's average price when the sale was
recorded, later buys on the same holding do not move them. The ticker and the average price are
kept so a cancelled sale can only give its units back to the same ETF, at the same cost. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: SaleId,
    pub etf_id: HoldingId,
    pub ticker: String,
    pub date: NaiveDate,
    pub sale_price: Decimal,
    pub quantity: Decimal,
    pub realized_profit: Decimal,
    pub profit_rate: Decimal,
    pub average_price: Decimal, // cost basis per unit at the time of the sale
}

/* What a caller submits to record a sale, the profit fields are derived by the log. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleOrder {
    pub id: SaleId,
    pub etf_id: HoldingId,
    pub date: NaiveDate,
    pub sale_price: Decimal,
    pub quantity: Decimal,
}

impl Sale {
    /* Book the order against the holding it sells from, as it is before the units leave */
    pub fn from_order(order: SaleOrder, holding: &Holding) -> Self {
        let average_price = holding.average_price;
        let realized = realized_profit(order.sale_price, average_price, order.quantity);
        Self {
            realized_profit: realized,
            profit_rate: profit_rate(realized, average_price, order.quantity),
            average_price,
            ticker: holding.ticker().to_string(),
            id: order.id,
            etf_id: order.etf_id,
            date: order.date,
            sale_price: order.sale_price,
            quantity: order.quantity,
        }
    }

    /* Re-derive the profit fields after a correction of the sale price */
    pub(crate) fn reprice(&mut self, sale_price: Decimal) {
        self.sale_price = sale_price;
        self.realized_profit = realized_profit(sale_price, self.average_price, self.quantity);
        self.profit_rate = profit_rate(self.realized_profit, self.average_price, self.quantity);
    }
}
