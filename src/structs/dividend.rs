use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::HoldingId;

pub type DividendId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dividend {
    pub id: DividendId,
    pub etf_id: HoldingId,
    pub date: NaiveDate,
    pub amount: Decimal,
}
