use rust_decimal::Decimal;
use tracing::debug;

use crate::structs::{Dividend, Holding, PortfolioSummary, Sale};

use super::ratio_or_zero;

/* Fold the ledger and the event log into the portfolio summary.

- invested: sum of quantity * average_price over current holdings
- dividend: sum of every dividend ever recorded, whatever the holding became
- realized: sum of realized profit of every sale
- unrealized: sum of quantity * (current_price - average_price); a holding without price counts
  for 0 and, like a holding whose last refresh failed, flags the summary as stale
- return: realized + unrealized + dividend, rate = return / invested (0 when nothing is invested)

Holdings and events are folded in slice order so the same inputs always give the same decimals.
Sums saturate at the Decimal bounds instead of overflowing.
*/
pub fn compute_summary(
    holdings: &[Holding],
    sales: &[Sale],
    dividends: &[Dividend],
) -> PortfolioSummary {
    let mut total_invested = Decimal::ZERO;
    let mut total_unrealized_profit = Decimal::ZERO;
    let mut stale_holdings = Vec::new();

    for holding in holdings {
        total_invested = total_invested.saturating_add(holding.invested());
        if holding.is_empty() {
            continue;
        }
        match holding.unrealized_profit() {
            Some(profit) => {
                total_unrealized_profit = total_unrealized_profit.saturating_add(profit);
                if holding.price_stale {
                    stale_holdings.push(holding.id.clone());
                }
            }
            None => stale_holdings.push(holding.id.clone()),
        }
    }

    let total_dividend = saturating_sum(dividends.iter().map(|dividend| dividend.amount));
    let total_realized_profit = saturating_sum(sales.iter().map(|sale| sale.realized_profit));
    let total_return = total_realized_profit
        .saturating_add(total_unrealized_profit)
        .saturating_add(total_dividend);

    if !stale_holdings.is_empty() {
        debug!(holdings = ?stale_holdings, "Summary computed with missing or stale prices");
    }

    PortfolioSummary {
        total_invested,
        total_dividend,
        total_realized_profit,
        total_unrealized_profit,
        total_return,
        total_return_rate: ratio_or_zero(total_return, total_invested),
        is_stale: !stale_holdings.is_empty(),
        stale_holdings,
    }
}

fn saturating_sum(values: impl Iterator<Item = Decimal>) -> Decimal {
    values.fold(Decimal::ZERO, Decimal::saturating_add)
}
