use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    errors::{PortfolioError, ValidationError},
    structs::{holding::checked_amount, Dividend, Sale, SaleOrder},
};

use super::HoldingLedger;

/* Sales and dividends in the order they were recorded. Each event references a holding of the
ledger passed to the recording call; the log never owns holdings. */
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventLog {
    sales: Vec<Sale>,
    dividends: Vec<Dividend>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn dividends(&self) -> &[Dividend] {
        &self.dividends
    }

    /* Sales of one holding, lazily filtered. The iterator is Clone so it can be walked again. */
    pub fn sales_for<'a>(
        &'a self,
        etf_id: &'a str,
    ) -> impl Iterator<Item = &'a Sale> + Clone + 'a {
        self.sales.iter().filter(move |sale| sale.etf_id == etf_id)
    }

    pub fn dividends_for<'a>(
        &'a self,
        etf_id: &'a str,
    ) -> impl Iterator<Item = &'a Dividend> + Clone + 'a {
        self.dividends
            .iter()
            .filter(move |dividend| dividend.etf_id == etf_id)
    }

    /* Record a sale and take the sold units out of the holding. The profit is booked against the
    holding's average price at this point. Ledger and log are left untouched on error. */
    pub fn record_sale(
        &mut self,
        ledger: &mut HoldingLedger,
        order: SaleOrder,
    ) -> Result<&Sale, PortfolioError> {
        if self.sales.iter().any(|sale| sale.id == order.id) {
            return Err(ValidationError::DuplicateId {
                kind: "Sale",
                id: order.id,
            }
            .into());
        }
        if order.quantity <= dec!(0) {
            return Err(ValidationError::NonPositiveQuantity {
                field: "quantity",
                value: order.quantity,
            }
            .into());
        }
        non_negative("salePrice", order.sale_price)?;
        checked_amount("salePrice", order.quantity, order.sale_price)?;

        let holding = ledger.reduce_quantity(&order.etf_id, order.quantity)?;
        let sale = Sale::from_order(order, &holding);
        info!(
            id = %sale.id,
            etf_id = %sale.etf_id,
            quantity = %sale.quantity,
            realized = %sale.realized_profit,
            "Sale recorded"
        );
        self.sales.push(sale);
        Ok(&self.sales[self.sales.len() - 1])
    }

    /* Correction of a recorded sale. Only the date and the price can change, the profit is
    re-derived from the cost basis the sale was booked against. */
    pub fn correct_sale(
        &mut self,
        id: &str,
        date: Option<NaiveDate>,
        sale_price: Option<Decimal>,
    ) -> Result<&Sale, PortfolioError> {
        if let Some(price) = sale_price {
            non_negative("salePrice", price)?;
        }
        let sale = self
            .sales
            .iter_mut()
            .find(|sale| sale.id == id)
            .ok_or_else(|| PortfolioError::sale_not_found(id))?;
        if let Some(price) = sale_price {
            checked_amount("salePrice", sale.quantity, price)?;
        }
        if let Some(date) = date {
            sale.date = date;
        }
        if let Some(price) = sale_price {
            sale.reprice(price);
        }
        debug!(id, "Sale corrected");
        Ok(&*sale)
    }

    /* Delete a sale. The units go back to the holding when it is still in the ledger and still
    tracks the ticker that was sold, otherwise only the sale goes away. */
    pub fn remove_sale(
        &mut self,
        ledger: &mut HoldingLedger,
        id: &str,
    ) -> Result<Sale, PortfolioError> {
        let position = self
            .sales
            .iter()
            .position(|sale| sale.id == id)
            .ok_or_else(|| PortfolioError::sale_not_found(id))?;
        let sale = self.sales.remove(position);
        if let Err(e) = ledger.restore_quantity(&sale) {
            warn!(id, etf_id = %sale.etf_id, reason = %e, "Sale removed, units not restored");
        }
        Ok(sale)
    }

    /* Dividends have no effect on the quantity or the cost basis of the holding */
    pub fn record_dividend(
        &mut self,
        ledger: &HoldingLedger,
        dividend: Dividend,
    ) -> Result<&Dividend, PortfolioError> {
        if self.dividends.iter().any(|d| d.id == dividend.id) {
            return Err(ValidationError::DuplicateId {
                kind: "Dividend",
                id: dividend.id,
            }
            .into());
        }
        non_negative("amount", dividend.amount)?;
        if !ledger.contains(&dividend.etf_id) {
            return Err(ValidationError::UnknownHolding(dividend.etf_id).into());
        }

        info!(id = %dividend.id, etf_id = %dividend.etf_id, amount = %dividend.amount, "Dividend recorded");
        self.dividends.push(dividend);
        Ok(&self.dividends[self.dividends.len() - 1])
    }

    pub fn correct_dividend(
        &mut self,
        id: &str,
        date: Option<NaiveDate>,
        amount: Option<Decimal>,
    ) -> Result<&Dividend, PortfolioError> {
        if let Some(amount) = amount {
            non_negative("amount", amount)?;
        }
        let dividend = self
            .dividends
            .iter_mut()
            .find(|dividend| dividend.id == id)
            .ok_or_else(|| PortfolioError::dividend_not_found(id))?;
        if let Some(date) = date {
            dividend.date = date;
        }
        if let Some(amount) = amount {
            dividend.amount = amount;
        }
        Ok(&*dividend)
    }

    pub fn remove_dividend(&mut self, id: &str) -> Result<Dividend, PortfolioError> {
        let position = self
            .dividends
            .iter()
            .position(|dividend| dividend.id == id)
            .ok_or_else(|| PortfolioError::dividend_not_found(id))?;
        Ok(self.dividends.remove(position))
    }
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value < dec!(0) {
        return Err(ValidationError::NegativeValue { field, value });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::structs::{Etf, Holding};

    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    fn ledger_with(quantity: Decimal, average: Decimal) -> HoldingLedger {
        let mut ledger = HoldingLedger::new();
        ledger
            .upsert(Holding::new(
                "h1",
                Etf::new("458730", "TIGER 미국배당다우존스"),
                quantity,
                average,
            ))
            .unwrap();
        ledger
    }

    fn order(id: &str, etf_id: &str, price: Decimal, quantity: Decimal) -> SaleOrder {
        SaleOrder {
            id: id.to_string(),
            etf_id: etf_id.to_string(),
            date: date(1),
            sale_price: price,
            quantity,
        }
    }

    fn dividend(id: &str, etf_id: &str, amount: Decimal) -> Dividend {
        Dividend {
            id: id.to_string(),
            etf_id: etf_id.to_string(),
            date: date(15),
            amount,
        }
    }

    #[test]
    fn test_sell_everything() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        let mut log = EventLog::new();

        let sale = log
            .record_sale(&mut ledger, order("s1", "h1", dec!(150), dec!(10)))
            .unwrap();

        assert_eq!(sale.realized_profit, dec!(500));
        assert_eq!(sale.profit_rate, dec!(0.5));
        let holding = ledger.get("h1").unwrap();
        assert_eq!(holding.quantity, dec!(0));
        assert_eq!(holding.invested(), dec!(0));
    }

    #[test]
    fn test_oversell_leaves_everything_unchanged() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        let mut log = EventLog::new();

        let result = log.record_sale(&mut ledger, order("s1", "h1", dec!(150), dec!(11)));

        assert_eq!(
            result.unwrap_err(),
            PortfolioError::Validation(ValidationError::SaleExceedsHolding {
                etf_id: "h1".to_string(),
                requested: dec!(11),
                available: dec!(10),
            })
        );
        assert_eq!(ledger.get("h1").unwrap().quantity, dec!(10));
        assert!(log.sales().is_empty());
    }

    #[test]
    fn test_sale_validation() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        let mut log = EventLog::new();

        assert!(matches!(
            log.record_sale(&mut ledger, order("s1", "nope", dec!(1), dec!(1))),
            Err(PortfolioError::Validation(ValidationError::UnknownHolding(_)))
        ));
        assert!(matches!(
            log.record_sale(&mut ledger, order("s1", "h1", dec!(1), dec!(0))),
            Err(PortfolioError::Validation(ValidationError::NonPositiveQuantity { .. }))
        ));
        assert!(matches!(
            log.record_sale(&mut ledger, order("s1", "h1", dec!(-1), dec!(1))),
            Err(PortfolioError::Validation(ValidationError::NegativeValue { .. }))
        ));
        log.record_sale(&mut ledger, order("s1", "h1", dec!(1), dec!(1)))
            .unwrap();
        assert!(matches!(
            log.record_sale(&mut ledger, order("s1", "h1", dec!(1), dec!(1))),
            Err(PortfolioError::Validation(ValidationError::DuplicateId { .. }))
        ));
        assert_eq!(ledger.get("h1").unwrap().quantity, dec!(9));
    }

    #[test]
    fn test_later_buys_do_not_move_booked_profit() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        let mut log = EventLog::new();
        log.record_sale(&mut ledger, order("s1", "h1", dec!(120), dec!(5)))
            .unwrap();
        ledger
            .upsert(Holding::new(
                "h1",
                Etf::new("458730", "TIGER 미국배당다우존스"),
                dec!(5),
                dec!(200),
            ))
            .unwrap();

        assert_eq!(log.sales()[0].realized_profit, dec!(100));
        assert_eq!(ledger.get("h1").unwrap().average_price, dec!(150));
    }

    #[test]
    fn test_remove_sale_restores_units() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        let mut log = EventLog::new();
        log.record_sale(&mut ledger, order("s1", "h1", dec!(150), dec!(4)))
            .unwrap();

        let removed = log.remove_sale(&mut ledger, "s1").unwrap();

        assert_eq!(removed.quantity, dec!(4));
        let holding = ledger.get("h1").unwrap();
        assert_eq!(holding.quantity, dec!(10));
        assert_eq!(holding.average_price, dec!(100));
        assert!(matches!(
            log.remove_sale(&mut ledger, "s1"),
            Err(PortfolioError::NotFound { .. })
        ));
    }

    #[test]
    fn test_remove_sale_skips_id_reused_for_other_etf() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        let mut log = EventLog::new();
        log.record_sale(&mut ledger, order("s1", "h1", dec!(150), dec!(10)))
            .unwrap();
        ledger.remove("h1").unwrap();
        ledger
            .upsert(Holding::new("h1", Etf::new("069500", "KODEX 200"), dec!(2), dec!(30)))
            .unwrap();

        let removed = log.remove_sale(&mut ledger, "s1").unwrap();

        assert_eq!(removed.ticker, "458730");
        let holding = ledger.get("h1").unwrap();
        assert_eq!(holding.ticker(), "069500");
        assert_eq!(holding.quantity, dec!(2));
        assert_eq!(holding.average_price, dec!(30));
        assert!(log.sales().is_empty());
    }

    #[test]
    fn test_remove_sale_restores_exact_average() {
        let average = dec!(131.08) / dec!(7);
        let mut ledger = ledger_with(dec!(7), average);
        let mut log = EventLog::new();
        log.record_sale(&mut ledger, order("s1", "h1", dec!(21.5), dec!(3)))
            .unwrap();

        log.remove_sale(&mut ledger, "s1").unwrap();

        let holding = ledger.get("h1").unwrap();
        assert_eq!(holding.quantity, dec!(7));
        assert_eq!(holding.average_price, average);
    }

    #[test]
    fn test_sale_amount_out_of_range() {
        let mut ledger = ledger_with(dec!(100000000000000000000), dec!(1));
        let mut log = EventLog::new();

        assert!(matches!(
            log.record_sale(
                &mut ledger,
                order("s1", "h1", dec!(10000000000), dec!(100000000000000000000))
            ),
            Err(PortfolioError::Validation(ValidationError::AmountOverflow { .. }))
        ));
        assert_eq!(ledger.get("h1").unwrap().quantity, dec!(100000000000000000000));

        log.record_sale(&mut ledger, order("s1", "h1", dec!(2), dec!(10)))
            .unwrap();
        assert!(matches!(
            log.correct_sale("s1", None, Some(Decimal::MAX)),
            Err(PortfolioError::Validation(ValidationError::AmountOverflow { .. }))
        ));
        assert_eq!(log.sales()[0].sale_price, dec!(2));
    }

    #[test]
    fn test_correct_sale_price() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        let mut log = EventLog::new();
        log.record_sale(&mut ledger, order("s1", "h1", dec!(150), dec!(10)))
            .unwrap();

        let corrected = log
            .correct_sale("s1", Some(date(2)), Some(dec!(110)))
            .unwrap();

        assert_eq!(corrected.date, date(2));
        assert_eq!(corrected.realized_profit, dec!(100));
        assert_eq!(corrected.profit_rate, dec!(0.1));
    }

    #[test]
    fn test_dividends() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        let mut log = EventLog::new();

        log.record_dividend(&ledger, dividend("d1", "h1", dec!(50)))
            .unwrap();
        assert!(matches!(
            log.record_dividend(&ledger, dividend("d2", "h9", dec!(50))),
            Err(PortfolioError::Validation(ValidationError::UnknownHolding(_)))
        ));
        assert!(matches!(
            log.record_dividend(&ledger, dividend("d2", "h1", dec!(-5))),
            Err(PortfolioError::Validation(ValidationError::NegativeValue { .. }))
        ));
        let holding = ledger.get("h1").unwrap();
        assert_eq!(holding.quantity, dec!(10));
        assert_eq!(holding.average_price, dec!(100));

        log.correct_dividend("d1", None, Some(dec!(55))).unwrap();
        assert_eq!(log.dividends()[0].amount, dec!(55));

        // the dividend outlives its holding
        ledger.remove("h1").unwrap();
        assert_eq!(log.dividends_for("h1").count(), 1);
        assert_eq!(log.remove_dividend("d1").unwrap().amount, dec!(55));
        assert!(log.dividends().is_empty());
    }

    #[test]
    fn test_events_for_holding_are_restartable() {
        let mut ledger = ledger_with(dec!(10), dec!(100));
        ledger
            .upsert(Holding::new("h2", Etf::new("069500", "KODEX 200"), dec!(3), dec!(30)))
            .unwrap();
        let mut log = EventLog::new();
        log.record_sale(&mut ledger, order("s1", "h1", dec!(1), dec!(1)))
            .unwrap();
        log.record_sale(&mut ledger, order("s2", "h2", dec!(1), dec!(1)))
            .unwrap();
        log.record_sale(&mut ledger, order("s3", "h1", dec!(1), dec!(1)))
            .unwrap();

        let sales = log.sales_for("h1");
        let first: Vec<&str> = sales.clone().map(|s| s.id.as_str()).collect();
        let second: Vec<&str> = sales.map(|s| s.id.as_str()).collect();

        assert_eq!(first, vec!["s1", "s3"]);
        assert_eq!(first, second);
        assert_eq!(log.dividends_for("h1").count(), 0);
    }
}
