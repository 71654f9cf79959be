use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{
    api::{refresh_ledger_prices, MarketDataProvider, RefreshReport},
    errors::PortfolioError,
    structs::{Dividend, Holding, PortfolioSummary, Sale, SaleOrder},
};

use super::{EventLog, HoldingLedger, Persistable, SummaryStore};

/* Entry point for the UI side: owns the holdings, the sale/dividend log and the last summary.
Only the ledger and the log are saved, the summary is rebuilt on demand.
A persistent manager saves itself when dropped. */
#[derive(Debug, Serialize, Deserialize)]
pub struct PortfolioManager {
    ledger: HoldingLedger,
    events: EventLog,
    #[serde(skip)]
    summary: SummaryStore,
    #[serde(skip)]
    path: String,
    #[serde(skip)]
    persist: bool,
}

impl Persistable for PortfolioManager {
    const PATH: &'static str = ".data/portfolio";

    fn default_new(path: String, persist: bool) -> Self {
        Self {
            ledger: HoldingLedger::new(),
            events: EventLog::new(),
            summary: SummaryStore::new(),
            path,
            persist,
        }
    }

    fn get_path(&self) -> &str {
        &self.path
    }

    fn set_location(&mut self, path: String, persist: bool) {
        self.path = path;
        self.persist = persist;
    }

    fn is_persistent(&self) -> bool {
        self.persist
    }
}

impl PortfolioManager {
    pub fn ledger(&self) -> &HoldingLedger {
        &self.ledger
    }

    pub fn events(&self) -> &EventLog {
        &self.events
    }

    pub fn holdings(&self) -> &[Holding] {
        self.ledger.list()
    }

    /* Add a position, or buy more of an existing one */
    pub fn add_holding(&mut self, holding: Holding) -> Result<&Holding, PortfolioError> {
        let holding = self.ledger.upsert(holding)?;
        info!(id = %holding.id, ticker = %holding.ticker(), quantity = %holding.quantity, "Holding saved");
        Ok(holding)
    }

    pub fn edit_position(
        &mut self,
        id: &str,
        quantity: Decimal,
        average_price: Decimal,
    ) -> Result<&Holding, PortfolioError> {
        self.ledger.edit_position(id, quantity, average_price)
    }

    /* Strict: deleting an unknown holding is an error. Events of the holding are kept. */
    pub fn remove_holding(&mut self, id: &str) -> Result<Holding, PortfolioError> {
        let removed = self.ledger.remove(id)?;
        info!(id, ticker = %removed.ticker(), "Holding removed");
        Ok(removed)
    }

    pub fn remove_holding_if_present(&mut self, id: &str) -> Option<Holding> {
        self.ledger.remove_if_present(id)
    }

    pub fn prune_empty_holdings(&mut self) -> Vec<Holding> {
        self.ledger.prune_empty()
    }

    pub fn record_sale(&mut self, order: SaleOrder) -> Result<&Sale, PortfolioError> {
        self.events.record_sale(&mut self.ledger, order)
    }

    pub fn correct_sale(
        &mut self,
        id: &str,
        date: Option<NaiveDate>,
        sale_price: Option<Decimal>,
    ) -> Result<&Sale, PortfolioError> {
        self.events.correct_sale(id, date, sale_price)
    }

    pub fn remove_sale(&mut self, id: &str) -> Result<Sale, PortfolioError> {
        self.events.remove_sale(&mut self.ledger, id)
    }

    pub fn record_dividend(&mut self, dividend: Dividend) -> Result<&Dividend, PortfolioError> {
        self.events.record_dividend(&self.ledger, dividend)
    }

    pub fn correct_dividend(
        &mut self,
        id: &str,
        date: Option<NaiveDate>,
        amount: Option<Decimal>,
    ) -> Result<&Dividend, PortfolioError> {
        self.events.correct_dividend(id, date, amount)
    }

    pub fn remove_dividend(&mut self, id: &str) -> Result<Dividend, PortfolioError> {
        self.events.remove_dividend(id)
    }

    /* Pull fresh prices for every ticker held. Failures only mark the ticker stale. */
    pub async fn refresh_prices(&mut self, provider: &dyn MarketDataProvider) -> RefreshReport {
        refresh_ledger_prices(&mut self.ledger, provider).await
    }

    pub fn recompute(&self) -> Arc<PortfolioSummary> {
        self.summary.recompute(&self.ledger, &self.events)
    }

    /// Last computed summary, None before the first recompute.
    pub fn summary(&self) -> Option<Arc<PortfolioSummary>> {
        self.summary.current()
    }

    pub fn summary_store(&self) -> &SummaryStore {
        &self.summary
    }
}

impl Drop for PortfolioManager {
    fn drop(&mut self) {
        if self.persist {
            if let Err(e) = self.save() {
                warn!(path = %self.path, error = %e, "Could not save portfolio");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;
    use serial_test::serial;

    use crate::structs::Etf;

    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 5, 2).unwrap()
    }

    /* Start from an empty file: a previous run may have left a saved state */
    fn fresh(path: &str) -> PortfolioManager {
        let _ = std::fs::remove_file(path);
        PortfolioManager::new(Some(path.to_string())).unwrap()
    }

    fn fill(manager: &mut PortfolioManager) {
        manager
            .add_holding(Holding::new(
                "h1",
                Etf::new("360750", "TIGER 미국S&P500").with_price(dec!(120)),
                dec!(10),
                dec!(100),
            ))
            .unwrap();
        manager
            .record_dividend(Dividend {
                id: "d1".to_string(),
                etf_id: "h1".to_string(),
                date: date(),
                amount: dec!(50),
            })
            .unwrap();
    }

    #[test]
    fn test_summary_after_recompute_only() {
        let mut manager = PortfolioManager::new_non_persistent();
        fill(&mut manager);
        assert!(manager.summary().is_none());

        let summary = manager.recompute();
        assert_eq!(summary.total_return, dec!(250));
        assert_eq!(manager.summary(), Some(summary));
    }

    #[test]
    #[serial]
    fn test_save_and_reload() {
        let path = ".data_test/portfolio_save".to_string();
        {
            let mut manager = fresh(&path);
            fill(&mut manager);
            manager
                .record_sale(SaleOrder {
                    id: "s1".to_string(),
                    etf_id: "h1".to_string(),
                    date: date(),
                    sale_price: dec!(150),
                    quantity: dec!(4),
                })
                .unwrap();
            manager.save().unwrap();
        }

        let reloaded = PortfolioManager::new(Some(path)).unwrap();
        let holding = reloaded.ledger().get("h1").unwrap();
        assert_eq!(holding.quantity, dec!(6));
        assert_eq!(holding.etf.current_price, Some(dec!(120)));
        assert_eq!(reloaded.events().sales()[0].realized_profit, dec!(200));
        assert_eq!(reloaded.events().dividends()[0].amount, dec!(50));
        assert!(reloaded.summary().is_none());
        assert_eq!(reloaded.recompute().total_return, dec!(370));
    }

    #[test]
    #[serial]
    fn test_drop_saves() {
        let path = ".data_test/portfolio_drop".to_string();
        {
            let mut manager = fresh(&path);
            fill(&mut manager);
        }

        let reloaded = PortfolioManager::new(Some(path)).unwrap();
        assert_eq!(reloaded.holdings().len(), 1);
    }

    #[test]
    #[serial]
    fn test_non_persistent_never_writes() {
        {
            let mut manager = PortfolioManager::new_non_persistent();
            fill(&mut manager);
        }
        let manager = PortfolioManager::new_non_persistent();
        assert!(manager.holdings().is_empty());
    }

    #[test]
    #[serial]
    fn test_delete_removes_file() {
        let path = ".data_test/portfolio_delete";
        let mut manager = fresh(path);
        fill(&mut manager);
        manager.save().unwrap();
        assert!(crate::utils::file_exists(path));

        manager.delete().unwrap();
        assert!(!crate::utils::file_exists(path));
        manager.set_location(path.to_string(), false);
    }
}
