use hashbrown::HashMap;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    errors::{PortfolioError, ValidationError},
    functions::weighted_average_price,
    structs::{Holding, HoldingId, Sale},
};

/* Current positions, keyed by holding id. The Vec keeps insertion order (list order and fold
order of the summary), the map gives the position of an id in that Vec. */
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "Vec<Holding>", into = "Vec<Holding>")]
pub struct HoldingLedger {
    holdings: Vec<Holding>,
    index: HashMap<HoldingId, usize>,
}

/* Loading a saved ledger: every holding is validated again and ids must be unique */
impl TryFrom<Vec<Holding>> for HoldingLedger {
    type Error = ValidationError;

    fn try_from(holdings: Vec<Holding>) -> Result<Self, Self::Error> {
        let mut index = HashMap::with_capacity(holdings.len());
        for (i, holding) in holdings.iter().enumerate() {
            holding.validate()?;
            if index.insert(holding.id.clone(), i).is_some() {
                return Err(ValidationError::DuplicateId {
                    kind: "Holding",
                    id: holding.id.clone(),
                });
            }
        }
        Ok(Self { holdings, index })
    }
}

impl From<HoldingLedger> for Vec<Holding> {
    fn from(ledger: HoldingLedger) -> Self {
        ledger.holdings
    }
}

impl HoldingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: &str) -> Option<&Holding> {
        self.index.get(id).map(|&i| &self.holdings[i])
    }

    pub fn contains(&self, id: &str) -> bool {
        self.index.contains_key(id)
    }

    /// Holdings in insertion order.
    pub fn list(&self) -> &[Holding] {
        &self.holdings
    }

    pub fn len(&self) -> usize {
        self.holdings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.holdings.is_empty()
    }

    /* Insert a new holding, or treat the incoming record as a buy of `quantity` units at
    `average_price` on the existing one. On a merge the descriptive fields come from the incoming
    record, except the price which is kept when the incoming record carries none. */
    pub fn upsert(&mut self, incoming: Holding) -> Result<&Holding, ValidationError> {
        incoming.validate()?;

        let Some(&i) = self.index.get(&incoming.id) else {
            debug!(id = %incoming.id, ticker = %incoming.ticker(), "New holding");
            self.index.insert(incoming.id.clone(), self.holdings.len());
            self.holdings.push(incoming);
            return Ok(&self.holdings[self.holdings.len() - 1]);
        };

        let current = &self.holdings[i];
        if current.etf.ticker != incoming.etf.ticker {
            return Err(ValidationError::TickerMismatch {
                id: incoming.id,
                stored: current.etf.ticker.clone(),
                incoming: incoming.etf.ticker,
            });
        }

        let out_of_range = ValidationError::AmountOverflow {
            field: "averagePrice",
            quantity: incoming.quantity,
            price: incoming.average_price,
        };
        let mut merged = incoming;
        merged.average_price = weighted_average_price(
            current.quantity,
            current.average_price,
            merged.quantity,
            merged.average_price,
        )
        .ok_or(out_of_range.clone())?;
        merged.quantity = current
            .quantity
            .checked_add(merged.quantity)
            .ok_or(out_of_range)?;
        merged.added_at = current.added_at;
        if merged.etf.current_price.is_none() {
            merged.etf.current_price = current.etf.current_price;
            merged.price_stale = current.price_stale;
        } else {
            merged.price_stale = false;
        }
        merged.validate()?;

        debug!(id = %merged.id, quantity = %merged.quantity, average = %merged.average_price, "Merged buy into holding");
        self.holdings[i] = merged;
        Ok(&self.holdings[i])
    }

    /* Correction of a position, replaces quantity and cost basis as typed by the user */
    pub fn edit_position(
        &mut self,
        id: &str,
        quantity: Decimal,
        average_price: Decimal,
    ) -> Result<&Holding, PortfolioError> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| PortfolioError::holding_not_found(id))?;
        let mut edited = self.holdings[i].clone();
        edited.quantity = quantity;
        edited.average_price = average_price;
        edited.validate()?;
        self.holdings[i] = edited;
        Ok(&self.holdings[i])
    }

    /* Strict deletion: an unknown id is an error */
    pub fn remove(&mut self, id: &str) -> Result<Holding, PortfolioError> {
        self.remove_if_present(id)
            .ok_or_else(|| PortfolioError::holding_not_found(id))
    }

    /* Idempotent deletion for callers that may delete twice */
    pub fn remove_if_present(&mut self, id: &str) -> Option<Holding> {
        let i = self.index.remove(id)?;
        let removed = self.holdings.remove(i);
        self.reindex();
        Some(removed)
    }

    /* Drop every holding whose quantity reached zero, returns them in ledger order */
    pub fn prune_empty(&mut self) -> Vec<Holding> {
        let (empty, kept): (Vec<Holding>, Vec<Holding>) =
            self.holdings.drain(..).partition(|h| h.is_empty());
        self.holdings = kept;
        self.reindex();
        empty
    }

    /// Distinct tickers, in ledger order.
    pub fn tickers(&self) -> Vec<String> {
        let mut tickers: Vec<String> = Vec::new();
        for holding in &self.holdings {
            if !tickers.iter().any(|t| t == holding.ticker()) {
                tickers.push(holding.ticker().to_string());
            }
        }
        tickers
    }

    /* Apply a fresh market price to every holding of `ticker`, returns how many were updated */
    pub fn apply_quote(&mut self, ticker: &str, price: Decimal) -> usize {
        let mut updated = 0;
        for holding in self.holdings.iter_mut().filter(|h| h.ticker() == ticker) {
            holding.etf.current_price = Some(price);
            holding.price_stale = false;
            updated += 1;
        }
        updated
    }

    /* The last refresh of `ticker` failed: the known price (if any) is kept but flagged */
    pub fn mark_stale(&mut self, ticker: &str) -> usize {
        let mut marked = 0;
        for holding in self.holdings.iter_mut().filter(|h| h.ticker() == ticker) {
            holding.price_stale = true;
            marked += 1;
        }
        marked
    }

    /* Take `quantity` units out of a holding for a sale. Returns the holding as it was before the
    units left, so the sale can be booked at its average price. Nothing is changed on error. */
    pub(crate) fn reduce_quantity(
        &mut self,
        id: &str,
        quantity: Decimal,
    ) -> Result<Holding, ValidationError> {
        let i = *self
            .index
            .get(id)
            .ok_or_else(|| ValidationError::UnknownHolding(id.to_string()))?;
        let holding = &mut self.holdings[i];
        if quantity > holding.quantity {
            return Err(ValidationError::SaleExceedsHolding {
                etf_id: id.to_string(),
                requested: quantity,
                available: holding.quantity,
            });
        }
        let before = holding.clone();
        holding.quantity = (holding.quantity - quantity).max(dec!(0));
        Ok(before)
    }

    /* Put back units of a cancelled sale at the cost basis they were sold from. The holding must
    still exist and track the same ticker, an id reused for another ETF is left alone. */
    pub(crate) fn restore_quantity(&mut self, sale: &Sale) -> Result<&Holding, ValidationError> {
        let i = *self
            .index
            .get(&sale.etf_id)
            .ok_or_else(|| ValidationError::UnknownHolding(sale.etf_id.clone()))?;
        let holding = &self.holdings[i];
        if holding.etf.ticker != sale.ticker {
            return Err(ValidationError::TickerMismatch {
                id: sale.etf_id.clone(),
                stored: holding.etf.ticker.clone(),
                incoming: sale.ticker.clone(),
            });
        }

        let out_of_range = ValidationError::AmountOverflow {
            field: "averagePrice",
            quantity: sale.quantity,
            price: sale.average_price,
        };
        let mut restored = holding.clone();
        restored.average_price = weighted_average_price(
            holding.quantity,
            holding.average_price,
            sale.quantity,
            sale.average_price,
        )
        .ok_or(out_of_range.clone())?;
        restored.quantity = holding
            .quantity
            .checked_add(sale.quantity)
            .ok_or(out_of_range)?;
        restored.validate()?;

        self.holdings[i] = restored;
        Ok(&self.holdings[i])
    }

    fn reindex(&mut self) {
        self.index = self
            .holdings
            .iter()
            .enumerate()
            .map(|(i, holding)| (holding.id.clone(), i))
            .collect();
    }
}
