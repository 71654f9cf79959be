use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::{functions::compute_summary, structs::PortfolioSummary};

use super::{EventLog, HoldingLedger};

/* Last computed summary. A recompute builds a whole new summary and swaps the pointer under the
write lock, so a reader holds either the previous snapshot or the new one. */
#[derive(Debug, Default)]
pub struct SummaryStore {
    current: RwLock<Option<Arc<PortfolioSummary>>>,
}

impl SummaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// None until the first recompute.
    pub fn current(&self) -> Option<Arc<PortfolioSummary>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub fn recompute(&self, ledger: &HoldingLedger, log: &EventLog) -> Arc<PortfolioSummary> {
        let summary = Arc::new(compute_summary(ledger.list(), log.sales(), log.dividends()));
        debug!(
            total_return = %summary.total_return,
            stale = summary.is_stale,
            "Portfolio summary recomputed"
        );
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&summary));
        summary
    }

    pub fn clear(&self) {
        *self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }
}
