use serde::{Deserialize, Serialize};

use crate::structs::Etf;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EtfSort {
    Dividend,
    MarketCap,
}

/* Listing parameters for the ETF catalog. Filters apply first, then the sort, then the limit. */
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EtfQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<EtfSort>,
    pub limit: Option<usize>,
}

impl EtfQuery {
    pub fn apply<'a>(&self, etfs: &'a [Etf]) -> Vec<&'a Etf> {
        let needle = self.search.as_ref().map(|s| s.trim().to_lowercase());
        let mut result: Vec<&Etf> = etfs
            .iter()
            .filter(|etf| self.category.as_ref().map_or(true, |c| &etf.category == c))
            .filter(|etf| {
                needle.as_ref().map_or(true, |n| {
                    etf.name.to_lowercase().contains(n.as_str())
                        || etf.ticker.to_lowercase().contains(n.as_str())
                })
            })
            .collect();

        // sort_by is stable, ties keep the catalog order
        match self.sort_by {
            Some(EtfSort::Dividend) => {
                result.sort_by(|a, b| b.dividend_yield.cmp(&a.dividend_yield))
            }
            Some(EtfSort::MarketCap) => result.sort_by(|a, b| b.market_cap.cmp(&a.market_cap)),
            None => (),
        }

        if let Some(limit) = self.limit {
            result.truncate(limit);
        }
        result
    }
}

pub fn find_by_ticker<'a>(etfs: &'a [Etf], ticker: &str) -> Option<&'a Etf> {
    etfs.iter().find(|etf| etf.ticker == ticker)
}

/* Distinct categories in the order they first appear */
pub fn categories(etfs: &[Etf]) -> Vec<String> {
    let mut seen = hashbrown::HashSet::new();
    etfs.iter()
        .filter(|etf| seen.insert(etf.category.as_str()))
        .map(|etf| etf.category.clone())
        .collect()
}
