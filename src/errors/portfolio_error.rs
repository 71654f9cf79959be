use thiserror::Error;

use super::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PortfolioError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: String },
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl PortfolioError {
    pub fn holding_not_found(id: &str) -> Self {
        PortfolioError::NotFound {
            kind: "Holding",
            id: id.to_string(),
        }
    }

    pub fn sale_not_found(id: &str) -> Self {
        PortfolioError::NotFound {
            kind: "Sale",
            id: id.to_string(),
        }
    }

    pub fn dividend_not_found(id: &str) -> Self {
        PortfolioError::NotFound {
            kind: "Dividend",
            id: id.to_string(),
        }
    }
}
