use thiserror::Error;

/* Failures coming from the market-data provider. None of them abort a summary: the ticker is
marked stale and the aggregation falls back to the last known price. */
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Market data request failed: {0}")]
    ApiCallError(#[from] reqwest::Error),
    #[error("Provider answered {code}: {message}")]
    ProviderError { code: String, message: String },
    #[error("Couldn't find price for ticker {ticker}")]
    CouldNotFindPrice { ticker: String },
    #[error("Invalid price {raw:?} for ticker {ticker}")]
    InvalidPrice { ticker: String, raw: String },
}
