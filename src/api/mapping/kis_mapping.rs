use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::{
    api::{KisApiResponse, Quote, StockPrice},
    errors::ApiError,
};

/* Turn an inquire-price answer into a Quote. A non "0" rt_cd or a missing output is a provider
error, the current price is mandatory while the other figures default to zero. */
pub fn map_price_response(
    ticker: &str,
    response: KisApiResponse<StockPrice>,
    as_of: DateTime<Utc>,
) -> Result<Quote, ApiError> {
    let output = match response.output {
        Some(output) if response.rt_cd == "0" => output,
        _ => {
            return Err(ApiError::ProviderError {
                code: response.msg_cd,
                message: response.msg1,
            })
        }
    };

    let current_price = parse_decimal(&output.stck_prpr).ok_or_else(|| ApiError::InvalidPrice {
        ticker: ticker.to_string(),
        raw: output.stck_prpr.clone(),
    })?;
    if current_price.is_sign_negative() {
        return Err(ApiError::InvalidPrice {
            ticker: ticker.to_string(),
            raw: output.stck_prpr,
        });
    }

    Ok(Quote {
        ticker: ticker.to_string(),
        current_price,
        change_price: parse_decimal(&output.prdy_vrss).unwrap_or_default(),
        change_rate: parse_decimal(&output.prdy_ctrt).unwrap_or_default(),
        volume: output.acml_vol.trim().parse().unwrap_or(0),
        as_of,
    })
}

fn parse_decimal(raw: &str) -> Option<Decimal> {
    Decimal::from_str(raw.trim()).ok()
}
