use async_trait::async_trait;
use chrono::Utc;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    api::{map_price_response, MarketDataProvider, Quote},
    config::KisConfig,
    errors::ApiError,
};

const INQUIRE_PRICE_PATH: &str = "/uapi/domestic-stock/v1/quotations/inquire-price";
const INQUIRE_PRICE_TR_ID: &str = "FHKST01010100";
const MARKET_DIVISION_STOCK: &str = "J";

/* Common envelope of the Korea Investment Open API. rt_cd "0" means success. */
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct KisApiResponse<T> {
    pub rt_cd: String,
    #[serde(default)]
    pub msg_cd: String,
    #[serde(default)]
    pub msg1: String,
    pub output: Option<T>,
}

/* inquire-price output, every figure is sent as a string */
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StockPrice {
    pub stck_prpr: String, // current price
    #[serde(default)]
    pub prdy_vrss: String, // change since previous close
    #[serde(default)]
    pub prdy_vrss_sign: String,
    #[serde(default)]
    pub prdy_ctrt: String, // change rate %
    #[serde(default)]
    pub stck_oprc: String,
    #[serde(default)]
    pub stck_hgpr: String,
    #[serde(default)]
    pub stck_lwpr: String,
    #[serde(default)]
    pub acml_vol: String,
    #[serde(default)]
    pub acml_tr_pbmn: String,
}

/* Quote client for domestic listings. The access token comes from the configuration, issuing
and renewing it is done elsewhere. */
pub struct KisClient {
    client: Client,
    config: KisConfig,
}

impl KisClient {
    pub fn new(config: KisConfig) -> Result<Self, ApiError> {
        let client = Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    /* Reuse an already configured reqwest client */
    pub fn with_client(client: Client, config: KisConfig) -> Self {
        Self { client, config }
    }

    async fn fetch_stock_price(&self, ticker: &str) -> Result<KisApiResponse<StockPrice>, ApiError> {
        let url = format!(
            "{}{INQUIRE_PRICE_PATH}",
            self.config.base_url.trim_end_matches('/')
        );
        debug!(ticker, "Fetching KIS price");
        let response = self
            .client
            .get(url)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {}", self.config.access_token))
            .header("appkey", &self.config.app_key)
            .header("appsecret", &self.config.app_secret)
            .header("tr_id", INQUIRE_PRICE_TR_ID)
            .query(&[
                ("FID_COND_MRKT_DIV_CODE", MARKET_DIVISION_STOCK),
                ("FID_INPUT_ISCD", ticker),
            ])
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<KisApiResponse<StockPrice>>().await?)
    }
}

#[async_trait]
impl MarketDataProvider for KisClient {
    async fn quote(&self, ticker: &str) -> Result<Quote, ApiError> {
        let response = self.fetch_stock_price(ticker).await?;
        map_price_response(ticker, response, Utc::now())
    }
}
