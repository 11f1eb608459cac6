//! Client for the Alpha Vantage market data API.

use chrono::NaiveDateTime;
use serde_json::{json, Value};
use std::sync::Arc;
use strum_macros::{Display, EnumString};

use crate::configs::{AlphaVantageConfig, HttpConfig};
use crate::errors::ApiResult;
use crate::http::{ApiClient, QueryParams, RateLimiter};

pub const API_NAME: &str = "Alpha Vantage";
pub const QUERY_PATH: &str = "/query";
/// Timestamp layout used by `time_from` / `time_to`
pub const TIME_FORMAT: &str = "%Y%m%dT%H%M";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Function {
    TimeSeriesDailyAdjusted,
    NewsSentiment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum NewsSort {
    Latest,
    Earliest,
    Relevance,
}

/// Optional filters for the news sentiment feed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewsQuery {
    pub topics: Option<String>,
    pub time_from: Option<NaiveDateTime>,
    pub time_to: Option<NaiveDateTime>,
    pub sort: Option<NewsSort>,
    pub limit: Option<u32>,
}

#[derive(Clone)]
pub struct AlphaVantageClient {
    api: ApiClient,
    api_key: Option<String>,
}

impl AlphaVantageClient {
    pub fn new(config: &AlphaVantageConfig, http: &HttpConfig) -> ApiResult<Self> {
        Ok(Self {
            api: ApiClient::new(API_NAME, &config.host, http)?,
            api_key: config.api_key.clone(),
        })
    }

    pub fn with_limiter(
        config: &AlphaVantageConfig,
        http: &HttpConfig,
        limiter: Arc<dyn RateLimiter>,
    ) -> ApiResult<Self> {
        Ok(Self {
            api: ApiClient::with_limiter(API_NAME, &config.host, http, limiter)?,
            api_key: config.api_key.clone(),
        })
    }

    fn params(&self, function: Function) -> QueryParams {
        QueryParams::new().with("function", function)
    }

    async fn query(&self, mut params: QueryParams) -> ApiResult<Value> {
        // A missing key is sent empty so the provider reports the problem itself.
        if self.api_key.is_none() {
            tracing::warn!("ALPHA_VANTAGE_API_KEY is not set, sending request without a key");
        }
        params.push("apikey", self.api_key.as_deref().unwrap_or_default());
        self.api.get(QUERY_PATH, Some(&params)).await
    }

    pub async fn daily_adjusted(&self, symbol: &str) -> ApiResult<Value> {
        let params = self
            .params(Function::TimeSeriesDailyAdjusted)
            .with("symbol", symbol);
        self.query(params).await
    }

    pub async fn news_sentiment(&self, tickers: &str, news: &NewsQuery) -> ApiResult<Value> {
        let mut params = self.params(Function::NewsSentiment).with("tickers", tickers);
        params
            .push_opt("topics", news.topics.as_deref())
            .push_opt("time_from", news.time_from.map(|t| t.format(TIME_FORMAT)))
            .push_opt("time_to", news.time_to.map(|t| t.format(TIME_FORMAT)))
            .push_opt("sort", news.sort)
            .push_opt("limit", news.limit);
        self.query(params).await
    }

    /// Daily adjusted prices and news sentiment for one symbol, fetched back to back.
    /// Each half carries either the provider's payload or the rendered error.
    pub async fn stock_data(&self, symbol: &str, news: &NewsQuery) -> Value {
        let daily = self.daily_adjusted(symbol).await;
        let sentiment = self.news_sentiment(symbol, news).await;

        json!({
            "symbol": symbol,
            "daily_adjusted": daily.unwrap_or_else(|e| e.to_value()),
            "news_sentiment": sentiment.unwrap_or_else(|e| e.to_value()),
        })
    }
}
