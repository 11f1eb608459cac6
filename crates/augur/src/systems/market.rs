use async_trait::async_trait;
use chrono::NaiveDateTime;
use serde::Deserialize;
use serde_json::{json, Value};
use std::str::FromStr;

use super::{parse_args, System};
use crate::clients::alpha_vantage::{NewsQuery, NewsSort, TIME_FORMAT};
use crate::clients::AlphaVantageClient;
use crate::errors::{ToolError, ToolResult};
use crate::tool::{Tool, ToolCall};

#[derive(Deserialize)]
struct StockDataArgs {
    symbol: String,
    news_limit: Option<u32>,
    news_sort: Option<String>,
    topics: Option<String>,
    time_from: Option<String>,
    time_to: Option<String>,
}

impl StockDataArgs {
    fn news_query(&self) -> ToolResult<NewsQuery> {
        let sort = self
            .news_sort
            .as_deref()
            .map(|s| {
                NewsSort::from_str(s).map_err(|_| {
                    ToolError::InvalidParameters(format!(
                        "news_sort must be LATEST, EARLIEST or RELEVANCE, got '{}'",
                        s
                    ))
                })
            })
            .transpose()?;

        Ok(NewsQuery {
            topics: self.topics.clone(),
            time_from: parse_time("time_from", self.time_from.as_deref())?,
            time_to: parse_time("time_to", self.time_to.as_deref())?,
            sort,
            limit: self.news_limit,
        })
    }
}

fn parse_time(key: &str, value: Option<&str>) -> ToolResult<Option<NaiveDateTime>> {
    value
        .map(|raw| {
            NaiveDateTime::parse_from_str(raw, TIME_FORMAT).map_err(|e| {
                ToolError::InvalidParameters(format!(
                    "{} must use the YYYYMMDDTHHMM format, got '{}': {}",
                    key, raw, e
                ))
            })
        })
        .transpose()
}

/// Stock prices and market news from Alpha Vantage
#[derive(Clone)]
pub struct MarketSystem {
    client: AlphaVantageClient,
    tools: Vec<Tool>,
}

impl MarketSystem {
    pub fn new(client: AlphaVantageClient) -> Self {
        let stock_data = Tool::new(
            "get_stock_data",
            "Fetches daily adjusted prices and news sentiment for a stock ticker symbol (e.g. \"AAPL\" for Apple).",
            json!({
                "type": "object",
                "required": ["symbol"],
                "properties": {
                    "symbol": {"type": "string", "description": "The stock ticker symbol."},
                    "news_limit": {
                        "type": "integer",
                        "minimum": 1,
                        "description": "Maximum number of news articles."
                    },
                    "news_sort": {
                        "enum": ["LATEST", "EARLIEST", "RELEVANCE"],
                        "description": "Order of the news articles."
                    },
                    "topics": {
                        "type": "string",
                        "description": "Comma separated news topics, e.g. \"earnings,technology\"."
                    },
                    "time_from": {
                        "type": "string",
                        "description": "Earliest article time, YYYYMMDDTHHMM."
                    },
                    "time_to": {
                        "type": "string",
                        "description": "Latest article time, YYYYMMDDTHHMM."
                    }
                }
            }),
        );

        Self {
            client,
            tools: vec![stock_data],
        }
    }

    async fn stock_data(&self, arguments: Value) -> ToolResult<Value> {
        let args: StockDataArgs = parse_args(arguments)?;
        let symbol = args.symbol.trim();
        if symbol.is_empty() {
            return Err(ToolError::InvalidParameters("symbol must not be empty".into()));
        }
        let news = args.news_query()?;
        Ok(self.client.stock_data(symbol, &news).await)
    }
}

#[async_trait]
impl System for MarketSystem {
    fn name(&self) -> &str {
        "market"
    }

    fn description(&self) -> &str {
        "Stock market prices and news sentiment backed by the Alpha Vantage API"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> ToolResult<Value> {
        match tool_call.name.as_str() {
            "get_stock_data" => self.stock_data(tool_call.arguments).await,
            _ => Err(ToolError::ToolNotFound(tool_call.name)),
        }
    }
}
