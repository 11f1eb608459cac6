//! Client for the Scryfall card database.
//!
//! Scryfall asks for 50-100ms between requests, which the default
//! [`FixedDelay`](crate::http::FixedDelay) limiter covers.

use serde_json::{json, Value};
use std::sync::Arc;

use crate::configs::{HttpConfig, ScryfallConfig};
use crate::errors::ApiResult;
use crate::http::{ApiClient, QueryParams, RateLimiter};

pub const API_NAME: &str = "Scryfall";

#[derive(Clone)]
pub struct ScryfallClient {
    api: ApiClient,
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

impl ScryfallClient {
    pub fn new(config: &ScryfallConfig, http: &HttpConfig) -> ApiResult<Self> {
        Ok(Self {
            api: ApiClient::new(API_NAME, &config.host, http)?,
        })
    }

    pub fn with_limiter(
        config: &ScryfallConfig,
        http: &HttpConfig,
        limiter: Arc<dyn RateLimiter>,
    ) -> ApiResult<Self> {
        Ok(Self {
            api: ApiClient::with_limiter(API_NAME, &config.host, http, limiter)?,
        })
    }

    /// Full-text search using the Scryfall query syntax
    pub async fn search_cards(&self, query: &str) -> ApiResult<Value> {
        let params = QueryParams::new().with("q", query);
        self.api.get("/cards/search", Some(&params)).await
    }

    /// Look a card up by name, fuzzy unless `exact` is set
    pub async fn get_card_by_name(&self, name: &str, exact: bool) -> ApiResult<Value> {
        let key = if exact { "exact" } else { "fuzzy" };
        let params = QueryParams::new().with(key, name);
        self.api.get("/cards/named", Some(&params)).await
    }

    pub async fn get_random_card(&self) -> ApiResult<Value> {
        self.api.get("/cards/random", None).await
    }

    pub async fn get_card_by_id(&self, scryfall_id: &str) -> ApiResult<Value> {
        self.api
            .get(&format!("/cards/{}", segment(scryfall_id)), None)
            .await
    }

    /// Up to 20 full English card names matching the query
    pub async fn autocomplete_card_name(&self, query: &str) -> ApiResult<Value> {
        let params = QueryParams::new().with("q", query);
        self.api.get("/cards/autocomplete", Some(&params)).await
    }

    /// Fetch many cards at once. Each identifier is an object such as
    /// `{"id": ...}`, `{"name": ...}` or `{"set": ..., "collector_number": ...}`.
    pub async fn get_card_collection(&self, identifiers: &[Value]) -> ApiResult<Value> {
        self.api
            .post("/cards/collection", &json!({ "identifiers": identifiers }))
            .await
    }

    pub async fn get_card_by_code_and_number(
        &self,
        code: &str,
        number: &str,
        lang: &str,
    ) -> ApiResult<Value> {
        let path = format!(
            "/cards/{}/{}/{}",
            segment(code),
            segment(number),
            segment(lang)
        );
        self.api.get(&path, None).await
    }

    pub async fn get_card_by_multiverse_id(&self, multiverse_id: u64) -> ApiResult<Value> {
        self.api
            .get(&format!("/cards/multiverse/{}", multiverse_id), None)
            .await
    }

    pub async fn get_card_by_mtgo_id(&self, mtgo_id: u64) -> ApiResult<Value> {
        self.api
            .get(&format!("/cards/mtgo/{}", mtgo_id), None)
            .await
    }

    pub async fn get_card_by_arena_id(&self, arena_id: u64) -> ApiResult<Value> {
        self.api
            .get(&format!("/cards/arena/{}", arena_id), None)
            .await
    }

    pub async fn get_card_by_tcgplayer_id(&self, tcgplayer_id: u64) -> ApiResult<Value> {
        self.api
            .get(&format!("/cards/tcgplayer/{}", tcgplayer_id), None)
            .await
    }

    pub async fn get_card_by_cardmarket_id(&self, cardmarket_id: u64) -> ApiResult<Value> {
        self.api
            .get(&format!("/cards/cardmarket/{}", cardmarket_id), None)
            .await
    }

    pub async fn get_all_sets(&self) -> ApiResult<Value> {
        self.api.get("/sets", None).await
    }

    pub async fn get_set_by_code(&self, code: &str) -> ApiResult<Value> {
        self.api
            .get(&format!("/sets/{}", segment(code)), None)
            .await
    }

    pub async fn get_set_by_tcgplayer_id(&self, tcgplayer_id: u64) -> ApiResult<Value> {
        self.api
            .get(&format!("/sets/tcgplayer/{}", tcgplayer_id), None)
            .await
    }

    pub async fn get_set_by_id(&self, scryfall_id: &str) -> ApiResult<Value> {
        self.api
            .get(&format!("/sets/{}", segment(scryfall_id)), None)
            .await
    }
}
