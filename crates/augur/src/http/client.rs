use reqwest::header::{ACCEPT, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::sync::Arc;

use super::query::QueryParams;
use super::rate_limit::{FixedDelay, RateLimiter};
use crate::configs::HttpConfig;
use crate::errors::{ApiError, ApiResult};

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Request helper for a single external JSON API.
///
/// Every call waits on the rate limiter, sends one request and classifies the
/// response: 200 yields the decoded body, anything else becomes an [`ApiError`].
/// Nothing is retried.
#[derive(Clone)]
pub struct ApiClient {
    name: String,
    base_url: String,
    user_agent: String,
    client: Client,
    limiter: Arc<dyn RateLimiter>,
}

impl ApiClient {
    pub fn new<N, B>(name: N, base_url: B, config: &HttpConfig) -> ApiResult<Self>
    where
        N: Into<String>,
        B: Into<String>,
    {
        Self::with_limiter(
            name,
            base_url,
            config,
            Arc::new(FixedDelay::new(config.request_delay)),
        )
    }

    pub fn with_limiter<N, B>(
        name: N,
        base_url: B,
        config: &HttpConfig,
        limiter: Arc<dyn RateLimiter>,
    ) -> ApiResult<Self>
    where
        N: Into<String>,
        B: Into<String>,
    {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ApiError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            name: name.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_agent: config.user_agent.clone(),
            client,
            limiter,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Full request URL: base URL, path, then the encoded query when there is one.
    pub fn url(&self, path: &str, query: Option<&QueryParams>) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            url.push('?');
            url.push_str(&query.encode());
        }
        url
    }

    pub async fn get(&self, path: &str, query: Option<&QueryParams>) -> ApiResult<Value> {
        self.call(Method::GET, path, query, None).await
    }

    pub async fn post(&self, path: &str, body: &Value) -> ApiResult<Value> {
        self.call(Method::POST, path, None, Some(body)).await
    }

    pub async fn call(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> ApiResult<Value> {
        let response = self.send(method, path, query, body).await?;

        match response.status {
            StatusCode::OK => serde_json::from_str(&response.body).map_err(|e| {
                tracing::warn!(api = %self.name, error = %e, "response body is not JSON");
                ApiError::Decode {
                    api: self.name.clone(),
                    message: e.to_string(),
                }
            }),
            status => Err(self.rejected(status, &response.body)),
        }
    }

    /// Send one request and hand back the status and body without decoding.
    ///
    /// Only transport failures are errors here; callers classify the status.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        query: Option<&QueryParams>,
        body: Option<&Value>,
    ) -> ApiResult<RawResponse> {
        let url = self.url(path, query);

        self.limiter.acquire().await;
        tracing::debug!(api = %self.name, %method, path, "sending request");

        let mut request = self
            .client
            .request(method, &url)
            .header(USER_AGENT, &self.user_agent)
            .header(ACCEPT, "application/json");

        if let Some(body) = body {
            let payload = serde_json::to_vec(body).map_err(|e| ApiError::Decode {
                api: self.name.clone(),
                message: e.to_string(),
            })?;
            request = request.header(CONTENT_TYPE, JSON_CONTENT_TYPE).body(payload);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(api = %self.name, error = %e, "request failed");
            ApiError::Transport {
                api: self.name.clone(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ApiError::Transport {
            api: self.name.clone(),
            message: e.to_string(),
        })?;

        Ok(RawResponse { status, body })
    }

    /// The [`ApiError::Status`] for a response that was not accepted
    pub fn rejected(&self, status: StatusCode, body: &str) -> ApiError {
        tracing::warn!(api = %self.name, status = status.as_u16(), "request rejected");
        ApiError::Status {
            api: self.name.clone(),
            status: status.as_u16(),
            details: error_details(body),
        }
    }
}

/// Status and undecoded body of a response
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: String,
}

fn error_details(body: &str) -> Option<Value> {
    if body.trim().is_empty() {
        return None;
    }
    Some(serde_json::from_str(body).unwrap_or_else(|_| Value::String(body.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::rate_limit::NoDelay;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(base_url: &str) -> ApiClient {
        ApiClient::with_limiter("Test", base_url, &HttpConfig::default(), Arc::new(NoDelay))
            .unwrap()
    }

    #[test]
    fn test_url_building() {
        let api = client("https://api.example.com/");
        assert_eq!(api.url("/sets", None), "https://api.example.com/sets");
        assert_eq!(
            api.url("/sets", Some(&QueryParams::new())),
            "https://api.example.com/sets"
        );

        let query = QueryParams::new().with("q", "Black Lotus").with("page", 2);
        assert_eq!(
            api.url("/cards/search", Some(&query)),
            "https://api.example.com/cards/search?q=Black%20Lotus&page=2"
        );
    }

    #[tokio::test]
    async fn test_ok_returns_body_verbatim() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        let body = json!({"object": "list", "data": [{"name": "Island"}], "has_more": false});
        Mock::given(method("GET"))
            .and(path("/cards/search"))
            .and(query_param("q", "t:island"))
            .and(header("accept", "application/json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
            .expect(1)
            .mount(&server)
            .await;

        let query = QueryParams::new().with("q", "t:island");
        let result = client(&server.uri()).get("/cards/search", Some(&query)).await?;
        assert_eq!(result, body);
        Ok(())
    }

    #[tokio::test]
    async fn test_post_sends_json_body() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        let body = json!({"identifiers": [{"name": "Ancestral Recall"}]});
        Mock::given(method("POST"))
            .and(path("/cards/collection"))
            .and(header("content-type", JSON_CONTENT_TYPE))
            .and(body_json(body.clone()))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
            .expect(1)
            .mount(&server)
            .await;

        let result = client(&server.uri()).post("/cards/collection", &body).await?;
        assert_eq!(result, json!({"data": []}));
        Ok(())
    }

    #[tokio::test]
    async fn test_non_ok_status_carries_json_details() {
        let server = MockServer::start().await;
        let details = json!({"object": "error", "code": "not_found", "status": 404});
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(details.clone()))
            .mount(&server)
            .await;

        let error = client(&server.uri()).get("/cards/nope", None).await.unwrap_err();
        assert_eq!(error.status(), Some(404));
        assert_eq!(
            error,
            ApiError::Status {
                api: "Test".to_string(),
                status: 404,
                details: Some(details),
            }
        );
    }

    #[tokio::test]
    async fn test_non_ok_status_with_text_body() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&server)
            .await;

        let error = client(&server.uri()).get("/sets", None).await.unwrap_err();
        assert_eq!(error.status(), Some(503));
        assert_eq!(
            error.to_value()["details"],
            Value::String("upstream unavailable".to_string())
        );
    }

    #[tokio::test]
    async fn test_every_non_ok_status_is_reported() {
        let server = MockServer::start().await;
        for code in [201u16, 204, 301, 400, 401, 429, 500] {
            server.reset().await;
            Mock::given(method("GET"))
                .respond_with(ResponseTemplate::new(code))
                .mount(&server)
                .await;

            let error = client(&server.uri()).get("/sets", None).await.unwrap_err();
            assert_eq!(error.status(), Some(code));
        }
    }

    #[tokio::test]
    async fn test_ok_with_invalid_json_is_decode_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let error = client(&server.uri()).get("/sets", None).await.unwrap_err();
        assert!(matches!(error, ApiError::Decode { .. }));
    }

    #[tokio::test]
    async fn test_send_leaves_body_undecoded() -> anyhow::Result<()> {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("ok"))
            .mount(&server)
            .await;

        let api = client(&server.uri());
        let response = api
            .send(Method::POST, "", None, Some(&json!({"text": "hi"})))
            .await?;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, "ok");

        let error = api.rejected(StatusCode::TOO_MANY_REQUESTS, "");
        assert_eq!(error.status(), Some(429));
        assert_eq!(
            error.to_value(),
            json!({"error": "Test API returned status 429", "status": 429})
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        // Nothing listens on the discard port.
        let error = client("http://127.0.0.1:9").get("/sets", None).await.unwrap_err();
        match error {
            ApiError::Transport { api, message } => {
                assert_eq!(api, "Test");
                assert!(!message.is_empty());
            }
            other => panic!("Expected transport error, got {:?}", other),
        }
    }
}
