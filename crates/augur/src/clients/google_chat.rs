use reqwest::{Method, StatusCode};
use serde_json::json;
use std::sync::Arc;

use crate::configs::{GoogleChatConfig, HttpConfig};
use crate::errors::{ApiError, ApiResult};
use crate::http::{ApiClient, NoDelay, RateLimiter};

pub const API_NAME: &str = "Google Chat";
pub const MISSING_WEBHOOK: &str = "Error: GOOGLE_CHAT_WEBHOOK_URL environment variable not set.";

/// Posts text messages to a Google Chat space through an incoming webhook.
///
/// The webhook is optional configuration; without it every send reports
/// [`MISSING_WEBHOOK`] and no request is made.
#[derive(Clone)]
pub struct GoogleChatClient {
    api: Option<ApiClient>,
}

impl GoogleChatClient {
    pub fn new(config: &GoogleChatConfig, http: &HttpConfig) -> ApiResult<Self> {
        Self::with_limiter(config, http, Arc::new(NoDelay))
    }

    pub fn with_limiter(
        config: &GoogleChatConfig,
        http: &HttpConfig,
        limiter: Arc<dyn RateLimiter>,
    ) -> ApiResult<Self> {
        let api = match &config.webhook_url {
            Some(url) => Some(ApiClient::with_limiter(API_NAME, url, http, limiter)?),
            None => None,
        };
        Ok(Self { api })
    }

    pub fn is_configured(&self) -> bool {
        self.api.is_some()
    }

    /// Send `message` and describe the outcome as a human readable sentence.
    pub async fn send_message(&self, message: &str) -> String {
        let Some(api) = &self.api else {
            tracing::warn!("GOOGLE_CHAT_WEBHOOK_URL is not set, message not sent");
            return MISSING_WEBHOOK.to_string();
        };

        // The webhook URL is complete (including its key/token query), so the path is empty.
        // Any 200 is a success; the body is never decoded.
        let payload = json!({ "text": message });
        let error = match api.send(Method::POST, "", None, Some(&payload)).await {
            Ok(response) if response.status == StatusCode::OK => {
                return format!("Message sent successfully to Google Chat: {}", message);
            }
            Ok(response) => api.rejected(response.status, &response.body),
            Err(e) => e,
        };

        match error {
            ApiError::Status {
                status, details, ..
            } => {
                let details = match details {
                    Some(serde_json::Value::String(text)) => text,
                    Some(value) => value.to_string(),
                    None => String::new(),
                };
                format!("Error sending message to Google Chat: {} {}", status, details)
                    .trim_end()
                    .to_string()
            }
            ApiError::Transport { message, .. } | ApiError::Decode { message, .. } => {
                format!("An unexpected error occurred: {}", message)
            }
            e => format!("An unexpected error occurred: {}", e),
        }
    }
}
