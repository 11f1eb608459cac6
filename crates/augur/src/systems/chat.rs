use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, System};
use crate::clients::GoogleChatClient;
use crate::errors::{ToolError, ToolResult};
use crate::tool::{Tool, ToolCall};

#[derive(Deserialize)]
struct MessageArgs {
    message: String,
}

/// Notifications to a Google Chat space
#[derive(Clone)]
pub struct ChatSystem {
    client: GoogleChatClient,
    tools: Vec<Tool>,
}

impl ChatSystem {
    pub fn new(client: GoogleChatClient) -> Self {
        let send = Tool::new(
            "send_google_chat_message",
            "Sends a message to a Google Chat space.",
            json!({
                "type": "object",
                "required": ["message"],
                "properties": {
                    "message": {"type": "string", "description": "The message to send."}
                }
            }),
        );

        Self {
            client,
            tools: vec![send],
        }
    }
}

#[async_trait]
impl System for ChatSystem {
    fn name(&self) -> &str {
        "chat"
    }

    fn description(&self) -> &str {
        "Sends notifications to a Google Chat space through an incoming webhook"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> ToolResult<Value> {
        match tool_call.name.as_str() {
            "send_google_chat_message" => {
                let args: MessageArgs = parse_args(tool_call.arguments)?;
                Ok(Value::String(self.client.send_message(&args.message).await))
            }
            _ => Err(ToolError::ToolNotFound(tool_call.name)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::google_chat::MISSING_WEBHOOK;
    use crate::configs::{GoogleChatConfig, HttpConfig};
    use wiremock::matchers::{body_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_unconfigured_webhook_reports_missing_variable() {
        let client =
            GoogleChatClient::new(&GoogleChatConfig { webhook_url: None }, &HttpConfig::default())
                .unwrap();
        let system = ChatSystem::new(client);

        let result = system
            .call(ToolCall::new(
                "send_google_chat_message",
                json!({"message": "done"}),
            ))
            .await
            .unwrap();
        assert_eq!(
            result,
            Value::String("Error: GOOGLE_CHAT_WEBHOOK_URL environment variable not set.".into())
        );
        assert_eq!(result, Value::String(MISSING_WEBHOOK.into()));
    }

    #[tokio::test]
    async fn test_configured_webhook_posts_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({"text": "done"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let config = GoogleChatConfig {
            webhook_url: Some(server.uri()),
        };
        let client = GoogleChatClient::new(&config, &HttpConfig::default()).unwrap();
        let system = ChatSystem::new(client);

        let result = system
            .call(ToolCall::new(
                "send_google_chat_message",
                json!({"message": "done"}),
            ))
            .await
            .unwrap();
        assert_eq!(
            result,
            Value::String("Message sent successfully to Google Chat: done".into())
        );
    }

    #[tokio::test]
    async fn test_missing_message_argument() {
        let client =
            GoogleChatClient::new(&GoogleChatConfig::default(), &HttpConfig::default()).unwrap();
        let system = ChatSystem::new(client);

        let error = system
            .call(ToolCall::new("send_google_chat_message", json!({"text": "x"})))
            .await
            .unwrap_err();
        assert!(matches!(error, ToolError::InvalidParameters(_)));
    }
}
