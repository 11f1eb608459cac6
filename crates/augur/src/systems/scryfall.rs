use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};

use super::{parse_args, string_or_number, System};
use crate::clients::ScryfallClient;
use crate::errors::{ApiResult, ToolError, ToolResult};
use crate::tool::{Tool, ToolCall};

#[derive(Deserialize)]
struct QueryArgs {
    query: String,
}

#[derive(Deserialize)]
struct NameArgs {
    name: String,
    #[serde(default)]
    exact: bool,
}

#[derive(Deserialize)]
struct ScryfallIdArgs {
    scryfall_id: String,
}

#[derive(Deserialize)]
struct CollectionArgs {
    identifiers: Vec<Value>,
}

#[derive(Deserialize)]
struct CodeArgs {
    code: String,
}

#[derive(Deserialize)]
struct CodeNumberArgs {
    code: String,
    #[serde(deserialize_with = "string_or_number")]
    number: String,
    #[serde(default = "default_lang")]
    lang: String,
}

fn default_lang() -> String {
    "en".to_string()
}

fn string_param(name: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "required": [name],
        "properties": {
            name: {"type": "string", "description": description}
        }
    })
}

fn integer_param(name: &str, description: &str) -> Value {
    json!({
        "type": "object",
        "required": [name],
        "properties": {
            name: {"type": "integer", "minimum": 0, "description": description}
        }
    })
}

fn no_params() -> Value {
    json!({"type": "object", "properties": {}})
}

/// Card and set lookups against the Scryfall database
#[derive(Clone)]
pub struct ScryfallSystem {
    client: ScryfallClient,
    tools: Vec<Tool>,
}

impl ScryfallSystem {
    pub fn new(client: ScryfallClient) -> Self {
        let tools = vec![
            Tool::new(
                "search_cards",
                "Searches for cards matching a query. See https://scryfall.com/docs/syntax for the query syntax.",
                string_param("query", "The search query."),
            ),
            Tool::new(
                "get_card_by_name",
                "Gets a card with a specific name. Performs a fuzzy match unless `exact` is true.",
                json!({
                    "type": "object",
                    "required": ["name"],
                    "properties": {
                        "name": {"type": "string", "description": "The name of the card to find."},
                        "exact": {
                            "type": "boolean",
                            "default": false,
                            "description": "If true, performs an exact name match."
                        }
                    }
                }),
            ),
            Tool::new("get_random_card", "Gets a random card.", no_params()),
            Tool::new(
                "get_card_by_id",
                "Gets a card by its Scryfall ID.",
                string_param("scryfall_id", "The Scryfall ID of the card."),
            ),
            Tool::new(
                "autocomplete_card_name",
                "Returns a list of up to 20 full English card names that match a given query.",
                string_param("query", "The query to autocomplete."),
            ),
            Tool::new(
                "get_card_collection",
                "Returns a list of cards for a given list of identifiers. See https://scryfall.com/docs/api/cards/collection for the identifier formats.",
                json!({
                    "type": "object",
                    "required": ["identifiers"],
                    "properties": {
                        "identifiers": {
                            "type": "array",
                            "items": {"type": "object"},
                            "description": "Card identifiers, e.g. {\"name\": ...} or {\"set\": ..., \"collector_number\": ...}."
                        }
                    }
                }),
            ),
            Tool::new(
                "get_card_by_code_and_number",
                "Gets a card with a specific collector number and set code.",
                json!({
                    "type": "object",
                    "required": ["code", "number"],
                    "properties": {
                        "code": {"type": "string", "description": "The set code."},
                        "number": {
                            "type": ["string", "integer"],
                            "description": "The collector number."
                        },
                        "lang": {
                            "type": "string",
                            "default": "en",
                            "description": "The language to return the card in."
                        }
                    }
                }),
            ),
            Tool::new(
                "get_card_by_multiverse_id",
                "Gets a card with a specific Multiverse ID.",
                integer_param("multiverse_id", "The Multiverse ID."),
            ),
            Tool::new(
                "get_card_by_mtgo_id",
                "Gets a card with a specific MTGO ID.",
                integer_param("mtgo_id", "The MTGO ID."),
            ),
            Tool::new(
                "get_card_by_arena_id",
                "Gets a card with a specific Arena ID.",
                integer_param("arena_id", "The Arena ID."),
            ),
            Tool::new(
                "get_card_by_tcgplayer_id",
                "Gets a card with a specific TCGplayer ID.",
                integer_param("tcgplayer_id", "The TCGplayer ID."),
            ),
            Tool::new(
                "get_card_by_cardmarket_id",
                "Gets a card with a specific Cardmarket ID.",
                integer_param("cardmarket_id", "The Cardmarket ID."),
            ),
            Tool::new("get_all_sets", "Returns a list of all sets.", no_params()),
            Tool::new(
                "get_set_by_code",
                "Gets a set by its code.",
                string_param("code", "The set code."),
            ),
            Tool::new(
                "get_set_by_tcgplayer_id",
                "Gets a set by its TCGplayer ID.",
                integer_param("tcgplayer_id", "The TCGplayer ID."),
            ),
            Tool::new(
                "get_set_by_id",
                "Gets a set by its Scryfall ID.",
                string_param("scryfall_id", "The Scryfall ID of the set."),
            ),
        ];

        Self { client, tools }
    }

    fn id(arguments: Value, key: &str) -> ToolResult<u64> {
        arguments
            .get(key)
            .and_then(Value::as_u64)
            .ok_or_else(|| {
                ToolError::InvalidParameters(format!("'{}' must be a non-negative integer", key))
            })
    }

    async fn dispatch(&self, name: &str, arguments: Value) -> ToolResult<ApiResult<Value>> {
        let client = &self.client;
        let result = match name {
            "search_cards" => {
                let args: QueryArgs = parse_args(arguments)?;
                client.search_cards(&args.query).await
            }
            "get_card_by_name" => {
                let args: NameArgs = parse_args(arguments)?;
                client.get_card_by_name(&args.name, args.exact).await
            }
            "get_random_card" => client.get_random_card().await,
            "get_card_by_id" => {
                let args: ScryfallIdArgs = parse_args(arguments)?;
                client.get_card_by_id(&args.scryfall_id).await
            }
            "autocomplete_card_name" => {
                let args: QueryArgs = parse_args(arguments)?;
                client.autocomplete_card_name(&args.query).await
            }
            "get_card_collection" => {
                let args: CollectionArgs = parse_args(arguments)?;
                client.get_card_collection(&args.identifiers).await
            }
            "get_card_by_code_and_number" => {
                let args: CodeNumberArgs = parse_args(arguments)?;
                client
                    .get_card_by_code_and_number(&args.code, &args.number, &args.lang)
                    .await
            }
            "get_card_by_multiverse_id" => {
                let id = Self::id(arguments, "multiverse_id")?;
                client.get_card_by_multiverse_id(id).await
            }
            "get_card_by_mtgo_id" => {
                let id = Self::id(arguments, "mtgo_id")?;
                client.get_card_by_mtgo_id(id).await
            }
            "get_card_by_arena_id" => {
                let id = Self::id(arguments, "arena_id")?;
                client.get_card_by_arena_id(id).await
            }
            "get_card_by_tcgplayer_id" => {
                let id = Self::id(arguments, "tcgplayer_id")?;
                client.get_card_by_tcgplayer_id(id).await
            }
            "get_card_by_cardmarket_id" => {
                let id = Self::id(arguments, "cardmarket_id")?;
                client.get_card_by_cardmarket_id(id).await
            }
            "get_all_sets" => client.get_all_sets().await,
            "get_set_by_code" => {
                let args: CodeArgs = parse_args(arguments)?;
                client.get_set_by_code(&args.code).await
            }
            "get_set_by_tcgplayer_id" => {
                let id = Self::id(arguments, "tcgplayer_id")?;
                client.get_set_by_tcgplayer_id(id).await
            }
            "get_set_by_id" => {
                let args: ScryfallIdArgs = parse_args(arguments)?;
                client.get_set_by_id(&args.scryfall_id).await
            }
            _ => return Err(ToolError::ToolNotFound(name.to_string())),
        };
        Ok(result)
    }
}

#[async_trait]
impl System for ScryfallSystem {
    fn name(&self) -> &str {
        "scryfall"
    }

    fn description(&self) -> &str {
        "Magic: The Gathering card and set lookups backed by the Scryfall API"
    }

    fn tools(&self) -> &[Tool] {
        &self.tools
    }

    async fn call(&self, tool_call: ToolCall) -> ToolResult<Value> {
        let result = self.dispatch(&tool_call.name, tool_call.arguments).await?;
        Ok(result.unwrap_or_else(|e| e.to_value()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::configs::{HttpConfig, ScryfallConfig};
    use crate::http::NoDelay;
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn setup() -> (MockServer, ScryfallSystem) {
        let server = MockServer::start().await;
        let client = ScryfallClient::with_limiter(
            &ScryfallConfig { host: server.uri() },
            &HttpConfig::default(),
            Arc::new(NoDelay),
        )
        .unwrap();
        (server, ScryfallSystem::new(client))
    }

    #[tokio::test]
    async fn test_tool_names_are_unique() {
        let (_server, system) = setup().await;
        let mut names: Vec<_> = system.tools().iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names.len(), 16);
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 16);
    }

    #[tokio::test]
    async fn test_every_tool_is_dispatched() {
        let (server, system) = setup().await;
        Mock::given(wiremock::matchers::any())
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ok": true})))
            .mount(&server)
            .await;

        let arguments = json!({
            "query": "bolt",
            "name": "Lightning Bolt",
            "scryfall_id": "abc",
            "identifiers": [{"name": "Lightning Bolt"}],
            "code": "lea",
            "number": 161,
            "multiverse_id": 1,
            "mtgo_id": 1,
            "arena_id": 1,
            "tcgplayer_id": 1,
            "cardmarket_id": 1
        });

        for tool in system.tools() {
            let result = system
                .call(ToolCall::new(tool.name.clone(), arguments.clone()))
                .await
                .unwrap();
            assert_eq!(result, json!({"ok": true}), "tool {}", tool.name);
        }
    }

    #[tokio::test]
    async fn test_get_card_by_name_returns_payload_unchanged() {
        let (server, system) = setup().await;
        let card = json!({"object": "card", "name": "Black Lotus", "rarity": "rare"});
        Mock::given(method("GET"))
            .and(path("/cards/named"))
            .and(query_param("exact", "Black Lotus"))
            .respond_with(ResponseTemplate::new(200).set_body_json(card.clone()))
            .mount(&server)
            .await;

        let result = system
            .call(ToolCall::new(
                "get_card_by_name",
                json!({"name": "Black Lotus", "exact": true}),
            ))
            .await
            .unwrap();
        assert_eq!(result, card);
    }

    #[tokio::test]
    async fn test_api_errors_are_returned_as_values() {
        let (server, system) = setup().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({"code": "not_found"})))
            .mount(&server)
            .await;

        let result = system
            .call(ToolCall::new("get_card_by_id", json!({"scryfall_id": "missing"})))
            .await
            .unwrap();
        assert_eq!(result["status"], 404);
        assert_eq!(result["details"]["code"], "not_found");
        assert_eq!(result["error"], "Scryfall API returned status 404");
    }

    #[tokio::test]
    async fn test_bad_arguments_and_unknown_tools() {
        let (_server, system) = setup().await;

        let error = system
            .call(ToolCall::new("search_cards", json!({})))
            .await
            .unwrap_err();
        assert!(matches!(error, ToolError::InvalidParameters(_)));

        let error = system
            .call(ToolCall::new("get_card_by_arena_id", json!({"arena_id": -4})))
            .await
            .unwrap_err();
        assert!(matches!(error, ToolError::InvalidParameters(_)));

        let error = system
            .call(ToolCall::new("get_card_price", json!({})))
            .await
            .unwrap_err();
        assert_eq!(error, ToolError::ToolNotFound("get_card_price".to_string()));
    }
}
