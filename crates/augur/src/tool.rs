use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::errors::{ToolError, ToolResult};

/// A tool as advertised to a model: name, description and JSON schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Tool {
    pub name: String,
    pub description: String,
    pub input_schema: Value,
}

impl Tool {
    pub fn new<N, D>(name: N, description: D, input_schema: Value) -> Self
    where
        N: Into<String>,
        D: Into<String>,
    {
        Tool {
            name: name.into(),
            description: description.into(),
            input_schema,
        }
    }

    /// Argument names listed under `required` in the schema
    pub fn required(&self) -> Vec<&str> {
        self.input_schema
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// Reject a call whose arguments are not an object or lack a required key.
    ///
    /// `null` stands for "no arguments". Types are left to the owning system.
    pub fn check_arguments(&self, arguments: &Value) -> ToolResult<()> {
        let object = match arguments {
            Value::Object(map) => Some(map),
            Value::Null => None,
            other => {
                return Err(ToolError::InvalidParameters(format!(
                    "arguments for '{}' must be a JSON object, got {}",
                    self.name, other
                )))
            }
        };

        let missing: Vec<&str> = self
            .required()
            .into_iter()
            .filter(|key| object.map_or(true, |map| !map.contains_key(*key)))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ToolError::InvalidParameters(format!(
                "'{}' is missing required arguments: {}",
                self.name,
                missing.join(", ")
            )))
        }
    }
}

/// One invocation of a tool by name
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolCall {
    pub name: String,
    pub arguments: Value,
}

impl ToolCall {
    pub fn new<S: Into<String>>(name: S, arguments: Value) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tool() -> Tool {
        Tool::new(
            "get_card_by_code_and_number",
            "Gets a card by set code and collector number.",
            json!({
                "type": "object",
                "required": ["code", "number"],
                "properties": {
                    "code": {"type": "string"},
                    "number": {"type": "string"},
                    "lang": {"type": "string"}
                }
            }),
        )
    }

    #[test]
    fn test_required() {
        assert_eq!(tool().required(), vec!["code", "number"]);
        let bare = Tool::new("get_random_card", "", json!({"type": "object"}));
        assert!(bare.required().is_empty());
    }

    #[test]
    fn test_check_arguments() {
        let tool = tool();
        assert!(tool
            .check_arguments(&json!({"code": "lea", "number": "232"}))
            .is_ok());

        let error = tool.check_arguments(&json!({"code": "lea"})).unwrap_err();
        assert_eq!(
            error,
            ToolError::InvalidParameters(
                "'get_card_by_code_and_number' is missing required arguments: number".into()
            )
        );

        assert!(tool.check_arguments(&Value::Null).is_err());
        assert!(tool.check_arguments(&json!(["lea", "232"])).is_err());
    }

    #[test]
    fn test_null_is_fine_without_required_arguments() {
        let bare = Tool::new("get_all_sets", "", json!({"type": "object", "properties": {}}));
        assert!(bare.check_arguments(&Value::Null).is_ok());
    }
}
