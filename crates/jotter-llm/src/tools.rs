//! Translation from vendor-neutral tool declarations to the `OpenAI`
//! `tools` array

use jotter_core::ToolDeclaration;
use serde_json::Value;

use crate::protocol::{WireFunction, WireTool};

/// Translate vendor-neutral tool blocks into `OpenAI` wire tools
///
/// Returns `None` when no function declarations exist anywhere in the
/// input, distinguishing "no tools" from "tools but empty blocks".
/// Parameter schemas are deep-copied before normalization; the caller's
/// declarations are never mutated.
pub fn to_openai_tools(blocks: &[ToolDeclaration]) -> Option<Vec<WireTool>> {
    let declarations: Vec<_> = blocks
        .iter()
        .flat_map(|block| &block.function_declarations)
        .collect();

    if declarations.is_empty() {
        return None;
    }

    let tools = declarations
        .into_iter()
        .map(|declaration| {
            let parameters = declaration.parameters.clone().map(|mut schema| {
                normalize_schema_types(&mut schema);
                schema
            });

            WireTool {
                tool_type: "function".to_owned(),
                function: WireFunction {
                    name: declaration.name.clone(),
                    description: declaration.description.clone(),
                    parameters,
                },
            }
        })
        .collect();

    Some(tools)
}

/// Lowercase every `type` string in a JSON schema tree
///
/// Descends into every value of `properties` and into `items`, preserving
/// the tree shape.
fn normalize_schema_types(schema: &mut Value) {
    let Some(object) = schema.as_object_mut() else {
        return;
    };

    if let Some(Value::String(type_name)) = object.get_mut("type") {
        *type_name = type_name.to_lowercase();
    }

    if let Some(Value::Object(properties)) = object.get_mut("properties") {
        for sub_schema in properties.values_mut() {
            normalize_schema_types(sub_schema);
        }
    }

    if let Some(items) = object.get_mut("items") {
        normalize_schema_types(items);
    }
}

#[cfg(test)]
mod tests {
    use jotter_core::FunctionDeclaration;
    use serde_json::json;

    use super::*;

    fn weather_block() -> ToolDeclaration {
        ToolDeclaration::single(FunctionDeclaration {
            name: "get_weather".to_owned(),
            description: Some("Look up current weather".to_owned()),
            parameters: Some(json!({
                "type": "OBJECT",
                "properties": {
                    "location": {"type": "STRING"},
                    "days": {
                        "type": "ARRAY",
                        "items": {"type": "INTEGER"}
                    }
                }
            })),
        })
    }

    #[test]
    fn empty_input_yields_none() {
        assert!(to_openai_tools(&[]).is_none());
        assert!(to_openai_tools(&[ToolDeclaration::default()]).is_none());
    }

    #[test]
    fn lowercases_types_recursively() {
        let tools = to_openai_tools(&[weather_block()]).unwrap();
        assert_eq!(tools.len(), 1);
        assert_eq!(tools[0].tool_type, "function");
        assert_eq!(tools[0].function.name, "get_weather");

        let schema = tools[0].function.parameters.as_ref().unwrap();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["location"]["type"], "string");
        assert_eq!(schema["properties"]["days"]["type"], "array");
        assert_eq!(schema["properties"]["days"]["items"]["type"], "integer");
    }

    #[test]
    fn never_mutates_the_input() {
        let block = weather_block();
        let before = block.clone();
        let _ = to_openai_tools(std::slice::from_ref(&block));
        assert_eq!(block, before);
    }

    #[test]
    fn idempotent_on_lowercase_schemas() {
        let first = to_openai_tools(&[weather_block()]).unwrap();

        let relowered = ToolDeclaration::single(FunctionDeclaration {
            name: "get_weather".to_owned(),
            description: Some("Look up current weather".to_owned()),
            parameters: first[0].function.parameters.clone(),
        });
        let second = to_openai_tools(std::slice::from_ref(&relowered)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn preserves_declaration_order_across_blocks() {
        let blocks = vec![
            ToolDeclaration::single(FunctionDeclaration {
                name: "first".to_owned(),
                description: None,
                parameters: None,
            }),
            ToolDeclaration::single(FunctionDeclaration {
                name: "second".to_owned(),
                description: None,
                parameters: None,
            }),
        ];
        let tools = to_openai_tools(&blocks).unwrap();
        let names: Vec<_> = tools.iter().map(|t| t.function.name.as_str()).collect();
        assert_eq!(names, ["first", "second"]);
    }
}
