use serde::{Deserialize, Serialize};

/// Vendor-neutral tool block
///
/// Matches the Gemini-style declaration shape: a block carries zero or
/// more function declarations, each with a JSON-schema parameter tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDeclaration {
    /// Function declarations within this block
    #[serde(default)]
    pub function_declarations: Vec<FunctionDeclaration>,
}

/// A single declared function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionDeclaration {
    /// Function name
    pub name: String,
    /// Human-readable description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// JSON Schema for the parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<serde_json::Value>,
}

impl ToolDeclaration {
    /// Build a block holding a single function declaration
    pub fn single(declaration: FunctionDeclaration) -> Self {
        Self {
            function_declarations: vec![declaration],
        }
    }
}
