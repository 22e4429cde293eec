use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// A declarative rendering plan: a versioned, ordered list of directives.
/// Parsing is strict (unknown fields and trailing content are rejected);
/// version enforcement is the evaluator's job so that plans built in code or
/// by the generator are checked the same way as parsed ones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Plan {
    pub version: i64,
    pub directives: Vec<Directive>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Directive {
    pub op: String,
    pub path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<Field>,
}

/// One projected value: a path relative to the directive's resolved target
/// and the label it is rendered under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Field {
    pub path: String,
    pub label: String,
}

impl Plan {
    /// The single plan version this engine evaluates.
    pub const SUPPORTED_VERSION: i64 = 1;

    pub fn parse(data: &[u8]) -> Result<Self> {
        serde_json::from_slice(data).map_err(|err| Error::Plan(err.to_string()))
    }

    /// Stable, indented JSON in declaration field order; `fields` is omitted
    /// when empty. Suitable for golden-file comparisons.
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|err| Error::Plan(err.to_string()))
    }
}
