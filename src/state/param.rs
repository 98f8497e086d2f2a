use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

pub type ParamId = i64;

/// Type tag of a parameter. Only `"string"` is editable; any other tag is
/// kept verbatim so rendering can report it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ParamType {
    String,
    Unsupported(String),
}

impl ParamType {
    pub fn tag(&self) -> &str {
        match self {
            ParamType::String => "string",
            ParamType::Unsupported(tag) => tag,
        }
    }

    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "string" => ParamType::String,
            other => ParamType::Unsupported(other.to_string()),
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl Serialize for ParamType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.tag())
    }
}

impl<'de> Deserialize<'de> for ParamType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let tag = String::deserialize(deserializer)?;
        Ok(ParamType::from_tag(&tag))
    }
}

/// A parameter definition supplied by the host
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub id: ParamId,
    pub name: String,
    #[serde(rename = "type")]
    pub param_type: ParamType,
}

impl Parameter {
    pub fn new(id: ParamId, name: &str, param_type: ParamType) -> Self {
        Self {
            id,
            name: name.to_string(),
            param_type,
        }
    }

    pub fn string(id: ParamId, name: &str) -> Self {
        Self::new(id, name, ParamType::String)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParamValue {
    pub param_id: ParamId,
    pub value: String,
}

impl ParamValue {
    pub fn new(param_id: ParamId, value: &str) -> Self {
        Self {
            param_id,
            value: value.to_string(),
        }
    }
}

/// Color entry carried through the editor untouched.
///
/// Stored as the raw JSON element so that whatever the host sent comes back
/// out of `get_model` unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Color(Value);

impl Color {
    #[cfg(test)]
    pub fn new(id: i64, value: &str) -> Self {
        Self(serde_json::json!({ "id": id, "value": value }))
    }

    pub fn from_raw(raw: Value) -> Self {
        Self(raw)
    }

    #[cfg(test)]
    pub fn id(&self) -> Option<i64> {
        self.0.get("id").and_then(Value::as_i64)
    }

    #[cfg(test)]
    pub fn value(&self) -> Option<&str> {
        self.0.get("value").and_then(Value::as_str)
    }
}

/// A validated model: current values plus pass-through colors
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub param_values: Vec<ParamValue>,
    pub colors: Vec<Color>,
}

impl Model {
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
