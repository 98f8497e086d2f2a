use serde_json::Value;
use thiserror::Error;

use super::param::{Color, Model, ParamId, ParamType, ParamValue, Parameter};

/// Why a candidate model does not match a parameter list
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("model is not an object")]
    NotAnObject,
    #[error("`{0}` is missing or not a list")]
    NotASequence(&'static str),
    #[error("paramValues[{index}]: no parameter with id {param_id:?}")]
    UnknownParam {
        index: usize,
        param_id: Option<ParamId>,
    },
    #[error("paramValues[{index}]: parameter {param_id} has unsupported type `{type_tag}`")]
    UnsupportedType {
        index: usize,
        param_id: ParamId,
        type_tag: String,
    },
    #[error("paramValues[{index}]: value for parameter {param_id} is not a string")]
    ValueNotString { index: usize, param_id: ParamId },
}

/// Parse an untrusted candidate into a `Model` checked against `params`.
pub fn validate_model(candidate: &Value, params: &[Parameter]) -> Result<Model, ValidationError> {
    let obj = candidate.as_object().ok_or(ValidationError::NotAnObject)?;

    let raw_values = obj
        .get("paramValues")
        .and_then(Value::as_array)
        .ok_or(ValidationError::NotASequence("paramValues"))?;
    let raw_colors = obj
        .get("colors")
        .and_then(Value::as_array)
        .ok_or(ValidationError::NotASequence("colors"))?;

    let param_values = raw_values
        .iter()
        .enumerate()
        .map(|(index, raw)| validate_param_value(index, raw, params))
        .collect::<Result<Vec<_>, _>>()?;

    let colors = raw_colors.iter().cloned().map(Color::from_raw).collect();

    Ok(Model {
        param_values,
        colors,
    })
}

/// Boolean form of `validate_model`
#[cfg(test)]
pub fn is_valid_model(candidate: &Value, params: &[Parameter]) -> bool {
    validate_model(candidate, params).is_ok()
}

fn validate_param_value(
    index: usize,
    raw: &Value,
    params: &[Parameter],
) -> Result<ParamValue, ValidationError> {
    let param_id = raw.get("paramId").and_then(Value::as_i64);
    let param = param_id
        .and_then(|id| params.iter().find(|p| p.id == id))
        .ok_or(ValidationError::UnknownParam { index, param_id })?;

    // Extending ParamType means adding its value rule here.
    match &param.param_type {
        ParamType::String => {
            let value = raw
                .get("value")
                .and_then(Value::as_str)
                .ok_or(ValidationError::ValueNotString {
                    index,
                    param_id: param.id,
                })?;
            Ok(ParamValue::new(param.id, value))
        }
        ParamType::Unsupported(tag) => Err(ValidationError::UnsupportedType {
            index,
            param_id: param.id,
            type_tag: tag.clone(),
        }),
    }
}
