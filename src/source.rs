use std::path::{Path, PathBuf};

use serde_json::{json, Value};
use thiserror::Error;

use crate::state::Parameter;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Where the parameter list and the candidate model come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelSource {
    /// Built-in sample data
    Demo,
    Files { params: PathBuf, model: PathBuf },
}

impl ModelSource {
    /// Build a source from command-line arguments (program name excluded)
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let args: Vec<String> = args.into_iter().collect();
        match args.as_slice() {
            [] => Ok(ModelSource::Demo),
            [params, model] => Ok(ModelSource::Files {
                params: PathBuf::from(params),
                model: PathBuf::from(model),
            }),
            _ => Err("usage: paramedit [PARAMS.json MODEL.json]".to_string()),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ModelSource::Demo => "demo".to_string(),
            ModelSource::Files { model, .. } => model.display().to_string(),
        }
    }

    pub fn load_params(&self) -> Result<Vec<Parameter>, LoadError> {
        match self {
            ModelSource::Demo => Ok(demo_params()),
            ModelSource::Files { params, .. } => {
                let contents = read_file(params)?;
                serde_json::from_str(&contents).map_err(|source| LoadError::Json {
                    path: params.clone(),
                    source,
                })
            }
        }
    }

    /// Read the model as untyped JSON; validation happens in the editor
    pub fn load_model(&self) -> Result<Value, LoadError> {
        match self {
            ModelSource::Demo => Ok(demo_model()),
            ModelSource::Files { model, .. } => {
                let contents = read_file(model)?;
                serde_json::from_str(&contents).map_err(|source| LoadError::Json {
                    path: model.clone(),
                    source,
                })
            }
        }
    }
}

fn read_file(path: &Path) -> Result<String, LoadError> {
    std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn demo_params() -> Vec<Parameter> {
    vec![Parameter::string(1, "Purpose"), Parameter::string(2, "Length")]
}

pub fn demo_model() -> Value {
    json!({
        "paramValues": [
            { "paramId": 1, "value": "casual" },
            { "paramId": 2, "value": "maxi" }
        ],
        "colors": []
    })
}
