use std::collections::BTreeMap;
use std::fs;
use std::iter::FromIterator;
use std::path::Path;

use ::serde::{de::DeserializeOwned, Serialize};
use pipegen_core::errors::{ErrorInfo, PipegenError};
use serde_json::{Map, Value};

fn serde_error(code: &str, err: impl ToString) -> PipegenError {
    PipegenError::Serde(ErrorInfo::new(code, err.to_string()))
}

fn canonicalize(value: Value) -> Value {
    match value {
        Value::Object(map) => {
            let mut ordered = BTreeMap::new();
            for (key, val) in map {
                ordered.insert(key, canonicalize(val));
            }
            Value::Object(Map::from_iter(ordered))
        }
        Value::Array(values) => Value::Array(values.into_iter().map(canonicalize).collect()),
        other => other,
    }
}

/// Serializes a value into canonical JSON bytes with deterministic ordering.
pub fn to_canonical_json_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, PipegenError> {
    let value = serde_json::to_value(value).map_err(|err| serde_error("json-encode", err))?;
    let mut bytes = Vec::new();
    serde_json::to_writer(&mut bytes, &canonicalize(value))
        .map_err(|err| serde_error("json-write", err))?;
    Ok(bytes)
}

/// Restores a value from JSON bytes.
pub fn from_json_slice<T: DeserializeOwned>(data: &[u8]) -> Result<T, PipegenError> {
    serde_json::from_slice(data).map_err(|err| serde_error("json-read", err))
}

/// Reads a template configuration from a `.json`, `.yaml` or `.yml` file.
pub fn load_template(path: &Path) -> Result<Value, PipegenError> {
    let bytes = fs::read(path).map_err(|err| {
        PipegenError::Io(
            ErrorInfo::new("template-read", err.to_string())
                .with_context("path", path.display().to_string()),
        )
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("yaml") | Some("yml") => {
            serde_yaml::from_slice(&bytes).map_err(|err| serde_error("yaml-read", err))
        }
        _ => from_json_slice(&bytes),
    }
}
