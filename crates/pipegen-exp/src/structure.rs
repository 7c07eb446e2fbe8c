use pipegen_core::errors::{ErrorInfo, PipegenError};
use pipegen_core::{json_kind, Slot};
use serde_json::{Map, Value};

/// Top-level key holding the pipeline definition.
pub const CHAINER_KEY: &str = "chainer";
/// Key inside `chainer` holding the ordered slot list.
pub const PIPE_KEY: &str = "pipe";

/// Template with its pipeline structure removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Skeleton {
    root: Map<String, Value>,
    chainer: Map<String, Value>,
}

impl Skeleton {
    /// Top-level fields other than `chainer`.
    pub fn root(&self) -> &Map<String, Value> {
        &self.root
    }

    /// Fields of `chainer` other than `pipe`.
    pub fn chainer(&self) -> &Map<String, Value> {
        &self.chainer
    }

    /// Deep-copies the skeleton and installs `pipe` as `chainer.pipe`.
    pub fn materialize(&self, pipe: Vec<Map<String, Value>>) -> Value {
        let mut chainer = self.chainer.clone();
        chainer.insert(
            PIPE_KEY.to_string(),
            Value::Array(pipe.into_iter().map(Value::Object).collect()),
        );
        let mut root = self.root.clone();
        root.insert(CHAINER_KEY.to_string(), Value::Object(chainer));
        Value::Object(root)
    }
}

/// Skeleton plus the ordered slots extracted from a template.
#[derive(Debug, Clone, PartialEq)]
pub struct Structure {
    pub skeleton: Skeleton,
    pub slots: Vec<Slot>,
}

/// Splits a template into its skeleton and pipeline slots.
pub fn extract_structure(template: Value) -> Result<Structure, PipegenError> {
    let Value::Object(mut root) = template else {
        return Err(PipegenError::config(
            "invalid-template",
            "template configuration must be a mapping",
        ));
    };
    let mut chainer = match root.remove(CHAINER_KEY) {
        Some(Value::Object(chainer)) => chainer,
        Some(other) => {
            return Err(PipegenError::Config(
                ErrorInfo::new("invalid-chainer", "'chainer' must be a mapping")
                    .with_context("found", json_kind(&other)),
            ))
        }
        None => {
            return Err(PipegenError::Config(
                ErrorInfo::new(
                    "missing-chainer",
                    "template does not contain a 'chainer' component",
                )
                .with_hint("structure search cannot start without a declared pipeline"),
            ))
        }
    };
    let slots = match chainer.remove(PIPE_KEY) {
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(position, entry)| Slot::from_value(position, entry))
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(PipegenError::Config(
                ErrorInfo::new("invalid-pipe", "'chainer.pipe' must be a list of slots")
                    .with_context("found", json_kind(&other)),
            ))
        }
        None => {
            return Err(PipegenError::config(
                "missing-pipe",
                "'chainer' does not contain a 'pipe' field",
            ))
        }
    };
    Ok(Structure {
        skeleton: Skeleton { root, chainer },
        slots,
    })
}
