//! Typed model of a pipeline template: slots, alternatives and search specs.

use std::fmt::{self, Display};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::{ErrorInfo, PipegenError};

/// Reserved key marking an alternative as parametrized.
pub const SEARCH_KEY: &str = "search";

/// Enumeration strategy applied to the template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchMode {
    /// Exhaustive enumeration of every literal search value.
    #[default]
    Grid,
    /// Budgeted sampling, a fixed number of draws per search-bearing combination.
    Random,
}

impl SearchMode {
    /// Lowercase identifier used in configuration files and on the CLI.
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Grid => "grid",
            SearchMode::Random => "random",
        }
    }
}

impl Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchMode {
    type Err = PipegenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "grid" => Ok(SearchMode::Grid),
            "random" => Ok(SearchMode::Random),
            other => Err(PipegenError::Mode(
                ErrorInfo::new(
                    "unsupported-mode",
                    format!("{other} search is not implemented"),
                )
                .with_context("mode", other)
                .with_hint("use 'grid' or 'random'"),
            )),
        }
    }
}

/// Declared search parameters of one alternative.
///
/// List values are grid dimensions, mappings are sampler distributions and
/// every other value is a static override.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchSpec {
    params: Map<String, Value>,
}

impl SearchSpec {
    /// Creates an empty search spec.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an existing parameter mapping.
    pub fn from_map(params: Map<String, Value>) -> Self {
        Self { params }
    }

    /// Adds or replaces a search parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: Value) {
        self.params.insert(name.into(), value);
    }

    /// Raw parameter mapping.
    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    /// Number of declared search parameters.
    pub fn len(&self) -> usize {
        self.params.len()
    }

    /// Returns true when no parameter is declared.
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// List-valued parameters, in key order.
    pub fn grid_dimensions(&self) -> impl Iterator<Item = (&String, &Vec<Value>)> {
        self.params.iter().filter_map(|(name, value)| match value {
            Value::Array(values) => Some((name, values)),
            _ => None,
        })
    }

    /// Number of grid combinations this spec expands to.
    ///
    /// Non-list parameters do not multiply the count. Returns `None` on
    /// overflow.
    pub fn grid_expansion_count(&self) -> Option<u64> {
        self.grid_dimensions()
            .try_fold(1u64, |acc, (_, values)| acc.checked_mul(values.len() as u64))
    }
}

/// How the `search` marker was written in the template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchMarker {
    /// `search: true`, every parameter is searchable.
    All,
    /// `search: [names]`, only the listed parameters are searchable.
    Named,
}

/// Alternative carrying a search spec next to its fixed parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchableComponent {
    /// Parameters copied verbatim into every generated value.
    pub fixed: Map<String, Value>,
    /// Parameters to enumerate or sample.
    pub search: SearchSpec,
    /// Original spelling of the marker, kept for round-tripping.
    pub marker: SearchMarker,
}

impl SearchableComponent {
    /// Builds the concrete component for one resolved assignment of the
    /// search parameters.
    pub fn resolve(&self, assignment: Map<String, Value>) -> Map<String, Value> {
        let mut resolved = self.fixed.clone();
        resolved.extend(assignment);
        resolved
    }
}

/// One candidate component at a slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "params", rename_all = "lowercase")]
pub enum Alternative {
    /// Component used as declared.
    Static(Map<String, Value>),
    /// Component whose parameters are enumerated or sampled.
    Searchable(SearchableComponent),
}

impl Alternative {
    /// Parses one template entry. `null` is the absent choice and maps to `None`.
    pub fn from_value(value: &Value) -> Result<Option<Self>, PipegenError> {
        let map = match value {
            Value::Null => return Ok(None),
            Value::Object(map) => map,
            other => {
                return Err(PipegenError::Config(
                    ErrorInfo::new(
                        "invalid-alternative",
                        "pipeline alternatives must be mappings or null",
                    )
                    .with_context("found", json_kind(other)),
                ))
            }
        };
        let mut params = map.clone();
        let marker = params.remove(SEARCH_KEY);
        match marker {
            None | Some(Value::Bool(false)) => Ok(Some(Alternative::Static(params))),
            Some(Value::Bool(true)) => Ok(Some(Alternative::Searchable(SearchableComponent {
                fixed: Map::new(),
                search: SearchSpec::from_map(params),
                marker: SearchMarker::All,
            }))),
            Some(Value::Array(names)) => {
                let mut search = SearchSpec::new();
                for name in &names {
                    let Some(name) = name.as_str() else {
                        return Err(PipegenError::config(
                            "invalid-search-marker",
                            "search parameter names must be strings",
                        ));
                    };
                    if search.params().contains_key(name) {
                        return Err(PipegenError::Config(
                            ErrorInfo::new(
                                "duplicate-search-parameter",
                                format!("search names parameter '{name}' more than once"),
                            )
                            .with_context("parameter", name),
                        ));
                    }
                    let Some(value) = params.remove(name) else {
                        return Err(PipegenError::Config(
                            ErrorInfo::new(
                                "unknown-search-parameter",
                                format!("search names parameter '{name}' which is not declared"),
                            )
                            .with_context("parameter", name),
                        ));
                    };
                    search.insert(name, value);
                }
                Ok(Some(Alternative::Searchable(SearchableComponent {
                    fixed: params,
                    search,
                    marker: SearchMarker::Named,
                })))
            }
            Some(other) => Err(PipegenError::Config(
                ErrorInfo::new(
                    "invalid-search-marker",
                    "search must be a boolean or a list of parameter names",
                )
                .with_context("found", json_kind(&other)),
            )),
        }
    }

    /// Renders the alternative back into template form.
    pub fn to_value(&self) -> Value {
        match self {
            Alternative::Static(params) => Value::Object(params.clone()),
            Alternative::Searchable(component) => {
                let mut map = component.fixed.clone();
                map.extend(component.search.params().clone());
                let marker = match component.marker {
                    SearchMarker::All => Value::Bool(true),
                    SearchMarker::Named => Value::Array(
                        component
                            .search
                            .params()
                            .keys()
                            .map(|name| Value::String(name.clone()))
                            .collect(),
                    ),
                };
                map.insert(SEARCH_KEY.to_string(), marker);
                Value::Object(map)
            }
        }
    }

    /// Returns true when the alternative carries a search spec.
    pub fn is_searchable(&self) -> bool {
        matches!(self, Alternative::Searchable(_))
    }

    /// Search spec of a searchable alternative.
    pub fn search(&self) -> Option<&SearchSpec> {
        match self {
            Alternative::Static(_) => None,
            Alternative::Searchable(component) => Some(&component.search),
        }
    }

    /// Number of concrete components grid mode expands this alternative to.
    pub fn grid_expansion_count(&self) -> Option<u64> {
        match self {
            Alternative::Static(_) => Some(1),
            Alternative::Searchable(component) => component.search.grid_expansion_count(),
        }
    }
}

/// One position of the pipeline with its candidate alternatives.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Slot {
    choices: Vec<Option<Alternative>>,
}

impl Slot {
    /// Creates a slot from already parsed choices.
    pub fn new(choices: Vec<Option<Alternative>>) -> Self {
        Self { choices }
    }

    /// Parses the slot found at `position` of `chainer.pipe`.
    pub fn from_value(position: usize, value: &Value) -> Result<Self, PipegenError> {
        let Value::Array(entries) = value else {
            return Err(PipegenError::Config(
                ErrorInfo::new("invalid-slot", "each pipeline slot must be a list of alternatives")
                    .with_context("slot", position.to_string())
                    .with_context("found", json_kind(value)),
            ));
        };
        let choices = entries
            .iter()
            .enumerate()
            .map(|(idx, entry)| {
                Alternative::from_value(entry).map_err(|err| {
                    err.in_context("slot", position.to_string())
                        .in_context("alternative", idx.to_string())
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { choices })
    }

    /// Candidate choices; `None` is the absent choice.
    pub fn choices(&self) -> &[Option<Alternative>] {
        &self.choices
    }

    /// Number of alternatives, absent entries included.
    pub fn len(&self) -> usize {
        self.choices.len()
    }

    /// Returns true for a slot with no alternatives at all.
    pub fn is_empty(&self) -> bool {
        self.choices.is_empty()
    }

    /// Renders the slot back into template form.
    pub fn to_value(&self) -> Value {
        Value::Array(
            self.choices
                .iter()
                .map(|choice| choice.as_ref().map_or(Value::Null, Alternative::to_value))
                .collect(),
        )
    }
}

/// Short JSON type name used in diagnostics.
pub fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "mapping",
    }
}
