use pipegen_core::errors::{ErrorInfo, PipegenError};
use pipegen_core::{json_kind, Alternative, SearchableComponent, Slot};
use serde_json::{Map, Value};

use crate::product::IndexProduct;
use crate::GeneratedPipeline;

/// Expands one choice into every concrete component grid mode emits for it.
///
/// Absent stays absent and static alternatives expand to themselves.
pub fn expand_alternative(
    choice: &Option<Alternative>,
) -> Result<Vec<Option<Map<String, Value>>>, PipegenError> {
    match choice {
        None => Ok(vec![None]),
        Some(Alternative::Static(params)) => Ok(vec![Some(params.clone())]),
        Some(Alternative::Searchable(component)) => Ok(expand_searchable(component)?
            .into_iter()
            .map(Some)
            .collect()),
    }
}

fn expand_searchable(
    component: &SearchableComponent,
) -> Result<Vec<Map<String, Value>>, PipegenError> {
    let mut overrides = Map::new();
    let mut dimensions: Vec<(&String, &Vec<Value>)> = Vec::new();
    for (name, value) in component.search.params() {
        match value {
            Value::Array(values) => dimensions.push((name, values)),
            Value::Object(_) => {
                return Err(PipegenError::Search(
                    ErrorInfo::new(
                        "grid-unsupported-value",
                        "grid search cannot enumerate a mapping of parameter values",
                    )
                    .with_context("parameter", name.as_str())
                    .with_context("found", json_kind(value))
                    .with_hint("list the candidate values explicitly or use random mode"),
                ))
            }
            other => {
                overrides.insert(name.clone(), other.clone());
            }
        }
    }
    let base = component.resolve(overrides);
    let radices = dimensions.iter().map(|(_, values)| values.len()).collect();
    Ok(IndexProduct::new(radices)
        .map(|combo| {
            let mut resolved = base.clone();
            for ((name, values), idx) in dimensions.iter().zip(combo) {
                resolved.insert((*name).clone(), values[idx].clone());
            }
            resolved
        })
        .collect())
}

enum GridState {
    Pending(Vec<Slot>),
    Walking {
        expanded: Vec<Vec<Option<Map<String, Value>>>>,
        product: IndexProduct,
    },
    Done,
}

/// Exhaustive enumeration of every literal combination of search values.
///
/// Slots are expanded on the first pull; the cross-slot product is then
/// walked lazily with later slots varying fastest. Absent selections are
/// dropped from each emitted pipeline. The iterator ends after the first
/// error.
pub struct GridEnumerator {
    state: GridState,
}

impl GridEnumerator {
    pub fn new(slots: Vec<Slot>) -> Self {
        Self {
            state: GridState::Pending(slots),
        }
    }
}

fn expand_slots(slots: &[Slot]) -> Result<Vec<Vec<Option<Map<String, Value>>>>, PipegenError> {
    slots
        .iter()
        .enumerate()
        .map(|(position, slot)| {
            let mut expanded = Vec::new();
            for choice in slot.choices() {
                let components = expand_alternative(choice)
                    .map_err(|err| err.in_context("slot", position.to_string()))?;
                expanded.extend(components);
            }
            Ok(expanded)
        })
        .collect()
}

impl Iterator for GridEnumerator {
    type Item = Result<GeneratedPipeline, PipegenError>;

    fn next(&mut self) -> Option<Self::Item> {
        let expansion = match &self.state {
            GridState::Pending(slots) => Some(expand_slots(slots)),
            _ => None,
        };
        if let Some(expansion) = expansion {
            match expansion {
                Ok(expanded) => {
                    let radices = expanded.iter().map(Vec::len).collect();
                    self.state = GridState::Walking {
                        expanded,
                        product: IndexProduct::new(radices),
                    };
                }
                Err(err) => {
                    self.state = GridState::Done;
                    return Some(Err(err));
                }
            }
        }
        let GridState::Walking { expanded, product } = &mut self.state else {
            return None;
        };
        match product.next() {
            Some(combo) => Some(Ok(combo
                .into_iter()
                .enumerate()
                .filter_map(|(slot, idx)| expanded[slot][idx].clone())
                .collect())),
            None => {
                self.state = GridState::Done;
                None
            }
        }
    }
}
