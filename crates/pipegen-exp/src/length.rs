//! Exact output counts computed without enumerating.

use pipegen_core::errors::{ErrorInfo, PipegenError};
use pipegen_core::{Alternative, SearchMode, Slot};
use serde::{Deserialize, Serialize};

use crate::product::IndexProduct;

/// Classification of one cross-slot combination of alternatives.
///
/// Random-mode counting and random-mode enumeration both go through
/// [`CombinationKind::classify`], so the estimate and the emitted sequence
/// cannot disagree on which combinations are sampled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombinationKind {
    /// No chosen alternative carries a search spec; emitted once.
    Plain,
    /// At least one chosen alternative carries a search spec; emitted once
    /// per sample index.
    Searching,
}

impl CombinationKind {
    /// Classifies a combination from per-slot "carries a search spec" flags.
    pub fn classify<I>(searchable: I) -> Self
    where
        I: IntoIterator<Item = bool>,
    {
        if searchable.into_iter().any(|flag| flag) {
            CombinationKind::Searching
        } else {
            CombinationKind::Plain
        }
    }

    /// Classifies a combination of concrete choices (`None` is absent).
    pub fn of_choices<'a, I>(choices: I) -> Self
    where
        I: IntoIterator<Item = &'a Option<Alternative>>,
    {
        Self::classify(
            choices
                .into_iter()
                .map(|choice| choice.as_ref().is_some_and(Alternative::is_searchable)),
        )
    }
}

/// Number of plain and search-bearing combinations of a structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CombinationCensus {
    pub plain: u64,
    pub searching: u64,
}

impl CombinationCensus {
    /// Random-mode output count for a sample budget of `samples`.
    ///
    /// Fails with `invalid-sample-budget` when `samples` is zero.
    pub fn random_length(&self, samples: usize) -> Result<u64, PipegenError> {
        check_sample_budget(samples)?;
        (samples as u64)
            .checked_mul(self.searching)
            .and_then(|sampled| sampled.checked_add(self.plain))
            .ok_or_else(overflow)
    }
}

/// Rejects a random-mode budget of zero draws.
pub fn check_sample_budget(samples: usize) -> Result<(), PipegenError> {
    if samples == 0 {
        return Err(PipegenError::Config(
            ErrorInfo::new(
                "invalid-sample-budget",
                "random search needs a positive sample budget",
            )
            .with_context("samples", "0")
            .with_hint("pass a positive number of samples"),
        ));
    }
    Ok(())
}

fn overflow() -> PipegenError {
    PipegenError::Config(
        ErrorInfo::new(
            "length-overflow",
            "number of generated pipelines does not fit in 64 bits",
        )
        .with_hint("reduce the number of alternatives or search values"),
    )
}

/// Grid-mode output count.
///
/// Product over slots of the summed expansion counts of their alternatives.
pub fn grid_length(slots: &[Slot]) -> Result<u64, PipegenError> {
    slots.iter().try_fold(1u64, |total, slot| {
        let multiplier = slot.choices().iter().try_fold(0u64, |sum, choice| {
            let count = match choice {
                None => Some(1),
                Some(alternative) => alternative.grid_expansion_count(),
            };
            count.and_then(|count| sum.checked_add(count))
        });
        multiplier
            .and_then(|multiplier| total.checked_mul(multiplier))
            .ok_or_else(overflow)
    })
}

/// Counts plain and search-bearing combinations across slots.
///
/// Each slot collapses into at most two classes (non-search and search
/// alternatives) weighted by how many alternatives fall into them. The
/// product of classes is walked and each class combination is classified with
/// [`CombinationKind::classify`].
pub fn combination_census(slots: &[Slot]) -> Result<CombinationCensus, PipegenError> {
    let classes: Vec<Vec<(bool, u64)>> = slots
        .iter()
        .map(|slot| {
            let searching = slot
                .choices()
                .iter()
                .filter(|choice| choice.as_ref().is_some_and(Alternative::is_searchable))
                .count() as u64;
            let plain = slot.len() as u64 - searching;
            [(false, plain), (true, searching)]
                .into_iter()
                .filter(|(_, weight)| *weight > 0)
                .collect()
        })
        .collect();

    let radices = classes.iter().map(Vec::len).collect();
    let mut census = CombinationCensus::default();
    for combo in IndexProduct::new(radices) {
        let picked: Vec<(bool, u64)> = combo
            .iter()
            .enumerate()
            .map(|(slot, &class)| classes[slot][class])
            .collect();
        let kind = CombinationKind::classify(picked.iter().map(|(flag, _)| *flag));
        let weight = picked
            .iter()
            .try_fold(1u64, |acc, (_, weight)| acc.checked_mul(*weight))
            .ok_or_else(overflow)?;
        let bucket = match kind {
            CombinationKind::Plain => &mut census.plain,
            CombinationKind::Searching => &mut census.searching,
        };
        *bucket = bucket.checked_add(weight).ok_or_else(overflow)?;
    }
    Ok(census)
}

/// Random-mode output count: plain combinations plus `samples` per
/// search-bearing combination.
pub fn random_length(slots: &[Slot], samples: usize) -> Result<u64, PipegenError> {
    combination_census(slots)?.random_length(samples)
}

/// Output count for the requested mode.
pub fn estimate_length(
    slots: &[Slot],
    mode: SearchMode,
    samples: usize,
) -> Result<u64, PipegenError> {
    match mode {
        SearchMode::Grid => grid_length(slots),
        SearchMode::Random => random_length(slots, samples),
    }
}
