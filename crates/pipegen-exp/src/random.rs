use pipegen_core::errors::PipegenError;
use pipegen_core::{Alternative, Slot};
use serde_json::{Map, Value};

use crate::length::{check_sample_budget, CombinationKind};
use crate::product::IndexProduct;
use crate::sampler::ParameterSampler;
use crate::GeneratedPipeline;

/// Draws taken for one search-bearing combination.
struct PendingDraws {
    combo: Vec<usize>,
    /// Per slot: the sampled assignments when the chosen alternative is
    /// searchable, `None` otherwise.
    draws: Vec<Option<Vec<Map<String, Value>>>>,
    next: usize,
}

/// Budgeted sampling over the unexpanded cross-slot combinations.
///
/// Combinations without a search spec are emitted once. A search-bearing
/// combination is emitted `samples` times: each searchable slot is sampled
/// `samples` times and the i-th emission pairs the i-th draw of every such
/// slot. Draws are never cross-producted.
pub struct RandomEnumerator {
    slots: Vec<Slot>,
    combos: IndexProduct,
    samples: usize,
    sampler: Box<dyn ParameterSampler>,
    pending: Option<PendingDraws>,
    done: bool,
}

impl RandomEnumerator {
    /// Creates the enumerator; `samples` must be positive.
    pub fn new(
        slots: Vec<Slot>,
        samples: usize,
        sampler: Box<dyn ParameterSampler>,
    ) -> Result<Self, PipegenError> {
        check_sample_budget(samples)?;
        let radices = slots.iter().map(Slot::len).collect();
        Ok(Self {
            slots,
            combos: IndexProduct::new(radices),
            samples,
            sampler,
            pending: None,
            done: false,
        })
    }

    fn chosen<'a>(
        slots: &'a [Slot],
        combo: &'a [usize],
    ) -> impl Iterator<Item = &'a Option<Alternative>> {
        combo
            .iter()
            .enumerate()
            .map(move |(slot, &idx)| &slots[slot].choices()[idx])
    }

    fn draw(
        &mut self,
        combo: &[usize],
    ) -> Result<Vec<Option<Vec<Map<String, Value>>>>, PipegenError> {
        let mut draws = Vec::with_capacity(combo.len());
        for (position, choice) in Self::chosen(&self.slots, combo).enumerate() {
            let Some(search) = choice.as_ref().and_then(Alternative::search) else {
                draws.push(None);
                continue;
            };
            let mut samples = Vec::with_capacity(self.samples);
            for _ in 0..self.samples {
                let sample = self
                    .sampler
                    .sample(search)
                    .map_err(|err| err.in_context("slot", position.to_string()))?;
                samples.push(sample);
            }
            tracing::trace!(slot = position, draws = samples.len(), "sampled search slot");
            draws.push(Some(samples));
        }
        Ok(draws)
    }
}

fn assemble(
    slots: &[Slot],
    combo: &[usize],
    pending: Option<(&PendingDraws, usize)>,
) -> GeneratedPipeline {
    RandomEnumerator::chosen(slots, combo)
        .enumerate()
        .filter_map(|(position, choice)| match choice.as_ref()? {
            Alternative::Static(params) => Some(params.clone()),
            Alternative::Searchable(component) => {
                let (pending, sample) = pending?;
                let draw = pending.draws[position].as_ref()?;
                Some(component.resolve(draw[sample].clone()))
            }
        })
        .collect()
}

impl Iterator for RandomEnumerator {
    type Item = Result<GeneratedPipeline, PipegenError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.done {
                return None;
            }
            if let Some(pending) = &mut self.pending {
                if pending.next < self.samples {
                    let sample = pending.next;
                    pending.next += 1;
                    let pending = &*pending;
                    return Some(Ok(assemble(
                        &self.slots,
                        &pending.combo,
                        Some((pending, sample)),
                    )));
                }
                self.pending = None;
            }
            let Some(combo) = self.combos.next() else {
                self.done = true;
                return None;
            };
            match CombinationKind::of_choices(Self::chosen(&self.slots, &combo)) {
                CombinationKind::Plain => return Some(Ok(assemble(&self.slots, &combo, None))),
                CombinationKind::Searching => match self.draw(&combo) {
                    Ok(draws) => {
                        self.pending = Some(PendingDraws {
                            combo,
                            draws,
                            next: 0,
                        })
                    }
                    Err(err) => {
                        self.done = true;
                        return Some(Err(err));
                    }
                },
            }
        }
    }
}
