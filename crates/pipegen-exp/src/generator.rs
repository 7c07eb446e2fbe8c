use std::path::{Path, PathBuf};

use pipegen_core::errors::PipegenError;
use pipegen_core::SearchMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::grid::GridEnumerator;
use crate::length::estimate_length;
use crate::paths::rewrite_paths;
use crate::random::RandomEnumerator;
use crate::sampler::{DistributionSampler, ParameterSampler};
use crate::structure::{extract_structure, Skeleton};
use crate::GeneratedPipeline;

/// Options controlling one generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorOptions {
    /// Enumeration strategy.
    #[serde(default)]
    pub mode: SearchMode,
    /// Draws per search-bearing combination in random mode.
    #[serde(default = "GeneratorOptions::default_samples")]
    pub samples: usize,
    /// Base directory for artifacts of from-scratch components.
    #[serde(default = "GeneratorOptions::default_save_path")]
    pub save_path: PathBuf,
    /// Master seed of the bundled sampler.
    #[serde(default)]
    pub seed: u64,
}

impl GeneratorOptions {
    const fn default_samples() -> usize {
        10
    }

    fn default_save_path() -> PathBuf {
        PathBuf::from("pipelines")
    }

    /// Default options for the named mode; fails for anything but `grid` or
    /// `random`.
    pub fn for_mode(mode: &str) -> Result<Self, PipegenError> {
        Ok(Self {
            mode: mode.parse()?,
            ..Self::default()
        })
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self {
            mode: SearchMode::default(),
            samples: Self::default_samples(),
            save_path: Self::default_save_path(),
            seed: 0,
        }
    }
}

/// One emitted configuration and its experiment index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedConfig {
    pub index: usize,
    pub config: Value,
}

enum Enumerator {
    Grid(GridEnumerator),
    Random(RandomEnumerator),
}

impl Iterator for Enumerator {
    type Item = Result<GeneratedPipeline, PipegenError>;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Enumerator::Grid(inner) => inner.next(),
            Enumerator::Random(inner) => inner.next(),
        }
    }
}

/// Lazy, single-pass sequence of full experiment configurations.
///
/// The total count is computed when the generator is built. Each emission
/// clones the skeleton, installs the next generated pipeline and redirects
/// from-scratch artifact paths under `save_path/pipe_<index>`. Once drained
/// (or after the first error) the generator yields nothing.
pub struct PipelineGenerator {
    skeleton: Skeleton,
    mode: SearchMode,
    total: u64,
    save_path: PathBuf,
    enumerator: Enumerator,
    next_index: usize,
    done: bool,
}

impl PipelineGenerator {
    /// Builds a generator using the bundled [`DistributionSampler`] seeded
    /// with `options.seed`.
    pub fn new(template: Value, options: &GeneratorOptions) -> Result<Self, PipegenError> {
        let sampler = DistributionSampler::from_seed(options.seed);
        Self::with_sampler(template, options, Box::new(sampler))
    }

    /// Builds a generator drawing random-mode parameters from `sampler`.
    pub fn with_sampler(
        template: Value,
        options: &GeneratorOptions,
        sampler: Box<dyn ParameterSampler>,
    ) -> Result<Self, PipegenError> {
        let structure = extract_structure(template)?;
        let total = estimate_length(&structure.slots, options.mode, options.samples)?;
        let enumerator = match options.mode {
            SearchMode::Grid => Enumerator::Grid(GridEnumerator::new(structure.slots)),
            SearchMode::Random => Enumerator::Random(RandomEnumerator::new(
                structure.slots,
                options.samples,
                sampler,
            )?),
        };
        tracing::info!(
            mode = %options.mode,
            samples = options.samples,
            total,
            save_path = %options.save_path.display(),
            "pipeline generator ready"
        );
        Ok(Self {
            skeleton: structure.skeleton,
            mode: options.mode,
            total,
            save_path: options.save_path.clone(),
            enumerator,
            next_index: 0,
            done: false,
        })
    }

    /// Number of configurations the full sequence yields.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of configurations emitted so far.
    pub fn emitted(&self) -> usize {
        self.next_index
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn skeleton(&self) -> &Skeleton {
        &self.skeleton
    }

    pub fn save_path(&self) -> &Path {
        &self.save_path
    }
}

impl Iterator for PipelineGenerator {
    type Item = Result<GeneratedConfig, PipegenError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let mut pipe = match self.enumerator.next() {
            Some(Ok(pipe)) => pipe,
            Some(Err(err)) => {
                self.done = true;
                tracing::warn!(
                    index = self.next_index,
                    error = %err,
                    "pipeline generation failed"
                );
                return Some(Err(err));
            }
            None => {
                self.done = true;
                return None;
            }
        };
        let index = self.next_index;
        self.next_index += 1;
        rewrite_paths(&mut pipe, &self.save_path, index);
        tracing::debug!(index, components = pipe.len(), "generated pipeline");
        Some(Ok(GeneratedConfig {
            index,
            config: self.skeleton.materialize(pipe),
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            return (0, Some(0));
        }
        let remaining = self.total.saturating_sub(self.next_index as u64);
        (0, usize::try_from(remaining).ok())
    }
}
