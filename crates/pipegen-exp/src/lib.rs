//! Enumeration of pipeline experiment configurations from a search template.

mod generator;
mod grid;
mod hash;
mod length;
mod manifest;
mod paths;
mod product;
mod random;
mod sampler;
mod serde;
mod structure;

/// Ordered concrete components of one generated pipeline, absent slots dropped.
pub type GeneratedPipeline = Vec<serde_json::Map<String, serde_json::Value>>;

pub use generator::{GeneratedConfig, GeneratorOptions, PipelineGenerator};
pub use grid::{expand_alternative, GridEnumerator};
pub use hash::stable_hash_string;
pub use length::{
    check_sample_budget, combination_census, estimate_length, grid_length, random_length,
    CombinationCensus, CombinationKind,
};
pub use manifest::{generate, GenerationManifest, GenerationReport, ManifestEntry};
pub use paths::{artifact_dir, artifact_dir_name, rewrite_paths, PATH_KEYS, SCRATCH_INIT_KEY};
pub use random::RandomEnumerator;
pub use sampler::{Distribution, DistributionSampler, ParameterSampler};
pub use serde::{from_json_slice, load_template, to_canonical_json_bytes};
pub use structure::{extract_structure, Skeleton, Structure, CHAINER_KEY, PIPE_KEY};
