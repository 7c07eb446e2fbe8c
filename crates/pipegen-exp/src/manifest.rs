use pipegen_core::errors::{ErrorInfo, PipegenError};
use pipegen_core::SearchMode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::generator::{GeneratedConfig, GeneratorOptions, PipelineGenerator};
use crate::hash::stable_hash_string;
use crate::paths::artifact_dir_name;

/// Record of one emitted configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ManifestEntry {
    pub index: usize,
    pub out_dir: String,
    pub config_hash: String,
}

/// Reproducibility summary of a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationManifest {
    pub template_hash: String,
    pub mode: SearchMode,
    pub samples: usize,
    pub seed: u64,
    pub total: u64,
    #[serde(default)]
    pub entries: Vec<ManifestEntry>,
}

impl GenerationManifest {
    /// Starts an empty manifest for `template` generated with `options`.
    pub fn new(
        template: &Value,
        options: &GeneratorOptions,
        total: u64,
    ) -> Result<Self, PipegenError> {
        Ok(Self {
            template_hash: stable_hash_string(template)?,
            mode: options.mode,
            samples: options.samples,
            seed: options.seed,
            total,
            entries: Vec::new(),
        })
    }

    /// Appends the entry describing `generated`.
    pub fn record(
        &mut self,
        generated: &GeneratedConfig,
    ) -> Result<&ManifestEntry, PipegenError> {
        let config_hash = stable_hash_string(&generated.config)?;
        self.entries.push(ManifestEntry {
            index: generated.index,
            out_dir: artifact_dir_name(generated.index),
            config_hash,
        });
        Ok(&self.entries[self.entries.len() - 1])
    }

    /// Checks that the recorded entries match the estimated total.
    pub fn verify_complete(&self) -> Result<(), PipegenError> {
        if self.entries.len() as u64 == self.total {
            Ok(())
        } else {
            Err(PipegenError::Config(
                ErrorInfo::new(
                    "count-mismatch",
                    "emitted configurations differ from the estimated total",
                )
                .with_context("expected", self.total.to_string())
                .with_context("emitted", self.entries.len().to_string()),
            ))
        }
    }
}

/// Materialized result of a full generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    pub manifest: GenerationManifest,
    pub configs: Vec<GeneratedConfig>,
}

/// Generates every configuration of `template` eagerly.
pub fn generate(
    template: &Value,
    options: &GeneratorOptions,
) -> Result<GenerationReport, PipegenError> {
    let generator = PipelineGenerator::new(template.clone(), options)?;
    let mut manifest = GenerationManifest::new(template, options, generator.total())?;
    let mut configs = Vec::new();
    for generated in generator {
        let generated = generated?;
        manifest.record(&generated)?;
        configs.push(generated);
    }
    manifest.verify_complete()?;
    Ok(GenerationReport { manifest, configs })
}
