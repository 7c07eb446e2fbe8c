pub mod count;
pub mod generate;

use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use pipegen_core::SearchMode;
use pipegen_exp::GeneratorOptions;

/// Generation options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct OptionArgs {
    /// YAML file with generator options; flags below override its fields.
    #[arg(long)]
    pub options: Option<PathBuf>,
    /// Search mode, `grid` or `random`.
    #[arg(long)]
    pub mode: Option<String>,
    /// Draws per search-bearing combination in random mode.
    #[arg(long)]
    pub samples: Option<usize>,
    /// Master seed for random draws.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Base directory written into rewritten artifact paths.
    #[arg(long)]
    pub save_path: Option<PathBuf>,
}

impl OptionArgs {
    pub fn resolve(&self) -> Result<GeneratorOptions, Box<dyn Error>> {
        let mut options = match &self.options {
            Some(path) => load_options(path)?,
            None => GeneratorOptions::default(),
        };
        if let Some(mode) = &self.mode {
            options.mode = mode
                .parse::<SearchMode>()
                .map_err(|err| Box::new(err) as Box<dyn Error>)?;
        }
        if let Some(samples) = self.samples {
            options.samples = samples;
        }
        if let Some(seed) = self.seed {
            options.seed = seed;
        }
        if let Some(save_path) = &self.save_path {
            options.save_path = save_path.clone();
        }
        Ok(options)
    }
}

fn load_options(path: &Path) -> Result<GeneratorOptions, Box<dyn Error>> {
    let text = fs::read_to_string(path)?;
    if text.trim().is_empty() {
        return Ok(GeneratorOptions::default());
    }
    Ok(serde_yaml::from_str(&text)?)
}
