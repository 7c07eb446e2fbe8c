use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use pipegen_core::SearchMode;
use pipegen_exp::{combination_census, estimate_length, extract_structure, load_template};
use serde::Serialize;

use super::OptionArgs;

#[derive(Args, Debug)]
pub struct CountArgs {
    /// Template configuration (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub template: PathBuf,
    #[command(flatten)]
    pub generator: OptionArgs,
}

/// Counts reported for a template under the resolved options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountSummary {
    pub mode: SearchMode,
    pub slots: usize,
    pub total: u64,
    pub plain_combinations: u64,
    pub search_combinations: u64,
}

pub fn run(args: &CountArgs) -> Result<CountSummary, Box<dyn Error>> {
    let options = args.generator.resolve()?;
    let template = load_template(&args.template).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let structure = extract_structure(template).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let total = estimate_length(&structure.slots, options.mode, options.samples)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let census =
        combination_census(&structure.slots).map_err(|err| Box::new(err) as Box<dyn Error>)?;

    let summary = CountSummary {
        mode: options.mode,
        slots: structure.slots.len(),
        total,
        plain_combinations: census.plain,
        search_combinations: census.searching,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(summary)
}
