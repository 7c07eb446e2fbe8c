use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;
use pipegen_exp::{
    artifact_dir_name, load_template, to_canonical_json_bytes, GenerationManifest,
    PipelineGenerator,
};

use super::OptionArgs;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Template configuration (`.json`, `.yaml` or `.yml`).
    #[arg(long)]
    pub template: PathBuf,
    /// Directory receiving `pipe_<n>/config.json` and `manifest.json`.
    #[arg(long)]
    pub out: PathBuf,
    #[command(flatten)]
    pub generator: OptionArgs,
}

pub fn run(args: &GenerateArgs) -> Result<GenerationManifest, Box<dyn Error>> {
    let options = args.generator.resolve()?;
    let template = load_template(&args.template).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let generator = PipelineGenerator::new(template.clone(), &options)
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    let mut manifest = GenerationManifest::new(&template, &options, generator.total())
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;

    fs::create_dir_all(&args.out)?;
    for generated in generator {
        let generated = generated.map_err(|err| Box::new(err) as Box<dyn Error>)?;
        let config_dir = args.out.join(artifact_dir_name(generated.index));
        fs::create_dir_all(&config_dir)?;
        write_json(&config_dir.join("config.json"), &generated.config)?;
        manifest
            .record(&generated)
            .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    }
    manifest
        .verify_complete()
        .map_err(|err| Box::new(err) as Box<dyn Error>)?;
    write_json(&args.out.join("manifest.json"), &manifest)?;
    tracing::info!(
        total = manifest.total,
        out = %args.out.display(),
        "wrote generated configurations"
    );
    Ok(manifest)
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<(), Box<dyn Error>> {
    let bytes = to_canonical_json_bytes(value).map_err(|err| Box::new(err) as Box<dyn Error>)?;
    fs::write(path, bytes)?;
    Ok(())
}
