use std::error::Error;

use clap::{Parser, Subcommand};
use pipegen_cli::commands::{
    count::{self, CountArgs},
    generate::{self, GenerateArgs},
};

#[derive(Parser, Debug)]
#[command(name = "pipegen", about = "Pipeline experiment configuration generator")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Write every generated configuration of a template to disk.
    Generate(GenerateArgs),
    /// Report how many configurations a template would generate.
    Count(CountArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Generate(args) => generate::run(&args).map(|_| ()),
        Command::Count(args) => count::run(&args).map(|_| ()),
    }
}
