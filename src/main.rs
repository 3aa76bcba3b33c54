use clap::Parser;
use color_eyre::Result;
use env_logger::Env;
use log::{info, warn};
use std::path::PathBuf;

use topogen::bom;
use topogen::config_loader;
use topogen::orchestrator::{self, GenerateOptions, OutputFormat};
use topogen::project;

/// Reference network topology synthesis for infrastructure delivery projects
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the project configuration YAML (or JSON) file
    #[arg(short, long)]
    config: PathBuf,

    /// Output path for the generated project file
    /// (defaults to `<project_name>_topology.json`)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Encoding of the project file
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
    format: OutputFormat,

    /// Print the bill-of-materials estimate
    #[arg(long)]
    bom: bool,

    /// Fail when the generated topology violates a consistency check
    #[arg(long)]
    check: bool,
}

fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Parse command-line arguments
    let args = Args::parse();

    // Initialize logging with default filter level of "info"
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting topogen");
    info!("Configuration file: {:?}", args.config);

    let config = config_loader::load_config(&args.config)?;

    let output = args.output.clone().unwrap_or_else(|| {
        let mut path = PathBuf::from(project::export_file_name(&config.project_name));
        if args.format == OutputFormat::Yaml {
            path.set_extension("yaml");
        }
        path
    });
    info!("Output file: {:?}", output);

    let options = GenerateOptions {
        format: args.format,
        strict: args.check,
    };
    let report = orchestrator::generate_project_file(&config, &output, &options)?;

    if !report.check_errors.is_empty() {
        warn!("{} consistency warning(s); rerun with --check to fail on them", report.check_errors.len());
    }

    if args.bom || config.show_bom {
        println!("{}", bom::render_text(&report.bom));
    }

    info!("Topology generation completed successfully");
    Ok(())
}
