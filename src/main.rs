use std::path::PathBuf;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use concept_scraper::config::{Overrides, Settings};
use tracing::info;

#[derive(Parser)]
#[command(
    name = "concept_scraper",
    about = "Convert a Confluence concept-definition export into glossary CSV"
)]
struct Cli {
    /// Folder containing the exported HTML pages
    #[arg(long)]
    input: Option<PathBuf>,
    /// Output CSV path
    #[arg(long)]
    output: Option<PathBuf>,
    /// Invalid links CSV path
    #[arg(long)]
    invalid: Option<PathBuf>,
    /// Config file (default: ./concept_scraper.toml if present)
    #[arg(short, long)]
    config: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let t0 = Instant::now();
    let cli = Cli::parse();

    let settings = Settings::load(&Overrides {
        config_file: cli.config,
        input_dir: cli.input,
        output_path: cli.output,
        invalid_path: cli.invalid,
    })
    .context("failed to load settings")?;
    info!(?settings, "settings loaded");

    let summary = concept_scraper::run(
        &settings.input_dir,
        &settings.output_path,
        &settings.invalid_path,
    )?;
    summary.print();
    println!("Output:  {}", settings.output_path.display());
    println!("Invalid: {}", settings.invalid_path.display());

    let elapsed = t0.elapsed();
    if elapsed.as_secs() >= 1 {
        println!("\nDone in {}", format_duration(elapsed));
    }
    Ok(())
}

fn format_duration(d: std::time::Duration) -> String {
    let secs = d.as_secs();
    if secs < 60 {
        format!("{:.1}s", d.as_secs_f64())
    } else {
        format!("{}m {}s", secs / 60, secs % 60)
    }
}
