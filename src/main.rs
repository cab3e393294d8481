//! docsift - Main CLI Entry Point

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::{Duration, Instant};

use docsift::{
    cli::{Args, Commands, Config, Verbosity},
    embedding::{EmbeddingScorer, ModelFiles},
    extraction::PdfExtractor,
    pipeline::{run_with_config, Pipeline},
};

fn main() -> Result<()> {
    let args = Args::parse();
    if let Err(msg) = args.validate() {
        eprintln!("{}: {}", "Error".red(), msg);
        std::process::exit(2);
    }

    let verbosity = args.verbosity();
    env_logger::Builder::new()
        .filter_level(verbosity.log_level())
        .parse_default_env()
        .init();

    let mut config = Config::load(args.config.as_deref()).context("Failed to load configuration")?;
    args.apply_to(&mut config);
    config.validate().context("Invalid configuration")?;

    match args.command() {
        Commands::Rank => run_rank(&config, verbosity)?,
        Commands::Config => show_config(&config)?,
        Commands::Download => download_model(&config, verbosity)?,
    }

    Ok(())
}

fn run_rank(config: &Config, verbosity: Verbosity) -> Result<()> {
    let start = Instant::now();

    let spinner = spinner(verbosity, "Loading embedding model");
    let scorer = EmbeddingScorer::load(&config.model_source());
    spinner.finish_and_clear();
    let scorer = scorer.context("Failed to load embedding model")?;

    let pipeline = Pipeline::new(PdfExtractor::new(), scorer, config)
        .with_progress(verbosity.show_progress());

    let report = run_with_config(&pipeline, config)?;
    let output_path = report.write_to(&config.output_dir())?;

    if verbosity != Verbosity::Quiet {
        println!(
            "{} Ranked {} sections from {} documents in {:.1}s",
            "✓".green(),
            report.extracted_sections.len(),
            report.metadata.input_documents.len(),
            start.elapsed().as_secs_f64()
        );
        for section in &report.extracted_sections {
            println!(
                "  {}. {} (page {}) {}",
                section.importance_rank,
                section.document.bold(),
                section.page_number,
                section.section_title.dimmed()
            );
        }
        println!("Output saved to: {}", output_path.display());
    }

    Ok(())
}

fn show_config(config: &Config) -> Result<()> {
    if let Some(path) = Config::default_path() {
        println!("# default location: {}", path.display());
    }
    print!("{}", config.to_toml()?);
    Ok(())
}

fn download_model(config: &Config, verbosity: Verbosity) -> Result<()> {
    let spinner = spinner(verbosity, "Fetching model files");
    let files = ModelFiles::fetch(&config.model_source());
    spinner.finish_and_clear();
    let files = files.context("Failed to fetch model")?;

    if verbosity != Verbosity::Quiet {
        println!("{} Model files ready:", "✓".green());
        println!("  config:    {}", files.config.display());
        println!("  tokenizer: {}", files.tokenizer.display());
        println!("  weights:   {}", files.weights.display());
        if let Some(path) = &files.sentence_config {
            println!("  sentence:  {}", path.display());
        }
    }
    Ok(())
}

fn spinner(verbosity: Verbosity, message: &'static str) -> ProgressBar {
    if !verbosity.show_progress() {
        return ProgressBar::hidden();
    }
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(message);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
