//! Command-line argument parsing for docsift
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

use crate::cli::config::Config;

/// docsift - Find the PDF pages that matter for a persona and task
#[derive(Parser, Debug)]
#[command(name = "docsift")]
#[command(version)]
#[command(about = "Rank the most relevant PDF pages for a persona and task", long_about = None)]
pub struct Args {
    /// Directory containing the PDFs (and persona.json by default)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Directory to write output.json into
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Persona file (defaults to <input>/persona.json)
    #[arg(short, long)]
    pub persona: Option<PathBuf>,

    /// Number of sections to keep
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Score added to sections matching the keyword vocabulary
    #[arg(long)]
    pub keyword_boost: Option<f64>,

    /// Directory with a pre-downloaded embedding model
    #[arg(long)]
    pub model_path: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: -q (quiet), default (normal), -v (verbose), -vv (very verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except errors)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Extract, rank and write the report (default)
    Rank,

    /// Display the effective configuration
    Config,

    /// Download the embedding model into the local cache
    Download,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
    VeryVerbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else {
            match self.verbose {
                0 => Verbosity::Normal,
                1 => Verbosity::Verbose,
                _ => Verbosity::VeryVerbose,
            }
        }
    }

    /// Subcommand to run, `rank` when none given
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Rank)
    }

    /// Check flag values clap cannot
    pub fn validate(&self) -> Result<(), String> {
        if let Some(boost) = self.keyword_boost {
            if !boost.is_finite() || boost < 0.0 {
                return Err(format!("--keyword-boost must be a non-negative number, got {}", boost));
            }
        }

        if self.quiet && self.verbose > 0 {
            return Err("Cannot combine --quiet with --verbose.".to_string());
        }

        Ok(())
    }

    /// Overlay command-line values onto a loaded configuration
    pub fn apply_to(&self, config: &mut Config) {
        if let Some(input) = &self.input {
            config.paths.input_dir = input.to_string_lossy().into_owned();
        }
        if let Some(output) = &self.output {
            config.paths.output_dir = output.to_string_lossy().into_owned();
        }
        if let Some(persona) = &self.persona {
            config.paths.persona_file = Some(persona.to_string_lossy().into_owned());
        }
        if let Some(top_k) = self.top_k {
            config.ranking.top_k = top_k;
        }
        if let Some(boost) = self.keyword_boost {
            config.ranking.keyword_boost = boost;
        }
        if let Some(model_path) = &self.model_path {
            config.model.local_path = Some(model_path.to_string_lossy().into_owned());
        }
    }
}

impl Verbosity {
    /// Convert to string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            Verbosity::Quiet => "quiet",
            Verbosity::Normal => "normal",
            Verbosity::Verbose => "verbose",
            Verbosity::VeryVerbose => "very_verbose",
        }
    }

    /// Check if should show progress bars
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Default log filter when RUST_LOG is unset
    pub fn log_level(&self) -> LevelFilter {
        match self {
            Verbosity::Quiet => LevelFilter::Error,
            Verbosity::Normal => LevelFilter::Warn,
            Verbosity::Verbose => LevelFilter::Info,
            Verbosity::VeryVerbose => LevelFilter::Debug,
        }
    }
}
