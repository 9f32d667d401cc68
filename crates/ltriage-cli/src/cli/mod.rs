//! CLI for ltriage.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use ltriage_core::config;
use std::path::PathBuf;

use commands::{run_classify, run_fetch, run_slim, run_split, run_triage, FetchArgs};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ltriage")]
#[command(about = "Scrape-run log triage and bounded-retry media fetch", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Fetch media for every entity in a list, appending sessions to the run log.
    Fetch {
        /// File with one entity per line (leading '@' allowed).
        entities: PathBuf,
        /// Root of the per-entity directories (default: config work_dir, else current dir).
        #[arg(long, value_name = "DIR")]
        work_dir: Option<PathBuf>,
        /// Run log to append to (default: <work dir>/logs/log.txt).
        #[arg(long, value_name = "FILE")]
        run_log: Option<PathBuf>,
        /// Attempts per image (default: config fetch.attempt_budget).
        #[arg(long, value_name = "N")]
        attempts: Option<u32>,
    },

    /// Split a combined run log into one file per entity beside it.
    Split {
        /// Combined run log.
        log: PathBuf,
        /// Also write the last session, which no marker seals.
        #[arg(long)]
        flush_last: bool,
    },

    /// Drop noise lines from a log file in place.
    Slim {
        /// Log file to rewrite.
        path: PathBuf,
    },

    /// Print the classification of a single-session log.
    Classify {
        /// Single-session log file.
        path: PathBuf,
    },

    /// Split, slim, classify and route everything produced from a combined run log.
    Triage {
        /// Combined run log.
        log: PathBuf,
        /// Also write the last session, which no marker seals.
        #[arg(long)]
        flush_last: bool,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                entities,
                work_dir,
                run_log,
                attempts,
            } => run_fetch(
                &cfg,
                FetchArgs {
                    entities,
                    work_dir,
                    run_log,
                    attempts,
                },
            )?,
            CliCommand::Split { log, flush_last } => run_split(&cfg, &log, flush_last)?,
            CliCommand::Slim { path } => run_slim(&cfg, &path)?,
            CliCommand::Classify { path } => run_classify(&path)?,
            CliCommand::Triage { log, flush_last } => run_triage(&cfg, &log, flush_last)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
