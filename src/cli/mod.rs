//! CLI module for Pitchcraft
//!
//! - `leads`: questions about the sales leads
//! - `engineer`: requirement breakdown and effort estimates
//! - `proposal`: list, search and full proposal generation
//! - `seed`: create the database with synthetic leads

use crate::config::AppConfig;
use clap::{Parser, Subcommand};
use pitchcraft_core::UserFriendlyError;
use std::path::PathBuf;

pub mod engineer;
pub mod leads;
pub mod prompts;
pub mod proposal;
pub mod repl;
pub mod seed;

/// Pitchcraft sales assistant CLI
#[derive(Parser, Debug)]
#[command(name = "pitchcraft")]
#[command(about = "Query sales leads, estimate projects and draft proposals")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask questions about sales leads
    Leads {
        #[command(subcommand)]
        command: LeadsCommands,
    },
    /// Break down requirements and estimate effort
    Engineer {
        #[command(subcommand)]
        command: EngineerCommands,
    },
    /// Generate sales proposals
    Proposal {
        #[command(subcommand)]
        command: ProposalCommands,
    },
    /// Create the database and insert synthetic leads
    Seed {
        /// Number of leads to generate
        #[arg(long, default_value_t = 50)]
        count: usize,
        /// Database file (overrides configuration)
        #[arg(long)]
        path: Option<PathBuf>,
    },
}

#[derive(Subcommand, Debug)]
pub enum LeadsCommands {
    /// Ask questions in a loop
    Interactive,
    /// Ask a single question
    Query {
        /// Question in plain language
        question: String,
    },
    /// Print one lead by ID
    Show {
        /// Lead ID
        id: i64,
    },
}

#[derive(Subcommand, Debug)]
pub enum EngineerCommands {
    /// Describe requirements in a loop
    Interactive,
    /// Estimate a single set of requirements
    Estimate {
        /// Project requirements in plain language
        requirements: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProposalCommands {
    /// Choose list / search / gen in a loop
    Interactive,
    /// List all leads
    List,
    /// Search leads by company or needs
    Search {
        /// Search term
        term: String,
    },
    /// Generate a proposal for one lead
    Generate {
        /// Lead ID
        lead_id: String,
    },
}

/// Run the CLI command
pub async fn run(cli: Cli, config: AppConfig) -> anyhow::Result<()> {
    match cli.command {
        Some(Commands::Leads { command }) => leads::run(command, &config).await,
        Some(Commands::Engineer { command }) => engineer::run(command, &config).await,
        Some(Commands::Proposal { command }) => proposal::run(command, &config).await,
        Some(Commands::Seed { count, path }) => seed::run(count, path, &config).await,
        None => {
            let mut cmd = <Cli as clap::CommandFactory>::command();
            cmd.print_help()?;
            println!();
            Ok(())
        }
    }
}

/// User-facing text for a pipeline failure
pub fn describe(err: &pitchcraft_core::Error) -> String {
    match err.suggestion() {
        Some(hint) => format!("{}\n{hint}", err.user_message()),
        None => err.user_message(),
    }
}

/// Convert a pipeline failure into the error a one-shot command exits with
pub fn fail(err: pitchcraft_core::Error) -> anyhow::Error {
    anyhow::anyhow!(describe(&err))
}
