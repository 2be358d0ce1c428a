//! `pitchcraft proposal`
//!
//! Listing and search call the agent's pass-through operations; proposal
//! generation goes through the workflow like every other `run`.

use super::{describe, fail, prompts, ProposalCommands};
use crate::app;
use crate::config::AppConfig;
use pitchcraft_core::{ProposalAgent, Workflow};
use std::sync::Arc;

const CHOICES: [&str; 4] = ["list", "search", "gen", "quit"];

/// Request text sent to the proposal workflow for a lead
pub fn generate_request(lead_id: &str) -> String {
    format!("Generate a proposal for lead {}", lead_id.trim())
}

/// Run a proposal subcommand.
pub async fn run(cmd: ProposalCommands, config: &AppConfig) -> anyhow::Result<()> {
    let store = app::open_store(config).await?;
    let oracle = app::build_oracle(config)?;
    let agent = Arc::new(ProposalAgent::with_store(oracle, store, config.rate_table()?));
    let workflow = Workflow::new(agent.clone());

    match cmd {
        ProposalCommands::Interactive => interactive(&agent, &workflow).await,
        ProposalCommands::List => {
            println!("{}", agent.list_leads().await.map_err(fail)?);
            Ok(())
        }
        ProposalCommands::Search { term } => {
            println!("{}", agent.search_leads(&term).await.map_err(fail)?);
            Ok(())
        }
        ProposalCommands::Generate { lead_id } => {
            let proposal = workflow.run(&generate_request(&lead_id)).await.map_err(fail)?;
            println!("{proposal}");
            Ok(())
        }
    }
}

async fn interactive(agent: &ProposalAgent, workflow: &Workflow) -> anyhow::Result<()> {
    println!("Sales Proposal Generator\n");

    loop {
        let Some(choice) = prompts::select("What would you like to do?", &CHOICES)? else {
            break;
        };

        let result = match choice.as_str() {
            "list" => agent.list_leads().await,
            "search" => {
                let Some(term) = prompts::text("Search term:", Some("Matches company or needs"))? else {
                    continue;
                };
                agent.search_leads(&term).await
            }
            "gen" => {
                let Some(lead_id) = prompts::text("Lead ID:", None)? else {
                    continue;
                };
                workflow.run(&generate_request(&lead_id)).await
            }
            _ => break,
        };

        match result {
            Ok(text) => println!("\n{text}\n"),
            Err(e) => {
                eprintln!("\nError: {}", describe(&e));
                eprintln!("Please try again...\n");
            }
        }
    }

    println!("Goodbye!");
    Ok(())
}
