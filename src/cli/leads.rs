//! `pitchcraft leads`

use super::{fail, repl, LeadsCommands};
use crate::app;
use crate::config::AppConfig;
use pitchcraft_core::{DataQueryAgent, Workflow};
use pitchcraft_store::{Lead, LeadStore};
use std::sync::Arc;

/// Run a leads subcommand.
pub async fn run(cmd: LeadsCommands, config: &AppConfig) -> anyhow::Result<()> {
    let store = app::open_store(config).await?;

    match cmd {
        LeadsCommands::Show { id } => show(&store, id).await,
        LeadsCommands::Interactive => {
            let workflow = data_query(store, config)?;
            repl::run_loop(&workflow, "Sales Lead Assistant", "What would you like to know about the leads?").await
        }
        LeadsCommands::Query { question } => {
            let workflow = data_query(store, config)?;
            let answer = workflow.run(&question).await.map_err(fail)?;
            println!("{answer}");
            Ok(())
        }
    }
}

fn data_query(store: LeadStore, config: &AppConfig) -> anyhow::Result<Workflow> {
    let oracle = app::build_oracle(config)?;
    Ok(Workflow::new(Arc::new(DataQueryAgent::new(store, oracle))))
}

/// Print one stored lead. Needs no oracle.
async fn show(store: &LeadStore, id: i64) -> anyhow::Result<()> {
    match store.get_lead(id).await.map_err(|e| fail(e.into()))? {
        Some(lead) => {
            println!("{}", render_lead(&lead));
            Ok(())
        }
        None => anyhow::bail!("No lead with id {id}"),
    }
}

fn render_lead(lead: &Lead) -> String {
    format!(
        "#{}: {} - {}\n  Contact:  {}\n  Budget:   ${:.2}\n  Timeline: {} to {}\n  Created:  {}",
        lead.id,
        lead.company,
        lead.needs,
        lead.customer_name,
        lead.budget,
        lead.timeline_start,
        lead.timeline_end,
        lead.created_at.format("%Y-%m-%d %H:%M:%S"),
    )
}
