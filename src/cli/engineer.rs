//! `pitchcraft engineer`

use super::{fail, repl, EngineerCommands};
use crate::app;
use crate::config::AppConfig;
use pitchcraft_core::{EstimationAgent, Workflow};
use std::sync::Arc;

/// Run an engineer subcommand.
pub async fn run(cmd: EngineerCommands, config: &AppConfig) -> anyhow::Result<()> {
    let oracle = app::build_oracle(config)?;
    let workflow = Workflow::new(Arc::new(EstimationAgent::new(oracle)));

    match cmd {
        EngineerCommands::Interactive => {
            repl::run_loop(&workflow, "Sales Engineer Assistant", "Describe the project requirements").await
        }
        EngineerCommands::Estimate { requirements } => {
            let report = workflow.run(&requirements).await.map_err(fail)?;
            println!("{report}");
            Ok(())
        }
    }
}
