//! Technical indicator engine CLI.

mod cli;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use logging::setup_logging;
use techind_config::load_plan;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // CLI flags win over the plan's logging section
    let plan = load_plan(&cli.plan);
    let logging = plan
        .as_ref()
        .map(|p| p.logging.clone())
        .unwrap_or_default();
    let log_level = cli
        .log_level
        .map(|level| level.as_str().to_string())
        .unwrap_or(logging.level.clone());
    setup_logging(&log_level, cli.json_logs || logging.is_json());

    match cli.command {
        Commands::Compute(args) => {
            let plan = plan.with_context(|| format!("Failed to load plan {:?}", cli.plan))?;
            cli::commands::compute::run(args, plan)
        }
        Commands::ValidatePlan => cli::commands::validate::run(&cli.plan, plan),
    }
}
