//! Validate plan command.

use anyhow::Result;
use std::path::Path;
use techind_config::{ConfigError, PlanConfig};

pub fn run(plan_path: &Path, plan: Result<PlanConfig, ConfigError>) -> Result<()> {
    println!("Validating plan: {:?}", plan_path);

    let plan = match plan {
        Ok(plan) => plan,
        Err(e) => {
            println!("Plan error: {}", e);
            return Err(e.into());
        }
    };

    if let Err(e) = plan.validate() {
        println!("Plan error: {}", e);
        return Err(e.into());
    }

    println!("Plan is valid!");
    println!();
    println!("Log level: {}", plan.logging.level);
    match &plan.input.path {
        Some(path) => println!("Input: {}", path.display()),
        None => println!("Input: (pass --data)"),
    }
    println!("Steps: {}", plan.steps.len());
    println!();
    print!("{}", plan.to_toml()?);

    Ok(())
}
