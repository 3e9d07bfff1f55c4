//! Compute command: run a plan over a candle file.

use crate::cli::{ComputeArgs, OutputFormat};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use techind_config::{PlanConfig, StepConfig};
use techind_core::SeriesTable;
use techind_data::{load_table, write_csv, write_json};
use techind_engine::IndicatorEngine;
use tracing::info;

pub fn run(args: ComputeArgs, plan: PlanConfig) -> Result<()> {
    plan.validate()?;

    let data_path = args
        .data
        .or_else(|| plan.input.path.clone())
        .context("No candle file: pass --data or set input.path in the plan")?;

    info!("Loading candles from {:?}", data_path);
    let mut table = load_table(&data_path)
        .with_context(|| format!("Failed to load candles from {:?}", data_path))?;
    info!("Loaded {} rows", table.len());

    let mut engine = IndicatorEngine::new(&mut table);
    for (i, step) in plan.steps.iter().enumerate() {
        apply_step(&mut engine, step)
            .with_context(|| format!("Step {} ({}) failed", i + 1, step.label()))?;
    }

    info!("Table now has {} columns", table.column_count());

    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file {:?}", path))?;
            write_table(&table, args.format, BufWriter::new(file))?;
            info!("Wrote table to {:?}", path);
        }
        None => {
            let stdout = io::stdout();
            write_table(&table, args.format, stdout.lock())?;
        }
    }

    Ok(())
}

/// Run one plan step against the engine.
pub fn apply_step(engine: &mut IndicatorEngine<'_>, step: &StepConfig) -> Result<()> {
    match step {
        StepConfig::Rci {
            source,
            periods,
            digits,
            rescale,
        } => {
            engine.add_rci(source, periods, *digits, *rescale)?;
        }
        StepConfig::RciRange => {
            engine.change_rci_range()?;
        }
        StepConfig::Macd {
            source,
            short,
            long,
            signal,
            digits,
        } => {
            engine.add_macd(source, *short, *long, *signal, *digits)?;
        }
        StepConfig::Stochastic {
            source,
            periods,
            digits,
        } => {
            engine.add_stochastic(source, periods, *digits)?;
        }
        StepConfig::Shift { family, diff } => {
            engine.add_previous_value_shift_and_diff(family, *diff)?;
        }
    }
    Ok(())
}

fn write_table<W: Write>(table: &SeriesTable, format: OutputFormat, mut writer: W) -> Result<()> {
    match format {
        OutputFormat::Csv => write_csv(table, &mut writer)?,
        OutputFormat::Json => write_json(table, &mut writer)?,
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use techind_config::parse_plan;

    fn closes() -> SeriesTable {
        let close: Vec<f64> = (1..=40).map(|x| x as f64).collect();
        SeriesTable::from_columns(vec![("close", close)]).unwrap()
    }

    #[test]
    fn test_plan_steps_add_columns() {
        let plan = parse_plan(
            r#"
[[steps]]
kind = "rci"
source = "close"
periods = [9]

[[steps]]
kind = "macd"
source = "close"
short = 12
long = 26
signal = 9

[[steps]]
kind = "shift"
family = "macd"
"#,
        )
        .unwrap();

        let mut table = closes();
        let mut engine = IndicatorEngine::new(&mut table);
        for step in &plan.steps {
            apply_step(&mut engine, step).unwrap();
        }

        for name in [
            "rci_9",
            "macd_12_26",
            "macd_signal_9",
            "macd_12_26_shift",
            "macd_12_26_shift_diff",
            "macd_signal_9_shift",
            "macd_signal_9_shift_diff",
        ] {
            assert!(table.contains(name), "missing {}", name);
        }
        // rising closes with rescale: 100 + 100
        assert_eq!(table.value("rci_9", 39), Some(200.0));
    }

    #[test]
    fn test_missing_source_fails() {
        let mut table = closes();
        let mut engine = IndicatorEngine::new(&mut table);
        let step = StepConfig::Stochastic {
            source: "adj_close".to_string(),
            periods: vec![14],
            digits: 4,
        };
        assert!(apply_step(&mut engine, &step).is_err());
    }

    #[test]
    fn test_write_table_csv() {
        let mut table = closes();
        IndicatorEngine::new(&mut table)
            .add_rci("close", &[2], 4, false)
            .unwrap();

        let mut out = Vec::new();
        write_table(&table, OutputFormat::Csv, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("index,close,rci_2"));
        assert_eq!(lines.next(), Some("0,1,"));
    }
}
