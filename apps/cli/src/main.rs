#![deny(warnings)]

//! Headless CLI: replays an optional command script while advancing days and
//! prints the resulting KPIs.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::Deserialize;
use sim_core::{ReferenceData, SimConfig};
use sim_runtime::{Command, Engine};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Default)]
struct Args {
    days: Option<u32>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    data: Option<PathBuf>,
    script: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Args {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--days" => args.days = it.next().and_then(|s| s.parse().ok()),
            "--seed" => args.seed = it.next().and_then(|s| s.parse().ok()),
            "--config" => args.config = it.next().map(PathBuf::from),
            "--data" => args.data = it.next().map(PathBuf::from),
            "--script" => args.script = it.next().map(PathBuf::from),
            "--json" => args.json = true,
            _ => {}
        }
    }
    args
}

/// One scripted command, issued before the given day is advanced (0 = before the first).
#[derive(Debug, Deserialize)]
struct ScriptStep {
    day: u32,
    #[serde(flatten)]
    command: Command,
}

fn load_script(path: &Path) -> Result<Vec<ScriptStep>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading script {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing script {}", path.display()))
}

fn main() -> Result<()> {
    // Logging setup
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let args = parse_args();
    info!(?args, "starting CLI");

    let mut config = match &args.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };
    if let Some(seed) = args.seed {
        config.rng_seed = seed;
    }
    let data = match &args.data {
        Some(dir) => ReferenceData::from_dir(dir)?,
        None => ReferenceData::builtin()?,
    };
    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => Vec::new(),
    };

    let start = NaiveDate::from_ymd_opt(2025, 1, 1).context("invalid start date")?;
    let engine = Engine::new_game(data, config, start);
    sim_core::validate_world(&engine.world())?;

    let days = args.days.unwrap_or(30);
    for day in 0..days {
        for step in script.iter().filter(|s| s.day == day) {
            match engine.apply(&step.command) {
                Ok(event) => info!(day, "{event}"),
                Err(err) => warn!(day, command = step.command.name(), %err, "scripted command rejected"),
            }
        }
        match engine.advance_day() {
            Ok(report) => {
                for event in &report.events {
                    info!(day, "{event}");
                }
            }
            Err(err) => {
                warn!(day, %err, "simulation stalled");
                break;
            }
        }
    }
    sim_core::validate_world(&engine.world())?;

    let snap = engine.snapshot();
    if args.json {
        println!("{}", serde_json::to_string_pretty(&snap)?);
    } else {
        println!(
            "KPI | days: {} | date: {} | money: ${} | value: ${} | inv: {} units ({}/{} vol) | contracts: {} pending, {} active | trucks: {} | staff: {} (+{} candidates)",
            snap.days_run,
            snap.date,
            snap.money,
            snap.company_value,
            snap.inventory_units,
            snap.storage_used,
            snap.storage_capacity,
            snap.pending_contracts,
            snap.active_contracts,
            snap.trucks,
            snap.employees,
            snap.candidates
        );
    }

    Ok(())
}
