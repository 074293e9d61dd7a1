//! Weekly route-tracking report.
//!
//! Loads a plan and a run log, computes the indicators and the tracking table
//! for one ISO week and prints them.
//!
//! # Usage
//!
//! ```bash
//! weekly-report "PLANNING.csv" "runs.csv" 28
//! weekly-report "PLANNING.csv" "runs.csv" 28 --config kpi.toml --json
//! ```
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use route_kpi::core::domain::Weekday;
use route_kpi::io::loaders::DatasetLoader;
use route_kpi::services::report::{build_weekly_report, Gauge, WeeklyReport};
use route_kpi::KpiConfig;

/// Week shown when none is given on the command line
const DEFAULT_WEEK: u32 = 28;

struct Args {
    plan_path: PathBuf,
    executions_path: PathBuf,
    week: u32,
    config_path: Option<PathBuf>,
    json: bool,
}

fn parse_args() -> Result<Args> {
    let mut positional = Vec::new();
    let mut config_path = None;
    let mut json = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--config" => {
                let path = args.next().context("--config needs a path")?;
                config_path = Some(PathBuf::from(path));
            }
            "-h" | "--help" => {
                println!(
                    "Usage: weekly-report <plan.csv> <runs.csv> [week] [--config <kpi.toml>] [--json]"
                );
                std::process::exit(0);
            }
            other if other.starts_with("--") => bail!("Unknown option: {}", other),
            _ => positional.push(arg),
        }
    }

    let mut positional = positional.into_iter();
    let plan_path = positional.next().context("Missing plan file argument")?;
    let executions_path = positional.next().context("Missing run log argument")?;
    let week = match positional.next() {
        Some(w) => w
            .parse()
            .with_context(|| format!("Invalid week number: {}", w))?,
        None => DEFAULT_WEEK,
    };

    Ok(Args {
        plan_path: PathBuf::from(plan_path),
        executions_path: PathBuf::from(executions_path),
        week,
        config_path,
        json,
    })
}

fn load_config(path: Option<&PathBuf>) -> Result<KpiConfig> {
    match path {
        Some(path) => Ok(KpiConfig::from_file(path)?),
        None => match KpiConfig::from_default_location() {
            Ok(config) => Ok(config),
            Err(e) => {
                info!("{}; using built-in defaults", e);
                Ok(KpiConfig::default())
            }
        },
    }
}

fn print_gauge(gauge: &Gauge) {
    println!(
        "  {:<34} {:>6.1} %  [{:?}, good from {:.0}]",
        gauge.title, gauge.value, gauge.band, gauge.good_from
    );
}

fn print_report(report: &WeeklyReport) {
    let kpi = &report.indicators;

    println!("Indicateurs Hebdomadaires - semaine {}", report.week);
    println!("  Heures cumulées        {:>10.2} heures", kpi.cumulative_hours);
    println!("  Surface nettoyée       {:>10.2} m²", kpi.cleaned_area_sqm);
    println!("  Vitesse moyenne        {:>10.2} km/h", kpi.avg_speed_kmh);
    println!("  Productivité moyenne   {:>10.2} m²/h", kpi.avg_productivity_sqm_per_h);
    println!();

    print_gauge(&report.adherence_gauge);
    print_gauge(&report.completion_gauge);
    println!();

    println!("Tableau de Suivi des Parcours");
    if report.comparison.is_empty() {
        println!("  (aucun parcours prévu cette semaine)");
        return;
    }

    let width = report
        .comparison
        .iter()
        .map(|row| row.label.chars().count())
        .max()
        .unwrap_or(0)
        .max("Parcours Prévu".chars().count());

    print!("  {:<width$}", "Parcours Prévu", width = width);
    for day in Weekday::ALL {
        print!(" | {:<8}", day.label());
    }
    println!();

    for row in &report.comparison {
        print!("  {:<width$}", row.label, width = width);
        for day in Weekday::ALL {
            print!(" | {:<8}", row.status(day).label());
        }
        println!();
    }
}

fn main() -> Result<()> {
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let args = parse_args()?;
    let config = load_config(args.config_path.as_ref())?;

    let loaded = DatasetLoader::load(&args.plan_path, &args.executions_path, &config)?;
    info!(
        "Dataset ready: {} planned assignments, {} runs",
        loaded.dataset.planned.len(),
        loaded.dataset.executions.len()
    );

    let report = build_weekly_report(args.week, &loaded.dataset, &config)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    Ok(())
}
