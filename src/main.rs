use std::io;
use std::path::PathBuf;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod charts;
mod config;
mod dashboard;
mod error;
mod filter;
mod generator;
mod heatmap;
mod metrics;
mod models;
mod report;

use config::DashboardConfig;
use dashboard::Dashboard;
use filter::DateRange;

#[derive(Parser)]
#[command(name = "student-activity-dashboard")]
#[command(about = "Behavioural metrics dashboard over a synthetic 365-day window", long_about = None)]
struct Cli {
    /// Seed for the synthetic data generator
    #[arg(long, global = true, default_value_t = generator::DEFAULT_SEED)]
    seed: u64,
    /// First day of the window (defaults to 365 days before today)
    #[arg(long, global = true)]
    start_date: Option<NaiveDate>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct RangeArgs {
    /// First day of the selection, inclusive
    #[arg(long)]
    from: Option<NaiveDate>,
    /// Last day of the selection, inclusive
    #[arg(long)]
    to: Option<NaiveDate>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the headline metrics
    Summary,
    /// Print the weekday by ISO week activity heatmap
    Heatmap,
    /// List records in a date range
    Series {
        #[command(flatten)]
        range: RangeArgs,
        /// Write the selection to a CSV file instead of stdout
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Generate a markdown dashboard
    Report {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, default_value = "dashboard.md")]
        out: PathBuf,
    },
    /// Export the dashboard payload as JSON
    Export {
        #[command(flatten)]
        range: RangeArgs,
        #[arg(long, default_value = "dashboard.json")]
        out: PathBuf,
    },
}

fn selected_range(dashboard: &Dashboard, args: &RangeArgs) -> anyhow::Result<DateRange> {
    let fallback = dashboard
        .default_range()
        .context("dashboard has no records to select from")?;
    Ok(config::resolve_range(args.from, args.to, fallback))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    let config = DashboardConfig::new(cli.seed, cli.start_date);
    let dashboard = Dashboard::build(config).context("failed to build dashboard")?;

    match cli.command {
        Commands::Summary => {
            print!("{}", report::render_tiles(&dashboard.summary.tiles()));
        }
        Commands::Heatmap => {
            print!("{}", report::render_heatmap(&dashboard.heatmap));
        }
        Commands::Series { range, csv } => {
            let range = selected_range(&dashboard, &range)?;
            let selected = dashboard.select(range);
            match csv {
                Some(path) => {
                    let written = dashboard::write_csv(&path, &selected)?;
                    println!("Wrote {written} records to {}.", path.display());
                }
                None => print!("{}", report::render_series(&selected)),
            }
        }
        Commands::Report { range, out } => {
            let range = selected_range(&dashboard, &range)?;
            let selected = dashboard.select(range);
            let report = report::build_report(&dashboard, range, &selected);
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Export { range, out } => {
            let range = selected_range(&dashboard, &range)?;
            let selected = dashboard.select(range);
            dashboard::write_json(&out, &dashboard.payload(range, &selected))?;
            println!("Dashboard exported to {}.", out.display());
        }
    }

    Ok(())
}
