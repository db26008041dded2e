//! revenue-pulse CLI - demo driver for the analytics engine
//!
//! Seeds an in-memory record store with synthetic history (or a revenue
//! CSV) and runs the forecast, pricing, simulation and KPI operations
//! against it.
//!
//! ## Example Usage
//!
//! ```bash
//! # 14-day demand forecast
//! revenue-pulse forecast --target-date 2025-06-01 --days 14
//!
//! # Pricing with a custom room-type table
//! revenue-pulse pricing --target-date 2025-06-01 --room-types rooms.toml
//!
//! # What-if simulation
//! revenue-pulse simulate --start 2025-06-01 --end 2025-06-07 \
//!     --price-change 10 --marketing-spend 5000
//!
//! # KPI summary over loaded history
//! revenue-pulse kpi --start 2025-03-01 --end 2025-03-31 --csv history.csv
//! ```

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};
use clap::{Parser, Subcommand};
use colored::Colorize;
use revenue_pulse::engine::{AnalyticsEngine, EngineConfig};
use revenue_pulse::pricing::RoomTypeTable;
use revenue_pulse::records::RevenueRecord;
use revenue_pulse::simulation::WhatIfScenario;
use revenue_pulse::store::{InMemoryRecordStore, Property};
use revenue_pulse::types::DEFAULT_HORIZON_DAYS;
use std::fs;
use std::path::PathBuf;
use std::process;
use std::sync::Arc;

const DEMO_PROPERTY: &str = "grand-plaza";

/// revenue-pulse: hotel revenue analytics engine
#[derive(Parser)]
#[command(name = "revenue-pulse")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Demand forecasting, pricing and what-if simulation", long_about = None)]
struct Cli {
    /// Load revenue history from a CSV file instead of synthetic data
    #[arg(long, global = true)]
    csv: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Forecast occupancy, ADR and RevPAR
    Forecast {
        /// First forecast date (YYYY-MM-DD)
        #[arg(short = 't', long)]
        target_date: NaiveDate,

        /// Forecast horizon in days
        #[arg(short = 'd', long, default_value_t = DEFAULT_HORIZON_DAYS)]
        days: u32,
    },

    /// Recommend per-room-type price bands
    Pricing {
        /// First forecast date (YYYY-MM-DD)
        #[arg(short = 't', long)]
        target_date: NaiveDate,

        /// Forecast horizon in days
        #[arg(short = 'd', long, default_value_t = 7)]
        days: u32,

        /// TOML file overriding the default room-type table
        #[arg(long)]
        room_types: Option<PathBuf>,
    },

    /// Run a what-if scenario against the baseline forecast
    Simulate {
        /// Scenario start date (YYYY-MM-DD)
        #[arg(short = 's', long)]
        start: NaiveDate,

        /// Scenario end date, inclusive (YYYY-MM-DD)
        #[arg(short = 'e', long)]
        end: NaiveDate,

        /// Own price change in percent (may be negative)
        #[arg(long, default_value_t = 0.0)]
        price_change: f64,

        /// Additional marketing spend
        #[arg(long, default_value_t = 0.0)]
        marketing_spend: f64,

        /// Competitor price change in percent
        #[arg(long, default_value_t = 0.0)]
        competitor_change: f64,
    },

    /// Summarize KPIs over a historical date range
    Kpi {
        /// Range start date (YYYY-MM-DD)
        #[arg(short = 's', long)]
        start: NaiveDate,

        /// Range end date, inclusive (YYYY-MM-DD)
        #[arg(short = 'e', long)]
        end: NaiveDate,
    },
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();
    if let Err(err) = run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let store = build_store(cli.csv.as_deref())?;

    match cli.command {
        Commands::Forecast { target_date, days } => {
            let engine = AnalyticsEngine::with_defaults(store);
            let forecast = engine.forecast_demand(DEMO_PROPERTY, target_date, days)?;

            println!("{}", "Demand forecast".bold());
            println!("{:<12} {:>10} {:>10} {:>10}", "date", "occ %", "ADR", "RevPAR");
            for p in &forecast {
                println!(
                    "{:<12} {:>10.1} {:>10.2} {:>10.2}",
                    p.date, p.predicted_occupancy, p.predicted_adr, p.predicted_revpar
                );
            }
        }

        Commands::Pricing {
            target_date,
            days,
            room_types,
        } => {
            let mut config = EngineConfig::default();
            if let Some(path) = room_types {
                let raw = fs::read_to_string(&path)
                    .with_context(|| format!("reading room-type table {}", path.display()))?;
                config.room_types =
                    toml::from_str::<RoomTypeTable>(&raw).context("parsing room-type table")?;
            }

            let engine = AnalyticsEngine::new(store, config);
            let pricing = engine.recommend_prices(DEMO_PROPERTY, target_date, days)?;

            println!("{}", "Pricing recommendations".bold());
            for day in &pricing {
                println!(
                    "{} (occupancy forecast {:.1}%)",
                    day.date.to_string().as_str().bold(),
                    day.occupancy_forecast
                );
                for rec in &day.room_types {
                    println!(
                        "  {:<16} {:>7.0}  [{:.0} - {:.0}]  expected {:.2}",
                        rec.room_type,
                        rec.recommended_price,
                        rec.price_range.min,
                        rec.price_range.max,
                        rec.expected_revenue
                    );
                }
            }
        }

        Commands::Simulate {
            start,
            end,
            price_change,
            marketing_spend,
            competitor_change,
        } => {
            let engine = AnalyticsEngine::with_defaults(store);
            let scenario = WhatIfScenario {
                start_date: start,
                end_date: end,
                price_change_percent: price_change,
                marketing_spend,
                competitor_price_change_percent: competitor_change,
            };

            let result = engine.run_simulation(DEMO_PROPERTY, &scenario)?;
            println!("{} {}", "Simulation run".bold(), result.id);
            print!("{}", result.summary);
        }

        Commands::Kpi { start, end } => {
            let engine = AnalyticsEngine::with_defaults(store);
            let summary = engine.kpi_summary(DEMO_PROPERTY, start, end)?;

            println!("{}", "KPI summary".bold());
            println!("  Total revenue:     {:.2}", summary.total_revenue);
            println!("  Avg occupancy:     {:.1}%", summary.average_occupancy);
            println!("  Avg ADR:           {:.2}", summary.average_adr);
            println!("  Avg RevPAR:        {:.2}", summary.average_revpar);
            println!("  Room revenue:      {:.2}", summary.revenue_breakdown.room);
            println!(
                "  F&B revenue:       {:.2}",
                summary.revenue_breakdown.food_beverage
            );
            println!("  Spa revenue:       {:.2}", summary.revenue_breakdown.spa);
            println!("  Retail revenue:    {:.2}", summary.revenue_breakdown.retail);
            println!("  Other revenue:     {:.2}", summary.revenue_breakdown.other);
        }
    }

    Ok(())
}

/// Build the demo store: one property plus a year of synthetic history,
/// optionally replaced by a revenue CSV
fn build_store(csv: Option<&std::path::Path>) -> Result<Arc<InMemoryRecordStore>> {
    let mut store = InMemoryRecordStore::new();
    store.add_property(Property {
        id: DEMO_PROPERTY.to_string(),
        name: "Grand Plaza".to_string(),
        total_rooms: 200,
    });

    if let Some(path) = csv {
        let loaded = store
            .load_revenue_csv(DEMO_PROPERTY, path)
            .with_context(|| format!("loading revenue history {}", path.display()))?;
        log::info!("loaded {} rows from {}", loaded, path.display());
    } else {
        seed_history(&mut store);
    }

    Ok(Arc::new(store))
}

/// Deterministic synthetic history: a year of records with mild weekly
/// and seasonal swings
fn seed_history(store: &mut InMemoryRecordStore) {
    let start = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    for i in 0..365 {
        let date = start + Duration::days(i);
        let weekly_swing = 8.0 * ((i % 7) as f64 / 6.0 - 0.5);
        let occupancy = (68.0 + weekly_swing).clamp(0.0, 100.0);
        let adr = 175.0 + 10.0 * ((i % 30) as f64 / 29.0 - 0.5);

        store.add_revenue_record(RevenueRecord::from_parts(
            DEMO_PROPERTY,
            date,
            adr * 2.0 * occupancy / 100.0 * 40.0,
            2400.0 + weekly_swing * 30.0,
            550.0,
            280.0,
            120.0,
            occupancy,
            adr,
        ));
    }
}
