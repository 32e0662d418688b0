//! MedSync Referral CLI
//!
//! Rank receiving facilities and inspect the referral demo data.
//!
//! Usage:
//!   medsync-referral recommend --procedure <P>... [--diagnosis <D>] [--address <A>] [--top <N>]
//!   medsync-referral facilities
//!   medsync-referral stats [--top <N>]
//!   medsync-referral schedules [--specialty <S>]
//!   medsync-referral referrals [--status pending|active|history]
//!   medsync-referral addresses [--province <ID>] [--city <ID>]

use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use medsync_referral::mock_data;
use medsync_referral::schedule::ALL_SPECIALTIES;
use medsync_referral::stats::BUSIEST_FACILITIES_SHOWN;
use medsync_referral::{AddressBook, DoctorDirectory, ReferralBook, Settings, SystemStats, Weekday};
use std::fs;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "medsync-referral")]
#[command(author = "MedSync")]
#[command(version = "0.1.0")]
#[command(about = "Rank receiving facilities for patient referrals", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (defaults to ./medsync.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Facility catalog JSON file (overrides the settings)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json", global = true)]
    format: OutputFormat,

    /// Output file (stdout if not specified)
    #[arg(short, long, global = true)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Json,
    Compact,
    Table,
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusGroup {
    Pending,
    Active,
    History,
}

#[derive(Subcommand)]
enum Commands {
    /// Rank facilities for a referral
    Recommend {
        /// Required procedure (repeatable)
        #[arg(short, long = "procedure")]
        procedures: Vec<String>,

        /// Primary diagnosis (not scored)
        #[arg(short, long, default_value = "")]
        diagnosis: String,

        /// Patient address (not scored)
        #[arg(short, long, default_value = "")]
        address: String,

        /// Number of facilities to return (overrides the settings)
        #[arg(short = 'n', long)]
        top: Option<usize>,
    },

    /// List the facility catalog
    Facilities,

    /// Busiest facilities, bed status and referral counts
    Stats {
        /// Number of busiest facilities to list
        #[arg(short = 'n', long, default_value_t = BUSIEST_FACILITIES_SHOWN)]
        top: usize,
    },

    /// Doctor on-duty schedules
    Schedules {
        /// Specialty filter
        #[arg(short, long, default_value = ALL_SPECIALTIES)]
        specialty: String,
    },

    /// Demo referrals, optionally one dashboard group
    Referrals {
        #[arg(short, long, value_enum)]
        status: Option<StatusGroup>,
    },

    /// Province, city and district lookup
    Addresses {
        #[arg(long)]
        province: Option<String>,

        #[arg(long, requires = "province")]
        city: Option<String>,
    },
}

/// One row of the schedule grid
#[derive(serde::Serialize)]
struct ScheduleRow<'a> {
    name: &'a str,
    specialty: &'a str,
    #[serde(flatten)]
    days: serde_json::Map<String, serde_json::Value>,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(catalog) = cli.catalog.clone() {
        settings.catalog_path = Some(catalog);
    }
    init_tracing(&settings.log_filter);

    let result: serde_json::Value = match cli.command {
        Commands::Recommend { procedures, diagnosis, address, top } => {
            let mut recommender = settings.recommender()?;
            if let Some(n) = top {
                recommender = recommender.with_max_results(n);
            }
            if procedures.is_empty() {
                tracing::warn!("no procedures given; every facility gets full equipment credit");
            }
            let ranked = recommender.recommend(&procedures, &diagnosis, &address);
            serde_json::to_value(ranked)?
        }
        Commands::Facilities => {
            let catalog = settings.catalog()?;
            serde_json::to_value(catalog.as_slice())?
        }
        Commands::Stats { top } => {
            let catalog = settings.catalog()?;
            let referrals = mock_data::referrals(Utc::now());
            serde_json::to_value(SystemStats::collect(catalog.as_slice(), &referrals, top))?
        }
        Commands::Schedules { specialty } => {
            let directory = DoctorDirectory::new(mock_data::doctors());
            let rows: Vec<ScheduleRow<'_>> = directory
                .filter_by_specialty(&specialty)
                .into_iter()
                .map(|doctor| ScheduleRow {
                    name: &doctor.name,
                    specialty: &doctor.specialty,
                    days: Weekday::ALL
                        .iter()
                        .map(|day| {
                            let shift = doctor.shift_on(*day).unwrap_or("-");
                            (day.to_string(), serde_json::Value::from(shift))
                        })
                        .collect(),
                })
                .collect();
            serde_json::to_value(rows)?
        }
        Commands::Referrals { status } => {
            let book = ReferralBook::new(mock_data::referrals(Utc::now()));
            let dashboard = book.dashboard();
            match status {
                Some(StatusGroup::Pending) => serde_json::to_value(&dashboard.pending)?,
                Some(StatusGroup::Active) => serde_json::to_value(&dashboard.active)?,
                Some(StatusGroup::History) => serde_json::to_value(dashboard.recent_history())?,
                None => serde_json::to_value(book.referrals())?,
            }
        }
        Commands::Addresses { province, city } => {
            let book = AddressBook::builtin();
            match (province.as_deref(), city.as_deref()) {
                (Some(p), Some(c)) => serde_json::to_value(book.districts_of(p, c))?,
                (Some(p), None) => serde_json::to_value(book.cities_of(p))?,
                _ => serde_json::to_value(book.provinces())?,
            }
        }
    };

    let output_str = match cli.format {
        OutputFormat::Json => serde_json::to_string_pretty(&result)?,
        OutputFormat::Compact => serde_json::to_string(&result)?,
        OutputFormat::Table => result_to_table(&result),
    };

    if let Some(output_path) = cli.output {
        fs::write(&output_path, &output_str)?;
        tracing::info!(path = %output_path.display(), "output written");
    } else {
        println!("{}", output_str);
    }

    Ok(())
}

fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Render an array of flat objects as an aligned text table
///
/// Nested values are printed as compact JSON; anything that is not an
/// array of objects falls back to pretty JSON.
fn result_to_table(value: &serde_json::Value) -> String {
    let rows = match value.as_array() {
        Some(rows) if rows.iter().all(|r| r.is_object()) && !rows.is_empty() => rows,
        _ => return serde_json::to_string_pretty(value).unwrap_or_default(),
    };

    let headers: Vec<&str> = rows[0]
        .as_object()
        .map(|obj| obj.keys().map(String::as_str).collect())
        .unwrap_or_default();

    let cells: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            headers
                .iter()
                .map(|h| match row.get(*h) {
                    Some(serde_json::Value::String(s)) => s.clone(),
                    Some(serde_json::Value::Null) | None => String::new(),
                    Some(other) => other.to_string(),
                })
                .collect()
        })
        .collect();

    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .max()
                .unwrap_or(0)
                .max(h.len())
        })
        .collect();

    let mut output = String::new();
    let header_line: Vec<String> = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| format!("{:<width$}", h, width = w))
        .collect();
    output.push_str(header_line.join("  ").trim_end());
    output.push('\n');

    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&rule.join("  "));
    output.push('\n');

    for row in &cells {
        let line: Vec<String> = row
            .iter()
            .zip(&widths)
            .map(|(cell, w)| format!("{:<width$}", cell, width = w))
            .collect();
        output.push_str(line.join("  ").trim_end());
        output.push('\n');
    }

    output
}
