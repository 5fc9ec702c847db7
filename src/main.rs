//! `hoflow` batch tool.
//!
//! Reads a JSON array of registration form submissions, registers each one
//! into a fresh session, then prints the filtered table, the chart
//! aggregates and any notices as one JSON report on stdout.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use hoflow::{
    aggregate::Aggregates,
    calendar::CollectingOpener,
    config::RegistryConfig,
    export::CsvExporter,
    notice::Notice,
    officer::{HouseOfficerRecord, OfficerForm},
    registration::{Clock, FixedClock, FieldError, SystemClock},
    session::{RegisterError, Session},
    types::{Gender, Unit},
    view::{GenderFilter, SortKey, UnitFilter, ViewQuery},
};

#[derive(Parser)]
#[command(name = "hoflow")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "House officers clinical flow register", long_about = None)]
struct Cli {
    /// JSON file holding an array of form submissions
    input: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Treat this date as today when validating (YYYY-MM-DD)
    #[arg(long, env = "HOFLOW_TODAY")]
    today: Option<NaiveDate>,

    /// Case-insensitive search over name and presentation topic
    #[arg(short, long, default_value = "")]
    search: String,

    /// Only show this unit
    #[arg(short, long, value_parser = parse_unit)]
    unit: Option<Unit>,

    /// Only show this gender
    #[arg(short, long, value_parser = parse_gender)]
    gender: Option<Gender>,

    /// Sort key for the table
    #[arg(long, value_enum, default_value_t = SortArg::SignIn)]
    sort: SortArg,

    /// Select every visible row and export it as CSV to this path
    #[arg(long)]
    export: Option<PathBuf>,

    /// Print calendar links for the last registered officer
    #[arg(long)]
    calendar: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SortArg {
    Name,
    SignIn,
    Unit,
    Presentation,
}

impl From<SortArg> for SortKey {
    fn from(value: SortArg) -> Self {
        match value {
            SortArg::Name => SortKey::Name,
            SortArg::SignIn => SortKey::SignInDate,
            SortArg::Unit => SortKey::Unit,
            SortArg::Presentation => SortKey::PresentationDate,
        }
    }
}

fn parse_unit(s: &str) -> Result<Unit, String> {
    s.parse::<Unit>().map_err(|e| e.to_string())
}

fn parse_gender(s: &str) -> Result<Gender, String> {
    s.parse::<Gender>().map_err(|e| e.to_string())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Rejection {
    index: usize,
    errors: Vec<FieldError>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Report {
    registered: usize,
    rejected: Vec<Rejection>,
    visible: Vec<HouseOfficerRecord>,
    aggregates: Aggregates,
    calendar_links: Vec<String>,
    notices: Vec<Notice>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "hoflow=debug" } else { "hoflow=info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = RegistryConfig::default();
    match cli.today {
        Some(today) => run(&cli, Session::new(config, FixedClock(today))),
        None => run(&cli, Session::new(config, SystemClock)),
    }
}

fn run<C: Clock>(cli: &Cli, mut session: Session<C>) -> Result<()> {
    let file = File::open(&cli.input)
        .with_context(|| format!("failed to open {}", cli.input.display()))?;
    let forms: Vec<OfficerForm> = serde_json::from_reader(file)
        .with_context(|| format!("failed to parse {}", cli.input.display()))?;

    let mut registered = 0usize;
    let mut rejected = Vec::new();
    let mut notices = Vec::new();

    for (index, form) in forms.iter().enumerate() {
        match session.register(form) {
            Ok(reg) => {
                registered += 1;
                notices.push(reg.notice);
            }
            Err(RegisterError::Validation(errs)) => rejected.push(Rejection {
                index,
                errors: errs.errors().to_vec(),
            }),
            Err(err) => return Err(err).context("store rejected a registration"),
        }
    }

    session.set_query(ViewQuery {
        search: cli.search.clone(),
        unit: cli.unit.map_or(UnitFilter::All, UnitFilter::Only),
        gender: cli.gender.map_or(GenderFilter::All, GenderFilter::Only),
        sort: cli.sort.into(),
    });

    if let Some(path) = &cli.export {
        session.set_all_selected(true);
        let file = File::create(path)
            .with_context(|| format!("failed to create {}", path.display()))?;
        let mut exporter = CsvExporter::new(BufWriter::new(file));
        match session.export_selected(&mut exporter) {
            Ok(rows) => {
                exporter.into_inner().context("failed to finish export")?;
                notices.push(Notice::success(
                    "Export Complete",
                    format!("Exported {rows} house officer(s) to {}", path.display()),
                ));
            }
            Err(notice) => notices.push(notice),
        }
    }

    let mut calendar_links = Vec::new();
    if cli.calendar {
        let mut opener = CollectingOpener::new();
        notices.push(session.add_to_calendar(&mut opener));
        calendar_links = opener.drain().into_iter().map(String::from).collect();
    }

    let report = Report {
        registered,
        rejected,
        visible: session.view().to_records(),
        aggregates: session.aggregates(),
        calendar_links,
        notices,
    };
    serde_json::to_writer_pretty(std::io::stdout().lock(), &report)
        .context("failed to write report")?;
    println!();
    Ok(())
}
