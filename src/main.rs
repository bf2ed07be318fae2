//! Phone Verifications - desktop dashboard and terminal report
//!
//! `phone-verifications` opens the window; `phone-verifications report`
//! prints the same tables to stdout.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use eframe::egui;
use phone_verifications::data::{ReportQuery, StatusSelection};
use phone_verifications::gui::VerificationsApp;
use phone_verifications::report::text;
use phone_verifications::{Dataset, Report, ReportConfig};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "phone-verifications")]
#[command(about = "Phone verification outcomes by country and date")]
struct Cli {
    /// JSON config file (window, chart and logging settings)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Open the dashboard window (default)
    Gui {
        /// CSV to load on startup
        #[arg(long)]
        csv: Option<PathBuf>,
    },
    /// Print the pivot table and daily series for one query
    Report {
        /// Verification CSV
        #[arg(long)]
        csv: PathBuf,
        /// First day of the range (defaults to the earliest date in the file)
        #[arg(long)]
        start: Option<NaiveDate>,
        /// Last day of the range (defaults to the latest date in the file)
        #[arg(long)]
        end: Option<NaiveDate>,
        /// Leave approved verifications out of the table
        #[arg(long)]
        no_approved: bool,
        /// Leave expired verifications out of the table
        #[arg(long)]
        no_expired: bool,
    },
}

fn init_logging(default_level: &str) {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = ReportConfig::load_or_default(cli.config.as_deref())
        .context("loading configuration")?;
    init_logging(&config.log_level);

    match cli.command.unwrap_or(Command::Gui { csv: None }) {
        Command::Gui { csv } => run_gui(config, csv),
        Command::Report {
            csv,
            start,
            end,
            no_approved,
            no_expired,
        } => {
            let statuses = StatusSelection {
                approved: !no_approved,
                expired: !no_expired,
            };
            run_report(csv, start, end, statuses)
        }
    }
}

fn run_gui(config: ReportConfig, csv: Option<PathBuf>) -> Result<()> {
    let window = &config.window;
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([window.width, window.height])
            .with_min_inner_size([window.min_width, window.min_height])
            .with_title("Phone Verifications Dashboard"),
        ..Default::default()
    };

    info!("starting dashboard");
    eframe::run_native(
        "Phone Verifications Dashboard",
        options,
        Box::new(move |cc| Ok(Box::new(VerificationsApp::new(cc, &config, csv)))),
    )
    .map_err(|e| anyhow::anyhow!("dashboard failed: {e}"))
}

fn run_report(
    csv: PathBuf,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
    statuses: StatusSelection,
) -> Result<()> {
    let dataset = Dataset::from_path(&csv)
        .with_context(|| format!("loading {}", csv.display()))?;
    let defaults = dataset.default_query();
    let query = ReportQuery {
        start: start.or(defaults.start),
        end: end.or(defaults.end),
        statuses,
    };

    let report = Report::build(&dataset, &query)?;
    print!("{}", text::render(&report));
    Ok(())
}
