//! Gatelog CLI - access decisions and audit log from the terminal
//!
//! Usage:
//! ```bash
//! gatelog                                   # interactive menu
//! gatelog register A123 --name "Alice" --category contractor
//! gatelog request A123
//! gatelog logs --denied
//! gatelog export --format json --output-dir exports
//! gatelog status
//! ```

use anyhow::{bail, Result};
use clap::{Parser, Subcommand, ValueEnum};
use gatelog_business::LogView;
use gatelog_core::IdentityCategory;
use gatelog_reports::{CsvExporter, JsonExporter, ReportExporter};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod app;
mod commands;
mod menu;
mod terminal;

use commands::{access, identity, logs, status};
use terminal::StdTerminal;

/// Gatelog - access control decisions with an audit trail
#[derive(Parser)]
#[command(name = "gatelog")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Directory holding users.json and logs.json
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Register a person, vehicle or contractor
    Register {
        /// Identity ID (e.g., A123)
        id: String,
        /// Display name
        #[arg(long, short, default_value = "")]
        name: String,
        /// Identity category
        #[arg(long, short, default_value = "person")]
        category: CategoryArg,
    },

    /// Request access for an ID (grant/deny)
    Request {
        /// Identity ID
        id: String,
    },

    /// List registered identities
    Users,

    /// Show the audit log
    Logs {
        /// Only events for this ID
        #[arg(long, conflicts_with_all = ["denied", "flagged"])]
        id: Option<String>,
        /// Only DENY events
        #[arg(long, conflicts_with = "flagged")]
        denied: bool,
        /// Only flagged events
        #[arg(long)]
        flagged: bool,
    },

    /// Export the audit log to a timestamped file
    Export {
        /// Output format
        #[arg(long, default_value = "csv")]
        format: ExportFormat,
        /// Output directory (defaults to the configured export directory)
        #[arg(long, short)]
        output_dir: Option<PathBuf>,
        /// Only events for this ID
        #[arg(long, conflicts_with = "denied")]
        id: Option<String>,
        /// Only DENY events
        #[arg(long)]
        denied: bool,
    },

    /// Show configuration and audit totals
    Status,

    /// Interactive menu (default)
    Menu,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum CategoryArg {
    Person,
    Vehicle,
    Contractor,
    Other,
}

impl CategoryArg {
    pub fn to_core_type(&self) -> IdentityCategory {
        match self {
            CategoryArg::Person => IdentityCategory::Person,
            CategoryArg::Vehicle => IdentityCategory::Vehicle,
            CategoryArg::Contractor => IdentityCategory::Contractor,
            CategoryArg::Other => IdentityCategory::Other,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn exporter(&self) -> Box<dyn ReportExporter> {
        match self {
            ExportFormat::Csv => Box::new(CsvExporter::new()),
            ExportFormat::Json => Box::new(JsonExporter::new()),
        }
    }
}

fn log_view(id: Option<String>, denied: bool, flagged: bool) -> LogView {
    match (id, denied, flagged) {
        (Some(id), _, _) => LogView::Identity(id),
        (None, true, _) => LogView::Denied,
        (None, false, true) => LogView::Flagged,
        (None, false, false) => LogView::All,
    }
}

/// Operator-facing notices already go to stdout; stderr stays quiet by default.
const DEFAULT_LOG_FILTER: &str = "error";

fn init_logging() {
    // stdout belongs to the operator; diagnostics go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

fn main() -> Result<()> {
    init_logging();

    let cli = Cli::parse();
    let config = app::load_config(cli.config.as_deref(), cli.data_dir)?;
    let mut session = app::open_session(&config)?;
    let mut term = StdTerminal::stdio();

    match cli.command.unwrap_or(Commands::Menu) {
        Commands::Register { id, name, category } => {
            let registered =
                identity::register(&mut session, &mut term, &id, &name, category.to_core_type())?;
            if registered.is_none() {
                bail!("registration rejected");
            }
        }

        Commands::Request { id } => {
            access::request(&mut session, &mut term, &id)?;
        }

        Commands::Users => {
            identity::list_users(&session, &mut term)?;
        }

        Commands::Logs { id, denied, flagged } => {
            logs::show_logs(&session, &mut term, &log_view(id, denied, flagged))?;
        }

        Commands::Export {
            format,
            output_dir,
            id,
            denied,
        } => {
            let dir = output_dir.unwrap_or_else(|| config.export_dir.clone());
            let exporter = format.exporter();
            logs::export(
                &session,
                &mut term,
                &dir,
                exporter.as_ref(),
                &log_view(id, denied, false),
            )?;
        }

        Commands::Status => {
            status::show_status(&session, &mut term, &config)?;
        }

        Commands::Menu => {
            menu::run(&mut session, &mut term, &config.export_dir)?;
        }
    }

    Ok(())
}
