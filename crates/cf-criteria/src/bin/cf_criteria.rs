//! Inspect the CF criteria tables.
//!
//! Usage:
//!   cf-criteria dump --format yaml
//!   cf-criteria axes nav_lat
//!   cf-criteria attr units degrees_north
//!   cf-criteria --overlay ./criteria.yaml roles

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, Level};
use tracing_subscriber::FmtSubscriber;

use cf_criteria::{CriteriaTable, Overlay};

#[derive(Parser, Debug)]
#[command(name = "cf-criteria")]
#[command(about = "Inspect CF axis and role criteria tables")]
struct Args {
    /// YAML overlay extending the built-in tables (default: $CF_CRITERIA_OVERLAY)
    #[arg(short, long)]
    overlay: Option<String>,

    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the full table
    Dump {
        #[arg(short, long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// List axis keys whose name pattern matches a variable or dimension name
    Axes { name: String },
    /// List axis keys whose criteria accept an attribute value
    Attr { attribute: String, value: String },
    /// List cf_role criteria
    Roles,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Format {
    Json,
    Yaml,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let overlay = match &args.overlay {
        Some(path) => Some(
            Overlay::from_path(path).with_context(|| format!("Failed to load overlay {}", path))?,
        ),
        None => Overlay::from_env().context("Failed to load overlay from environment")?,
    };

    let table = match overlay {
        Some(overlay) if !overlay.is_empty() => CriteriaTable::with_overlay(&overlay)?,
        _ => CriteriaTable::builtin(),
    };

    match args.command {
        Command::Dump { format } => {
            let out = match format {
                Format::Json => serde_json::to_string_pretty(&table)?,
                Format::Yaml => serde_yaml::to_string(&table)?,
            };
            println!("{}", out);
        }
        Command::Axes { name } => {
            let name = name.to_lowercase();
            let keys = table.matching_pattern_keys(&name);
            debug!(name = %name, matches = keys.len(), "Matched name patterns");
            for key in keys {
                println!("{}", key);
            }
        }
        Command::Attr { attribute, value } => {
            for key in table.accepting_keys(&attribute, &value) {
                println!("{}", key);
            }
        }
        Command::Roles => {
            for (role, criterion) in table.cf_roles() {
                println!("{}\t{}={}", role, criterion.attribute, criterion.value);
            }
        }
    }

    Ok(())
}
