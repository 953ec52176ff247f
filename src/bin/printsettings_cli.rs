//! PrintSettings CLI - Bridge interface for hosts
//!
//! Commands: catalog, evaluate, ticket
//! Outputs JSON to stdout, logs to stderr
//! Returns non-zero on bad input

use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use printsettings_core::{
    CapabilitySet, Destination, DestinationType, DocumentProperties, EngineConfig, EngineError,
    PrintPreviewModel, SettingName, SettingsAvailabilityEngine, StickySettings,
};

#[derive(Parser)]
#[command(name = "printsettings-cli")]
#[command(about = "PrintSettings CLI - derive print setting availability")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to an engine config (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// List the settings catalog
    Catalog,

    /// Print the settings table for a destination and document
    Evaluate(Inputs),

    /// Print the effective print ticket and its fingerprint
    Ticket(Inputs),
}

#[derive(Args)]
struct Inputs {
    /// Capability document (JSON file)
    #[arg(long)]
    capabilities: Option<PathBuf>,

    /// Document properties (JSON payload)
    #[arg(short, long, default_value = "{}")]
    document: String,

    /// Destination id
    #[arg(long, default_value = "local-printer")]
    destination_id: String,

    /// Destination type
    #[arg(long, value_enum, default_value_t = DestinationKind::Local)]
    destination_type: DestinationKind,

    /// Sticky settings to re-apply (JSON file)
    #[arg(long)]
    sticky: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum DestinationKind {
    Local,
    Cloud,
    SaveAsPdf,
    Extension,
}

impl From<DestinationKind> for DestinationType {
    fn from(kind: DestinationKind) -> Self {
        match kind {
            DestinationKind::Local => DestinationType::Local,
            DestinationKind::Cloud => DestinationType::Cloud,
            DestinationKind::SaveAsPdf => DestinationType::SaveAsPdf,
            DestinationKind::Extension => DestinationType::Extension,
        }
    }
}

fn setup_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .init();
}

/// Directives used when `RUST_LOG` is unset. Covers the library and this
/// binary's own target.
fn default_filter(verbose: bool) -> &'static str {
    if verbose {
        "printsettings_core=debug,printsettings_cli=debug,info"
    } else {
        "printsettings_core=info,printsettings_cli=info,warn"
    }
}

fn build_model(config: EngineConfig, inputs: &Inputs) -> Result<PrintPreviewModel, EngineError> {
    let document: DocumentProperties = serde_json::from_str(&inputs.document)?;
    let mut destination = Destination::new(&inputs.destination_id, inputs.destination_type.into());
    if let Some(path) = &inputs.capabilities {
        destination.capabilities = Some(CapabilitySet::from_json(&fs::read_to_string(path)?)?);
    }

    let mut model = PrintPreviewModel::new(SettingsAvailabilityEngine::new(config), document);
    if destination.is_save_as_pdf() && destination.capabilities.is_none() {
        model.select_save_as_pdf();
    } else {
        model.set_destination(destination);
    }

    if let Some(path) = &inputs.sticky {
        let sticky = StickySettings::from_json(&fs::read_to_string(path)?)?;
        let applied = model.apply_sticky_settings(&sticky);
        tracing::info!(count = applied.len(), "applied sticky settings");
    }
    Ok(model)
}

fn print_json(value: &impl serde::Serialize) -> ExitCode {
    match serde_json::to_string_pretty(value) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            println!("{}", serde_json::json!({"success": false, "error": e.to_string()}));
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_tracing(cli.verbose);

    let config = match &cli.config {
        Some(path) => match EngineConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!(r#"{{"error": "Failed to load config: {}"}}"#, e);
                return ExitCode::FAILURE;
            }
        },
        None => EngineConfig::default(),
    };

    match cli.command {
        Commands::Catalog => {
            let names: Vec<_> = SettingName::ALL.iter().map(|n| n.as_str()).collect();
            print_json(&names)
        }

        Commands::Evaluate(inputs) => match build_model(config, &inputs) {
            Ok(model) => print_json(model.settings()),
            Err(e) => {
                println!("{}", serde_json::json!({"success": false, "error": e.to_string()}));
                ExitCode::from(2)
            }
        },

        Commands::Ticket(inputs) => {
            let result = build_model(config, &inputs).and_then(|model| {
                let fingerprint = model.ticket_fingerprint()?;
                Ok(serde_json::json!({
                    "ticket": model.print_ticket(),
                    "fingerprint": fingerprint,
                }))
            });
            match result {
                Ok(output) => print_json(&output),
                Err(e) => {
                    println!("{}", serde_json::json!({"success": false, "error": e.to_string()}));
                    ExitCode::from(2)
                }
            }
        }
    }
}
