mod error;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use mtc_core::{Category, Representation};
use mtc_json::{CodecOptions, Decoded, field_name, parse_field_name};
use mtc_streams::catalog;
use tracing_subscriber::EnvFilter;

use crate::error::{CliError, CliResult};

#[derive(Parser)]
#[command(name = "mtc-cli")]
#[command(about = "MTConnect streams JSON tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode and validate a streams document
    Validate {
        /// Path to the JSON document
        path: PathBuf,
        /// Codec options YAML file
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Summarize devices, components and observations of a document
    Summary {
        /// Path to the JSON document
        path: PathBuf,
    },
    /// Decode a document and write it back in canonical form
    Normalize {
        /// Path to the JSON document
        path: PathBuf,
        /// Output file path (optional, defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Codec options YAML file
        #[arg(long)]
        config: Option<PathBuf>,
        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,
    },
    /// Show the JSON field name for a data item type
    Field {
        /// Data item type, e.g. PATH_FEEDRATE
        type_id: String,
        /// Representation (VALUE, DATA_SET, TABLE, TIME_SERIES); all when omitted
        #[arg(short, long)]
        representation: Option<Representation>,
    },
    /// Split a JSON field name into type and representation
    ParseField {
        /// Field name, e.g. PathFeedrateTimeSeries
        field: String,
    },
    /// Search the data item type catalog
    Types {
        /// Case-insensitive substring of the type or element name
        query: Option<String>,
    },
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { path, config } => cmd_validate(&path, config.as_deref()),
        Commands::Summary { path } => cmd_summary(&path),
        Commands::Normalize {
            path,
            output,
            config,
            pretty,
        } => cmd_normalize(&path, output.as_deref(), config.as_deref(), pretty),
        Commands::Field {
            type_id,
            representation,
        } => cmd_field(&type_id, representation),
        Commands::ParseField { field } => cmd_parse_field(&field),
        Commands::Types { query } => cmd_types(query.as_deref()),
    }
}

fn load_options(config: Option<&Path>) -> CliResult<CodecOptions> {
    match config {
        Some(path) => CodecOptions::load_yaml(path).map_err(|source| CliError::Load {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(CodecOptions::default()),
    }
}

fn load_document(path: &Path, options: &CodecOptions) -> CliResult<Decoded> {
    mtc_json::load_json(path, options).map_err(|source| CliError::Load {
        path: path.to_path_buf(),
        source,
    })
}

fn cmd_validate(path: &Path, config: Option<&Path>) -> CliResult<()> {
    println!("Validating document: {}", path.display());
    let options = CodecOptions {
        validate: true,
        ..load_options(config)?
    };
    let decoded = load_document(path, &options)?;

    if decoded.report.is_clean() {
        println!(
            "✓ Document is valid ({} observations)",
            decoded.streams.observation_count()
        );
        return Ok(());
    }

    println!("Dropped observations:");
    for issue in &decoded.report.issues {
        println!("  {}", issue);
    }
    Err(CliError::Dropped {
        count: decoded.report.len(),
    })
}

fn cmd_summary(path: &Path) -> CliResult<()> {
    let options = CodecOptions {
        validate: false,
        ..CodecOptions::default()
    };
    let decoded = load_document(path, &options)?;
    let streams = &decoded.streams;

    if let Some(header) = &streams.header {
        println!(
            "Agent {} ({}), sequences {}..{}",
            header.sender, header.version, header.first_sequence, header.last_sequence
        );
    }

    for device in &streams.devices {
        println!("Device {} ({})", device.name, device.uuid);
        for component in &device.components {
            println!(
                "  {} {} - {} observations",
                component.component,
                component.component_id,
                component.observations.len()
            );
        }
    }

    let mut counts: BTreeMap<(Category, Representation), (usize, usize)> = BTreeMap::new();
    for observation in streams.observations() {
        let entry = counts
            .entry((observation.category, observation.representation()))
            .or_default();
        entry.0 += 1;
        if observation.is_unavailable() {
            entry.1 += 1;
        }
    }

    println!("\nObservations:");
    for ((category, representation), (total, unavailable)) in counts {
        println!(
            "  {:<10} {:<12} {:>6} ({} unavailable)",
            category.as_str(),
            representation.as_str(),
            total,
            unavailable
        );
    }

    if !decoded.report.is_clean() {
        println!("\nDropped: {}", decoded.report.len());
    }
    Ok(())
}

fn cmd_normalize(
    path: &Path,
    output: Option<&Path>,
    config: Option<&Path>,
    pretty: bool,
) -> CliResult<()> {
    let mut options = load_options(config)?;
    options.pretty |= pretty;

    let decoded = load_document(path, &options)?;
    for issue in &decoded.report.issues {
        eprintln!("dropped: {}", issue);
    }

    if let Some(out) = output {
        mtc_json::save_json(&decoded.streams, out, &options).map_err(|source| CliError::Write {
            path: out.to_path_buf(),
            source,
        })?;
        println!(
            "✓ Wrote {} observations to {}",
            decoded.streams.observation_count(),
            out.display()
        );
    } else {
        println!("{}", mtc_json::to_string(&decoded.streams, &options)?);
    }
    Ok(())
}

fn cmd_field(type_id: &str, representation: Option<Representation>) -> CliResult<()> {
    let type_id = type_id.trim();
    if type_id.is_empty() {
        return Err(CliError::InvalidInput("type id is empty".to_string()));
    }

    match catalog::lookup(type_id) {
        Some(entry) => println!("{} ({})", entry.id, entry.category),
        None => println!("{} (not in catalog)", type_id),
    }

    let representations = match representation {
        Some(r) => vec![r],
        None => Representation::ALL.to_vec(),
    };
    for r in representations {
        println!("  {:<12} {}", r.as_str(), field_name(type_id, r));
    }
    Ok(())
}

fn cmd_parse_field(field: &str) -> CliResult<()> {
    let (type_id, representation) = parse_field_name(field);
    let known = if catalog::lookup(&type_id).is_some() {
        ""
    } else {
        " (not in catalog)"
    };
    println!("{} {}{}", type_id, representation, known);
    Ok(())
}

fn cmd_types(query: Option<&str>) -> CliResult<()> {
    let types = match query {
        Some(q) => catalog::filter_data_item_types(q),
        None => catalog::data_item_types().to_vec(),
    };

    if types.is_empty() {
        println!("No matching data item types");
    } else {
        for entry in types {
            println!(
                "  {:<36} {:<10} {}",
                entry.id,
                entry.category.as_str(),
                entry.element
            );
        }
    }
    Ok(())
}
