//! CLI Application logic
//!
//! Contains the command-line interface implementation.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use clausedok_ast::Clause;
use clausedok_core::inject::try_add_clause;
use clausedok_core::remove::TreeSurgeryRemoval;
use clausedok_core::template::{try_identify_placeholders, try_process_templates};
use clausedok_core::{
    codec, find_text_in_document, MemorySession, RemovalChain, RemovalOutcome, Settings,
};

/// Settings file picked up from the working directory
const DEFAULT_CONFIG: &str = "clausedok.toml";

/// Output format for listings
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// One entry per line
    #[default]
    Text,
    /// JSON for tool consumption
    Json,
}

#[derive(Parser)]
#[command(name = "clausedok")]
#[command(author, version, about = "Clause and template editing for SFDT documents", long_about = None)]
struct Cli {
    /// Settings file (defaults to ./clausedok.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the placeholder names of a document
    Placeholders {
        /// Input document
        input: PathBuf,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Find runs containing some text (case-sensitive)
    Locate {
        /// Input document
        input: PathBuf,

        /// Text to look for
        text: String,

        /// Output format (text or json)
        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Insert a clause after its placeholder, or at the end
    Add {
        /// Input document
        input: PathBuf,

        /// Clause catalog (JSON array of clauses)
        #[arg(long)]
        catalog: PathBuf,

        /// Id of the clause to insert
        #[arg(long)]
        clause: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Remove the paragraph holding a clause's identifying text
    Remove {
        /// Input document
        input: PathBuf,

        /// Clause catalog (JSON array of clauses)
        #[arg(long)]
        catalog: PathBuf,

        /// Id of the clause to remove
        #[arg(long)]
        clause: String,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace placeholders with values
    Fill {
        /// Input document
        input: PathBuf,

        /// A `name=value` pair; may be repeated
        #[arg(long = "set")]
        set: Vec<String>,

        /// JSON object of placeholder values
        #[arg(long)]
        values: Option<PathBuf>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Run the CLI application
///
/// Parses arguments, loads settings, installs logging and dispatches to the
/// command.
pub fn run_cli() -> Result<()> {
    let cli = Cli::parse();

    let settings = load_settings(cli.config.as_deref())?;
    init_logging(cli.verbose, &settings);

    match cli.command {
        Commands::Placeholders { input, format } => {
            placeholders_command(&input, format)?;
        }
        Commands::Locate {
            input,
            text,
            format,
        } => {
            locate_command(&input, &text, format)?;
        }
        Commands::Add {
            input,
            catalog,
            clause,
            output,
        } => {
            add_command(&input, &catalog, &clause, output.as_deref(), &settings)?;
        }
        Commands::Remove {
            input,
            catalog,
            clause,
            output,
        } => {
            remove_command(&input, &catalog, &clause, output.as_deref(), &settings)?;
        }
        Commands::Fill {
            input,
            set,
            values,
            output,
        } => {
            fill_command(&input, &set, values.as_deref(), output.as_deref())?;
        }
    }

    Ok(())
}

/// Install the stderr subscriber
///
/// `RUST_LOG` wins over `-v`, which wins over the settings file.
fn init_logging(verbose: u8, settings: &Settings) {
    let level = match verbose {
        0 => settings.logging.level.as_str(),
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Already installed when commands run more than once in a process
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Load settings from `path`, or from `./clausedok.toml` when it exists
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => {
            let default = PathBuf::from(DEFAULT_CONFIG);
            if !default.exists() {
                return Ok(Settings::default());
            }
            default
        }
    };

    let raw = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    Settings::from_toml_str(&raw)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Find a clause by id in a JSON catalog
pub fn load_clause(catalog: &Path, clause_id: &str) -> Result<Clause> {
    let raw = fs::read_to_string(catalog)
        .with_context(|| format!("Failed to read clause catalog: {}", catalog.display()))?;
    let clauses: Vec<Clause> = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse clause catalog: {}", catalog.display()))?;

    match clauses.into_iter().find(|c| c.id == clause_id) {
        Some(clause) => Ok(clause),
        None => bail!("Clause '{}' not found in {}", clause_id, catalog.display()),
    }
}

/// Execute the placeholders command
pub fn placeholders_command(input: &Path, format: OutputFormat) -> Result<()> {
    let content = read_input(input)?;
    let names = try_identify_placeholders(&content)
        .with_context(|| format!("Failed to read placeholders of {}", input.display()))?;

    match format {
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&names)
                .context("Failed to serialize placeholder names")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            for name in &names {
                println!("{}", name);
            }
        }
    }

    Ok(())
}

/// Execute the locate command
pub fn locate_command(input: &Path, text: &str, format: OutputFormat) -> Result<()> {
    let content = read_input(input)?;
    let doc = codec::parse(&content)
        .with_context(|| format!("Failed to parse document: {}", input.display()))?;
    let matches = find_text_in_document(&doc, text);

    match format {
        OutputFormat::Json => {
            let json =
                serde_json::to_string_pretty(&matches).context("Failed to serialize matches")?;
            println!("{}", json);
        }
        OutputFormat::Text => {
            if matches.is_empty() {
                println!("No run contains {:?}", text);
            }
            for m in &matches {
                println!("{}\t{}", m.path, m.text);
            }
        }
    }

    Ok(())
}

/// Execute the add command
pub fn add_command(
    input: &Path,
    catalog: &Path,
    clause_id: &str,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let content = read_input(input)?;
    let clause = load_clause(catalog, clause_id)?;

    let updated = try_add_clause(&content, &clause, settings.injection.match_mode)
        .with_context(|| format!("Failed to add clause '{}'", clause_id))?;
    debug!("Added clause {} to {}", clause_id, input.display());

    write_output(&updated, output)
}

/// Execute the remove command
///
/// With `removal.live_first` the document is opened in an in-memory editing
/// session and tree surgery is the fallback.
pub fn remove_command(
    input: &Path,
    catalog: &Path,
    clause_id: &str,
    output: Option<&Path>,
    settings: &Settings,
) -> Result<()> {
    let content = read_input(input)?;
    let clause = load_clause(catalog, clause_id)?;
    let removal = &settings.removal;

    let mut session = MemorySession::new();
    if removal.live_first {
        session
            .open(&content)
            .with_context(|| format!("Failed to open document: {}", input.display()))?;
    }

    let outcome = {
        let mut chain = if removal.live_first {
            RemovalChain::live_then_structural(Some(&mut session), removal.search_options())
        } else {
            let mut chain = RemovalChain::new();
            chain.push(Box::new(TreeSurgeryRemoval));
            chain
        };
        chain.remove(&content, &clause)
    };

    let updated = match outcome {
        RemovalOutcome::Removed {
            content: Some(updated),
            ..
        } => updated,
        RemovalOutcome::Removed { content: None, .. } => session
            .serialize()
            .context("Failed to serialize edited document")?,
        RemovalOutcome::NotRemoved => bail!(
            "Clause '{}' not found in {}",
            clause_id,
            input.display()
        ),
    };

    write_output(&updated, output)
}

/// Execute the fill command
///
/// `--set` pairs override values from the JSON file.
pub fn fill_command(
    input: &Path,
    set: &[String],
    values_file: Option<&Path>,
    output: Option<&Path>,
) -> Result<()> {
    let content = read_input(input)?;

    let mut values: HashMap<String, String> = match values_file {
        Some(path) => {
            let raw = fs::read_to_string(path)
                .with_context(|| format!("Failed to read values file: {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("Failed to parse values file: {}", path.display()))?
        }
        None => HashMap::new(),
    };
    for pair in set {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("Expected name=value, got '{}'", pair);
        };
        values.insert(name.to_string(), value.to_string());
    }

    let updated = try_process_templates(&content, &values)
        .with_context(|| format!("Failed to fill placeholders of {}", input.display()))?;
    write_output(&updated, output)
}

fn read_input(input: &Path) -> Result<String> {
    if !input.exists() {
        bail!("Input file not found: {}", input.display());
    }
    fs::read_to_string(input)
        .with_context(|| format!("Failed to read input file: {}", input.display()))
}

fn write_output(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            fs::write(path, content)
                .with_context(|| format!("Failed to write output file: {}", path.display()))?;
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", content),
    }
    Ok(())
}
