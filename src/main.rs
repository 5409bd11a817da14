//! Abbrev - command line front end for the abbreviation registry
//!
//! Annotates descriptions and reads/writes a local registry snapshot.

use std::io::Read;
use std::path::PathBuf;

use abbrev_registry::app::{Detail, RegistryApp};
use abbrev_registry::core::config::AppConfig;
use abbrev_registry::core::entry::EntryDraft;
use abbrev_registry::registry::{InMemoryRegistry, WalletConnection};
use abbrev_registry::render::{self, Format, RenderOptions};
use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "abbrev", about, long_about = None)]
struct Cli {
    /// Load configuration from a specific file
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    config_file: Option<PathBuf>,

    /// Registry snapshot to read and write
    #[arg(short = 'r', long = "registry", value_name = "FILE")]
    registry_file: Option<PathBuf>,

    /// Increase logging verbosity (repeat for more detail)
    #[arg(short = 'v', action = ArgAction::Count)]
    verbosity: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Annotate text from a file or stdin
    Annotate {
        /// Input file; stdin when omitted
        file: Option<PathBuf>,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// List registered abbreviations
    List,
    /// Show one entry
    Show {
        abbreviation: String,
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Register a new entry
    Add {
        abbreviation: String,
        title: String,
        description: String,
        /// Signing wallet address
        #[arg(long)]
        address: String,
        /// Chain the wallet is on; defaults to the configured network
        #[arg(long)]
        chain_id: Option<String>,
    },
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum OutputFormat {
    Text,
    Html,
    Json,
}

impl From<OutputFormat> for Format {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Text => Format::Text,
            OutputFormat::Html => Format::Html,
            OutputFormat::Json => Format::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbosity {
        0 => LevelFilter::INFO,
        1 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    };

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(level)
        .init();

    let mut config = match &cli.config_file {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load().unwrap_or_else(|e| {
            tracing::warn!("Falling back to default config: {}", e);
            AppConfig::default()
        }),
    };
    if let Some(path) = cli.registry_file {
        config.registry.snapshot_path = Some(path);
    }

    match cli.command {
        Command::Annotate { file, format } => {
            let text = read_input(file.as_ref())?;
            let segments = abbrev_registry::annotate(&text);
            println!("{}", render::render(&segments, format.into(), &config.render)?);
        }
        Command::List => {
            let app = open_app(config)?;
            let index = app.index()?;
            if index.is_empty() {
                println!("No abbreviations found.");
            }
            for entry in index {
                if entry.title.is_empty() {
                    println!("{}", entry.abbreviation);
                } else {
                    println!("{}\t{}", entry.abbreviation, entry.title);
                }
            }
        }
        Command::Show {
            abbreviation,
            format,
        } => {
            let app = open_app(config)?;
            let detail = app.detail(&abbreviation)?;
            print_detail(&detail, format, &app.config.render)?;
        }
        Command::Add {
            abbreviation,
            title,
            description,
            address,
            chain_id,
        } => {
            let snapshot = config.registry.snapshot_path();
            let chain_id = chain_id.unwrap_or_else(|| config.network.chain_id.clone());
            let wallet = WalletConnection::new(address, chain_id);
            let draft = EntryDraft::new(&abbreviation, &title, description);

            let mut app = open_app(config)?;
            let receipt = app.add_entry(Some(&wallet), &draft)?;
            app.into_registry()
                .save(&snapshot)
                .with_context(|| format!("Failed to save registry: {}", snapshot.display()))?;

            println!("Added {} ({})", draft.abbreviation, receipt.hash);
        }
    }

    Ok(())
}

fn open_app(config: AppConfig) -> Result<RegistryApp<InMemoryRegistry>> {
    let path = config.registry.snapshot_path();
    let registry = InMemoryRegistry::load(&path)
        .with_context(|| format!("Failed to load registry: {}", path.display()))?;
    Ok(RegistryApp::new(config, registry))
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read file: {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn print_detail(detail: &Detail, format: OutputFormat, options: &RenderOptions) -> Result<()> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(detail)?);
        return Ok(());
    }

    match detail {
        Detail::NotFound { abbreviation } => {
            println!(
                "The abbreviation \"{}\" does not exist in the registry.",
                abbreviation
            );
        }
        Detail::Found {
            abbreviation,
            title,
            description,
            references,
        } => {
            let body = render::render(description, format.into(), options)?;
            match format {
                OutputFormat::Html => {
                    println!("<h1>{}</h1>", render::escape_html(abbreviation));
                    println!("<h2>{}</h2>", render::escape_html(title));
                    println!("<p>{}</p>", body);
                    if !references.is_empty() {
                        let links: Vec<String> = references
                            .iter()
                            .map(|target| {
                                format!(
                                    r#"<a href="{}">{}</a>"#,
                                    render::escape_html(&options.internal_href(target)),
                                    render::escape_html(target),
                                )
                            })
                            .collect();
                        println!("<p>See also: {}</p>", links.join(", "));
                    }
                }
                _ => {
                    println!("{} - {}", abbreviation, title);
                    println!();
                    println!("{}", body);
                    if !references.is_empty() {
                        println!();
                        println!("See also: {}", references.join(", "));
                    }
                }
            }
        }
    }
    Ok(())
}
