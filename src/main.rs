//! payload-embed - Build-time generator that embeds a text payload into a C++ header

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use payload_embed::config::Config;
use payload_embed::embed::Embedder;
use payload_embed::types::EmbedReport;

#[derive(Parser)]
#[command(name = "payload-embed")]
#[command(about = "Embed a text payload into a C++ header as chunked raw string literals")]
#[command(version)]
struct Cli {
    /// TOML file with embed settings
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the header from the asset
    Embed {
        /// Text asset to embed
        asset: PathBuf,

        /// Header to create or overwrite
        output: PathBuf,

        /// Maximum characters per literal
        #[arg(short, long)]
        max_chunk_size: Option<usize>,

        #[command(flatten)]
        overrides: Overrides,

        /// Namespace for the accessor, empty string for none
        #[arg(long)]
        namespace: Option<String>,

        /// Accessor function name
        #[arg(long)]
        function: Option<String>,

        /// Include guard macro
        #[arg(long)]
        guard: Option<String>,

        /// Write the header without a leading BOM
        #[arg(long)]
        no_output_bom: bool,

        /// Do not write, fail if the header is out of date
        #[arg(long)]
        check: bool,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Check that an existing header reconstructs the asset
    Verify {
        /// Text asset the header was generated from
        asset: PathBuf,

        /// Generated header
        output: PathBuf,

        #[command(flatten)]
        overrides: Overrides,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Write the default settings to a TOML file
    InitConfig {
        /// Destination file
        #[arg(default_value = "payload-embed.toml")]
        path: PathBuf,
    },
}

/// Settings shared by `embed` and `verify`
#[derive(clap::Args)]
struct Overrides {
    /// Raw string delimiter
    #[arg(short, long)]
    delimiter: Option<String>,

    /// Keep a leading BOM of the asset as payload
    #[arg(long)]
    keep_input_bom: bool,
}

impl Overrides {
    fn apply(&self, config: &mut Config) {
        if let Some(delimiter) = &self.delimiter {
            config.delimiter = delimiter.clone();
        }
        if self.keep_input_bom {
            config.strip_input_bom = false;
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Load environment
    let _ = dotenvy::dotenv();

    // Initialize logging; stdout is reserved for results
    let log_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("payload_embed={}", log_level).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("[ERROR] {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };

    match cli.command {
        Commands::Embed {
            asset,
            output,
            max_chunk_size,
            overrides,
            namespace,
            function,
            guard,
            no_output_bom,
            check,
            json,
        } => {
            overrides.apply(&mut config);
            if let Some(size) = max_chunk_size {
                config.max_chunk_size = size;
            }
            if let Some(ns) = namespace {
                config.namespace = ns;
            }
            if let Some(name) = function {
                config.function_name = name;
            }
            if guard.is_some() {
                config.include_guard = guard;
            }
            if no_output_bom {
                config.output_bom = false;
            }

            let embedder = Embedder::new(config);

            if check {
                tracing::info!("Checking {:?} against {:?}", output, asset);
                let report = embedder.check(&asset, &output)?;
                print_report(&report, json, "[OK] Header is up to date:")?;
            } else {
                tracing::info!("Embedding {:?} into {:?}", asset, output);
                let report = embedder.embed(&asset, &output)?;
                print_report(&report, json, "[OK] Payload embedded to:")?;
            }
        }

        Commands::Verify {
            asset,
            output,
            overrides,
            json,
        } => {
            overrides.apply(&mut config);
            let report = Embedder::new(config).verify(&asset, &output)?;
            print_report(&report, json, "[OK] Header reconstructs asset:")?;
        }

        Commands::InitConfig { path } => {
            if path.exists() {
                anyhow::bail!("Config file already exists: {}", path.display());
            }
            config.save(&path)?;
            println!("[OK] Config written to: {}", path.display());
        }
    }

    Ok(())
}

fn print_report(report: &EmbedReport, json: bool, headline: &str) -> anyhow::Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{} {}", headline, report.output_path.display());
    println!("[INFO] Payload size: {} characters", report.payload_chars);
    println!("[INFO] Split into {} chunks", report.chunk_count);
    Ok(())
}
