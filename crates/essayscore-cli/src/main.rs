//! essayscore CLI: score essays from the command line.

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};

use essayscore_core::request::SubmitError;

mod commands;

#[derive(Parser)]
#[command(name = "essayscore", version, about = "Rule-based essay scorer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Where the essay text comes from. Stdin is read when neither flag is set.
#[derive(Args)]
struct EssayInput {
    /// Essay text
    #[arg(long, conflicts_with = "file")]
    text: Option<String>,

    /// Read the essay from a file
    #[arg(long)]
    file: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Score an essay
    Score {
        #[command(flatten)]
        input: EssayInput,

        /// JSON request body, e.g. {"essay": "..."}
        #[arg(long, conflicts_with_all = ["text", "file"])]
        request: Option<PathBuf>,

        /// Output format
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Look an essay up in the reference tables without scoring it
    Lookup {
        #[command(flatten)]
        input: EssayInput,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show the status of the reference tables
    Dataset {
        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Create a starter config
    Init,
}

fn init_tracing() {
    let mut filter = tracing_subscriber::EnvFilter::from_default_env();
    for directive in [
        "essayscore_core=info",
        "essayscore_providers=info",
        "essayscore_cli=info",
    ] {
        if let Ok(directive) = directive.parse() {
            filter = filter.add_directive(directive);
        }
    }
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Score {
            input,
            request,
            format,
            config,
        } => commands::score::execute(input, request, format, config).await,
        Commands::Lookup { input, config } => commands::lookup::execute(input, config),
        Commands::Dataset { config } => commands::dataset::execute(config),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        let code = match e.downcast_ref::<SubmitError>() {
            Some(err) if err.is_client_error() => 2,
            _ => 1,
        };
        process::exit(code);
    }
}
