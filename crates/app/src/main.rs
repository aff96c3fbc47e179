//! Bodycodec - command-line body transcoder.
//!
//! Converts request and response bodies between text, JSON, XML, form and
//! Base64 representations.

use std::path::PathBuf;

use bodycodec_domain::BodyType;
use bodycodec_infrastructure::SettingsRepository;
use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

use commands::CliError;

/// Environment variable holding the log filter.
const LOG_ENV: &str = "BODYCODEC_LOG";

#[derive(Parser)]
#[command(name = "bodycodec", version, about = "Convert bodies between representations")]
struct Cli {
    /// Settings file to use instead of the default location.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert a body to another representation.
    Convert {
        /// Target representation.
        #[arg(long)]
        to: BodyType,
        /// Representation of the input data.
        #[arg(long, default_value = "Text")]
        from: BodyType,
        /// Read and print `{"type", "data"}` documents instead of bare data.
        #[arg(long)]
        envelope: bool,
        /// Input file; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Show how untyped text would be interpreted.
    Classify {
        /// Input file; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Show the payload a body would be sent as.
    Encode {
        /// Representation of the input data.
        #[arg(long, default_value = "Text")]
        from: BodyType,
        /// Read a `{"type", "data"}` document instead of bare data.
        #[arg(long)]
        envelope: bool,
        /// Input file; stdin when omitted.
        file: Option<PathBuf>,
    },
    /// Build a body from received bytes.
    Decode {
        /// `Content-Type` header the bytes arrived with.
        #[arg(long)]
        content_type: Option<String>,
        /// Input file; stdin when omitted.
        file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(err) = run(Cli::parse()).await {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let repository = cli
        .config
        .map_or_else(SettingsRepository::new, SettingsRepository::at);
    let settings = repository.load().await?;
    let indent = settings.json_indent;

    let output = match cli.command {
        Command::Convert {
            to,
            from,
            envelope,
            file,
        } => {
            let input = commands::read_input(file.as_deref()).await?;
            commands::convert(&input, from, to, envelope, settings)?
        }
        Command::Classify { file } => {
            let input = commands::read_input(file.as_deref()).await?;
            commands::classify(&input, indent)?
        }
        Command::Encode {
            from,
            envelope,
            file,
        } => {
            let input = commands::read_input(file.as_deref()).await?;
            commands::encode(&input, from, envelope)?
        }
        Command::Decode { content_type, file } => {
            let input = commands::read_input_bytes(file.as_deref()).await?;
            commands::decode(&input, content_type.as_deref(), indent)?
        }
    };

    println!("{output}");
    Ok(())
}
