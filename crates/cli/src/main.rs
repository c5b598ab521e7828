mod commands;
mod settings;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "graphql-recon")]
#[command(
    about = "Reconstruct GraphQL schemas when introspection is disabled",
    long_about = None
)]
#[command(version)]
struct Cli {
    /// Path to config file
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Inspect and edit schema files in introspection JSON format
    Schema {
        #[command(subcommand)]
        command: commands::schema::SchemaCommands,
    },

    /// Send a probe document to the target endpoint and print the answer
    ///
    /// The document is either given literally with --document, or
    /// synthesized from a schema file so that it reaches TYPE.
    Probe {
        /// Type to reach with a synthesized document
        #[arg(value_name = "TYPE", required_unless_present = "document")]
        type_name: Option<String>,

        /// Schema file used to synthesize the document
        #[arg(short, long, value_name = "FILE", requires = "type_name")]
        schema: Option<PathBuf>,

        /// Literal GraphQL document to send
        #[arg(short, long, conflicts_with = "type_name")]
        document: Option<String>,

        #[command(flatten)]
        endpoint: settings::EndpointArgs,
    },

    /// Download a schema from an endpoint that still allows introspection
    Fetch {
        /// Output file path (writes to stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,

        #[command(flatten)]
        endpoint: settings::EndpointArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_tracing();

    if cli.no_color || std::env::var_os("NO_COLOR").is_some() {
        colored::control::set_override(false);
    }

    match cli.command {
        Commands::Schema { command } => commands::schema::run(command),
        Commands::Probe {
            type_name,
            schema,
            document,
            endpoint,
        } => {
            let config = endpoint.resolve(cli.config)?;
            commands::probe::run_probe(&config, type_name, schema, document).await
        }
        Commands::Fetch { output, endpoint } => {
            let config = endpoint.resolve(cli.config)?;
            commands::probe::run_fetch(&config, output).await
        }
    }
}

/// Initialize tracing, filtered by `RUST_LOG` and written to stderr
fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("off")),
        )
        .with_writer(std::io::stderr)
        .init();
}
