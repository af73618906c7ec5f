//! opsconsole CLI - operator console for the records backend

use clap::{Parser, Subcommand};
use opsconsole::config::{base_url_from_env, load_config, ConsoleConfig};
use opsconsole::shell::Shell;
use opsconsole::ui::{self, AssumeYes, Confirm, TermConfirm};
use opsconsole::ApiClient;
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "opsconsole")]
#[command(version)]
#[command(about = "Operator console for employees, departments, locations and tiers")]
#[command(long_about = r#"
opsconsole browses and edits the records of a REST backend and runs its
predefined reports.

Example usage:
  opsconsole                                  # interactive console
  opsconsole list employee --page 2
  opsconsole create department code=ENG name=Engineering
  opsconsole query q2 --json
  opsconsole serve --port 8080 --seed demos/seed.json
"#)]
struct Cli {
    /// Backend base URL (overrides OPSCONSOLE_API_BASE_URL and the config file)
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Skip delete confirmations
    #[arg(short, long, global = true)]
    yes: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Open the interactive console (default)
    Console,

    /// List one page of a resource
    List {
        /// employee, department, location or tier
        resource: String,

        /// Page to show (1-based)
        #[arg(short, long, default_value = "1")]
        page: usize,

        /// Print the page as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single record
    Get {
        resource: String,
        id: String,

        #[arg(long)]
        json: bool,
    },

    /// Create a record from key=value pairs
    Create {
        resource: String,

        /// Field assignments, e.g. code=ENG
        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Update a record from key=value pairs
    Update {
        resource: String,
        id: String,

        #[arg(required = true)]
        fields: Vec<String>,
    },

    /// Delete a record
    Delete { resource: String, id: String },

    /// Run a predefined query (q1, q2, q3)
    Query {
        name: String,

        #[arg(long)]
        json: bool,
    },

    /// Run the in-memory mock backend
    Serve {
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,

        /// JSON file with sample data to import at startup
        #[arg(short, long)]
        seed: Option<PathBuf>,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = run().await {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let config = load_config(cli.config.as_deref())?.unwrap_or_default();
    let confirm: Box<dyn Confirm> = if cli.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TermConfirm::new())
    };

    let base_url = cli.base_url.as_deref();
    match cli.command.unwrap_or(Commands::Console) {
        Commands::Console => {
            let mut shell = Shell::open(connect(&config, base_url)?, confirm).await;
            shell.run().await?;
        }
        Commands::List { resource, page, json } => {
            commands::list(connect(&config, base_url)?, &resource, page, json).await?;
        }
        Commands::Get { resource, id, json } => {
            commands::get(connect(&config, base_url)?, &resource, id, json).await?;
        }
        Commands::Create { resource, fields } => {
            commands::create(connect(&config, base_url)?, &resource, &fields).await?;
        }
        Commands::Update { resource, id, fields } => {
            commands::update(connect(&config, base_url)?, &resource, id, &fields).await?;
        }
        Commands::Delete { resource, id } => {
            commands::delete(connect(&config, base_url)?, &resource, id, confirm.as_ref()).await?;
        }
        Commands::Query { name, json } => {
            commands::run_query(connect(&config, base_url)?, &name, json).await?;
        }
        Commands::Serve { port, seed } => {
            let port = config.server_port(port);
            let seed = config.seed_path(seed.as_deref());
            opsconsole::server::start_server(port, seed.as_deref()).await?;
        }
    }

    Ok(())
}

fn connect(config: &ConsoleConfig, flag: Option<&str>) -> anyhow::Result<Arc<ApiClient>> {
    let base_url = config.resolve_base_url(flag, base_url_from_env().as_deref());
    let client = ApiClient::new(&base_url)?;
    tracing::debug!("using backend {}", client.base_url());
    Ok(Arc::new(client))
}
