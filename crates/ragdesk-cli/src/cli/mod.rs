//! CLI entry and dispatch.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use ragdesk_core::client::{Credentials, Extraction};
use ragdesk_core::config;
use ragdesk_core::logging;
use ragdesk_core::store::Role;

mod commands;

#[derive(Parser)]
#[command(name = "ragdesk")]
#[command(version)]
#[command(about = "Upload documents, ask questions, and read formatted answers")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[command(flatten)]
    auth: AuthArgs,
}

/// Credentials for commands that talk to the backend.
#[derive(clap::Args, Debug, Clone, Default)]
struct AuthArgs {
    /// Account username
    #[arg(long, global = true, env = "RAGDESK_USERNAME")]
    username: Option<String>,

    /// Account password
    #[arg(long, global = true, env = "RAGDESK_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

impl AuthArgs {
    fn credentials(&self) -> Result<Credentials> {
        match (&self.username, &self.password) {
            (Some(username), Some(password)) if !username.trim().is_empty() => {
                Ok(Credentials::new(username.trim(), password.as_str()))
            }
            _ => anyhow::bail!(
                "Missing credentials: pass --username and --password or set RAGDESK_USERNAME and RAGDESK_PASSWORD"
            ),
        }
    }
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Check that the backend is reachable
    Health,
    /// Verify credentials against the backend
    Login,
    /// Create a new account
    Signup,
    /// Upload a PDF document for indexing
    Upload {
        /// Path to the PDF file
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Who the document is visible to (admin, doctor, nurse, patient)
        #[arg(long, default_value = "admin")]
        visibility: Role,
    },
    /// Manage the local list of uploaded documents
    Files {
        #[command(subcommand)]
        command: FileCommands,
    },
    /// Ask a single question about the selected document
    Ask {
        /// The question to send
        #[arg(value_name = "QUESTION")]
        question: String,
    },
    /// Run an insight extraction on the selected document
    Extract {
        #[command(subcommand)]
        kind: ExtractCommands,
    },
    /// Start an interactive chat about the selected document
    Chat,
    /// Format a reply read from stdin
    Format {
        /// Print the blocks as JSON instead of laying them out
        #[arg(long)]
        json: bool,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum FileCommands {
    /// List uploaded documents (newest first)
    List,
    /// Select the document questions refer to
    Select {
        /// The ID of the document to select
        #[arg(value_name = "FILE_ID")]
        id: String,
    },
    /// Forget all uploaded documents and the selection
    Clear,
}

#[derive(clap::Subcommand)]
enum ExtractCommands {
    /// Summarize the document
    Summary,
    /// Extract the important information
    Important,
}

impl From<&ExtractCommands> for Extraction {
    fn from(kind: &ExtractCommands) -> Self {
        match kind {
            ExtractCommands::Summary => Extraction::Summary,
            ExtractCommands::Important => Extraction::ImportantInformation,
        }
    }
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let config = config::Config::load().context("load config")?;
    logging::init(config.effective_log_level());

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli, &config).await })
}

async fn dispatch(cli: Cli, config: &config::Config) -> Result<()> {
    let Cli { command, auth } = cli;

    match command {
        Commands::Health => commands::health::run(config).await,
        Commands::Login => commands::auth::login(config, &auth.credentials()?).await,
        Commands::Signup => commands::auth::signup(config, &auth.credentials()?).await,
        Commands::Upload { path, visibility } => {
            commands::files::upload(config, &auth.credentials()?, &path, visibility).await
        }
        Commands::Files { command } => match command {
            FileCommands::List => commands::files::list(),
            FileCommands::Select { id } => commands::files::select(&id),
            FileCommands::Clear => commands::files::clear(),
        },
        Commands::Ask { question } => {
            commands::chat::ask(config, &auth.credentials()?, &question).await
        }
        Commands::Extract { kind } => {
            commands::chat::extract(config, &auth.credentials()?, (&kind).into()).await
        }
        Commands::Chat => commands::chat::run(config, &auth.credentials()?).await,
        Commands::Format { json } => commands::format::run(json),
        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },
    }
}
