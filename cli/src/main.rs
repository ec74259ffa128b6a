//! Native harness for the text explainer.
//!
//! Drives the same [`Explainer`] the extension's worker uses, with the
//! credential in a local JSON file instead of `chrome.storage.sync`.
//!
//! ```text
//! explainer-cli key set <KEY>
//! explainer-cli key show
//! explainer-cli explain "quantum entanglement"
//! explainer-cli test
//! ```

#[cfg(test)]
#[path = "main_test.rs"]
mod main_test;

mod store;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use common::{Credential, ExplanationRequest, ExplanationResult, KeyStore, StorageError};
use text_explainer::config::ConfigError;
use text_explainer::llm::{GeminiClient, LlmError};
use text_explainer::{Explainer, ExplainerConfig};
use tracing_subscriber::EnvFilter;

use crate::store::FileKeyStore;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no config directory on this platform; pass --key-file or set EXPLAINER_KEY_FILE")]
    NoKeyFile,
    #[error("API key must not be blank")]
    BlankKey,
    #[error("no API key stored; run `key set` first")]
    NoKeyStored,
    #[error("{0}")]
    Storage(#[from] StorageError),
    #[error("{0}")]
    Config(#[from] ConfigError),
    #[error("{0}")]
    Client(#[from] LlmError),
    #[error("{0}")]
    Explain(String),
}

#[derive(Parser, Debug)]
#[command(name = "explainer-cli", about = "Explain text with Gemini from the command line")]
struct Cli {
    /// Credential file (defaults to the platform config directory).
    #[arg(long, env = "EXPLAINER_KEY_FILE")]
    key_file: Option<PathBuf>,

    /// Override the model from configuration.
    #[arg(long)]
    model: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Manage the stored API key.
    Key(KeyCommand),
    /// Explain a piece of text.
    Explain { text: String },
    /// Check that the stored key works.
    Test,
}

#[derive(Args, Debug)]
struct KeyCommand {
    #[command(subcommand)]
    command: KeySubcommand,
}

#[derive(Subcommand, Debug)]
enum KeySubcommand {
    Set { key: String },
    /// Print the stored key, masked.
    Show,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    init_tracing();
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let path = cli.key_file.or_else(FileKeyStore::default_path).ok_or(CliError::NoKeyFile)?;
    let store = FileKeyStore::new(path);

    match cli.command {
        Command::Key(key) => run_key(&store, key.command).await,
        Command::Explain { text } => {
            let explainer = explainer(store, cli.model)?;
            let explanation = explain(&explainer, &ExplanationRequest::new(text)).await?;
            println!("{explanation}");
            Ok(())
        }
        Command::Test => {
            if store.get().await?.is_none() {
                return Err(CliError::NoKeyStored);
            }
            let explainer = explainer(store, cli.model)?;
            let reply = explain(&explainer, &ExplanationRequest::connectivity_test()).await?;
            println!("API key is valid and working! ({})", reply.trim());
            Ok(())
        }
    }
}

async fn run_key(store: &FileKeyStore, command: KeySubcommand) -> Result<(), CliError> {
    match command {
        KeySubcommand::Set { key } => {
            let credential = Credential::parse(&key).ok_or(CliError::BlankKey)?;
            store.set(&credential).await?;
            println!("API key saved to {}", store.path().display());
        }
        KeySubcommand::Show => match store.get().await? {
            Some(credential) => println!("{}", mask(credential.as_str())),
            None => println!("no API key stored"),
        },
    }
    Ok(())
}

fn explainer(store: FileKeyStore, model: Option<String>) -> Result<Explainer<FileKeyStore, GeminiClient>, CliError> {
    let mut config = ExplainerConfig::from_env()?;
    if let Some(model) = model {
        config.model = model;
    }
    tracing::debug!(endpoint = %config.endpoint(), "using provider");
    Ok(Explainer::new(store, GeminiClient::new(&config)?))
}

async fn explain(
    explainer: &Explainer<FileKeyStore, GeminiClient>,
    request: &ExplanationRequest,
) -> Result<String, CliError> {
    match explainer.request_explanation(request).await {
        ExplanationResult::Success { explanation, .. } => Ok(explanation),
        ExplanationResult::Failure { error } => Err(CliError::Explain(error)),
    }
}

/// Show the first and last four characters of a key.
fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}
