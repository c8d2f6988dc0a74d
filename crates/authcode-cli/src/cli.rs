//! CLI argument parsing

use crate::commands::{self, AuthorizeArgs, ExchangeArgs};
use anyhow::{Context, Result};
use authcode_core::config::{load_dotenv, load_dotenv_from, DEFAULT_ENV_PREFIX};
use authcode_core::ClientConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// OAuth2 authorization-code client
#[derive(Parser, Debug)]
#[command(name = "authcode")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Load variables from this file instead of `./.env`
    #[arg(long, global = true)]
    env_file: Option<PathBuf>,

    /// Prefix of the configuration variables
    #[arg(long, global = true, default_value = DEFAULT_ENV_PREFIX)]
    prefix: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the authorization URL for a session
    Authorize(AuthorizeArgs),

    /// Exchange the code from a provider callback and print the result envelope
    Exchange(ExchangeArgs),
}

impl Cli {
    /// Install the stderr log subscriber (`RUST_LOG` overrides the `AUTHCODE_ENV` default)
    pub fn init_tracing(&self) {
        let profile = std::env::var("AUTHCODE_ENV").ok();
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("authcode_core={}", log_level_for(profile.as_deref())))
        });

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }

    /// Execute the CLI command
    pub async fn execute(self) -> Result<ExitCode> {
        let config = self.load_config()?;

        match self.command {
            Commands::Authorize(args) => {
                println!("{}", commands::authorize(config, &args)?);
                Ok(ExitCode::SUCCESS)
            }
            Commands::Exchange(args) => {
                let envelope = commands::exchange(config, &args).await?;
                println!("{}", commands::render(&envelope, args.pretty)?);
                Ok(if envelope.is_success() {
                    ExitCode::SUCCESS
                } else {
                    ExitCode::FAILURE
                })
            }
        }
    }

    fn load_config(&self) -> Result<ClientConfig> {
        match &self.env_file {
            Some(path) => load_dotenv_from(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => load_dotenv(),
        }

        ClientConfig::from_env_prefixed(&self.prefix)
            .with_context(|| format!("failed to load {}_* configuration", self.prefix.trim_end_matches('_')))
    }
}

/// Default log level for a deployment profile; unset means development.
fn log_level_for(profile: Option<&str>) -> &'static str {
    match profile {
        None | Some("development") | Some("dev") => "debug",
        Some(_) => "info",
    }
}
