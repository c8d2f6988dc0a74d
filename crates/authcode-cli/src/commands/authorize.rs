//! Authorize command: print the provider redirect URL

use anyhow::Result;
use authcode_core::{AuthClient, ClientConfig};
use clap::Args;

/// Arguments for the `authorize` command
#[derive(Args, Debug)]
pub struct AuthorizeArgs {
    /// Session identifier the state is bound to
    #[arg(short, long)]
    pub session: String,
}

/// Build the authorization URL for the session
pub fn authorize(config: ClientConfig, args: &AuthorizeArgs) -> Result<String> {
    let client = AuthClient::new(config)?;
    Ok(client.authorize_url(&args.session))
}
