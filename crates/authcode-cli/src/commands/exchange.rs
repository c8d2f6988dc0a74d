//! Exchange command: turn a provider callback into a result envelope

use anyhow::Result;
use authcode_core::{AuthClient, CallbackParams, ClientConfig, ResponseEnvelope};
use clap::Args;

/// Arguments for the `exchange` command
#[derive(Args, Debug)]
pub struct ExchangeArgs {
    /// Session identifier used for `authorize`
    #[arg(short, long)]
    pub session: String,

    /// Callback URL the provider redirected to, or just its query string
    #[arg(short, long)]
    pub callback: String,

    /// Pretty-print the envelope
    #[arg(long)]
    pub pretty: bool,
}

/// Run the callback through the client
pub async fn exchange(config: ClientConfig, args: &ExchangeArgs) -> Result<ResponseEnvelope> {
    let client = AuthClient::new(config)?;
    let params = CallbackParams::from_url(&args.callback);

    tracing::debug!(
        has_code = params.code.is_some(),
        has_error = params.error.is_some(),
        "Parsed callback"
    );

    Ok(client.access_token(&args.session, &params).await)
}

/// Render an envelope as JSON
pub fn render(envelope: &ResponseEnvelope, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(envelope)?
    } else {
        serde_json::to_string(envelope)?
    };
    Ok(json)
}
