//! media-fetch entry point.
//!
//! Fetches the rendered JSON document for a document URI and prints it on
//! stdout. Logging goes to stderr so the output can be piped.

use anyhow::{Context, Result};
use clap::Parser;
use media_client::MediaClient;
use media_core::AppConfig;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

/// Fetch a rendered document from the media API.
#[derive(Debug, Parser)]
#[command(name = "media-fetch", version)]
struct Args {
    /// Public document URI, e.g. http://tt.se/media/text/231107-oktobervader-1d76cbf0
    document_uri: String,

    /// Media API host, overrides MEDIA_CLIENT_HOST.
    #[arg(long)]
    host: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let args = Args::parse();

    let mut config = AppConfig::load()?;
    if let Some(host) = args.host {
        config.host = host;
    }
    config.require_host()?;

    let http = reqwest::Client::builder()
        .user_agent(&config.user_agent)
        .timeout(config.timeout())
        .use_rustls_tls()
        .build()
        .context("build HTTP client")?;

    let media = MediaClient::new(tracing::info_span!("media", host = %config.host), http, config.host.clone());

    let cancel = CancellationToken::new();
    tokio::spawn({
        let cancel = cancel.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::info!("interrupted, cancelling request");
                cancel.cancel();
            }
        }
    });

    let doc = match media.get_rendered_document(&cancel, &args.document_uri, None).await {
        Ok(doc) => doc,
        Err(err) => {
            if let Some(permanent) = err.permanent() {
                tracing::error!(cause = %permanent.cause, "{err}");
                return Err(anyhow::Error::new(err).context(permanent));
            }
            return Err(anyhow::Error::new(err).context("fetch rendered document (may be retried)"));
        }
    };

    println!("{}", serde_json::to_string_pretty(&doc)?);

    Ok(())
}
