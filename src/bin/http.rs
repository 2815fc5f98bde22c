use std::net::SocketAddr;

use scheme_tool::{Scheme, SchemeSettings, http_api};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr: SocketAddr = std::env::var("SCHEME_TOOL_HTTP_ADDR")
        .unwrap_or_else(|_| "0.0.0.0:3000".to_string())
        .parse()?;

    let scheme = match std::env::var("SCHEME_TOOL_CONFIG") {
        Ok(path) => {
            info!(%path, "loading settings");
            Scheme::from_settings(SchemeSettings::load(&path)?)
        }
        Err(_) => Scheme::new(),
    };

    http_api::serve(addr, scheme).await?;
    Ok(())
}
