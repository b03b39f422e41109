//! silo-api binary: config parsing, cache startup, and the two listeners.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use silo_api::state::AppState;
use silo_api::{app, internal_app};
use silo_assert::{AuthorityKey, Issuer};
use silo_index::{HttpFetcher, IndexCache};

#[derive(Debug, Parser)]
#[command(name = "silo-api", about = "Package mirror store front end")]
struct Args {
    /// Public listen address.
    #[arg(long, env = "SILO_LISTEN", default_value = "0.0.0.0:8080")]
    listen: SocketAddr,

    /// Internal (refresh trigger) listen address; must be loopback.
    #[arg(long, env = "SILO_INTERNAL_LISTEN", default_value = "127.0.0.1:8081")]
    internal_listen: SocketAddr,

    /// Upstream release server base URL.
    #[arg(long, env = "SILO_BASE_URL", default_value = "http://apps.syncloud.org")]
    base_url: String,

    /// Architecture tag used in upstream artifact names.
    #[arg(long, env = "SILO_ARCH", default_value = "amd64")]
    arch: String,

    /// Authority identity stamped into assertion headers.
    #[arg(long, env = "SILO_AUTHORITY_ID", default_value = "syncloud")]
    authority_id: String,

    /// Path to the 32-byte hex signing key seed; generated if absent.
    #[arg(long, env = "SILO_KEY_FILE", default_value = "authority.key")]
    key_file: PathBuf,

    /// Seconds between background refresh passes.
    #[arg(long, env = "SILO_REFRESH_INTERVAL_SECS", default_value_t = 3600)]
    refresh_interval_secs: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    anyhow::ensure!(
        args.internal_listen.ip().is_loopback(),
        "internal listener must bind a loopback address, got {}",
        args.internal_listen
    );

    let fetcher = Arc::new(HttpFetcher::new().context("building HTTP client")?);
    let cache = Arc::new(
        IndexCache::new(fetcher, &args.base_url, &args.arch)
            .with_refresh_interval(Duration::from_secs(args.refresh_interval_secs)),
    );
    let key = AuthorityKey::load_or_generate(&args.authority_id, &args.key_file)
        .context("loading authority key")?;
    let issuer = Arc::new(Issuer::new(key));

    // Initial refresh is synchronous so the store never serves empty
    // snapshots after a clean start; the hourly loop takes over from here.
    cache.start().await.context("initial index refresh")?;

    let state = AppState {
        cache: Arc::clone(&cache),
        issuer,
    };

    let public = tokio::net::TcpListener::bind(args.listen)
        .await
        .with_context(|| format!("binding {}", args.listen))?;
    let internal = tokio::net::TcpListener::bind(args.internal_listen)
        .await
        .with_context(|| format!("binding {}", args.internal_listen))?;
    tracing::info!(
        public = %args.listen,
        internal = %args.internal_listen,
        "silo-api listening"
    );

    let public_server = axum::serve(public, app(state.clone()).into_make_service());
    let internal_server = axum::serve(internal, internal_app(state).into_make_service());
    tokio::try_join!(
        async { public_server.await.context("public server") },
        async { internal_server.await.context("internal server") },
    )?;
    Ok(())
}
