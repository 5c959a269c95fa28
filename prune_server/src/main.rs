mod config;
mod error;
mod page;
mod router;
mod state;

use axum::Router;
use dotenvy::dotenv;
use tower_http::{services::ServeFile, trace::TraceLayer};
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use std::sync::Arc;

use prune_core::{AggregateOptions, StatisticsCache};

use crate::{config::ServerConfig, page::PageRenderer, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env()?
        .add_directive("hyper::proto=info".parse()?)
        .add_directive("hyper::client=info".parse()?)
        .add_directive("reqwest=info".parse()?)
        .add_directive("handlebars=info".parse()?);
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Load configuration
    let config = ServerConfig::from_env()?;
    if config.default_cookie.is_none() {
        tracing::info!("TWITTER_COOKIE not set, requests must carry their own session cookie");
    }

    // 3. Initialize HTTP client, cache and renderer
    let http = twitter_client::http_client()?;
    let options = AggregateOptions {
        track_oldest_seen: config.track_oldest_seen,
    };
    let cache = Arc::new(StatisticsCache::new(config.cache_window, options));
    let renderer = Arc::new(PageRenderer::new()?);

    // 4. Setup state and router
    let app_state = AppState {
        http,
        cache,
        renderer,
        default_cookie: config.default_cookie.clone(),
    };

    let mut app = Router::new().merge(router::index::index_router());
    if let Some(dir) = &config.static_dir {
        app = app.route_service("/prune.png", ServeFile::new(dir.join("prune.png")));
    }
    let app = app
        .layer(TraceLayer::new_for_http().on_request(()))
        .with_state(app_state);

    // 5. Start server
    tracing::info!("Server starting at {}", config.address);
    axum::Server::bind(&config.address)
        .serve(app.into_make_service())
        .await?;
    Ok(())
}
