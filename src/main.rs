mod cache;
mod catalog;
mod config;
mod error;
mod fetcher;
mod handlers;
mod limiter;
mod middleware;
mod models;
mod resolver;
mod routes;
mod service;

use anyhow::Result;
use std::sync::Arc;
use time::macros::format_description;
use tracing::info;
use tracing_subscriber::fmt::time::LocalTime;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = config::Config::from_env()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_timer(LocalTime::new(format_description!(
            "[year]-[month]-[day] [hour]:[minute]:[second]"
        )))
        .init();

    let addr = config.socket_addr()?;

    let fetcher = fetcher::HttpFetcher::new(&config.user_agent)?;
    let cache = cache::FetchCache::new(config.cache_capacity, Arc::new(fetcher));
    let service = service::ImageService::new(cache, config.fetch_timeout());

    let limiter =
        limiter::IpRateLimiter::new(config.rate_limit_requests, config.rate_limit_window_secs);
    if limiter.is_some() {
        info!(
            requests = config.rate_limit_requests,
            window_secs = config.rate_limit_window_secs,
            "Rate limiting enabled for /fetch_image"
        );
    }

    info!(
        cache_capacity = config.cache_capacity,
        fetch_timeout_secs = config.fetch_timeout_secs,
        "Server started at http://{}",
        addr
    );
    warp::serve(routes::routes(service, limiter))
        .run(addr)
        .await;

    Ok(())
}
