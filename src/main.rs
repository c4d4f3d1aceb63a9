use std::collections::HashMap;
use std::sync::Arc;
use axum::extract::Query;
use axum::http::Uri;
use chrono::Utc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ston_pairs::api::{create_rest_router, AppState};
use ston_pairs::config::Config;
use ston_pairs::error::ApiError;
use ston_pairs::services::{run_query, MetadataCache, PairQuery};
use ston_pairs::sources::{fetch_market_data, ston::StonApiClient};

/// Stateless shell: fetch, run the pipeline once, print the response.
/// A failed fetch prints the same error body the server returns and exits 1.
async fn run_once(config: &Config, query_string: &str) -> Result<(), Box<dyn std::error::Error>> {
    let uri: Uri = format!("/api/pairs?{}", query_string.trim_start_matches('?')).parse()?;
    let Query(params) = Query::<HashMap<String, String>>::try_from_uri(&uri)?;

    let fetched = match StonApiClient::new(&config.upstream) {
        Ok(source) => fetch_market_data(&source).await,
        Err(e) => Err(e),
    };

    let data = match fetched {
        Ok(data) => data,
        Err(e) => {
            let err = ApiError::from(e);
            tracing::error!("{}", err);
            println!("{}", serde_json::to_string_pretty(&err.body())?);
            std::process::exit(1);
        }
    };

    let response = run_query(&data, &PairQuery::from_params(&params, &config.query), Utc::now());
    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}

/// `--once [query]`: single request, no cache.
fn once_query(args: &[String]) -> Option<&str> {
    let i = args.iter().position(|a| a == "--once")?;
    Some(args.get(i + 1).map(String::as_str).unwrap_or(""))
}

#[tokio::main(worker_threads = 4)]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().collect();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ston_pairs=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    let config = Config::load(&config_path)?;
    tracing::info!("✓ Configuration loaded");

    if let Some(query_string) = once_query(&args) {
        return run_once(&config, query_string).await;
    }

    let source = Arc::new(StonApiClient::new(&config.upstream)?);
    let state = Arc::new(AppState {
        source,
        cache: MetadataCache::new(config.cache.ttl_secs),
        query: config.query.clone(),
    });

    let static_dir = std::path::Path::new(&config.server.static_dir)
        .is_dir()
        .then_some(config.server.static_dir.as_str());
    let app = create_rest_router(state, static_dir);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    tracing::info!("✓ Server ready on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
