use std::str::FromStr;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use haven_core::{Coordinate, KeywordClassifier, ResourceCategory};
use haven_discovery::{DiscoveryEngine, EngineConfig, ResourceCache, SystemClock};
use haven_geo::{NominatimClient, NominatimConfig};

#[derive(Debug, Parser)]
#[command(name = "haven-cli")]
#[command(about = "Community resource discovery command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the category catalog.
    Categories,
    /// Fetch resources for a category around a coordinate.
    Fetch {
        /// Category slug, or "all" for a full catalog sweep.
        #[arg(long, default_value = "all")]
        category: String,
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Search radius in meters.
        #[arg(long, default_value_t = 5_000.0)]
        radius: f64,
    },
    /// Free-text search for resources around a coordinate.
    Search {
        query: String,
        #[arg(long)]
        lat: f64,
        #[arg(long)]
        lon: f64,
        /// Search radius in meters.
        #[arg(long, default_value_t = 5_000.0)]
        radius: f64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Categories => {
            for category in ResourceCategory::catalog() {
                println!("{:<20} {}", category.slug(), category.label());
            }
        }
        Commands::Fetch {
            category,
            lat,
            lon,
            radius,
        } => {
            let category = ResourceCategory::from_str(&category).map_err(anyhow::Error::msg)?;
            let engine = build_engine()?;
            let outcome = engine
                .fetch_by_category(category, Some(Coordinate::new(lat, lon)), radius)
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
        Commands::Search {
            query,
            lat,
            lon,
            radius,
        } => {
            let engine = build_engine()?;
            let outcome = engine
                .search_free_text(&query, Some(Coordinate::new(lat, lon)), radius)
                .await?;
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        }
    }

    Ok(())
}

fn build_engine() -> anyhow::Result<DiscoveryEngine<NominatimClient, SystemClock>> {
    let config = haven_core::load_app_config()?;
    let geo_config = NominatimConfig {
        timeout_secs: config.geo_timeout_secs,
        user_agent: config.geo_user_agent.clone(),
        max_retries: config.geo_max_retries,
        retry_backoff_base_ms: config.geo_retry_backoff_base_ms,
    };
    let provider = NominatimClient::with_base_url(&geo_config, &config.geo_base_url)?;
    let cache = ResourceCache::new(
        SystemClock,
        chrono::Duration::seconds(i64::try_from(config.category_ttl_secs)?),
        chrono::Duration::seconds(i64::try_from(config.search_ttl_secs)?),
    );
    Ok(DiscoveryEngine::new(
        provider,
        cache,
        Arc::new(KeywordClassifier),
        EngineConfig::from_app_config(&config),
    ))
}
