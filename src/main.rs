// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::{anyhow, Result};
use std::env;
use toscrape_wordcloud::{
    api::{start_server, ApiConfig, AppState},
    cloud::{CloudConfig, WordCloud},
    nlp::Normalizer,
    pipeline::Pipeline,
    scrape::{FetchConfig, FieldSelectorSet, PageFetcher},
    version,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing subscriber for logging
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    tracing_subscriber::fmt::init();

    println!("🚀 Starting {}", version::get_version_string());

    let api_config = ApiConfig::from_env();
    api_config.validate().map_err(|e| anyhow!(e))?;

    let fetch_config = FetchConfig::from_env_for(api_config.schema);
    fetch_config.validate().map_err(|e| anyhow!(e))?;

    let cloud_config = CloudConfig::from_env();

    println!("📄 Schema: {} ({})", api_config.schema, fetch_config.source_url);
    println!(
        "🎨 Canvas: {}x{}, up to {} terms",
        cloud_config.width, cloud_config.height, cloud_config.max_words
    );

    let pipeline = Pipeline::new(
        PageFetcher::new(fetch_config)?,
        FieldSelectorSet::for_kind(api_config.schema),
        Normalizer::default(),
        WordCloud::new(cloud_config)?,
    );

    println!(
        "🌐 API listening on http://{}:{}",
        api_config.host, api_config.port
    );
    start_server(&api_config, AppState::new(pipeline)).await?;

    println!("👋 Server stopped");
    Ok(())
}
