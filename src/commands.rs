use anyhow::{Context, Result};
use std::time::Duration;
use tracing::info;

use crate::config::{Config, get_config_dir};
use crate::embeddings::openai::OpenAiClient;
use crate::fetcher::ArxivAbstractFetcher;
use crate::index::pinecone::PineconeIndex;
use crate::search::SearchPipeline;

/// Run one search and print the JSON payload to stdout.
#[inline]
pub fn run_search(query: &str, pretty: bool) -> Result<()> {
    let config_dir = get_config_dir().context("Failed to locate config directory")?;
    let config = Config::load(&config_dir).context("Failed to load configuration")?;

    let embeddings =
        OpenAiClient::new(&config.openai).context("Failed to create OpenAI client")?;
    let index = PineconeIndex::new(&config.pinecone).context("Failed to create Pinecone client")?;
    let fetcher = ArxivAbstractFetcher::new(Duration::from_secs(config.openai.timeout_seconds));

    info!("Searching for: {}", query);

    let pipeline = SearchPipeline::new(&embeddings, &index, &fetcher);
    let payload = pipeline.run(query);

    let json = if pretty {
        serde_json::to_string_pretty(&payload)
    } else {
        payload.to_json()
    }
    .context("Failed to serialize result payload")?;

    println!("{}", json);
    Ok(())
}

/// Print the current configuration as TOML.
#[inline]
pub fn show_config() -> Result<()> {
    let config_dir = get_config_dir().context("Failed to locate config directory")?;
    let config = Config::load(&config_dir).context("Failed to load configuration")?;

    println!("Config file: {}", config.config_file_path().display());
    println!();
    print!(
        "{}",
        toml::to_string_pretty(&config).context("Failed to serialize configuration")?
    );
    Ok(())
}

/// Write a default config file if none exists yet.
#[inline]
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir().context("Failed to locate config directory")?;
    let config = Config::load(&config_dir).context("Failed to load configuration")?;

    let path = config.config_file_path();
    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }

    config.save().context("Failed to write config file")?;
    println!("Wrote default config to {}", path.display());
    println!("Set api keys there or via OPENAI_API_KEY / PINECONE_API_KEY.");
    Ok(())
}
