use std::sync::Arc;

use color_eyre::eyre::Result;
use dotenv::dotenv;
use studiobook_client::{ClientConfig, HttpBackend};
use studiobook_storefront::config::StorefrontConfig;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize error handling
    color_eyre::install()?;

    // Load environment variables
    dotenv().ok();

    // Backend API client
    let backend = HttpBackend::new(ClientConfig::from_env()?)?;

    // Load configuration
    let config = StorefrontConfig::from_env()?;

    // Start storefront server
    studiobook_storefront::start_server(config, Arc::new(backend)).await?;

    Ok(())
}
