//! Contacts API - Main entry point
//!
//! Loads configuration, wires the contact store and manager together, and
//! serves the REST API.

use anyhow::Result;
use contacts_api::{
    Config, ContactManager, ContactManagerImpl, ContactRepository, InMemoryContactRepository,
    SqliteContactRepository, StoreKind,
};
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // RUST_LOG wins over LOG_LEVEL
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();

    info!("Starting Contacts API with {} store", config.store);

    let repository: Arc<dyn ContactRepository> = match config.store {
        StoreKind::Sqlite => Arc::new(SqliteContactRepository::open(&config.database_path)?),
        StoreKind::Memory => {
            warn!("Using in-memory store; contacts will not survive a restart");
            Arc::new(InMemoryContactRepository::new())
        }
    };

    let contact_manager = Arc::new(ContactManagerImpl::new(repository)) as Arc<dyn ContactManager>;

    contacts_api::run_server(config.socket_addr(), contact_manager).await?;

    info!("Contacts API shutdown complete");
    Ok(())
}
