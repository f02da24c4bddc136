//! Tenantry - REST service for buildings, interests, and the users who share them
//!
//! This crate provides:
//! - SQLite storage for users, interests, and buildings
//! - Building CRUD and interest listing/creation handlers
//! - Resolution of an interest name to the users holding it
//! - An HTTP API exposing both under `/api/v1`
//!
//! # Usage
//!
//! As a library:
//! ```ignore
//! use tenantry::{Config, Core};
//!
//! let config = Config::from_file("~/.tenantry/config.toml").unwrap();
//! let core = Core::new(config).unwrap();
//! // core.start_api_server().await.unwrap();
//! ```
//!
//! As a standalone server (CLI):
//! ```text
//! tenantry --config ~/.tenantry/config.toml
//! ```

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod handlers;

// Re-export main types for convenience
pub use config::Config;
pub use db::Database;
pub use error::{CoreError, Result};

use std::sync::Arc;

/// Core service owning the configuration and the shared database handle
pub struct Core {
    /// Configuration
    pub config: Config,

    /// Database connection
    pub db: Arc<Database>,
}

impl Core {
    /// Create a new Core instance, opening the configured database
    pub fn new(config: Config) -> Result<Self> {
        let db_path = config.database_path();
        tracing::info!("Opening database at {}", db_path.display());
        let db = Database::new(db_path)?;

        Ok(Core {
            config,
            db: Arc::new(db),
        })
    }

    /// Create a Core instance with an existing database
    pub fn with_database(config: Config, db: Arc<Database>) -> Self {
        Core { config, db }
    }

    /// Start the HTTP API server
    pub async fn start_api_server(&self) -> Result<()> {
        let addr = self.config.server_addr();
        tracing::info!("Starting API server on {}", addr);
        api::serve(addr, self.db.clone(), &self.config).await
    }

    /// Get a reference to the database
    pub fn database(&self) -> &Arc<Database> {
        &self.db
    }
}
