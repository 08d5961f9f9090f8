//! paydown-config
//!
//! On-disk JSON configuration for the debt engine: locale and currency
//! defaults plus the data-directory override that decides where the SQLite
//! store lives.

pub mod error;
pub mod manager;
pub mod model;

pub use error::ConfigError;
pub use manager::ConfigManager;
pub use model::Config;
