// Export our modules for use in binaries and tests
pub mod config;
pub mod loader;

pub use config::{AppConfig, DataSource};
