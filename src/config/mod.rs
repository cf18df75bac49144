//! Configuration Management
//!
//! This module handles loading API credentials and REST client settings.

pub mod credentials;
pub mod settings;

// Re-export
pub use credentials::{Credentials, SecretString};
pub use settings::ClientSettings;
