//! Secret retrieval for the Binance credentials.
//!
//! This module provides:
//! - The [`SecretStore`] trait the handler is generic over
//! - In-memory, environment and secrets-extension stores
//! - [`load_credentials`], which fetches and validates the credential pair

mod extension;
mod loader;
mod store;

pub use extension::{DEFAULT_EXTENSION_ENDPOINT, ExtensionSecretStore, GetSecretValueResponse};
pub use loader::{
    API_KEY_FIELD, DEFAULT_SECRET_ID, SECRET_KEY_FIELD, load_credentials, parse_credentials,
};
pub use store::{EnvSecretStore, SecretStore, StaticSecretStore};
