use std::env;
use std::net::{IpAddr, SocketAddr};

use thiserror::Error;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{0} environment variable is not set")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreBackend {
    Memory,
    MongoDb { uri: String, database: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub store: StoreBackend,
    pub seed_examples: bool,
    pub host: IpAddr,
    pub port: u16,
}

impl Settings {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Reads settings through `lookup`, treating empty values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let gemini_api_key = get("GEMINI_API_KEY").ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;
        let gemini_model = get("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());
        let gemini_base_url =
            get("GEMINI_BASE_URL").unwrap_or_else(|| DEFAULT_GEMINI_BASE_URL.to_string());

        let backend = get("STORE_BACKEND").map(|v| v.to_lowercase());
        let store = match backend.as_deref() {
            None | Some("memory") => StoreBackend::Memory,
            Some("mongodb") | Some("mongo") => StoreBackend::MongoDb {
                uri: get("MONGODB_URI").ok_or(ConfigError::Missing("MONGODB_URI"))?,
                database: get("MONGODB_DATABASE").unwrap_or_else(|| "podcast_scribe".to_string()),
            },
            Some(other) => {
                return Err(ConfigError::Invalid {
                    name: "STORE_BACKEND",
                    value: other.to_string(),
                })
            }
        };

        let seed_examples = match get("SEED_EXAMPLES") {
            None => false,
            Some(value) => value.parse::<bool>().map_err(|_| ConfigError::Invalid {
                name: "SEED_EXAMPLES",
                value,
            })?,
        };

        let host = match get("HOST") {
            None => IpAddr::from([0, 0, 0, 0]),
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name: "HOST", value })?,
        };

        let port = match get("PORT") {
            None => 8000,
            Some(value) => value.parse().map_err(|_| ConfigError::Invalid { name: "PORT", value })?,
        };

        Ok(Self {
            gemini_api_key,
            gemini_model,
            gemini_base_url,
            store,
            seed_examples,
            host,
            port,
        })
    }

    pub fn addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}
