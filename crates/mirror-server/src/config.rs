//! Configuration for the Mirror server
//!
//! Loads settings from a TOML file or from environment variables (the env
//! surface matches the original deployment: `ASI_API_KEY`, `USE_LOCAL_DKG`,
//! `PUBLISH_WALLET_PUBLIC_KEY`, ...). Every value is optional; a missing
//! oracle key or wallet degrades the corresponding pipeline stage instead of
//! failing startup.

use mirror_graph::NodeConfig;
use mirror_pipeline::PipelineConfig;
use serde::Deserialize;
use std::env;
use std::path::Path;
use thiserror::Error;

/// Remote DKG testnet gateway used when no local node is configured
pub const REMOTE_DKG_ENDPOINT: &str = "https://dkg-testnet.origintrail.io";

/// Server configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A field failed validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Oracle (text-completion service) settings
#[derive(Debug, Clone, Deserialize)]
pub struct OracleConfig {
    /// API key; empty means every oracle call fails open
    #[serde(default)]
    pub api_key: String,

    /// Base URL of the OpenAI-compatible gateway
    #[serde(default = "default_oracle_base_url")]
    pub base_url: String,

    /// Model name
    #[serde(default = "default_oracle_model")]
    pub model: String,
}

fn default_oracle_base_url() -> String {
    mirror_llm::asi::DEFAULT_BASE_URL.to_string()
}

fn default_oracle_model() -> String {
    mirror_llm::asi::DEFAULT_MODEL.to_string()
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_oracle_base_url(),
            model: default_oracle_model(),
        }
    }
}

/// DKG node settings
#[derive(Debug, Clone, Deserialize)]
pub struct DkgSettings {
    /// Use a local edge node instead of the remote testnet gateway
    #[serde(default)]
    pub use_local_node: bool,

    /// Local node endpoint
    #[serde(default = "default_dkg_endpoint")]
    pub endpoint: String,

    /// Node port
    #[serde(default = "default_dkg_port")]
    pub port: u16,

    /// Wallet public key for publishing
    #[serde(default)]
    pub public_key: String,

    /// Wallet private key for publishing
    #[serde(default)]
    pub private_key: String,
}

fn default_dkg_endpoint() -> String {
    "http://localhost".to_string()
}

fn default_dkg_port() -> u16 {
    8900
}

impl Default for DkgSettings {
    fn default() -> Self {
        Self {
            use_local_node: false,
            endpoint: default_dkg_endpoint(),
            port: default_dkg_port(),
            public_key: String::new(),
            private_key: String::new(),
        }
    }
}

impl DkgSettings {
    /// Resolve into the node connection parameters
    ///
    /// The remote gateway is used unless a local node was requested.
    pub fn node_config(&self) -> NodeConfig {
        if self.use_local_node {
            NodeConfig {
                endpoint: self.endpoint.clone(),
                port: self.port,
                public_key: self.public_key.clone(),
                private_key: self.private_key.clone(),
            }
        } else {
            NodeConfig {
                endpoint: REMOTE_DKG_ENDPOINT.to_string(),
                port: default_dkg_port(),
                public_key: self.public_key.clone(),
                private_key: self.private_key.clone(),
            }
        }
    }
}

/// Server configuration loaded from TOML or the environment
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "127.0.0.1")
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Bind port (e.g., 3000)
    #[serde(default = "default_bind_port")]
    pub bind_port: u16,

    /// Oracle settings
    #[serde(default)]
    pub oracle: OracleConfig,

    /// DKG settings
    #[serde(default)]
    pub dkg: DkgSettings,

    /// Pipeline settings
    #[serde(default)]
    pub pipeline: PipelineConfig,
}

fn default_bind_address() -> String {
    "127.0.0.1".to_string()
}

fn default_bind_port() -> u16 {
    3000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            bind_port: default_bind_port(),
            oracle: OracleConfig::default(),
            dkg: DkgSettings::default(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: ServerConfig = toml::from_str(&contents)?;
        config
            .pipeline
            .validate()
            .map_err(ConfigError::Invalid)?;
        Ok(config)
    }

    /// Build configuration from environment variables
    ///
    /// Unset variables fall back to defaults; nothing here fails.
    pub fn from_env() -> Self {
        let mut config = ServerConfig::default();

        if let Ok(port) = env::var("PORT") {
            if let Ok(port) = port.parse() {
                config.bind_port = port;
            }
        }
        if let Ok(key) = env::var("ASI_API_KEY") {
            config.oracle.api_key = key;
        }
        if let Ok(url) = env::var("ASI_BASE_URL") {
            config.oracle.base_url = url;
        }
        config.dkg.use_local_node =
            env::var("USE_LOCAL_DKG").map(|v| v == "true").unwrap_or(false);
        if let Ok(endpoint) = env::var("DKG_ENDPOINT") {
            config.dkg.endpoint = endpoint;
        }
        if let Ok(port) = env::var("DKG_PORT") {
            if let Ok(port) = port.parse() {
                config.dkg.port = port;
            }
        }
        if let Ok(key) = env::var("PUBLISH_WALLET_PUBLIC_KEY") {
            config.dkg.public_key = key;
        }
        if let Ok(key) = env::var("PUBLISH_WALLET_PRIVATE_KEY") {
            config.dkg.private_key = key;
        }

        config
    }

    /// Get the full bind address (address:port)
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.bind_address, self.bind_port)
    }
}
