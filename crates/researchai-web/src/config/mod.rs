//! Configuration loading for Research AI.
//! Reads researchai.toml from the current directory or the path in the
//! RESEARCHAI_CONFIG env var. A missing file means built-in defaults.

use researchai_assistant::ReplyPolicy;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Absolute base used in share links. Derived from host/port when unset.
    #[serde(default)]
    pub public_url: Option<String>,
}

fn default_host()       -> String { "127.0.0.1".to_string() }
fn default_port()       -> u16    { 3001 }
fn default_static_dir() -> String { "static".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            public_url: None,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let addr = format!("{}:{}", self.host, self.port).parse()?;
        Ok(addr)
    }

    pub fn base_url(&self) -> String {
        match &self.public_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}:{}", self.host, self.port),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_reply_delay_ms")]
    pub reply_delay_ms: u64,
    #[serde(default)]
    pub reply_policy: ReplyPolicy,
}

fn default_reply_delay_ms() -> u64 { 1000 }

impl Default for AssistantConfig {
    fn default() -> Self {
        Self { reply_delay_ms: default_reply_delay_ms(), reply_policy: ReplyPolicy::default() }
    }
}

impl AssistantConfig {
    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// How long the "searching" indicator stays on after a submit.
    #[serde(default = "default_simulated_delay_ms")]
    pub simulated_delay_ms: u64,
}

fn default_simulated_delay_ms() -> u64 { 1500 }

impl Default for SearchConfig {
    fn default() -> Self {
        Self { simulated_delay_ms: default_simulated_delay_ms() }
    }
}

impl SearchConfig {
    pub fn delay(&self) -> Duration {
        Duration::from_millis(self.simulated_delay_ms)
    }
}


impl Config {
    /// Load configuration from researchai.toml.
    /// Checks RESEARCHAI_CONFIG env var first, then current directory.
    /// RESEARCHAI_PORT overrides the listen port.
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("RESEARCHAI_CONFIG")
            .unwrap_or_else(|_| "researchai.toml".to_string());

        let mut config = if Path::new(&path).exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml_str(&content)?
        } else {
            tracing::debug!(path = %path, "No config file found, using defaults");
            Self::default()
        };

        if let Ok(port) = std::env::var("RESEARCHAI_PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| anyhow::anyhow!("Invalid RESEARCHAI_PORT {:?}: {}", port, e))?;
        }
        Ok(config)
    }

    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
