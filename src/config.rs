use anyhow::Context;
use serde::Deserialize;

pub const DEFAULT_LISTEN_ADDR: &str = "127.0.0.1:2222";
pub const DEFAULT_THRESHOLD: i64 = 3;
pub const DEFAULT_RECORDS_PATH: &str = "employees.json";

/// Process configuration, resolved once at startup.
///
/// Resolution order: built-in defaults, then an optional YAML file named by
/// `SNARE_CONFIG`, then individual environment variable overrides
/// (`SNARE_LISTEN`, `SNARE_THRESHOLD`, `SNARE_RECORDS`).
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub bait: BaitConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address the listener binds, e.g. "127.0.0.1:2222"
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BaitConfig {
    /// Qualifying attempts required before the payload is released.
    /// Zero or negative means the first attempt triggers delivery.
    pub threshold: i64,

    /// Path to the JSON file of fabricated records
    pub records_path: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
        }
    }
}

impl Default for BaitConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            records_path: DEFAULT_RECORDS_PATH.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            bait: BaitConfig::default(),
        }
    }
}

impl Config {
    pub fn load() -> Self {
        let mut cfg = match std::env::var("SNARE_CONFIG") {
            Ok(path) => Self::from_file(&path).unwrap_or_else(|e| {
                tracing::warn!("Ignoring config file {}: {:#}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("SNARE_LISTEN") {
            cfg.server.listen_addr = addr;
        }

        if let Ok(raw) = std::env::var("SNARE_THRESHOLD") {
            match raw.parse() {
                Ok(t) => cfg.bait.threshold = t,
                Err(_) => tracing::warn!(
                    "SNARE_THRESHOLD {:?} is not an integer, keeping {}",
                    raw,
                    cfg.bait.threshold
                ),
            }
        }

        if let Ok(path) = std::env::var("SNARE_RECORDS") {
            cfg.bait.records_path = path;
        }

        cfg
    }

    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("cannot read config file {}", path))?;
        let cfg = serde_yaml::from_str(&raw)
            .with_context(|| format!("cannot parse config file {}", path))?;
        Ok(cfg)
    }
}
