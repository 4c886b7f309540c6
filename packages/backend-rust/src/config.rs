use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

use thiserror::Error;
use voice_algo::{ScaleConfig, DEFAULT_PERSONALIZATION_WINDOW, DEFAULT_TARGET_SAMPLES};

const DEFAULT_SNAPSHOT_INTERVAL_SECS: u64 = 5;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid scale config in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub file_logs: bool,
    pub log_dir: PathBuf,
    pub baseline_target_samples: u32,
    pub personalization_window: usize,
    pub baseline_snapshot_path: Option<PathBuf>,
    pub snapshot_interval: Duration,
    pub scale_config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::new(0, 0, 0, 0)),
            port: 3000,
            log_level: "info".to_string(),
            file_logs: false,
            log_dir: PathBuf::from("./logs"),
            baseline_target_samples: DEFAULT_TARGET_SAMPLES,
            personalization_window: DEFAULT_PERSONALIZATION_WINDOW,
            baseline_snapshot_path: None,
            snapshot_interval: Duration::from_secs(DEFAULT_SNAPSHOT_INTERVAL_SECS),
            scale_config_path: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup; unparsable values keep their defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let non_empty = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let port = non_empty("PORT")
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(defaults.port);

        let host = non_empty("HOST")
            .and_then(|value| value.parse::<IpAddr>().ok())
            .unwrap_or(defaults.host);

        let log_level = non_empty("RUST_LOG").unwrap_or(defaults.log_level);

        let file_logs = non_empty("ENABLE_FILE_LOGS")
            .and_then(|value| parse_bool(&value))
            .unwrap_or(defaults.file_logs);

        let log_dir = non_empty("LOG_DIR").map(PathBuf::from).unwrap_or(defaults.log_dir);

        let baseline_target_samples = non_empty("BASELINE_TARGET_SAMPLES")
            .and_then(|value| value.parse::<u32>().ok())
            .filter(|value| *value >= 1)
            .unwrap_or(defaults.baseline_target_samples);

        let personalization_window = non_empty("PERSONALIZATION_WINDOW")
            .and_then(|value| value.parse::<usize>().ok())
            .filter(|value| *value >= 2)
            .unwrap_or(defaults.personalization_window);

        let snapshot_interval = non_empty("BASELINE_SNAPSHOT_INTERVAL_SECS")
            .and_then(|value| value.parse::<u64>().ok())
            .filter(|value| *value >= 1)
            .map(Duration::from_secs)
            .unwrap_or(defaults.snapshot_interval);

        Self {
            host,
            port,
            log_level,
            file_logs,
            log_dir,
            baseline_target_samples,
            personalization_window,
            baseline_snapshot_path: non_empty("BASELINE_SNAPSHOT_PATH").map(PathBuf::from),
            snapshot_interval,
            scale_config_path: non_empty("SCALE_CONFIG_PATH").map(PathBuf::from),
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Scale weights from `SCALE_CONFIG_PATH`, or the defaults when unset
    pub fn load_scale_config(&self) -> Result<ScaleConfig, ConfigError> {
        match &self.scale_config_path {
            Some(path) => read_scale_config(path),
            None => Ok(ScaleConfig::default()),
        }
    }
}

fn read_scale_config(path: &Path) -> Result<ScaleConfig, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    ScaleConfig::from_json(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
