//! Pipeline configuration
//!
//! Defaults, then `OBSTATS_*` environment overrides, then command-line
//! flags (applied by the binary).

use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::info;

pub const DEFAULT_WINDOW_SIZE: usize = 1000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Root holding one directory per capture day.
    pub data_dir: PathBuf,
    pub cache_path: PathBuf,
    /// zstd-compress the table cache.
    pub compress: bool,
    /// Rolling window size in samples.
    pub window_size: usize,
    pub output_dir: PathBuf,
    /// Ignore an existing cache and rebuild from captures.
    pub force_rebuild: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            cache_path: PathBuf::from("table.cache"),
            compress: true,
            window_size: DEFAULT_WINDOW_SIZE,
            output_dir: PathBuf::from("charts"),
            force_rebuild: false,
        }
    }
}

fn env_str(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

fn env_bool(name: &str) -> Option<bool> {
    env_str(name).map(|s| {
        matches!(
            s.to_lowercase().as_str(),
            "1" | "true" | "yes" | "y" | "on"
        )
    })
}

impl PipelineConfig {
    /// Defaults with `OBSTATS_*` environment overrides applied.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(v) = env_str("OBSTATS_DATA_DIR") {
            config.data_dir = PathBuf::from(v);
        }
        if let Some(v) = env_str("OBSTATS_CACHE_PATH") {
            config.cache_path = PathBuf::from(v);
        }
        if let Some(v) = env_bool("OBSTATS_COMPRESS") {
            config.compress = v;
        }
        if let Some(v) = env_str("OBSTATS_WINDOW").and_then(|s| s.parse().ok()) {
            config.window_size = v;
        }
        if let Some(v) = env_str("OBSTATS_OUTPUT_DIR") {
            config.output_dir = PathBuf::from(v);
        }
        config
    }

    pub fn log_summary(&self) {
        info!(
            data_dir = %self.data_dir.display(),
            cache_path = %self.cache_path.display(),
            compress = self.compress,
            window_size = self.window_size,
            output_dir = %self.output_dir.display(),
            force_rebuild = self.force_rebuild,
            "Pipeline configuration"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PipelineConfig::default();
        assert_eq!(config.window_size, 1000);
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert!(!config.force_rebuild);
    }

    // Only test that touches the process environment.
    #[test]
    fn test_env_overrides() {
        env::set_var("OBSTATS_DATA_DIR", "/srv/captures");
        env::set_var("OBSTATS_WINDOW", "250");
        env::set_var("OBSTATS_COMPRESS", "no");
        env::set_var("OBSTATS_OUTPUT_DIR", "  ");

        let config = PipelineConfig::from_env();
        assert_eq!(config.data_dir, PathBuf::from("/srv/captures"));
        assert_eq!(config.window_size, 250);
        assert!(!config.compress);
        assert_eq!(config.output_dir, PathBuf::from("charts"));

        env::set_var("OBSTATS_WINDOW", "not-a-number");
        assert_eq!(PipelineConfig::from_env().window_size, DEFAULT_WINDOW_SIZE);

        for name in ["OBSTATS_DATA_DIR", "OBSTATS_WINDOW", "OBSTATS_COMPRESS", "OBSTATS_OUTPUT_DIR"] {
            env::remove_var(name);
        }
    }
}
