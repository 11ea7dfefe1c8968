use std::path::{Path, PathBuf};

use anyhow::Context;
use config::{File, FileFormat};
use folio_models::channel::ContactChannel;
use serde::Deserialize;
use url::Url;

pub use crate::duration::Duration;

mod duration;

pub const DEFAULT_CONFIG_PATH: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../config.toml");

/// Name of the environment variable listing additional config files.
pub const CONFIG_PATHS_ENV: &str = "FOLIO_CONFIG";

/// Loads the default config, followed by the files listed in
/// [`CONFIG_PATHS_ENV`].
pub fn load() -> anyhow::Result<Config> {
    let mut paths = vec![PathBuf::from(DEFAULT_CONFIG_PATH)];
    if let Some(extra) = std::env::var_os(CONFIG_PATHS_ENV) {
        paths.extend(std::env::split_paths(&extra).filter(|p| !p.as_os_str().is_empty()));
    }
    load_paths(&paths)
}

pub fn load_paths(paths: &[impl AsRef<Path>]) -> anyhow::Result<Config> {
    load_with_override(paths, &[])
}

/// Loads the given config files in order, then applies the inline TOML
/// snippets in `overrides`.
pub fn load_with_override(
    paths: &[impl AsRef<Path>],
    overrides: &[&str],
) -> anyhow::Result<Config> {
    let builder = paths
        .iter()
        .try_fold(config::Config::builder(), |builder, path| {
            let path = path.as_ref();
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file at {}", path.display()))?;
            let source = File::from_str(&content, FileFormat::Toml);
            anyhow::Ok(builder.add_source(source))
        })?;

    overrides
        .iter()
        .fold(builder, |builder, content| {
            builder.add_source(File::from_str(content, FileFormat::Toml))
        })
        .build()?
        .try_deserialize()
        .context("Failed to load config")
}

#[derive(Debug, Deserialize)]
pub struct Config {
    pub store: StoreConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    pub url: Url,
    pub table: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize)]
pub struct ContactConfig {
    pub success_display_duration: Duration,
    pub location: Option<String>,
    #[serde(default)]
    pub channels: Vec<ContactChannel>,
}
