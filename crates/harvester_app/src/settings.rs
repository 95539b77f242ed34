//! Session settings: built-in defaults, then the RON file, then command line flags.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use harvester_core::HarvestConfig;
use harvester_engine::RemoteSettings;
use ron::extensions::Extensions;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::Cli;

const DEFAULT_USERNAME: &str = "HastyBot";
const DEFAULT_DATABASE: &str = "woogles.db";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("invalid setting: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SettingsFile {
    username: Option<String>,
    database: Option<PathBuf>,
    base_url: Option<String>,
    start_offset: Option<u64>,
    page_size: Option<u64>,
    inter_record_delay_ms: Option<u64>,
    allowed_lexicons: Option<Vec<String>>,
    standard_layout: Option<String>,
    standard_end_reason: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub database: PathBuf,
    pub harvest: HarvestConfig,
    pub remote: RemoteSettings,
}

pub fn resolve(cli: &Cli) -> Result<Settings, ConfigError> {
    let file = match &cli.config {
        Some(path) => load_file(path)?,
        None => SettingsFile::default(),
    };

    let username = cli
        .username
        .clone()
        .or(file.username)
        .unwrap_or_else(|| DEFAULT_USERNAME.to_string());
    let mut harvest = HarvestConfig::for_user(username);
    if let Some(offset) = cli.offset.or(file.start_offset) {
        harvest.start_offset = offset;
    }
    if let Some(page_size) = cli.page_size.or(file.page_size) {
        harvest.page_size = page_size;
    }
    if let Some(delay_ms) = cli.delay_ms.or(file.inter_record_delay_ms) {
        harvest.inter_record_delay = Duration::from_millis(delay_ms);
    }
    if let Some(lexicons) = file.allowed_lexicons {
        harvest.allowed_lexicons = lexicons.into_iter().collect();
    }
    if let Some(layout) = file.standard_layout {
        harvest.standard_layout = layout;
    }
    if let Some(end_reason) = file.standard_end_reason {
        harvest.standard_end_reason = end_reason;
    }
    validate(&harvest)?;

    let mut remote = RemoteSettings::default();
    if let Some(base_url) = cli.base_url.clone().or(file.base_url) {
        remote.base_url = base_url;
    }

    let database = cli
        .database
        .clone()
        .or(file.database)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE));

    Ok(Settings {
        database,
        harvest,
        remote,
    })
}

fn load_file(path: &Path) -> Result<SettingsFile, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ron::Options::default()
        .with_default_extension(Extensions::IMPLICIT_SOME)
        .from_str(&content)
        .map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
}

fn validate(config: &HarvestConfig) -> Result<(), ConfigError> {
    if config.username.trim().is_empty() {
        return Err(ConfigError::Invalid("username is empty".into()));
    }
    // A zero page size would make the skip-ahead on listing errors loop in place.
    if config.page_size == 0 {
        return Err(ConfigError::Invalid("page_size must be at least 1".into()));
    }
    if config.allowed_lexicons.is_empty() {
        return Err(ConfigError::Invalid("allowed_lexicons is empty".into()));
    }
    Ok(())
}
