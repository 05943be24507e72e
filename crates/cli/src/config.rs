//! Client configuration: flag, then environment, then config file, then defaults.
//!
//! Flags and environment variables are merged by clap before they reach
//! [`ClientConfig::resolve`], which only layers the file and the defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::debug;

use crate::error::{CliError, Result};

pub const DEFAULT_API_URL: &str = "http://178.128.114.245:5000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const APP_DIR: &str = "attend";
const CONFIG_FILE: &str = "config.json";
const STORAGE_FILE: &str = "storage.json";

/// On-disk shape of `config.json`. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct ConfigFile {
	api_url: Option<String>,
	storage_path: Option<PathBuf>,
	request_timeout_secs: Option<u64>,
}

/// Values given on the command line or through the environment.
#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
	pub api_url: Option<String>,
	pub storage_path: Option<PathBuf>,
	pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
	pub api_url: String,
	pub storage_path: PathBuf,
	pub request_timeout: Duration,
}

impl ClientConfig {
	pub fn resolve(overrides: &ConfigOverrides) -> Result<Self> {
		let config_path = overrides.config_path.clone().or_else(default_config_path);
		let file = match &config_path {
			Some(path) => load_file(path)?,
			None => ConfigFile::default(),
		};

		let api_url = overrides
			.api_url
			.clone()
			.or(file.api_url)
			.unwrap_or_else(|| DEFAULT_API_URL.to_string());
		let storage_path = overrides
			.storage_path
			.clone()
			.or(file.storage_path)
			.unwrap_or_else(default_storage_path);
		let request_timeout = Duration::from_secs(file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS));

		debug!(target = "attend.config", %api_url, storage = %storage_path.display(), "configuration resolved");
		Ok(Self {
			api_url,
			storage_path,
			request_timeout,
		})
	}
}

fn load_file(path: &Path) -> Result<ConfigFile> {
	let content = match fs::read_to_string(path) {
		Ok(content) => content,
		Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(ConfigFile::default()),
		Err(err) => return Err(err.into()),
	};
	serde_json::from_str(&content).map_err(|err| CliError::Config {
		path: path.to_path_buf(),
		message: err.to_string(),
	})
}

fn app_dir() -> Option<PathBuf> {
	dirs::config_dir().map(|dir| dir.join(APP_DIR))
}

fn default_config_path() -> Option<PathBuf> {
	app_dir().map(|dir| dir.join(CONFIG_FILE))
}

fn default_storage_path() -> PathBuf {
	app_dir()
		.unwrap_or_else(|| PathBuf::from(format!(".{APP_DIR}")))
		.join(STORAGE_FILE)
}

#[cfg(test)]
mod tests {
	use tempfile::TempDir;

	use super::*;

	fn overrides_with_config(path: PathBuf) -> ConfigOverrides {
		ConfigOverrides {
			config_path: Some(path),
			..ConfigOverrides::default()
		}
	}

	#[test]
	fn missing_file_falls_back_to_defaults() {
		let dir = TempDir::new().unwrap();
		let config = ClientConfig::resolve(&overrides_with_config(dir.path().join("absent.json"))).unwrap();
		assert_eq!(config.api_url, DEFAULT_API_URL);
		assert_eq!(config.request_timeout, Duration::from_secs(30));
		assert!(config.storage_path.ends_with("storage.json"));
	}

	#[test]
	fn file_values_apply_below_overrides() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("config.json");
		fs::write(
			&path,
			r#"{"apiUrl": "http://file.example", "storagePath": "/tmp/from-file.json", "requestTimeoutSecs": 5}"#,
		)
		.unwrap();

		let from_file = ClientConfig::resolve(&overrides_with_config(path.clone())).unwrap();
		assert_eq!(from_file.api_url, "http://file.example");
		assert_eq!(from_file.storage_path, PathBuf::from("/tmp/from-file.json"));
		assert_eq!(from_file.request_timeout, Duration::from_secs(5));

		let overridden = ClientConfig::resolve(&ConfigOverrides {
			api_url: Some("http://flag.example".into()),
			storage_path: Some(dir.path().join("flag.json")),
			config_path: Some(path),
		})
		.unwrap();
		assert_eq!(overridden.api_url, "http://flag.example");
		assert_eq!(overridden.storage_path, dir.path().join("flag.json"));
	}

	#[test]
	fn malformed_file_is_a_config_error() {
		let dir = TempDir::new().unwrap();
		let path = dir.path().join("config.json");
		fs::write(&path, r#"{"apiUrl": 42}"#).unwrap();

		let err = ClientConfig::resolve(&overrides_with_config(path)).unwrap_err();
		assert!(matches!(err, CliError::Config { .. }));
	}
}
