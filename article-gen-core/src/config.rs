use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::model::codec::TRUNCATE_MARKER;

/// Environment variable naming an engine configuration file.
pub const CONFIG_ENV: &str = "ARTICLE_GEN_CONFIG";

/// Configuration file picked up from the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "article-gen.toml";

/// Settings of the text-generation engine.
///
/// Every key is optional in the TOML file; missing keys keep their default.
///
/// ```toml
/// run_name = "124M_article_generator_model"
/// checkpoint_dir = "checkpoint"
/// temperature = 0.7
/// top_k = 0
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
	/// Base model the fine-tuned run was trained from.
	pub model_name: String,
	/// Name of the fine-tuned run, a directory under `checkpoint_dir`.
	pub run_name: String,
	pub checkpoint_dir: PathBuf,
	/// How many candidate tokens to sample from. `0` means unlimited.
	pub top_k: i64,
	/// Nucleus sampling threshold. `0.0` disables it.
	pub top_p: f64,
	pub temperature: f64,
	/// Samples are cut where they run into this marker.
	pub truncate: String,
}

impl Default for EngineConfig {
	fn default() -> Self {
		Self {
			model_name: "124M".to_owned(),
			run_name: "124M_article_generator_model".to_owned(),
			checkpoint_dir: PathBuf::from("checkpoint"),
			top_k: 0,
			top_p: 0.0,
			temperature: 0.7,
			truncate: TRUNCATE_MARKER.to_owned(),
		}
	}
}

impl EngineConfig {
	/// Directory holding the weights and vocabulary of the configured run.
	pub fn run_directory(&self) -> PathBuf {
		self.checkpoint_dir.join(&self.run_name)
	}

	/// Reads a configuration from a TOML file.
	///
	/// # Errors
	/// Returns [`Error::Config`] if the file cannot be read or parsed.
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let path = path.as_ref();
		let text = fs::read_to_string(path).map_err(|e| Error::Config {
			path: path.to_path_buf(),
			message: e.to_string(),
		})?;
		Self::from_toml(&text).map_err(|message| Error::Config { path: path.to_path_buf(), message })
	}

	fn from_toml(text: &str) -> Result<Self, String> {
		toml::from_str(text).map_err(|e| e.to_string())
	}

	/// Loads the configuration used at start-up.
	///
	/// Lookup order:
	/// - the file named by `ARTICLE_GEN_CONFIG`
	/// - `article-gen.toml` in the working directory, if present
	/// - built-in defaults
	pub fn load() -> Result<Self> {
		if let Some(path) = env::var_os(CONFIG_ENV) {
			log::debug!("loading engine configuration from ${CONFIG_ENV}");
			return Self::from_file(PathBuf::from(path));
		}
		let local = Path::new(DEFAULT_CONFIG_FILE);
		if local.is_file() {
			log::debug!("loading engine configuration from {}", local.display());
			return Self::from_file(local);
		}
		Ok(Self::default())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn defaults_match_the_fine_tuned_run() {
		let config = EngineConfig::default();
		assert_eq!(config.run_directory(), PathBuf::from("checkpoint/124M_article_generator_model"));
		assert_eq!(config.top_k, 0);
		assert_eq!(config.truncate, "<|endoftext|><|startoftext|>");
	}

	#[test]
	fn partial_file_overrides_only_given_keys() {
		let config = EngineConfig::from_toml("temperature = 0.9\nrun_name = \"news\"\n").unwrap();
		assert_eq!(config.temperature, 0.9);
		assert_eq!(config.run_name, "news");
		assert_eq!(config.model_name, "124M");
	}

	#[test]
	fn unknown_keys_are_rejected() {
		assert!(EngineConfig::from_toml("temprature = 0.9").is_err());
	}

	#[test]
	fn unreadable_file_is_a_config_error() {
		let dir = tempfile::tempdir().unwrap();
		let error = EngineConfig::from_file(dir.path().join("missing.toml")).unwrap_err();
		assert!(matches!(error, Error::Config { .. }));
		assert!(error.is_configuration());
	}

	#[test]
	fn file_is_parsed() {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("article-gen.toml");
		fs::write(&path, "checkpoint_dir = \"/models\"\ntop_p = 0.9\n").unwrap();

		let config = EngineConfig::from_file(&path).unwrap();
		assert_eq!(config.checkpoint_dir, PathBuf::from("/models"));
		assert_eq!(config.top_p, 0.9);
	}
}
