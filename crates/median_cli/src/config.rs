use anyhow::{Context, Result};
use median_maintenance::DEFAULT_MODULUS;
use serde::Deserialize;
use std::fs;
use std::num::NonZeroU64;
use std::path::Path;

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
	pub checksum: ChecksumConfig,
	pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChecksumConfig {
	pub modulus: u64,
}

impl Default for ChecksumConfig {
	fn default() -> Self {
		Self { modulus: DEFAULT_MODULUS.get() }
	}
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
	pub print_medians: bool,
}

impl Config {
	pub fn load(path: &str) -> Result<Self> {
		let content = fs::read_to_string(path).with_context(|| format!("Failed to read config file: {path}"))?;

		Self::parse(&content)
	}

	/// Loads an explicit path, or the default path when it exists, or falls back to defaults.
	pub fn resolve(path: Option<&str>) -> Result<Self> {
		match path {
			Some(path) => Self::load(path),
			None if Path::new(DEFAULT_CONFIG_PATH).exists() => Self::load(DEFAULT_CONFIG_PATH),
			None => Ok(Self::default()),
		}
	}

	pub fn parse(content: &str) -> Result<Self> {
		let config: Self = toml::from_str(content).with_context(|| "Failed to parse config file")?;

		config.validate()?;

		Ok(config)
	}

	fn validate(&self) -> Result<()> {
		if self.checksum.modulus == 0 {
			anyhow::bail!("checksum.modulus must be greater than 0");
		}

		Ok(())
	}

	pub fn modulus(&self) -> Result<NonZeroU64> {
		NonZeroU64::new(self.checksum.modulus).context("checksum.modulus must be greater than 0")
	}
}
