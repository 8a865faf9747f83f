// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sources: environment variables and TOML files.

use std::path::PathBuf;

use tracing::{debug, trace};

use crate::error::ConfigError;
use crate::layer::GuardConfigLayer;
use crate::sections::{ConnectivityConfigLayer, RoutesConfigLayer, SectorsConfigLayer};

/// Source precedence levels (higher = overrides lower).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
	Defaults = 10,
	ConfigFile = 20,
	Environment = 50,
}

/// Trait for configuration sources.
pub trait ConfigSource: Send + Sync {
	fn name(&self) -> &'static str;
	fn precedence(&self) -> Precedence;
	fn load(&self) -> Result<GuardConfigLayer, ConfigError>;
}

/// Built-in defaults source.
pub struct DefaultsSource;

impl ConfigSource for DefaultsSource {
	fn name(&self) -> &'static str {
		"defaults"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Defaults
	}

	fn load(&self) -> Result<GuardConfigLayer, ConfigError> {
		debug!("loading defaults");
		Ok(GuardConfigLayer::default())
	}
}

/// TOML file configuration source.
pub struct TomlSource {
	path: PathBuf,
}

impl TomlSource {
	pub fn new(path: impl Into<PathBuf>) -> Self {
		Self { path: path.into() }
	}

	pub fn system() -> Self {
		Self::new("/etc/careflow/guard.toml")
	}
}

impl ConfigSource for TomlSource {
	fn name(&self) -> &'static str {
		"toml-config"
	}

	fn precedence(&self) -> Precedence {
		Precedence::ConfigFile
	}

	fn load(&self) -> Result<GuardConfigLayer, ConfigError> {
		if !self.path.exists() {
			debug!(path = %self.path.display(), "config file not found, skipping");
			return Ok(GuardConfigLayer::default());
		}

		debug!(path = %self.path.display(), "loading config file");
		let content = std::fs::read_to_string(&self.path).map_err(|e| ConfigError::FileRead {
			path: self.path.clone(),
			source: e,
		})?;

		let layer: GuardConfigLayer =
			toml::from_str(&content).map_err(|e| ConfigError::TomlParse {
				path: self.path.clone(),
				source: e,
			})?;

		trace!("parsed config layer from TOML");
		Ok(layer)
	}
}

/// Environment variable source.
///
/// Convention: CAREFLOW_GUARD_<FIELD>
pub struct EnvSource;

impl ConfigSource for EnvSource {
	fn name(&self) -> &'static str {
		"environment"
	}

	fn precedence(&self) -> Precedence {
		Precedence::Environment
	}

	fn load(&self) -> Result<GuardConfigLayer, ConfigError> {
		debug!("loading environment variables");
		Ok(GuardConfigLayer {
			routes: Some(load_routes_from_env()),
			connectivity: Some(load_connectivity_from_env()?),
			sectors: Some(load_sectors_from_env()?),
		})
	}
}

fn env_var(name: &str) -> Option<String> {
	std::env::var(name).ok().filter(|s| !s.is_empty())
}

fn env_u64(name: &str) -> Result<Option<u64>, ConfigError> {
	match env_var(name) {
		Some(v) => v.parse().map(Some).map_err(|_| ConfigError::InvalidValue {
			key: name.to_string(),
			message: format!("invalid u64 value '{v}'"),
		}),
		None => Ok(None),
	}
}

fn load_routes_from_env() -> RoutesConfigLayer {
	RoutesConfigLayer {
		login_path: env_var("CAREFLOW_GUARD_LOGIN_PATH"),
		unauthorized_path: env_var("CAREFLOW_GUARD_UNAUTHORIZED_PATH"),
		sectors_path: env_var("CAREFLOW_GUARD_SECTORS_PATH"),
		offline_banner: env_var("CAREFLOW_GUARD_OFFLINE_BANNER"),
		patient_banner: env_var("CAREFLOW_GUARD_PATIENT_BANNER"),
	}
}

fn load_connectivity_from_env() -> Result<ConnectivityConfigLayer, ConfigError> {
	Ok(ConnectivityConfigLayer {
		health_url: env_var("CAREFLOW_GUARD_HEALTH_URL"),
		probe_timeout_ms: env_u64("CAREFLOW_GUARD_PROBE_TIMEOUT_MS")?,
	})
}

fn load_sectors_from_env() -> Result<SectorsConfigLayer, ConfigError> {
	Ok(SectorsConfigLayer {
		cache_ttl_secs: env_u64("CAREFLOW_GUARD_SECTOR_CACHE_TTL_SECS")?,
	})
}
