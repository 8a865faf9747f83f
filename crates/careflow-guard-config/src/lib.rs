// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration for the Careflow route guard.
//!
//! This crate provides:
//! - Layered configuration from multiple sources (defaults, TOML file, environment)
//! - Type-safe configuration with validation
//! - Consistent environment variable naming (`CAREFLOW_GUARD_*`)
//!
//! # Usage
//!
//! ```ignore
//! use careflow_guard_config::load_config;
//!
//! let config = load_config()?;
//! println!("unauthenticated users go to {}", config.routes.login_path);
//! ```

pub mod error;
pub mod layer;
pub mod sections;
pub mod sources;

pub use error::ConfigError;
pub use layer::GuardConfigLayer;
pub use sections::*;
pub use sources::{ConfigSource, DefaultsSource, EnvSource, Precedence, TomlSource};

use tracing::{debug, info};

/// Fully resolved guard configuration.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GuardConfig {
	pub routes: RoutesConfig,
	pub connectivity: ConnectivityConfig,
	pub sectors: SectorsConfig,
}

/// Load configuration from all sources with standard precedence.
///
/// Precedence (highest to lowest):
/// 1. Environment variables (`CAREFLOW_GUARD_*`)
/// 2. Config file (`/etc/careflow/guard.toml`)
/// 3. Built-in defaults
pub fn load_config() -> Result<GuardConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::system()),
		Box::new(EnvSource),
	])
}

/// Load configuration from environment only (for testing or simple deployments).
pub fn load_config_from_env() -> Result<GuardConfig, ConfigError> {
	load_from_sources(vec![Box::new(DefaultsSource), Box::new(EnvSource)])
}

/// Load configuration with a custom config file path.
pub fn load_config_with_file(
	config_path: impl Into<std::path::PathBuf>,
) -> Result<GuardConfig, ConfigError> {
	load_from_sources(vec![
		Box::new(DefaultsSource),
		Box::new(TomlSource::new(config_path)),
		Box::new(EnvSource),
	])
}

fn load_from_sources(mut sources: Vec<Box<dyn ConfigSource>>) -> Result<GuardConfig, ConfigError> {
	sources.sort_by_key(|s| s.precedence());

	let mut merged = GuardConfigLayer::default();
	for source in sources {
		debug!(source = source.name(), "loading configuration source");
		let layer = source.load()?;
		merged.merge(layer);
	}

	finalize(merged)
}

/// Finalize configuration layer into resolved config.
pub fn finalize(layer: GuardConfigLayer) -> Result<GuardConfig, ConfigError> {
	let config = GuardConfig {
		routes: layer.routes.unwrap_or_default().finalize(),
		connectivity: layer.connectivity.unwrap_or_default().finalize(),
		sectors: layer.sectors.unwrap_or_default().finalize(),
	};

	validate_config(&config)?;

	info!(
		login_path = %config.routes.login_path,
		unauthorized_path = %config.routes.unauthorized_path,
		sectors_path = %config.routes.sectors_path,
		health_url = %config.connectivity.health_url,
		probe_timeout_ms = config.connectivity.probe_timeout.as_millis() as u64,
		sector_cache_ttl_secs = config.sectors.cache_ttl.as_secs(),
		"Guard configuration loaded"
	);

	Ok(config)
}

/// Validate cross-field configuration rules.
fn validate_config(config: &GuardConfig) -> Result<(), ConfigError> {
	let routes = &config.routes;
	for (key, path) in [
		("login_path", &routes.login_path),
		("unauthorized_path", &routes.unauthorized_path),
		("sectors_path", &routes.sectors_path),
	] {
		if !path.starts_with('/') {
			return Err(ConfigError::Validation(format!(
				"{key} must be an absolute application path, got '{path}'"
			)));
		}
	}

	if config.connectivity.probe_timeout.is_zero() {
		return Err(ConfigError::Validation(
			"probe_timeout_ms must be greater than zero".to_string(),
		));
	}

	Ok(())
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::sync::Mutex;

	static ENV_MUTEX: Mutex<()> = Mutex::new(());

	fn with_env_vars<R>(vars: &[(&str, &str)], f: impl FnOnce() -> R) -> R {
		let _lock = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
		let original: Vec<_> = vars
			.iter()
			.map(|(k, _)| (*k, std::env::var(*k).ok()))
			.collect();

		for (k, v) in vars {
			std::env::set_var(k, v);
		}

		let result = f();

		for (k, original_val) in &original {
			match original_val {
				Some(v) => std::env::set_var(k, v),
				None => std::env::remove_var(k),
			}
		}

		result
	}

	#[test]
	fn test_defaults_validate() {
		let config = finalize(GuardConfigLayer::default()).unwrap();
		assert_eq!(config, GuardConfig::default());
		assert_eq!(config.routes.login_path, "/login");
		assert_eq!(config.connectivity.probe_timeout.as_millis(), 3000);
		assert_eq!(config.sectors.cache_ttl.as_secs(), 300);
	}

	#[test]
	fn test_relative_redirect_path_rejected() {
		let layer = GuardConfigLayer {
			routes: Some(RoutesConfigLayer {
				login_path: Some("login".to_string()),
				..Default::default()
			}),
			..Default::default()
		};
		let err = finalize(layer).unwrap_err();
		assert!(err.to_string().contains("login_path"));
	}

	#[test]
	fn test_zero_probe_timeout_rejected() {
		let layer = GuardConfigLayer {
			connectivity: Some(ConnectivityConfigLayer {
				probe_timeout_ms: Some(0),
				..Default::default()
			}),
			..Default::default()
		};
		assert!(matches!(finalize(layer), Err(ConfigError::Validation(_))));
	}

	#[test]
	fn test_env_overrides_defaults() {
		let config = with_env_vars(
			&[
				("CAREFLOW_GUARD_LOGIN_PATH", "/auth"),
				("CAREFLOW_GUARD_PROBE_TIMEOUT_MS", "750"),
			],
			load_config_from_env,
		)
		.unwrap();
		assert_eq!(config.routes.login_path, "/auth");
		assert_eq!(config.connectivity.probe_timeout.as_millis(), 750);
		assert_eq!(config.routes.sectors_path, "/sectors");
	}

	#[test]
	fn test_env_rejects_non_numeric_timeout() {
		let result = with_env_vars(
			&[("CAREFLOW_GUARD_PROBE_TIMEOUT_MS", "fast")],
			load_config_from_env,
		);
		assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
	}
}
