// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Backend reachability probe settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_HEALTH_URL: &str = "http://localhost:8080/health";
pub const DEFAULT_PROBE_TIMEOUT_MS: u64 = 3000;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ConnectivityConfigLayer {
	pub health_url: Option<String>,
	pub probe_timeout_ms: Option<u64>,
}

impl ConnectivityConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.health_url.is_some() {
			self.health_url = other.health_url;
		}
		if other.probe_timeout_ms.is_some() {
			self.probe_timeout_ms = other.probe_timeout_ms;
		}
	}

	pub fn finalize(self) -> ConnectivityConfig {
		ConnectivityConfig {
			health_url: self
				.health_url
				.unwrap_or_else(|| DEFAULT_HEALTH_URL.to_string()),
			probe_timeout: Duration::from_millis(
				self.probe_timeout_ms.unwrap_or(DEFAULT_PROBE_TIMEOUT_MS),
			),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConnectivityConfig {
	pub health_url: String,
	pub probe_timeout: Duration,
}

impl Default for ConnectivityConfig {
	fn default() -> Self {
		ConnectivityConfigLayer::default().finalize()
	}
}
