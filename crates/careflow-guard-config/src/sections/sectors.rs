// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Sector directory cache settings.

use std::time::Duration;

use serde::{Deserialize, Serialize};

pub const DEFAULT_SECTOR_CACHE_TTL_SECS: u64 = 300;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SectorsConfigLayer {
	pub cache_ttl_secs: Option<u64>,
}

impl SectorsConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.cache_ttl_secs.is_some() {
			self.cache_ttl_secs = other.cache_ttl_secs;
		}
	}

	pub fn finalize(self) -> SectorsConfig {
		SectorsConfig {
			cache_ttl: Duration::from_secs(
				self.cache_ttl_secs.unwrap_or(DEFAULT_SECTOR_CACHE_TTL_SECS),
			),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct SectorsConfig {
	pub cache_ttl: Duration,
}

impl Default for SectorsConfig {
	fn default() -> Self {
		SectorsConfigLayer::default().finalize()
	}
}
