// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redirect targets and banner texts.

use serde::{Deserialize, Serialize};

pub const DEFAULT_LOGIN_PATH: &str = "/login";
pub const DEFAULT_UNAUTHORIZED_PATH: &str = "/unauthorized";
pub const DEFAULT_SECTORS_PATH: &str = "/sectors";
pub const DEFAULT_OFFLINE_BANNER: &str =
	"You are offline. Content is shown from the last known session and may be out of date.";
pub const DEFAULT_PATIENT_BANNER: &str =
	"This portal shows your own health information only. Contact your care team with questions.";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct RoutesConfigLayer {
	pub login_path: Option<String>,
	pub unauthorized_path: Option<String>,
	pub sectors_path: Option<String>,
	pub offline_banner: Option<String>,
	pub patient_banner: Option<String>,
}

impl RoutesConfigLayer {
	pub fn merge(&mut self, other: Self) {
		if other.login_path.is_some() {
			self.login_path = other.login_path;
		}
		if other.unauthorized_path.is_some() {
			self.unauthorized_path = other.unauthorized_path;
		}
		if other.sectors_path.is_some() {
			self.sectors_path = other.sectors_path;
		}
		if other.offline_banner.is_some() {
			self.offline_banner = other.offline_banner;
		}
		if other.patient_banner.is_some() {
			self.patient_banner = other.patient_banner;
		}
	}

	pub fn finalize(self) -> RoutesConfig {
		RoutesConfig {
			login_path: self
				.login_path
				.unwrap_or_else(|| DEFAULT_LOGIN_PATH.to_string()),
			unauthorized_path: self
				.unauthorized_path
				.unwrap_or_else(|| DEFAULT_UNAUTHORIZED_PATH.to_string()),
			sectors_path: self
				.sectors_path
				.unwrap_or_else(|| DEFAULT_SECTORS_PATH.to_string()),
			offline_banner: self
				.offline_banner
				.unwrap_or_else(|| DEFAULT_OFFLINE_BANNER.to_string()),
			patient_banner: self
				.patient_banner
				.unwrap_or_else(|| DEFAULT_PATIENT_BANNER.to_string()),
		}
	}
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutesConfig {
	pub login_path: String,
	pub unauthorized_path: String,
	pub sectors_path: String,
	pub offline_banner: String,
	pub patient_banner: String,
}

impl Default for RoutesConfig {
	fn default() -> Self {
		RoutesConfigLayer::default().finalize()
	}
}
