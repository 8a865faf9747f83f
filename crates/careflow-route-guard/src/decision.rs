// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Access decisions handed to the routing layer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BannerKind {
	/// Session provider unreachable; content rendered from last known state.
	Offline,
	/// Shown to principals with the `patient` role.
	PatientCompliance,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Banner {
	pub kind: BannerKind,
	pub text: String,
}

impl Banner {
	pub fn new(kind: BannerKind, text: impl Into<String>) -> Self {
		Self {
			kind,
			text: text.into(),
		}
	}
}

/// State carried along with a redirect.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedirectState {
	#[serde(rename = "returnUrl", skip_serializing_if = "Option::is_none")]
	pub return_url: Option<String>,
}

/// Exactly one of these is produced per navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccessDecision {
	/// Session still loading; show a placeholder and do not redirect.
	Loading,
	Render {
		banner: Option<Banner>,
	},
	RenderDegraded {
		banner: Banner,
	},
	Redirect {
		target: String,
		state: RedirectState,
		replace: bool,
	},
}

impl AccessDecision {
	pub(crate) fn redirect(target: impl Into<String>) -> Self {
		Self::Redirect {
			target: target.into(),
			state: RedirectState::default(),
			replace: true,
		}
	}

	pub(crate) fn redirect_returning(target: impl Into<String>, return_url: impl Into<String>) -> Self {
		Self::Redirect {
			target: target.into(),
			state: RedirectState {
				return_url: Some(return_url.into()),
			},
			replace: true,
		}
	}

	/// True when the requested content is shown, degraded or not.
	pub fn renders_content(&self) -> bool {
		matches!(self, Self::Render { .. } | Self::RenderDegraded { .. })
	}

	pub fn redirect_target(&self) -> Option<&str> {
		match self {
			Self::Redirect { target, .. } => Some(target),
			_ => None,
		}
	}
}
