// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use careflow_auth::Role;
use serde::{Deserialize, Serialize};

use crate::decision::AccessDecision;

/// States of the guard for a single navigation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuardState {
	Init,
	AwaitingSession,
	AwaitingConnectivity,
	Offline,
	Unauthenticated,
	Authenticated,
	SectorRequired,
	RoleRedirect,
	PermissionDenied,
	RoleDenied,
	Authorized,
}

impl GuardState {
	pub fn as_str(&self) -> &'static str {
		match self {
			GuardState::Init => "init",
			GuardState::AwaitingSession => "awaiting_session",
			GuardState::AwaitingConnectivity => "awaiting_connectivity",
			GuardState::Offline => "offline",
			GuardState::Unauthenticated => "unauthenticated",
			GuardState::Authenticated => "authenticated",
			GuardState::SectorRequired => "sector_required",
			GuardState::RoleRedirect => "role_redirect",
			GuardState::PermissionDenied => "permission_denied",
			GuardState::RoleDenied => "role_denied",
			GuardState::Authorized => "authorized",
		}
	}

	/// States in which evaluation stops.
	pub fn is_terminal(&self) -> bool {
		!matches!(
			self,
			GuardState::Init | GuardState::AwaitingConnectivity | GuardState::Authenticated
		)
	}
}

impl std::fmt::Display for GuardState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Which declared requirement failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DenialReason {
	MissingPermission { permission: String },
	WrongRole { required: Role, actual: Role },
}

impl std::fmt::Display for DenialReason {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			DenialReason::MissingPermission { permission } => {
				write!(f, "missing permission {permission}")
			}
			DenialReason::WrongRole { required, actual } => {
				write!(f, "requires role {required}, principal has {actual}")
			}
		}
	}
}

/// An attributable denial, turned into one notification and one audit entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Denial {
	pub path: String,
	pub reason: DenialReason,
}

/// Result of evaluating one navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Evaluation {
	pub decision: AccessDecision,
	/// Terminal state.
	pub state: GuardState,
	/// Every state visited, in order, ending with `state`.
	pub trail: Vec<GuardState>,
	pub denial: Option<Denial>,
}

impl Evaluation {
	pub fn is_offline_fallback(&self) -> bool {
		self.state == GuardState::Offline
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn transit_states_are_not_terminal() {
		assert!(!GuardState::Init.is_terminal());
		assert!(!GuardState::AwaitingConnectivity.is_terminal());
		assert!(!GuardState::Authenticated.is_terminal());
		assert!(GuardState::AwaitingSession.is_terminal());
		assert!(GuardState::Authorized.is_terminal());
		assert!(GuardState::PermissionDenied.is_terminal());
	}

	#[test]
	fn denial_reason_describes_failure() {
		let reason = DenialReason::WrongRole {
			required: Role::Pharmacist,
			actual: Role::Nurse,
		};
		assert_eq!(
			reason.to_string(),
			"requires role pharmacist, principal has nurse"
		);
	}
}
