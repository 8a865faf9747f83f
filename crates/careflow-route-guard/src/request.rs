// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use careflow_auth::Role;
use serde::{Deserialize, Serialize};

/// Requirements a protected region declares for entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequirement {
	pub required_permission: Option<String>,
	pub required_role: Option<Role>,
}

impl NavigationRequirement {
	pub fn none() -> Self {
		Self::default()
	}

	pub fn permission(permission: impl Into<String>) -> Self {
		Self {
			required_permission: Some(permission.into()),
			required_role: None,
		}
	}

	pub fn role(role: Role) -> Self {
		Self {
			required_permission: None,
			required_role: Some(role),
		}
	}

	pub fn is_empty(&self) -> bool {
		self.required_permission.is_none() && self.required_role.is_none()
	}
}

/// A single navigation attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
	pub path: String,
	#[serde(flatten)]
	pub requirement: NavigationRequirement,
}

impl NavigationRequest {
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			requirement: NavigationRequirement::none(),
		}
	}

	pub fn with_requirement(mut self, requirement: NavigationRequirement) -> Self {
		self.requirement = requirement;
		self
	}

	pub fn requiring_permission(mut self, permission: impl Into<String>) -> Self {
		self.requirement.required_permission = Some(permission.into());
		self
	}

	pub fn requiring_role(mut self, role: Role) -> Self {
		self.requirement.required_role = Some(role);
		self
	}
}
