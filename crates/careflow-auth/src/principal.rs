// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The principal being evaluated.
//!
//! A [`Principal`] is an immutable snapshot taken from the session provider.
//! Evaluators only ever borrow it; nothing in this crate mutates one after
//! construction.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{AccountStatus, ApprovalStatus, PrincipalId, Role};

/// Attributes describing the principal requesting access.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
	pub id: PrincipalId,
	pub role: Role,
	/// Grants on top of the role's catalog entry.
	#[serde(default)]
	pub permissions: BTreeSet<String>,
	#[serde(default)]
	pub approval_status: ApprovalStatus,
	#[serde(default)]
	pub account_status: AccountStatus,
}

impl Principal {
	/// Creates a principal with no extra grants.
	pub fn new(id: impl Into<PrincipalId>, role: Role) -> Self {
		Self {
			id: id.into(),
			role,
			permissions: BTreeSet::new(),
			approval_status: ApprovalStatus::default(),
			account_status: AccountStatus::default(),
		}
	}

	/// Builder: add an extra permission grant.
	pub fn with_permission(mut self, permission: impl Into<String>) -> Self {
		self.permissions.insert(permission.into());
		self
	}

	/// Builder: set approval status.
	pub fn with_approval_status(mut self, status: ApprovalStatus) -> Self {
		self.approval_status = status;
		self
	}

	/// Builder: set account status.
	pub fn with_account_status(mut self, status: AccountStatus) -> Self {
		self.account_status = status;
		self
	}

	/// Returns true if the principal's role bypasses permission checks.
	pub fn is_superuser(&self) -> bool {
		self.role.is_superuser()
	}
}
