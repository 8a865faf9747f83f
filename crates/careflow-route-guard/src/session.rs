// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use async_trait::async_trait;
use careflow_auth::{can_access_patient_data, has_permission, Principal};
use serde::{Deserialize, Serialize};

use crate::error::GuardResult;

pub const DEFAULT_LANGUAGE: &str = "en";

/// Immutable view of the session for one navigation decision.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
	pub principal: Option<Principal>,
	pub is_authenticated: bool,
	pub is_loading: bool,
	pub language: String,
}

impl SessionSnapshot {
	pub fn authenticated(principal: Principal) -> Self {
		Self {
			principal: Some(principal),
			is_authenticated: true,
			is_loading: false,
			language: DEFAULT_LANGUAGE.to_string(),
		}
	}

	pub fn unauthenticated() -> Self {
		Self {
			principal: None,
			is_authenticated: false,
			is_loading: false,
			language: DEFAULT_LANGUAGE.to_string(),
		}
	}

	pub fn loading() -> Self {
		Self {
			is_loading: true,
			..Self::unauthenticated()
		}
	}

	pub fn with_language(mut self, language: impl Into<String>) -> Self {
		self.language = language.into();
		self
	}

	/// The principal, if the session is authenticated and carries one.
	pub fn authenticated_principal(&self) -> Option<&Principal> {
		if self.is_authenticated {
			self.principal.as_ref()
		} else {
			None
		}
	}

	pub fn has_permission(&self, permission: &str) -> bool {
		has_permission(self.authenticated_principal(), permission)
	}

	pub fn can_access_patient_data(&self, patient_id: &str) -> bool {
		can_access_patient_data(self.authenticated_principal(), patient_id)
	}
}

/// Source of session state.
///
/// An `Err` means the provider itself could not be reached, which is
/// different from reporting an unauthenticated session.
#[async_trait]
pub trait SessionProvider: Send + Sync {
	async fn snapshot(&self) -> GuardResult<SessionSnapshot>;
}
