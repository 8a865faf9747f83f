// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Audit records for access-control events.
//!
//! Entries are built here and handed to an external sink; storage is not this
//! crate's concern. Every denial issued by the route guard produces exactly
//! one [`AuditLogEntry`] of type [`AuditEventType::AccessDenied`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{PrincipalId, Role};

/// Types of events that can be recorded in the audit log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
	// Session events
	/// Principal logged in.
	Login,
	/// Principal logged out.
	Logout,

	// Access control events
	/// Navigation into a protected region was allowed.
	AccessGranted,
	/// Navigation into a protected region was denied.
	AccessDenied,
	/// Content was rendered without a reachable session provider.
	OfflineFallback,

	// Sector events
	/// Principal selected an operational sector.
	SectorSelected,
	/// Sector selection was cleared at logout.
	SectorCleared,
}

impl std::fmt::Display for AuditEventType {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			AuditEventType::Login => "login",
			AuditEventType::Logout => "logout",
			AuditEventType::AccessGranted => "access_granted",
			AuditEventType::AccessDenied => "access_denied",
			AuditEventType::OfflineFallback => "offline_fallback",
			AuditEventType::SectorSelected => "sector_selected",
			AuditEventType::SectorCleared => "sector_cleared",
		};
		write!(f, "{s}")
	}
}

/// An entry in the audit log recording an access-control event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLogEntry {
	/// Unique identifier for this audit entry.
	pub id: Uuid,
	/// When the event occurred.
	pub timestamp: DateTime<Utc>,
	/// The type of event.
	pub event_type: AuditEventType,
	/// The principal involved, if known.
	pub actor_id: Option<PrincipalId>,
	/// The principal's role at the time of the event.
	pub actor_role: Option<Role>,
	/// The navigation path or resource involved.
	pub resource: Option<String>,
	/// Human-readable description of the action.
	pub action: String,
	/// Additional event-specific details.
	pub details: serde_json::Value,
}

impl AuditLogEntry {
	/// Create a new audit log builder for the given event type.
	pub fn builder(event_type: AuditEventType) -> AuditLogBuilder {
		AuditLogBuilder::new(event_type)
	}
}

/// Builder for constructing audit log entries with a fluent API.
#[derive(Debug, Clone)]
pub struct AuditLogBuilder {
	event_type: AuditEventType,
	actor_id: Option<PrincipalId>,
	actor_role: Option<Role>,
	resource: Option<String>,
	action: Option<String>,
	details: serde_json::Value,
}

impl AuditLogBuilder {
	/// Create a new builder for the given event type.
	pub fn new(event_type: AuditEventType) -> Self {
		Self {
			event_type,
			actor_id: None,
			actor_role: None,
			resource: None,
			action: None,
			details: serde_json::Value::Null,
		}
	}

	/// Set the principal involved.
	pub fn actor(mut self, id: PrincipalId, role: Role) -> Self {
		self.actor_id = Some(id);
		self.actor_role = Some(role);
		self
	}

	/// Set the path or resource involved.
	pub fn resource(mut self, resource: impl Into<String>) -> Self {
		self.resource = Some(resource.into());
		self
	}

	/// Set the human-readable action description.
	pub fn action(mut self, action: impl Into<String>) -> Self {
		self.action = Some(action.into());
		self
	}

	/// Set additional event-specific details.
	pub fn details(mut self, details: serde_json::Value) -> Self {
		self.details = details;
		self
	}

	/// Build the audit log entry.
	pub fn build(self) -> AuditLogEntry {
		AuditLogEntry {
			id: Uuid::new_v4(),
			timestamp: Utc::now(),
			event_type: self.event_type,
			actor_id: self.actor_id,
			actor_role: self.actor_role,
			resource: self.resource,
			action: self.action.unwrap_or_else(|| self.event_type.to_string()),
			details: self.details,
		}
	}
}
