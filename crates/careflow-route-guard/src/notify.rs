// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound ports for user-visible notifications and audit entries.

use std::sync::Arc;

use async_trait::async_trait;
use careflow_auth::AuditLogEntry;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GuardResult;

pub const DENIAL_ICON: &str = "lock";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
	Info,
	Warning,
	Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
	pub message: String,
	pub description: Option<String>,
	pub severity: Severity,
	pub icon: Option<String>,
}

impl Notification {
	pub fn access_denied(description: impl Into<String>) -> Self {
		Self {
			message: "Access denied".to_string(),
			description: Some(description.into()),
			severity: Severity::Error,
			icon: Some(DENIAL_ICON.to_string()),
		}
	}
}

/// Fire-and-forget sink for user-visible notifications.
pub trait NotificationSink: Send + Sync {
	fn notify(&self, notification: Notification);
}

/// Discards notifications.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopNotificationSink;

impl NotificationSink for NoopNotificationSink {
	fn notify(&self, _notification: Notification) {}
}

/// Destination for audit entries.
#[async_trait]
pub trait AuditSink: Send + Sync {
	fn name(&self) -> &str;

	async fn publish(&self, entry: Arc<AuditLogEntry>) -> GuardResult<()>;
}

/// Emits audit entries as structured `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingAuditSink;

#[async_trait]
impl AuditSink for TracingAuditSink {
	fn name(&self) -> &str {
		"tracing"
	}

	async fn publish(&self, entry: Arc<AuditLogEntry>) -> GuardResult<()> {
		info!(
			target: "careflow::audit",
			audit_id = %entry.id,
			event_type = %entry.event_type,
			actor_id = entry.actor_id.as_ref().map(|id| id.as_str()),
			actor_role = entry.actor_role.as_ref().map(|r| r.as_str()),
			resource = entry.resource.as_deref(),
			action = %entry.action,
			details = %entry.details,
			"audit event"
		);
		Ok(())
	}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopAuditSink;

#[async_trait]
impl AuditSink for NoopAuditSink {
	fn name(&self) -> &str {
		"noop"
	}

	async fn publish(&self, _entry: Arc<AuditLogEntry>) -> GuardResult<()> {
		Ok(())
	}
}
