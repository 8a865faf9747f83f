// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use thiserror::Error;

pub type GuardResult<T> = Result<T, GuardError>;

/// Failures of the guard's collaborators.
///
/// None of these escape [`RouteGuard::navigate`](crate::RouteGuard::navigate);
/// they are folded into an access decision there.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
	#[error("session provider unavailable: {0}")]
	SessionProviderUnavailable(String),

	#[error("connectivity check failed: {0}")]
	ConnectivityCheckFailed(String),

	#[error("sector directory error: {0}")]
	SectorDirectory(String),

	#[error(transparent)]
	Sector(#[from] SectorError),

	#[error("audit sink error: {0}")]
	AuditSink(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SectorError {
	#[error("sector {current} is already selected for this session")]
	AlreadySelected { current: String },

	#[error("unknown sector: {id}")]
	UnknownSector { id: String },
}
