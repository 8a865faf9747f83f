// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Role catalog and permission evaluation for Careflow.
//!
//! This crate is the pure half of clinical access control:
//!
//! - [`catalog`]: static role → permission table with default-deny lookup
//! - [`evaluator`]: [`has_permission`] and [`can_access_patient_data`]
//! - [`policies`]: closed `(role, action)` whitelists per clinical domain
//! - [`audit`]: audit entries for access decisions
//!
//! Nothing here performs I/O or returns errors. Unknown roles, permissions and
//! actions all resolve to denial.
//!
//! ```
//! use careflow_auth::{has_permission, policies, Principal, Role};
//!
//! let nurse = Principal::new("n-1", Role::Nurse);
//! assert!(has_permission(Some(&nurse), "administer_medications"));
//! assert!(!policies::can_perform_medication_action(Some(&nurse), "prescribe"));
//! ```

pub mod audit;
pub mod catalog;
pub mod evaluator;
pub mod permission;
pub mod policies;
mod principal;
mod types;

pub use audit::{AuditEventType, AuditLogBuilder, AuditLogEntry};
pub use catalog::{effective_permissions, role_permissions};
pub use evaluator::{can_access_patient_data, has_permission};
pub use policies::{DomainAction, UnknownAction};
pub use principal::Principal;
pub use types::{AccountStatus, ApprovalStatus, PrincipalId, Role};
