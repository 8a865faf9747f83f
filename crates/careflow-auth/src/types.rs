// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Core type definitions for clinical access control.
//!
//! - **Identity**: [`PrincipalId`] wraps the opaque identifier the session
//!   provider hands out. Patient ids in route paths are compared against it
//!   verbatim.
//! - **Roles**: [`Role`] is the closed set of clinical, administrative and
//!   external roles. Unknown role strings never fail to parse; they become
//!   [`Role::Unrecognized`], which holds no permissions.
//! - **Lifecycle**: [`ApprovalStatus`] and [`AccountStatus`] describe where a
//!   principal is in onboarding. They are carried for audit, not evaluated.

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Principal Identity
// =============================================================================

/// Identifier of a principal (a staff member, patient or other user).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
	/// Create a new ID from any string-like value.
	pub fn new(id: impl Into<String>) -> Self {
		Self(id.into())
	}

	/// Get the identifier as a string slice.
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Get the inner string value.
	pub fn into_inner(self) -> String {
		self.0
	}
}

impl fmt::Display for PrincipalId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}

impl From<&str> for PrincipalId {
	fn from(id: &str) -> Self {
		Self(id.to_string())
	}
}

impl From<String> for PrincipalId {
	fn from(id: String) -> Self {
		Self(id)
	}
}

// =============================================================================
// Roles
// =============================================================================

/// Roles a principal can hold. Exactly one role per principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Role {
	/// Full system access.
	Admin,
	/// Full system access, infrastructure operator.
	SystemAdministrator,
	/// Attending physician. Also parsed from `physician`.
	Doctor,
	Nurse,
	/// Appears in the patient redirect table but has no catalog entry.
	NurseTechnician,
	Pharmacist,
	LabTechnician,
	RadiologyTechnician,
	Radiologist,
	Specialist,
	Administrative,
	Receptionist,
	Therapist,
	Coordinator,
	Patient,
	Caregiver,
	Student,
	Guest,
	Researcher,
	InsuranceStaff,
	MedicalAssistant,
	/// Any role string not listed above.
	Unrecognized,
}

impl Role {
	/// Returns every known role, excluding [`Role::Unrecognized`].
	pub fn all() -> &'static [Role] {
		&[
			Role::Admin,
			Role::SystemAdministrator,
			Role::Doctor,
			Role::Nurse,
			Role::NurseTechnician,
			Role::Pharmacist,
			Role::LabTechnician,
			Role::RadiologyTechnician,
			Role::Radiologist,
			Role::Specialist,
			Role::Administrative,
			Role::Receptionist,
			Role::Therapist,
			Role::Coordinator,
			Role::Patient,
			Role::Caregiver,
			Role::Student,
			Role::Guest,
			Role::Researcher,
			Role::InsuranceStaff,
			Role::MedicalAssistant,
		]
	}

	/// Parses a role name. Never fails: unknown names map to [`Role::Unrecognized`].
	pub fn parse(name: &str) -> Role {
		match name {
			"admin" => Role::Admin,
			"system_administrator" => Role::SystemAdministrator,
			"doctor" | "physician" => Role::Doctor,
			"nurse" => Role::Nurse,
			"nurse_technician" => Role::NurseTechnician,
			"pharmacist" => Role::Pharmacist,
			"lab_technician" => Role::LabTechnician,
			"radiology_technician" => Role::RadiologyTechnician,
			"radiologist" => Role::Radiologist,
			"specialist" => Role::Specialist,
			"administrative" => Role::Administrative,
			"receptionist" => Role::Receptionist,
			"therapist" => Role::Therapist,
			"coordinator" => Role::Coordinator,
			"patient" => Role::Patient,
			"caregiver" => Role::Caregiver,
			"student" => Role::Student,
			"guest" => Role::Guest,
			"researcher" => Role::Researcher,
			"insurance_staff" => Role::InsuranceStaff,
			"medical_assistant" => Role::MedicalAssistant,
			_ => Role::Unrecognized,
		}
	}

	/// Canonical snake_case name.
	pub fn as_str(&self) -> &'static str {
		match self {
			Role::Admin => "admin",
			Role::SystemAdministrator => "system_administrator",
			Role::Doctor => "doctor",
			Role::Nurse => "nurse",
			Role::NurseTechnician => "nurse_technician",
			Role::Pharmacist => "pharmacist",
			Role::LabTechnician => "lab_technician",
			Role::RadiologyTechnician => "radiology_technician",
			Role::Radiologist => "radiologist",
			Role::Specialist => "specialist",
			Role::Administrative => "administrative",
			Role::Receptionist => "receptionist",
			Role::Therapist => "therapist",
			Role::Coordinator => "coordinator",
			Role::Patient => "patient",
			Role::Caregiver => "caregiver",
			Role::Student => "student",
			Role::Guest => "guest",
			Role::Researcher => "researcher",
			Role::InsuranceStaff => "insurance_staff",
			Role::MedicalAssistant => "medical_assistant",
			Role::Unrecognized => "unrecognized",
		}
	}

	/// Returns true for roles that bypass every permission check.
	pub fn is_superuser(&self) -> bool {
		matches!(self, Role::Admin | Role::SystemAdministrator)
	}
}

impl fmt::Display for Role {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl From<&str> for Role {
	fn from(name: &str) -> Self {
		Role::parse(name)
	}
}

impl From<String> for Role {
	fn from(name: String) -> Self {
		Role::parse(&name)
	}
}

impl From<Role> for String {
	fn from(role: Role) -> Self {
		role.as_str().to_string()
	}
}

// =============================================================================
// Account Lifecycle
// =============================================================================

/// Onboarding approval state of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
	#[default]
	Pending,
	Approved,
	Rejected,
}

impl fmt::Display for ApprovalStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ApprovalStatus::Pending => write!(f, "pending"),
			ApprovalStatus::Approved => write!(f, "approved"),
			ApprovalStatus::Rejected => write!(f, "rejected"),
		}
	}
}

/// Account state of a principal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
	#[default]
	Active,
	Inactive,
	Suspended,
}

impl fmt::Display for AccountStatus {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			AccountStatus::Active => write!(f, "active"),
			AccountStatus::Inactive => write!(f, "inactive"),
			AccountStatus::Suspended => write!(f, "suspended"),
		}
	}
}
