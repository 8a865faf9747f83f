// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Permission evaluation.
//!
//! Every function here is pure and total: it takes an optional principal,
//! never panics, never returns an error, and resolves anything it does not
//! recognise to `false`. Evaluation runs in two phases:
//!
//! 1. **Superuser bypass**: `admin` and `system_administrator` are allowed
//!    unconditionally by [`has_permission`]. This is the one deliberate
//!    exception to the catalog model.
//! 2. **Effective set lookup**: the role's catalog entry united with the
//!    principal's own grants, recomputed per call.

use tracing::instrument;

use crate::catalog::effective_permissions;
use crate::permission::{ALL, VIEW_PATIENTS};
use crate::{Principal, Role};

/// Evaluates whether `principal` holds `permission`.
///
/// A missing principal is always denied. The wildcard [`ALL`] in the
/// effective set satisfies any permission.
#[instrument(
    level = "trace",
    skip(principal),
    fields(role = ?principal.map(|p| p.role))
)]
pub fn has_permission(principal: Option<&Principal>, permission: &str) -> bool {
	let Some(principal) = principal else {
		return false;
	};

	if principal.is_superuser() {
		return true;
	}

	let effective = effective_permissions(principal);
	effective.contains(ALL) || effective.contains(permission)
}

/// Evaluates whether `principal` may view the record of patient `patient_id`.
///
/// Clinical roles are always allowed. Patients see only their own record.
/// Administrative, lab and radiology roles need an explicit `view_patients`
/// grant. Everyone else is denied.
#[instrument(
    level = "trace",
    skip(principal),
    fields(role = ?principal.map(|p| p.role))
)]
pub fn can_access_patient_data(principal: Option<&Principal>, patient_id: &str) -> bool {
	let Some(principal) = principal else {
		return false;
	};

	match principal.role {
		Role::Doctor | Role::Nurse | Role::Specialist | Role::Admin => true,
		Role::Patient => principal.id.as_str() == patient_id,
		Role::Administrative
		| Role::LabTechnician
		| Role::RadiologyTechnician
		| Role::Radiologist => has_permission(Some(principal), VIEW_PATIENTS),
		_ => false,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::permission::*;

	fn principal(role: Role) -> Principal {
		Principal::new("p-1", role)
	}

	mod has_permission {
		use super::*;

		#[test]
		fn missing_principal_is_denied() {
			assert!(!has_permission(None, VIEW_PATIENTS));
			assert!(!has_permission(None, ALL));
			assert!(!has_permission(None, ""));
		}

		#[test]
		fn admin_bypasses_everything() {
			let admin = principal(Role::Admin);
			assert!(has_permission(Some(&admin), PRESCRIBE_MEDICATIONS));
			assert!(has_permission(Some(&admin), "not-a-real-permission"));
			assert!(has_permission(Some(&admin), ""));
		}

		#[test]
		fn system_administrator_bypasses_everything() {
			let sysadmin = principal(Role::SystemAdministrator);
			assert!(has_permission(Some(&sysadmin), DISPENSE_MEDICATIONS));
			assert!(has_permission(Some(&sysadmin), ALL));
		}

		#[test]
		fn nurse_has_catalog_permissions_only() {
			let nurse = principal(Role::Nurse);
			assert!(has_permission(Some(&nurse), ADMINISTER_MEDICATIONS));
			assert!(!has_permission(Some(&nurse), PRESCRIBE_MEDICATIONS));
			assert!(!has_permission(Some(&nurse), ALL));
		}

		#[test]
		fn extra_grants_are_honoured() {
			let guest = principal(Role::Guest).with_permission(VIEW_REPORTS);
			assert!(has_permission(Some(&guest), VIEW_REPORTS));
			assert!(!has_permission(Some(&guest), VIEW_PATIENTS));
		}

		#[test]
		fn wildcard_grant_satisfies_any_check() {
			let researcher = principal(Role::Researcher).with_permission(ALL);
			assert!(has_permission(Some(&researcher), PRESCRIBE_MEDICATIONS));
		}

		#[test]
		fn unrecognized_role_is_denied() {
			let unknown = principal(Role::Unrecognized);
			assert!(!has_permission(Some(&unknown), VIEW_PATIENTS));
		}
	}

	mod patient_data {
		use super::*;

		#[test]
		fn missing_principal_is_denied() {
			assert!(!can_access_patient_data(None, "42"));
		}

		#[test]
		fn clinical_roles_are_allowed() {
			for role in [Role::Doctor, Role::Nurse, Role::Specialist, Role::Admin] {
				assert!(can_access_patient_data(Some(&principal(role)), "42"), "{role}");
			}
		}

		#[test]
		fn patient_sees_only_own_record() {
			let patient = Principal::new("42", Role::Patient);
			assert!(can_access_patient_data(Some(&patient), "42"));
			assert!(!can_access_patient_data(Some(&patient), "43"));
			assert!(!can_access_patient_data(Some(&patient), ""));
		}

		#[test]
		fn lab_technician_needs_view_patients_grant() {
			let without = principal(Role::LabTechnician);
			let with = principal(Role::LabTechnician).with_permission(VIEW_PATIENTS);
			assert!(!can_access_patient_data(Some(&without), "42"));
			assert!(can_access_patient_data(Some(&with), "42"));
		}

		#[test]
		fn administrative_holds_view_patients_from_catalog() {
			assert!(can_access_patient_data(
				Some(&principal(Role::Administrative)),
				"42"
			));
		}

		#[test]
		fn other_roles_are_denied_even_with_grant() {
			for role in [
				Role::Receptionist,
				Role::Pharmacist,
				Role::Guest,
				Role::Caregiver,
				Role::SystemAdministrator,
				Role::NurseTechnician,
			] {
				let p = principal(role).with_permission(VIEW_PATIENTS);
				assert!(!can_access_patient_data(Some(&p), "42"), "{role}");
			}
		}
	}

	mod property_tests {
		use super::*;
		use proptest::prelude::*;

		fn arb_role() -> impl Strategy<Value = Role> {
			proptest::sample::select(Role::all().to_vec())
		}

		proptest! {
			#[test]
			fn missing_principal_never_has_permission(permission in ".*") {
				prop_assert!(!has_permission(None, &permission));
			}

			#[test]
			fn superusers_hold_every_permission(
				permission in ".*",
				superuser in prop_oneof![Just(Role::Admin), Just(Role::SystemAdministrator)],
			) {
				let p = Principal::new("root", superuser);
				prop_assert!(has_permission(Some(&p), &permission));
			}

			#[test]
			fn patient_access_is_identity_match(own in "[a-z0-9-]{1,12}", other in "[a-z0-9-]{0,12}") {
				let patient = Principal::new(own.clone(), Role::Patient);
				prop_assert!(can_access_patient_data(Some(&patient), &own));
				prop_assert_eq!(can_access_patient_data(Some(&patient), &other), own == other);
			}

			#[test]
			fn evaluation_is_idempotent(role in arb_role(), permission in "[a-z_]{0,24}") {
				let p = Principal::new("p", role);
				let snapshot = p.clone();
				let first = has_permission(Some(&p), &permission);
				let second = has_permission(Some(&p), &permission);
				prop_assert_eq!(first, second);
				prop_assert_eq!(&p, &snapshot);
			}
		}
	}
}
