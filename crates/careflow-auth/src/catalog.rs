// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Static role → permission catalog.
//!
//! The catalog is read-only. A role with no entry resolves to the empty set,
//! so lookups never fail and never allow by accident.

use std::collections::BTreeSet;

use crate::permission::*;
use crate::{Principal, Role};

const SUPERUSER: &[&str] = &[ALL];

const PHYSICIAN: &[&str] = &[
	VIEW_PATIENTS,
	EDIT_PATIENTS,
	VIEW_MEDICAL_RECORDS,
	EDIT_MEDICAL_RECORDS,
	PRESCRIBE_MEDICATIONS,
	VIEW_MEDICATIONS,
	CREATE_ORDERS,
	VIEW_ORDERS,
	VIEW_LAB_RESULTS,
	VIEW_IMAGING,
	VIEW_VITALS,
	MANAGE_CARE_PLANS,
	VIEW_CARE_PLANS,
	VIEW_APPOINTMENTS,
	TELEMEDICINE,
	TRIAGE,
];

const NURSE: &[&str] = &[
	VIEW_PATIENTS,
	VIEW_MEDICAL_RECORDS,
	ADMINISTER_MEDICATIONS,
	VIEW_MEDICATIONS,
	VIEW_ORDERS,
	RECORD_VITALS,
	VIEW_VITALS,
	MANAGE_TASKS,
	VIEW_TASKS,
	VIEW_CARE_PLANS,
	VIEW_APPOINTMENTS,
	TRIAGE,
];

const PHARMACIST: &[&str] = &[
	VIEW_PATIENTS,
	VIEW_MEDICATIONS,
	DISPENSE_MEDICATIONS,
	VIEW_ORDERS,
];

const LAB_TECHNICIAN: &[&str] = &[VIEW_ORDERS, CREATE_LAB_RESULTS, VIEW_LAB_RESULTS];

const RADIOLOGY_TECHNICIAN: &[&str] = &[VIEW_ORDERS, VIEW_IMAGING, CREATE_IMAGING_REPORTS];

const RADIOLOGIST: &[&str] = &[
	VIEW_PATIENTS,
	VIEW_MEDICAL_RECORDS,
	VIEW_ORDERS,
	VIEW_IMAGING,
	CREATE_IMAGING_REPORTS,
];

const ADMINISTRATIVE: &[&str] = &[
	VIEW_PATIENTS,
	CREATE_PATIENTS,
	EDIT_PATIENTS,
	MANAGE_APPOINTMENTS,
	VIEW_APPOINTMENTS,
	VIEW_BILLING,
	MANAGE_BILLING,
	VIEW_REPORTS,
];

const RECEPTIONIST: &[&str] = &[
	VIEW_PATIENTS,
	CREATE_PATIENTS,
	MANAGE_APPOINTMENTS,
	VIEW_APPOINTMENTS,
];

const THERAPIST: &[&str] = &[
	VIEW_PATIENTS,
	VIEW_MEDICAL_RECORDS,
	VIEW_CARE_PLANS,
	VIEW_APPOINTMENTS,
	TELEMEDICINE,
];

const COORDINATOR: &[&str] = &[
	VIEW_PATIENTS,
	VIEW_CARE_PLANS,
	MANAGE_CARE_PLANS,
	VIEW_APPOINTMENTS,
	MANAGE_APPOINTMENTS,
];

const PATIENT: &[&str] = &[VIEW_OWN_RECORDS, VIEW_APPOINTMENTS, TELEMEDICINE];

const CAREGIVER: &[&str] = &[VIEW_APPOINTMENTS, VIEW_CARE_PLANS];

const STUDENT: &[&str] = &[VIEW_MEDICAL_RECORDS, VIEW_CARE_PLANS];

const RESEARCHER: &[&str] = &[VIEW_RESEARCH_DATA, VIEW_REPORTS];

const INSURANCE_STAFF: &[&str] = &[VIEW_BILLING, VIEW_REPORTS];

const MEDICAL_ASSISTANT: &[&str] = &[
	VIEW_PATIENTS,
	RECORD_VITALS,
	VIEW_VITALS,
	VIEW_APPOINTMENTS,
	VIEW_MEDICATIONS,
];

/// Returns the base permissions granted to `role`.
///
/// `guest`, `nurse_technician` and unrecognized roles have no entry and get
/// the empty slice.
pub fn role_permissions(role: Role) -> &'static [&'static str] {
	match role {
		Role::Admin | Role::SystemAdministrator => SUPERUSER,
		Role::Doctor | Role::Specialist => PHYSICIAN,
		Role::Nurse => NURSE,
		Role::Pharmacist => PHARMACIST,
		Role::LabTechnician => LAB_TECHNICIAN,
		Role::RadiologyTechnician => RADIOLOGY_TECHNICIAN,
		Role::Radiologist => RADIOLOGIST,
		Role::Administrative => ADMINISTRATIVE,
		Role::Receptionist => RECEPTIONIST,
		Role::Therapist => THERAPIST,
		Role::Coordinator => COORDINATOR,
		Role::Patient => PATIENT,
		Role::Caregiver => CAREGIVER,
		Role::Student => STUDENT,
		Role::Researcher => RESEARCHER,
		Role::InsuranceStaff => INSURANCE_STAFF,
		Role::MedicalAssistant => MEDICAL_ASSISTANT,
		// TODO: give nurse_technician a catalog entry once its permission set is agreed;
		// it is only referenced by the patient redirect table today.
		Role::Guest | Role::NurseTechnician | Role::Unrecognized => &[],
	}
}

/// Computes `role_permissions(principal.role) ∪ principal.permissions`.
///
/// Recomputed on every call; the result borrows from the principal and the
/// static catalog and is never cached.
pub fn effective_permissions<'a>(principal: &'a Principal) -> BTreeSet<&'a str> {
	let base: &'a [&'a str] = role_permissions(principal.role);
	base
		.iter()
		.copied()
		.chain(principal.permissions.iter().map(String::as_str))
		.collect()
}
