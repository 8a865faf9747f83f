// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Medication policies.
//!
//! Prescribing is reserved for doctors and specialists, dispensing for
//! pharmacists. Nurses administer but never prescribe.

use super::{action_table, can_enter, can_perform};
use crate::Principal;

action_table! {
	/// Actions on a patient's medications.
	MedicationAction, "medication" {
		Administer => "administer": [Nurse, Doctor, Specialist],
		Prescribe => "prescribe": [Doctor, Specialist],
		Dispense => "dispense": [Pharmacist],
		View => "view": [Doctor, Specialist, Nurse, Pharmacist, MedicalAssistant],
	}
}

/// Evaluates a medication action.
pub fn can_perform_medication_action(principal: Option<&Principal>, action: &str) -> bool {
	can_perform::<MedicationAction>(principal, action)
}

/// Returns true if the principal may perform any medication action.
pub fn can_enter_medications(principal: Option<&Principal>) -> bool {
	can_enter::<MedicationAction>(principal)
}
