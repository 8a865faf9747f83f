// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Emergency care and triage policies.

use super::{action_table, can_enter, can_perform};
use crate::Principal;

action_table! {
	/// Actions in the emergency department.
	EmergencyCareAction, "emergency_care" {
		Triage => "triage": [Doctor, Nurse],
		Treatment => "treatment": [Doctor, Specialist],
		View => "view": [Doctor, Specialist, Nurse, MedicalAssistant],
	}
}

action_table! {
	/// Actions on a triage assessment.
	TriageAssessmentAction, "triage_assessment" {
		Perform => "perform": [Nurse, Doctor],
		View => "view": [Nurse, Doctor, Specialist, Receptionist],
		Override => "override": [Doctor],
	}
}

/// Evaluates an emergency care action.
pub fn can_perform_emergency_care_action(principal: Option<&Principal>, action: &str) -> bool {
	can_perform::<EmergencyCareAction>(principal, action)
}

/// Returns true if the principal may perform any emergency care action.
pub fn can_enter_emergency_care(principal: Option<&Principal>) -> bool {
	can_enter::<EmergencyCareAction>(principal)
}

/// Evaluates a triage assessment action.
pub fn can_perform_triage_assessment_action(principal: Option<&Principal>, action: &str) -> bool {
	can_perform::<TriageAssessmentAction>(principal, action)
}

/// Returns true if the principal may perform any triage action.
pub fn can_enter_triage_assessment(principal: Option<&Principal>) -> bool {
	can_enter::<TriageAssessmentAction>(principal)
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::Role;

	fn p(role: Role) -> Principal {
		Principal::new("p-1", role)
	}

	#[test]
	fn nurse_triages_but_does_not_treat() {
		let nurse = p(Role::Nurse);
		assert!(can_perform_emergency_care_action(Some(&nurse), "triage"));
		assert!(!can_perform_emergency_care_action(Some(&nurse), "treatment"));
	}

	#[test]
	fn specialist_treats_but_does_not_triage() {
		let specialist = p(Role::Specialist);
		assert!(can_perform_emergency_care_action(Some(&specialist), "treatment"));
		assert!(!can_perform_emergency_care_action(Some(&specialist), "triage"));
	}

	#[test]
	fn only_doctor_overrides_triage() {
		for role in Role::all() {
			assert_eq!(
				can_perform_triage_assessment_action(Some(&p(*role)), "override"),
				*role == Role::Doctor,
				"{role}"
			);
		}
	}

	#[test]
	fn receptionist_sees_triage_queue_only() {
		let receptionist = p(Role::Receptionist);
		assert!(can_perform_triage_assessment_action(Some(&receptionist), "view"));
		assert!(!can_perform_triage_assessment_action(Some(&receptionist), "perform"));
		assert!(can_enter_triage_assessment(Some(&receptionist)));
		assert!(!can_enter_emergency_care(Some(&receptionist)));
	}
}
