// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Clinical documentation, assessment and fluid-balance policies.

use super::{action_table, can_enter, can_perform};
use crate::Principal;

action_table! {
	/// Actions on clinical notes.
	ClinicalDocumentationAction, "clinical_documentation" {
		Create => "create": [Doctor, Specialist, Nurse, Therapist],
		Modify => "modify": [Doctor, Specialist, Nurse],
		Finalize => "finalize": [Doctor, Specialist],
		View => "view": [Doctor, Specialist, Nurse, Therapist, MedicalAssistant, Student],
	}
}

action_table! {
	/// Clinical assessment stages.
	ClinicalAssessmentAction, "clinical_assessment" {
		Initial => "initial": [Doctor, Specialist, Nurse],
		Ongoing => "ongoing": [Doctor, Specialist, Nurse, Therapist],
	}
}

action_table! {
	/// Intake/output charting.
	FluidBalanceAction, "fluid_balance" {
		Record => "record": [Nurse, MedicalAssistant],
		View => "view": [Doctor, Specialist, Nurse, MedicalAssistant],
		Validate => "validate": [Doctor, Nurse],
	}
}

/// Evaluates a clinical documentation action.
pub fn can_perform_clinical_documentation_action(
	principal: Option<&Principal>,
	action: &str,
) -> bool {
	can_perform::<ClinicalDocumentationAction>(principal, action)
}

/// Returns true if the principal may perform any documentation action.
pub fn can_enter_clinical_documentation(principal: Option<&Principal>) -> bool {
	can_enter::<ClinicalDocumentationAction>(principal)
}

/// Evaluates a clinical assessment action.
pub fn can_perform_clinical_assessment_action(principal: Option<&Principal>, action: &str) -> bool {
	can_perform::<ClinicalAssessmentAction>(principal, action)
}

/// Returns true if the principal may perform any assessment.
pub fn can_enter_clinical_assessment(principal: Option<&Principal>) -> bool {
	can_enter::<ClinicalAssessmentAction>(principal)
}

/// Evaluates a fluid-balance action.
pub fn can_perform_fluid_balance_action(principal: Option<&Principal>, action: &str) -> bool {
	can_perform::<FluidBalanceAction>(principal, action)
}

/// Returns true if the principal may perform any fluid-balance action.
pub fn can_enter_fluid_balance(principal: Option<&Principal>) -> bool {
	can_enter::<FluidBalanceAction>(principal)
}
