// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Care coordination and telemedicine policies.

use super::{action_table, can_enter, can_perform};
use crate::Principal;

action_table! {
	/// Actions on a care plan.
	CareCoordinationAction, "care_coordination" {
		View => "view": [Doctor, Specialist, Nurse, Coordinator, Therapist, Caregiver],
		Plan => "plan": [Coordinator, Nurse, Doctor],
		Refer => "refer": [Doctor, Specialist, Coordinator],
		Discharge => "discharge": [Doctor],
	}
}

action_table! {
	/// Actions on a telemedicine session.
	TelemedicineAction, "telemedicine" {
		Start => "start": [Doctor, Specialist, Therapist],
		Join => "join": [Doctor, Specialist, Therapist, Nurse, Patient, Caregiver],
		ViewRecordings => "view_recordings": [Doctor, Specialist],
	}
}

/// Evaluates a care coordination action.
pub fn can_perform_care_coordination_action(principal: Option<&Principal>, action: &str) -> bool {
	can_perform::<CareCoordinationAction>(principal, action)
}

/// Returns true if the principal may perform any care coordination action.
pub fn can_enter_care_coordination(principal: Option<&Principal>) -> bool {
	can_enter::<CareCoordinationAction>(principal)
}

/// Evaluates a telemedicine action.
pub fn can_perform_telemedicine_action(principal: Option<&Principal>, action: &str) -> bool {
	can_perform::<TelemedicineAction>(principal, action)
}

/// Returns true if the principal may take part in telemedicine at all.
pub fn can_enter_telemedicine(principal: Option<&Principal>) -> bool {
	can_enter::<TelemedicineAction>(principal)
}
