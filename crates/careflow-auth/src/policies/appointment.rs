// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Appointment scheduling policies.

use super::{action_table, can_enter, can_perform};
use crate::Principal;

action_table! {
	/// Actions on appointments.
	AppointmentAction, "appointment" {
		View => "view": [
			Doctor, Specialist, Nurse, Therapist, Receptionist, Administrative,
			Coordinator, Patient, Caregiver, Admin,
		],
		Schedule => "schedule": [
			Receptionist, Administrative, Coordinator, Doctor, Specialist, Patient, Admin,
		],
		Cancel => "cancel": [Receptionist, Administrative, Coordinator, Patient, Admin],
		Reschedule => "reschedule": [
			Receptionist, Administrative, Coordinator, Doctor, Specialist, Admin,
		],
	}
}

/// Evaluates an appointment action.
pub fn can_perform_appointment_action(principal: Option<&Principal>, action: &str) -> bool {
	can_perform::<AppointmentAction>(principal, action)
}

/// Returns true if the principal may perform any appointment action.
pub fn can_enter_appointments(principal: Option<&Principal>) -> bool {
	can_enter::<AppointmentAction>(principal)
}
