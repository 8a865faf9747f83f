// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Action-whitelist policies for clinical domains.
//!
//! Each domain is a closed `(role, action) -> bool` table. Actions arrive as
//! strings from the surrounding application; a string that does not name an
//! action in the table is denied for every role. The superuser bypass of
//! [`has_permission`](crate::has_permission) does not apply here: a role is
//! allowed only where the table lists it.

pub mod appointment;
pub mod clinical;
pub mod coordination;
pub mod emergency;
pub mod medication;

use std::str::FromStr;

use crate::{Principal, Role};

pub use appointment::{can_enter_appointments, can_perform_appointment_action, AppointmentAction};
pub use clinical::{
	can_enter_clinical_assessment, can_enter_clinical_documentation, can_enter_fluid_balance,
	can_perform_clinical_assessment_action, can_perform_clinical_documentation_action,
	can_perform_fluid_balance_action, ClinicalAssessmentAction, ClinicalDocumentationAction,
	FluidBalanceAction,
};
pub use coordination::{
	can_enter_care_coordination, can_enter_telemedicine, can_perform_care_coordination_action,
	can_perform_telemedicine_action, CareCoordinationAction, TelemedicineAction,
};
pub use emergency::{
	can_enter_emergency_care, can_enter_triage_assessment, can_perform_emergency_care_action,
	can_perform_triage_assessment_action, EmergencyCareAction, TriageAssessmentAction,
};
pub use medication::{can_enter_medications, can_perform_medication_action, MedicationAction};

/// Error returned when an action string is not part of a domain's table.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {domain} action: {action}")]
pub struct UnknownAction {
	pub domain: &'static str,
	pub action: String,
}

/// A closed set of actions for one clinical domain.
pub trait DomainAction: Copy + FromStr<Err = UnknownAction> + 'static {
	/// Domain name used in logs and errors.
	const DOMAIN: &'static str;

	/// Every action in the table.
	fn all() -> &'static [Self];

	/// Returns true if `role` is whitelisted for this action.
	fn allows(self, role: Role) -> bool;
}

/// Evaluates a domain action given as a string.
pub fn can_perform<A: DomainAction>(principal: Option<&Principal>, action: &str) -> bool {
	let Some(principal) = principal else {
		return false;
	};

	match action.parse::<A>() {
		Ok(action) => action.allows(principal.role),
		Err(err) => {
			tracing::trace!(error = %err, role = %principal.role, "denying unknown action");
			false
		}
	}
}

/// Returns true if the principal may perform at least one action in the domain.
pub fn can_enter<A: DomainAction>(principal: Option<&Principal>) -> bool {
	let Some(principal) = principal else {
		return false;
	};

	A::all().iter().any(|action| action.allows(principal.role))
}

/// Declares a domain action enum together with its role whitelist.
macro_rules! action_table {
	(
		$(#[$meta:meta])*
		$name:ident, $domain:literal {
			$($variant:ident => $wire:literal : [$($role:ident),+ $(,)?]),+ $(,)?
		}
	) => {
		$(#[$meta])*
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
		#[serde(rename_all = "snake_case")]
		pub enum $name {
			$($variant),+
		}

		impl $name {
			/// Wire name of the action.
			pub fn as_str(&self) -> &'static str {
				match self {
					$(Self::$variant => $wire),+
				}
			}
		}

		impl std::fmt::Display for $name {
			fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
				f.write_str(self.as_str())
			}
		}

		impl std::str::FromStr for $name {
			type Err = $crate::policies::UnknownAction;

			fn from_str(s: &str) -> Result<Self, Self::Err> {
				match s {
					$($wire => Ok(Self::$variant),)+
					_ => Err($crate::policies::UnknownAction {
						domain: $domain,
						action: s.to_string(),
					}),
				}
			}
		}

		impl $crate::policies::DomainAction for $name {
			const DOMAIN: &'static str = $domain;

			fn all() -> &'static [Self] {
				&[$(Self::$variant),+]
			}

			fn allows(self, role: $crate::Role) -> bool {
				match self {
					$(Self::$variant => matches!(role, $($crate::Role::$role)|+)),+
				}
			}
		}
	};
}

pub(crate) use action_table;
