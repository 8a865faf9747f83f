// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! The guard's decision procedure.
//!
//! [`evaluate`] is pure: it reads already-gathered inputs and returns one
//! [`Evaluation`]. It performs no I/O and issues no notifications.
//!
//! Checks run in a fixed order:
//!
//! 1. session provider unavailable: offline degraded render when the backend
//!    is unreachable, otherwise the login redirect
//! 2. session loading: placeholder, never a redirect
//! 3. unauthenticated: login redirect, or offline when the last probe failed
//! 4. sector gate for `/` and `/dashboard`
//! 5. role-scoped patient redirect
//! 6. declared permission
//! 7. declared role
//! 8. render

use careflow_auth::Role;
use careflow_guard_config::GuardConfig;
use tracing::{debug, instrument};

use crate::connectivity::ConnectivityState;
use crate::decision::{AccessDecision, Banner, BannerKind};
use crate::request::NavigationRequest;
use crate::routes;
use crate::sector::Sector;
use crate::session::SessionSnapshot;
use crate::state::{Denial, DenialReason, Evaluation, GuardState};

struct Trail(Vec<GuardState>);

impl Trail {
	fn start() -> Self {
		Self(vec![GuardState::Init, GuardState::AwaitingSession])
	}

	fn to(&mut self, state: GuardState) -> &mut Self {
		self.0.push(state);
		self
	}

	fn finish(self, decision: AccessDecision, denial: Option<Denial>) -> Evaluation {
		let state = self.0.last().copied().unwrap_or(GuardState::Init);
		Evaluation {
			decision,
			state,
			trail: self.0,
			denial,
		}
	}
}

/// Decides one navigation attempt.
///
/// `session` is `None` when the session provider could not be reached.
/// `connectivity` must come from a probe made for this navigation whenever it
/// is `Offline`; a stale `Offline` would fail open for unauthenticated users.
#[instrument(
    level = "debug",
    skip_all,
    fields(path = %request.path, connectivity = %connectivity)
)]
pub fn evaluate(
	session: Option<&SessionSnapshot>,
	sector: Option<&Sector>,
	connectivity: ConnectivityState,
	request: &NavigationRequest,
	config: &GuardConfig,
) -> Evaluation {
	let mut trail = Trail::start();
	let paths = &config.routes;

	let Some(session) = session else {
		trail.to(GuardState::AwaitingConnectivity);
		return unauthenticated(trail, connectivity, request, config);
	};

	if session.is_loading {
		debug!("session loading");
		return trail.finish(AccessDecision::Loading, None);
	}

	let Some(principal) = session.authenticated_principal() else {
		return unauthenticated(trail, connectivity, request, config);
	};

	trail.to(GuardState::Authenticated);

	if routes::requires_sector(&request.path) && sector.is_none() {
		debug!("no sector selected");
		trail.to(GuardState::SectorRequired);
		return trail.finish(AccessDecision::redirect(paths.sectors_path.as_str()), None);
	}

	if let Some(target) = routes::role_redirect(principal.role, &request.path) {
		debug!(role = %principal.role, %target, "role-scoped patient redirect");
		trail.to(GuardState::RoleRedirect);
		return trail.finish(AccessDecision::redirect(target), None);
	}

	if let Some(permission) = &request.requirement.required_permission {
		if !session.has_permission(permission) {
			debug!(%permission, "declared permission missing");
			trail.to(GuardState::PermissionDenied);
			let denial = Denial {
				path: request.path.clone(),
				reason: DenialReason::MissingPermission {
					permission: permission.clone(),
				},
			};
			return trail.finish(
				AccessDecision::redirect(paths.unauthorized_path.as_str()),
				Some(denial),
			);
		}
	}

	if let Some(required) = request.requirement.required_role {
		if principal.role != required {
			debug!(%required, actual = %principal.role, "declared role mismatch");
			trail.to(GuardState::RoleDenied);
			let denial = Denial {
				path: request.path.clone(),
				reason: DenialReason::WrongRole {
					required,
					actual: principal.role,
				},
			};
			return trail.finish(
				AccessDecision::redirect(paths.unauthorized_path.as_str()),
				Some(denial),
			);
		}
	}

	trail.to(GuardState::Authorized);
	let banner = (principal.role == Role::Patient)
		.then(|| Banner::new(BannerKind::PatientCompliance, paths.patient_banner.as_str()));
	trail.finish(AccessDecision::Render { banner }, None)
}

fn unauthenticated(
	mut trail: Trail,
	connectivity: ConnectivityState,
	request: &NavigationRequest,
	config: &GuardConfig,
) -> Evaluation {
	if connectivity == ConnectivityState::Offline {
		trail.to(GuardState::Offline);
		let banner = Banner::new(BannerKind::Offline, config.routes.offline_banner.as_str());
		return trail.finish(AccessDecision::RenderDegraded { banner }, None);
	}

	trail.to(GuardState::Unauthenticated);
	trail.finish(
		AccessDecision::redirect_returning(config.routes.login_path.as_str(), request.path.as_str()),
		None,
	)
}
