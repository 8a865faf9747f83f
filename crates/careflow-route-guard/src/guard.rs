// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Async orchestration around [`evaluate`].
//!
//! [`RouteGuard::navigate`] gathers the session snapshot, the selected sector
//! and connectivity, asks [`evaluate`] for a decision, then issues the
//! decision's side effects. A newer navigation supersedes an older one that is
//! still awaiting; the older one returns [`GuardOutcome::Superseded`] and
//! issues nothing.

use std::sync::Arc;

use careflow_auth::{AuditEventType, AuditLogBuilder, AuditLogEntry, Principal};
use careflow_guard_config::GuardConfig;
use serde_json::json;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::cancel::CancellationToken;
use crate::connectivity::{ConnectivityProbe, ConnectivityState};
use crate::decision::AccessDecision;
use crate::error::GuardResult;
use crate::notify::{AuditSink, NoopNotificationSink, Notification, NotificationSink, TracingAuditSink};
use crate::policy::evaluate;
use crate::request::NavigationRequest;
use crate::sector::{Sector, SectorStore};
use crate::session::{SessionProvider, SessionSnapshot};
use crate::state::{Evaluation, GuardState};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardOutcome {
	Decided(Evaluation),
	/// A later navigation started before this one finished.
	Superseded,
}

impl GuardOutcome {
	pub fn evaluation(&self) -> Option<&Evaluation> {
		match self {
			GuardOutcome::Decided(evaluation) => Some(evaluation),
			GuardOutcome::Superseded => None,
		}
	}

	pub fn decision(&self) -> Option<&AccessDecision> {
		self.evaluation().map(|e| &e.decision)
	}
}

pub struct RouteGuard {
	config: GuardConfig,
	session: Arc<dyn SessionProvider>,
	probe: Arc<ConnectivityProbe>,
	sectors: Arc<SectorStore>,
	notifications: Arc<dyn NotificationSink>,
	audit: Arc<dyn AuditSink>,
	current: Mutex<CancellationToken>,
}

impl RouteGuard {
	pub fn new(
		config: GuardConfig,
		session: Arc<dyn SessionProvider>,
		probe: Arc<ConnectivityProbe>,
	) -> Self {
		let sectors = Arc::new(SectorStore::new(config.sectors.cache_ttl));
		Self {
			config,
			session,
			probe,
			sectors,
			notifications: Arc::new(NoopNotificationSink),
			audit: Arc::new(TracingAuditSink),
			current: Mutex::new(CancellationToken::new()),
		}
	}

	pub fn with_sector_store(mut self, sectors: Arc<SectorStore>) -> Self {
		self.sectors = sectors;
		self
	}

	pub fn with_notification_sink(mut self, sink: Arc<dyn NotificationSink>) -> Self {
		self.notifications = sink;
		self
	}

	pub fn with_audit_sink(mut self, sink: Arc<dyn AuditSink>) -> Self {
		self.audit = sink;
		self
	}

	pub fn config(&self) -> &GuardConfig {
		&self.config
	}

	pub fn sectors(&self) -> &Arc<SectorStore> {
		&self.sectors
	}

	pub fn probe(&self) -> &Arc<ConnectivityProbe> {
		&self.probe
	}

	/// Produces the access decision for one navigation attempt.
	///
	/// Never fails: collaborator errors are folded into the decision.
	#[instrument(skip(self, request), fields(path = %request.path))]
	pub async fn navigate(&self, request: NavigationRequest) -> GuardOutcome {
		let token = self.supersede().await;

		let session = match self.session.snapshot().await {
			Ok(snapshot) => Some(snapshot),
			Err(e) => {
				warn!(error = %e, "session provider unavailable, probing connectivity");
				None
			}
		};
		if token.is_cancelled() {
			debug!("navigation superseded while awaiting session");
			return GuardOutcome::Superseded;
		}

		let (connectivity, probed) = self.connectivity_for(session.as_ref()).await;
		let sector = self.sectors.selected().await;
		if token.is_cancelled() {
			debug!("navigation superseded while awaiting connectivity");
			return GuardOutcome::Superseded;
		}
		if let Some(reachable) = probed {
			self.probe.record(reachable).await;
		}

		let evaluation = evaluate(
			session.as_ref(),
			sector.as_ref(),
			connectivity,
			&request,
			&self.config,
		);
		debug!(
			state = %evaluation.state,
			decision = ?evaluation.decision,
			"navigation decided"
		);

		self.issue_side_effects(&evaluation, session.as_ref(), &request)
			.await;
		GuardOutcome::Decided(evaluation)
	}

	/// Connectivity as seen by this navigation, plus the fresh probe result
	/// to record once the navigation is known to still be current.
	///
	/// An unavailable provider always probes. An unauthenticated session only
	/// fails open on a failure confirmed now, so a recorded `Offline` is
	/// re-probed rather than trusted.
	async fn connectivity_for(
		&self,
		session: Option<&SessionSnapshot>,
	) -> (ConnectivityState, Option<bool>) {
		let needs_probe = match session {
			None => true,
			Some(s) if s.is_loading || s.authenticated_principal().is_some() => false,
			Some(_) => self.probe.last_known().await == ConnectivityState::Offline,
		};

		if needs_probe {
			let reachable = self.probe.probe_unrecorded().await;
			(reachable.into(), Some(reachable))
		} else {
			(self.probe.last_known().await, None)
		}
	}

	/// Cancels the running navigation and installs a fresh token.
	async fn supersede(&self) -> CancellationToken {
		let mut current = self.current.lock().await;
		current.cancel();
		*current = CancellationToken::new();
		current.clone()
	}

	async fn issue_side_effects(
		&self,
		evaluation: &Evaluation,
		session: Option<&SessionSnapshot>,
		request: &NavigationRequest,
	) {
		let principal = session.and_then(SessionSnapshot::authenticated_principal);

		if let Some(denial) = &evaluation.denial {
			self.notifications
				.notify(Notification::access_denied(denial.reason.to_string()));

			let entry = audit_builder(AuditEventType::AccessDenied, principal)
				.resource(denial.path.as_str())
				.action(format!("access denied: {}", denial.reason))
				.details(json!({
					"state": evaluation.state,
					"reason": denial.reason,
				}))
				.build();
			self.publish(entry).await;
			return;
		}

		match evaluation.state {
			GuardState::Offline => {
				warn!(path = %request.path, "rendering offline with reduced trust");
				let entry = audit_builder(AuditEventType::OfflineFallback, principal)
					.resource(request.path.as_str())
					.details(json!({ "session_available": session.is_some() }))
					.build();
				self.publish(entry).await;
			}
			GuardState::Authorized if !request.requirement.is_empty() => {
				let entry = audit_builder(AuditEventType::AccessGranted, principal)
					.resource(request.path.as_str())
					.details(json!({
						"required_permission": request.requirement.required_permission,
						"required_role": request.requirement.required_role,
					}))
					.build();
				self.publish(entry).await;
			}
			_ => {}
		}
	}

	/// Starts a work session for `principal` with no sector selected.
	pub async fn begin_session(&self, principal: &Principal) {
		self.sectors.begin_session().await;
		info!(principal_id = %principal.id, role = %principal.role, "session started");
		let entry = audit_builder(AuditEventType::Login, Some(principal))
			.details(json!({
				"approval_status": principal.approval_status,
				"account_status": principal.account_status,
			}))
			.build();
		self.publish(entry).await;
	}

	/// Selects the work sector for the current session.
	pub async fn select_sector(&self, principal: &Principal, sector: Sector) -> GuardResult<()> {
		let id = sector.id.clone();
		self.sectors.select_sector(sector).await?;
		let entry = audit_builder(AuditEventType::SectorSelected, Some(principal))
			.resource(id)
			.build();
		self.publish(entry).await;
		Ok(())
	}

	/// Ends the session: cancels any pending navigation and clears sector state.
	pub async fn end_session(&self, principal: Option<&Principal>) {
		self.current.lock().await.cancel();

		if let Some(previous) = self.sectors.end_session().await {
			let entry = audit_builder(AuditEventType::SectorCleared, principal)
				.resource(previous.id)
				.build();
			self.publish(entry).await;
		}

		info!("session ended");
		self.publish(audit_builder(AuditEventType::Logout, principal).build())
			.await;
	}

	async fn publish(&self, entry: AuditLogEntry) {
		let event_type = entry.event_type;
		if let Err(e) = self.audit.publish(Arc::new(entry)).await {
			warn!(
				sink = self.audit.name(),
				%event_type,
				error = %e,
				"failed to publish audit entry"
			);
		}
	}
}

impl std::fmt::Debug for RouteGuard {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("RouteGuard")
			.field("config", &self.config)
			.field("audit", &self.audit.name())
			.finish_non_exhaustive()
	}
}

fn audit_builder(event_type: AuditEventType, principal: Option<&Principal>) -> AuditLogBuilder {
	let builder = AuditLogBuilder::new(event_type);
	match principal {
		Some(p) => builder.actor(p.id.clone(), p.role),
		None => builder,
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::connectivity::ReachabilityCheck;
	use crate::error::GuardError;
	use async_trait::async_trait;
	use careflow_auth::Role;
	use std::sync::Mutex as StdMutex;
	use std::time::Duration;

	struct StaticSession(GuardResult<SessionSnapshot>);

	#[async_trait]
	impl SessionProvider for StaticSession {
		async fn snapshot(&self) -> GuardResult<SessionSnapshot> {
			self.0.clone()
		}
	}

	/// Delays the first snapshot so a second navigation can overtake it.
	struct SlowFirstSession {
		calls: StdMutex<u32>,
		snapshot: SessionSnapshot,
	}

	#[async_trait]
	impl SessionProvider for SlowFirstSession {
		async fn snapshot(&self) -> GuardResult<SessionSnapshot> {
			let first = {
				let mut calls = self.calls.lock().unwrap();
				*calls += 1;
				*calls == 1
			};
			if first {
				tokio::time::sleep(Duration::from_millis(50)).await;
			}
			Ok(self.snapshot.clone())
		}
	}

	/// Replays snapshots in order; the last one repeats.
	struct ScriptedSession(StdMutex<Vec<GuardResult<SessionSnapshot>>>);

	impl ScriptedSession {
		fn new(script: Vec<GuardResult<SessionSnapshot>>) -> Self {
			Self(StdMutex::new(script))
		}
	}

	#[async_trait]
	impl SessionProvider for ScriptedSession {
		async fn snapshot(&self) -> GuardResult<SessionSnapshot> {
			let mut script = self.0.lock().unwrap();
			if script.len() > 1 {
				script.remove(0)
			} else {
				script[0].clone()
			}
		}
	}

	fn provider_down() -> GuardResult<SessionSnapshot> {
		Err(GuardError::SessionProviderUnavailable(
			"no provider".to_string(),
		))
	}

	/// Unreachable for the first `outages` checks, reachable afterwards.
	struct RecoveringBackend {
		outages: StdMutex<u32>,
		delay: Duration,
	}

	impl RecoveringBackend {
		fn new(outages: u32) -> Self {
			Self {
				outages: StdMutex::new(outages),
				delay: Duration::ZERO,
			}
		}
	}

	#[async_trait]
	impl ReachabilityCheck for RecoveringBackend {
		async fn check(&self) -> GuardResult<()> {
			tokio::time::sleep(self.delay).await;
			let mut outages = self.outages.lock().unwrap();
			if *outages > 0 {
				*outages -= 1;
				Err(GuardError::ConnectivityCheckFailed("down".to_string()))
			} else {
				Ok(())
			}
		}
	}

	struct RejectingAudit;

	#[async_trait]
	impl AuditSink for RejectingAudit {
		fn name(&self) -> &str {
			"rejecting"
		}

		async fn publish(&self, _entry: Arc<AuditLogEntry>) -> GuardResult<()> {
			Err(GuardError::AuditSink("store unavailable".to_string()))
		}
	}

	struct Reachable(bool);

	#[async_trait]
	impl ReachabilityCheck for Reachable {
		async fn check(&self) -> GuardResult<()> {
			if self.0 {
				Ok(())
			} else {
				Err(GuardError::ConnectivityCheckFailed("down".to_string()))
			}
		}
	}

	#[derive(Default)]
	struct Recorder {
		notifications: StdMutex<Vec<Notification>>,
		entries: StdMutex<Vec<AuditEventType>>,
	}

	impl NotificationSink for Recorder {
		fn notify(&self, notification: Notification) {
			self.notifications.lock().unwrap().push(notification);
		}
	}

	#[async_trait]
	impl AuditSink for Recorder {
		fn name(&self) -> &str {
			"recorder"
		}

		async fn publish(&self, entry: Arc<AuditLogEntry>) -> GuardResult<()> {
			self.entries.lock().unwrap().push(entry.event_type);
			Ok(())
		}
	}

	fn guard(session: Arc<dyn SessionProvider>, reachable: bool) -> (RouteGuard, Arc<Recorder>) {
		let recorder = Arc::new(Recorder::default());
		let probe = Arc::new(ConnectivityProbe::new(Arc::new(Reachable(reachable))));
		let guard = RouteGuard::new(GuardConfig::default(), session, probe)
			.with_notification_sink(recorder.clone())
			.with_audit_sink(recorder.clone());
		(guard, recorder)
	}

	fn nurse() -> Principal {
		Principal::new("n-1", Role::Nurse)
	}

	#[tokio::test]
	async fn provider_failure_probes_connectivity() {
		let session = Arc::new(StaticSession(Err(GuardError::SessionProviderUnavailable(
			"no provider".to_string(),
		))));
		let (guard, recorder) = guard(session, false);

		let outcome = guard.navigate(NavigationRequest::new("/orders")).await;

		assert_eq!(outcome.evaluation().map(|e| e.state), Some(GuardState::Offline));
		assert_eq!(
			guard.probe().last_known().await,
			ConnectivityState::Offline
		);
		assert_eq!(
			*recorder.entries.lock().unwrap(),
			vec![AuditEventType::OfflineFallback]
		);
		assert!(recorder.notifications.lock().unwrap().is_empty());
	}

	#[tokio::test]
	async fn authenticated_navigation_does_not_probe() {
		let session = Arc::new(StaticSession(Ok(SessionSnapshot::authenticated(nurse()))));
		let (guard, _) = guard(session, true);

		guard.navigate(NavigationRequest::new("/tasks")).await;
		assert_eq!(guard.probe().last_known().await, ConnectivityState::Unknown);
	}

	#[tokio::test]
	async fn granted_protected_region_is_audited() {
		let session = Arc::new(StaticSession(Ok(SessionSnapshot::authenticated(nurse()))));
		let (guard, recorder) = guard(session, true);

		guard
			.navigate(NavigationRequest::new("/vitals").requiring_permission("record_vitals"))
			.await;
		guard.navigate(NavigationRequest::new("/tasks")).await;

		assert_eq!(
			*recorder.entries.lock().unwrap(),
			vec![AuditEventType::AccessGranted]
		);
	}

	#[tokio::test]
	async fn newer_navigation_supersedes_older() {
		let session = Arc::new(SlowFirstSession {
			calls: StdMutex::new(0),
			snapshot: SessionSnapshot::authenticated(nurse()),
		});
		let (guard, recorder) = guard(session, true);

		let (first, second) = tokio::join!(
			guard.navigate(NavigationRequest::new("/admin").requiring_permission("all")),
			async {
				tokio::time::sleep(Duration::from_millis(10)).await;
				guard
					.navigate(NavigationRequest::new("/admin").requiring_permission("all"))
					.await
			}
		);

		assert_eq!(first, GuardOutcome::Superseded);
		assert_eq!(
			second.evaluation().map(|e| e.state),
			Some(GuardState::PermissionDenied)
		);
		assert_eq!(recorder.notifications.lock().unwrap().len(), 1);
		assert_eq!(
			*recorder.entries.lock().unwrap(),
			vec![AuditEventType::AccessDenied]
		);
	}

	mod recovery {
		use super::*;

		fn guard_with_backend(
			session: ScriptedSession,
			backend: RecoveringBackend,
		) -> (RouteGuard, Arc<Recorder>) {
			let recorder = Arc::new(Recorder::default());
			let probe = Arc::new(ConnectivityProbe::new(Arc::new(backend)));
			let guard = RouteGuard::new(GuardConfig::default(), Arc::new(session), probe)
				.with_notification_sink(recorder.clone())
				.with_audit_sink(recorder.clone());
			(guard, recorder)
		}

		#[tokio::test]
		async fn unauthenticated_after_outage_redirects_to_login() {
			let session = ScriptedSession::new(vec![
				provider_down(),
				Ok(SessionSnapshot::unauthenticated()),
			]);
			let (guard, _) = guard_with_backend(session, RecoveringBackend::new(1));

			let first = guard.navigate(NavigationRequest::new("/dashboard")).await;
			assert_eq!(first.evaluation().map(|e| e.state), Some(GuardState::Offline));

			for _ in 0..3 {
				let later = guard
					.navigate(NavigationRequest::new("/admin").requiring_permission("all"))
					.await;
				assert_eq!(
					later.decision(),
					Some(&AccessDecision::redirect_returning("/login", "/admin"))
				);
			}
			assert_eq!(guard.probe().last_known().await, ConnectivityState::Online);
		}

		#[tokio::test]
		async fn unauthenticated_during_ongoing_outage_stays_offline() {
			let session = ScriptedSession::new(vec![
				provider_down(),
				Ok(SessionSnapshot::unauthenticated()),
			]);
			let (guard, _) = guard_with_backend(session, RecoveringBackend::new(2));

			guard.navigate(NavigationRequest::new("/dashboard")).await;
			let second = guard.navigate(NavigationRequest::new("/dashboard")).await;

			assert_eq!(second.evaluation().map(|e| e.state), Some(GuardState::Offline));
		}

		#[tokio::test]
		async fn unauthenticated_without_recorded_outage_does_not_probe() {
			let session = ScriptedSession::new(vec![Ok(SessionSnapshot::unauthenticated())]);
			let (guard, _) = guard_with_backend(session, RecoveringBackend::new(0));

			let outcome = guard.navigate(NavigationRequest::new("/orders")).await;

			assert_eq!(
				outcome.decision(),
				Some(&AccessDecision::redirect_returning("/login", "/orders"))
			);
			assert_eq!(guard.probe().last_known().await, ConnectivityState::Unknown);
		}

		#[tokio::test]
		async fn superseded_navigation_discards_its_probe_result() {
			let session = ScriptedSession::new(vec![
				provider_down(),
				Ok(SessionSnapshot::authenticated(nurse())),
			]);
			let backend = RecoveringBackend {
				outages: StdMutex::new(1),
				delay: Duration::from_millis(50),
			};
			let (guard, recorder) = guard_with_backend(session, backend);

			let (first, second) = tokio::join!(
				guard.navigate(NavigationRequest::new("/tasks")),
				async {
					tokio::time::sleep(Duration::from_millis(10)).await;
					guard.navigate(NavigationRequest::new("/tasks")).await
				}
			);

			assert_eq!(first, GuardOutcome::Superseded);
			assert_eq!(
				second.evaluation().map(|e| e.state),
				Some(GuardState::Authorized)
			);
			assert_eq!(guard.probe().last_known().await, ConnectivityState::Unknown);
			assert!(recorder.entries.lock().unwrap().is_empty());
		}
	}

	#[tokio::test]
	async fn audit_failure_does_not_change_decision() {
		let session = Arc::new(StaticSession(Ok(SessionSnapshot::authenticated(nurse()))));
		let (guard, recorder) = guard(session, true);
		let guard = guard.with_audit_sink(Arc::new(RejectingAudit));

		let outcome = guard
			.navigate(NavigationRequest::new("/admin").requiring_permission("all"))
			.await;

		assert_eq!(
			outcome.evaluation().map(|e| e.state),
			Some(GuardState::PermissionDenied)
		);
		assert_eq!(recorder.notifications.lock().unwrap().len(), 1);
	}

	mod session_lifecycle {
		use super::*;

		#[tokio::test]
		async fn login_select_logout_is_audited() {
			let session = Arc::new(StaticSession(Ok(SessionSnapshot::authenticated(nurse()))));
			let (guard, recorder) = guard(session, true);
			let principal = nurse();

			guard.begin_session(&principal).await;
			guard
				.select_sector(&principal, Sector::new("icu", "Intensive Care"))
				.await
				.unwrap();
			guard.end_session(Some(&principal)).await;

			assert_eq!(
				*recorder.entries.lock().unwrap(),
				vec![
					AuditEventType::Login,
					AuditEventType::SectorSelected,
					AuditEventType::SectorCleared,
					AuditEventType::Logout,
				]
			);
			assert_eq!(guard.sectors().selected().await, None);
		}

		#[tokio::test]
		async fn rejected_selection_is_not_audited() {
			let session = Arc::new(StaticSession(Ok(SessionSnapshot::authenticated(nurse()))));
			let (guard, recorder) = guard(session, true);
			let principal = nurse();

			guard
				.select_sector(&principal, Sector::new("icu", "Intensive Care"))
				.await
				.unwrap();
			let err = guard
				.select_sector(&principal, Sector::new("ward-3", "Ward 3"))
				.await
				.unwrap_err();

			assert!(matches!(err, GuardError::Sector(_)));
			assert_eq!(
				*recorder.entries.lock().unwrap(),
				vec![AuditEventType::SectorSelected]
			);
		}
	}
}
