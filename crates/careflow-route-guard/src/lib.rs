// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Navigation access control for Careflow.
//!
//! The guard turns one navigation attempt into exactly one [`AccessDecision`].
//! Policy lives in the pure [`evaluate`] function; [`RouteGuard`] gathers its
//! inputs from the session provider, the [`SectorStore`] and the
//! [`ConnectivityProbe`], and issues notifications and audit entries.
//!
//! ```ignore
//! use std::sync::Arc;
//! use careflow_route_guard::{ConnectivityProbe, NavigationRequest, RouteGuard};
//!
//! let config = careflow_guard_config::load_config()?;
//! let probe = Arc::new(ConnectivityProbe::from_config(&config.connectivity)?);
//! let guard = RouteGuard::new(config, session_provider, probe);
//!
//! let outcome = guard.navigate(NavigationRequest::new("/dashboard")).await;
//! ```

pub mod cancel;
pub mod connectivity;
pub mod decision;
pub mod error;
pub mod guard;
pub mod notify;
pub mod policy;
pub mod request;
pub mod routes;
pub mod sector;
pub mod session;
pub mod state;

pub use cancel::CancellationToken;
pub use connectivity::{ConnectivityProbe, ConnectivityState, HttpReachability, ReachabilityCheck};
pub use decision::{AccessDecision, Banner, BannerKind, RedirectState};
pub use error::{GuardError, GuardResult, SectorError};
pub use guard::{GuardOutcome, RouteGuard};
pub use notify::{
	AuditSink, NoopAuditSink, NoopNotificationSink, Notification, NotificationSink, Severity,
	TracingAuditSink,
};
pub use policy::evaluate;
pub use request::{NavigationRequest, NavigationRequirement};
pub use sector::{Sector, SectorDirectory, SectorStore};
pub use session::{SessionProvider, SessionSnapshot};
pub use state::{Denial, DenialReason, Evaluation, GuardState};

pub use careflow_guard_config::GuardConfig;
