// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Backend reachability probe.
//!
//! [`ConnectivityProbe::check_connectivity`] is single-flight: callers that
//! arrive while a probe is running await the same future. The future is held
//! weakly, so when every caller drops it the probe is dropped too and no
//! result is recorded.

use std::sync::Arc;

use async_trait::async_trait;
use careflow_guard_config::ConnectivityConfig;
use futures::future::{BoxFuture, FutureExt, Shared, WeakShared};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use crate::error::{GuardError, GuardResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectivityState {
	#[default]
	Unknown,
	Online,
	Offline,
}

impl From<bool> for ConnectivityState {
	fn from(reachable: bool) -> Self {
		if reachable {
			ConnectivityState::Online
		} else {
			ConnectivityState::Offline
		}
	}
}

impl std::fmt::Display for ConnectivityState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let s = match self {
			ConnectivityState::Unknown => "unknown",
			ConnectivityState::Online => "online",
			ConnectivityState::Offline => "offline",
		};
		f.write_str(s)
	}
}

/// One reachability check against the backend.
///
/// `Ok` means reachable; the error describes why it was not.
#[async_trait]
pub trait ReachabilityCheck: Send + Sync {
	async fn check(&self) -> GuardResult<()>;
}

/// `GET <health_url>`; any 2xx response is reachable.
#[derive(Debug, Clone)]
pub struct HttpReachability {
	client: Client,
	health_url: String,
}

impl HttpReachability {
	pub fn new(config: &ConnectivityConfig) -> GuardResult<Self> {
		let client = Client::builder()
			.user_agent(user_agent())
			.timeout(config.probe_timeout)
			.build()
			.map_err(|e| GuardError::ConnectivityCheckFailed(e.to_string()))?;

		Ok(Self {
			client,
			health_url: config.health_url.clone(),
		})
	}

	pub fn health_url(&self) -> &str {
		&self.health_url
	}
}

#[async_trait]
impl ReachabilityCheck for HttpReachability {
	async fn check(&self) -> GuardResult<()> {
		let response = self
			.client
			.get(&self.health_url)
			.send()
			.await
			.map_err(|e| GuardError::ConnectivityCheckFailed(e.to_string()))?;

		let status = response.status();
		if status.is_success() {
			Ok(())
		} else {
			Err(GuardError::ConnectivityCheckFailed(format!(
				"health endpoint returned {status}"
			)))
		}
	}
}

fn user_agent() -> String {
	format!("careflow-route-guard/{}", env!("CARGO_PKG_VERSION"))
}

type ProbeFuture = Shared<BoxFuture<'static, bool>>;

#[derive(Default)]
struct InFlight {
	generation: u64,
	probe: Option<WeakShared<BoxFuture<'static, bool>>>,
}

/// Single-flight wrapper around a [`ReachabilityCheck`].
pub struct ConnectivityProbe {
	check: Arc<dyn ReachabilityCheck>,
	in_flight: Mutex<InFlight>,
	last_known: Mutex<ConnectivityState>,
}

impl ConnectivityProbe {
	pub fn new(check: Arc<dyn ReachabilityCheck>) -> Self {
		Self {
			check,
			in_flight: Mutex::new(InFlight::default()),
			last_known: Mutex::new(ConnectivityState::Unknown),
		}
	}

	pub fn from_config(config: &ConnectivityConfig) -> GuardResult<Self> {
		Ok(Self::new(Arc::new(HttpReachability::new(config)?)))
	}

	/// Probes the backend, joining a probe already in flight, and records the result.
	#[instrument(skip(self))]
	pub async fn check_connectivity(&self) -> bool {
		let reachable = self.probe_unrecorded().await;
		self.record(reachable).await;
		reachable
	}

	/// Probes the backend like [`check_connectivity`](Self::check_connectivity)
	/// but leaves [`last_known`](Self::last_known) untouched.
	///
	/// Callers that may be cancelled after the probe resolves use this and
	/// call [`record`](Self::record) only if they are still current.
	pub async fn probe_unrecorded(&self) -> bool {
		let (generation, probe) = self.join_or_start().await;
		let reachable = probe.await;

		let mut in_flight = self.in_flight.lock().await;
		if in_flight.generation == generation {
			in_flight.probe = None;
		}
		reachable
	}

	pub async fn record(&self, reachable: bool) {
		*self.last_known.lock().await = reachable.into();
	}

	/// Result of the last completed probe.
	pub async fn last_known(&self) -> ConnectivityState {
		*self.last_known.lock().await
	}

	async fn join_or_start(&self) -> (u64, ProbeFuture) {
		let mut in_flight = self.in_flight.lock().await;

		if let Some(existing) = in_flight.probe.as_ref().and_then(WeakShared::upgrade) {
			debug!("joining in-flight connectivity probe");
			return (in_flight.generation, existing);
		}

		let check = Arc::clone(&self.check);
		let probe = async move {
			match check.check().await {
				Ok(()) => true,
				Err(e) => {
					warn!(error = %e, "backend unreachable");
					false
				}
			}
		}
		.boxed()
		.shared();

		in_flight.generation += 1;
		in_flight.probe = probe.downgrade();
		(in_flight.generation, probe)
	}
}

impl std::fmt::Debug for ConnectivityProbe {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConnectivityProbe").finish_non_exhaustive()
	}
}
