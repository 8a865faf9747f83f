// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Session-scoped selection of the operational sector.
//!
//! Lifecycle: [`SectorStore::begin_session`] at login, at most one
//! [`SectorStore::select_sector`] per session, [`SectorStore::end_session`] at
//! logout. The sector list is a cache of the external directory.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::error::{GuardError, GuardResult, SectorError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sector {
	pub id: String,
	pub name: String,
	#[serde(default)]
	pub description: String,
}

impl Sector {
	pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			name: name.into(),
			description: String::new(),
		}
	}

	pub fn with_description(mut self, description: impl Into<String>) -> Self {
		self.description = description.into();
		self
	}
}

/// External directory of sectors.
#[async_trait]
pub trait SectorDirectory: Send + Sync {
	async fn fetch_sectors(&self) -> GuardResult<Vec<Sector>>;
}

#[derive(Debug, Default)]
struct SectorState {
	selected: Option<Sector>,
	sectors: Vec<Sector>,
	fetched_at: Option<DateTime<Utc>>,
}

/// Explicit store for the selected sector and the cached sector list.
#[derive(Debug)]
pub struct SectorStore {
	state: RwLock<SectorState>,
	cache_ttl: Duration,
}

impl SectorStore {
	pub fn new(cache_ttl: Duration) -> Self {
		Self {
			state: RwLock::new(SectorState::default()),
			cache_ttl,
		}
	}

	/// Starts a work session with no sector selected. The cached list is kept.
	pub async fn begin_session(&self) {
		let mut state = self.state.write().await;
		state.selected = None;
		debug!("sector session started");
	}

	/// Clears the selection and the cached list.
	///
	/// Returns the sector that was selected, if any.
	pub async fn end_session(&self) -> Option<Sector> {
		let mut state = self.state.write().await;
		let previous = state.selected.take();
		state.sectors.clear();
		state.fetched_at = None;
		debug!(had_selection = previous.is_some(), "sector session ended");
		previous
	}

	/// Selects the sector for this work session.
	///
	/// Re-selecting the current sector is a no-op. When the cached list is
	/// non-empty the sector must appear in it.
	#[instrument(skip(self, sector), fields(sector_id = %sector.id))]
	pub async fn select_sector(&self, sector: Sector) -> Result<(), SectorError> {
		let mut state = self.state.write().await;

		if let Some(current) = &state.selected {
			if current.id == sector.id {
				return Ok(());
			}
			return Err(SectorError::AlreadySelected {
				current: current.id.clone(),
			});
		}

		if !state.sectors.is_empty() && !state.sectors.iter().any(|s| s.id == sector.id) {
			return Err(SectorError::UnknownSector { id: sector.id });
		}

		info!(sector_id = %sector.id, sector_name = %sector.name, "sector selected");
		state.selected = Some(sector);
		Ok(())
	}

	pub async fn selected(&self) -> Option<Sector> {
		self.state.read().await.selected.clone()
	}

	pub async fn sectors(&self) -> Vec<Sector> {
		self.state.read().await.sectors.clone()
	}

	/// True when the list was never fetched or is older than the TTL.
	pub async fn is_cache_stale(&self) -> bool {
		let state = self.state.read().await;
		self.is_stale_at(&state, Utc::now())
	}

	fn is_stale_at(&self, state: &SectorState, now: DateTime<Utc>) -> bool {
		let Some(fetched_at) = state.fetched_at else {
			return true;
		};
		match chrono::Duration::from_std(self.cache_ttl) {
			Ok(ttl) => now - fetched_at >= ttl,
			Err(_) => false,
		}
	}

	/// Replaces the cached list from `directory`.
	///
	/// On failure the previous list is kept and stays stale.
	#[instrument(skip(self, directory))]
	pub async fn refresh_sectors(&self, directory: &dyn SectorDirectory) -> GuardResult<()> {
		let sectors = directory.fetch_sectors().await.map_err(|e| {
			warn!(error = %e, "sector refresh failed, keeping cached list");
			match e {
				GuardError::SectorDirectory(_) => e,
				other => GuardError::SectorDirectory(other.to_string()),
			}
		})?;

		let mut state = self.state.write().await;
		debug!(count = sectors.len(), "sector list refreshed");
		state.sectors = sectors;
		state.fetched_at = Some(Utc::now());
		Ok(())
	}

	/// Refreshes only when the cache is stale.
	pub async fn refresh_if_stale(&self, directory: &dyn SectorDirectory) -> GuardResult<()> {
		if self.is_cache_stale().await {
			self.refresh_sectors(directory).await
		} else {
			Ok(())
		}
	}
}

impl Default for SectorStore {
	fn default() -> Self {
		Self::new(careflow_guard_config::SectorsConfig::default().cache_ttl)
	}
}
