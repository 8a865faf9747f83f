// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Partial configuration layer produced by each source.

use serde::{Deserialize, Serialize};

use crate::sections::{ConnectivityConfigLayer, RoutesConfigLayer, SectorsConfigLayer};

/// One source's view of the configuration. `None` means "not set here".
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct GuardConfigLayer {
	pub routes: Option<RoutesConfigLayer>,
	pub connectivity: Option<ConnectivityConfigLayer>,
	pub sectors: Option<SectorsConfigLayer>,
}

impl GuardConfigLayer {
	/// Overlays `other` on top of `self`; fields set in `other` win.
	pub fn merge(&mut self, other: Self) {
		merge_section(&mut self.routes, other.routes, RoutesConfigLayer::merge);
		merge_section(
			&mut self.connectivity,
			other.connectivity,
			ConnectivityConfigLayer::merge,
		);
		merge_section(&mut self.sectors, other.sectors, SectorsConfigLayer::merge);
	}
}

fn merge_section<T>(base: &mut Option<T>, other: Option<T>, merge: fn(&mut T, T)) {
	match (base.as_mut(), other) {
		(Some(existing), Some(incoming)) => merge(existing, incoming),
		(None, Some(incoming)) => *base = Some(incoming),
		(_, None) => {}
	}
}
