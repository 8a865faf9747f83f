// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod connectivity;
mod routes;
mod sectors;

pub use connectivity::{ConnectivityConfig, ConnectivityConfigLayer};
pub use routes::{RoutesConfig, RoutesConfigLayer};
pub use sectors::{SectorsConfig, SectorsConfigLayer};
