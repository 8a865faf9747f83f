// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Path matching for the sector gate and role-scoped patient redirects.

use careflow_auth::Role;

/// Strips the query string, the fragment and one trailing `/` from `path`.
///
/// The root path `/` is kept as is.
pub fn normalize(path: &str) -> &str {
	let end = path.find(['?', '#']).unwrap_or(path.len());
	let path = &path[..end];
	match path.strip_suffix('/') {
		Some(trimmed) if !trimmed.is_empty() => trimmed,
		_ => path,
	}
}

/// True for the landing routes that require a selected sector.
pub fn requires_sector(path: &str) -> bool {
	matches!(normalize(path), "/" | "/dashboard")
}

/// Extracts `:id` from `/patients/:id`.
///
/// The list view (`/patients`, `/patients/`) and deeper paths do not match.
/// Ids are limited to URI unreserved characters so they can be placed in a
/// query string unescaped.
pub fn patient_id(path: &str) -> Option<&str> {
	let rest = normalize(path).strip_prefix("/patients/")?;
	if rest.is_empty() || !rest.bytes().all(is_unreserved) {
		return None;
	}
	Some(rest)
}

fn is_unreserved(b: u8) -> bool {
	b.is_ascii_alphanumeric() || matches!(b, b'-' | b'.' | b'_' | b'~')
}

/// Looks up the role-scoped redirect for a patient detail path.
pub fn role_redirect(role: Role, path: &str) -> Option<String> {
	let id = patient_id(path)?;
	let base = match role {
		Role::Nurse => "/tasks",
		Role::LabTechnician | Role::RadiologyTechnician => "/orders",
		Role::NurseTechnician => "/vitals",
		_ => return None,
	};
	Some(format!("{base}?patientId={id}"))
}
