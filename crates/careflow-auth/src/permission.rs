// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Well-known permission tokens.
//!
//! Permissions are opaque strings. The constants here are the tokens the
//! catalog hands out; sessions may carry additional grants that are not
//! listed. [`ALL`] is the wildcard and satisfies every check.

/// Wildcard permission.
pub const ALL: &str = "all";

pub const VIEW_PATIENTS: &str = "view_patients";
pub const CREATE_PATIENTS: &str = "create_patients";
pub const EDIT_PATIENTS: &str = "edit_patients";
pub const VIEW_OWN_RECORDS: &str = "view_own_records";

pub const VIEW_MEDICAL_RECORDS: &str = "view_medical_records";
pub const EDIT_MEDICAL_RECORDS: &str = "edit_medical_records";

pub const VIEW_MEDICATIONS: &str = "view_medications";
pub const PRESCRIBE_MEDICATIONS: &str = "prescribe_medications";
pub const ADMINISTER_MEDICATIONS: &str = "administer_medications";
pub const DISPENSE_MEDICATIONS: &str = "dispense_medications";

pub const VIEW_ORDERS: &str = "view_orders";
pub const CREATE_ORDERS: &str = "create_orders";
pub const VIEW_LAB_RESULTS: &str = "view_lab_results";
pub const CREATE_LAB_RESULTS: &str = "create_lab_results";
pub const VIEW_IMAGING: &str = "view_imaging";
pub const CREATE_IMAGING_REPORTS: &str = "create_imaging_reports";

pub const VIEW_VITALS: &str = "view_vitals";
pub const RECORD_VITALS: &str = "record_vitals";
pub const VIEW_TASKS: &str = "view_tasks";
pub const MANAGE_TASKS: &str = "manage_tasks";
pub const TRIAGE: &str = "triage";

pub const VIEW_CARE_PLANS: &str = "view_care_plans";
pub const MANAGE_CARE_PLANS: &str = "manage_care_plans";
pub const TELEMEDICINE: &str = "telemedicine";

pub const VIEW_APPOINTMENTS: &str = "view_appointments";
pub const MANAGE_APPOINTMENTS: &str = "manage_appointments";

pub const VIEW_BILLING: &str = "view_billing";
pub const MANAGE_BILLING: &str = "manage_billing";
pub const VIEW_REPORTS: &str = "view_reports";
pub const VIEW_RESEARCH_DATA: &str = "view_research_data";
