//! House-officer record, raw form input, and the sign-out derivation rule.

use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::types::{Gender, OfficerId, Unit};

/// Length of a rotation, in calendar months.
pub const ROTATION_MONTHS: u32 = 3;

/// Expected sign-out date for an officer signed in on `date_signed_in`.
///
/// Adds [`ROTATION_MONTHS`] calendar months. A day-of-month that does not
/// exist in the target month clamps to that month's last day, so Jan 31
/// lands on Apr 30 rather than overflowing into May.
///
/// Returns `None` when the result falls past the last representable date.
pub fn derive_sign_out(date_signed_in: NaiveDate) -> Option<NaiveDate> {
    date_signed_in.checked_add_months(Months::new(ROTATION_MONTHS))
}

/// Fully materialized, validated house-officer record.
///
/// Only [`crate::registration::Registrar`] builds these, so every record
/// satisfies `clinical_presentation_date >= date_signed_in` and carries a
/// sign-out date derived from its sign-in date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseOfficerRecord {
    /// Stable identifier.
    pub id: OfficerId,
    /// Officer's full name.
    pub full_name: String,
    /// Officer's gender.
    pub gender: Gender,
    /// Rotation start date.
    pub date_signed_in: NaiveDate,
    /// Unit the officer rotates through.
    pub unit_assigned: Unit,
    /// Topic of the officer's clinical presentation.
    pub clinical_presentation_topic: String,
    /// Scheduled presentation date.
    pub clinical_presentation_date: NaiveDate,
    /// Derived rotation end date.
    pub expected_sign_out_date: NaiveDate,
}

/// Raw registration form submission.
///
/// Every field is kept in its unvalidated shape; absent pickers are `None`
/// and select boxes carry their literal string value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OfficerForm {
    /// Entered full name.
    pub full_name: String,
    /// Selected gender label, if any.
    pub gender: Option<String>,
    /// Picked sign-in date, if any.
    pub date_signed_in: Option<NaiveDate>,
    /// Selected unit label, if any.
    pub unit_assigned: Option<String>,
    /// Entered presentation topic.
    pub clinical_presentation_topic: String,
    /// Picked presentation date, if any.
    pub clinical_presentation_date: Option<NaiveDate>,
}
