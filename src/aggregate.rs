//! Chart-ready aggregates over every stored record.
//!
//! Aggregates ignore the view filters and are rebuilt from scratch on each
//! call.

use chrono::{Datelike, NaiveDate};
use hashbrown::HashMap;
use serde::Serialize;

use crate::{
    officer::HouseOfficerRecord,
    types::{Gender, Unit},
};

/// Marker appended to shortened unit labels.
pub const LABEL_ELLIPSIS: &str = "...";

/// Officer count for one unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitCount {
    /// Axis label, possibly shortened.
    pub label: String,
    /// Full unit, kept for tooltips and lookup.
    pub unit: Unit,
    /// Number of officers in the unit.
    pub count: usize,
}

/// Officer count for one gender.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenderCount {
    /// Gender.
    pub gender: Gender,
    /// Number of officers.
    pub count: usize,
}

/// Sign-ins and presentations falling in one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineBucket {
    /// `MMM yyyy` label, e.g. `Jan 2025`.
    pub label: String,
    /// Calendar year.
    pub year: i32,
    /// Calendar month, 1-12.
    pub month: u32,
    /// Officers who signed in this month.
    pub sign_ins: usize,
    /// Presentations scheduled this month.
    pub presentations: usize,
}

/// Every chart series for the dashboard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregates {
    /// Bar chart: officers per unit.
    pub units: Vec<UnitCount>,
    /// Pie chart: officers per gender.
    pub genders: Vec<GenderCount>,
    /// Line chart: monthly sign-ins versus presentations.
    pub timeline: Vec<TimelineBucket>,
}

impl Aggregates {
    /// Builds all three series from `records`.
    pub fn compute<'a, I>(records: I, label_max_chars: usize) -> Self
    where
        I: IntoIterator<Item = &'a HouseOfficerRecord>,
    {
        let records: Vec<&HouseOfficerRecord> = records.into_iter().collect();
        Self {
            units: unit_distribution(records.iter().copied(), label_max_chars),
            genders: gender_distribution(records.iter().copied()),
            timeline: timeline(records.iter().copied()),
        }
    }
}

/// Shortens `name` to `max_chars` characters followed by
/// [`LABEL_ELLIPSIS`] when it is longer than `max_chars`.
pub fn truncate_label(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut out: String = name.chars().take(max_chars).collect();
    out.push_str(LABEL_ELLIPSIS);
    out
}

/// Count per distinct unit, in order of first appearance.
pub fn unit_distribution<'a, I>(records: I, label_max_chars: usize) -> Vec<UnitCount>
where
    I: IntoIterator<Item = &'a HouseOfficerRecord>,
{
    group_count(records, |r| r.unit_assigned)
        .into_iter()
        .map(|(unit, count)| UnitCount {
            label: truncate_label(unit.as_str(), label_max_chars),
            unit,
            count,
        })
        .collect()
}

/// Count per gender present, in order of first appearance. Genders with no
/// officers produce no entry.
pub fn gender_distribution<'a, I>(records: I) -> Vec<GenderCount>
where
    I: IntoIterator<Item = &'a HouseOfficerRecord>,
{
    group_count(records, |r| r.gender)
        .into_iter()
        .map(|(gender, count)| GenderCount { gender, count })
        .collect()
}

/// Monthly sign-in and presentation counts, oldest month first.
pub fn timeline<'a, I>(records: I) -> Vec<TimelineBucket>
where
    I: IntoIterator<Item = &'a HouseOfficerRecord>,
{
    let mut buckets: HashMap<(i32, u32), TimelineBucket> = HashMap::new();

    for rec in records {
        bucket_for(&mut buckets, rec.date_signed_in).sign_ins += 1;
        bucket_for(&mut buckets, rec.clinical_presentation_date).presentations += 1;
    }

    let mut out: Vec<TimelineBucket> = buckets.into_values().collect();
    out.sort_by_key(|b| (b.year, b.month));
    out
}

/// `MMM yyyy` month label.
pub fn month_label(date: NaiveDate) -> String {
    date.format("%b %Y").to_string()
}

fn bucket_for(
    buckets: &mut HashMap<(i32, u32), TimelineBucket>,
    date: NaiveDate,
) -> &mut TimelineBucket {
    buckets
        .entry((date.year(), date.month()))
        .or_insert_with(|| TimelineBucket {
            label: month_label(date),
            year: date.year(),
            month: date.month(),
            sign_ins: 0,
            presentations: 0,
        })
}

fn group_count<'a, I, K, F>(records: I, key: F) -> Vec<(K, usize)>
where
    I: IntoIterator<Item = &'a HouseOfficerRecord>,
    K: Copy + Eq + std::hash::Hash,
    F: Fn(&HouseOfficerRecord) -> K,
{
    let mut slot: HashMap<K, usize> = HashMap::new();
    let mut out: Vec<(K, usize)> = Vec::new();

    for rec in records {
        let k = key(rec);
        if let Some(&idx) = slot.get(&k) {
            out[idx].1 += 1;
        } else {
            slot.insert(k, out.len());
            out.push((k, 1));
        }
    }

    out
}
