//! Filtered, searched and sorted projection of the store, plus selection.
//!
//! Views are recomputed from the records on every call; the only state kept
//! between calls is the [`ViewQuery`] and the [`Selection`] themselves.

use std::cmp::Ordering;

use hashbrown::HashSet;
use serde::Serialize;

use crate::{
    officer::HouseOfficerRecord,
    types::{Gender, OfficerId, Unit},
};

/// Unit filter choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum UnitFilter {
    /// Every unit.
    #[default]
    All,
    /// Only this unit.
    Only(Unit),
}

impl UnitFilter {
    /// Filter choices in menu order, drawn from the shared unit list.
    pub fn options() -> Vec<UnitFilter> {
        std::iter::once(UnitFilter::All)
            .chain(Unit::ALL.into_iter().map(UnitFilter::Only))
            .collect()
    }

    fn admits(&self, unit: Unit) -> bool {
        match self {
            UnitFilter::All => true,
            UnitFilter::Only(u) => *u == unit,
        }
    }
}

/// Gender filter choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum GenderFilter {
    /// Every gender.
    #[default]
    All,
    /// Only this gender.
    Only(Gender),
}

impl GenderFilter {
    /// Filter choices in menu order.
    pub fn options() -> Vec<GenderFilter> {
        std::iter::once(GenderFilter::All)
            .chain(Gender::ALL.into_iter().map(GenderFilter::Only))
            .collect()
    }

    fn admits(&self, gender: Gender) -> bool {
        match self {
            GenderFilter::All => true,
            GenderFilter::Only(g) => *g == gender,
        }
    }
}

/// Active sort key. Exactly one applies at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum SortKey {
    /// Full name, case-insensitive, A to Z.
    Name,
    /// Sign-in date, most recent first.
    #[default]
    SignInDate,
    /// Unit name, A to Z.
    Unit,
    /// Presentation date, soonest first.
    PresentationDate,
}

impl SortKey {
    fn compare(&self, a: &HouseOfficerRecord, b: &HouseOfficerRecord) -> Ordering {
        match self {
            SortKey::Name => a
                .full_name
                .to_lowercase()
                .cmp(&b.full_name.to_lowercase()),
            SortKey::SignInDate => b.date_signed_in.cmp(&a.date_signed_in),
            SortKey::Unit => a.unit_assigned.as_str().cmp(b.unit_assigned.as_str()),
            SortKey::PresentationDate => a
                .clinical_presentation_date
                .cmp(&b.clinical_presentation_date),
        }
    }
}

/// Current search, filter and sort selections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ViewQuery {
    /// Case-insensitive substring matched against name or topic.
    pub search: String,
    /// Unit filter.
    pub unit: UnitFilter,
    /// Gender filter.
    pub gender: GenderFilter,
    /// Sort key applied after filtering.
    pub sort: SortKey,
}

impl ViewQuery {
    /// True when `rec` passes the search term and both filters.
    pub fn matches(&self, rec: &HouseOfficerRecord) -> bool {
        self.matches_search(rec) && self.unit.admits(rec.unit_assigned) && self.gender.admits(rec.gender)
    }

    fn matches_search(&self, rec: &HouseOfficerRecord) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        rec.full_name.to_lowercase().contains(&needle)
            || rec.clinical_presentation_topic.to_lowercase().contains(&needle)
    }

    /// Filters then sorts `records`. Ties keep their input order.
    pub fn apply<'a, I>(&self, records: I) -> View<'a>
    where
        I: IntoIterator<Item = &'a HouseOfficerRecord>,
    {
        let mut rows: Vec<&HouseOfficerRecord> =
            records.into_iter().filter(|r| self.matches(r)).collect();
        rows.sort_by(|a, b| self.sort.compare(a, b));
        View { rows }
    }
}

/// Rows visible under a [`ViewQuery`], in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View<'a> {
    rows: Vec<&'a HouseOfficerRecord>,
}

impl<'a> View<'a> {
    /// Visible rows.
    pub fn rows(&self) -> &[&'a HouseOfficerRecord] {
        &self.rows
    }

    /// Visible ids in display order.
    pub fn ids(&self) -> Vec<OfficerId> {
        self.rows.iter().map(|r| r.id).collect()
    }

    /// Number of visible rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True when nothing matches.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Owned copies of the visible rows.
    pub fn to_records(&self) -> Vec<HouseOfficerRecord> {
        self.rows.iter().map(|r| (*r).clone()).collect()
    }
}

/// Ids the user has ticked. Independent of filters: ids hidden by a filter
/// stay selected.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: HashSet<OfficerId>,
}

impl Selection {
    /// Empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Ticks or unticks one row.
    pub fn set(&mut self, id: OfficerId, checked: bool) {
        if checked {
            self.ids.insert(id);
        } else {
            self.ids.remove(&id);
        }
    }

    /// Flips one row and returns its new state.
    pub fn toggle(&mut self, id: OfficerId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    /// Replaces the selection with exactly the rows visible in `view`.
    pub fn select_all(&mut self, view: &View<'_>) {
        self.ids = view.rows.iter().map(|r| r.id).collect();
    }

    /// Handles the "select all" checkbox: checked selects the visible rows,
    /// unchecked clears everything.
    pub fn set_all(&mut self, view: &View<'_>, checked: bool) {
        if checked {
            self.select_all(view);
        } else {
            self.clear();
        }
    }

    /// Deselects everything.
    pub fn clear(&mut self) {
        self.ids.clear();
    }

    /// Drops `id`, e.g. after its record was deleted.
    pub fn forget(&mut self, id: OfficerId) {
        self.ids.remove(&id);
    }

    /// True when `id` is ticked.
    pub fn contains(&self, id: OfficerId) -> bool {
        self.ids.contains(&id)
    }

    /// Number of ticked ids, visible or not.
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// True when nothing is ticked.
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// State of the "select all" checkbox: every visible row is ticked and
    /// there is at least one.
    pub fn all_visible_selected(&self, view: &View<'_>) -> bool {
        !view.is_empty() && view.rows.iter().all(|r| self.ids.contains(&r.id))
    }

    /// Visible rows that are ticked, in display order.
    pub fn selected_in<'a>(&self, view: &View<'a>) -> Vec<&'a HouseOfficerRecord> {
        view.rows
            .iter()
            .copied()
            .filter(|r| self.ids.contains(&r.id))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::officer::derive_sign_out;

    fn rec(name: &str, topic: &str, unit: Unit, gender: Gender, signed: (i32, u32, u32), pres: (i32, u32, u32)) -> HouseOfficerRecord {
        let signed = NaiveDate::from_ymd_opt(signed.0, signed.1, signed.2).expect("date");
        HouseOfficerRecord {
            id: OfficerId::new_v4(),
            full_name: name.to_string(),
            gender,
            date_signed_in: signed,
            unit_assigned: unit,
            clinical_presentation_topic: topic.to_string(),
            clinical_presentation_date: NaiveDate::from_ymd_opt(pres.0, pres.1, pres.2).expect("date"),
            expected_sign_out_date: derive_sign_out(signed).expect("in range"),
        }
    }

    fn sample() -> Vec<HouseOfficerRecord> {
        vec![
            rec("bola Ade", "Heart Failure", Unit::Cardiology1, Gender::Male, (2025, 1, 10), (2025, 3, 1)),
            rec("Amaka Eze", "Stroke Thrombolysis", Unit::Neurology, Gender::Female, (2025, 2, 10), (2025, 2, 20)),
            rec("Chidi Obi", "Diabetic Ketoacidosis", Unit::Endocrinology, Gender::Male, (2024, 12, 1), (2025, 1, 5)),
        ]
    }

    fn names(view: &View<'_>) -> Vec<String> {
        view.rows().iter().map(|r| r.full_name.clone()).collect()
    }

    #[test]
    fn default_sort_is_most_recent_sign_in_first() {
        let records = sample();
        let view = ViewQuery::default().apply(&records);
        assert_eq!(names(&view), vec!["Amaka Eze", "bola Ade", "Chidi Obi"]);
    }

    #[test]
    fn name_sort_ignores_case() {
        let records = sample();
        let q = ViewQuery { sort: SortKey::Name, ..ViewQuery::default() };
        assert_eq!(names(&q.apply(&records)), vec!["Amaka Eze", "bola Ade", "Chidi Obi"]);
    }

    #[test]
    fn unit_and_presentation_sorts_ascend() {
        let records = sample();
        let by_unit = ViewQuery { sort: SortKey::Unit, ..ViewQuery::default() };
        assert_eq!(names(&by_unit.apply(&records)), vec!["bola Ade", "Chidi Obi", "Amaka Eze"]);

        let by_pres = ViewQuery { sort: SortKey::PresentationDate, ..ViewQuery::default() };
        assert_eq!(names(&by_pres.apply(&records)), vec!["Chidi Obi", "Amaka Eze", "bola Ade"]);
    }

    #[test]
    fn search_matches_name_or_topic_case_insensitively() {
        let records = sample();
        let q = ViewQuery { search: "STROKE".to_string(), ..ViewQuery::default() };
        assert_eq!(names(&q.apply(&records)), vec!["Amaka Eze"]);

        let q = ViewQuery { search: "obi".to_string(), ..ViewQuery::default() };
        assert_eq!(names(&q.apply(&records)), vec!["Chidi Obi"]);
    }

    #[test]
    fn filters_combine_with_search() {
        let records = sample();
        let q = ViewQuery {
            search: "a".to_string(),
            gender: GenderFilter::Only(Gender::Male),
            unit: UnitFilter::Only(Unit::Cardiology1),
            ..ViewQuery::default()
        };
        assert_eq!(names(&q.apply(&records)), vec!["bola Ade"]);

        let q = ViewQuery { unit: UnitFilter::Only(Unit::Rheumatology), ..ViewQuery::default() };
        assert!(q.apply(&records).is_empty());
    }

    #[test]
    fn filter_options_come_from_shared_lists() {
        assert_eq!(UnitFilter::options().len(), Unit::ALL.len() + 1);
        assert_eq!(GenderFilter::options(), vec![
            GenderFilter::All,
            GenderFilter::Only(Gender::Male),
            GenderFilter::Only(Gender::Female),
        ]);
    }

    #[test]
    fn hidden_selection_survives_filter_change_but_indicator_tracks_view() {
        let records = sample();
        let mut sel = Selection::new();
        let all = ViewQuery::default().apply(&records);
        sel.select_all(&all);
        assert!(sel.all_visible_selected(&all));

        let males = ViewQuery { gender: GenderFilter::Only(Gender::Male), ..ViewQuery::default() };
        let view = males.apply(&records);
        assert_eq!(sel.len(), 3);
        assert!(sel.all_visible_selected(&view));

        sel.set(view.ids()[0], false);
        assert!(!sel.all_visible_selected(&view));
        assert_eq!(sel.selected_in(&view).len(), 1);
        assert_eq!(sel.len(), 2);
    }

    #[test]
    fn empty_view_is_never_fully_selected() {
        let records = sample();
        let q = ViewQuery { search: "zzz".to_string(), ..ViewQuery::default() };
        let view = q.apply(&records);
        let mut sel = Selection::new();
        sel.select_all(&view);
        assert!(sel.is_empty());
        assert!(!sel.all_visible_selected(&view));
    }

    #[test]
    fn toggle_flips_membership() {
        let id = OfficerId::new_v4();
        let mut sel = Selection::new();
        assert!(sel.toggle(id));
        assert!(sel.contains(id));
        assert!(!sel.toggle(id));
        assert!(!sel.contains(id));
    }
}
