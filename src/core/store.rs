use hashbrown::HashMap;

use crate::{officer::HouseOfficerRecord, types::OfficerId};

/// Store invariant violations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// A record with this id is already held. Id generation should make
    /// this unreachable.
    #[error("duplicate officer id {0}")]
    DuplicateId(OfficerId),
}

/// Insertion-ordered collection of house-officer records for one session.
///
/// There is no update path: a record is appended once and removed once.
#[derive(Debug, Default)]
pub struct OfficerStore {
    records: HashMap<OfficerId, HouseOfficerRecord>,
    order: Vec<OfficerId>,
}

impl OfficerStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `record` at the end of the ordering.
    ///
    /// Fails only on a duplicate id, which debug builds treat as a bug.
    pub fn append(&mut self, record: HouseOfficerRecord) -> Result<OfficerId, StoreError> {
        let id = record.id;
        if self.records.contains_key(&id) {
            debug_assert!(false, "duplicate officer id {id}");
            tracing::error!(%id, "refusing to append duplicate officer id");
            return Err(StoreError::DuplicateId(id));
        }

        self.order.push(id);
        self.records.insert(id, record);
        tracing::debug!(%id, len = self.order.len(), "officer appended");
        Ok(id)
    }

    /// Removes the record with `id`, returning it. Absent ids are a no-op.
    pub fn remove_by_id(&mut self, id: OfficerId) -> Option<HouseOfficerRecord> {
        let removed = self.records.remove(&id)?;
        if let Some(pos) = self.order.iter().position(|x| *x == id) {
            self.order.remove(pos);
        }
        tracing::debug!(%id, len = self.order.len(), "officer removed");
        Some(removed)
    }

    /// Records in insertion order.
    pub fn list(&self) -> Vec<&HouseOfficerRecord> {
        self.iter().collect()
    }

    /// Owned copy of [`Self::list`].
    pub fn list_cloned(&self) -> Vec<HouseOfficerRecord> {
        self.iter().cloned().collect()
    }

    /// Iterates records in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &HouseOfficerRecord> {
        self.order.iter().filter_map(|id| self.records.get(id))
    }

    /// Looks up one record.
    pub fn get(&self, id: OfficerId) -> Option<&HouseOfficerRecord> {
        self.records.get(&id)
    }

    /// Owned copy of [`Self::get`].
    pub fn get_cloned(&self, id: OfficerId) -> Option<HouseOfficerRecord> {
        self.get(id).cloned()
    }

    /// True when a record with `id` is held.
    pub fn contains(&self, id: OfficerId) -> bool {
        self.records.contains_key(&id)
    }

    /// Ids in insertion order.
    pub fn ordered_ids(&self) -> &[OfficerId] {
        &self.order
    }

    /// Number of records held.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// True when no records are held.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
