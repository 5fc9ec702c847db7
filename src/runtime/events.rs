//! Runtime event stream payloads.

use crate::types::OfficerId;

/// Events emitted from the single-writer runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    /// A house officer was registered and stored.
    Registered {
        /// New record id.
        id: OfficerId,
    },
    /// A house officer was deleted.
    Removed {
        /// Deleted record id.
        id: OfficerId,
    },
}
