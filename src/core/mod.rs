//! In-memory session store.

/// Authoritative house-officer store.
pub mod store;
