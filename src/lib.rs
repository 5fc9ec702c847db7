//! In-session register of house officers for a department of internal
//! medicine: validated registration, an insertion-ordered store, filtered
//! views with selection, and chart-ready aggregates.
//!
//! # Examples
//!
//! Registering through a [`session::Session`]:
//! ```
//! use chrono::NaiveDate;
//! use hoflow::{
//!     config::RegistryConfig,
//!     officer::OfficerForm,
//!     registration::FixedClock,
//!     session::Session,
//!     types::Unit,
//!     view::{UnitFilter, ViewQuery},
//! };
//!
//! let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
//! let mut session = Session::new(RegistryConfig::default(), FixedClock(today));
//! let reg = session.register(&OfficerForm {
//!     full_name: "Jane Okoye".to_string(),
//!     gender: Some("Female".to_string()),
//!     date_signed_in: NaiveDate::from_ymd_opt(2025, 1, 15),
//!     unit_assigned: Some("Nephrology".to_string()),
//!     clinical_presentation_topic: "Acute Kidney Injury Review".to_string(),
//!     clinical_presentation_date: NaiveDate::from_ymd_opt(2025, 2, 1),
//! }).expect("register");
//! assert_eq!(reg.record.expected_sign_out_date, NaiveDate::from_ymd_opt(2025, 4, 15).unwrap());
//!
//! session.set_query(ViewQuery { unit: UnitFilter::Only(Unit::Nephrology), ..ViewQuery::default() });
//! assert_eq!(session.view().ids(), vec![reg.record.id]);
//! ```
//!
//! Runtime usage, where one task owns the session:
//! ```no_run
//! use hoflow::{
//!     config::RegistryConfig,
//!     officer::OfficerForm,
//!     runtime::handle::spawn_registry,
//!     session::Session,
//! };
//!
//! # #[tokio::main]
//! # async fn main() {
//! let handle = spawn_registry(Session::with_system_clock(RegistryConfig::default()));
//! let _ = handle.register(OfficerForm::default()).await;
//! handle.shutdown().await.expect("shutdown");
//! # }
//! ```
#![warn(missing_docs)]

/// Chart aggregates over the whole store.
pub mod aggregate;
/// Calendar deep links and the opener seam.
pub mod calendar;
/// Session and runtime configuration.
pub mod config;
/// Core in-memory store.
pub mod core;
/// Export of selected records.
pub mod export;
/// User-visible notices.
pub mod notice;
/// House-officer record and form types.
pub mod officer;
/// Form validation and record construction.
pub mod registration;
/// Single-writer runtime handle and events.
pub mod runtime;
/// Session façade tying the layers together.
pub mod session;
/// Shared identifiers and enumerations.
pub mod types;
/// Filtered views and selection.
pub mod view;
