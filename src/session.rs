//! One administrator's working session: store, view state and actions.
//!
//! Every action runs to completion before returning. Derived data (the
//! visible table and the charts) is recomputed from the store on each call.

use crate::{
    aggregate::Aggregates,
    calendar::{CalendarEvent, CalendarOpener, event_link},
    config::RegistryConfig,
    core::store::{OfficerStore, StoreError},
    export::{ExportError, Exporter, export_selection},
    notice::Notice,
    officer::{HouseOfficerRecord, OfficerForm},
    registration::{Clock, Registrar, SystemClock, ValidationErrors},
    types::OfficerId,
    view::{Selection, View, ViewQuery},
};

/// Why a registration was not stored.
#[derive(Debug, thiserror::Error)]
pub enum RegisterError {
    /// One or more form fields were rejected.
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    /// The store refused the record.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Successful registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// The stored record.
    pub record: HouseOfficerRecord,
    /// Confirmation to show.
    pub notice: Notice,
}

/// Session state behind the registration form and dashboard.
pub struct Session<C: Clock = SystemClock> {
    config: RegistryConfig,
    registrar: Registrar<C>,
    store: OfficerStore,
    query: ViewQuery,
    selection: Selection,
    last_registered: Option<HouseOfficerRecord>,
}

impl Session<SystemClock> {
    /// Session validating dates against the local wall clock.
    pub fn with_system_clock(config: RegistryConfig) -> Self {
        Self::new(config, SystemClock)
    }
}

impl<C: Clock> Session<C> {
    /// Empty session.
    pub fn new(config: RegistryConfig, clock: C) -> Self {
        Self {
            config,
            registrar: Registrar::new(clock),
            store: OfficerStore::new(),
            query: ViewQuery::default(),
            selection: Selection::new(),
            last_registered: None,
        }
    }

    /// Validates `form` and appends the resulting record.
    ///
    /// Once stored, the record becomes the "last registered" officer that
    /// calendar actions refer to.
    pub fn register(&mut self, form: &OfficerForm) -> Result<Registration, RegisterError> {
        let record = match self.registrar.register(form) {
            Ok(record) => record,
            Err(errors) => {
                tracing::info!(fields = ?errors.fields(), "registration rejected");
                return Err(errors.into());
            }
        };

        self.store_registered(record)
    }

    fn store_registered(&mut self, record: HouseOfficerRecord) -> Result<Registration, RegisterError> {
        self.store.append(record.clone())?;
        self.last_registered = Some(record.clone());
        tracing::info!(id = %record.id, unit = %record.unit_assigned, "house officer registered");

        Ok(Registration {
            record,
            notice: Notice::success("Success!", "House officer registered successfully."),
        })
    }

    /// Deletes one record and drops it from the selection. Absent ids are a
    /// no-op.
    pub fn delete(&mut self, id: OfficerId) -> Option<HouseOfficerRecord> {
        self.selection.forget(id);
        let removed = self.store.remove_by_id(id);
        if removed.is_some() {
            tracing::info!(%id, "house officer deleted");
        }
        removed
    }

    /// Current search, filter and sort.
    pub fn query(&self) -> &ViewQuery {
        &self.query
    }

    /// Replaces the search, filter and sort. The selection is kept.
    pub fn set_query(&mut self, query: ViewQuery) {
        self.query = query;
    }

    /// Rows visible under the current query.
    pub fn view(&self) -> View<'_> {
        self.query.apply(self.store.iter())
    }

    /// Chart series over every stored record.
    pub fn aggregates(&self) -> Aggregates {
        Aggregates::compute(self.store.iter(), self.config.unit_label_max_chars)
    }

    /// Current selection.
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Ticks or unticks one row.
    pub fn set_selected(&mut self, id: OfficerId, checked: bool) {
        self.selection.set(id, checked);
    }

    /// The "select all" checkbox: checked selects exactly the visible rows.
    pub fn set_all_selected(&mut self, checked: bool) {
        let view = self.query.apply(self.store.iter());
        self.selection.set_all(&view, checked);
    }

    /// State of the "select all" checkbox.
    pub fn all_visible_selected(&self) -> bool {
        self.selection.all_visible_selected(&self.view())
    }

    /// Exports the selected rows of the current view.
    ///
    /// Failures come back as a notice; the store is never affected.
    pub fn export_selected<E: Exporter + ?Sized>(&self, exporter: &mut E) -> Result<usize, Notice> {
        let view = self.view();
        match export_selection(&view, &self.selection, exporter) {
            Ok(n) => Ok(n),
            Err(ExportError::EmptySelection) => Err(Notice::warning(
                "Nothing Selected",
                "Please select at least one house officer to export.",
            )),
            Err(err) => {
                tracing::warn!(error = %err, "export failed");
                Err(Notice::warning("Export Error", err.to_string()))
            }
        }
    }

    /// Opens calendar links for the last registered officer's presentation
    /// and expected sign-out.
    ///
    /// Always returns a notice; failures never touch the store.
    pub fn add_to_calendar<O: CalendarOpener + ?Sized>(&self, opener: &mut O) -> Notice {
        let Some(officer) = self.last_registered.as_ref() else {
            return Notice::error(
                "No Officer Registered",
                "Please register a house officer first before adding to calendar.",
            );
        };

        let events = [
            CalendarEvent::presentation(officer),
            CalendarEvent::sign_out(officer),
        ];
        for event in &events {
            let opened = event_link(&self.config, event).and_then(|url| opener.open(&url));
            if let Err(err) = opened {
                tracing::warn!(id = %officer.id, error = %err, "calendar link failed");
                return Notice::warning(
                    "Calendar Error",
                    "There was an issue creating the calendar events. Please try again.",
                );
            }
        }

        tracing::info!(id = %officer.id, "calendar links opened");
        Notice::success(
            "Calendar Events Created!",
            "Calendar events have been created for the presentation and sign-out dates.",
        )
    }

    /// Most recent successful registration, if any.
    pub fn last_registered(&self) -> Option<&HouseOfficerRecord> {
        self.last_registered.as_ref()
    }

    /// Underlying store.
    pub fn store(&self) -> &OfficerStore {
        &self.store
    }

    /// Session configuration.
    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }
}
