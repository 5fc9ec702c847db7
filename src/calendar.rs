//! Pre-filled calendar deep links.
//!
//! Nothing here talks to a calendar API. A link is built and handed to a
//! [`CalendarOpener`]; whether the user saves the event is unknown.

use chrono::{NaiveDate, TimeDelta};
use url::Url;

use crate::{config::RegistryConfig, officer::HouseOfficerRecord};

/// Timestamp layout used in the `dates` parameter.
const STAMP_FORMAT: &str = "%Y%m%dT%H%M%SZ";

/// Calendar link or opener failure.
#[derive(Debug, thiserror::Error)]
pub enum CalendarError {
    /// The configured base URL or parameters did not form a valid URL.
    #[error("invalid calendar url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The event start or end could not be represented.
    #[error("event time out of range for {0}")]
    TimeOutOfRange(NaiveDate),
    /// The opener could not open the link (e.g. popup blocked).
    #[error("could not open calendar link: {0}")]
    Open(String),
}

/// One event to pre-fill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    /// Event title.
    pub title: String,
    /// Day the event starts, at midnight UTC.
    pub date: NaiveDate,
    /// Event details.
    pub description: String,
}

impl CalendarEvent {
    /// Presentation event for `rec`.
    pub fn presentation(rec: &HouseOfficerRecord) -> Self {
        Self {
            title: format!("Clinical Presentation: {}", rec.clinical_presentation_topic),
            date: rec.clinical_presentation_date,
            description: format!(
                "Clinical presentation by {} in {} unit",
                rec.full_name, rec.unit_assigned
            ),
        }
    }

    /// Sign-out event for `rec`.
    pub fn sign_out(rec: &HouseOfficerRecord) -> Self {
        Self {
            title: format!("Sign-out: {}", rec.full_name),
            date: rec.expected_sign_out_date,
            description: format!(
                "Expected sign-out date for {} from {} unit",
                rec.full_name, rec.unit_assigned
            ),
        }
    }
}

/// Builds the deep link for `event` using the configured endpoint,
/// location and event length.
pub fn event_link(config: &RegistryConfig, event: &CalendarEvent) -> Result<Url, CalendarError> {
    let start = event
        .date
        .and_hms_opt(0, 0, 0)
        .ok_or(CalendarError::TimeOutOfRange(event.date))?;
    let end = TimeDelta::try_hours(config.calendar_event_hours)
        .and_then(|d| start.checked_add_signed(d))
        .ok_or(CalendarError::TimeOutOfRange(event.date))?;
    let dates = format!(
        "{}/{}",
        start.format(STAMP_FORMAT),
        end.format(STAMP_FORMAT)
    );

    let url = Url::parse_with_params(
        &config.calendar_base_url,
        &[
            ("action", "TEMPLATE"),
            ("text", event.title.as_str()),
            ("dates", dates.as_str()),
            ("details", event.description.as_str()),
            ("location", config.calendar_location.as_str()),
        ],
    )?;
    Ok(url)
}

/// Opens a link in the user's browser, or wherever the host sends it.
pub trait CalendarOpener: Send {
    /// Attempts to open `url`. No signal comes back about what the user did.
    fn open(&mut self, url: &Url) -> Result<(), CalendarError>;
}

/// Opener that keeps every link it was given, for hosts that print or
/// forward them.
#[derive(Debug, Default, Clone)]
pub struct CollectingOpener {
    opened: Vec<Url>,
}

impl CollectingOpener {
    /// Empty opener.
    pub fn new() -> Self {
        Self::default()
    }

    /// Links opened so far.
    pub fn opened(&self) -> &[Url] {
        &self.opened
    }

    /// Takes the collected links.
    pub fn drain(&mut self) -> Vec<Url> {
        std::mem::take(&mut self.opened)
    }
}

impl CalendarOpener for CollectingOpener {
    fn open(&mut self, url: &Url) -> Result<(), CalendarError> {
        self.opened.push(url.clone());
        Ok(())
    }
}
