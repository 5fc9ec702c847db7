//! Session and runtime tunables.

/// Default calendar deep-link endpoint.
pub const DEFAULT_CALENDAR_BASE_URL: &str = "https://calendar.google.com/calendar/render";
/// Default event location embedded in calendar links.
pub const DEFAULT_CALENDAR_LOCATION: &str = "FMC Umuahia, Department of Internal Medicine";

/// Configuration shared by the session, calendar links and runtime loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryConfig {
    /// Unit names longer than this are shortened for chart labels.
    pub unit_label_max_chars: usize,
    /// Calendar deep-link endpoint.
    pub calendar_base_url: String,
    /// Fixed location string attached to calendar events.
    pub calendar_location: String,
    /// Calendar event length in hours.
    pub calendar_event_hours: i64,
    /// Bound of the runtime command channel.
    pub command_queue_bound: usize,
    /// Capacity of the runtime event broadcast channel.
    pub event_capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            unit_label_max_chars: 12,
            calendar_base_url: DEFAULT_CALENDAR_BASE_URL.to_string(),
            calendar_location: DEFAULT_CALENDAR_LOCATION.to_string(),
            calendar_event_hours: 1,
            command_queue_bound: 256,
            event_capacity: 1024,
        }
    }
}
