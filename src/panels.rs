// Fixed informational content. None of it comes from a live source.

use crate::session::Settings;
use crate::storage::LocationRecord;

pub const SAFETY_ALERTS: &str = "No current safety alerts in your area";

pub const WEATHER_ALERTS: &str = "Severe thunderstorm warning in your area.";

pub const SAFETY_TIPS: &str = "1. Always be aware of your surroundings.\n\
2. Avoid walking alone at night.\n\
3. Keep your phone fully charged.\n\
4. Trust your instincts. If something feels off, take action.";

pub const NEARBY_SERVICES_URL: &str = "https://www.google.com/maps/search/nearest+police+station";

pub const HELP_CENTER_URL: &str = "https://www.example.com/help";

pub const HISTORY_LIMIT: usize = 20;

pub fn check_in_message(settings: &Settings) -> String {
    if settings.check_in_enabled {
        format!("Safety check-ins are set to {} minutes.", settings.check_in_interval)
    } else {
        "Periodic safety check-ins are disabled.".to_string()
    }
}

pub fn location_history(records: &[LocationRecord]) -> String {
    if records.is_empty() {
        return "No locations recorded yet.".to_string();
    }
    records.iter().map(LocationRecord::line).collect::<Vec<_>>().join("\n")
}

pub fn session_counts(alerts: usize, incidents: usize) -> String {
    format!("Alerts sent this session: {alerts}\nIncident reports saved: {incidents}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn check_in_reflects_checkbox() {
        let mut settings = Settings::default();
        assert_eq!(check_in_message(&settings), "Periodic safety check-ins are disabled.");
        settings.check_in_enabled = true;
        assert_eq!(check_in_message(&settings), "Safety check-ins are set to 10 minutes.");
    }

    #[test]
    fn counts_line() {
        assert_eq!(session_counts(1, 0), "Alerts sent this session: 1\nIncident reports saved: 0");
    }

    #[test]
    fn history_lists_records() {
        assert_eq!(location_history(&[]), "No locations recorded yet.");
        let record = LocationRecord {
            recorded_at: Utc.with_ymd_and_hms(2026, 3, 1, 9, 30, 0).unwrap(),
            latitude: 1.25,
            longitude: -2.5,
            label: None,
        };
        assert_eq!(
            location_history(&[record.clone(), record]),
            "2026-03-01 09:30  Latitude: 1.25, Longitude: -2.5\n\
             2026-03-01 09:30  Latitude: 1.25, Longitude: -2.5"
        );
    }
}
