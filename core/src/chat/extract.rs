//! Keyword and regex extraction of trip parameters from free text.

use crate::gazetteer::match_destination;
use regex::Regex;
use std::sync::OnceLock;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TripInfo {
    pub destination: Option<&'static str>,
    pub days: Option<u32>,
}

fn day_count_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d+)\s*days?").expect("valid day-count pattern"))
}

fn bare_number_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\s*(\d+)\s*$").expect("valid bare-number pattern"))
}

/// Extract a destination and a day count from one message. Patterns
/// are tried in order: explicit "N day(s)", a bare number, "weekend"
/// (3 days), "week" (7 days). "weekend" must be checked before "week".
pub fn extract_trip_info(text: &str) -> TripInfo {
    let text_lower = text.to_lowercase();

    let destination = match_destination(text);

    let days = day_count_regex()
        .captures(&text_lower)
        .or_else(|| bare_number_regex().captures(&text_lower))
        .and_then(|caps| caps.get(1))
        .and_then(|m| m.as_str().parse::<u32>().ok())
        .or_else(|| {
            if text_lower.contains("weekend") {
                Some(3)
            } else if text_lower.contains("week") {
                Some(7)
            } else {
                None
            }
        })
        .filter(|d| *d > 0);

    TripInfo { destination, days }
}
