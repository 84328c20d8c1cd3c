//! Static gazetteers: free-text place names to canonical destination
//! names, and city names to IATA airport codes.
//!
//! Both tables are ordered lists of (lowercase key, value) pairs.
//! Destination matching scans by descending key length so that
//! "san salvador" wins over "el salvador"-style overlaps; ties keep
//! the original table order.

/// Worldwide destinations recognized by the chat planner.
pub const DESTINATIONS: &[(&str, &str)] = &[
    ("el salvador", "El Salvador"),
    ("san salvador", "San Salvador, El Salvador"),
    ("guatemala", "Guatemala"),
    ("antigua", "Antigua, Guatemala"),
    ("lake atitlan", "Lake Atitlan, Guatemala"),
    ("costa rica", "Costa Rica"),
    ("nicaragua", "Nicaragua"),
    ("panama", "Panama"),
    ("mexico", "Mexico"),
    ("cancun", "Cancun, Mexico"),
    ("tulum", "Tulum, Mexico"),
    ("peru", "Peru"),
    ("machu picchu", "Machu Picchu, Peru"),
    ("cusco", "Cusco, Peru"),
    ("colombia", "Colombia"),
    ("cartagena", "Cartagena, Colombia"),
    ("brazil", "Brazil"),
    ("rio", "Rio de Janeiro, Brazil"),
    ("argentina", "Argentina"),
    ("buenos aires", "Buenos Aires, Argentina"),
    ("san francisco", "San Francisco, USA"),
    ("los angeles", "Los Angeles, USA"),
    ("new york", "New York City, USA"),
    ("miami", "Miami, USA"),
    ("paris", "Paris, France"),
    ("london", "London, UK"),
    ("rome", "Rome, Italy"),
    ("barcelona", "Barcelona, Spain"),
    ("amsterdam", "Amsterdam, Netherlands"),
    ("santorini", "Santorini, Greece"),
    ("tokyo", "Tokyo, Japan"),
    ("bali", "Bali, Indonesia"),
    ("dubai", "Dubai, UAE"),
    ("bangkok", "Bangkok, Thailand"),
    ("singapore", "Singapore"),
    ("morocco", "Morocco"),
    ("egypt", "Egypt"),
    ("south africa", "South Africa"),
    ("australia", "Australia"),
    ("sydney", "Sydney, Australia"),
    ("new zealand", "New Zealand"),
];

/// City names (and common abbreviations) to IATA airport codes used
/// when templating flight booking URLs.
pub const AIRPORT_CODES: &[(&str, &str)] = &[
    ("taipei", "TPE"),
    ("los angeles", "LAX"),
    ("san francisco", "SFO"),
    ("new york", "JFK"),
    ("seattle", "SEA"),
    ("chicago", "ORD"),
    ("houston", "IAH"),
    ("vancouver", "YVR"),
    ("toronto", "YYZ"),
    ("bangkok", "BKK"),
    ("singapore", "SIN"),
    ("tokyo", "NRT"),
    ("osaka", "KIX"),
    ("seoul", "ICN"),
    ("hong kong", "HKG"),
    ("manila", "MNL"),
    ("london", "LHR"),
    ("paris", "CDG"),
    ("vienna", "VIE"),
    ("amsterdam", "AMS"),
    ("la", "LAX"),
    ("sf", "SFO"),
    ("nyc", "JFK"),
    ("ny", "JFK"),
    ("taiwan", "TPE"),
];

/// Find the canonical destination mentioned in free text, preferring
/// the longest matching key. Returns `None` when nothing matches.
pub fn match_destination(text: &str) -> Option<&'static str> {
    let text_lower = text.to_lowercase();
    let mut entries: Vec<(usize, &(&str, &str))> = DESTINATIONS.iter().enumerate().collect();
    // Descending key length; stable sort keeps table order on ties
    entries.sort_by(|a, b| b.1 .0.len().cmp(&a.1 .0.len()).then(a.0.cmp(&b.0)));
    entries
        .into_iter()
        .find(|(_, (key, _))| text_lower.contains(key))
        .map(|(_, (_, value))| *value)
}

/// Resolve a city name (or code) to an IATA airport code. Unknown
/// inputs fall back to an upper-cased copy of the raw input.
pub fn airport_code(city_or_code: &str) -> String {
    let key = city_or_code.to_lowercase();
    let key = key.trim();
    AIRPORT_CODES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, code)| (*code).to_string())
        .unwrap_or_else(|| city_or_code.trim().to_uppercase())
}
