//! Links Agent
//!
//! Pure URL templating: builds pre-filled booking links for flight,
//! hotel, activity, and restaurant sites. No network calls; identical
//! inputs always produce byte-identical URLs.

use super::{Agent, AgentResult};
use crate::gazetteer::airport_code;
use crate::trip::TripRequest;
use async_trait::async_trait;
use chrono::NaiveDate;
use tracing::debug;

/// Ordered (provider, url) pairs for one booking category
pub type ProviderLinks = Vec<(&'static str, String)>;

/// Links agent
#[derive(Debug, Clone, Default)]
pub struct LinksAgent;

impl LinksAgent {
    pub fn new() -> Self {
        Self
    }

    /// Flight search links across six booking sites. Cities are mapped
    /// to IATA codes through the airport gazetteer first.
    pub fn flight_links(
        origin: &str,
        destination: &str,
        departure: NaiveDate,
        ret: NaiveDate,
        passengers: u32,
    ) -> ProviderLinks {
        let origin_code = airport_code(origin);
        let dest_code = airport_code(destination);
        let dep = departure.format("%Y-%m-%d").to_string();
        let ret_s = ret.format("%Y-%m-%d").to_string();
        // Google Flights wants the dates without separators
        let dep_compact = dep.replace('-', "");
        let ret_compact = ret_s.replace('-', "");

        vec![
            (
                "Google Flights",
                format!(
                    "https://www.google.com/travel/flights?q=Flights%20to%20{dest_code}%20from%20{origin_code}%20on%20{dep_compact}%20through%20{ret_compact}&curr=USD"
                ),
            ),
            (
                "Kayak",
                format!(
                    "https://www.kayak.com/flights/{origin_code}-{dest_code}/{dep}/{ret_s}/{passengers}adults?sort=bestflight_a"
                ),
            ),
            (
                "Skyscanner",
                format!(
                    "https://www.skyscanner.com/transport/flights/{}/{}/{dep}/{ret_s}/?adults={passengers}&adultsv2={passengers}&cabinclass=economy",
                    origin_code.to_lowercase(),
                    dest_code.to_lowercase()
                ),
            ),
            (
                "Expedia",
                format!(
                    "https://www.expedia.com/Flights-Search?flight-type=roundtrip&mode=search&trip=roundtrip&leg1=from:{origin_code},to:{dest_code},departure:{dep}TANYT&leg2=from:{dest_code},to:{origin_code},departure:{ret_s}TANYT&passengers=adults:{passengers},children:0,infantinlap:N&options=cabinclass:economy"
                ),
            ),
            (
                "Momondo",
                format!(
                    "https://www.momondo.com/flight-search/{origin_code}-{dest_code}/{dep}/{ret_s}?sort=bestflight_a"
                ),
            ),
            (
                "CheapOair",
                format!(
                    "https://www.cheapoair.com/flights/results?type=roundtrip&from1={origin_code}&to1={dest_code}&date1={dep}&date2={ret_s}&adults={passengers}&seniors=0&children=0"
                ),
            ),
        ]
    }

    /// Hotel search links keyed by percent-encoded city name
    pub fn hotel_links(
        destination: &str,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: u32,
    ) -> ProviderLinks {
        let dest = percent_encode(destination);
        let checkin = check_in.format("%Y-%m-%d").to_string();
        let checkout = check_out.format("%Y-%m-%d").to_string();

        vec![
            (
                "Booking.com",
                format!(
                    "https://www.booking.com/searchresults.html?ss={dest}&checkin={checkin}&checkout={checkout}&group_adults={guests}"
                ),
            ),
            (
                "Hotels.com",
                format!(
                    "https://www.hotels.com/search.do?destination={dest}&startDate={checkin}&endDate={checkout}&rooms=1&adults={guests}"
                ),
            ),
            (
                "Airbnb",
                format!(
                    "https://www.airbnb.com/s/{dest}/homes?checkin={checkin}&checkout={checkout}&adults={guests}"
                ),
            ),
            (
                "Expedia Hotels",
                format!(
                    "https://www.expedia.com/Hotel-Search?destination={dest}&startDate={checkin}&endDate={checkout}&rooms=1&adults={guests}"
                ),
            ),
            (
                "Tripadvisor",
                format!("https://www.tripadvisor.com/Hotels-g{dest}-Hotels.html"),
            ),
        ]
    }

    /// Activity and attraction search links
    pub fn activity_links(destination: &str) -> ProviderLinks {
        let dest = percent_encode(destination);
        vec![
            (
                "Viator",
                format!("https://www.viator.com/searchResults/all?text={dest}"),
            ),
            (
                "GetYourGuide",
                format!("https://www.getyourguide.com/s/?q={dest}"),
            ),
            (
                "Tripadvisor Activities",
                format!("https://www.tripadvisor.com/Attractions-g{dest}-Activities.html"),
            ),
            (
                "Klook",
                format!("https://www.klook.com/en-US/search/?query={dest}"),
            ),
            (
                "Airbnb Experiences",
                format!("https://www.airbnb.com/s/{dest}/experiences"),
            ),
        ]
    }

    /// Restaurant search links
    pub fn restaurant_links(destination: &str) -> ProviderLinks {
        let dest = percent_encode(destination);
        vec![
            (
                "OpenTable",
                format!(
                    "https://www.opentable.com/s/?dateTime={dest}&covers=2&view=list&metroId=&latitude=&longitude="
                ),
            ),
            (
                "Yelp",
                format!("https://www.yelp.com/search?find_desc=restaurants&find_loc={dest}"),
            ),
            (
                "Tripadvisor Restaurants",
                format!("https://www.tripadvisor.com/Restaurants-g{dest}.html"),
            ),
            (
                "The Fork",
                format!("https://www.thefork.com/search?cityId={dest}"),
            ),
            (
                "Google Maps",
                format!("https://www.google.com/maps/search/restaurants+near+{dest}"),
            ),
        ]
    }

    /// Render every booking category as one markdown block
    pub fn format_all_links(request: &TripRequest) -> String {
        debug!(
            target: "links",
            origin = %request.origin,
            destination = %request.destination,
            "Generating booking links"
        );

        let flights = Self::flight_links(
            &request.origin,
            &request.destination,
            request.departure_date,
            request.return_date,
            request.passengers,
        );
        let hotels = Self::hotel_links(
            &request.destination,
            request.departure_date,
            request.return_date,
            request.passengers,
        );
        let activities = Self::activity_links(&request.destination);
        let restaurants = Self::restaurant_links(&request.destination);

        let mut out = String::from("## Your Booking Links\n");
        for (title, links) in [
            ("### Flight Booking", &flights),
            ("### Hotel Booking", &hotels),
            ("### Activities & Tours", &activities),
            ("### Restaurant Reservations", &restaurants),
        ] {
            out.push('\n');
            out.push_str(title);
            out.push('\n');
            for (name, url) in links {
                out.push_str(&format!("- {name}: {url}\n"));
            }
        }
        out.push_str("\nTip: open these links to compare prices and book directly.\n");
        out
    }
}

#[async_trait]
impl Agent for LinksAgent {
    fn name(&self) -> String {
        "links".to_string()
    }

    fn description(&self) -> String {
        "Pre-filled booking links for flights, hotels, activities, and restaurants".to_string()
    }

    async fn execute(&self, request: &TripRequest) -> AgentResult<String> {
        Ok(Self::format_all_links(request))
    }
}

/// RFC 3986 percent-encoding with space as %20; `/` is kept as-is to
/// match the URL shapes the booking sites expect.
pub fn percent_encode(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '_' | '.' | '~' | '/' => c.to_string(),
            _ => {
                let mut buf = [0; 4];
                let bytes = c.encode_utf8(&mut buf).as_bytes();
                bytes.iter().map(|b| format!("%{:02X}", b)).collect()
            }
        })
        .collect()
}
