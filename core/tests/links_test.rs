/// Unit tests for the links agent: purity, determinism, and exact
/// URL shapes for the supported booking providers.
use chrono::NaiveDate;
use itinera_core::agents::links::{percent_encode, LinksAgent};
use itinera_core::agents::Agent;
use itinera_core::trip::TripRequest;

fn barcelona_request() -> TripRequest {
    TripRequest {
        origin: "San Francisco".to_string(),
        destination: "Barcelona".to_string(),
        departure_date: "2025-12-15".parse().unwrap(),
        return_date: "2025-12-22".parse().unwrap(),
        passengers: 2,
        budget: 2000,
        interests: "architecture, food, beaches".to_string(),
    }
}

fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

#[test]
fn flight_links_use_airport_codes() {
    let links = LinksAgent::flight_links(
        "San Francisco",
        "Barcelona",
        date("2025-12-15"),
        date("2025-12-22"),
        2,
    );
    assert_eq!(links.len(), 6);
    let names: Vec<&str> = links.iter().map(|(n, _)| *n).collect();
    assert_eq!(
        names,
        vec![
            "Google Flights",
            "Kayak",
            "Skyscanner",
            "Expedia",
            "Momondo",
            "CheapOair"
        ]
    );

    // San Francisco resolves to SFO; Barcelona is not in the gazetteer
    // and falls back to the upper-cased raw input.
    let kayak = &links[1].1;
    assert_eq!(
        kayak,
        "https://www.kayak.com/flights/SFO-BARCELONA/2025-12-15/2025-12-22/2adults?sort=bestflight_a"
    );

    // Google Flights wants compact dates
    let google = &links[0].1;
    assert!(google.contains("on%2020251215%20through%2020251222"));
    assert!(google.contains("SFO"));

    // Skyscanner lower-cases the codes
    let skyscanner = &links[2].1;
    assert!(skyscanner.contains("/sfo/barcelona/2025-12-15/2025-12-22/"));
    assert!(skyscanner.contains("adults=2"));
}

#[test]
fn hotel_links_percent_encode_city() {
    let links = LinksAgent::hotel_links("San Francisco", date("2025-12-15"), date("2025-12-22"), 2);
    assert_eq!(links.len(), 5);
    assert_eq!(
        links[0].1,
        "https://www.booking.com/searchresults.html?ss=San%20Francisco&checkin=2025-12-15&checkout=2025-12-22&group_adults=2"
    );
    assert_eq!(
        links[2].1,
        "https://www.airbnb.com/s/San%20Francisco/homes?checkin=2025-12-15&checkout=2025-12-22&adults=2"
    );
}

#[test]
fn activity_and_restaurant_links_cover_five_providers_each() {
    assert_eq!(LinksAgent::activity_links("Barcelona").len(), 5);
    assert_eq!(LinksAgent::restaurant_links("Barcelona").len(), 5);
    let yelp = &LinksAgent::restaurant_links("Barcelona")[1].1;
    assert_eq!(
        yelp,
        "https://www.yelp.com/search?find_desc=restaurants&find_loc=Barcelona"
    );
}

#[test]
fn identical_inputs_yield_byte_identical_output() {
    let request = barcelona_request();
    let first = LinksAgent::format_all_links(&request);
    let second = LinksAgent::format_all_links(&request);
    assert_eq!(first, second);
}

#[tokio::test]
async fn execute_renders_all_four_categories_in_order() {
    let request = barcelona_request();
    let agent = LinksAgent::new();
    let text = agent.execute(&request).await.unwrap();

    let flights = text.find("Flight Booking").unwrap();
    let hotels = text.find("Hotel Booking").unwrap();
    let activities = text.find("Activities & Tours").unwrap();
    let restaurants = text.find("Restaurant Reservations").unwrap();
    assert!(flights < hotels && hotels < activities && activities < restaurants);
}

#[test]
fn percent_encoding_matches_rfc3986() {
    assert_eq!(percent_encode("San Francisco"), "San%20Francisco");
    assert_eq!(percent_encode("Coruña"), "Coru%C3%B1a");
    assert_eq!(percent_encode("a&b=c"), "a%26b%3Dc");
    assert_eq!(percent_encode("keep-safe_.~/chars"), "keep-safe_.~/chars");
}
