//! Small flight datasets with hand-checked aggregates.
//!
//! | carrier | flights | cancelled | diverted | airports |
//! |---------|---------|-----------|----------|----------|
//! | UA      | 5       | 1         | 0        | IAH ORD DFW SFO |
//! | AA      | 4       | 2         | 1        | DFW ORD JFK |
//! | WN      | 3       | 0         | 0        | DAL HOU |

use crate::flights::{Airport, Carrier, Flight, GeoPoint, Plane};
use std::collections::HashMap;

fn flight(
    carrier: &str,
    tail: &str,
    (origin, dest): (&str, &str),
    day: u8,
    distance: u32,
    arr_delay: Option<i32>,
    (cancelled, diverted): (bool, bool),
) -> Flight {
    Flight {
        year: 2008,
        month: 1,
        day,
        carrier: carrier.to_string(),
        flight_number: Some(100 + u32::from(day)),
        tail_number: tail.to_string(),
        dep_delay: arr_delay,
        arr_delay,
        origin: origin.to_string(),
        dest: dest.to_string(),
        distance: Some(distance),
        cancelled,
        diverted,
    }
}

/// Twelve flights over three carriers.
///
/// # Example
///
/// ```
/// use flightrank::testing::sample_flights;
///
/// assert_eq!(sample_flights().len(), 12);
/// ```
#[must_use]
pub fn sample_flights() -> Vec<Flight> {
    const OK: (bool, bool) = (false, false);
    const CANCELLED: (bool, bool) = (true, false);
    const DIVERTED: (bool, bool) = (false, true);
    vec![
        flight("UA", "N101UA", ("IAH", "ORD"), 1, 925, Some(12), OK),
        flight("UA", "N101UA", ("ORD", "IAH"), 1, 925, Some(-3), OK),
        flight("UA", "N202UA", ("IAH", "DFW"), 2, 224, None, CANCELLED),
        flight("UA", "N202UA", ("DFW", "IAH"), 2, 224, Some(40), OK),
        flight("UA", "N303UA", ("IAH", "SFO"), 3, 1635, Some(5), OK),
        flight("AA", "N10AA", ("DFW", "ORD"), 1, 802, None, CANCELLED),
        flight("AA", "N10AA", ("ORD", "DFW"), 1, 802, Some(20), OK),
        flight("AA", "N20AA", ("DFW", "JFK"), 2, 1391, None, CANCELLED),
        flight("AA", "N20AA", ("JFK", "DFW"), 3, 1391, Some(90), DIVERTED),
        flight("WN", "N1WN", ("DAL", "HOU"), 1, 239, Some(0), OK),
        flight("WN", "N1WN", ("HOU", "DAL"), 1, 239, Some(-5), OK),
        flight("WN", "N2WN", ("DAL", "HOU"), 2, 239, Some(30), OK),
    ]
}

#[must_use]
pub fn sample_carriers() -> Vec<Carrier> {
    [
        ("UA", "United Air Lines Inc."),
        ("AA", "American Airlines Inc."),
        ("WN", "Southwest Airlines Co."),
    ]
    .into_iter()
    .map(|(code, name)| Carrier {
        code: code.to_string(),
        name: name.to_string(),
    })
    .collect()
}

/// Carrier code → name, from [`sample_carriers`].
#[must_use]
pub fn carrier_names() -> HashMap<String, String> {
    sample_carriers().into_iter().map(|c| (c.code, c.name)).collect()
}

#[must_use]
pub fn sample_airports() -> Vec<Airport> {
    [
        ("IAH", "George Bush Intercontinental", "Houston", "TX", 29.980_47, -95.339_72),
        ("HOU", "William P Hobby", "Houston", "TX", 29.645_42, -95.278_89),
        ("DFW", "Dallas-Fort Worth International", "Dallas-Fort Worth", "TX", 32.895_95, -97.037_20),
        ("DAL", "Dallas Love", "Dallas", "TX", 32.847_11, -96.851_77),
        ("ORD", "Chicago O'Hare International", "Chicago", "IL", 41.979_60, -87.904_46),
        ("JFK", "John F Kennedy Intl", "New York", "NY", 40.639_75, -73.778_93),
        ("SFO", "San Francisco International", "San Francisco", "CA", 37.619_00, -122.374_84),
    ]
    .into_iter()
    .map(|(iata, name, city, state, lat, lon)| Airport {
        iata: iata.to_string(),
        name: name.to_string(),
        city: Some(city.to_string()),
        state: Some(state.to_string()),
        country: "USA".to_string(),
        lat,
        lon,
    })
    .collect()
}

/// Airport code → location, from [`sample_airports`].
#[must_use]
pub fn airport_locations() -> HashMap<String, GeoPoint> {
    sample_airports()
        .into_iter()
        .map(|a| {
            let at = a.location();
            (a.iata, at)
        })
        .collect()
}

#[must_use]
pub fn sample_planes() -> Vec<Plane> {
    [
        ("N101UA", "BOEING", "737-824", Some(1998)),
        ("N202UA", "BOEING", "757-222", Some(1990)),
        ("N303UA", "AIRBUS", "A320-232", Some(2004)),
        ("N10AA", "MCDONNELL DOUGLAS", "MD-82", Some(1986)),
        ("N20AA", "BOEING", "737-823", Some(2001)),
        ("N1WN", "BOEING", "737-7H4", Some(2006)),
        ("N2WN", "BOEING", "737-7H4", Some(0)),
    ]
    .into_iter()
    .map(|(tail, manufacturer, model, year)| Plane {
        tail_number: tail.to_string(),
        manufacturer: manufacturer.to_string(),
        model: model.to_string(),
        year,
    })
    .collect()
}

/// Tail number → year of manufacture, skipping unknown years.
#[must_use]
pub fn plane_build_years() -> HashMap<String, u16> {
    sample_planes()
        .into_iter()
        .filter_map(|p| p.build_year().map(|y| (p.tail_number, y)))
        .collect()
}

/// `n` synthetic flights cycling over 7 carriers and 11 airports.
///
/// Every 13th flight is cancelled and every 29th diverted, so rates differ per key.
#[must_use]
pub fn synthetic_flights(n: usize) -> Vec<Flight> {
    const CARRIERS: [&str; 7] = ["AA", "UA", "WN", "DL", "B6", "AS", "NK"];
    const AIRPORTS: [&str; 11] = ["ATL", "ORD", "DFW", "DEN", "LAX", "SFO", "SEA", "IAH", "JFK", "BOS", "MIA"];
    (0..n)
        .map(|i| {
            let origin = AIRPORTS[i % AIRPORTS.len()];
            let dest = AIRPORTS[(i * 7 + 3) % AIRPORTS.len()];
            #[allow(clippy::cast_possible_truncation)]
            let day = (i % 28 + 1) as u8;
            #[allow(clippy::cast_possible_truncation)]
            let distance = (150 + (i * 37) % 2600) as u32;
            #[allow(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
            let delay = ((i * 11) % 120) as i32 - 20;
            flight(
                CARRIERS[(i / 3) % CARRIERS.len()],
                &format!("N{}", i % 50),
                (origin, dest),
                day,
                distance,
                Some(delay),
                (i % 13 == 0, i % 29 == 0),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_flights_match_table() {
        let flights = sample_flights();
        let count = |c: &str| flights.iter().filter(|f| f.carrier == c).count();
        assert_eq!(count("UA"), 5);
        assert_eq!(count("AA"), 4);
        assert_eq!(count("WN"), 3);
        assert_eq!(flights.iter().filter(|f| f.cancelled).count(), 3);
        assert_eq!(flights.iter().filter(|f| f.diverted).count(), 1);
    }

    #[test]
    fn every_sample_carrier_has_a_name() {
        let names = carrier_names();
        assert!(sample_flights().iter().all(|f| names.contains_key(&f.carrier)));
    }

    #[test]
    fn unknown_build_years_are_skipped() {
        let years = plane_build_years();
        assert_eq!(years.len(), sample_planes().len() - 1);
        assert!(!years.contains_key("N2WN"));
    }

    #[test]
    fn synthetic_flights_are_deterministic() {
        assert_eq!(synthetic_flights(100), synthetic_flights(100));
        assert_eq!(synthetic_flights(0).len(), 0);
    }
}
