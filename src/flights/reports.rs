//! Standard flight report specifications and rankings.
//!
//! Each builder returns an [`FnSpec`] ready for a [`Runner`](crate::runner::Runner)
//! or an [`AggregationStore`](crate::store::AggregationStore). Reference data
//! (carrier names, airport locations, plane build years) and bucket ranges are
//! passed in explicitly.

use super::buckets::{Bucket, BucketSet};
use super::records::{Flight, FlightDate, GeoPoint, Plane};
use super::stats::{AirportStats, CarrierStats, DelayStats, FlightCounts, ManufacturerStats};
use crate::accumulator::FnSpec;
use crate::combiners::First;
use crate::rank::Ranking;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Directed origin → destination pair.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Route {
    pub origin: String,
    pub dest: String,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}->{}", self.origin, self.dest)
    }
}

/// Per carrier: counters and distinct airports served. `names` maps carrier code to name.
#[must_use]
pub fn carrier_report(names: Arc<HashMap<String, String>>) -> FnSpec<Flight, String, CarrierStats> {
    FnSpec::lifted(
        |f: &Flight| f.carrier.clone(),
        move |f: &Flight| CarrierStats::of(f, names.get(&f.carrier).cloned()),
    )
}

/// Per departure airport. `locations` maps airport code to position.
#[must_use]
pub fn airport_report(locations: Arc<HashMap<String, GeoPoint>>) -> FnSpec<Flight, String, AirportStats> {
    FnSpec::lifted(
        |f: &Flight| f.origin.clone(),
        move |f: &Flight| AirportStats {
            location: First(locations.get(&f.origin).copied()),
            counts: FlightCounts::of(f),
        },
    )
}

#[must_use]
pub fn route_report() -> FnSpec<Flight, Route, FlightCounts> {
    FnSpec::lifted(
        |f: &Flight| Route {
            origin: f.origin.clone(),
            dest: f.dest.clone(),
        },
        FlightCounts::of,
    )
}

/// Per day, for one carrier.
#[must_use]
pub fn carrier_daily_report(carrier: impl Into<String>) -> FnSpec<Flight, (String, FlightDate), FlightCounts> {
    let carrier = carrier.into();
    FnSpec::lifted(|f: &Flight| (f.carrier.clone(), f.date()), FlightCounts::of)
        .with_filter(move |f: &Flight| f.carrier == carrier)
}

/// Per distance bucket. Flights without a distance or outside every range are excluded.
#[must_use]
pub fn distance_report(ranges: &BucketSet) -> FnSpec<Flight, Bucket, FlightCounts> {
    let (for_filter, for_key) = (ranges.clone(), ranges.clone());
    FnSpec::lifted(
        // filtered below: every included flight has a bucket
        move |f: &Flight| f.distance.and_then(|d| for_key.locate(d)).unwrap_or_default(),
        FlightCounts::of,
    )
    .with_filter(move |f: &Flight| f.distance.and_then(|d| for_filter.locate(d)).is_some())
}

/// Per aircraft-age bucket, age measured at `reference_year`.
///
/// `build_years` maps tail number to year of manufacture. Flights whose plane
/// is unknown, built after `reference_year`, or outside every range are excluded.
#[must_use]
pub fn plane_age_report(
    build_years: Arc<HashMap<String, u16>>,
    ranges: &BucketSet,
    reference_year: u16,
) -> FnSpec<Flight, Bucket, FlightCounts> {
    let age_bucket = {
        let ranges = ranges.clone();
        Arc::new(move |f: &Flight| {
            let built = *build_years.get(&f.tail_number)?;
            let age = reference_year.checked_sub(built)?;
            ranges.locate(u32::from(age))
        })
    };
    let for_filter = Arc::clone(&age_bucket);
    FnSpec::lifted(
        // filtered below: every included flight has a bucket
        move |f: &Flight| age_bucket(f).unwrap_or_default(),
        FlightCounts::of,
    )
    .with_filter(move |f: &Flight| for_filter(f).is_some())
}

/// Arrival delays per carrier, over flights that arrived and reported a delay.
#[must_use]
pub fn delay_report() -> FnSpec<Flight, String, DelayStats> {
    FnSpec::lifted(
        |f: &Flight| f.carrier.clone(),
        |f: &Flight| DelayStats::of_delay(f.arr_delay.unwrap_or_default()),
    )
    .with_filter(|f: &Flight| !f.cancelled && !f.diverted && f.arr_delay.is_some())
}

/// Fleet per manufacturer, over plane reference records.
#[must_use]
pub fn manufacturer_report() -> FnSpec<Plane, String, ManufacturerStats> {
    FnSpec::lifted(|p: &Plane| p.manufacturer.clone(), ManufacturerStats::of)
        .with_filter(|p: &Plane| !p.manufacturer.trim().is_empty())
}

/* ===================== rankings ===================== */

#[must_use]
pub fn busiest<K: 'static, A: AsRef<FlightCounts> + 'static>() -> Ranking<K, A> {
    Ranking::by_count_desc(|a: &A| a.as_ref().flights)
}

#[must_use]
pub fn most_cancelled<K: 'static, A: AsRef<FlightCounts> + 'static>() -> Ranking<K, A> {
    Ranking::by_count_desc(|a: &A| a.as_ref().cancelled)
}

#[must_use]
pub fn highest_cancellation_rate<K: 'static, A: AsRef<FlightCounts> + 'static>() -> Ranking<K, A> {
    Ranking::by_metric_desc(|a: &A| a.as_ref().cancellation_rate())
}

#[must_use]
pub fn lowest_cancellation_rate<K: 'static, A: AsRef<FlightCounts> + 'static>() -> Ranking<K, A> {
    Ranking::by_metric_asc(|a: &A| a.as_ref().cancellation_rate())
}

#[must_use]
pub fn highest_diversion_rate<K: 'static, A: AsRef<FlightCounts> + 'static>() -> Ranking<K, A> {
    Ranking::by_metric_desc(|a: &A| a.as_ref().diversion_rate())
}

/// Airports nearest to `origin` first, using the caller's distance function.
#[must_use]
pub fn nearest_airports<D>(origin: GeoPoint, distance: D) -> Ranking<String, AirportStats>
where
    D: Fn(&GeoPoint, &GeoPoint) -> f64 + Send + Sync + 'static,
{
    Ranking::by_distance_from(origin, |_: &String, a: &AirportStats| a.location.get().copied(), distance)
}
