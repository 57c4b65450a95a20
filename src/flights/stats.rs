//! Per-key accumulators for the flight reports.
//!
//! Only raw counters, sets and identity fields are stored. Rates and averages
//! are methods that derive them on every call.

use super::records::{Flight, GeoPoint, Plane};
use crate::accumulator::Combine;
use crate::combiners::{First, Max, Mean, Min};
use crate::derive::{cardinality, rate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Flight, cancellation and diversion counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FlightCounts {
    pub flights: u64,
    pub cancelled: u64,
    pub diverted: u64,
}

impl FlightCounts {
    /// Counters for a single flight.
    #[must_use]
    pub fn of(f: &Flight) -> Self {
        Self {
            flights: 1,
            cancelled: u64::from(f.cancelled),
            diverted: u64::from(f.diverted),
        }
    }

    #[must_use]
    pub fn cancellation_rate(&self) -> f64 {
        rate(self.cancelled, self.flights)
    }

    #[must_use]
    pub fn diversion_rate(&self) -> f64 {
        rate(self.diverted, self.flights)
    }

    /// Flights neither cancelled nor diverted.
    #[must_use]
    pub const fn completed(&self) -> u64 {
        self.flights
            .saturating_sub(self.cancelled)
            .saturating_sub(self.diverted)
    }
}

impl Combine for FlightCounts {
    fn combine(&mut self, other: Self) {
        self.flights += other.flights;
        self.cancelled += other.cancelled;
        self.diverted += other.diverted;
    }
}

impl AsRef<FlightCounts> for FlightCounts {
    fn as_ref(&self) -> &FlightCounts {
        self
    }
}

/// Carrier summary: name from reference data, counters, airports touched.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct CarrierStats {
    pub name: First<String>,
    pub counts: FlightCounts,
    /// Origin and destination codes; read back only as a count.
    pub airports: BTreeSet<String>,
}

impl CarrierStats {
    #[must_use]
    pub fn of(f: &Flight, name: Option<String>) -> Self {
        Self {
            name: First(name),
            counts: FlightCounts::of(f),
            airports: BTreeSet::from([f.origin.clone(), f.dest.clone()]),
        }
    }

    #[must_use]
    pub fn airports_served(&self) -> usize {
        cardinality(&self.airports)
    }
}

impl Combine for CarrierStats {
    fn combine(&mut self, other: Self) {
        self.name.combine(other.name);
        self.counts.combine(other.counts);
        self.airports.combine(other.airports);
    }
}

impl AsRef<FlightCounts> for CarrierStats {
    fn as_ref(&self) -> &FlightCounts {
        &self.counts
    }
}

/// Departure airport summary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AirportStats {
    pub location: First<GeoPoint>,
    pub counts: FlightCounts,
}

impl Combine for AirportStats {
    fn combine(&mut self, other: Self) {
        self.location.combine(other.location);
        self.counts.combine(other.counts);
    }
}

impl AsRef<FlightCounts> for AirportStats {
    fn as_ref(&self) -> &FlightCounts {
        &self.counts
    }
}

/// Arrival delay summary in minutes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DelayStats {
    pub arrival: Mean,
    /// Arrivals 15 or more minutes late.
    pub late: u64,
    pub worst: Max<i32>,
}

impl DelayStats {
    /// Minutes of delay at which an arrival counts as late.
    pub const LATE_AFTER: i32 = 15;

    #[must_use]
    pub fn of_delay(minutes: i32) -> Self {
        Self {
            arrival: Mean::of(i64::from(minutes)),
            late: u64::from(minutes >= Self::LATE_AFTER),
            worst: Max::of(minutes),
        }
    }

    #[must_use]
    pub fn mean_arrival_delay(&self) -> f64 {
        self.arrival.value()
    }

    #[must_use]
    pub fn late_rate(&self) -> f64 {
        rate(self.late, self.arrival.count)
    }

    #[must_use]
    pub fn on_time_rate(&self) -> f64 {
        rate(self.arrival.count.saturating_sub(self.late), self.arrival.count)
    }
}

impl Combine for DelayStats {
    fn combine(&mut self, other: Self) {
        self.arrival.combine(other.arrival);
        self.late.combine(other.late);
        self.worst.combine(other.worst);
    }
}

/// Fleet summary per manufacturer.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManufacturerStats {
    pub planes: u64,
    pub models: BTreeSet<String>,
    pub oldest: Min<u16>,
}

impl ManufacturerStats {
    #[must_use]
    pub fn of(p: &Plane) -> Self {
        Self {
            planes: 1,
            models: BTreeSet::from([p.model.clone()]),
            oldest: Min(p.build_year()),
        }
    }

    #[must_use]
    pub fn distinct_models(&self) -> usize {
        cardinality(&self.models)
    }
}

impl Combine for ManufacturerStats {
    fn combine(&mut self, other: Self) {
        self.planes += other.planes;
        self.models.combine(other.models);
        self.oldest.combine(other.oldest);
    }
}
