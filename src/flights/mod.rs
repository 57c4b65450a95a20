//! Flight-domain records, accumulators and standard reports.
//!
//! Everything here is built on the generic engine: records are plain serde
//! types, accumulators implement [`Combine`](crate::accumulator::Combine), and
//! reports are [`FnSpec`](crate::accumulator::FnSpec)s paired with a
//! [`Ranking`](crate::rank::Ranking).
//!
//! # Example
//! ```
//! use flightrank::flights::{carrier_report, highest_cancellation_rate};
//! use flightrank::rank::Limit;
//! use flightrank::runner::Runner;
//! use flightrank::testing::{carrier_names, sample_flights};
//! use std::sync::Arc;
//!
//! let spec = carrier_report(Arc::new(carrier_names()));
//! let rows = Runner::sequential().report(
//!     &spec,
//!     &sample_flights(),
//!     &highest_cancellation_rate(),
//!     Limit::Top(1),
//! );
//! assert_eq!(rows[0].0, "AA");
//! ```

mod buckets;
mod records;
mod reports;
mod stats;

pub use buckets::{Bucket, BucketSet};
pub use records::{Airport, Carrier, Flight, FlightDate, GeoPoint, Plane};
pub use reports::{
    airport_report, busiest, carrier_daily_report, carrier_report, delay_report, distance_report,
    highest_cancellation_rate, highest_diversion_rate, lowest_cancellation_rate, manufacturer_report,
    most_cancelled, nearest_airports, plane_age_report, route_report, Route,
};
pub use stats::{AirportStats, CarrierStats, DelayStats, FlightCounts, ManufacturerStats};
