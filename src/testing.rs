//! Testing utilities for aggregation reports.
//!
//! - **Assertions**: compare ranked rows and finalized stores
//! - **Fixtures**: small flight, carrier, airport and plane datasets with
//!   known aggregates, plus a deterministic synthetic generator
//!
//! # Quick Start
//!
//! ```
//! use flightrank::flights::{route_report, busiest, Route};
//! use flightrank::rank::Limit;
//! use flightrank::runner::Runner;
//! use flightrank::testing::*;
//!
//! let rows = Runner::sequential().report(&route_report(), &sample_flights(), &busiest(), Limit::Top(1));
//! assert_eq!(rows.len(), 1);
//! assert_eq!(rows[0].0, Route { origin: "DAL".into(), dest: "HOU".into() });
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
