//! Built-in combinable accumulator fields.
//!
//! Every type here implements [`Combine`](crate::accumulator::Combine), so
//! accumulators assembled from them merge associatively across shards:
//!
//! - integer counters -- addition
//! - [`Min<T>`] / [`Max<T>`] -- smallest / largest observation
//! - [`First<T>`] -- identity field, first writer wins
//! - [`Mean`] -- integer sum and count, average derived on read
//! - `HashSet<T>` / `BTreeSet<T>` -- set union, read back only as a [`Distinct`] count
//! - `Option<T>`, `(A, B)`, `(A, B, C)` -- field-wise
//!
//! # Examples
//! ```
//! use flightrank::accumulator::Combine;
//! use flightrank::combiners::{Max, Mean};
//! use std::collections::BTreeSet;
//!
//! let mut a = (3u64, BTreeSet::from(["IAH", "ORD"]));
//! a.combine((2u64, BTreeSet::from(["ORD", "DFW"])));
//! assert_eq!(a.0, 5);
//! assert_eq!(a.1.len(), 3);
//!
//! let mut m = Mean::of(10);
//! m.combine(Mean::of(20));
//! assert_eq!(m.value(), 15.0);
//!
//! let mut hi = Max::of(4);
//! hi.combine(Max::of(9));
//! assert_eq!(hi.get(), Some(&9));
//! ```

mod basic;
mod distinct;
mod statistical;

pub use basic::{First, Max, Min};
pub use distinct::Distinct;
pub use statistical::Mean;
