//! Flight and reference-dimension records as read from the on-time dataset.
//!
//! Column names follow the published CSV headers. Numeric cells holding `NA`
//! (or nothing) deserialize as `None`; `0`/`1` flags deserialize as `bool`.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// One scheduled flight.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Flight {
    #[serde(rename = "Year")]
    pub year: u16,
    #[serde(rename = "Month")]
    pub month: u8,
    #[serde(rename = "DayofMonth")]
    pub day: u8,
    #[serde(rename = "UniqueCarrier")]
    pub carrier: String,
    #[serde(rename = "FlightNum", default, deserialize_with = "na_as_none")]
    pub flight_number: Option<u32>,
    #[serde(rename = "TailNum", default)]
    pub tail_number: String,
    #[serde(rename = "DepDelay", default, deserialize_with = "na_as_none")]
    pub dep_delay: Option<i32>,
    #[serde(rename = "ArrDelay", default, deserialize_with = "na_as_none")]
    pub arr_delay: Option<i32>,
    #[serde(rename = "Origin")]
    pub origin: String,
    #[serde(rename = "Dest")]
    pub dest: String,
    /// Miles.
    #[serde(rename = "Distance", default, deserialize_with = "na_as_none")]
    pub distance: Option<u32>,
    #[serde(rename = "Cancelled", default, deserialize_with = "flag")]
    pub cancelled: bool,
    #[serde(rename = "Diverted", default, deserialize_with = "flag")]
    pub diverted: bool,
}

impl Flight {
    #[must_use]
    pub fn date(&self) -> FlightDate {
        FlightDate {
            year: self.year,
            month: self.month,
            day: self.day,
        }
    }
}

/// Calendar date of a flight; orders chronologically.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct FlightDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Airport {
    pub iata: String,
    #[serde(rename = "airport")]
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub country: String,
    pub lat: f64,
    #[serde(rename = "long")]
    pub lon: f64,
}

impl Airport {
    #[must_use]
    pub const fn location(&self) -> GeoPoint {
        GeoPoint {
            lat: self.lat,
            lon: self.lon,
        }
    }
}

/// Latitude/longitude in degrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lon: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Carrier {
    #[serde(rename = "Code")]
    pub code: String,
    #[serde(rename = "Description")]
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Plane {
    #[serde(rename = "tailnum")]
    pub tail_number: String,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
    #[serde(default, deserialize_with = "na_as_none")]
    pub year: Option<u16>,
}

impl Plane {
    /// Year of manufacture; the dataset writes unknown years as `0000` or `None`.
    #[must_use]
    pub fn build_year(&self) -> Option<u16> {
        self.year.filter(|&y| y > 0)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Cell {
    Int(i64),
    Float(f64),
    Text(String),
}

fn na_as_none<'de, D, T>(d: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: TryFrom<i64> + FromStr,
    <T as FromStr>::Err: Display,
{
    let out_of_range = |n: i64| de::Error::custom(format!("{n} is out of range"));
    match Option::<Cell>::deserialize(d)? {
        None => Ok(None),
        Some(Cell::Int(n)) => T::try_from(n).map(Some).map_err(|_| out_of_range(n)),
        #[allow(clippy::cast_possible_truncation)]
        Some(Cell::Float(f)) if f.fract() == 0.0 => {
            let n = f as i64;
            T::try_from(n).map(Some).map_err(|_| out_of_range(n))
        }
        Some(Cell::Float(f)) => Err(de::Error::custom(format!("expected an integer, got {f}"))),
        Some(Cell::Text(s)) => {
            let s = s.trim();
            if s.is_empty() || s.eq_ignore_ascii_case("NA") || s.eq_ignore_ascii_case("None") {
                Ok(None)
            } else {
                s.parse().map(Some).map_err(de::Error::custom)
            }
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FlagCell {
    Bool(bool),
    Int(i64),
    Text(String),
}

fn flag<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    match FlagCell::deserialize(d)? {
        FlagCell::Bool(b) => Ok(b),
        FlagCell::Int(n) => Ok(n != 0),
        FlagCell::Text(s) => match s.trim() {
            "" | "0" | "NA" => Ok(false),
            "1" => Ok(true),
            other => Err(de::Error::custom(format!("invalid flag {other:?}"))),
        },
    }
}
