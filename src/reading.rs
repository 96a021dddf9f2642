//! Electricity readings and the source they are retrieved from.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Smart meter identifier.
#[derive(
    Clone,
    Debug,
    Eq,
    Hash,
    PartialEq,
    Deserialize,
    Serialize,
    derive_more::Display,
    derive_more::From,
    derive_more::FromStr,
)]
pub struct MeterId(String);

/// A single timestamped consumption measurement, in kilowatt-hours.
///
/// The value is assumed non-negative but not validated here: negative or zero
/// values propagate arithmetically.
#[must_use]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Reading {
    pub time: DateTime<Utc>,

    pub value: Decimal,
}

/// Lookup from meter identifier to its recorded readings.
///
/// Returns [`None`] for meters unknown to the source, and a possibly empty
/// vector otherwise. The two outcomes are deliberately distinct: callers must
/// treat «unknown meter» and «known meter without readings» differently.
pub trait ReadingSource {
    fn readings(&self, meter_id: &MeterId) -> Option<Vec<Reading>>;
}
