//! Raw price units.
//!
//! Prices arrive from the API as integers (sometimes string-encoded) in units
//! of 1/100000 USD.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of raw units in one US dollar.
pub const PRICE_SCALE: f64 = 100_000.0;

/// A price in the API's raw integer unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize)]
#[serde(transparent)]
pub struct RawPrice(i64);

impl RawPrice {
    /// Wrap a raw value.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// The raw integer value.
    #[must_use]
    pub const fn raw(self) -> i64 {
        self.0
    }

    /// Converted to US dollars.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_usd(self) -> f64 {
        self.0 as f64 / PRICE_SCALE
    }
}

impl From<i64> for RawPrice {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

impl FromStr for RawPrice {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for RawPrice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl<'de> Deserialize<'de> for RawPrice {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Wire {
            Int(i64),
            Text(String),
        }

        match Wire::deserialize(deserializer)? {
            Wire::Int(raw) => Ok(Self(raw)),
            Wire::Text(text) => text.parse().map_err(serde::de::Error::custom),
        }
    }
}
