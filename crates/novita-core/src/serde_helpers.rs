//! Lenient deserializers for loosely typed wire fields.
//!
//! The API is inconsistent about numeric fields: the same field may arrive as
//! a number, a numeric string, an empty string or `null`. Lists may arrive as
//! `null` instead of `[]`.

use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::fmt::Display;
use std::str::FromStr;

/// Deserialize an optional value that may be encoded as a number or a string.
///
/// `null`, a missing field and `""` all become `None`. Use together with
/// `#[serde(default)]`.
///
/// # Errors
///
/// Fails when a non-empty string cannot be parsed or the value has the wrong
/// JSON type.
pub fn option_from_str_or_number<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr + DeserializeOwned,
    T::Err: Display,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => {
            let text = text.trim();
            if text.is_empty() {
                Ok(None)
            } else {
                text.parse().map(Some).map_err(D::Error::custom)
            }
        }
        Some(value) => serde_json::from_value(value)
            .map(Some)
            .map_err(D::Error::custom),
    }
}

/// Deserialize a value that may be `null`, substituting `T::default()`.
///
/// # Errors
///
/// Fails when a non-null value does not match `T`.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
