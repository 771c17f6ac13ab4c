//! Serialization helpers for the routing service API
//!
//! The routing service encodes most integers as decimal strings, but is not
//! consistent about it across endpoints, so the helpers here accept either
//! form when deserializing.

use serde::Deserialize;

/// An integer that may arrive as a JSON number, a decimal string, or null
#[derive(Deserialize)]
#[serde(untagged)]
enum LooseInt {
    /// A JSON number
    Number(u64),
    /// A decimal string
    String(String),
    /// An explicit null
    Null,
}

/// A module for deserializing basis point values from a string or a number
pub(crate) mod bps_serialization {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::LooseInt;

    /// Serialize a basis point value as a string
    pub fn serialize<S: Serializer>(value: &u32, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_string())
    }

    /// Deserialize a basis point value from a string or a number
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        match LooseInt::deserialize(d)? {
            LooseInt::Number(n) => u32::try_from(n).map_err(D::Error::custom),
            LooseInt::String(s) => s.trim().parse().map_err(D::Error::custom),
            LooseInt::Null => Err(D::Error::custom("basis points must not be null")),
        }
    }
}

/// A module for deserializing basis point values where a missing or null value
/// means zero, as is the case for token tax rates on untaxed tokens
pub(crate) mod nullable_bps_serialization {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::LooseInt;

    /// Serialize a basis point value as a string
    pub fn serialize<S: Serializer>(value: &u32, s: S) -> Result<S::Ok, S::Error> {
        super::bps_serialization::serialize(value, s)
    }

    /// Deserialize a basis point value, mapping null to zero
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<u32, D::Error> {
        match LooseInt::deserialize(d)? {
            LooseInt::Number(n) => u32::try_from(n).map_err(D::Error::custom),
            LooseInt::String(s) => s.trim().parse().map_err(D::Error::custom),
            LooseInt::Null => Ok(0),
        }
    }
}

/// A module for serializing and deserializing U256 as decimal strings
pub(crate) mod u256_string_serialization {
    use alloy_primitives::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::LooseInt;

    /// Serialize a U256 to a string
    pub fn serialize<S: Serializer>(value: &U256, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&value.to_string())
    }

    /// Deserialize a string or number to a U256
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<U256, D::Error> {
        match LooseInt::deserialize(d)? {
            LooseInt::Number(n) => Ok(U256::from(n)),
            LooseInt::String(s) => U256::from_str_radix(s.trim(), 10)
                .map_err(|_| D::Error::custom("Invalid U256 value")),
            LooseInt::Null => Err(D::Error::custom("U256 value must not be null")),
        }
    }
}

/// A module for serializing and deserializing optional U256 values as decimal
/// strings
pub(crate) mod option_u256_string_serialization {
    use alloy_primitives::U256;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::LooseInt;

    /// Serialize an optional U256 to a string or null
    pub fn serialize<S: Serializer>(value: &Option<U256>, s: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(v) => s.serialize_str(&v.to_string()),
            None => s.serialize_none(),
        }
    }

    /// Deserialize a string, number, or null to an optional U256
    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<U256>, D::Error> {
        match LooseInt::deserialize(d)? {
            LooseInt::Number(n) => Ok(Some(U256::from(n))),
            LooseInt::String(s) => U256::from_str_radix(s.trim(), 10)
                .map(Some)
                .map_err(|_| D::Error::custom("Invalid U256 value")),
            LooseInt::Null => Ok(None),
        }
    }
}
