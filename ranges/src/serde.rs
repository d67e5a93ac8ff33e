//! Precision-safe integer encoding for JSON.
//!
//! Integers are written as decimal strings and read back from either a string
//! or a JSON integer. A JSON integer is parsed straight into the target type;
//! anything that would need a float (a fraction, an exponent, a value past
//! `u64::MAX`) is rejected instead of being rounded.

use serde::Deserialize;

#[derive(Deserialize)]
#[serde(untagged)]
enum IntOrString<T> {
    Int(T),
    String(String),
}

pub fn serialize_u128<S>(num: &u128, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&num.to_string())
}

pub fn deserialize_u128<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match IntOrString::<u128>::deserialize(deserializer)? {
        IntOrString::Int(num) => Ok(num),
        IntOrString::String(s) => s.parse::<u128>().map_err(serde::de::Error::custom),
    }
}

pub fn serialize_u64<S>(num: &u64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&num.to_string())
}

pub fn deserialize_u64<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match IntOrString::<u64>::deserialize(deserializer)? {
        IntOrString::Int(num) => Ok(num),
        IntOrString::String(s) => s.parse::<u64>().map_err(serde::de::Error::custom),
    }
}
