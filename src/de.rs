//! Deserializer guards for Slack's `ok` response discriminant.
//!
//! [crate::slack::api::APIResult] is untagged, so serde needs these to tell
//! the success and error response shapes apart.

use serde::de::{Deserialize, Deserializer, Error};

/// Accept only a literal `true`.
pub fn only_true<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    match bool::deserialize(deserializer)? {
        true => Ok(true),
        false => Err(Error::custom("invalid bool: false")),
    }
}

/// Accept only a literal `false`.
pub fn only_false<'a, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'a>,
{
    match bool::deserialize(deserializer)? {
        false => Ok(false),
        true => Err(Error::custom("invalid bool: true")),
    }
}
