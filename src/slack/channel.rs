//! Channel identifiers, and the comma-separated list form CI inputs carry
//! them in.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Channels are referred to by their underlying ID, which can be found in
/// the UI by copying a link to the channel. Display names are not resolved.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChannelId(pub String);

/// Format without the surrounding newtype wrapper.
///
/// ```
/// let x = ChannelId("C012AB3CD".into());
/// assert_eq!(format!("{}", x), "C012AB3CD");
/// ```
impl fmt::Display for ChannelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Split a comma-separated channel list into ids. Entries are trimmed of
/// whitespace and empty entries are dropped, so consumers can space their
/// lists however they like.
pub fn parse_list(raw: &str) -> Vec<ChannelId> {
    raw.split(',')
        .map(str::trim)
        .filter(|x| !x.is_empty())
        .map(|x| ChannelId(x.to_owned()))
        .collect()
}
