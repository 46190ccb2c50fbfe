//! Send new messages to, and rewrite existing messages in, any given Slack
//! channel.

use super::{api::*, auth::SlackAccessToken, channel::ChannelId, error::SlackError};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{serde_as, NoneAsEmptyString};

/// <https://api.slack.com/methods/chat.postMessage#args>
#[derive(Serialize)]
struct PostRequest<'a> {
    channel: &'a ChannelId,
    // Used for notifications when the payload carries `blocks`.
    text: &'a str,
    // Arbitrary payload fields merged into the request body. Serialized
    // after the fixed fields, so a payload `text` or `channel` wins under
    // last-key-wins parsing, as Slack's does.
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// <https://api.slack.com/methods/chat.update#args>
#[derive(Serialize)]
struct UpdateRequest<'a> {
    ts: &'a str,
    channel: &'a ChannelId,
    text: &'a str,
    #[serde(flatten)]
    extra: &'a Map<String, Value>,
}

/// The subset of `chat.postMessage`/`chat.update` responses surfaced as step
/// outputs.
///
/// <https://api.slack.com/methods/chat.postMessage#examples>
#[serde_as]
#[derive(Deserialize)]
pub struct MessageResponse {
    #[serde(deserialize_with = "crate::de::only_true")]
    pub ok: bool,
    pub ts: String,
    /// Only present on replies within a thread.
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub thread_ts: Option<String>,
    pub channel: ChannelId,
}

impl SlackClient {
    /// Post a new message to a channel.
    pub async fn post_message(
        &self,
        channel: &ChannelId,
        text: &str,
        extra: &Map<String, Value>,
        token: &SlackAccessToken,
    ) -> Result<MessageResponse, SlackError> {
        let res: APIResult<MessageResponse> = self
            .post("/chat.postMessage", token)
            .json(&PostRequest {
                channel,
                text,
                extra,
            })
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(res) => Ok(res),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }

    /// Rewrite an existing message in place, identified by its timestamp.
    pub async fn update_message(
        &self,
        ts: &str,
        channel: &ChannelId,
        text: &str,
        extra: &Map<String, Value>,
        token: &SlackAccessToken,
    ) -> Result<MessageResponse, SlackError> {
        let res: APIResult<MessageResponse> = self
            .post("/chat.update", token)
            .json(&UpdateRequest {
                ts,
                channel,
                text,
                extra,
            })
            .send()
            .await?
            .json()
            .await?;

        match res {
            APIResult::Ok(res) => Ok(res),
            APIResult::Err(res) => Err(SlackError::APIResponseError(res.error)),
        }
    }
}
