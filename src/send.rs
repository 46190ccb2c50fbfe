//! Fan a message out to every requested channel.

use crate::error::Failure;
use crate::slack::{
    api::SlackClient, auth::SlackAccessToken, channel::ChannelId, message::MessageResponse,
};
use futures_util::stream::{FuturesUnordered, StreamExt};
use serde_json::{Map, Value};
use tracing::info;

/// Send (or, given `update_ts`, update) the message in every channel,
/// concurrently.
///
/// Calls settle in no particular order and the response returned is
/// whichever settled last, so with more than one channel the aggregate
/// outputs are only meaningful to callers that don't care which channel
/// they describe. The first error fails the whole run; there is no retry
/// and no partial-success handling.
pub async fn dispatch(
    client: &SlackClient,
    token: &SlackAccessToken,
    channels: &[ChannelId],
    text: &str,
    payload: Option<&Map<String, Value>>,
    update_ts: Option<&str>,
) -> Result<MessageResponse, Failure> {
    if channels.is_empty() {
        return Err(Failure::MissingChannel);
    }

    if text.is_empty() && payload.is_none() {
        return Err(Failure::MissingContent);
    }

    let empty = Map::new();
    let extra = payload.unwrap_or(&empty);

    info!("Notifying {} channel(s)", channels.len());

    let mut calls: FuturesUnordered<_> = channels
        .iter()
        .map(|channel| async move {
            match update_ts {
                Some(ts) => client.update_message(ts, channel, text, extra, token).await,
                None => client.post_message(channel, text, extra, token).await,
            }
        })
        .collect();

    let mut last: Option<MessageResponse> = None;
    while let Some(res) = calls.next().await {
        last = Some(res?);
    }

    // The emptiness check above guarantees at least one call settled.
    last.ok_or(Failure::MissingChannel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slack::error::SlackError;
    use crate::{payload, template};
    use mockito::Matcher;

    const POST_OK: &str = r#"{
        "ok": true,
        "channel": "C012AB3CD",
        "ts": "1503435956.000247"
    }"#;

    const POST_ERR: &str = r#"{
        "ok": false,
        "error": "invalid_auth"
    }"#;

    fn token() -> SlackAccessToken {
        SlackAccessToken("xoxb-test".to_owned())
    }

    fn channels(xs: &[&str]) -> Vec<ChannelId> {
        xs.iter().map(|x| ChannelId((*x).to_owned())).collect()
    }

    async fn server() -> mockito::ServerGuard {
        mockito::Server::new_async().await
    }

    #[tokio::test]
    async fn test_missing_channel() {
        let client = SlackClient::new("any".to_owned());

        let res = dispatch(&client, &token(), &[], "hello", None, None).await;

        assert!(matches!(res, Err(Failure::MissingChannel)));
    }

    #[tokio::test]
    async fn test_missing_content() {
        let client = SlackClient::new("any".to_owned());

        let res = dispatch(&client, &token(), &channels(&["ci"]), "", None, None).await;

        assert!(matches!(res, Err(Failure::MissingContent)));
    }

    #[tokio::test]
    async fn test_post_single_channel() {
        let mut srv = server().await;

        let post_mock = srv
            .mock("POST", "/chat.postMessage")
            .match_header("Authorization", "Bearer xoxb-test")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "channel": "ci",
                "text": "hello"
            })))
            .with_body(POST_OK)
            .create_async()
            .await;

        let client = SlackClient::new(srv.url());

        let res = dispatch(&client, &token(), &channels(&["ci"]), "hello", None, None)
            .await
            .unwrap();

        post_mock.assert_async().await;

        assert!(res.ok);
        assert_eq!(res.ts, "1503435956.000247");
        assert_eq!(res.channel, ChannelId("C012AB3CD".to_owned()));
    }

    #[tokio::test]
    async fn test_update_routes_through_chat_update() {
        let mut srv = server().await;

        let post_mock = srv
            .mock("POST", "/chat.postMessage")
            .expect(0)
            .create_async()
            .await;

        let update_mock = srv
            .mock("POST", "/chat.update")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "ts": "1503435956.000247",
                "channel": "ci"
            })))
            .with_body(POST_OK)
            .create_async()
            .await;

        let client = SlackClient::new(srv.url());

        let res = dispatch(
            &client,
            &token(),
            &channels(&["ci"]),
            "hello",
            None,
            Some("1503435956.000247"),
        )
        .await;

        post_mock.assert_async().await;
        update_mock.assert_async().await;

        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_post_fans_out_per_channel() {
        let mut srv = server().await;

        let post_a = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(serde_json::json!({ "channel": "a" })))
            .with_body(POST_OK)
            .create_async()
            .await;

        let post_b = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(serde_json::json!({ "channel": "b" })))
            .with_body(POST_OK)
            .create_async()
            .await;

        let client = SlackClient::new(srv.url());

        // One call per channel. No assertion about which channel's response
        // wins the slot.
        let res = dispatch(&client, &token(), &channels(&["a", "b"]), "hello", None, None)
            .await
            .unwrap();

        post_a.assert_async().await;
        post_b.assert_async().await;

        assert!(res.ok);
    }

    #[tokio::test]
    async fn test_api_error_fails_the_run() {
        let mut srv = server().await;

        let post_mock = srv
            .mock("POST", "/chat.postMessage")
            .with_body(POST_ERR)
            .create_async()
            .await;

        let client = SlackClient::new(srv.url());

        let res = dispatch(&client, &token(), &channels(&["ci"]), "hello", None, None).await;

        post_mock.assert_async().await;

        assert!(matches!(
            res,
            Err(Failure::Slack(SlackError::APIResponseError(ref e))) if e == "invalid_auth"
        ));
    }

    #[tokio::test]
    async fn test_resolved_success_payload_reaches_channel() {
        let raw = r#"{"text": "<status-success-status> <author-nofir-author>"}"#;
        let fields = payload::parse(&template::resolve(raw, template::notifies_via_mention(raw)))
            .unwrap();

        let mut srv = server().await;

        let post_mock = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "channel": "ci",
                "text": ":rocket: <@U03M3HRPV70>"
            })))
            .with_body(POST_OK)
            .create_async()
            .await;

        let client = SlackClient::new(srv.url());

        let res = dispatch(
            &client,
            &token(),
            &channels(&["ci"]),
            "",
            Some(&fields),
            None,
        )
        .await;

        post_mock.assert_async().await;

        assert!(res.is_ok());
    }

    #[tokio::test]
    async fn test_resolved_failure_payload_names_plainly() {
        let raw = r#"{"text": "<status-failure-status> <author-nofir-author>"}"#;
        let fields = payload::parse(&template::resolve(raw, template::notifies_via_mention(raw)))
            .unwrap();

        let mut srv = server().await;

        let post_mock = srv
            .mock("POST", "/chat.postMessage")
            .match_body(Matcher::PartialJson(serde_json::json!({
                "text": ":boom: Ofir"
            })))
            .with_body(POST_OK)
            .create_async()
            .await;

        let client = SlackClient::new(srv.url());

        let res = dispatch(
            &client,
            &token(),
            &channels(&["ci"]),
            "",
            Some(&fields),
            None,
        )
        .await;

        post_mock.assert_async().await;

        assert!(res.is_ok());
    }
}
