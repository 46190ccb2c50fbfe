//! Type definitions and helpers for the Slack API.

use super::auth::*;
use super::error::SlackError;
use serde::Deserialize;
use url::Url;

/// The base URL of the Slack API.
pub const API_BASE: &str = "https://slack.com/api";

/// A reusable client that holds a connection pool internally, as per
/// [reqwest::Client].
//
// The base URL is injectable so that tests can point the client at a mock
// server.
pub struct SlackClient {
    base_url: String,
    client: reqwest::Client,
}

impl SlackClient {
    /// A client talking directly to `base_url`.
    pub fn new(base_url: String) -> Self {
        SlackClient {
            base_url,
            client: reqwest::Client::new(),
        }
    }

    /// A client routing its requests through an HTTPS proxy.
    pub fn with_proxy(base_url: String, proxy: Url) -> Result<Self, SlackError> {
        let client = reqwest::Client::builder()
            .proxy(reqwest::Proxy::https(proxy)?)
            .build()?;

        Ok(SlackClient { base_url, client })
    }

    /// Create a POST request to any Slack API endpoint, handling
    /// authentication.
    pub(super) fn post<T: ToString>(
        &self,
        path: T,
        token: &SlackAccessToken,
    ) -> reqwest::RequestBuilder {
        self.client
            .post(self.base_url.to_owned() + &path.to_string())
            .header(reqwest::header::AUTHORIZATION, to_auth_header_val(token))
    }
}

/// Slack's API returns a common "untagged" response, representing whether a
/// request was successful.
///
/// ```json
/// {
///     "ok": true,
///     "ts": "1503435956.000247"
/// }
/// ```
///
/// ```json
/// {
///     "ok": false,
///     "error": "invalid_auth"
/// }
/// ```
#[derive(Deserialize)]
#[serde(untagged)]
pub enum APIResult<T> {
    Ok(T),
    Err(ErrorResponse),
}

/// The universal response in case of an unsuccessful request.
// The `ok` field is checked here, and should be checked on responses too,
// primarily to ensure appropriate deserialization behaviour in case of an
// otherwise empty successful response.
//
// Ideally we'd be able to use `ok` as a tag, rather than defining `APIResult`
// as untagged. See:
//   <https://github.com/serde-rs/serde/issues/745#issuecomment-294314786>
#[derive(Deserialize)]
pub struct ErrorResponse {
    #[allow(dead_code)]
    #[serde(deserialize_with = "crate::de::only_false")]
    ok: bool,
    pub error: String,
}
