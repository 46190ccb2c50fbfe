//! Carries word of CI builds to Slack.
//!
//! One invocation reads its inputs from the hosting CI runner, resolves the
//! known placeholder tokens in the payload template, posts (or updates) the
//! result in every requested channel, and reports Slack's response back as
//! step outputs.

use chrono::Local;
use dotenvy::dotenv;
use error::Failure;
use slack::api::{SlackClient, API_BASE};
use slack::auth::SlackAccessToken;
use slack::channel;
use std::env;
use tracing::warn;
use url::Url;

mod action;
mod de;
mod error;
mod payload;
mod send;
mod slack;
mod template;

/// Application entrypoint. Initialises tracing, runs the one invocation,
/// and reports any failure to the runner.
#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_target(false)
        .compact()
        .init();

    let has_dotenv = dotenv().is_ok();
    if !has_dotenv {
        warn!("No .env found");
    }

    if let Err(e) = run().await {
        action::set_failed(&e.to_string());
    }
}

/// One invocation, front to back: credential → inputs → resolved payload →
/// dispatch → outputs.
async fn run() -> Result<(), Failure> {
    let token = env::var("SLACK_BOT_TOKEN")
        .ok()
        .filter(|x| !x.is_empty())
        .map(SlackAccessToken)
        .ok_or(Failure::MissingBotToken)?;

    // Mention behaviour depends on the raw template, so it's decided before
    // any substitution happens.
    let payload = match action::get_input("payload") {
        None => None,
        Some(raw) => {
            let resolved = template::resolve(&raw, template::notifies_via_mention(&raw));
            Some(payload::parse(&resolved)?)
        }
    };

    let text = action::get_input("slack-message").unwrap_or_default();
    let channels =
        channel::parse_list(&action::get_input("channel-id").unwrap_or_else(|| "ci".to_owned()));
    let update_ts = action::get_input("update-ts");

    let client = match proxy_from_env() {
        Some(proxy) => SlackClient::with_proxy(API_BASE.to_owned(), proxy)?,
        None => SlackClient::new(API_BASE.to_owned()),
    };

    let res = send::dispatch(
        &client,
        &token,
        &channels,
        &text,
        payload.as_ref(),
        update_ts.as_deref(),
    )
    .await?;

    if res.ok {
        let thread_ts = res.thread_ts.as_deref().unwrap_or(&res.ts);

        write_output("ts", &res.ts)?;
        write_output("thread_ts", thread_ts)?;
        write_output("channel_id", &res.channel.0)?;
    }

    write_output("time", &Local::now().format("%H:%M:%S %z").to_string())?;

    Ok(())
}

fn write_output(name: &str, value: &str) -> Result<(), Failure> {
    action::set_output(name, value).map_err(Failure::WriteOutput)
}

/// The HTTPS proxy to route Slack calls through, if one is configured.
/// Values that don't parse as URLs are skipped rather than failing the
/// notification.
fn proxy_from_env() -> Option<Url> {
    let raw = env::var("HTTPS_PROXY")
        .or_else(|_| env::var("https_proxy"))
        .ok()
        .filter(|x| !x.is_empty())?;

    match Url::parse(&raw) {
        Ok(url) => Some(url),
        Err(_) => {
            warn!("Ignoring unparseable proxy URL in $HTTPS_PROXY");
            None
        }
    }
}
