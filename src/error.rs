use crate::slack::error::SlackError;
use std::{fmt, io};

/// Sum type representing every way a run can fail. Each variant is reported
/// to the CI runner exactly once, at the top level; there is no local
/// recovery or retry anywhere.
#[derive(Debug)]
pub enum Failure {
    /// `$SLACK_BOT_TOKEN` was absent or empty. Nothing was sent.
    MissingBotToken,
    /// The resolved payload was not a JSON object. Carries the offending
    /// string for diagnostics.
    InvalidPayload(String),
    /// The channel list was empty after trimming. Nothing was sent.
    MissingChannel,
    /// Neither a message nor a payload was provided. Nothing was sent.
    MissingContent,
    /// The send or update itself failed, either in transport or on Slack's
    /// side.
    Slack(SlackError),
    /// A step output could not be written back to the runner.
    WriteOutput(io::Error),
}

impl From<SlackError> for Failure {
    fn from(e: SlackError) -> Self {
        Failure::Slack(e)
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let x = match self {
            Failure::MissingBotToken => {
                "No bot token provided; set $SLACK_BOT_TOKEN".to_owned()
            }
            Failure::InvalidPayload(raw) => {
                format!("Need to provide a valid JSON payload, received: {}", raw)
            }
            Failure::MissingChannel => {
                "Channel ID is required; an empty one has been provided".to_owned()
            }
            Failure::MissingContent => {
                "Missing message content; provide a payload or a message to send".to_owned()
            }
            Failure::Slack(e) => e.to_string(),
            Failure::WriteOutput(e) => format!("Failed to write step output: {}", e),
        };

        write!(f, "{}", x)
    }
}
