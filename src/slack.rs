//! Supports posting to, and updating messages in, any given Slack channel.
//!
//! The client is deliberately thin: requests carry whatever payload fields
//! the caller merged in, and responses surface only the fields the step
//! reports back to the CI runner.

pub mod api;
pub mod auth;
pub mod channel;
pub mod error;
pub mod message;
