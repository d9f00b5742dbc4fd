//! CLI glue for the livemarkdown preview client: configuration, logging,
//! and console output for stream events.

pub mod config;
pub mod console;
pub mod logging;
