//! CLI command implementations

pub mod examples;
pub mod info;
#[cfg(feature = "tui")]
pub mod live;
pub mod search;
