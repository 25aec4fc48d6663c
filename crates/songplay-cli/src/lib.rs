//! Library components of the `songplay` binary.

pub mod logging;
pub mod pipeline;
pub mod types;
