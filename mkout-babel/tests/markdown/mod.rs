//! Markdown format tests
//!
//! Round trips (markdown → tree → markdown → tree) and checks of the exact
//! markdown written for the constructs with layout decisions.

mod export;
mod properties;
mod round_trip;
