//! ICS file generation.
//!
//! Writes all-day birthday events as an RFC 5545 calendar document.

mod generate;

pub use generate::{IcsOptions, generate_ics};
