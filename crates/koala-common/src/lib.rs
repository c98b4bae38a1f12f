//! Common utilities for the Koala dialog crates.
//!
//! This crate provides shared infrastructure used by the DOM and dialog crates:
//! - **Warning System** - colored terminal output for misuse and ignored calls

pub mod warning;
