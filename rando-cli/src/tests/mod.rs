//! Shared test harness modules for the Rando CLI.
#![expect(
    clippy::panic,
    reason = "Tests assert panic branches to surface unexpected CLI outcomes"
)]

use super::*;

mod helpers;
mod search_steps;
mod search_unit;
