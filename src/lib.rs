//! Bilingual recruiting-booth registration kiosk.
//!
//! Applicants fill in a terminal form; the draft is validated locally and
//! posted as JSON to a remote backend, then a confirmation dialog is shown.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod backend;
pub mod config;
pub mod content;
pub mod logging;
pub mod model;
pub mod tui;
