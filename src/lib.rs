//! Sequence Comparator library
//!
//! Everything except the window entry point lives here so the diff core, the
//! archive client and the comparator state can be used and tested headless.

pub mod app;
pub mod backend;
pub mod config;
pub mod constant;
pub mod diff;
pub mod messages;
pub mod record;
pub mod state;
pub mod style;
pub mod ui;
pub mod worker;
