//! Core types for calextract.
//!
//! This crate provides everything the `calextract` binary needs to turn one day
//! of calendar events into an exported document:
//! - `Event` and `Zone` for the normalized event model
//! - `source` for the authorization-gated calendar store
//! - `export` for the text, ICS and JSON encoders

pub mod config;
pub mod date_range;
pub mod datetime;
pub mod error;
pub mod event;
pub mod export;
pub mod source;

pub use error::{CalExtractError, CalExtractResult};
pub use event::{Event, Zone};
