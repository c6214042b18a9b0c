//! # schedkit-core
//!
//! Domain models for the scheduling component: the bookable schedule slot
//! with its start/end/duration consistency rules and collision checks, the
//! room descriptor a slot points at, and the date/time and export helpers
//! the models are built on.

pub mod datetime;
pub mod errors;
pub mod export;
pub mod models;
