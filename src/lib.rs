//! Seat booking and boarding coordination for a single bus route.
//!
//! Passengers reserve seats for a travel date, staff mark them boarded, and
//! [`domain::BoardingSequencer`] proposes the boarding order that keeps the
//! aisle clear, together with an estimate of how long boarding takes.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
