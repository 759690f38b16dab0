//! Chart series derivation and display ordering for water quality samples.
//!
//! Everything here is a pure projection of repository results: inputs are
//! borrowed, never mutated, and outputs follow input order.

pub mod charts;
pub mod models;
pub mod ordering;
