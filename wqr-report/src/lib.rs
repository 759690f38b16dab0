//! Report capture, composition and export workflows for water quality results.
//!
//! Rendering is external: chart panels are rendered elsewhere and reach this
//! crate as named region snapshots through [`capture::RegionCapture`]. The
//! export workflows only depend on the injected repository, capture backend,
//! file sink and notifier, so each can be swapped for a fake.

pub mod capture;
mod cancel;
pub mod composer;
pub mod delivery;
pub mod error;
pub mod notify;
pub mod tabular;
pub mod view;

#[cfg(test)]
mod testing;
