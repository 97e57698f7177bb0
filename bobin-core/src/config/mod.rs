//! Configuration types
//!
//! Board-agnostic tuning values for the winder. The firmware bakes one
//! validated `WinderConfig` in at build time.

pub mod types;

pub use types::*;
