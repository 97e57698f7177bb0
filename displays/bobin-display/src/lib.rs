//! Character display abstraction and shared screens for Bobin
//!
//! This crate provides:
//! - `DisplayBackend` trait for character LCDs
//! - `Screen`, a 4x20 text frame with per-row dirty tracking and cursor state
//! - `render`, which pushes only what changed to a backend
//! - Fixed screen templates for every machine state
//! - An HD44780 driver for the common PCF8574 I2C backpack
//!
//! # Architecture
//!
//! The controller never talks to the LCD directly. It edits a [`Screen`];
//! the main loop calls [`render`] once per tick. A screen swap (state
//! change) clears and repaints the whole panel, while live counters only
//! rewrite their own rows so the display does not flicker.

#![cfg_attr(not(test), no_std)]

pub mod backend;
pub mod hd44780;
pub mod render;
pub mod screen;
pub mod templates;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use hd44780::Hd44780;
pub use render::{render, type_out};
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
