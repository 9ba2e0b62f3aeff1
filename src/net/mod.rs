//! Protocol-layer building blocks
//!
//! The TX path is single-pass: a frame is composed left to right into a
//! hardware buffer and submitted once, never revisited.

pub mod endian;
pub mod cursor;
pub mod ethernet;
