//! Memory management for packet I/O

pub mod pool;
