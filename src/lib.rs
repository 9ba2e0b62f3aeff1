#![no_std]

//! Zero-copy Ethernet frame assembly for NIC offload engines.
//!
//! Frames are composed directly inside hardware-owned buffers: the
//! byte-order type system in [`net::endian`] makes host/network confusion
//! a compile error, and the write cursor in [`net::cursor`] serializes
//! headers and payload in a single forward pass with no intermediate copy.

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

// Buffer management
pub mod memory;

// Networking infrastructure
pub mod net;

// Network device abstraction
pub mod drivers;
