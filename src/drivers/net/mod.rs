// Network Device Abstraction Layer, TX side
//
// The frame composer talks to the hardware through these contracts: a
// buffer allocator, an egress submission queue, and the link context
// carrying the local hardware address. The queue handle is not internally
// synchronized; it assumes a single producer per egress queue.

pub mod loopback;

pub use loopback::LoopbackNic;

use alloc::boxed::Box;
use lazy_static::lazy_static;
use spin::Mutex;

use crate::memory::pool::{AllocError, FrameBuffer};
use crate::net::cursor::BufferCursor;
use crate::net::endian::NetU16;

/// Errors that can occur while composing and submitting a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitError {
    /// Payload exceeds the MTU
    PayloadTooLarge,
    /// No hardware buffer of sufficient size was available
    AllocFailed,
    /// No network device is registered
    NotInitialized,
}

impl From<AllocError> for TransmitError {
    fn from(_: AllocError) -> Self {
        TransmitError::AllocFailed
    }
}

/// One bounded hardware transfer unit referencing the buffer it transmits.
///
/// Submitting a descriptor transfers buffer ownership to the hardware;
/// with `auto_release` set the buffer is freed by the hardware after
/// transmission and must never be touched again by software.
#[derive(Debug)]
pub struct EgressDescriptor {
    pub buf: FrameBuffer,
    /// Transfer length in bytes
    pub xfer_size: usize,
    /// Last and single descriptor for the frame
    pub bounded: bool,
    /// Hardware frees the buffer after transmission
    pub auto_release: bool,
}

/// TX-side contract every NIC backend must implement
pub trait NicTx: Send + Sync {
    /// Allocate a hardware buffer of exactly `size` usable bytes.
    ///
    /// Exhaustion propagates to the caller; no retry happens here.
    fn alloc_buffer(&self, size: usize) -> Result<FrameBuffer, AllocError>;

    /// Enqueue a descriptor for transmission.
    ///
    /// Asynchronous with respect to the wire: returning only means the
    /// frame was handed to hardware. Backpressure policy belongs to the
    /// implementation.
    fn submit(&self, desc: EgressDescriptor);

    /// The local hardware address, used as source for outgoing frames.
    fn link_addr(&self) -> [u8; 6];
}

// Shared handles forward to the underlying device, so a caller can keep a
// handle to a NIC it registered globally.
impl<T: NicTx + ?Sized> NicTx for alloc::sync::Arc<T> {
    fn alloc_buffer(&self, size: usize) -> Result<FrameBuffer, AllocError> {
        (**self).alloc_buffer(size)
    }

    fn submit(&self, desc: EgressDescriptor) {
        (**self).submit(desc)
    }

    fn link_addr(&self) -> [u8; 6] {
        (**self).link_addr()
    }
}

// Global Network Device Registry

lazy_static! {
    /// Global TX-capable network device (primary NIC)
    ///
    /// Protected by a Mutex for safe concurrent access; the frame
    /// composer itself never locks.
    pub static ref NETWORK_DEVICE: Mutex<Option<Box<dyn NicTx>>> = Mutex::new(None);
}

/// Register a network device as the active NIC
pub fn register_network_device(device: Box<dyn NicTx>) {
    *NETWORK_DEVICE.lock() = Some(device);
}

/// Check if a network device is registered
pub fn has_network_device() -> bool {
    NETWORK_DEVICE.lock().is_some()
}

/// Get the link address of the registered network device
pub fn get_link_addr() -> Option<[u8; 6]> {
    NETWORK_DEVICE.lock().as_ref().map(|device| device.link_addr())
}

/// Compose and submit a frame through the registered network device
///
/// Returns `TransmitError::NotInitialized` when no device is registered;
/// otherwise behaves exactly like
/// [`send_frame`](crate::net::ethernet::send_frame).
pub fn transmit_frame<F>(
    payload_size: usize,
    dest_mac: [u8; 6],
    ethertype: NetU16,
    payload_writer: F,
) -> Result<(), TransmitError>
where
    F: FnOnce(BufferCursor<'_>),
{
    let guard = NETWORK_DEVICE.lock();
    match guard.as_ref() {
        Some(device) => crate::net::ethernet::send_frame(
            device.as_ref(),
            payload_size,
            dest_mac,
            ethertype,
            payload_writer,
        ),
        None => Err(TransmitError::NotInitialized),
    }
}
