//Zero-copy write cursor over a hardware-owned packet buffer
//
//Headers are stacked left to right (Ethernet -> IP -> TCP -> payload) in a
//single forward pass, so the cursor is purely additive: no random access,
//no rewinding. Every write lands directly in the buffer the hardware will
//transmit from; there is never an intermediate copy.

use core::mem::{align_of, size_of};

/// Marker for header structs that may be written in place inside a packet
/// buffer through a typed view.
///
/// # Safety
///
/// Implementors must be `#[repr(C, packed)]` (alignment 1, no padding) and
/// every bit pattern of the underlying bytes must be a valid value, so that
/// a `&mut Self` pointing at arbitrary buffer contents is sound. Fields
/// should be byte arrays or [`Net`](crate::net::endian::Net) values.
pub unsafe trait WireHeader: Sized {}

/// A write position into a hardware-owned packet buffer.
///
/// The cursor does not own the buffer; it borrows the region between
/// allocation and egress submission. The offset only ever moves forward.
pub struct BufferCursor<'a> {
    buf: &'a mut [u8],
    offset: usize,
}

impl<'a> BufferCursor<'a> {
    /// Wrap a freshly allocated buffer, positioned at its first byte.
    pub fn new(buf: &'a mut [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    /// Bytes written so far.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Total capacity of the underlying buffer.
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Bytes still available.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Reserves `size_of::<H>()` bytes at the current offset, hands the
    /// writer a typed view of the reserved region, and returns the cursor
    /// advanced past it so writes can be chained.
    ///
    /// # Panics
    ///
    /// Panics if the reserved region would overrun the buffer. Frame sizes
    /// are computed once at the top of the call chain, so an overrun here
    /// is a caller bug and fails fast rather than corrupting the buffer.
    pub fn write_with<H, F>(mut self, writer: F) -> Self
    where
        H: WireHeader,
        F: FnOnce(&mut H),
    {
        let len = size_of::<H>();
        assert!(
            len <= self.remaining(),
            "header write of {} bytes overruns buffer ({} of {} used)",
            len,
            self.offset,
            self.buf.len()
        );
        debug_assert_eq!(align_of::<H>(), 1, "WireHeader types must be packed");

        let region = &mut self.buf[self.offset..self.offset + len];
        // Sound per the WireHeader contract: alignment 1 and any byte
        // pattern is a valid H.
        let header = unsafe { &mut *(region.as_mut_ptr() as *mut H) };
        writer(header);

        self.offset += len;
        self
    }

    /// Copies `bytes` at the current offset and advances past them.
    ///
    /// # Panics
    ///
    /// Panics if the bytes would overrun the buffer, same contract as
    /// [`BufferCursor::write_with`].
    pub fn write_bytes(mut self, bytes: &[u8]) -> Self {
        assert!(
            bytes.len() <= self.remaining(),
            "payload write of {} bytes overruns buffer ({} of {} used)",
            bytes.len(),
            self.offset,
            self.buf.len()
        );

        self.buf[self.offset..self.offset + bytes.len()].copy_from_slice(bytes);
        self.offset += bytes.len();
        self
    }
}
