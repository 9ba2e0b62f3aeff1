//! Software loopback NIC
//!
//! Backs the frame composer when no hardware is present: buffers come from
//! a [`BufferPool`] and the egress queue is a bounded ring. `complete_tx`
//! plays the hardware's role, draining the ring and releasing buffers.

use crossbeam_queue::ArrayQueue;
use log::warn;

use super::{EgressDescriptor, NicTx};
use crate::memory::pool::{AllocError, BufferPool, FrameBuffer, PoolStats};

/// Depth of the software egress ring
pub const EGRESS_RING_DEPTH: usize = 64;

pub struct LoopbackNic {
    mac_addr: [u8; 6],
    pool: BufferPool,
    equeue: ArrayQueue<EgressDescriptor>,
}

impl LoopbackNic {
    /// Create a loopback NIC with the given link address and buffer
    /// budget in bytes.
    pub fn new(mac_addr: [u8; 6], pool_budget: usize) -> Self {
        Self {
            mac_addr,
            pool: BufferPool::new(pool_budget),
            equeue: ArrayQueue::new(EGRESS_RING_DEPTH),
        }
    }

    /// Play the hardware's completion side: drain submitted descriptors,
    /// hand each transmitted frame to `observer`, and release
    /// `auto_release` buffers back to the pool.
    ///
    /// Returns the number of frames completed.
    pub fn complete_tx<F>(&self, mut observer: F) -> usize
    where
        F: FnMut(&[u8]),
    {
        let mut completed = 0;
        while let Some(desc) = self.equeue.pop() {
            observer(&desc.buf.as_slice()[..desc.xfer_size]);
            if desc.auto_release {
                self.pool.release(desc.buf);
            }
            completed += 1;
        }
        completed
    }

    /// Frames submitted but not yet completed
    pub fn pending_tx(&self) -> usize {
        self.equeue.len()
    }

    pub fn pool_stats(&self) -> PoolStats {
        self.pool.stats()
    }
}

impl NicTx for LoopbackNic {
    fn alloc_buffer(&self, size: usize) -> Result<FrameBuffer, AllocError> {
        self.pool.alloc(size)
    }

    fn submit(&self, desc: EgressDescriptor) {
        let xfer_size = desc.xfer_size;
        if let Err(desc) = self.equeue.push(desc) {
            // Ring full: the frame is dropped and its buffer reclaimed.
            // Flow control belongs to whoever decides how many frames to
            // enqueue, not to this layer.
            warn!("[LOOP] egress ring full, dropping {} byte frame", xfer_size);
            self.pool.release(desc.buf);
        }
    }

    fn link_addr(&self) -> [u8; 6] {
        self.mac_addr
    }
}
