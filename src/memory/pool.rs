//! Fixed-budget frame buffer pool for the TX path
//!
//! Models the buffer stacks of a NIC offload engine: a bounded byte budget
//! carved into exactly-sized buffers, recycled through a per-size-class
//! pool once the hardware releases them after transmission.

use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;
use spin::Mutex;

/// Buffers are carved in multiples of this, so recycled regions are
/// interchangeable within a size class.
const BUF_ALIGNMENT: usize = 64;

/// Maximum number of buffers to keep in the pool per size class
const MAX_POOLED_BUFFERS: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocError {
    /// The pool's byte budget is spent and no recycled buffer fits
    Exhausted,
    /// Zero-sized allocations are rejected
    InvalidSize,
}

/// A hardware buffer descriptor: an exactly-sized, owned packet region.
///
/// Ownership moves exactly once along the TX path: pool -> frame composer
/// -> egress descriptor -> hardware, which releases it back to the pool
/// after transmission.
#[derive(Debug)]
pub struct FrameBuffer {
    region: Box<[u8]>,
    len: usize,
}

impl FrameBuffer {
    /// The requested frame length, which may be smaller than the
    /// size-class region backing it.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.region[..self.len]
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.region[..self.len]
    }
}

/// Pool usage counters, readable at any time for diagnostics
#[derive(Debug, Clone, Copy, Default)]
pub struct PoolStats {
    pub total_allocated: usize,
    pub total_freed: usize,
    pub current_usage: usize,
    pub peak_usage: usize,
    pub pool_hits: usize,
    pub pool_misses: usize,
}

struct PoolInner {
    /// Bytes left for carving fresh buffers
    budget: usize,
    /// Released regions, keyed by size class
    free: BTreeMap<usize, Vec<Box<[u8]>>>,
    stats: PoolStats,
}

impl PoolInner {
    fn try_from_pool(&mut self, class: usize) -> Option<Box<[u8]>> {
        if let Some(buffers) = self.free.get_mut(&class) {
            if let Some(region) = buffers.pop() {
                self.stats.pool_hits += 1;
                return Some(region);
            }
        }
        self.stats.pool_misses += 1;
        None
    }
}

/// A bounded pool of [`FrameBuffer`]s, safe to share behind `&self`.
pub struct BufferPool {
    inner: Mutex<PoolInner>,
}

impl BufferPool {
    /// Create a pool that will hand out at most `budget` bytes of fresh
    /// buffer space (recycled buffers do not count against the budget).
    pub fn new(budget: usize) -> Self {
        Self {
            inner: Mutex::new(PoolInner {
                budget,
                free: BTreeMap::new(),
                stats: PoolStats::default(),
            }),
        }
    }

    /// Allocate a buffer of exactly `size` usable bytes.
    ///
    /// Tries the recycle pool first, then carves from the remaining
    /// budget. Fails with [`AllocError::Exhausted`] once neither can
    /// satisfy the request; the caller decides whether to drop or retry
    /// at a higher layer.
    pub fn alloc(&self, size: usize) -> Result<FrameBuffer, AllocError> {
        if size == 0 {
            return Err(AllocError::InvalidSize);
        }

        let class = (size + BUF_ALIGNMENT - 1) & !(BUF_ALIGNMENT - 1);
        let mut inner = self.inner.lock();

        let region = match inner.try_from_pool(class) {
            Some(region) => region,
            None => {
                if class > inner.budget {
                    log::warn!("[POOL] exhausted: {} bytes requested, {} left", class, inner.budget);
                    return Err(AllocError::Exhausted);
                }
                inner.budget -= class;
                inner.stats.total_allocated += class;
                vec![0u8; class].into_boxed_slice()
            }
        };

        inner.stats.current_usage += class;
        if inner.stats.current_usage > inner.stats.peak_usage {
            inner.stats.peak_usage = inner.stats.current_usage;
        }

        Ok(FrameBuffer { region, len: size })
    }

    /// Return a transmitted buffer to the pool.
    ///
    /// Called on behalf of the hardware once the frame has left the wire;
    /// buffers beyond the per-class cap are dropped for good.
    pub fn release(&self, buf: FrameBuffer) {
        let class = buf.region.len();
        let mut inner = self.inner.lock();

        inner.stats.current_usage = inner.stats.current_usage.saturating_sub(class);

        let buffers = inner.free.entry(class).or_insert_with(Vec::new);
        if buffers.len() < MAX_POOLED_BUFFERS {
            buffers.push(buf.region);
        } else {
            inner.stats.total_freed += class;
        }
    }

    pub fn stats(&self) -> PoolStats {
        self.inner.lock().stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_exact_length() {
        let pool = BufferPool::new(4096);
        let buf = pool.alloc(100).unwrap();
        assert_eq!(buf.len(), 100);
        assert_eq!(buf.as_slice().len(), 100);
    }

    #[test]
    fn test_zero_size_rejected() {
        let pool = BufferPool::new(4096);
        assert_eq!(pool.alloc(0).unwrap_err(), AllocError::InvalidSize);
    }

    #[test]
    fn test_exhaustion() {
        let pool = BufferPool::new(128);
        let held = pool.alloc(128).unwrap();
        assert_eq!(pool.alloc(1).unwrap_err(), AllocError::Exhausted);

        // releasing makes the region available again
        pool.release(held);
        assert!(pool.alloc(128).is_ok());
    }

    #[test]
    fn test_release_recycles() {
        let pool = BufferPool::new(4096);
        let buf = pool.alloc(60).unwrap();
        pool.release(buf);

        let _again = pool.alloc(60).unwrap();
        let stats = pool.stats();
        assert_eq!(stats.pool_hits, 1);
        // one fresh 64-byte class carve, reused once
        assert_eq!(stats.total_allocated, 64);
    }
}
