use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::stream::{StreamConsumer, StreamProducer};
use crate::RING_CAPACITY;

/// Shared state of one mono sample stream: a fixed ring of `f32` cells plus a
/// read and a write cursor.
///
/// Each cursor has exactly one writer — the consumer advances `read`, the
/// producer advances `write` — and that convention is the only mutual
/// exclusion. Cursor updates use acquire/release so an advance is visible to
/// the other side's next load without tearing. Sample cells are relaxed
/// atomics: if the cursors ever coincide, a colliding slot access yields the
/// stale or the new value, never a torn one. Nothing here blocks, and nothing
/// allocates after construction.
pub struct SampleRing {
    samples: Box<[AtomicU32]>,
    read: AtomicU32,
    write: AtomicU32,
}

impl SampleRing {
    /// Ring with the stream's standard capacity, zeroed samples, both cursors
    /// at slot 0.
    pub fn new() -> Self {
        Self::with_capacity(RING_CAPACITY)
    }

    pub fn with_capacity(capacity: u32) -> Self {
        assert!(capacity > 0, "ring capacity must be non-zero");
        Self {
            samples: (0..capacity).map(|_| AtomicU32::new(0)).collect(),
            read: AtomicU32::new(0),
            write: AtomicU32::new(0),
        }
    }

    /// Wrap the ring in an `Arc` and hand one endpoint to each side.
    pub fn split(self) -> (StreamProducer, StreamConsumer) {
        let ring = Arc::new(self);
        (
            StreamProducer::new(Arc::clone(&ring)),
            StreamConsumer::new(ring),
        )
    }

    #[inline]
    pub fn capacity(&self) -> u32 {
        self.samples.len() as u32
    }

    /// Next slot index after `index`, wrapping at capacity.
    #[inline]
    pub fn next_index(&self, index: u32) -> u32 {
        (index + 1) % self.capacity()
    }

    #[inline]
    pub fn read_cursor(&self) -> u32 {
        self.read.load(Ordering::Acquire)
    }

    #[inline]
    pub fn store_read_cursor(&self, index: u32) {
        debug_assert!(index < self.capacity());
        self.read.store(index, Ordering::Release);
    }

    #[inline]
    pub fn write_cursor(&self) -> u32 {
        self.write.load(Ordering::Acquire)
    }

    #[inline]
    pub fn store_write_cursor(&self, index: u32) {
        debug_assert!(index < self.capacity());
        self.write.store(index, Ordering::Release);
    }

    #[inline]
    pub fn sample_at(&self, index: u32) -> f32 {
        f32::from_bits(self.samples[index as usize].load(Ordering::Relaxed))
    }

    #[inline]
    pub fn set_sample_at(&self, index: u32, value: f32) {
        self.samples[index as usize].store(value.to_bits(), Ordering::Relaxed);
    }

    /// Unread-sample estimate, `(write - read) mod capacity`.
    ///
    /// Informational only: the cursors move independently, so by the time the
    /// value is returned it may already be stale, and neither side consults it
    /// before reading or writing.
    pub fn occupancy(&self) -> u32 {
        let read = self.read_cursor();
        let write = self.write_cursor();
        (self.capacity() + write - read) % self.capacity()
    }

    /// Point-in-time cursor snapshot for metrics and debugging.
    pub fn stats(&self) -> RingStats {
        let read_cursor = self.read_cursor();
        let write_cursor = self.write_cursor();
        RingStats {
            read_cursor,
            write_cursor,
            occupancy: (self.capacity() + write_cursor - read_cursor) % self.capacity(),
        }
    }
}

impl Default for SampleRing {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg_attr(feature = "serde", derive(Serialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingStats {
    pub read_cursor: u32,
    pub write_cursor: u32,
    pub occupancy: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::RING_CAPACITY;

    #[test]
    fn cursor_advance_stays_in_range_and_cycles() {
        let ring = SampleRing::new();
        let mut index = 0;
        for _ in 0..RING_CAPACITY {
            index = ring.next_index(index);
            assert!(index < RING_CAPACITY);
        }
        // Exactly one full revolution lands back on the start slot.
        assert_eq!(index, 0);
    }

    #[test]
    fn cursors_start_zeroed_and_samples_silent() {
        let ring = SampleRing::new();
        assert_eq!(ring.read_cursor(), 0);
        assert_eq!(ring.write_cursor(), 0);
        for i in 0..ring.capacity() {
            assert_eq!(ring.sample_at(i), 0.0);
        }
    }

    #[test]
    fn slot_roundtrip_preserves_bits() {
        let ring = SampleRing::with_capacity(8);
        for (i, value) in [0.25f32, -1.0, f32::MIN_POSITIVE, 1e-38].iter().enumerate() {
            ring.set_sample_at(i as u32, *value);
            assert_eq!(ring.sample_at(i as u32).to_bits(), value.to_bits());
        }
    }

    #[test]
    fn occupancy_wraps_with_cursors() {
        let ring = SampleRing::with_capacity(16);
        assert_eq!(ring.occupancy(), 0);

        ring.store_write_cursor(5);
        assert_eq!(ring.occupancy(), 5);

        // Read cursor ahead of write cursor: the estimate wraps rather than
        // going negative.
        ring.store_read_cursor(10);
        assert_eq!(ring.occupancy(), 11);

        let stats = ring.stats();
        assert_eq!(
            stats,
            RingStats {
                read_cursor: 10,
                write_cursor: 5,
                occupancy: 11,
            }
        );
    }
}
