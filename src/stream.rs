use std::sync::Arc;

use crate::ring::{RingStats, SampleRing};
use crate::RENDER_QUANTUM;

/*
Streaming Handoff
=================

The producer and the consumer each hold an endpoint over the same SampleRing
and run on independent schedules:

  producer thread            realtime callback
  ---------------            -----------------
  push(sample)               render_quantum(out)
    write slot[w]              out[i] = slot[r]
    w = (w + 1) % C            r = (r + 1) % C

The consumer is invoked once per render quantum by the audio host and must
finish inside that deadline, so it never waits for data. If the producer has
fallen behind, the drain reads whatever the slots still hold — stale samples
or silence — and the stream keeps time. If the producer laps the consumer,
already-buffered audio is overwritten in place. Both are silent data-quality
degradations, not errors; neither endpoint can fail or block.

The drain re-loads and re-stores the read cursor for every single sample
instead of batching the 128 advances. Each step is therefore observably atomic
to a producer inspecting the cursor mid-quantum, at the cost of some
throughput.
*/

/// Producer endpoint. Writes samples at the write cursor and advances it;
/// never blocks and never refuses a write.
pub struct StreamProducer {
    ring: Arc<SampleRing>,
}

impl StreamProducer {
    /// Endpoint over an externally owned ring.
    pub fn new(ring: Arc<SampleRing>) -> Self {
        Self { ring }
    }

    /// Write one sample at the current write cursor, then advance it.
    ///
    /// Writing over a slot the consumer has not read yet is the accepted
    /// overrun race; pacing is the caller's policy.
    #[inline]
    pub fn push(&mut self, sample: f32) {
        let idx = self.ring.write_cursor();
        self.ring.set_sample_at(idx, sample);
        self.ring.store_write_cursor(self.ring.next_index(idx));
    }

    pub fn push_slice(&mut self, samples: &[f32]) {
        for &sample in samples {
            self.push(sample);
        }
    }

    /// Unread-sample estimate; see [`SampleRing::occupancy`].
    pub fn occupancy(&self) -> u32 {
        self.ring.occupancy()
    }

    pub fn stats(&self) -> RingStats {
        self.ring.stats()
    }
}

/// Consumer endpoint for the realtime render callback.
pub struct StreamConsumer {
    ring: Arc<SampleRing>,
}

impl StreamConsumer {
    /// Endpoint over an externally owned ring.
    pub fn new(ring: Arc<SampleRing>) -> Self {
        Self { ring }
    }

    /// Drain exactly one render quantum into `out`.
    ///
    /// Always fills all 128 slots and advances the read cursor by 128 mod
    /// capacity, in bounded constant work. The write cursor is never
    /// consulted: an underrun emits whatever the slots hold rather than
    /// waiting. Returns the keep-running signal for the host scheduler,
    /// which is always `true` — the stream never self-terminates.
    pub fn render_quantum(&mut self, out: &mut [f32; RENDER_QUANTUM]) -> bool {
        for slot in out.iter_mut() {
            let idx = self.ring.read_cursor();
            *slot = self.ring.sample_at(idx);
            self.ring.store_read_cursor(self.ring.next_index(idx));
        }
        true
    }

    /// Unread-sample estimate; see [`SampleRing::occupancy`].
    pub fn occupancy(&self) -> u32 {
        self.ring.occupancy()
    }

    pub fn stats(&self) -> RingStats {
        self.ring.stats()
    }
}
