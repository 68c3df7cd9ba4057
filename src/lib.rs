//! Lock-free SPSC sample streaming for realtime audio render callbacks.
//!
//! A producer thread and a realtime consumer share one fixed-capacity ring of
//! mono `f32` samples plus two atomic cursors. The consumer drains exactly one
//! render quantum per callback and never blocks, never allocates, and never
//! waits on the producer; starvation and overwrite degrade the audio, not the
//! deadline.

pub mod ring; // Shared ring state: sample cells and atomic cursors
pub mod stream; // Producer/consumer endpoints and the per-quantum drain

pub use ring::{RingStats, SampleRing};
pub use stream::{StreamConsumer, StreamProducer};

/// Ring capacity in samples. Fixed for the life of the stream.
pub const RING_CAPACITY: u32 = 2048;

/// Samples drained per render callback invocation.
pub const RENDER_QUANTUM: usize = 128;
