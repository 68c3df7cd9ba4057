//! ringdemo - streams a sine arpeggio through the sample ring
//!
//! Run with: cargo run --bin ringdemo
//!
//! A producer thread synthesizes the tone and pushes samples into the ring;
//! the cpal output callback drains one render quantum at a time. Pitch
//! changes travel main thread -> producer over an rtrb queue, so neither
//! audio-side thread ever takes a lock.

use std::f32::consts::TAU;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use monoring::{SampleRing, StreamConsumer, StreamProducer, RENDER_QUANTUM, RING_CAPACITY};

/// Producer keeps the ring about half full; overrun and underrun stay
/// inaudible as long as it can wake up once per quantum or so.
const TARGET_OCCUPANCY: u32 = RING_CAPACITY / 2;

const ARPEGGIO_HZ: [f32; 4] = [220.0, 261.63, 329.63, 440.0];
const NOTE_MS: u64 = 400;

#[derive(Debug, Copy, Clone)]
enum ProducerMessage {
    SetPitch { freq: f32 },
}

fn main() -> EyreResult<()> {
    color_eyre::install()?;

    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = config.sample_rate().0 as f32;
    let channels = config.channels() as usize;

    println!("=== ringdemo ===");
    println!("Sample rate: {} Hz", sample_rate);
    println!("Channels: {} (ring is mono, duplicated per channel)", channels);
    println!("Ring: {} samples, quantum: {}", RING_CAPACITY, RENDER_QUANTUM);
    println!();

    let (producer, consumer) = SampleRing::new().split();
    let (mut control_tx, control_rx) = rtrb::RingBuffer::<ProducerMessage>::new(64);

    let running = Arc::new(AtomicBool::new(true));
    let producer_thread = std::thread::spawn({
        let running = Arc::clone(&running);
        move || run_producer(producer, control_rx, running, sample_rate)
    });

    let mut reader = QuantumReader::new(consumer);
    let stream = device.build_output_stream(
        &config.into(),
        move |data: &mut [f32], _| {
            for frame in data.chunks_mut(channels) {
                let sample = reader.next_sample();
                for slot in frame {
                    *slot = sample;
                }
            }
        },
        |err| eprintln!("Audio error: {}", err),
        None,
    )?;
    stream.play()?;

    for &freq in ARPEGGIO_HZ.iter().cycle().take(12) {
        let _ = control_tx.push(ProducerMessage::SetPitch { freq });
        std::thread::sleep(Duration::from_millis(NOTE_MS));
    }

    running.store(false, Ordering::Relaxed);
    producer_thread
        .join()
        .map_err(|_| eyre!("producer thread panicked"))?;
    Ok(())
}

/// Synthesize the tone and keep the ring topped up.
fn run_producer(
    mut producer: StreamProducer,
    mut control_rx: rtrb::Consumer<ProducerMessage>,
    running: Arc<AtomicBool>,
    sample_rate: f32,
) {
    let mut freq = ARPEGGIO_HZ[0];
    let mut phase = 0.0f32;

    while running.load(Ordering::Relaxed) {
        while let Ok(msg) = control_rx.pop() {
            match msg {
                ProducerMessage::SetPitch { freq: f } => freq = f,
            }
        }

        // The ring itself never pushes back, so pacing lives here: top up to
        // the target level, then sleep for roughly a quantum.
        while producer.occupancy() < TARGET_OCCUPANCY {
            producer.push(0.2 * (TAU * phase).sin());
            phase += freq / sample_rate;
            if phase >= 1.0 {
                phase -= 1.0;
            }
        }

        std::thread::sleep(Duration::from_millis(2));
    }
}

/// Adapts quantum-sized drains to whatever buffer size cpal hands out.
struct QuantumReader {
    consumer: StreamConsumer,
    quantum: [f32; RENDER_QUANTUM],
    pos: usize,
}

impl QuantumReader {
    fn new(consumer: StreamConsumer) -> Self {
        Self {
            consumer,
            quantum: [0.0; RENDER_QUANTUM],
            pos: RENDER_QUANTUM,
        }
    }

    #[inline]
    fn next_sample(&mut self) -> f32 {
        if self.pos == RENDER_QUANTUM {
            self.consumer.render_quantum(&mut self.quantum);
            self.pos = 0;
        }
        let sample = self.quantum[self.pos];
        self.pos += 1;
        sample
    }
}
