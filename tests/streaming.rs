use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use monoring::{SampleRing, RENDER_QUANTUM, RING_CAPACITY};

#[test]
fn samples_pushed_on_another_thread_arrive_in_order() {
    let (mut producer, mut consumer) = SampleRing::new().split();

    let handle = std::thread::spawn(move || {
        for i in 0..RENDER_QUANTUM {
            producer.push((i as f32) / RENDER_QUANTUM as f32);
        }
        producer
    });
    let producer = handle.join().unwrap();

    let mut out = [0.0f32; RENDER_QUANTUM];
    assert!(consumer.render_quantum(&mut out));

    for (i, &sample) in out.iter().enumerate() {
        assert_eq!(sample, (i as f32) / RENDER_QUANTUM as f32);
    }
    assert_eq!(producer.stats().write_cursor, RENDER_QUANTUM as u32);
    assert_eq!(consumer.stats().read_cursor, RENDER_QUANTUM as u32);
}

#[test]
fn concurrent_producer_never_stalls_the_drain() {
    let (mut producer, mut consumer) = SampleRing::new().split();

    let running = Arc::new(AtomicBool::new(true));
    let writer = std::thread::spawn({
        let running = Arc::clone(&running);
        move || {
            while running.load(Ordering::Relaxed) {
                producer.push(0.5);
            }
        }
    });

    // Drain several full revolutions while the producer hammers the ring.
    // Every sample observed is either the initial silence or the producer's
    // value; a torn read would show up as anything else.
    let mut out = [0.0f32; RENDER_QUANTUM];
    let drains = 4 * (RING_CAPACITY as usize / RENDER_QUANTUM);
    for _ in 0..drains {
        assert!(consumer.render_quantum(&mut out));
        for &sample in out.iter() {
            assert!(sample == 0.0 || sample == 0.5, "unexpected sample {sample}");
        }
    }
    assert_eq!(
        consumer.stats().read_cursor,
        (drains * RENDER_QUANTUM) as u32 % RING_CAPACITY
    );

    running.store(false, Ordering::Relaxed);
    writer.join().unwrap();
}
