use std::hint::black_box;
use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;
use spheremap_camera::OrientationState;
use spheremap_input::{InputBuffer, Key};
use spheremap_kernel::{FixedStepScheduler, SchedulerConfig};
use spheremap_render::RecordingBackend;

fn bench_drain(events_per_drain: usize, iterations: usize) {
    let buffer = InputBuffer::new();
    let start = Instant::now();
    for i in 0..iterations {
        for j in 0..events_per_drain {
            buffer.push_key(Key::W, (i + j) % 2 == 0);
            buffer.push_cursor(j as f32, i as f32);
        }
        black_box(buffer.drain());
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  push+drain ({events_per_drain} events, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn bench_pass(ticks_per_pass: u32, iterations: usize) {
    let input = Arc::new(InputBuffer::new());
    let mut scheduler = FixedStepScheduler::new(
        SchedulerConfig::default(),
        Arc::clone(&input),
        RecordingBackend::new(),
        OrientationState::free(Vec3::ZERO, Vec3::NEG_Z),
    );
    input.push_key(Key::W, true);
    let step = scheduler.clock().tick_period() * ticks_per_pass;
    let mut now = scheduler.clock().last_pass();

    let start = Instant::now();
    for i in 0..iterations {
        now += step;
        input.push_cursor(i as f32, 0.0);
        black_box(scheduler.pass(black_box(now)));
    }
    let elapsed = start.elapsed();
    let per_iter = elapsed / iterations as u32;
    println!(
        "  pass ({ticks_per_pass} ticks, {iterations} iters): {per_iter:?}/iter, total {elapsed:?}"
    );
}

fn main() {
    println!("=== Input buffer ===");
    bench_drain(1, 100_000);
    bench_drain(16, 10_000);
    bench_drain(256, 1_000);

    println!("=== Scheduler pass ===");
    bench_pass(1, 100_000);
    bench_pass(8, 10_000);
    bench_pass(120, 1_000);
}
