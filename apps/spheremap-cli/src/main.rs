use anyhow::Context;
use clap::{Parser, Subcommand};
use glam::Vec3;
use spheremap_camera::{CameraMode, Orientation, OrientationState};
use spheremap_common::tuning;
use spheremap_input::{InputBuffer, Key};
use spheremap_kernel::{FixedStepScheduler, SchedulerConfig};
use spheremap_render::RecordingBackend;
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "spheremap-cli", about = "Headless sphere-map tools")]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print crate info and tuning constants
    Info,
    /// Drive the scheduler with synthetic time and report what it did
    Simulate {
        /// Number of scheduler passes to run
        #[arg(short, long, default_value = "120")]
        frames: u32,
        /// Synthetic wall time between passes, in milliseconds
        #[arg(long, default_value = "16.7")]
        frame_ms: f64,
        /// One extra stall inserted half-way, in milliseconds
        #[arg(long, default_value = "0")]
        stall_ms: u64,
        /// Navigation mode: free or clamped
        #[arg(long, default_value_t = CameraMode::Clamped)]
        camera: CameraMode,
        /// Cap on catch-up ticks per pass; unbounded when omitted
        #[arg(long)]
        max_catch_up_ticks: Option<NonZeroU32>,
    },
}

/// Totals from a synthetic run.
#[derive(Debug, Default, PartialEq, Eq)]
struct SimulationSummary {
    passes: u32,
    ticks: u64,
    dropped_ticks: u64,
    frames: u64,
    largest_burst: u32,
}

/// Run `frames` passes `frame` apart, with W held and the cursor drifting
/// right, inserting one `stall` half-way.
fn simulate(
    scheduler: &mut FixedStepScheduler<RecordingBackend>,
    input: &InputBuffer,
    frames: u32,
    frame: Duration,
    stall: Duration,
) -> SimulationSummary {
    let mut summary = SimulationSummary::default();
    let mut now = scheduler.clock().last_pass();
    input.push_resize(1920, 1080);
    input.push_key(Key::W, true);

    for i in 0..frames {
        now += frame;
        if i == frames / 2 {
            now += stall;
        }
        input.push_cursor(i as f32 * 2.0, 0.0);

        let report = scheduler.pass(now);
        summary.passes += 1;
        summary.ticks += u64::from(report.ticks);
        summary.dropped_ticks += report.dropped_ticks;
        summary.frames += u64::from(report.rendered);
        summary.largest_burst = summary.largest_burst.max(report.ticks);
    }
    summary
}

/// Convert a `--frame-ms` value into a pass interval.
fn frame_interval(frame_ms: f64) -> anyhow::Result<Duration> {
    Duration::try_from_secs_f64(frame_ms / 1000.0)
        .with_context(|| format!("--frame-ms {frame_ms} is not a usable interval"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(filter))
        .init();

    match cli.command {
        Commands::Info => {
            println!("spheremap-cli v{}", env!("CARGO_PKG_VERSION"));
            println!("input: {}", spheremap_input::crate_info());
            println!("render: {}", spheremap_render::crate_info());
            println!(
                "tick rate: {} Hz ({:?} per tick)",
                tuning::TICKS_PER_SECOND,
                tuning::TICK_PERIOD
            );
            println!(
                "pitch limit: {:.1} deg (margin {} deg)",
                spheremap_camera::pitch_limit().to_degrees(),
                tuning::PITCH_MARGIN_DEGREES
            );
            println!(
                "move speed: {} per tick (x{} sprinting)",
                tuning::MOVE_SPEED,
                tuning::FAST_MULTIPLIER
            );
            println!("mouse sensitivity: {} rad per unit", tuning::MOUSE_SENSITIVITY);
        }
        Commands::Simulate {
            frames,
            frame_ms,
            stall_ms,
            camera,
            max_catch_up_ticks,
        } => {
            let frame = frame_interval(frame_ms)?;
            let config = SchedulerConfig {
                max_ticks_per_pass: max_catch_up_ticks,
                ..SchedulerConfig::default()
            };
            tracing::info!(frames, frame_ms, stall_ms, %camera, "starting synthetic run");
            let input = Arc::new(InputBuffer::new());
            let mut scheduler = FixedStepScheduler::new(
                config,
                Arc::clone(&input),
                RecordingBackend::new(),
                OrientationState::for_mode(camera, Vec3::ZERO),
            );

            let summary = simulate(
                &mut scheduler,
                &input,
                frames,
                frame,
                Duration::from_millis(stall_ms),
            );

            let camera_state = scheduler.orientation();
            println!(
                "Simulated {} passes ({camera} camera, {frame_ms} ms apart, {stall_ms} ms stall)",
                summary.passes
            );
            println!(
                "Ticks: {} (dropped {}, largest burst {})",
                summary.ticks, summary.dropped_ticks, summary.largest_burst
            );
            println!("Frames: {}", summary.frames);
            let p = camera_state.position();
            let f = camera_state.forward();
            println!("Position: ({:.3}, {:.3}, {:.3})", p.x, p.y, p.z);
            println!("Forward: ({:.3}, {:.3}, {:.3})", f.x, f.y, f.z);
            print!("{}", scheduler.backend().summary());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(frames: u32, frame_ms: u64, stall_ms: u64, cap: Option<u32>) -> SimulationSummary {
        let input = Arc::new(InputBuffer::new());
        let config = SchedulerConfig {
            max_ticks_per_pass: cap.and_then(NonZeroU32::new),
            ..SchedulerConfig::default()
        };
        let mut scheduler = FixedStepScheduler::new(
            config,
            Arc::clone(&input),
            RecordingBackend::new(),
            OrientationState::for_mode(CameraMode::Free, Vec3::ZERO),
        );
        simulate(
            &mut scheduler,
            &input,
            frames,
            Duration::from_millis(frame_ms),
            Duration::from_millis(stall_ms),
        )
    }

    #[test]
    fn steady_frames_tick_once_each() {
        let summary = run(60, 17, 0, None);
        assert_eq!(summary.passes, 60);
        assert_eq!(summary.frames, 60);
        assert!(summary.ticks >= 60);
        assert_eq!(summary.dropped_ticks, 0);
    }

    #[test]
    fn stall_causes_one_burst() {
        let summary = run(10, 17, 1000, None);
        assert!(summary.largest_burst >= 60);
        assert_eq!(summary.frames, 10);
    }

    #[test]
    fn capped_stall_drops_ticks() {
        let summary = run(10, 17, 1000, Some(4));
        assert_eq!(summary.largest_burst, 4);
        assert!(summary.dropped_ticks > 50);
    }

    #[test]
    fn frame_interval_rejects_unrepresentable_values() {
        assert_eq!(frame_interval(500.0).unwrap(), Duration::from_millis(500));
        assert!(frame_interval(-1.0).is_err());
        assert!(frame_interval(f64::NAN).is_err());
        assert!(frame_interval(1e300).is_err());
    }

    #[test]
    fn zero_catch_up_cap_is_rejected() {
        let args = ["spheremap-cli", "simulate", "--max-catch-up-ticks", "0"];
        assert!(Cli::try_parse_from(args).is_err());
        let args = ["spheremap-cli", "simulate", "--max-catch-up-ticks", "3"];
        assert!(Cli::try_parse_from(args).is_ok());
    }
}
