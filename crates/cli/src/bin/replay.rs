use std::path::PathBuf;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::Context;
use clap::Parser;
use flightdeck::export::summary::ReplaySummary;
use flightdeck::export::{samples, summary, writer_for_path};
use flightdeck::loader::load_series;
use flightdeck::playback::{PlaybackController, PlaybackSpeed, Snapshot, TickOutcome};

#[derive(Parser)]
#[command(author, version, about = "Replay a recorded suborbital flight log in the terminal")]
struct Cli {
    /// Path to the recorded flight log (JSON array of telemetry records)
    #[arg(long)]
    data: PathBuf,

    /// Playback speed multiplier (1, 2, or 4)
    #[arg(long, default_value = "1")]
    speed: PlaybackSpeed,

    /// Host tick interval in milliseconds
    #[arg(long, default_value_t = 16)]
    tick_ms: u64,

    /// Run against a synthetic clock without sleeping (finishes immediately)
    #[arg(long)]
    fast: bool,

    /// Write revealed samples as CSV after the replay (use '-' for stdout)
    #[arg(long)]
    export_csv: Option<PathBuf>,

    /// Write a JSON replay summary after the replay
    #[arg(long)]
    summary: Option<PathBuf>,

    /// Suppress per-tick readout lines
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let series = load_series(&cli.data)
        .with_context(|| format!("loading flight log {}", cli.data.display()))?;
    println!(
        "Loaded {} samples spanning {:.2} s to {:.2} s",
        series.len(),
        series.first().flight_time_s,
        series.last().flight_time_s,
    );

    let mut controller = PlaybackController::new(series);
    let wall_start = Instant::now();
    let mut synthetic_ms = 0.0_f64;
    let tick_ms = cli.tick_ms.max(1);

    let token = controller
        .start(0.0)
        .map_err(|err| anyhow::anyhow!("failed to start playback: {err}"))?;
    if cli.speed != PlaybackSpeed::X1 {
        controller
            .set_speed(cli.speed, 0.0)
            .map_err(|err| anyhow::anyhow!("failed to set speed: {err}"))?;
    }

    let mut ticks: u64 = 0;
    let mut last_label = String::new();
    let mut last_event: Option<&'static str> = None;
    let mut events_fired: Vec<String> = Vec::new();
    let final_snapshot: Snapshot;

    loop {
        let now_ms = if cli.fast {
            synthetic_ms += tick_ms as f64;
            synthetic_ms
        } else {
            thread::sleep(Duration::from_millis(tick_ms));
            wall_start.elapsed().as_secs_f64() * 1_000.0
        };

        match controller.tick(token, now_ms) {
            TickOutcome::Continue(snapshot) => {
                ticks += 1;
                observe(
                    &snapshot,
                    cli.quiet,
                    &mut last_label,
                    &mut last_event,
                    &mut events_fired,
                );
            }
            TickOutcome::Finished(snapshot) => {
                ticks += 1;
                observe(
                    &snapshot,
                    cli.quiet,
                    &mut last_label,
                    &mut last_event,
                    &mut events_fired,
                );
                final_snapshot = snapshot;
                break;
            }
            TickOutcome::Stale => anyhow::bail!("playback tick rejected as stale"),
        }
    }

    println!(
        "Replay finished: {} at {} ({} samples revealed over {} ticks)",
        final_snapshot.countdown_label, final_snapshot.mission_time_s, final_snapshot.revealed_len, ticks
    );

    if let Some(path) = &cli.export_csv {
        let revealed = &controller.series().samples()[..final_snapshot.revealed_len];
        let mut writer = writer_for_path(path)?;
        samples::write_csv(&mut writer, revealed)
            .with_context(|| format!("exporting CSV to {}", path.display()))?;
    }

    if let Some(path) = &cli.summary {
        let replay_summary = ReplaySummary::stamped(
            cli.data.display().to_string(),
            controller.speed().to_string(),
            ticks,
            final_snapshot.revealed_len,
            events_fired,
            final_snapshot.countdown_label.clone(),
            final_snapshot.mission_time_s,
        );
        summary::write_sidecar(path, &replay_summary)
            .with_context(|| format!("writing summary to {}", path.display()))?;
    }

    Ok(())
}

/// Print a readout line when the countdown second or the active event changes,
/// and record each event the first time it fires.
fn observe(
    snapshot: &Snapshot,
    quiet: bool,
    last_label: &mut String,
    last_event: &mut Option<&'static str>,
    events_fired: &mut Vec<String>,
) {
    let event_changed = snapshot.active_event != *last_event;
    if event_changed {
        if let Some(name) = snapshot.active_event {
            if events_fired.iter().all(|fired| fired != name) {
                events_fired.push(name.to_string());
            }
        }
        *last_event = snapshot.active_event;
    }

    if quiet {
        return;
    }
    if snapshot.countdown_label != *last_label || event_changed {
        println!(
            "{:<8} alt {:>9.1} m  vel {:>7.1} m/s  progress {:>5.1}%{}",
            snapshot.countdown_label,
            snapshot.altitude_m,
            snapshot.velocity_m_s,
            snapshot.progress * 100.0,
            snapshot
                .active_event
                .map(|name| format!("  [{name}]"))
                .unwrap_or_default(),
        );
        *last_label = snapshot.countdown_label.clone();
    }
}
