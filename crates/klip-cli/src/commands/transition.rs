//! Sample-by-sample trace of a curve change.
//!
//! Two columns are printed for the same constant input: `crossfade` is a
//! plain [`CurveTransition`] ramp from the old curve to the new one, and
//! `engine` is the output of a [`SignalConditioner`], which installs the new
//! curve on the first sample of the change and so jumps there immediately.
//! The conditioner runs with a near-transparent DC blocker so a constant
//! input is not filtered away over the trace.

use clap::Args;
use klip_dsp::{
    ClipCurve, CurveTransition, DEFAULT_TRANSITION_SPEED, EngineSettings, SignalConditioner,
};
use serde::Serialize;

use super::common::parse_curve;

const TRACE_SAMPLE_RATE: f32 = 48000.0;

/// DC cutoff low enough that a constant input survives the trace.
const TRACE_DC_CUTOFF_HZ: f32 = 0.001;

#[derive(Args)]
pub struct TransitionArgs {
    /// Curve before the change
    #[arg(long, default_value = "soft", value_parser = parse_curve)]
    from: ClipCurve,

    /// Curve after the change
    #[arg(long, default_value = "hard", value_parser = parse_curve)]
    to: ClipCurve,

    /// Blend increment per sample
    #[arg(long, default_value_t = DEFAULT_TRANSITION_SPEED)]
    speed: f32,

    /// Constant input sample
    #[arg(short, long, default_value = "0.9", allow_hyphen_values = true)]
    input: f32,

    /// Linear clip threshold
    #[arg(short, long, default_value = "0.5")]
    threshold: f32,

    /// Samples to trace after the change (default: until settled, plus two)
    #[arg(short = 'n', long)]
    samples: Option<usize>,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Serialize)]
struct TraceRow {
    sample: usize,
    blend: f32,
    crossfade: f32,
    engine: f32,
}

fn trace(
    from: ClipCurve,
    to: ClipCurve,
    speed: f32,
    input: f32,
    threshold: f32,
    samples: usize,
) -> Vec<TraceRow> {
    let mut crossfade = CurveTransition::new(from);
    let settings = EngineSettings {
        dc_cutoff_hz: TRACE_DC_CUTOFF_HZ,
        transition_speed: speed,
        ..EngineSettings::default()
    };
    let mut engine = SignalConditioner::with_settings(TRACE_SAMPLE_RATE, settings);
    engine.set_threshold(threshold);

    let mut rows = Vec::with_capacity(samples + 1);
    rows.push(TraceRow {
        sample: 0,
        blend: crossfade.blend(),
        crossfade: crossfade.mix(input, threshold),
        engine: engine.process_sample(input, from),
    });

    crossfade.start(to, speed);

    for sample in 1..=samples {
        crossfade.advance();
        rows.push(TraceRow {
            sample,
            blend: crossfade.blend(),
            crossfade: crossfade.mix(input, threshold),
            engine: engine.process_sample(input, to),
        });
    }

    rows
}

pub fn run(args: TransitionArgs) -> anyhow::Result<()> {
    if args.speed <= 0.0 || args.speed > 1.0 || args.speed.is_nan() {
        anyhow::bail!("speed must be in (0, 1], got {}", args.speed);
    }
    if args.threshold <= 0.0 || args.threshold.is_nan() {
        anyhow::bail!("threshold must be positive, got {}", args.threshold);
    }

    let settle = (1.0 / args.speed).ceil() as usize;
    let samples = args.samples.unwrap_or(settle + 2);
    tracing::debug!(from = %args.from, to = %args.to, settle, samples, "tracing transition");

    let rows = trace(args.from, args.to, args.speed, args.input, args.threshold, samples);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
        return Ok(());
    }

    println!(
        "{} -> {} at speed {} (input {}, threshold {})",
        args.from, args.to, args.speed, args.input, args.threshold
    );
    println!("Settles after {settle} samples");
    println!();
    println!("  {:>6}  {:>8}  {:>10}  {:>10}", "sample", "blend", "crossfade", "engine");
    println!("  {:>6}  {:>8}  {:>10}  {:>10}", "------", "-----", "---------", "------");
    for row in &rows {
        println!(
            "  {:>6}  {:>8.4}  {:>10.5}  {:>10.5}",
            row.sample, row.blend, row.crossfade, row.engine
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_column_jumps_immediately() {
        let rows = trace(ClipCurve::SoftClip, ClipCurve::HardClip, 0.05, 0.9, 0.5, 22);
        assert_eq!(rows.len(), 23);

        let soft = ClipCurve::SoftClip.apply(0.9, 0.5);
        assert_eq!(rows[0].crossfade, soft);
        assert!((rows[0].engine - soft).abs() < 1e-5);

        assert!((rows[1].engine - 0.5).abs() < 1e-6);
        assert!((rows[1].crossfade - 0.5).abs() > 0.1, "crossfade should still be mostly soft");
    }

    #[test]
    fn test_crossfade_settles() {
        let rows = trace(ClipCurve::LinearClip, ClipCurve::HardClip, 0.25, 1.0, 0.5, 6);
        assert_eq!(rows[4].blend, 1.0);
        assert_eq!(rows[4].crossfade, 0.5);
        assert_eq!(rows[5].blend, rows[4].blend);
        assert_eq!(rows[5].crossfade, rows[4].crossfade);
    }

    #[test]
    fn test_engine_column_matches_conditioner() {
        let (input, threshold) = (0.8, 0.4);
        let (from, to) = (ClipCurve::ExponentialClip, ClipCurve::LinearClip);
        let rows = trace(from, to, 0.1, input, threshold, 12);

        let settings = EngineSettings {
            dc_cutoff_hz: TRACE_DC_CUTOFF_HZ,
            transition_speed: 0.1,
            ..EngineSettings::default()
        };
        let mut conditioner = SignalConditioner::with_settings(TRACE_SAMPLE_RATE, settings);
        conditioner.set_threshold(threshold);

        assert_eq!(rows[0].engine, conditioner.process_sample(input, from));
        for row in &rows[1..] {
            assert_eq!(row.engine, conditioner.process_sample(input, to));
        }
        assert_eq!(conditioner.transition().current(), to);
    }

    #[test]
    fn test_engine_column_is_silent_for_silent_input() {
        let rows = trace(ClipCurve::SoftClip, ClipCurve::HardClip, 0.5, 0.0, 0.5, 4);
        assert!(rows.iter().all(|row| row.engine == 0.0));
    }
}
