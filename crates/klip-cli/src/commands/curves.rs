//! Clip curve transfer tables.

#![allow(clippy::print_literal)] // Table headers use literal strings intentionally

use clap::Args;
use klip_dsp::ClipCurve;
use serde::Serialize;

use super::common::parse_curve;

#[derive(Args)]
pub struct CurvesArgs {
    /// Only show this curve (soft, hard, linear, exponential, asymmetric)
    #[arg(short, long, value_parser = parse_curve)]
    curve: Option<ClipCurve>,

    /// Linear clip threshold
    #[arg(short, long, default_value = "0.5")]
    threshold: f32,

    /// Smallest input value
    #[arg(long, default_value = "-2.0", allow_hyphen_values = true)]
    min: f32,

    /// Largest input value
    #[arg(long, default_value = "2.0", allow_hyphen_values = true)]
    max: f32,

    /// Number of rows
    #[arg(long, default_value = "17")]
    steps: usize,

    /// Emit JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct CurveTable {
    threshold: f32,
    inputs: Vec<f32>,
    curves: Vec<CurveColumn>,
}

#[derive(Serialize)]
struct CurveColumn {
    name: &'static str,
    outputs: Vec<f32>,
}

fn build_table(
    curves: &[ClipCurve],
    threshold: f32,
    min: f32,
    max: f32,
    steps: usize,
) -> CurveTable {
    let inputs: Vec<f32> = if steps == 1 {
        vec![min]
    } else {
        (0..steps)
            .map(|i| min + (max - min) * i as f32 / (steps - 1) as f32)
            .collect()
    };

    let curves = curves
        .iter()
        .map(|&curve| CurveColumn {
            name: curve.name(),
            outputs: inputs.iter().map(|&x| curve.apply(x, threshold)).collect(),
        })
        .collect();

    CurveTable {
        threshold,
        inputs,
        curves,
    }
}

pub fn run(args: CurvesArgs) -> anyhow::Result<()> {
    if args.threshold <= 0.0 || args.threshold.is_nan() {
        anyhow::bail!("threshold must be positive, got {}", args.threshold);
    }
    if args.steps == 0 {
        anyhow::bail!("steps must be at least 1");
    }
    if args.max < args.min {
        anyhow::bail!("max ({}) is below min ({})", args.max, args.min);
    }

    let curves: Vec<ClipCurve> = match args.curve {
        Some(curve) => vec![curve],
        None => ClipCurve::ALL.to_vec(),
    };
    let table = build_table(&curves, args.threshold, args.min, args.max, args.steps);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&table)?);
        return Ok(());
    }

    println!("Transfer curves at threshold {}", table.threshold);
    println!();
    print!("  {:>9}", "input");
    for column in &table.curves {
        print!("  {:>11}", column.name);
    }
    println!();
    print!("  {:>9}", "-----");
    for _ in &table.curves {
        print!("  {:>11}", "-----");
    }
    println!();

    for (row, x) in table.inputs.iter().enumerate() {
        print!("  {x:>9.4}");
        for column in &table.curves {
            print!("  {:>11.4}", column.outputs[row]);
        }
        println!();
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_shape() {
        let table = build_table(&ClipCurve::ALL, 0.5, -1.0, 1.0, 5);
        assert_eq!(table.inputs, [-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(table.curves.len(), 5);

        let hard = table.curves.iter().find(|c| c.name == "hard").unwrap();
        assert_eq!(hard.outputs, [-0.5, -0.5, 0.0, 0.5, 0.5]);
    }

    #[test]
    fn test_single_step() {
        let table = build_table(&[ClipCurve::LinearClip], 1.0, 0.25, 3.0, 1);
        assert_eq!(table.inputs, [0.25]);
        assert_eq!(table.curves[0].outputs, [0.25]);
    }
}
