//! Display the engine constants derived from a configuration and sample rate.

use clap::Args;
use klip_core::{BUTTERWORTH_Q, DcBlocker, allpass_coefficients};
use klip_dsp::{slider_to_db, slider_to_threshold, window_capacity};

use super::common::load_config_or_default;

/// Display derived engine constants.
#[derive(Args)]
pub struct InfoArgs {
    /// Sample rate in Hz (default: the config's sample_rate)
    #[arg(short, long)]
    sample_rate: Option<u32>,

    /// Preset name or config file path
    #[arg(short, long)]
    preset: Option<String>,
}

/// Run the info command.
pub fn run(args: InfoArgs) -> anyhow::Result<()> {
    let config = load_config_or_default(args.preset.as_deref())?;
    config.validate()?;
    let settings = config.to_settings()?;
    let controls = config.control_values()?;

    let sample_rate = args.sample_rate.unwrap_or(config.engine.sample_rate);
    if sample_rate == 0 {
        anyhow::bail!("sample rate must be positive");
    }
    let fs = sample_rate as f32;

    let dc = DcBlocker::with_cutoff(fs, settings.dc_cutoff_hz);
    let transition_samples = (1.0 / settings.transition_speed).ceil();
    let window = window_capacity(fs, settings.energy_window_seconds);
    let (b0, b1, b2, a0, a1, a2) = allpass_coefficients(
        settings.phase_allpass_hz,
        BUTTERWORTH_Q,
        settings.phase_allpass_sample_rate,
    );

    println!("Config:           {}", config.name);
    println!("Sample rate:      {sample_rate} Hz");
    println!();
    println!("DC blocker:       {} Hz, alpha = {:.6}", dc.cutoff_hz(), dc.alpha());
    println!(
        "Transition:       {} samples ({:.3} ms)",
        transition_samples,
        1000.0 * transition_samples / fs
    );
    println!(
        "Energy window:    {window} samples, low-pass {} Hz, dynamic gain {}",
        settings.low_frequency_cutoff_hz,
        if settings.apply_dynamic_gain { "on" } else { "off" }
    );
    println!(
        "All-pass:         {} Hz at nominal {} Hz",
        settings.phase_allpass_hz, settings.phase_allpass_sample_rate
    );
    println!(
        "                  b = [{:.6}, {:.6}, {:.6}], a = [1, {:.6}, {:.6}]",
        b0 / a0,
        b1 / a0,
        b2 / a0,
        a1 / a0,
        a2 / a0
    );
    println!(
        "Stereo:           {} coupling, {} recombination",
        settings.state_coupling.name(),
        settings.recombination.name()
    );
    println!();
    println!(
        "Threshold:        slider {} -> {:.2} dB -> {:.5} linear",
        controls.threshold,
        slider_to_db(controls.threshold),
        slider_to_threshold(controls.threshold)
    );
    println!("Curve:            {}", controls.curve);
    println!(
        "Mode:             {}",
        controls.mode.map_or("passthrough", |m| m.name())
    );

    Ok(())
}
