//! Factory presets bundled with klip.
//!
//! Embedded at compile time as TOML so they go through the same parser and
//! validation as user files.

use crate::KlipConfig;

/// Names of the factory presets, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["init", "gentle", "brickwall", "wide", "mono_fold"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("init", INIT_PRESET),
    ("gentle", GENTLE_PRESET),
    ("brickwall", BRICKWALL_PRESET),
    ("wide", WIDE_PRESET),
    ("mono_fold", MONO_FOLD_PRESET),
];

const INIT_PRESET: &str = r#"
name = "Init"
description = "Unity threshold soft clip in mid+side"

[controls]
threshold = 1.0
curve = "soft"
mode = "mid_side"
"#;

const GENTLE_PRESET: &str = r#"
name = "Gentle"
description = "Exponential knee 3 dB below full scale"

[controls]
threshold = 0.875
curve = "exponential"
mode = "mid_side"
"#;

const BRICKWALL_PRESET: &str = r#"
name = "Brickwall"
description = "Hard clip at -6 dB with bass-dependent gain riding"

[engine]
apply_dynamic_gain = true

[controls]
threshold = 0.75
curve = "hard"
mode = "mid_side"
"#;

const WIDE_PRESET: &str = r#"
name = "Wide"
description = "Linear clip on mid and side, phase-aligned recombination"

[engine]
recombination = "phase_aligned"

[controls]
threshold = 0.5
curve = "linear"
mode = "mid_side"
"#;

const MONO_FOLD_PRESET: &str = r#"
name = "Mono Fold"
description = "Asymmetric clip on the mono sum"

[controls]
threshold = 0.6
curve = "asymmetric"
mode = "mid"
"#;

/// All factory presets, in display order.
///
/// Presets that fail to parse are skipped (they are covered by tests).
pub fn factory_presets() -> Vec<KlipConfig> {
    FACTORY_PRESETS_TOML
        .iter()
        .filter_map(|(_, toml)| KlipConfig::from_toml(toml).ok())
        .collect()
}

/// Look up a factory preset by name (case-insensitive).
pub fn get_factory_preset(name: &str) -> Option<KlipConfig> {
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .and_then(|(_, toml)| KlipConfig::from_toml(toml).ok())
}

/// Whether `name` is a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use klip_dsp::{ClipCurve, MidSideMode, Recombination};

    #[test]
    fn test_all_factory_presets_parse_and_validate() {
        for (name, toml) in FACTORY_PRESETS_TOML {
            let preset = KlipConfig::from_toml(toml)
                .unwrap_or_else(|e| panic!("factory preset '{name}' failed to parse: {e}"));
            preset
                .validate()
                .unwrap_or_else(|e| panic!("factory preset '{name}' invalid: {e}"));
        }
        assert_eq!(factory_presets().len(), FACTORY_PRESET_NAMES.len());
    }

    #[test]
    fn test_names_match_table() {
        let table: Vec<_> = FACTORY_PRESETS_TOML.iter().map(|(n, _)| *n).collect();
        assert_eq!(table, FACTORY_PRESET_NAMES);
    }

    #[test]
    fn test_lookup() {
        let wide = get_factory_preset("WIDE").unwrap();
        assert_eq!(wide.to_settings().unwrap().recombination, Recombination::PhaseAligned);
        let values = wide.control_values().unwrap();
        assert_eq!(values.curve, ClipCurve::LinearClip);
        assert_eq!(values.mode, Some(MidSideMode::MidSide));

        assert!(is_factory_preset("brickwall"));
        assert!(!is_factory_preset("nope"));
        assert!(get_factory_preset("nope").is_none());
    }

    #[test]
    fn test_phase_aligned_presets_recombine_both_branches() {
        // Phase alignment only changes the mid+side path.
        for preset in factory_presets() {
            if preset.to_settings().unwrap().recombination == Recombination::PhaseAligned {
                let values = preset.control_values().unwrap();
                assert_eq!(values.mode, Some(MidSideMode::MidSide), "{}", preset.name);
            }
        }
    }
}
