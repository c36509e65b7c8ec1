//! Shared CLI helpers used across multiple commands.

use klip_config::{ConfigError, KlipConfig, find_preset, get_factory_preset};
use klip_dsp::{ClipCurve, MidSideMode};
use std::path::PathBuf;

/// Parse a clip curve name for clap's `value_parser`.
pub fn parse_curve(s: &str) -> Result<ClipCurve, String> {
    s.parse::<ClipCurve>().map_err(|e| e.to_string())
}

/// Parse a stereo mode name for clap's `value_parser`.
pub fn parse_mode(s: &str) -> Result<MidSideMode, String> {
    s.parse::<MidSideMode>().map_err(|e| e.to_string())
}

/// Load a configuration by preset name or path.
///
/// Searches in this order:
/// 1. Factory presets (by name)
/// 2. User presets (by name)
/// 3. File path
pub fn load_config(name: &str) -> anyhow::Result<KlipConfig> {
    if let Some(config) = get_factory_preset(name) {
        tracing::debug!(name, "using factory preset");
        return Ok(config);
    }

    if let Some(path) = find_preset(name) {
        tracing::debug!(path = %path.display(), "loading config file");
        return Ok(KlipConfig::load(&path)?);
    }

    let path = PathBuf::from(name);
    if path.exists() {
        return Ok(KlipConfig::load(&path)?);
    }

    Err(anyhow::Error::new(ConfigError::PresetNotFound(name.to_string()))
        .context(format!("cannot load '{name}'; see 'klip presets list'")))
}

/// Load `name` if given, otherwise the defaults.
pub fn load_config_or_default(name: Option<&str>) -> anyhow::Result<KlipConfig> {
    match name {
        Some(name) => load_config(name),
        None => Ok(KlipConfig::default()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_curve() {
        assert_eq!(parse_curve("hard"), Ok(ClipCurve::HardClip));
        assert!(parse_curve("fuzz").unwrap_err().contains("expected one of"));
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("side"), Ok(MidSideMode::Side));
        assert!(parse_mode("left").is_err());
    }

    #[test]
    fn test_load_factory_preset() {
        let config = load_config("gentle").unwrap();
        assert_eq!(config.name, "Gentle");
        assert!(load_config("definitely_not_a_preset_9876").is_err());
    }
}
