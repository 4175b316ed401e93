//! Loading and writing the water configuration as RON.

use bevy::prelude::*;
use ron::{from_str, ser::PrettyConfig};
use shared::water::WaterConfig;
use shared::{CONFIG_READ_ERROR, CONFIG_WRITE_ERROR};
use std::{
    error::Error,
    fs::{self, File},
    io::Write,
    path::Path,
};

fn pretty_config() -> PrettyConfig {
    PrettyConfig::new()
        .with_depth_limit(3)
        .with_separate_tuple_members(true)
        .with_enumerate_arrays(true)
}

pub fn read_water_config(path: &Path) -> Result<WaterConfig, Box<dyn Error>> {
    let content = fs::read_to_string(path)?;
    let config = from_str::<WaterConfig>(&content)?;
    Ok(config)
}

pub fn write_water_config(config: &WaterConfig, path: &Path) -> Result<(), Box<dyn Error>> {
    let serialized = ron::ser::to_string_pretty(config, pretty_config())?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(serialized.as_bytes())?;
    Ok(())
}

/// Reads the config at `path`, falling back to defaults on any failure.
pub fn load_water_config(path: Option<&Path>) -> WaterConfig {
    let Some(path) = path else {
        return WaterConfig::default();
    };

    if !path.exists() {
        info!("No water config at {:?}, using defaults", path);
        return WaterConfig::default();
    }

    match read_water_config(path) {
        Ok(config) => {
            info!("Loaded water config from {:?}", path);
            config.sanitized()
        }
        Err(e) => {
            error!("{} {:?}: {}", CONFIG_READ_ERROR, path, e);
            warn!("Falling back to the default water config");
            WaterConfig::default()
        }
    }
}

pub fn save_water_config(config: &WaterConfig, path: &Path) {
    match write_water_config(config, path) {
        Ok(_) => info!("Water config written to {:?}", path),
        Err(e) => error!("{} {:?}: {}", CONFIG_WRITE_ERROR, path, e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::water::ClockMode;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir()
            .join(format!("water-config-test-{}", std::process::id()))
            .join(name)
    }

    #[test]
    fn test_round_trip() {
        let path = temp_path("round_trip.ron");
        let mut config = WaterConfig::default();
        config.clock.mode = ClockMode::Measured;
        config.splash.min_count = 3;
        config.octaves[1].amplitude = 1.5;

        write_water_config(&config, &path).unwrap();
        let loaded = read_water_config(&path).unwrap();
        assert_eq!(loaded, config, "config should survive a RON round trip");
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let path = temp_path("partial.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "(splash: (min_count: 7))").unwrap();

        let loaded = read_water_config(&path).unwrap();
        assert_eq!(loaded.splash.min_count, 7);
        assert_eq!(loaded.splash.count_spread, 10);
        assert_eq!(loaded.ripple_wave, WaterConfig::default().ripple_wave);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let path = temp_path("does_not_exist.ron");
        assert_eq!(load_water_config(Some(&path)), WaterConfig::default());
        assert_eq!(load_water_config(None), WaterConfig::default());
    }

    #[test]
    fn test_loaded_values_are_clamped() {
        let path = temp_path("out_of_range.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(
            &path,
            "(ripple_decay: (decay: 2.0), surface: (segments: 4000000000))",
        )
        .unwrap();

        let loaded = load_water_config(Some(&path));
        assert!(loaded.ripple_decay.decay < 1.0);
        assert_eq!(loaded.surface.segments, shared::MAX_SURFACE_SEGMENTS);
        fs::remove_file(&path).ok();
    }

    #[test]
    fn test_invalid_file_gives_defaults() {
        let path = temp_path("invalid.ron");
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, "this is not ron").unwrap();

        assert!(read_water_config(&path).is_err());
        assert_eq!(load_water_config(Some(&path)), WaterConfig::default());
        fs::remove_file(&path).ok();
    }
}
