pub mod range_types;

use crate::errors::{PostcardError, PostcardResult};
use crate::resources::PostcardConfig;
use bevy::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use validator::Validate;

pub fn get_config_path() -> Option<PathBuf> {
    dirs::config_dir().and_then(|mut path| {
        path.push("holiday-postcard");
        fs::create_dir_all(&path).ok()?;
        path.push("config.toml");
        Some(path)
    })
}

/// Read, parse and validate a config file
pub fn load_config_from(path: &Path) -> PostcardResult<PostcardConfig> {
    let contents = fs::read_to_string(path)?;
    let config = toml::from_str::<PostcardConfig>(&contents)?;
    validate_config(&config)?;
    Ok(config)
}

/// Where the running configuration came from, reported once logging is up
#[derive(Resource, Debug, Clone, PartialEq)]
pub enum ConfigOrigin {
    File(PathBuf),
    /// Nothing to load; `path` is where settings will be saved, if a location is known
    Defaults { path: Option<PathBuf> },
    Fallback { path: PathBuf, reason: String },
}

impl ConfigOrigin {
    /// File that "Save Settings" writes to: the one that was asked for, even if it
    /// did not exist or failed to load
    pub fn save_path(&self) -> Option<&Path> {
        match self {
            ConfigOrigin::File(path) | ConfigOrigin::Fallback { path, .. } => Some(path),
            ConfigOrigin::Defaults { path } => path.as_deref(),
        }
    }
}

/// Load the config from `path`, or from the user config directory when no path is given.
/// Any failure falls back to defaults; the returned origin says why.
pub fn resolve_config(path: Option<&Path>) -> (PostcardConfig, ConfigOrigin) {
    let path = match path.map(Path::to_path_buf).or_else(get_config_path) {
        Some(path) => path,
        None => return (PostcardConfig::default(), ConfigOrigin::Defaults { path: None }),
    };

    if !path.exists() {
        return (PostcardConfig::default(), ConfigOrigin::Defaults { path: Some(path) });
    }

    match load_config_from(&path) {
        Ok(config) => (config, ConfigOrigin::File(path)),
        Err(err) => (
            PostcardConfig::default(),
            ConfigOrigin::Fallback {
                path,
                reason: err.to_string(),
            },
        ),
    }
}

pub fn log_config_origin(origin: Option<Res<ConfigOrigin>>) {
    match origin.as_deref() {
        Some(ConfigOrigin::File(path)) => info!("Loaded config from {}", path.display()),
        Some(ConfigOrigin::Fallback { path, reason }) => {
            warn!("Ignoring config at {}: {reason}", path.display());
            warn!("Using default settings");
        }
        Some(ConfigOrigin::Defaults { path: Some(path) }) => {
            info!("No config file at {}, using default settings", path.display());
        }
        Some(ConfigOrigin::Defaults { path: None }) | None => {
            info!("No config file found, using default settings");
        }
    }
}

pub fn save_config(config: &PostcardConfig, path: Option<&Path>) -> PostcardResult<()> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => get_config_path().ok_or(PostcardError::ConfigDirNotFound)?,
    };
    let contents = toml::to_string_pretty(config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Field ranges via `validator`, plus the cross-field rules it cannot express
pub fn validate_config(config: &PostcardConfig) -> PostcardResult<()> {
    config.validate().map_err(|validation_errors| {
        PostcardError::InvalidConfig {
            reason: validation_errors.to_string(),
        }
    })?;

    let scatter = &config.scatter;
    let scatter_numbers = [
        ("scatter.rejection_threshold", scatter.rejection_threshold),
        ("scatter.min_radius_factor", scatter.min_radius_factor),
        ("scatter.max_radius_factor", scatter.max_radius_factor),
        ("scatter.base_scale", scatter.base_scale),
        ("scatter.min_scale_bonus", scatter.min_scale_bonus),
    ];
    if let Some((name, _)) = scatter_numbers.iter().find(|(_, value)| !value.is_finite()) {
        return Err(PostcardError::InvalidConfig {
            reason: format!("{name} must be a finite number"),
        });
    }

    if scatter.min_radius_factor > scatter.max_radius_factor {
        return Err(PostcardError::InvalidConfig {
            reason: "scatter.min_radius_factor must not exceed scatter.max_radius_factor".to_string(),
        });
    }

    if config.camera.min_distance > config.camera.max_distance {
        return Err(PostcardError::InvalidConfig {
            reason: "camera.min_distance must not exceed camera.max_distance".to_string(),
        });
    }

    if config.fog.start > config.fog.end {
        return Err(PostcardError::InvalidConfig {
            reason: "fog.start must not exceed fog.end".to_string(),
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::range_types::OrbitDistance;

    fn temp_config_path(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("holiday-postcard-test-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        dir.join(name)
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let path = temp_config_path("round_trip.toml");
        let mut config = PostcardConfig::default();
        config.seed = Some(2024);
        config.greeting[0].text = "Hello".to_string();

        save_config(&config, Some(&path)).expect("Saving config should succeed");
        let loaded = load_config_from(&path).expect("Saved config should load");
        assert_eq!(resolve_config(Some(&path)).1, ConfigOrigin::File(path.clone()));

        assert_eq!(loaded.seed, Some(2024));
        assert_eq!(loaded.greeting, config.greeting);
        assert_eq!(loaded.scatter.resolution, config.scatter.resolution);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let path = temp_config_path("does_not_exist.toml");
        let (config, origin) = resolve_config(Some(&path));
        assert_eq!(origin, ConfigOrigin::Defaults { path: Some(path.clone()) });
        assert_eq!(config.seed, None);
        assert_eq!(config.greeting.len(), 4);
    }

    #[test]
    fn test_malformed_file_falls_back_to_defaults() {
        let path = temp_config_path("malformed.toml");
        fs::write(&path, "seed = [not toml").unwrap();

        assert!(matches!(
            load_config_from(&path),
            Err(PostcardError::DeserializationFailed(_))
        ));
        let (config, origin) = resolve_config(Some(&path));
        assert_eq!(config.seed, None);
        assert!(matches!(origin, ConfigOrigin::Fallback { .. }));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_inverted_camera_limits_rejected() {
        let mut config = PostcardConfig::default();
        config.camera.min_distance = OrbitDistance::new(300.0);
        config.camera.max_distance = OrbitDistance::new(10.0);

        assert!(matches!(
            validate_config(&config),
            Err(PostcardError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn test_out_of_range_field_rejected() {
        let mut config = PostcardConfig::default();
        config.terrain.ground_segments = 0;

        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_settings_saved_to_requested_missing_file() {
        let path = temp_config_path("not_yet_created.toml");
        let _ = fs::remove_file(&path);

        let (mut config, origin) = resolve_config(Some(&path));
        assert_eq!(origin.save_path(), Some(path.as_path()));

        config.greeting[1].text = "Saved".to_string();
        save_config(&config, origin.save_path()).expect("Saving config should succeed");

        let loaded = load_config_from(&path).expect("Config should land at the requested path");
        assert_eq!(loaded.greeting[1].text, "Saved");
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_malformed_file_is_still_the_save_target() {
        let path = temp_config_path("broken_target.toml");
        fs::write(&path, "seed = [not toml").unwrap();

        let (_, origin) = resolve_config(Some(&path));
        assert_eq!(origin.save_path(), Some(path.as_path()));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_out_of_range_file_values_are_clamped_on_load() {
        let path = temp_config_path("out_of_range.toml");
        fs::write(
            &path,
            "[scatter]\nresolution = 70000\n\n[camera]\nmin_distance = nan\n",
        )
        .unwrap();

        let config = load_config_from(&path).expect("Clamped values should pass validation");
        assert_eq!(config.scatter.resolution.get(), 200);
        assert_eq!(config.camera.min_distance.get(), 0.1);
        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_non_finite_scatter_numbers_rejected() {
        let mut config = PostcardConfig::default();
        config.scatter.base_scale = f32::NAN;
        assert!(validate_config(&config).is_err());

        let mut config = PostcardConfig::default();
        config.scatter.max_radius_factor = f32::INFINITY;
        assert!(validate_config(&config).is_err());
    }
}
