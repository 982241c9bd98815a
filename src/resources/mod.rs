use crate::config::range_types::*;
use crate::scatter::ScatterSettings;
use crate::terrain::constants::*;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Resource, Serialize, Deserialize, Validate, Clone, Debug)]
#[serde(default)]
// NOTE: When adding new fields, keep `Default` in sync so partial config files still load
pub struct PostcardConfig {
    /// Seed for terrain noise and hut jitter; a random one is drawn when absent
    pub seed: Option<u64>,
    /// Log filter handed to Bevy's LogPlugin
    pub log_filter: String,

    #[validate(nested)]
    pub window: WindowSettings,
    #[validate(nested)]
    pub terrain: TerrainSettings,
    pub scatter: ScatterSettings,
    #[validate(nested)]
    pub lighting: LightingSettings,
    pub fog: FogSettings,
    #[validate(nested)]
    pub camera: CameraSettings,
    pub assets: AssetSettings,
    pub greeting: Vec<GreetingLine>,
}

impl Default for PostcardConfig {
    fn default() -> Self {
        Self {
            seed: None,
            log_filter: "info,wgpu=error,naga=warn".to_string(),
            window: WindowSettings::default(),
            terrain: TerrainSettings::default(),
            scatter: ScatterSettings::default(),
            lighting: LightingSettings::default(),
            fog: FogSettings::default(),
            camera: CameraSettings::default(),
            assets: AssetSettings::default(),
            greeting: default_greeting(),
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    #[validate(range(min = 64.0, max = 8192.0))]
    pub width: f32,
    #[validate(range(min = 64.0, max = 8192.0))]
    pub height: f32,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "መልካም የገና በአል - 3D Postcard".to_string(),
            width: 1280.0,
            height: 720.0,
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug)]
#[serde(default)]
pub struct TerrainSettings {
    /// Multiplier on (x, z) before the ground height lookup. Zero keeps the ground level.
    pub ground_noise_frequency: NoiseFrequency,
    #[validate(range(min = 1.0, max = 10000.0))]
    pub ground_size: f32,
    #[validate(range(min = 1, max = 1024))]
    pub ground_segments: u32,
    #[validate(range(min = 0.0, max = 100.0))]
    pub model_height: f32,
    pub base_color: [u8; 3],
    /// Directory (relative to the asset root) holding the Ground037 texture set
    pub texture_dir: String,
}

impl Default for TerrainSettings {
    fn default() -> Self {
        Self {
            ground_noise_frequency: NoiseFrequency::new(DEFAULT_GROUND_NOISE_FREQUENCY),
            ground_size: DEFAULT_GROUND_SIZE,
            ground_segments: DEFAULT_GROUND_SEGMENTS,
            model_height: DEFAULT_MODEL_HEIGHT,
            base_color: [0xf2, 0xd2, 0xbd],
            texture_dir: "textures/ground".to_string(),
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug)]
#[serde(default)]
pub struct LightingSettings {
    pub ambient_brightness: LightIntensity,
    pub spot_intensity: LightIntensity,
    pub spot_position: [f32; 3],
    /// Outer cone angle in radians
    #[validate(range(min = 0.0, max = 1.5707964))]
    pub spot_angle: f32,
    #[validate(range(min = 128, max = 8192))]
    pub shadow_map_size: usize,
    #[validate(range(min = 0.01, max = 100.0))]
    pub shadow_near: f32,
}

impl Default for LightingSettings {
    fn default() -> Self {
        Self {
            ambient_brightness: LightIntensity::new(0.0),
            spot_intensity: LightIntensity::new(8_000_000.0),
            spot_position: [5.5, 15.0, 35.5],
            spot_angle: std::f32::consts::PI / 8.0,
            shadow_map_size: 1024,
            shadow_near: 1.0,
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct FogSettings {
    pub color: [u8; 3],
    pub start: FogDistance,
    pub end: FogDistance,
}

impl Default for FogSettings {
    fn default() -> Self {
        Self {
            color: [0xcc, 0xcc, 0xcc],
            start: FogDistance::new(1.0),
            end: FogDistance::new(100.0),
        }
    }
}

#[derive(Serialize, Deserialize, Validate, Clone, Debug)]
#[serde(default)]
pub struct CameraSettings {
    pub position: [f32; 3],
    pub target: [f32; 3],
    #[validate(range(min = 1.0, max = 170.0))]
    pub fov_degrees: f32,
    pub min_distance: OrbitDistance,
    pub max_distance: OrbitDistance,
    pub clear_color: [u8; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: [2.0, 5.0, 15.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 50.0,
            min_distance: OrbitDistance::new(2.0),
            max_distance: OrbitDistance::new(200.0),
            clear_color: [0x64, 0x46, 0x21],
        }
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct AssetSettings {
    pub model_path: String,
    pub model_position: [f32; 3],
    pub model_tilt: f32,
    /// Font file on disk; read directly because glyph outlines are needed, not a font atlas
    pub font_path: String,
    pub text_position: [f32; 3],
    pub text_scale: f32,
    pub screenshot_dir: String,
    pub screenshot_name: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            model_path: "models/nativity.glb".to_string(),
            model_position: [0.5, -4.2, 2.0],
            model_tilt: -0.01,
            font_path: "assets/fonts/Meaza-Regular.ttf".to_string(),
            text_position: [-4.0, -2.6, -12.0],
            text_scale: 2.5,
            screenshot_dir: "screenshots".to_string(),
            screenshot_name: "የገና_3D_Postcard.png".to_string(),
        }
    }
}

/// One line of the extruded greeting
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GreetingLine {
    pub key: String,
    pub text: String,
    pub color: [u8; 3],
    pub position: [f32; 3],
}

impl GreetingLine {
    pub fn new(key: &str, text: &str, color: u32, y: f32) -> Self {
        Self {
            key: key.to_string(),
            text: text.to_string(),
            color: [(color >> 16) as u8, (color >> 8) as u8, color as u8],
            position: [0.0, y, 0.0],
        }
    }

    pub fn color(&self) -> Color {
        srgb(self.color)
    }
}

pub fn default_greeting() -> Vec<GreetingLine> {
    vec![
        GreetingLine::new("melkam", "መልካም", 0x009739, 3.0),
        GreetingLine::new("yegena", "የገና", 0xffd500, 1.9),
        GreetingLine::new("beal", "በአል", 0xd52b1e, 0.8),
        GreetingLine::new("leferab", "ለፍሬአብ", 0x21449c, -0.3),
    ]
}

/// Seed shared by every procedural step of one run
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneSeed(pub u64);

/// Converts `[r, g, b]` into a Bevy colour
pub fn srgb(color: [u8; 3]) -> Color {
    let [r, g, b] = color;
    Color::srgb_u8(r, g, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_greeting_line_unpacks_hex_color() {
        let line = GreetingLine::new("yegena", "የገና", 0xffd500, 1.9);
        assert_eq!(line.color, [0xff, 0xd5, 0x00]);
        assert_eq!(line.position, [0.0, 1.9, 0.0]);
    }

    #[test]
    fn test_default_greeting_order() {
        let keys: Vec<_> = default_greeting().into_iter().map(|l| l.key).collect();
        assert_eq!(keys, ["melkam", "yegena", "beal", "leferab"]);
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = PostcardConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.terrain.ground_noise_frequency.get(), 0.0);
        assert_eq!(config.scatter.resolution.get(), 25);
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: PostcardConfig = toml::from_str(
            r#"
            seed = 7

            [scatter]
            resolution = 10
            "#,
        )
        .expect("Partial config should deserialize");

        assert_eq!(config.seed, Some(7));
        assert_eq!(config.scatter.resolution.get(), 10);
        assert_eq!(config.scatter.spacing.get(), 15.0);
        assert_eq!(config.greeting.len(), 4);
    }
}
