use derive_more::Display;
use serde::{Deserialize, Serialize};

/// Cells per side of the scatter grid, constrained to [1, 200]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "u32")]
pub struct GridResolution(u32);

impl GridResolution {
    const MIN: u32 = 1;
    const MAX: u32 = 200;

    pub fn new(value: u32) -> Self {
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for GridResolution {
    fn default() -> Self {
        Self::new(25)
    }
}

// Deserialized values go through the same clamp as `new`
impl From<u32> for GridResolution {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

/// World units between scatter grid cells, constrained to [0.5, 100.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct CellSpacing(f32);

impl CellSpacing {
    const MIN: f32 = 0.5;
    const MAX: f32 = 100.0;

    pub fn new(value: f32) -> Self {
        // NaN would slip through `clamp`
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for CellSpacing {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl From<f32> for CellSpacing {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Multiplier applied to world coordinates before sampling noise, constrained to [0.0, 1.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct NoiseFrequency(f32);

impl NoiseFrequency {
    const MIN: f32 = 0.0;
    const MAX: f32 = 1.0;

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for NoiseFrequency {
    fn default() -> Self {
        Self::new(0.03)
    }
}

impl From<f32> for NoiseFrequency {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Camera distance from its focus, constrained to [0.1, 1000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct OrbitDistance(f32);

impl OrbitDistance {
    const MIN: f32 = 0.1;
    const MAX: f32 = 1000.0;

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for OrbitDistance {
    fn default() -> Self {
        Self::new(15.0)
    }
}

impl From<f32> for OrbitDistance {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Fog start/end distance, constrained to [0.0, 2000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct FogDistance(f32);

impl FogDistance {
    const MIN: f32 = 0.0;
    const MAX: f32 = 2000.0;

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for FogDistance {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl From<f32> for FogDistance {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}

/// Light intensity in lumens (spot) or cd/m² (ambient), constrained to [0.0, 100_000_000.0]
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Display, Serialize, Deserialize)]
#[serde(from = "f32")]
pub struct LightIntensity(f32);

impl LightIntensity {
    const MIN: f32 = 0.0;
    const MAX: f32 = 100_000_000.0;

    pub fn new(value: f32) -> Self {
        if value.is_nan() {
            return Self(Self::MIN);
        }
        Self(value.clamp(Self::MIN, Self::MAX))
    }

    pub fn get(self) -> f32 {
        self.0
    }
}

impl Default for LightIntensity {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl From<f32> for LightIntensity {
    fn from(value: f32) -> Self {
        Self::new(value)
    }
}
