//! Hut placement over a jittered grid, filtered by a noise-driven distribution and a ring
//! around the origin.
use crate::config::range_types::{CellSpacing, GridResolution, NoiseFrequency};
use crate::terrain::HeightField;
use crate::terrain::constants::*;
use bevy::prelude::*;
use noise::NoiseFn;
use rand::Rng;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(default)]
pub struct ScatterSettings {
    pub resolution: GridResolution,
    pub spacing: CellSpacing,
    pub distribution_frequency: NoiseFrequency,
    /// Candidates whose distribution value falls below this are dropped
    pub rejection_threshold: f32,
    /// Inner edge of the placement ring, as a fraction of `resolution * spacing`
    pub min_radius_factor: f32,
    /// Outer edge of the placement ring, as a fraction of `resolution * spacing`
    pub max_radius_factor: f32,
    pub base_scale: f32,
    pub min_scale_bonus: f32,
}

impl Default for ScatterSettings {
    fn default() -> Self {
        Self {
            resolution: GridResolution::new(DEFAULT_SCATTER_RESOLUTION),
            spacing: CellSpacing::new(DEFAULT_SCATTER_SPACING),
            distribution_frequency: NoiseFrequency::new(DEFAULT_DISTRIBUTION_FREQUENCY),
            rejection_threshold: DEFAULT_REJECTION_THRESHOLD,
            min_radius_factor: DEFAULT_MIN_RADIUS_FACTOR,
            max_radius_factor: DEFAULT_MAX_RADIUS_FACTOR,
            base_scale: DEFAULT_BASE_SCALE,
            min_scale_bonus: DEFAULT_MIN_SCALE_BONUS,
        }
    }
}

impl ScatterSettings {
    fn extent(&self) -> f32 {
        self.resolution.get() as f32 * self.spacing.get()
    }

    pub fn min_radius(&self) -> f32 {
        self.extent() * self.min_radius_factor
    }

    pub fn max_radius(&self) -> f32 {
        self.extent() * self.max_radius_factor
    }
}

/// An accepted hut position
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub position: Vec3,
    pub distribution: f32,
    pub scale: f32,
}

/// Decide whether a candidate is kept and, if so, at which uniform scale.
///
/// Thresholds are strict: a candidate exactly on the inner or outer radius is kept.
pub fn evaluate_candidate(position: Vec3, distribution: f32, settings: &ScatterSettings) -> Option<f32> {
    if distribution < settings.rejection_threshold {
        return None;
    }

    let distance = position.length();
    if distance < settings.min_radius() || distance > settings.max_radius() {
        return None;
    }

    Some(settings.base_scale + distribution.max(settings.min_scale_bonus))
}

/// Ground position of cell (i, j) after random shrink towards the grid corner and centering
pub fn candidate_xz<R: Rng>(i: u32, j: u32, settings: &ScatterSettings, rng: &mut R) -> (f32, f32) {
    let spacing = settings.spacing.get();
    let half_extent = settings.resolution.get() as f32 * 0.5 * spacing;

    let x = i as f32 * rng.gen_range(0.0..1.0) * spacing - half_extent;
    let z = j as f32 * rng.gen_range(0.0..1.0) * spacing - half_extent;
    (x, z)
}

/// Walk the whole grid and return every accepted hut placement
pub fn scatter_huts<N, R>(heights: &HeightField<N>, settings: &ScatterSettings, rng: &mut R) -> Vec<Placement>
where
    N: NoiseFn<f64, 2>,
    R: Rng,
{
    let resolution = settings.resolution.get();
    let frequency = settings.distribution_frequency.get() as f64;
    let mut placements = Vec::new();

    for i in 0..resolution {
        for j in 0..resolution {
            let (x, z) = candidate_xz(i, j, settings, rng);
            let position = Vec3::new(x, heights.height(x, z), z);
            let distribution = heights.noise().get([x as f64 * frequency, z as f64 * frequency]) as f32;

            if let Some(scale) = evaluate_candidate(position, distribution, settings) {
                placements.push(Placement {
                    position,
                    distribution,
                    scale,
                });
            }
        }
    }

    placements
}
