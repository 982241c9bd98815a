pub mod constants;

use crate::errors::{PostcardError, PostcardResult};
use bevy::prelude::*;
use bevy::render::mesh::VertexAttributeValues;
use constants::*;
use noise::{NoiseFn, Simplex};

/// Ground elevation sampled from a 2D noise field.
///
/// The same noise source also drives hut distribution, so it is exposed through
/// [`HeightField::noise`] rather than duplicated.
#[derive(Debug, Clone)]
pub struct HeightField<N> {
    noise: N,
    frequency: f64,
}

impl<N: NoiseFn<f64, 2>> HeightField<N> {
    pub fn new(noise: N, frequency: f32) -> Self {
        Self {
            noise,
            frequency: frequency as f64,
        }
    }

    pub fn noise(&self) -> &N {
        &self.noise
    }

    /// Unscaled noise value at the ground coordinate
    pub fn raw(&self, x: f32, z: f32) -> f32 {
        self.noise
            .get([x as f64 * self.frequency, z as f64 * self.frequency]) as f32
    }

    /// Elevation at (x, z)
    pub fn height(&self, x: f32, z: f32) -> f32 {
        scale_height(self.raw(x, z))
    }
}

impl HeightField<Simplex> {
    /// Simplex-backed height field; only the low 32 bits of the seed reach the noise
    pub fn seeded(seed: u64, frequency: f32) -> Self {
        Self::new(Simplex::new(seed as u32), frequency)
    }
}

/// Positive noise becomes hills three times as tall; negative noise is kept as is
pub fn scale_height(scalar: f32) -> f32 {
    scalar
        * if scalar > 0.0 {
            POSITIVE_HEIGHT_SCALE
        } else {
            NEGATIVE_HEIGHT_SCALE
        }
}

/// Height field shared by the ground and the hut scatter
#[derive(Resource, Debug, Clone)]
pub struct GroundHeights(pub HeightField<Simplex>);

/// Rewrite the Y component of every position with the height at its (x, z)
pub fn deform_positions<N: NoiseFn<f64, 2>>(positions: &mut [[f32; 3]], heights: &HeightField<N>) {
    for position in positions.iter_mut() {
        position[1] = heights.height(position[0], position[2]);
    }
}

/// Deform a flat mesh in place and recompute its normals
pub fn deform_mesh<N: NoiseFn<f64, 2>>(
    mesh: &mut Mesh,
    heights: &HeightField<N>,
) -> PostcardResult<()> {
    match mesh.attribute_mut(Mesh::ATTRIBUTE_POSITION) {
        Some(VertexAttributeValues::Float32x3(positions)) => deform_positions(positions, heights),
        _ => return Err(PostcardError::MissingVertexPositions),
    }

    mesh.compute_normals();
    Ok(())
}

/// Build the subdivided ground plane (XZ, centred on the origin) and bump it with the height field
pub fn build_ground_mesh<N: NoiseFn<f64, 2>>(
    size: f32,
    segments: u32,
    heights: &HeightField<N>,
) -> PostcardResult<Mesh> {
    // `segments` quads per side means `segments - 1` interior cut lines
    let mut mesh = Plane3d::default()
        .mesh()
        .size(size, size)
        .subdivisions(segments.saturating_sub(1))
        .build();

    deform_mesh(&mut mesh, heights)?;

    // Tangents are required by the ground's normal map
    mesh.generate_tangents()
        .map_err(|e| PostcardError::TangentGeneration {
            reason: e.to_string(),
        })?;

    Ok(mesh)
}

/// Vertical placement of the ground so the model stands on it
pub fn ground_offset<N: NoiseFn<f64, 2>>(heights: &HeightField<N>, model_height: f32) -> f32 {
    heights.height(0.0, 0.0) - model_height * 0.5
}
