use crate::components::Hut;
use crate::resources::{PostcardConfig, SceneSeed};
use crate::scatter::{Placement, scatter_huts};
use crate::terrain::GroundHeights;
use crate::terrain::constants::*;
use bevy::pbr::NotShadowCaster;
use bevy::prelude::*;
use rand::SeedableRng;
use rand_pcg::Pcg64;

pub struct EnvironmentPlugin;

impl Plugin for EnvironmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_huts);
    }
}

/// Meshes and materials shared by every hut
struct HutAssets {
    base_mesh: Handle<Mesh>,
    base_material: Handle<StandardMaterial>,
    roof_mesh: Handle<Mesh>,
    roof_material: Handle<StandardMaterial>,
}

impl HutAssets {
    fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        Self {
            base_mesh: meshes.add(
                Cylinder::new(HUT_BASE_RADIUS, HUT_BASE_HEIGHT)
                    .mesh()
                    .resolution(HUT_BASE_SEGMENTS)
                    .build(),
            ),
            base_material: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0x81, 0x4d, 0x1a),
                ..default()
            }),
            roof_mesh: meshes.add(
                Cone {
                    radius: HUT_ROOF_RADIUS,
                    height: HUT_ROOF_HEIGHT,
                }
                .mesh()
                .resolution(HUT_ROOF_SEGMENTS)
                .build(),
            ),
            roof_material: materials.add(StandardMaterial {
                base_color: Color::srgb_u8(0x5e, 0x39, 0x13),
                ..default()
            }),
        }
    }
}

/// Hut layout RNG; offset from the scene seed so it does not mirror the noise permutation
pub fn hut_rng(seed: u64) -> Pcg64 {
    Pcg64::seed_from_u64(seed.wrapping_add(42))
}

fn spawn_huts(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    config: Res<PostcardConfig>,
    heights: Res<GroundHeights>,
    seed: Res<SceneSeed>,
) {
    let placements = scatter_huts(&heights.0, &config.scatter, &mut hut_rng(seed.0));
    let resolution = config.scatter.resolution.get();
    info!(
        "Placing {} huts from {} candidates",
        placements.len(),
        resolution * resolution
    );

    let assets = HutAssets::new(&mut meshes, &mut materials);
    for placement in &placements {
        spawn_single_hut(&mut commands, &assets, placement);
    }
}

fn spawn_single_hut(commands: &mut Commands, assets: &HutAssets, placement: &Placement) {
    commands
        .spawn((
            Transform::from_translation(placement.position).with_scale(Vec3::splat(placement.scale)),
            Visibility::default(),
            Hut,
            Name::new("Hut"),
        ))
        .with_children(|parent| {
            parent.spawn((
                Mesh3d(assets.base_mesh.clone()),
                MeshMaterial3d(assets.base_material.clone()),
                Transform::default(),
                NotShadowCaster,
            ));
            parent.spawn((
                Mesh3d(assets.roof_mesh.clone()),
                MeshMaterial3d(assets.roof_material.clone()),
                Transform::from_xyz(0.0, HUT_ROOF_OFFSET, 0.0),
                NotShadowCaster,
            ));
        });
}
