use crate::components::*;
use crate::config::log_config_origin;
use crate::resources::{PostcardConfig, SceneSeed, srgb};
use crate::terrain::constants::{SKY_RADIUS, SKY_SEGMENTS};
use crate::terrain::{GroundHeights, HeightField, build_ground_mesh, ground_offset};
use bevy::image::ImageLoaderSettings;
use bevy::pbr::{NotShadowCaster, PointLightShadowMap};
use bevy::prelude::*;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PostcardConfig>()
            .add_systems(PreStartup, (log_config_origin, seed_scene).chain())
            .add_systems(Startup, (setup_ground, setup_lighting, setup_sky));
    }
}

/// Fix the seed for this run and build the shared height field from it
fn seed_scene(mut commands: Commands, config: Res<PostcardConfig>) {
    let seed = config.seed.unwrap_or_else(rand::random);
    info!("Scene seed: {seed}");

    commands.insert_resource(SceneSeed(seed));
    commands.insert_resource(GroundHeights(HeightField::seeded(
        seed,
        config.terrain.ground_noise_frequency.get(),
    )));
    commands.insert_resource(ClearColor(srgb(config.camera.clear_color)));
}

fn setup_ground(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    asset_server: Res<AssetServer>,
    config: Res<PostcardConfig>,
    heights: Res<GroundHeights>,
) {
    let terrain = &config.terrain;
    let offset = ground_offset(&heights.0, terrain.model_height);

    let mesh = match build_ground_mesh(terrain.ground_size, terrain.ground_segments, &heights.0) {
        Ok(mesh) => {
            info!(
                "Generated ground: {size}x{size} with {segments} segments per side, offset {offset:.2}",
                size = terrain.ground_size,
                segments = terrain.ground_segments,
            );
            mesh
        }
        Err(e) => {
            warn!("Failed to deform ground mesh: {e}");
            // Fallback to a flat plane of the same size
            Plane3d::default()
                .mesh()
                .size(terrain.ground_size, terrain.ground_size)
                .build()
        }
    };

    let dir = &terrain.texture_dir;
    let color_map = asset_server.load(format!("{dir}/Ground037_1K-JPG_Color.jpg"));
    // Data textures must not be decoded as sRGB
    let linear = |file: &str| {
        asset_server.load_with_settings(
            format!("{dir}/Ground037_1K-JPG_{file}.jpg"),
            |settings: &mut ImageLoaderSettings| settings.is_srgb = false,
        )
    };

    commands.spawn((
        Mesh3d(meshes.add(mesh)),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: srgb(terrain.base_color),
            base_color_texture: Some(color_map),
            occlusion_texture: Some(linear("AmbientOcclusion")),
            normal_map_texture: Some(linear("NormalGL")),
            // Roughness is read from the green channel; the greyscale map also feeds blue,
            // which is multiplied by a zero metallic factor
            metallic_roughness_texture: Some(linear("Roughness")),
            metallic: 0.0,
            perceptual_roughness: 1.0,
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::from_xyz(0.0, offset, 0.0),
        NotShadowCaster,
        Ground,
        Name::new("Ground"),
    ));
}

fn setup_lighting(mut commands: Commands, config: Res<PostcardConfig>) {
    let lighting = &config.lighting;

    // Stands in for the sky/ground hemisphere fill
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: lighting.ambient_brightness.get(),
        affects_lightmapped_meshes: false,
    });
    commands.insert_resource(PointLightShadowMap {
        size: lighting.shadow_map_size,
    });

    let position = Vec3::from_array(lighting.spot_position);
    info!("Spot light at {position}, cone {:.3} rad", lighting.spot_angle);

    commands.spawn((
        SpotLight {
            intensity: lighting.spot_intensity.get(),
            range: 200.0,
            // Fully soft edge: the falloff starts at the cone axis
            inner_angle: 0.0,
            outer_angle: lighting.spot_angle,
            shadows_enabled: true,
            shadow_map_near_z: lighting.shadow_near,
            ..default()
        },
        Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y),
        SceneLight,
        Name::new("SpotLight"),
    ));
}

fn setup_sky(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Mesh3d(meshes.add(Sphere::new(SKY_RADIUS).mesh().uv(SKY_SEGMENTS, SKY_SEGMENTS))),
        MeshMaterial3d(materials.add(StandardMaterial {
            double_sided: true,
            cull_mode: None,
            ..default()
        })),
        Transform::default(),
        NotShadowCaster,
        SkySphere,
        Name::new("SkySphere"),
    ));
}
