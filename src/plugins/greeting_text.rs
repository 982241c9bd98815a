//! Extruded greeting text.
//!
//! The font is read on the IO task pool; the four lines appear once the read resolves.
//! Control-panel edits land in [`GreetingText`] and are pushed to the meshes by
//! [`sync_greeting_lines`].
use crate::components::{GreetingLineMesh, GreetingRoot};
use crate::errors::{PostcardError, PostcardResult};
use crate::resources::{GreetingLine, PostcardConfig};
use bevy::prelude::*;
use bevy::render::mesh::PrimitiveTopology;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::tasks::{IoTaskPool, Task, block_on, futures_lite::future};
use meshtext::{MeshGenerator, MeshText, TextSection};
use std::path::{Path, PathBuf};

const TEXT_SIZE: f32 = 1.0;
const TEXT_DEPTH: f32 = 0.2;

pub struct GreetingTextPlugin;

impl Plugin for GreetingTextPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, (init_greeting_text, start_font_load))
            .add_systems(Update, (poll_font_load, sync_greeting_lines).chain());
    }
}

/// Editable state of the greeting, one entry per line
#[derive(Resource, Debug, Clone, Default)]
pub struct GreetingText {
    pub lines: Vec<GreetingLine>,
}

/// Font bytes, kept for the lifetime of the process so meshes can be rebuilt on edit
#[derive(Resource, Clone, Copy)]
pub struct GreetingFont(pub &'static [u8]);

#[derive(Resource)]
struct FontLoad(Task<PostcardResult<&'static [u8]>>);

/// What a line mesh currently shows, so unchanged lines are left alone
#[derive(Component, Debug, Clone, PartialEq)]
struct RenderedLine {
    text: String,
    color: [u8; 3],
}

fn init_greeting_text(mut commands: Commands, config: Res<PostcardConfig>) {
    commands.insert_resource(GreetingText {
        lines: config.greeting.clone(),
    });
}

fn start_font_load(mut commands: Commands, config: Res<PostcardConfig>) {
    let path = PathBuf::from(&config.assets.font_path);
    info!("Loading font from {}", path.display());

    let task = IoTaskPool::get().spawn(async move { read_font(&path) });
    commands.insert_resource(FontLoad(task));
}

/// Read and sanity-check a TrueType/OpenType font
pub fn read_font(path: &Path) -> PostcardResult<&'static [u8]> {
    let bytes = std::fs::read(path).map_err(|source| PostcardError::FontUnavailable {
        path: path.to_path_buf(),
        source,
    })?;

    // The mesh generator panics on unparsable fonts, so reject them here
    ttf_parser::Face::parse(&bytes, 0).map_err(|e| PostcardError::InvalidFont {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    Ok(Box::leak(bytes.into_boxed_slice()))
}

/// Extrude `text` into a flat-shaded triangle mesh
pub fn build_text_mesh(font: &'static [u8], text: &str) -> PostcardResult<Mesh> {
    let mut generator = MeshGenerator::new(font);
    let transform = Mat4::from_scale(Vec3::new(TEXT_SIZE, TEXT_SIZE, TEXT_DEPTH)).to_cols_array();

    let text_mesh: MeshText = generator
        .generate_section(text, false, Some(&transform))
        .map_err(|e| PostcardError::TextMesh {
            reason: e.to_string(),
        })?;

    let positions: Vec<[f32; 3]> = text_mesh
        .vertices
        .chunks_exact(3)
        .map(|v| [v[0], v[1], v[2]])
        .collect();

    let mut mesh = Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default());
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
    mesh.compute_flat_normals();
    Ok(mesh)
}

fn poll_font_load(
    mut commands: Commands,
    load: Option<ResMut<FontLoad>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    greeting: Res<GreetingText>,
    config: Res<PostcardConfig>,
) {
    let Some(mut load) = load else {
        return;
    };
    let Some(result) = block_on(future::poll_once(&mut load.0)) else {
        return;
    };
    commands.remove_resource::<FontLoad>();

    let font = match result {
        Ok(font) => font,
        Err(err) => {
            warn!("Greeting text disabled: {err}");
            return;
        }
    };
    commands.insert_resource(GreetingFont(font));

    let root = commands
        .spawn((
            Transform::from_translation(Vec3::from_array(config.assets.text_position))
                .with_scale(Vec3::splat(config.assets.text_scale)),
            Visibility::default(),
            GreetingRoot,
            Name::new("Greeting"),
        ))
        .id();

    for (index, line) in greeting.lines.iter().enumerate() {
        let mesh = match build_text_mesh(font, &line.text) {
            Ok(mesh) => mesh,
            Err(err) => {
                warn!("Skipping greeting line '{}': {err}", line.key);
                continue;
            }
        };

        let child = commands
            .spawn((
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: line.color(),
                    ..default()
                })),
                Transform::from_translation(Vec3::from_array(line.position)),
                GreetingLineMesh { index },
                RenderedLine {
                    text: line.text.clone(),
                    color: line.color,
                },
                Name::new(format!("Greeting_{}", line.key)),
            ))
            .id();
        commands.entity(root).add_child(child);
    }

    info!("Greeting text ready ({} lines)", greeting.lines.len());
}

/// Push edited colours, positions and text into the line entities
pub fn sync_greeting_lines(
    greeting: Res<GreetingText>,
    font: Option<Res<GreetingFont>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut lines: Query<(
        &GreetingLineMesh,
        &mut Transform,
        &Mesh3d,
        &MeshMaterial3d<StandardMaterial>,
        &mut RenderedLine,
    )>,
) {
    if !greeting.is_changed() {
        return;
    }
    let Some(font) = font else {
        return;
    };

    for (marker, mut transform, mesh, material, mut rendered) in &mut lines {
        let Some(line) = greeting.lines.get(marker.index) else {
            continue;
        };

        let position = Vec3::from_array(line.position);
        if transform.translation != position {
            transform.translation = position;
        }

        if rendered.color != line.color {
            if let Some(material) = materials.get_mut(&material.0) {
                material.base_color = line.color();
            }
            rendered.color = line.color;
        }

        if rendered.text != line.text {
            match build_text_mesh(font.0, &line.text) {
                Ok(new_mesh) => {
                    if let Some(mesh) = meshes.get_mut(&mesh.0) {
                        *mesh = new_mesh;
                    }
                }
                Err(err) => warn!("Keeping previous text for '{}': {err}", line.key),
            }
            rendered.text = line.text.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::render::mesh::VertexAttributeValues;

    const FIXTURE_FONT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/DejaVuSansMono.ttf");

    fn fixture_font() -> &'static [u8] {
        read_font(Path::new(FIXTURE_FONT)).expect("Fixture font should load")
    }

    fn float3(mesh: &Mesh, attribute: bevy::render::mesh::MeshVertexAttribute) -> Vec<[f32; 3]> {
        match mesh.attribute(attribute) {
            Some(VertexAttributeValues::Float32x3(values)) => values.clone(),
            _ => panic!("Mesh should carry Float32x3 {}", attribute.name),
        }
    }

    fn temp_file(name: &str, contents: &[u8]) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("holiday-postcard-font-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn test_missing_font_reported() {
        let result = read_font(Path::new("/definitely/not/here/font.ttf"));
        assert!(matches!(result, Err(PostcardError::FontUnavailable { .. })));
    }

    #[test]
    fn test_garbage_font_rejected() {
        let path = temp_file("garbage.ttf", b"this is not a font");
        let result = read_font(&path);
        assert!(matches!(result, Err(PostcardError::InvalidFont { .. })));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_greeting_text_starts_from_config() {
        let mut app = App::new();
        app.insert_resource(PostcardConfig::default())
            .add_systems(Startup, init_greeting_text);
        app.update();

        let greeting = app.world().resource::<GreetingText>();
        assert_eq!(greeting.lines, PostcardConfig::default().greeting);
    }

    #[test]
    fn test_sync_moves_and_recolours_lines_without_font_rebuild() {
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(GreetingText {
                lines: PostcardConfig::default().greeting,
            })
            .insert_resource(GreetingFont(&[]))
            .add_systems(Update, sync_greeting_lines);

        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let mesh = app.world_mut().resource_mut::<Assets<Mesh>>().add(Cuboid::default());
        let line = app.world().resource::<GreetingText>().lines[1].clone();
        let entity = app
            .world_mut()
            .spawn((
                Mesh3d(mesh),
                MeshMaterial3d(material.clone()),
                Transform::default(),
                GreetingLineMesh { index: 1 },
                RenderedLine {
                    text: line.text.clone(),
                    color: [0, 0, 0],
                },
            ))
            .id();

        {
            let mut greeting = app.world_mut().resource_mut::<GreetingText>();
            greeting.lines[1].position = [1.0, 2.0, 3.0];
        }
        app.update();

        let world = app.world();
        assert_eq!(
            world.get::<Transform>(entity).unwrap().translation,
            Vec3::new(1.0, 2.0, 3.0)
        );
        assert_eq!(world.get::<RenderedLine>(entity).unwrap().color, line.color);
        let base_color = world
            .resource::<Assets<StandardMaterial>>()
            .get(&material)
            .unwrap()
            .base_color;
        assert_eq!(base_color, line.color());
    }

    #[test]
    fn test_build_text_mesh_is_flat_shaded_triangle_list() {
        let mesh = build_text_mesh(fixture_font(), "Noel").unwrap();

        assert_eq!(mesh.primitive_topology(), PrimitiveTopology::TriangleList);
        assert!(mesh.indices().is_none());

        let positions = float3(&mesh, Mesh::ATTRIBUTE_POSITION);
        let normals = float3(&mesh, Mesh::ATTRIBUTE_NORMAL);
        assert!(!positions.is_empty());
        assert_eq!(positions.len() % 3, 0);
        assert_eq!(normals.len(), positions.len());

        // Flat shading: every corner of a triangle shares the face normal
        for face in normals.chunks_exact(3) {
            let bits = |n: [f32; 3]| n.map(f32::to_bits);
            assert_eq!(bits(face[0]), bits(face[1]));
            assert_eq!(bits(face[1]), bits(face[2]));
        }

        // Extruded, not a flat outline
        let (min_z, max_z) = positions
            .iter()
            .fold((f32::MAX, f32::MIN), |(lo, hi), p| (lo.min(p[2]), hi.max(p[2])));
        assert!(max_z - min_z > 0.0);
    }

    #[test]
    fn test_fixture_font_passes_validation() {
        assert!(!fixture_font().is_empty());
    }

    #[test]
    fn test_text_edit_replaces_line_mesh() {
        let font = fixture_font();
        let mut app = App::new();
        app.init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .insert_resource(GreetingText {
                lines: PostcardConfig::default().greeting,
            })
            .insert_resource(GreetingFont(font))
            .add_systems(Update, sync_greeting_lines);

        let line = app.world().resource::<GreetingText>().lines[0].clone();
        let material = app
            .world_mut()
            .resource_mut::<Assets<StandardMaterial>>()
            .add(StandardMaterial::default());
        let mesh = app.world_mut().resource_mut::<Assets<Mesh>>().add(Cuboid::default());
        let entity = app
            .world_mut()
            .spawn((
                Mesh3d(mesh.clone()),
                MeshMaterial3d(material),
                Transform::from_translation(Vec3::from_array(line.position)),
                GreetingLineMesh { index: 0 },
                RenderedLine {
                    text: line.text.clone(),
                    color: line.color,
                },
            ))
            .id();

        app.world_mut().resource_mut::<GreetingText>().lines[0].text = "Hi".to_string();
        app.update();

        let expected = build_text_mesh(font, "Hi").unwrap();
        let world = app.world();
        let rebuilt = world.resource::<Assets<Mesh>>().get(&mesh).unwrap();
        assert!(rebuilt.indices().is_none(), "Cuboid should have been replaced");
        assert_eq!(
            float3(rebuilt, Mesh::ATTRIBUTE_POSITION),
            float3(&expected, Mesh::ATTRIBUTE_POSITION)
        );
        assert_eq!(world.get::<RenderedLine>(entity).unwrap().text, "Hi");
    }
}
