use crate::components::NativityModel;
use crate::resources::PostcardConfig;
use bevy::asset::{AssetLoadFailedEvent, AssetPath};
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy::scene::{Scene, SceneInstanceReady};
use std::path::Path;

/// Loads the nativity glTF in the background and adds it to the scene when it resolves
pub struct ModelPlugin;

impl Plugin for ModelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ModelStatus>()
            .add_systems(Startup, spawn_nativity)
            .add_systems(
                Update,
                (report_model_failures::<Scene>, report_model_failures::<Gltf>),
            );
    }
}

/// Progress of the nativity model load
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub enum ModelStatus {
    #[default]
    Loading,
    Ready,
    Failed {
        reason: String,
    },
}

/// Placement of the model root
pub fn nativity_transform(config: &PostcardConfig) -> Transform {
    Transform::from_translation(Vec3::from_array(config.assets.model_position))
        .with_rotation(Quat::from_rotation_x(config.assets.model_tilt))
}

fn spawn_nativity(mut commands: Commands, asset_server: Res<AssetServer>, config: Res<PostcardConfig>) {
    let path = config.assets.model_path.clone();
    info!("Loading model from {path}");

    // Scene meshes cast and receive shadows by default, so the instance needs no extra setup
    commands
        .spawn((
            SceneRoot(asset_server.load(GltfAssetLabel::Scene(0).from_asset(path))),
            nativity_transform(&config),
            NativityModel,
            Name::new("Nativity"),
        ))
        .observe(on_model_ready);
}

fn on_model_ready(trigger: Trigger<SceneInstanceReady>, mut status: ResMut<ModelStatus>) {
    info!("Nativity model ready (entity {})", trigger.target());
    *status = ModelStatus::Ready;
}

/// True when `path` is the model file or one of its labeled sub-assets
fn is_model_path(path: &AssetPath, model_path: &str) -> bool {
    path.path() == Path::new(model_path)
}

/// A missing file fails the labeled `#Scene0` handle, not the `Gltf` one, so both are watched
pub fn report_model_failures<A: Asset>(
    mut failures: EventReader<AssetLoadFailedEvent<A>>,
    config: Res<PostcardConfig>,
    mut status: ResMut<ModelStatus>,
) {
    for failure in failures.read() {
        if !is_model_path(&failure.path, &config.assets.model_path) {
            continue;
        }
        if matches!(*status, ModelStatus::Failed { .. }) {
            continue;
        }

        warn!(
            "Failed to load model {}: {}; continuing without it",
            failure.path, failure.error
        );
        *status = ModelStatus::Failed {
            reason: failure.error.to_string(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::asset::io::AssetReaderError;
    use bevy::asset::{AssetId, AssetLoadError};
    use std::path::PathBuf;

    fn missing_file_failure<A: Asset>(path: &str) -> AssetLoadFailedEvent<A> {
        let asset_path = AssetPath::from(path.to_string()).into_owned();
        AssetLoadFailedEvent {
            id: AssetId::default(),
            path: asset_path,
            error: AssetLoadError::AssetReaderError(AssetReaderError::NotFound(PathBuf::from(
                "models/nativity.glb",
            ))),
        }
    }

    fn failure_app() -> App {
        let mut app = App::new();
        app.add_event::<AssetLoadFailedEvent<Scene>>()
            .add_event::<AssetLoadFailedEvent<Gltf>>()
            .insert_resource(PostcardConfig::default())
            .init_resource::<ModelStatus>()
            .add_systems(
                Update,
                (report_model_failures::<Scene>, report_model_failures::<Gltf>),
            );
        app
    }

    #[test]
    fn test_nativity_transform_matches_config() {
        let config = PostcardConfig::default();
        let transform = nativity_transform(&config);

        assert_eq!(transform.translation, Vec3::new(0.5, -4.2, 2.0));
        assert_eq!(transform.scale, Vec3::ONE);
        let (axis, angle) = transform.rotation.to_axis_angle();
        assert!((angle - 0.01).abs() < 1e-5);
        assert!((axis.x.abs() - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_missing_model_scene_marks_failure() {
        let mut app = failure_app();
        app.world_mut()
            .send_event(missing_file_failure::<Scene>("models/nativity.glb#Scene0"));
        app.update();

        assert!(matches!(
            app.world().resource::<ModelStatus>(),
            ModelStatus::Failed { .. }
        ));
    }

    #[test]
    fn test_unrelated_scene_failure_ignored() {
        let mut app = failure_app();
        app.world_mut()
            .send_event(missing_file_failure::<Scene>("models/other.glb#Scene0"));
        app.update();

        assert_eq!(app.world().resource::<ModelStatus>(), &ModelStatus::Loading);
    }

    #[test]
    fn test_labeled_path_matches_model_file() {
        let labeled = AssetPath::from("models/nativity.glb#Scene0");
        assert!(is_model_path(&labeled, "models/nativity.glb"));
        assert!(!is_model_path(&labeled, "models/stable.glb"));
    }
}
