use crate::resources::PostcardConfig;
use bevy::prelude::*;
use bevy::render::view::screenshot::{Screenshot, save_to_disk};
use std::path::{Path, PathBuf};

/// Request a PNG of the primary window
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct TakeScreenshot;

pub struct ScreenshotPlugin;

impl Plugin for ScreenshotPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<TakeScreenshot>()
            .add_systems(Update, (screenshot_key, capture_screenshot).chain());
    }
}

fn screenshot_key(keyboard: Res<ButtonInput<KeyCode>>, mut requests: EventWriter<TakeScreenshot>) {
    if keyboard.just_pressed(KeyCode::F12) {
        requests.write(TakeScreenshot);
    }
}

fn capture_screenshot(
    mut commands: Commands,
    mut requests: EventReader<TakeScreenshot>,
    config: Res<PostcardConfig>,
) {
    // Several requests in one frame still produce a single file
    if requests.read().count() == 0 {
        return;
    }

    let dir = Path::new(&config.assets.screenshot_dir);
    if let Err(e) = std::fs::create_dir_all(dir) {
        warn!("Failed to create screenshot directory {}: {e}", dir.display());
        return;
    }

    let path = next_free_path(dir, &config.assets.screenshot_name);
    info!("Saving screenshot to {}", path.display());
    commands
        .spawn(Screenshot::primary_window())
        .observe(save_to_disk(path));
}

/// `dir/name`, or `dir/stem (n).ext` for the first `n` that does not exist yet
pub fn next_free_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let name_path = Path::new(name);
    let stem = name_path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| name.to_string());
    let extension = name_path.extension().map(|e| e.to_string_lossy().into_owned());

    (1..)
        .map(|n| {
            let file = match &extension {
                Some(ext) => format!("{stem} ({n}).{ext}"),
                None => format!("{stem} ({n})"),
            };
            dir.join(file)
        })
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}
