use bevy::app::AppExit;
use bevy::prelude::*;
use bevy::window::{MonitorSelection, PrimaryWindow, WindowMode};
use bevy_egui::EguiContexts;

/// Two presses closer than this count as a double click
const DOUBLE_CLICK_SECS: f64 = 0.3;

/// Window-level shortcuts: Escape quits, double click toggles fullscreen
pub struct WindowControlsPlugin;

impl Plugin for WindowControlsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DoubleClick>()
            .add_systems(Update, (handle_exit_key, toggle_fullscreen_on_double_click));
    }
}

/// Returns `true` when egui is using the pointer; world input should be skipped then.
pub fn egui_wants_pointer(contexts: &mut EguiContexts) -> bool {
    contexts
        .ctx_mut()
        .is_ok_and(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
}

#[derive(Resource, Debug, Default)]
pub struct DoubleClick {
    last_press: Option<f64>,
}

impl DoubleClick {
    /// Record a press at `now` seconds; true if it completes a double click
    pub fn register(&mut self, now: f64) -> bool {
        match self.last_press.take() {
            Some(last) if now - last <= DOUBLE_CLICK_SECS => true,
            _ => {
                self.last_press = Some(now);
                false
            }
        }
    }
}

pub fn next_window_mode(mode: WindowMode) -> WindowMode {
    match mode {
        WindowMode::Windowed => WindowMode::BorderlessFullscreen(MonitorSelection::Current),
        _ => WindowMode::Windowed,
    }
}

pub fn handle_exit_key(keys: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keys.just_pressed(KeyCode::Escape) {
        info!("Escape pressed, exiting");
        exit.write(AppExit::Success);
    }
}

fn toggle_fullscreen_on_double_click(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    time: Res<Time>,
    mut clicks: ResMut<DoubleClick>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
) {
    if !buttons.just_pressed(MouseButton::Left) || egui_wants_pointer(&mut contexts) {
        return;
    }
    if !clicks.register(time.elapsed_secs_f64()) {
        return;
    }
    let Ok(mut window) = windows.single_mut() else {
        return;
    };

    window.mode = next_window_mode(window.mode);
    debug!("Window mode now {:?}", window.mode);
}
