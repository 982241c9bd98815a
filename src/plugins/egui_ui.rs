use crate::components::PostcardCamera;
use crate::config::{ConfigOrigin, save_config};
use crate::plugins::greeting_text::{GreetingFont, GreetingText};
use crate::plugins::screenshot::TakeScreenshot;
use crate::resources::{GreetingLine, PostcardConfig, srgb};
use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::pbr::DistanceFog;
use bevy::prelude::*;
use bevy_egui::{EguiContexts, EguiPlugin, EguiPrimaryContextPass, egui};
use std::sync::Arc;

/// egui name for the greeting font, used as a fallback after the built-in fonts
const GREETING_FONT_NAME: &str = "greeting";

/// Slider range for the per-line X/Y/Z offsets
const LINE_OFFSET_RANGE: std::ops::RangeInclusive<f32> = -10.0..=10.0;

/// Collapsible "Controls" window: fog colour, screenshot, greeting text and FPS
pub struct ControlPanelPlugin;

impl Plugin for ControlPanelPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin::default());
        }
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        }
        app.add_systems(
            EguiPrimaryContextPass,
            (register_greeting_font, control_panel_system).chain(),
        );
    }
}

/// The default egui fonts have no Ethiopic glyphs; borrow them from the greeting font
fn register_greeting_font(
    mut contexts: EguiContexts,
    font: Option<Res<GreetingFont>>,
    mut registered: Local<bool>,
) {
    if *registered {
        return;
    }
    let Some(font) = font else {
        return;
    };
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    ctx.set_fonts(fonts_with_fallback(font.0));
    *registered = true;
    debug!("Greeting font registered with egui");
}

/// Default egui fonts plus `font` as the last fallback of every family
pub fn fonts_with_fallback(font: &'static [u8]) -> egui::FontDefinitions {
    let mut fonts = egui::FontDefinitions::default();
    fonts.font_data.insert(
        GREETING_FONT_NAME.to_owned(),
        Arc::new(egui::FontData::from_static(font)),
    );
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(GREETING_FONT_NAME.to_owned());
    }
    fonts
}

fn control_panel_system(
    mut contexts: EguiContexts,
    mut greeting: ResMut<GreetingText>,
    mut fogs: Query<&mut DistanceFog, With<PostcardCamera>>,
    mut screenshots: EventWriter<TakeScreenshot>,
    diagnostics: Res<DiagnosticsStore>,
    mut config: ResMut<PostcardConfig>,
    origin: Option<Res<ConfigOrigin>>,
) {
    let Ok(ctx) = contexts.ctx_mut() else {
        return;
    };

    let mut lines_changed = false;
    let mut save_requested = false;

    egui::Window::new("Controls")
        .default_open(false)
        .resizable(false)
        .anchor(egui::Align2::RIGHT_TOP, [-10.0, 10.0])
        .show(ctx, |ui| {
            ui.heading("Fog");
            if let Ok(mut fog) = fogs.single_mut() {
                let mut rgb = color_to_rgb(fog.color);
                ui.horizontal(|ui| {
                    ui.label("Fog Color");
                    if ui.color_edit_button_srgb(&mut rgb).changed() {
                        fog.color = srgb(rgb);
                    }
                });
            }

            ui.separator();
            if ui.button("Take Screenshot").clicked() {
                screenshots.write(TakeScreenshot);
            }

            ui.separator();
            egui::CollapsingHeader::new("Text Properties").show(ui, |ui| {
                // Only flag the resource when a widget actually changed something
                for line in greeting.bypass_change_detection().lines.iter_mut() {
                    lines_changed |= greeting_line_controls(ui, line);
                }
            });

            ui.separator();
            if ui.button("Save Settings").clicked() {
                save_requested = true;
            }

            ui.separator();
            match frames_per_second(&diagnostics) {
                Some(fps) => ui.label(format!("FPS: {fps:.0}")),
                None => ui.label("FPS: --"),
            };
        });

    if lines_changed {
        greeting.set_changed();
    }

    if save_requested {
        config.greeting = greeting.lines.clone();
        if let Ok(fog) = fogs.single() {
            config.fog.color = color_to_rgb(fog.color);
        }
        let path = origin.as_deref().and_then(ConfigOrigin::save_path);
        match save_config(&config, path) {
            Ok(()) => info!("Settings saved"),
            Err(e) => warn!("Failed to save settings: {e}"),
        }
    }
}

/// Colour, offset and text widgets for one line; true if anything changed
fn greeting_line_controls(ui: &mut egui::Ui, line: &mut GreetingLine) -> bool {
    let mut changed = false;

    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(format!("{} Color", line.text));
            changed |= ui.color_edit_button_srgb(&mut line.color).changed();
        });
        for (axis, value) in ["X", "Y", "Z"].into_iter().zip(line.position.iter_mut()) {
            changed |= ui
                .add(egui::Slider::new(value, LINE_OFFSET_RANGE).text(axis))
                .changed();
        }
        changed |= ui.text_edit_singleline(&mut line.text).changed();
    });

    changed
}

fn frames_per_second(diagnostics: &DiagnosticsStore) -> Option<f64> {
    diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
}

/// Colour as 8-bit sRGB, dropping alpha
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let [r, g, b, _] = color.to_srgba().to_u8_array();
    [r, g, b]
}
