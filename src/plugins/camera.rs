use crate::components::PostcardCamera;
use crate::plugins::ui_common::egui_wants_pointer;
use crate::resources::{PostcardConfig, srgb};
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::pbr::{DistanceFog, FogFalloff};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::f32::consts::FRAC_PI_2;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;
const ORBIT_SENSITIVITY: f32 = 0.005;
const PAN_SENSITIVITY: f32 = 0.0015;
const ZOOM_SPEED: f32 = 0.1;
const PIXELS_PER_LINE: f32 = 100.0;
/// Keeps the camera just above the focus horizon and off the pole
const MIN_PITCH: f32 = 0.0;
const MAX_PITCH: f32 = FRAC_PI_2 - 0.01;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_camera)
            .add_systems(Update, (orbit_camera_input, apply_orbit_camera).chain());
    }
}

/// Camera orbiting a focus point.
#[derive(Resource, Debug, Clone, PartialEq)]
pub struct OrbitCamera {
    /// Point the camera looks at
    pub focus: Vec3,
    /// Horizontal rotation in radians
    pub yaw: f32,
    /// Elevation above the focus horizon in radians
    pub pitch: f32,
    /// Distance from focus point
    pub distance: f32,
    pub min_distance: f32,
    pub max_distance: f32,
}

impl OrbitCamera {
    /// Orbit state that reproduces a camera at `position` looking at `target`
    pub fn from_position(position: Vec3, target: Vec3, min_distance: f32, max_distance: f32) -> Self {
        let offset = position - target;
        let distance = offset.length().clamp(min_distance, max_distance);
        let pitch = if offset.length() > f32::EPSILON {
            (offset.y / offset.length()).asin()
        } else {
            MIN_PITCH
        };

        Self {
            focus: target,
            yaw: offset.x.atan2(offset.z),
            pitch: pitch.clamp(MIN_PITCH, MAX_PITCH),
            distance,
            min_distance,
            max_distance,
        }
    }

    /// Mouse delta in pixels: horizontal spins yaw, vertical tilts pitch
    pub fn rotate(&mut self, delta: Vec2) {
        self.yaw -= delta.x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + delta.y * ORBIT_SENSITIVITY).clamp(MIN_PITCH, MAX_PITCH);
    }

    /// Slide the focus in the view plane; farther cameras pan faster
    pub fn pan(&mut self, delta: Vec2) {
        let transform = self.transform();
        let scale = self.distance * PAN_SENSITIVITY;
        self.focus += (-delta.x * *transform.right() + delta.y * *transform.up()) * scale;
    }

    /// Positive steps move closer
    pub fn zoom(&mut self, steps: f32) {
        let factor = (1.0 - steps * ZOOM_SPEED).max(0.1);
        self.distance = (self.distance * factor).clamp(self.min_distance, self.max_distance);
    }

    pub fn transform(&self) -> Transform {
        // Spherical to cartesian offset from focus
        let x = self.distance * self.pitch.cos() * self.yaw.sin();
        let y = self.distance * self.pitch.sin();
        let z = self.distance * self.pitch.cos() * self.yaw.cos();
        Transform::from_translation(self.focus + Vec3::new(x, y, z)).looking_at(self.focus, Vec3::Y)
    }
}

fn setup_camera(mut commands: Commands, config: Res<PostcardConfig>) {
    let camera = &config.camera;
    let orbit = OrbitCamera::from_position(
        Vec3::from_array(camera.position),
        Vec3::from_array(camera.target),
        camera.min_distance.get(),
        camera.max_distance.get(),
    );

    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: camera.fov_degrees.to_radians(),
            near: NEAR_PLANE,
            far: FAR_PLANE,
            ..default()
        }),
        Tonemapping::AcesFitted,
        DistanceFog {
            color: srgb(config.fog.color),
            falloff: FogFalloff::Linear {
                start: config.fog.start.get(),
                end: config.fog.end.get(),
            },
            ..default()
        },
        orbit.transform(),
        PostcardCamera,
        Name::new("Camera"),
    ));
    commands.insert_resource(orbit);
}

/// Left drag orbits, right drag pans, wheel zooms
fn orbit_camera_input(
    mut contexts: EguiContexts,
    buttons: Res<ButtonInput<MouseButton>>,
    motion: Res<AccumulatedMouseMotion>,
    scroll: Res<AccumulatedMouseScroll>,
    orbit: Option<ResMut<OrbitCamera>>,
) {
    let Some(mut orbit) = orbit else {
        return;
    };
    if egui_wants_pointer(&mut contexts) {
        return;
    }

    if motion.delta != Vec2::ZERO {
        if buttons.pressed(MouseButton::Left) {
            orbit.rotate(motion.delta);
        } else if buttons.pressed(MouseButton::Right) {
            orbit.pan(motion.delta);
        }
    }

    let steps = match scroll.unit {
        MouseScrollUnit::Line => scroll.delta.y,
        MouseScrollUnit::Pixel => scroll.delta.y / PIXELS_PER_LINE,
    };
    if steps != 0.0 {
        orbit.zoom(steps);
    }
}

/// System: apply OrbitCamera state to the camera Transform when it changes.
pub fn apply_orbit_camera(
    orbit: Option<Res<OrbitCamera>>,
    mut query: Query<&mut Transform, With<PostcardCamera>>,
) {
    let Some(orbit) = orbit else {
        return;
    };
    if !orbit.is_changed() {
        return;
    }
    let Ok(mut transform) = query.single_mut() else {
        return;
    };
    *transform = orbit.transform();
}
