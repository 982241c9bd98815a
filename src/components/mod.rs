use bevy::prelude::*;

/// The deformed ground plane
#[derive(Component)]
pub struct Ground;

/// The spot light that casts the scene's shadows
#[derive(Component)]
pub struct SceneLight;

/// Inverted backdrop sphere
#[derive(Component)]
pub struct SkySphere;

/// One scattered hut
#[derive(Component)]
pub struct Hut;

/// Root of the loaded nativity scene
#[derive(Component)]
pub struct NativityModel;

/// Parent entity holding the greeting lines
#[derive(Component)]
pub struct GreetingRoot;

/// A rendered greeting line, indexed into `GreetingText::lines`
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreetingLineMesh {
    pub index: usize,
}

/// The main 3D camera, driven by the orbit controller
#[derive(Component)]
pub struct PostcardCamera;
