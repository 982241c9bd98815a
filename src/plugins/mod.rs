pub mod camera;
pub mod egui_ui;
pub mod environment;
pub mod greeting_text;
pub mod model;
pub mod scene;
pub mod screenshot;
pub mod ui_common;

pub use camera::*;
pub use egui_ui::*;
pub use environment::*;
pub use greeting_text::*;
pub use model::*;
pub use scene::*;
pub use screenshot::*;
pub use ui_common::*;
