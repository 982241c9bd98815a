pub mod components;
pub mod config;
pub mod errors;
pub mod plugins;
pub mod resources;
pub mod scatter;
pub mod terrain;

// Selective re-exports for external consumers

// Plugins - main.rs needs all plugins
pub use plugins::*;

// Errors and config for the binaries
pub use config::{ConfigOrigin, resolve_config};
pub use errors::{PostcardError, PostcardResult};

// Layout pieces used by the layout binary
pub use scatter::{Placement, ScatterSettings, scatter_huts};
pub use terrain::HeightField;
