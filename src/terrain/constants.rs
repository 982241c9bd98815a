/// Constants for the postcard terrain and decorations
/// Ground plane
pub const DEFAULT_GROUND_SIZE: f32 = 40.0 * 6.0 * 2.0;
pub const DEFAULT_GROUND_SEGMENTS: u32 = 400;
pub const DEFAULT_MODEL_HEIGHT: f32 = 7.0;
/// Zero reproduces the level ground the postcard has always shipped with
pub const DEFAULT_GROUND_NOISE_FREQUENCY: f32 = 0.0;

/// Height scaling: positive noise is exaggerated into hills, negative noise stays shallow
pub const POSITIVE_HEIGHT_SCALE: f32 = 3.0;
pub const NEGATIVE_HEIGHT_SCALE: f32 = 1.0;

/// Hut scatter defaults
pub const DEFAULT_SCATTER_RESOLUTION: u32 = 25;
pub const DEFAULT_SCATTER_SPACING: f32 = 15.0;
pub const DEFAULT_DISTRIBUTION_FREQUENCY: f32 = 0.03;
pub const DEFAULT_REJECTION_THRESHOLD: f32 = -0.5;
pub const DEFAULT_MIN_RADIUS_FACTOR: f32 = 0.1;
pub const DEFAULT_MAX_RADIUS_FACTOR: f32 = 0.3;
pub const DEFAULT_BASE_SCALE: f32 = 0.8;
pub const DEFAULT_MIN_SCALE_BONUS: f32 = 0.3;

/// Hut geometry
pub const HUT_BASE_RADIUS: f32 = 3.0;
pub const HUT_BASE_HEIGHT: f32 = 4.0;
pub const HUT_BASE_SEGMENTS: u32 = 22;
pub const HUT_ROOF_RADIUS: f32 = 4.0;
pub const HUT_ROOF_HEIGHT: f32 = 6.0;
pub const HUT_ROOF_SEGMENTS: u32 = 32;
pub const HUT_ROOF_OFFSET: f32 = 4.3;

/// Sky sphere
pub const SKY_RADIUS: f32 = 400.0;
pub const SKY_SEGMENTS: u32 = 64;
