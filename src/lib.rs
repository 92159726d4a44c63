//! Cosmic Catcher - a casual cosmic ray detection game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (particles, shielding, detector)
//! - `render`: Per-frame scene snapshots for a drawing surface

pub mod render;
pub mod sim;

pub use render::Scene;
pub use sim::{Detector, Particle, Shield, ShieldId, SimEvent, SimState, Viewport};

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep in milliseconds (~60 Hz frame cadence)
    pub const TICK_MS: f32 = 16.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Wall-clock interval between cosmic ray spawns (ms)
    pub const SPAWN_INTERVAL_MS: f32 = 500.0;

    /// Fraction of the viewport height covered by the ground band
    pub const GROUND_FRACTION: f32 = 0.2;

    /// Detector defaults
    pub const DETECTOR_BASE_RADIUS: f32 = 25.0;
    /// Radius gained per upgrade
    pub const DETECTOR_UPGRADE_STEP: f32 = 10.0;
    /// Upgrades allowed per session
    pub const MAX_DETECTOR_UPGRADES: u32 = 3;
    /// Detections needed to complete the goal
    pub const DETECTION_GOAL: u32 = 50;

    /// Spawned rays fall at a speed in [min, max) px/tick
    pub const SPAWN_SPEED_MIN: f32 = 2.0;
    pub const SPAWN_SPEED_MAX: f32 = 5.0;
    /// Spawned rays carry a decay budget in [min, max] generations
    pub const DECAY_BUDGET_MIN: u8 = 2;
    pub const DECAY_BUDGET_MAX: u8 = 5;

    /// Rays only start decaying below this depth from the top edge
    pub const DECAY_GUARD_Y: f32 = 100.0;
    /// Per-tick decay chance once past the guard band
    pub const DECAY_CHANCE: f32 = 0.1;
    /// Children diverge by an angle in [min, max) degrees
    pub const CHILD_ANGLE_MIN_DEG: f32 = 2.0;
    pub const CHILD_ANGLE_MAX_DEG: f32 = 5.0;
    /// Children inherit the parent speed scaled by a factor in [min, max)
    pub const CHILD_SPEED_FACTOR_MIN: f32 = 0.9;
    pub const CHILD_SPEED_FACTOR_MAX: f32 = 1.1;

    /// Chance of immediate absorption on ground contact
    pub const GROUND_ABSORB_CHANCE: f32 = 0.5;
    /// Buried rays erode with this chance every interval
    pub const GROUND_EROSION_INTERVAL_MS: f32 = 50.0;
    pub const GROUND_EROSION_CHANCE: f32 = 0.5;

    /// Chance a lead brick absorbs a ray inside it, per tick per brick
    pub const SHIELD_ABSORB_CHANCE: f32 = 0.9;

    /// Lead brick dimensions and starting stack
    pub const BRICK_WIDTH: f32 = 50.0;
    pub const BRICK_HEIGHT: f32 = 20.0;
    pub const BRICK_COUNT: u32 = 5;
    pub const BRICK_STACK_X: f32 = 50.0;
    /// The stack's bottom brick sits this far above the ground band
    pub const BRICK_STACK_RAISE: f32 = 100.0;

    /// Rays are culled once this far past the bottom edge
    pub const CULL_MARGIN: f32 = 10.0;

    /// Upgrade button beside the detector
    pub const UPGRADE_BUTTON_SIZE: f32 = 30.0;
    pub const UPGRADE_BUTTON_GAP: f32 = 10.0;
}
