//! Ravan Archery - the bow-and-arrow stage of the Dussehra festival game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (trajectory, impact, timers, session flow)
//! - `hud`: Presentation snapshot of the game for whatever draws it
//! - `settings`: Presentation and demo preferences
//! - `autoplay`: Seeded demo archer

pub mod autoplay;
pub mod hud;
pub mod settings;
pub mod sim;

pub use hud::{HudSnapshot, PowerBand};
pub use settings::{Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Scene extent on each axis (normalized 0..100 coordinates)
    pub const SCENE_EXTENT: f32 = 100.0;

    /// Where arrows leave the bow
    pub const ARCHER_ORIGIN: Vec2 = Vec2::new(10.0, 70.0);
    /// Centre of Ravan's effigy
    pub const TARGET_CENTER: Vec2 = Vec2::new(80.0, 30.0);

    /// Hitbox half-width around the target centre
    pub const HITBOX_HALF_WIDTH: f32 = 5.0;
    /// Hitbox extent above the centre (screen y grows downward)
    pub const HITBOX_ABOVE: f32 = 5.0;
    /// Hitbox extent below the centre
    pub const HITBOX_BELOW: f32 = 10.0;

    /// Bow angle limits (degrees)
    pub const MIN_ANGLE: i32 = 20;
    pub const MAX_ANGLE: i32 = 80;
    pub const DEFAULT_ANGLE: i32 = 45;

    /// Power limits
    pub const MIN_POWER: u32 = 0;
    pub const MAX_POWER: u32 = 100;
    /// Power shown before the first charge
    pub const DEFAULT_POWER: u32 = 50;
    /// Power gained per charge tick
    pub const CHARGE_STEP: u32 = 2;

    /// Logical time advanced per flight tick
    pub const FLIGHT_DT: f32 = 0.1;
    /// Launch speed = power / POWER_DIVISOR
    pub const POWER_DIVISOR: f32 = 5.0;
    /// Horizontal and vertical scale applied to the launch velocity
    pub const TRAJECTORY_SCALE: f32 = 2.0;
    /// Downward pull (scene units per t²)
    pub const GRAVITY: f32 = 0.5;

    /// Wall-clock cadence of charge and flight timers
    pub const CHARGE_TICK_MS: u64 = 50;
    pub const FLIGHT_TICK_MS: u64 = 50;
    /// Defeat sequence: effigy burns, then the victory banner holds
    pub const BURNING_MS: u64 = 2000;
    pub const VICTORY_MS: u64 = 3000;

    /// Target health
    pub const MAX_HEALTH: u32 = 100;
    pub const ARROW_DAMAGE: u32 = 25;
}

/// Clamp a requested bow angle into the allowed range
#[inline]
pub fn clamp_angle(degrees: i32) -> i32 {
    degrees.clamp(consts::MIN_ANGLE, consts::MAX_ANGLE)
}

/// Clamp a power value into the allowed range
#[inline]
pub fn clamp_power(power: u32) -> u32 {
    power.clamp(consts::MIN_POWER, consts::MAX_POWER)
}

/// Unit direction of a bow angle in scene space (y points down)
#[inline]
pub fn aim_direction(degrees: i32) -> Vec2 {
    let theta = (degrees as f32).to_radians();
    Vec2::new(theta.cos(), -theta.sin())
}
