//! Game state and core simulation types
//!
//! Everything the archery stage keeps between timer callbacks lives here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::impact::Hitbox;
use crate::consts::*;
use crate::{clamp_angle, clamp_power};

/// Current interaction phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InteractionPhase {
    /// Waiting for the player; the bow angle may be adjusted
    #[default]
    Idle,
    /// Launch control held, power accumulating
    Charging,
    /// An arrow is in the air
    Flying,
    /// Ravan is down; terminal
    Defeated,
}

/// Steps of the post-defeat sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatStage {
    /// Effigy on fire
    Burning,
    /// Victory banner on screen
    Victory,
    /// Completion notification delivered
    Complete,
}

/// Bow angle, charge power and the phase gating them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AimState {
    angle_degrees: i32,
    power: u32,
    phase: InteractionPhase,
}

impl Default for AimState {
    fn default() -> Self {
        Self {
            angle_degrees: DEFAULT_ANGLE,
            power: DEFAULT_POWER,
            phase: InteractionPhase::Idle,
        }
    }
}

impl AimState {
    pub fn angle_degrees(&self) -> i32 {
        self.angle_degrees
    }

    pub fn power(&self) -> u32 {
        self.power
    }

    pub fn phase(&self) -> InteractionPhase {
        self.phase
    }

    /// Set the bow angle. Only honoured while idle.
    pub fn set_angle(&mut self, degrees: i32) -> bool {
        if self.phase != InteractionPhase::Idle {
            return false;
        }
        self.angle_degrees = clamp_angle(degrees);
        true
    }

    /// Enter the charging phase with power reset to zero
    pub fn begin_charge(&mut self) -> bool {
        if self.phase != InteractionPhase::Idle {
            return false;
        }
        self.phase = InteractionPhase::Charging;
        self.power = 0;
        true
    }

    /// Add one charge step (capped). Only honoured while charging.
    pub fn charge(&mut self) -> bool {
        if self.phase != InteractionPhase::Charging {
            return false;
        }
        self.power = clamp_power(self.power + CHARGE_STEP);
        true
    }

    /// Lock the controls for a launch and return the launch parameters
    pub fn fire(&mut self) -> Option<Launch> {
        if self.phase != InteractionPhase::Charging {
            return None;
        }
        self.phase = InteractionPhase::Flying;
        Some(Launch::new(self.angle_degrees, self.power))
    }

    /// Flight resolved without finishing the target
    pub fn land(&mut self) {
        if self.phase == InteractionPhase::Flying {
            self.phase = InteractionPhase::Idle;
        }
    }

    /// Flight resolved with the final blow
    pub fn defeat(&mut self) {
        self.phase = InteractionPhase::Defeated;
    }
}

/// Angle and power an arrow was released with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Launch {
    pub angle_degrees: i32,
    pub power: u32,
}

impl Launch {
    /// Build a launch, clamping both inputs into their valid ranges
    pub fn new(angle_degrees: i32, power: u32) -> Self {
        Self {
            angle_degrees: clamp_angle(angle_degrees),
            power: clamp_power(power),
        }
    }
}

/// An arrow in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub launch: Launch,
    pub pos: Vec2,
    /// Flight ticks taken so far (logical time = step * FLIGHT_DT)
    pub step: u32,
    pub active: bool,
}

impl Projectile {
    /// Spawn an arrow at the archer
    pub fn new(launch: Launch) -> Self {
        Self {
            launch,
            pos: ARCHER_ORIGIN,
            step: 0,
            active: true,
        }
    }
}

/// Result of a single arrow striking the target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitReport {
    pub health: u32,
    pub hit_count: u32,
    /// This arrow brought health to exactly zero
    pub defeated: bool,
}

/// Ravan: health, hit counter and the fixed hitbox
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Target {
    health: u32,
    hit_count: u32,
    hitbox: Hitbox,
}

impl Default for Target {
    fn default() -> Self {
        Self {
            health: MAX_HEALTH,
            hit_count: 0,
            hitbox: Hitbox::default(),
        }
    }
}

impl Target {
    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn hit_count(&self) -> u32 {
        self.hit_count
    }

    pub fn hitbox(&self) -> &Hitbox {
        &self.hitbox
    }

    pub fn defeated(&self) -> bool {
        self.health == 0
    }

    /// Apply one arrow's worth of damage
    pub fn take_hit(&mut self) -> HitReport {
        let was_standing = self.health > 0;
        self.health = self.health.saturating_sub(ARROW_DAMAGE);
        self.hit_count += 1;
        HitReport {
            health: self.health,
            hit_count: self.hit_count,
            defeated: was_standing && self.health == 0,
        }
    }
}

/// Outcome of the stage as seen by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SessionResult {
    pub hits: u32,
    pub defeated: bool,
    /// Completion notification has been delivered
    pub completed: bool,
}
