//! Arrow trajectory stepping
//!
//! The curve is a stylised parabola tuned for on-screen pacing rather than real
//! ballistics: `pos(t) = origin + dir * (power / 5) * 2 * t + (0, 0.5 * t²)`
//! with `t = step * 0.1`. Every tick the next position is tested for leaving
//! the scene first and for striking the target second; only a position that
//! does neither is committed.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::impact::{Hitbox, out_of_bounds};
use super::state::{Launch, Projectile};
use crate::aim_direction;
use crate::consts::*;

/// What a single flight tick produced
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightStep {
    /// Still airborne at the new (committed) position
    Moving(Vec2),
    /// Would have left the scene here; arrow discarded
    OutOfBounds(Vec2),
    /// Struck the target here; arrow discarded
    Impact(Vec2),
}

impl FlightStep {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, FlightStep::Moving(_))
    }
}

/// How a complete flight ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightEnd {
    Impact,
    OutOfBounds,
}

/// Summary of a flight run to completion
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FlightOutcome {
    pub end: FlightEnd,
    /// Tick on which the flight ended
    pub steps: u32,
    /// Position evaluated on that tick
    pub pos: Vec2,
}

/// Position of an arrow `step` ticks after release
pub fn position_at(launch: &Launch, step: u32) -> Vec2 {
    let t = step as f32 * FLIGHT_DT;
    let speed = launch.power as f32 / POWER_DIVISOR;
    let travel = aim_direction(launch.angle_degrees) * speed * t * TRAJECTORY_SCALE;
    ARCHER_ORIGIN + travel + Vec2::new(0.0, GRAVITY * t * t)
}

/// Advance a projectile by one tick
pub fn advance(projectile: &mut Projectile, hitbox: &Hitbox) -> FlightStep {
    if !projectile.active {
        return FlightStep::OutOfBounds(projectile.pos);
    }

    let step = projectile.step + 1;
    let next = position_at(&projectile.launch, step);
    projectile.step = step;

    if out_of_bounds(next) {
        projectile.active = false;
        return FlightStep::OutOfBounds(next);
    }
    if hitbox.contains(next) {
        projectile.active = false;
        return FlightStep::Impact(next);
    }

    projectile.pos = next;
    FlightStep::Moving(next)
}

/// Fly a launch to completion without any timers
pub fn simulate(launch: Launch, hitbox: &Hitbox) -> FlightOutcome {
    let mut projectile = Projectile::new(launch);
    loop {
        match advance(&mut projectile, hitbox) {
            FlightStep::Moving(_) => {}
            FlightStep::OutOfBounds(pos) => {
                return FlightOutcome {
                    end: FlightEnd::OutOfBounds,
                    steps: projectile.step,
                    pos,
                };
            }
            FlightStep::Impact(pos) => {
                return FlightOutcome {
                    end: FlightEnd::Impact,
                    steps: projectile.step,
                    pos,
                };
            }
        }
    }
}
