//! Demo archer
//!
//! Plays the stage without a player: picks angles and charge times from a
//! seeded RNG so every demo run with the same seed is identical.

use std::cell::Cell;
use std::rc::Rc;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::hud::HudSnapshot;
use crate::settings::Settings;
use crate::sim::{GameEvent, Session};

/// Angle and hold time chosen for one arrow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shot {
    pub angle_degrees: i32,
    /// Charge ticks to hold before releasing (power = 2 per tick)
    pub charge_ticks: u32,
}

/// Seeded shot picker. Stays in the band of flat, strong shots that can reach
/// Ravan from the archer's spot.
pub struct AutoArcher {
    rng: Pcg32,
}

impl AutoArcher {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn next_shot(&mut self) -> Shot {
        Shot {
            angle_degrees: self.rng.random_range(25..=40),
            charge_ticks: self.rng.random_range(25..=50),
        }
    }
}

/// How a demo run went
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DemoReport {
    pub launches: u32,
    pub hits: u32,
    pub completed: bool,
    /// Virtual time at the end of the run
    pub elapsed_ms: u64,
    pub final_hud: HudSnapshot,
}

/// Play one full stage with the demo archer
pub fn run_demo(settings: &Settings) -> DemoReport {
    let completed = Rc::new(Cell::new(false));
    let flag = completed.clone();
    let mut session = Session::new(settings.demo.bonus, move || flag.set(true));
    let mut archer = AutoArcher::new(settings.demo.seed);

    let mut launches = 0;
    while launches < settings.demo.max_launches && !completed.get() {
        let shot = archer.next_shot();
        if !session.shoot(shot.angle_degrees, shot.charge_ticks) {
            break;
        }
        launches += 1;

        for event in session.drain_events() {
            match event {
                GameEvent::Hit { report, .. } => {
                    log::debug!("Shot {} hit, Ravan at {}%", launches, report.health)
                }
                GameEvent::Missed { steps, .. } => {
                    log::debug!("Shot {} missed after {} steps", launches, steps)
                }
                _ => {}
            }
        }

        if session.result().defeated {
            session.run_until_idle();
        }
    }

    let result = session.result();
    DemoReport {
        launches,
        hits: result.hits,
        completed: completed.get(),
        elapsed_ms: session.now_ms(),
        final_hud: HudSnapshot::capture(session.game(), settings),
    }
}
