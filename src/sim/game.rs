//! Archery stage state machine
//!
//! `Idle -> Charging -> Flying -> Idle` until the arrow that brings Ravan's
//! health to zero moves the stage to `Defeated`, which then runs
//! Burning (2 s) -> Victory (3 s) -> completion notification.
//!
//! All mutation goes through the transition methods below. Timers are handed
//! to a [`Scheduler`] and come back through [`ArcheryGame::handle_timer`],
//! which drops any timer whose run has been superseded.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{
    AimState, DefeatStage, HitReport, InteractionPhase, Launch, Projectile, SessionResult, Target,
};
use super::timer::{RunToken, Scheduler, Timer, TimerKind, TokenSource};
use super::trajectory::{FlightStep, advance};
use crate::consts::*;

/// Completion notification handed over by the stage orchestrator
pub type CompletionFn = Box<dyn FnOnce()>;

/// Something presentation layers may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ChargeStarted,
    Launched(Launch),
    /// Arrow left the scene after `steps` ticks
    Missed { steps: u32, pos: Vec2 },
    /// Arrow struck Ravan
    Hit { report: HitReport, pos: Vec2 },
    Burning,
    Victory,
    Completed,
}

/// Token of the live run for each timer kind (None = no run)
#[derive(Debug, Clone, Copy, Default)]
struct ActiveRuns {
    charge: Option<RunToken>,
    flight: Option<RunToken>,
    defeat: Option<RunToken>,
}

impl ActiveRuns {
    fn slot(&mut self, kind: TimerKind) -> &mut Option<RunToken> {
        match kind {
            TimerKind::Charge => &mut self.charge,
            TimerKind::Flight => &mut self.flight,
            TimerKind::Defeat => &mut self.defeat,
        }
    }

    fn get(&self, kind: TimerKind) -> Option<RunToken> {
        match kind {
            TimerKind::Charge => self.charge,
            TimerKind::Flight => self.flight,
            TimerKind::Defeat => self.defeat,
        }
    }
}

/// The archery mini-game: aim, charge, shoot, until Ravan falls
pub struct ArcheryGame {
    aim: AimState,
    target: Target,
    projectile: Option<Projectile>,
    defeat_stage: Option<DefeatStage>,
    /// Blessings carried over from the previous stage (display only)
    bonus: u32,
    tokens: TokenSource,
    runs: ActiveRuns,
    events: Vec<GameEvent>,
    on_complete: Option<CompletionFn>,
}

impl ArcheryGame {
    pub fn new(bonus: u32, on_complete: impl FnOnce() + 'static) -> Self {
        Self {
            aim: AimState::default(),
            target: Target::default(),
            projectile: None,
            defeat_stage: None,
            bonus,
            tokens: TokenSource::default(),
            runs: ActiveRuns::default(),
            events: Vec::new(),
            on_complete: Some(Box::new(on_complete)),
        }
    }

    pub fn aim(&self) -> &AimState {
        &self.aim
    }

    pub fn phase(&self) -> InteractionPhase {
        self.aim.phase()
    }

    pub fn target(&self) -> &Target {
        &self.target
    }

    pub fn projectile(&self) -> Option<&Projectile> {
        self.projectile.as_ref()
    }

    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    pub fn defeat_stage(&self) -> Option<DefeatStage> {
        self.defeat_stage
    }

    /// Effigy is on fire (from the killing blow until the banner shows)
    pub fn is_burning(&self) -> bool {
        self.defeat_stage.is_some()
    }

    pub fn show_victory(&self) -> bool {
        matches!(
            self.defeat_stage,
            Some(DefeatStage::Victory | DefeatStage::Complete)
        )
    }

    pub fn result(&self) -> SessionResult {
        SessionResult {
            hits: self.target.hit_count(),
            defeated: self.target.defeated(),
            completed: self.defeat_stage == Some(DefeatStage::Complete),
        }
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether a timer still belongs to the live run of its kind
    pub fn is_current(&self, timer: &Timer) -> bool {
        self.runs.get(timer.kind) == Some(timer.token)
    }

    /// Adjust the bow. Ignored unless idle.
    pub fn set_angle(&mut self, degrees: i32) -> bool {
        let accepted = self.aim.set_angle(degrees);
        if !accepted {
            log::debug!("Angle change to {} ignored in {:?}", degrees, self.phase());
        }
        accepted
    }

    /// Launch control pressed: start charging from zero power
    pub fn press(&mut self, scheduler: &mut impl Scheduler) -> bool {
        if !self.aim.begin_charge() {
            log::debug!("Press ignored in {:?}", self.phase());
            return false;
        }
        let token = self.start_run(TimerKind::Charge);
        scheduler.schedule(CHARGE_TICK_MS, Timer { kind: TimerKind::Charge, token });
        self.events.push(GameEvent::ChargeStarted);
        true
    }

    /// Launch control released: stop charging and loose the arrow
    pub fn release(&mut self, scheduler: &mut impl Scheduler) -> bool {
        let Some(launch) = self.aim.fire() else {
            log::debug!("Release ignored in {:?}", self.phase());
            return false;
        };
        self.runs.charge = None;

        self.projectile = Some(Projectile::new(launch));
        let token = self.start_run(TimerKind::Flight);
        scheduler.schedule(FLIGHT_TICK_MS, Timer { kind: TimerKind::Flight, token });

        log::info!(
            "Arrow loosed at {}° with power {}",
            launch.angle_degrees,
            launch.power
        );
        self.events.push(GameEvent::Launched(launch));
        true
    }

    /// Deliver a timer scheduled by this game. Stale timers are dropped.
    pub fn handle_timer(&mut self, timer: Timer, scheduler: &mut impl Scheduler) {
        if !self.is_current(&timer) {
            log::trace!("Dropping stale {:?} timer {}", timer.kind, timer.token.id());
            return;
        }
        match timer.kind {
            TimerKind::Charge => self.charge_tick(timer, scheduler),
            TimerKind::Flight => self.flight_tick(timer, scheduler),
            TimerKind::Defeat => self.defeat_tick(timer, scheduler),
        }
    }

    fn start_run(&mut self, kind: TimerKind) -> RunToken {
        let token = self.tokens.issue();
        *self.runs.slot(kind) = Some(token);
        token
    }

    fn end_run(&mut self, kind: TimerKind) {
        *self.runs.slot(kind) = None;
    }

    fn charge_tick(&mut self, timer: Timer, scheduler: &mut impl Scheduler) {
        if !self.aim.charge() {
            self.end_run(TimerKind::Charge);
            return;
        }
        if self.aim.power() < MAX_POWER {
            scheduler.schedule(CHARGE_TICK_MS, timer);
        }
    }

    fn flight_tick(&mut self, timer: Timer, scheduler: &mut impl Scheduler) {
        let Some(projectile) = self.projectile.as_mut() else {
            self.end_run(TimerKind::Flight);
            return;
        };

        match advance(projectile, self.target.hitbox()) {
            FlightStep::Moving(pos) => {
                log::trace!("Arrow at ({:.2}, {:.2})", pos.x, pos.y);
                scheduler.schedule(FLIGHT_TICK_MS, timer);
            }
            FlightStep::OutOfBounds(pos) => {
                let steps = projectile.step;
                self.finish_flight();
                self.aim.land();
                log::info!("Arrow missed after {} steps", steps);
                self.events.push(GameEvent::Missed { steps, pos });
            }
            FlightStep::Impact(pos) => {
                self.finish_flight();
                let report = self.target.take_hit();
                log::info!(
                    "Hit! Ravan's power {}% after {} arrows",
                    report.health,
                    report.hit_count
                );
                self.events.push(GameEvent::Hit { report, pos });

                if report.defeated {
                    self.begin_defeat(scheduler);
                } else {
                    self.aim.land();
                }
            }
        }
    }

    fn finish_flight(&mut self) {
        self.projectile = None;
        self.end_run(TimerKind::Flight);
    }

    fn begin_defeat(&mut self, scheduler: &mut impl Scheduler) {
        self.aim.defeat();
        self.defeat_stage = Some(DefeatStage::Burning);
        let token = self.start_run(TimerKind::Defeat);
        scheduler.schedule(BURNING_MS, Timer { kind: TimerKind::Defeat, token });
        log::info!("Ravan is burning");
        self.events.push(GameEvent::Burning);
    }

    fn defeat_tick(&mut self, timer: Timer, scheduler: &mut impl Scheduler) {
        match self.defeat_stage {
            Some(DefeatStage::Burning) => {
                self.defeat_stage = Some(DefeatStage::Victory);
                scheduler.schedule(VICTORY_MS, timer);
                log::info!("Victory! Ravan has been defeated");
                self.events.push(GameEvent::Victory);
            }
            Some(DefeatStage::Victory) => {
                self.defeat_stage = Some(DefeatStage::Complete);
                self.end_run(TimerKind::Defeat);
                self.events.push(GameEvent::Completed);
                if let Some(notify) = self.on_complete.take() {
                    log::info!("Archery stage complete");
                    notify();
                }
            }
            Some(DefeatStage::Complete) | None => self.end_run(TimerKind::Defeat),
        }
    }
}
