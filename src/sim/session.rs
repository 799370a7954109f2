//! Clocked driver for the archery stage
//!
//! Owns the game and the timer queue and replays timers against virtual time,
//! so the whole stage can run headless and deterministically.

use super::game::{ArcheryGame, GameEvent};
use super::state::{InteractionPhase, SessionResult};
use super::timer::TimerQueue;

/// Game plus the timers it scheduled
pub struct Session {
    game: ArcheryGame,
    timers: TimerQueue,
}

impl Session {
    pub fn new(bonus: u32, on_complete: impl FnOnce() + 'static) -> Self {
        Self {
            game: ArcheryGame::new(bonus, on_complete),
            timers: TimerQueue::new(),
        }
    }

    pub fn game(&self) -> &ArcheryGame {
        &self.game
    }

    pub fn now_ms(&self) -> u64 {
        self.timers.now_ms()
    }

    pub fn phase(&self) -> InteractionPhase {
        self.game.phase()
    }

    pub fn result(&self) -> SessionResult {
        self.game.result()
    }

    pub fn set_angle(&mut self, degrees: i32) -> bool {
        self.game.set_angle(degrees)
    }

    pub fn press(&mut self) -> bool {
        self.game.press(&mut self.timers)
    }

    pub fn release(&mut self) -> bool {
        self.game.release(&mut self.timers)
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        self.game.drain_events()
    }

    /// Let `ms` of virtual time pass, firing every timer that falls due.
    /// Returns the number of timers delivered (stale ones included).
    pub fn advance(&mut self, ms: u64) -> usize {
        let until = self.timers.now_ms() + ms;
        let mut fired = 0;
        while let Some(timer) = self.timers.pop_due(until) {
            self.game.handle_timer(timer, &mut self.timers);
            fired += 1;
        }
        self.timers.advance_to(until);
        fired
    }

    /// Fire timers until nothing is pending. Every chain the game schedules
    /// ends (charge caps out, flights terminate, the defeat chain completes).
    pub fn run_until_idle(&mut self) -> usize {
        let mut fired = 0;
        while let Some(due) = self.timers.next_due() {
            fired += self.advance(due.saturating_sub(self.timers.now_ms()));
        }
        fired
    }

    /// Hold the launch control for `charge_ticks` charge ticks, then release
    /// and let the arrow resolve. Returns false if the shot was rejected.
    pub fn shoot(&mut self, angle: i32, charge_ticks: u32) -> bool {
        self.set_angle(angle);
        if !self.press() {
            return false;
        }
        self.advance(u64::from(charge_ticks) * crate::consts::CHARGE_TICK_MS);
        if !self.release() {
            return false;
        }
        while self.phase() == InteractionPhase::Flying {
            if self.timers.next_due().is_none() {
                break;
            }
            self.advance(crate::consts::FLIGHT_TICK_MS);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::DefeatStage;
    use std::cell::Cell;
    use std::rc::Rc;

    fn session() -> (Session, Rc<Cell<u32>>) {
        let calls = Rc::new(Cell::new(0));
        let counter = calls.clone();
        let session = Session::new(3, move || counter.set(counter.get() + 1));
        (session, calls)
    }

    #[test]
    fn test_charge_follows_clock() {
        let (mut s, _) = session();
        s.press();
        s.advance(49);
        assert_eq!(s.game().aim().power(), 0);
        s.advance(1);
        assert_eq!(s.game().aim().power(), 2);
        s.advance(500);
        assert_eq!(s.game().aim().power(), 22);
        s.advance(60_000);
        assert_eq!(s.game().aim().power(), MAX_POWER);
    }

    #[test]
    fn test_power_frozen_after_release() {
        let (mut s, _) = session();
        s.press();
        s.advance(10 * CHARGE_TICK_MS);
        s.release();
        let power = s.game().aim().power();
        assert_eq!(power, 20);
        s.run_until_idle();
        assert_eq!(s.game().aim().power(), power);
        assert_eq!(s.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_flight_resolves_on_tick_cadence() {
        let (mut s, _) = session();
        assert!(s.shoot(30, 31));
        // 31 charge ticks, then the arrow lands on its 31st flight tick
        assert_eq!(s.now_ms(), 31 * CHARGE_TICK_MS + 31 * FLIGHT_TICK_MS);
        assert_eq!(s.game().target().health(), 75);
        assert_eq!(s.phase(), InteractionPhase::Idle);
    }

    #[test]
    fn test_full_power_45_misses() {
        let (mut s, _) = session();
        assert!(s.shoot(45, 50));
        assert_eq!(s.game().aim().power(), 100);
        assert_eq!(s.game().target().health(), MAX_HEALTH);
        assert_eq!(s.result().hits, 0);
    }

    #[test]
    fn test_defeat_sequence_timing() {
        let (mut s, calls) = session();
        for _ in 0..3 {
            assert!(s.shoot(30, 31));
        }
        assert_eq!(s.game().target().health(), 25);
        s.drain_events();

        assert!(s.shoot(30, 31));
        assert_eq!(s.phase(), InteractionPhase::Defeated);
        assert_eq!(s.game().defeat_stage(), Some(DefeatStage::Burning));
        let defeated_at = s.now_ms();

        s.advance(BURNING_MS - 1);
        assert_eq!(s.game().defeat_stage(), Some(DefeatStage::Burning));
        s.advance(1);
        assert_eq!(s.game().defeat_stage(), Some(DefeatStage::Victory));
        assert_eq!(calls.get(), 0);

        s.advance(VICTORY_MS - 1);
        assert_eq!(calls.get(), 0);
        s.advance(1);
        assert_eq!(calls.get(), 1);
        assert_eq!(s.now_ms() - defeated_at, BURNING_MS + VICTORY_MS);

        let events = s.drain_events();
        let tail: Vec<_> = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Burning | GameEvent::Victory | GameEvent::Completed))
            .collect();
        assert_eq!(
            tail,
            vec![&GameEvent::Burning, &GameEvent::Victory, &GameEvent::Completed]
        );
    }

    #[test]
    fn test_extra_launches_after_defeat_rejected() {
        let (mut s, calls) = session();
        for _ in 0..4 {
            s.shoot(30, 31);
        }
        s.run_until_idle();
        assert_eq!(calls.get(), 1);

        for _ in 0..5 {
            assert!(!s.shoot(30, 31));
        }
        s.run_until_idle();
        assert_eq!(calls.get(), 1);
        assert_eq!(s.result().hits, 4);
        assert!(s.result().completed);
    }

    #[test]
    fn test_hits_match_impacts_with_misses_mixed_in() {
        let (mut s, _) = session();
        s.shoot(45, 0);
        s.shoot(30, 31);
        s.shoot(45, 50);
        s.shoot(30, 50);
        let events = s.drain_events();
        let impacts = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Hit { .. }))
            .count();
        let misses = events
            .iter()
            .filter(|e| matches!(e, GameEvent::Missed { .. }))
            .count();
        assert_eq!(impacts, 2);
        assert_eq!(misses, 2);
        assert_eq!(s.result().hits, 2);
        assert_eq!(s.game().target().health(), 50);
    }

    #[test]
    fn test_press_while_flying_does_not_restart_charge() {
        let (mut s, _) = session();
        s.press();
        s.advance(5 * CHARGE_TICK_MS);
        s.release();
        s.advance(FLIGHT_TICK_MS);
        assert!(!s.press());
        assert_eq!(s.game().aim().power(), 10);
        assert_eq!(s.phase(), InteractionPhase::Flying);
    }
}
