//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure and deterministic:
//! - Fixed flight step only
//! - Timers are values delivered by a scheduler, never wall-clock callbacks
//! - No rendering or platform dependencies

pub mod game;
pub mod impact;
pub mod session;
pub mod state;
pub mod timer;
pub mod trajectory;

pub use game::{ArcheryGame, CompletionFn, GameEvent};
pub use impact::{Hitbox, out_of_bounds};
pub use session::Session;
pub use state::{
    AimState, DefeatStage, HitReport, InteractionPhase, Launch, Projectile, SessionResult, Target,
};
pub use timer::{RunToken, Scheduler, Timer, TimerKind, TimerQueue, TokenSource};
pub use trajectory::{FlightEnd, FlightOutcome, FlightStep, advance, position_at, simulate};
