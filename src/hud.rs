//! HUD snapshot
//!
//! Everything a renderer needs to draw the archery stage, captured from the
//! game in one go so the view never reaches into simulation state.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::Settings;
use crate::sim::{ArcheryGame, InteractionPhase};

/// Colour band of the power meter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PowerBand {
    Low,
    Medium,
    High,
}

impl PowerBand {
    pub fn for_power(power: u32) -> Self {
        if power > 66 {
            PowerBand::High
        } else if power > 33 {
            PowerBand::Medium
        } else {
            PowerBand::Low
        }
    }
}

/// What the stage looks like right now
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HudSnapshot {
    pub health: u32,
    pub health_label: String,
    pub stats_label: String,
    pub angle_label: String,
    pub power_label: String,
    pub power: u32,
    pub power_band: PowerBand,
    pub button_label: &'static str,
    /// Angle slider disabled
    pub controls_locked: bool,
    /// Launch button usable
    pub launch_enabled: bool,
    /// Arrow position while one is in flight
    pub arrow: Option<Vec2>,
    /// Arrow sprite rotation (degrees, counter-clockwise)
    pub arrow_rotation: i32,
    pub burning: bool,
    pub shaking: bool,
    pub victory: bool,
}

impl HudSnapshot {
    pub fn capture(game: &ArcheryGame, settings: &Settings) -> Self {
        let aim = game.aim();
        let phase = aim.phase();
        let health = game.target().health();
        let hits = game.target().hit_count();

        let stats_label = if settings.show_bonus {
            format!("Arrows Hit: {} | Blessings Power: +{}", hits, game.bonus())
        } else {
            format!("Arrows Hit: {}", hits)
        };

        let button_label = if phase == InteractionPhase::Charging {
            "Release to Shoot!"
        } else {
            "Hold to Charge"
        };

        let burning = game.is_burning();

        Self {
            health,
            health_label: format!("Ravan's Power: {}%", health),
            stats_label,
            angle_label: format!("Bow Angle: {}°", aim.angle_degrees()),
            power_label: format!("Power: {}%", aim.power()),
            power: aim.power(),
            power_band: PowerBand::for_power(aim.power()),
            button_label,
            controls_locked: phase != InteractionPhase::Idle,
            launch_enabled: matches!(
                phase,
                InteractionPhase::Idle | InteractionPhase::Charging
            ),
            arrow: game.projectile().filter(|p| p.active).map(|p| p.pos),
            arrow_rotation: aim.angle_degrees(),
            burning,
            shaking: burning && !settings.reduced_motion,
            victory: game.show_victory(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;
    use crate::sim::Session;

    #[test]
    fn test_power_bands() {
        assert_eq!(PowerBand::for_power(0), PowerBand::Low);
        assert_eq!(PowerBand::for_power(33), PowerBand::Low);
        assert_eq!(PowerBand::for_power(34), PowerBand::Medium);
        assert_eq!(PowerBand::for_power(66), PowerBand::Medium);
        assert_eq!(PowerBand::for_power(67), PowerBand::High);
    }

    #[test]
    fn test_idle_hud() {
        let session = Session::new(12, || {});
        let hud = HudSnapshot::capture(session.game(), &Settings::default());
        assert_eq!(hud.health_label, "Ravan's Power: 100%");
        assert_eq!(hud.stats_label, "Arrows Hit: 0 | Blessings Power: +12");
        assert_eq!(hud.angle_label, "Bow Angle: 45°");
        assert_eq!(hud.power_label, "Power: 50%");
        assert_eq!(hud.power_band, PowerBand::Medium);
        assert_eq!(hud.button_label, "Hold to Charge");
        assert!(!hud.controls_locked);
        assert!(hud.launch_enabled);
        assert!(hud.arrow.is_none());
        assert!(!hud.burning);
    }

    #[test]
    fn test_bonus_hidden() {
        let session = Session::new(12, || {});
        let settings = Settings {
            show_bonus: false,
            ..Default::default()
        };
        let hud = HudSnapshot::capture(session.game(), &settings);
        assert_eq!(hud.stats_label, "Arrows Hit: 0");
    }

    #[test]
    fn test_charging_and_flying_hud() {
        let mut session = Session::new(0, || {});
        session.press();
        session.advance(20 * CHARGE_TICK_MS);
        let hud = HudSnapshot::capture(session.game(), &Settings::default());
        assert_eq!(hud.button_label, "Release to Shoot!");
        assert_eq!(hud.power, 40);
        assert!(hud.controls_locked);
        assert!(hud.launch_enabled);

        session.release();
        session.advance(FLIGHT_TICK_MS);
        let hud = HudSnapshot::capture(session.game(), &Settings::default());
        assert_eq!(hud.button_label, "Hold to Charge");
        assert!(!hud.launch_enabled);
        let arrow = hud.arrow.expect("arrow drawn in flight");
        assert!(arrow.x > ARCHER_ORIGIN.x);
        assert_eq!(hud.arrow_rotation, DEFAULT_ANGLE);
    }

    #[test]
    fn test_burning_respects_reduced_motion() {
        let mut session = Session::new(0, || {});
        for _ in 0..4 {
            session.shoot(30, 31);
        }
        let calm = Settings {
            reduced_motion: true,
            ..Default::default()
        };
        let hud = HudSnapshot::capture(session.game(), &calm);
        assert!(hud.burning);
        assert!(!hud.shaking);
        assert!(!hud.victory);
        assert_eq!(hud.health_label, "Ravan's Power: 0%");

        let hud = HudSnapshot::capture(session.game(), &Settings::default());
        assert!(hud.shaking);

        session.advance(BURNING_MS);
        let hud = HudSnapshot::capture(session.game(), &Settings::default());
        assert!(hud.victory);
        assert!(!hud.launch_enabled);
    }
}
