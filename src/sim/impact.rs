//! Impact detection against Ravan's hitbox
//!
//! The hitbox is an axis-aligned rectangle around the effigy centre. It reaches
//! further below the centre than above it so arrows dropping onto the body
//! register.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Axis-aligned target rectangle in scene coordinates (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hitbox {
    pub center: Vec2,
    pub half_width: f32,
    /// Extent above the centre (towards smaller y)
    pub above: f32,
    /// Extent below the centre (towards larger y)
    pub below: f32,
}

impl Default for Hitbox {
    fn default() -> Self {
        Self {
            center: TARGET_CENTER,
            half_width: HITBOX_HALF_WIDTH,
            above: HITBOX_ABOVE,
            below: HITBOX_BELOW,
        }
    }
}

impl Hitbox {
    /// Top-left corner (smallest x and y)
    #[inline]
    pub fn min(&self) -> Vec2 {
        Vec2::new(self.center.x - self.half_width, self.center.y - self.above)
    }

    /// Bottom-right corner (largest x and y)
    #[inline]
    pub fn max(&self) -> Vec2 {
        Vec2::new(self.center.x + self.half_width, self.center.y + self.below)
    }

    /// Whether a point lies inside the rectangle (edges inclusive)
    pub fn contains(&self, pos: Vec2) -> bool {
        let min = self.min();
        let max = self.max();
        pos.x >= min.x && pos.x <= max.x && pos.y >= min.y && pos.y <= max.y
    }
}

/// Whether a point has left the visible scene through the right or bottom edge
///
/// Arrows may rise above the top edge and come back, so y < 0 is not an exit.
#[inline]
pub fn out_of_bounds(pos: Vec2) -> bool {
    pos.y > SCENE_EXTENT || pos.x > SCENE_EXTENT
}
