//! The in-flight ball and its per-tick physics
//!
//! Motion is frame-coupled: each tick adds the velocity once. There is no
//! bottom wall, only the two side walls and the ceiling reflect.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::grid::BallColor;
use crate::consts::BALL_RADIUS;
use crate::direction;

/// Which walls the projectile bounced off during a step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounce {
    /// Left or right wall
    pub side: bool,
    pub ceiling: bool,
}

impl Bounce {
    pub fn any(&self) -> bool {
        self.side || self.ceiling
    }
}

/// A ball in flight
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub pos: Vec2,
    /// Displacement per tick
    pub vel: Vec2,
    pub color: BallColor,
}

impl Projectile {
    /// Launch from `origin` along `angle` (radians, screen coordinates)
    pub fn launch(origin: Vec2, angle: f32, color: BallColor, speed: f32) -> Self {
        Self {
            pos: origin,
            vel: direction(angle) * speed,
            color,
        }
    }

    /// Integrate one tick, then reflect off walls
    pub fn advance(&mut self, arena_width: f32) -> Bounce {
        self.pos += self.vel;
        self.reflect_off_walls(arena_width)
    }

    /// Elastic reflection: flips the velocity component facing a touched wall.
    /// Position is not corrected.
    pub fn reflect_off_walls(&mut self, arena_width: f32) -> Bounce {
        let mut bounce = Bounce::default();
        if self.pos.x <= BALL_RADIUS || self.pos.x >= arena_width - BALL_RADIUS {
            self.vel.x = -self.vel.x;
            bounce.side = true;
        }
        if self.pos.y <= BALL_RADIUS {
            self.vel.y = -self.vel.y;
            bounce.ceiling = true;
        }
        bounce
    }

    /// Whether the ball has fully left the arena through the bottom edge
    pub fn below_floor(&self, arena_height: f32) -> bool {
        self.pos.y - BALL_RADIUS > arena_height
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.vel.length()
    }
}
