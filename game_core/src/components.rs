use glam::Vec2;
use rand::Rng;

/// Which end of the field an entity belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Player, // left, pointer controlled
    Ai,     // right, driven by the AI controller
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }

    /// Horizontal direction pointing at this side's goal
    pub fn direction(self) -> f32 {
        match self {
            Side::Player => -1.0,
            Side::Ai => 1.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Ai => "AI",
        }
    }
}

/// Paddle component
#[derive(Debug, Clone, Copy)]
pub struct Paddle {
    pub side: Side,
    pub y: f32, // top edge, clamped to [0, field_height - paddle_height]
}

impl Paddle {
    pub fn new(side: Side, y: f32) -> Self {
        Self { side, y }
    }
}

/// Ball component - the pong ball
#[derive(Debug, Clone, Copy)]
pub struct Ball {
    pub pos: Vec2,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(pos: Vec2, vel: Vec2) -> Self {
        Self { pos, vel }
    }

    pub fn speed(&self) -> f32 {
        self.vel.length()
    }

    /// Re-serve from `center` toward `toward` at a random angle within ±45°
    pub fn reset(&mut self, center: Vec2, speed: f32, toward: Side, rng: &mut crate::GameRng) {
        self.pos = center;
        let max = crate::Params::LAUNCH_ANGLE_MAX;
        let angle: f32 = rng.0.gen_range(-max..=max);
        self.vel = Vec2::new(angle.cos() * toward.direction(), angle.sin()) * speed;
    }
}
