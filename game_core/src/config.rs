use crate::{Params, Side};
use glam::Vec2;

/// Game configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub field_width: f32,
    pub field_height: f32,
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub player_smoothing: f32,
    pub ball_radius: f32,
    pub ball_speed_initial: f32,
    pub ball_speed_max: f32,
    pub ball_speed_increase: f32,
    pub wall_damping: f32,
    pub paddle_deflection: f32,
    pub ai_deadband: f32,
    pub win_score: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            field_width: Params::FIELD_WIDTH,
            field_height: Params::FIELD_HEIGHT,
            paddle_width: Params::PADDLE_WIDTH,
            paddle_height: Params::PADDLE_HEIGHT,
            player_smoothing: Params::PLAYER_SMOOTHING,
            ball_radius: Params::BALL_RADIUS,
            ball_speed_initial: Params::BALL_SPEED_INITIAL,
            ball_speed_max: Params::BALL_SPEED_MAX,
            ball_speed_increase: Params::BALL_SPEED_INCREASE,
            wall_damping: Params::WALL_DAMPING,
            paddle_deflection: Params::PADDLE_DEFLECTION,
            ai_deadband: Params::AI_DEADBAND,
            win_score: Params::WIN_SCORE,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Field center (ball spawn point and burst origin)
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.field_width / 2.0, self.field_height / 2.0)
    }

    /// Top edge of a paddle that is vertically centered in the field
    pub fn paddle_spawn_y(&self) -> f32 {
        (self.field_height - self.paddle_height) / 2.0
    }

    /// Lowest legal top edge for a paddle
    pub fn paddle_max_y(&self) -> f32 {
        self.field_height - self.paddle_height
    }

    /// Clamp a paddle's top edge to the field
    pub fn clamp_paddle_y(&self, y: f32) -> f32 {
        if y.is_nan() {
            return self.paddle_spawn_y();
        }
        y.clamp(0.0, self.paddle_max_y())
    }

    /// Paddle target for a pointer at `local_y` (field units from the top)
    ///
    /// The paddle centers on the pointer; out-of-range input is clamped.
    pub fn pointer_target_y(&self, local_y: f32) -> f32 {
        self.clamp_paddle_y(local_y - self.paddle_height / 2.0)
    }

    /// X of the plane the ball center must reach to touch a paddle face
    pub fn paddle_face_x(&self, side: Side) -> f32 {
        match side {
            Side::Player => self.paddle_width + self.ball_radius,
            Side::Ai => self.field_width - self.paddle_width - self.ball_radius,
        }
    }

    /// Left edge of the paddle rectangle
    pub fn paddle_x(&self, side: Side) -> f32 {
        match side {
            Side::Player => 0.0,
            Side::Ai => self.field_width - self.paddle_width,
        }
    }
}
