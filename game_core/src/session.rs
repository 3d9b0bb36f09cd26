//! One match from serve to win

use crate::{
    build_frame, create_ball, create_paddle, step, Ball, Config, Difficulty, DrawCmd, Events,
    GameRng, Paddle, Particles, Score, Side,
};
use glam::Vec2;
use hecs::World;

/// Outcome of advancing the match by one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Keep playing; render and schedule another frame
    Continue,
    /// Match decided this frame; do not render the field or schedule again
    Won(Side),
}

/// Everything owned by a single match session
///
/// Created when a match starts and dropped when the player returns to the menu.
pub struct MatchState {
    pub world: World,
    pub config: Config,
    pub difficulty: Difficulty,
    pub score: Score,
    pub events: Events,
    pub particles: Particles,
    pub rng: GameRng,
    pub pointer_target_y: f32,
    pub frame: u64,
    winner: Option<Side>,
}

impl MatchState {
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_config(Config::new(), difficulty, seed)
    }

    pub fn with_config(config: Config, difficulty: Difficulty, seed: u64) -> Self {
        let mut world = World::new();
        let mut rng = GameRng::new(seed);

        let paddle_y = config.paddle_spawn_y();
        create_paddle(&mut world, Side::Player, paddle_y);
        create_paddle(&mut world, Side::Ai, paddle_y);

        // Opening serve goes toward the AI
        let mut ball = Ball::new(Vec2::ZERO, Vec2::ZERO);
        ball.reset(config.center(), config.ball_speed_initial, Side::Ai, &mut rng);
        create_ball(&mut world, ball.pos, ball.vel);

        Self {
            world,
            pointer_target_y: paddle_y,
            config,
            difficulty,
            score: Score::new(),
            events: Events::new(),
            particles: Particles::new(),
            rng,
            frame: 0,
            winner: None,
        }
    }

    /// Record a new pointer-derived paddle target (top edge, field units)
    pub fn set_pointer_target(&mut self, y: f32) {
        self.pointer_target_y = self.config.clamp_paddle_y(y);
    }

    /// Advance one frame; a finished match stays finished
    pub fn advance(&mut self) -> FrameOutcome {
        if let Some(winner) = self.winner {
            return FrameOutcome::Won(winner);
        }

        self.frame += 1;
        let won = step(
            &mut self.world,
            &self.config,
            self.difficulty.settings(),
            self.pointer_target_y,
            &mut self.score,
            &mut self.events,
            &mut self.particles,
            &mut self.rng,
        );

        match won {
            Some(side) => {
                self.winner = Some(side);
                FrameOutcome::Won(side)
            }
            None => FrameOutcome::Continue,
        }
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn ball(&self) -> Option<Ball> {
        self.world.query::<&Ball>().iter().next().map(|(_e, b)| *b)
    }

    pub fn paddle_y(&self, side: Side) -> Option<f32> {
        self.world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == side)
            .map(|(_e, p)| p.y)
    }

    /// Display list for the current state
    pub fn draw_list(&self) -> Vec<DrawCmd> {
        build_frame(&self.world, &self.score, &self.particles, &self.config)
    }
}
