use crate::{AiSettings, Ball, Config, GameRng, Paddle, Side};
use hecs::World;

/// Ball height when it reaches the AI's end of the field, by straight-line extrapolation
///
/// Walls are ignored, so a steep ball can predict far outside the field; the
/// caller clamps the result.
pub fn predict_ball_y(ball: &Ball, config: &Config) -> f32 {
    ball.pos.y + ball.vel.y * (config.field_width - ball.pos.x) / ball.vel.x
}

/// Where the AI wants its paddle center to be this frame
///
/// Strategy:
/// 1. Ball coming toward us: aim at the predicted height plus a random error
///    scaled by the tier's prediction error.
/// 2. Ball moving away: drift back to the middle of the field.
pub fn ai_target_y(ball: &Ball, settings: AiSettings, config: &Config, rng: &mut GameRng) -> f32 {
    // Drawn every frame so the RNG stream does not depend on ball direction
    let error = (rng.unit() - 0.5) * config.field_height * settings.prediction_error;

    if ball.vel.x > 0.0 {
        let half = config.paddle_height / 2.0;
        (predict_ball_y(ball, config) + error).clamp(half, config.field_height - half)
    } else {
        config.field_height / 2.0
    }
}

/// Step an AI paddle one frame toward `target_y`
///
/// Speed is tied to the ball's horizontal speed; a small deadband keeps the
/// paddle from jittering once it is close enough.
pub fn step_ai_paddle(
    paddle_y: f32,
    target_y: f32,
    ball_vx: f32,
    settings: AiSettings,
    config: &Config,
) -> f32 {
    let center = paddle_y + config.paddle_height / 2.0;
    let speed = ball_vx.abs() * settings.speed_factor;

    let mut y = paddle_y;
    if (center - target_y).abs() > config.ai_deadband {
        y += if center < target_y { speed } else { -speed };
    }
    config.clamp_paddle_y(y)
}

/// Update the AI paddle from the current ball state
pub fn update_ai(world: &mut World, settings: AiSettings, config: &Config, rng: &mut GameRng) {
    let ball = match world.query::<&Ball>().iter().next().map(|(_e, b)| *b) {
        Some(ball) => ball,
        None => return,
    };

    let target_y = ai_target_y(&ball, settings, config, rng);

    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == Side::Ai {
            paddle.y = step_ai_paddle(paddle.y, target_y, ball.vel.x, settings, config);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{create_ball, create_paddle, Difficulty};
    use glam::Vec2;

    fn ai_y(world: &World) -> f32 {
        world
            .query::<&Paddle>()
            .iter()
            .find(|(_e, p)| p.side == Side::Ai)
            .map(|(_e, p)| p.y)
            .unwrap()
    }

    #[test]
    fn test_prediction_is_linear_extrapolation() {
        let config = Config::new();
        let ball = Ball::new(Vec2::new(600.0, 300.0), Vec2::new(6.0, 1.0));
        // 600 units to go at 6/frame = 100 frames, 1 unit down per frame
        assert!((predict_ball_y(&ball, &config) - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_impossible_tracks_prediction_exactly() {
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let ball = Ball::new(Vec2::new(600.0, 300.0), Vec2::new(6.0, 1.0));
        let target = ai_target_y(&ball, Difficulty::Impossible.settings(), &config, &mut rng);
        assert!((target - 400.0).abs() < 1e-3);
    }

    #[test]
    fn test_target_returns_to_center_when_ball_moves_away() {
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let ball = Ball::new(Vec2::new(600.0, 100.0), Vec2::new(-6.0, 3.0));
        for difficulty in Difficulty::ALL {
            let target = ai_target_y(&ball, difficulty.settings(), &config, &mut rng);
            assert_eq!(target, 300.0);
        }
    }

    #[test]
    fn test_target_error_bounded_by_tier() {
        let config = Config::new();
        let mut rng = GameRng::new(42);
        let ball = Ball::new(Vec2::new(600.0, 300.0), Vec2::new(7.0, 0.0));
        let settings = Difficulty::Hard.settings();
        // Hard: ±0.1 * 600 / 2 = ±30 around 300
        for _ in 0..500 {
            let target = ai_target_y(&ball, settings, &config, &mut rng);
            assert!((270.0..=330.0).contains(&target));
        }
    }

    #[test]
    fn test_target_is_clamped_to_paddle_centers() {
        let config = Config::new();
        let mut rng = GameRng::new(1);
        let ball = Ball::new(Vec2::new(100.0, 500.0), Vec2::new(2.0, 9.0));
        let target = ai_target_y(&ball, Difficulty::Impossible.settings(), &config, &mut rng);
        assert_eq!(target, 550.0);
    }

    #[test]
    fn test_deadband_holds_still() {
        let config = Config::new();
        let settings = Difficulty::Impossible.settings();
        // Center at 300, target 304: inside the 5-unit deadband
        assert_eq!(step_ai_paddle(250.0, 304.0, 10.0, settings, &config), 250.0);
        assert_eq!(step_ai_paddle(250.0, 306.0, 10.0, settings, &config), 260.0);
        assert_eq!(step_ai_paddle(250.0, 200.0, -10.0, settings, &config), 240.0);
    }

    #[test]
    fn test_easy_ai_moves_at_forty_percent_of_ball_speed() {
        let mut world = World::new();
        let config = Config::new();
        let mut rng = GameRng::new(5);
        create_paddle(&mut world, Side::Ai, 0.0);
        create_ball(&mut world, config.center(), Vec2::new(7.0, 0.0));

        let settings = Difficulty::Easy.settings();
        let mut last = ai_y(&world);
        for _ in 0..10 {
            update_ai(&mut world, settings, &config, &mut rng);
            let y = ai_y(&world);
            let moved = y - last;
            assert!(moved <= 7.0 * 0.4 + 1e-4, "never faster than 0.4x ball speed");
            assert!((moved - 2.8).abs() < 1e-4, "moving down toward the ball");
            last = y;
        }
    }

    #[test]
    fn test_ai_paddle_stays_in_field() {
        let config = Config::new();
        let settings = Difficulty::Impossible.settings();
        assert_eq!(step_ai_paddle(2.0, 0.0, 18.0, settings, &config), 0.0);
        assert_eq!(step_ai_paddle(495.0, 600.0, 18.0, settings, &config), 500.0);
    }
}
