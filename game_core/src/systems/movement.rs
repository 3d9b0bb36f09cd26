use crate::{Ball, Config, Paddle, Side};
use hecs::World;

/// Ease the player paddle toward the pointer target
pub fn smooth_player_paddle(world: &mut World, target_y: f32, config: &Config) {
    let target_y = config.clamp_paddle_y(target_y);
    for (_entity, paddle) in world.query_mut::<&mut Paddle>() {
        if paddle.side == Side::Player {
            paddle.y += (target_y - paddle.y) * config.player_smoothing;
            paddle.y = config.clamp_paddle_y(paddle.y);
        }
    }
}

/// Move ball by one frame of velocity
pub fn move_ball(world: &mut World) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        ball.pos += ball.vel;
    }
}
