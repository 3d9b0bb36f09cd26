use crate::{Ball, Config, Events, GameRng, Score, Side};
use hecs::World;

/// Check if ball left the field (scoring)
pub fn check_scoring(
    world: &mut World,
    config: &Config,
    score: &mut Score,
    events: &mut Events,
    rng: &mut GameRng,
) {
    for (_entity, ball) in world.query_mut::<&mut Ball>() {
        let scorer = if ball.pos.x <= 0.0 {
            Side::Ai
        } else if ball.pos.x >= config.field_width {
            Side::Player
        } else {
            continue;
        };

        score.increment(scorer);
        events.scored = Some(scorer);

        // Serve toward the side that conceded
        ball.reset(
            config.center(),
            config.ball_speed_initial,
            scorer.opponent(),
            rng,
        );
    }
}
