//! Scene composition: what gets drawn for a session, in which order

use super::{FontSize, HUD_COLOUR, RenderSurface, Sprite};
use crate::sim::random::RandomSource;
use crate::sim::{EntityKind, GameSession};

/// HUD text anchors in screen pixels
pub const SCORE_TEXT_POS: (i32, i32) = (100, 100);
pub const LIVES_TEXT_POS: (i32, i32) = (600, 100);

/// Backdrop only (title and level banner screens)
pub fn render_background_only<R: RandomSource>(
    session: &GameSession<R>,
    surface: &mut impl RenderSurface,
) {
    surface.draw_background(session.tuning().half_extents());
}

/// Backdrop, ship, asteroids, bullets, explosions, then the HUD
pub fn render_everything<R: RandomSource>(
    session: &GameSession<R>,
    surface: &mut impl RenderSurface,
) {
    render_background_only(session, surface);

    if let Some(ship) = session.ship() {
        surface.draw_sprite(&Sprite {
            kind: EntityKind::Ship,
            pos: ship.body.pos,
            heading: ship.heading,
            radius: ship.body.radius,
        });
    }

    for (_, asteroid) in session.asteroids() {
        surface.draw_sprite(&Sprite {
            kind: EntityKind::Asteroid,
            pos: asteroid.body.pos,
            heading: 0.0,
            radius: asteroid.body.radius,
        });
    }

    for (_, bullet) in session.bullets() {
        surface.draw_sprite(&Sprite {
            kind: EntityKind::Bullet,
            pos: bullet.body.pos,
            heading: 0.0,
            radius: bullet.body.radius,
        });
    }

    for explosion in session.explosions() {
        surface.draw_sprite(&Sprite {
            kind: EntityKind::Explosion,
            pos: explosion.pos,
            heading: 0.0,
            radius: explosion.scale,
        });
    }

    let score = format!("Score :  {}", session.score);
    surface.draw_text(
        &score,
        SCORE_TEXT_POS.0,
        SCORE_TEXT_POS.1,
        HUD_COLOUR,
        FontSize::Medium,
    );

    let lives = format!("Lives :  {}", session.lives);
    surface.draw_text(
        &lives,
        LIVES_TEXT_POS.0,
        LIVES_TEXT_POS.1,
        HUD_COLOUR,
        FontSize::Medium,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, DrawList};
    use crate::tuning::Tuning;
    use glam::Vec2;

    #[test]
    fn test_render_everything_draws_each_entity_and_hud() {
        let mut session = GameSession::new(Tuning::default(), 1);
        session.initialise_level(3);
        session.spawn_bullet(Vec2::new(10.0, 10.0), Vec2::Y);
        session.score = 42;

        let mut list = DrawList::new();
        render_everything(&session, &mut list);

        assert!(matches!(list.commands[0], DrawCommand::Background { .. }));
        assert_eq!(list.sprite_count(EntityKind::Ship), 1);
        assert_eq!(list.sprite_count(EntityKind::Asteroid), 3);
        assert_eq!(list.sprite_count(EntityKind::Bullet), 1);
        assert_eq!(list.texts(), vec!["Score :  42", "Lives :  3"]);
    }

    #[test]
    fn test_hud_position_and_colour() {
        let session = GameSession::new(Tuning::default(), 1);
        let mut list = DrawList::new();
        render_everything(&session, &mut list);

        let lives = list
            .commands
            .iter()
            .find_map(|c| match c {
                DrawCommand::Text {
                    text, x, y, colour, ..
                } if text.starts_with("Lives") => Some((*x, *y, *colour)),
                _ => None,
            })
            .expect("lives overlay");
        assert_eq!(lives, (600, 100, 0xff00ffff));
    }

    #[test]
    fn test_background_only() {
        let mut session = GameSession::new(Tuning::default(), 1);
        session.initialise_level(2);
        let mut list = DrawList::new();
        render_background_only(&session, &mut list);
        assert_eq!(list.commands.len(), 1);
    }
}
