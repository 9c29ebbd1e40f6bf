//! Top-level frame driver
//!
//! Owns the session and decides, per frame, whether it is simulated. The
//! session knows nothing about title screens or level numbers.

use rand_pcg::Pcg32;

use super::input::TickInput;
use super::random::RandomSource;
use super::state::GameSession;
use crate::renderer::{self, FontSize, HUD_COLOUR, RenderSurface};
use crate::tuning::Tuning;

/// Current phase of play
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Waiting for fire to start a run
    Title,
    /// "Level N" banner, asteroids not yet spawned
    LevelStart { frames_left: u32 },
    /// Active gameplay
    Playing,
    /// Run ended, holding the game over screen
    GameOver { frames_left: u32 },
}

/// Drives a session through title, levels and game over
#[derive(Debug, Clone)]
pub struct FrameDriver<R = Pcg32> {
    session: GameSession<R>,
    phase: GamePhase,
    /// 0-based level index
    level: u32,
}

impl FrameDriver<Pcg32> {
    pub fn new(tuning: Tuning, seed: u64) -> Self {
        Self::with_session(GameSession::new(tuning, seed))
    }
}

impl<R: RandomSource> FrameDriver<R> {
    pub fn with_session(session: GameSession<R>) -> Self {
        Self {
            session,
            phase: GamePhase::Title,
            level: 0,
        }
    }

    #[inline]
    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    /// 0-based level index
    #[inline]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[inline]
    pub fn session(&self) -> &GameSession<R> {
        &self.session
    }

    #[inline]
    pub fn session_mut(&mut self) -> &mut GameSession<R> {
        &mut self.session
    }

    /// Advance one frame and return the phase afterwards
    pub fn step(&mut self, input: &TickInput) -> GamePhase {
        let next = match self.phase {
            GamePhase::Title => {
                if input.fire {
                    self.start_run();
                    self.banner()
                } else {
                    GamePhase::Title
                }
            }

            GamePhase::LevelStart { frames_left } => {
                if frames_left <= 1 {
                    let count = self.session.tuning().asteroids_for_level(self.level);
                    self.session.initialise_level(count);
                    log::info!("Level {} started with {} asteroids", self.level + 1, count);
                    GamePhase::Playing
                } else {
                    GamePhase::LevelStart {
                        frames_left: frames_left - 1,
                    }
                }
            }

            GamePhase::Playing => {
                self.session.update(input);

                if self.session.is_game_over() {
                    log::info!("Game over on level {}", self.level + 1);
                    GamePhase::GameOver {
                        frames_left: self.session.tuning().game_over_frames,
                    }
                } else if self.session.is_level_complete() {
                    log::info!(
                        "Level {} complete, score {}",
                        self.level + 1,
                        self.session.score
                    );
                    self.level += 1;
                    self.banner()
                } else {
                    GamePhase::Playing
                }
            }

            GamePhase::GameOver { frames_left } => {
                if frames_left <= 1 {
                    GamePhase::Title
                } else {
                    GamePhase::GameOver {
                        frames_left: frames_left - 1,
                    }
                }
            }
        };

        if next != self.phase {
            log::debug!("Phase {:?} -> {:?}", self.phase, next);
        }
        self.phase = next;
        next
    }

    fn start_run(&mut self) {
        self.level = 0;
        self.session.lives = self.session.tuning().starting_lives;
        self.session.score = 0;
        self.session.delete_all_bullets();
        log::info!("New run (seed {})", self.session.seed);
    }

    fn banner(&self) -> GamePhase {
        GamePhase::LevelStart {
            frames_left: self.session.tuning().level_banner_frames.max(1),
        }
    }

    /// Draw the current phase
    pub fn render(&self, surface: &mut impl RenderSurface) {
        match self.phase {
            GamePhase::Title => {
                renderer::render_background_only(&self.session, surface);
                self.centred_text(surface, "ROID RUSH", -40, FontSize::Large);
                self.centred_text(surface, "Press fire to start", 20, FontSize::Medium);
            }
            GamePhase::LevelStart { .. } => {
                renderer::render_background_only(&self.session, surface);
                let text = format!("Level {}", self.level + 1);
                self.centred_text(surface, &text, 0, FontSize::Large);
            }
            GamePhase::Playing => {
                renderer::render_everything(&self.session, surface);
            }
            GamePhase::GameOver { .. } => {
                renderer::render_everything(&self.session, surface);
                self.centred_text(surface, "Game Over", 0, FontSize::Large);
            }
        }
    }

    /// Text centred horizontally, `dy` pixels below screen centre
    fn centred_text(&self, surface: &mut impl RenderSurface, text: &str, dy: i32, font: FontSize) {
        let half = self.session.tuning().half_extents();
        // Screen pixels match world units
        let (cx, cy) = (half.x as i32, half.y as i32);
        let x = cx - surface.text_width(text, font) / 2;
        surface.draw_text(text, x, cy + dy, HUD_COLOUR, font);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::DrawList;
    use crate::sim::EntityRef;
    use glam::Vec2;

    fn quick_tuning() -> Tuning {
        Tuning {
            level_banner_frames: 3,
            game_over_frames: 4,
            first_level_asteroids: 2,
            ..Tuning::default()
        }
    }

    fn fire() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    fn run(driver: &mut FrameDriver, frames: u32) {
        for _ in 0..frames {
            driver.step(&TickInput::default());
        }
    }

    #[test]
    fn test_title_waits_for_fire() {
        let mut driver = FrameDriver::new(quick_tuning(), 9);
        run(&mut driver, 10);
        assert_eq!(driver.phase(), GamePhase::Title);
        driver.step(&fire());
        assert!(matches!(driver.phase(), GamePhase::LevelStart { .. }));
    }

    #[test]
    fn test_banner_then_level_spawns() {
        let mut driver = FrameDriver::new(quick_tuning(), 9);
        driver.step(&fire());
        run(&mut driver, 2);
        assert!(matches!(driver.phase(), GamePhase::LevelStart { .. }));
        assert_eq!(driver.session().asteroid_count(), 0);
        run(&mut driver, 1);
        assert_eq!(driver.phase(), GamePhase::Playing);
        assert_eq!(driver.session().asteroid_count(), 2);
        assert!(driver.session().ship().is_some());
    }

    #[test]
    fn test_level_complete_advances_with_more_asteroids() {
        let tuning = Tuning {
            explosion_frames: 0,
            ..quick_tuning()
        };
        let mut driver = FrameDriver::new(tuning, 9);
        driver.step(&fire());
        run(&mut driver, 3);
        assert_eq!(driver.phase(), GamePhase::Playing);

        driver.session_mut().asteroids.clear();
        run(&mut driver, 1);
        assert_eq!(driver.level(), 1);
        assert!(matches!(driver.phase(), GamePhase::LevelStart { .. }));

        run(&mut driver, 3);
        assert_eq!(driver.phase(), GamePhase::Playing);
        assert_eq!(driver.session().asteroid_count(), 3);
    }

    #[test]
    fn test_game_over_returns_to_title() {
        let tuning = Tuning {
            explosion_frames: 0,
            ..quick_tuning()
        };
        let mut driver = FrameDriver::new(tuning, 9);
        driver.step(&fire());
        run(&mut driver, 3);

        let session = driver.session_mut();
        session.lives = 1;
        let asteroid = session.spawn_asteroid_at(Vec2::ZERO, 1);
        session.do_collision(EntityRef::Ship, EntityRef::Asteroid(asteroid));
        assert!(session.ship().is_none());

        run(&mut driver, 1);
        assert!(matches!(driver.phase(), GamePhase::GameOver { .. }));
        run(&mut driver, 4);
        assert_eq!(driver.phase(), GamePhase::Title);
    }

    #[test]
    fn test_new_run_clears_leftover_bullets() {
        let tuning = Tuning {
            explosion_frames: 0,
            ..quick_tuning()
        };
        let mut driver = FrameDriver::new(tuning, 9);
        driver.step(&fire());
        run(&mut driver, 3);

        // Bullets still in flight when the last life goes
        let session = driver.session_mut();
        session.asteroids.clear();
        session.spawn_bullet(Vec2::new(-300.0, -200.0), Vec2::Y);
        session.lives = 1;
        let asteroid = session.spawn_asteroid_at(Vec2::ZERO, 1);
        session.do_collision(EntityRef::Ship, EntityRef::Asteroid(asteroid));
        run(&mut driver, 5);
        assert_eq!(driver.phase(), GamePhase::Title);
        assert_eq!(driver.session().bullet_count(), 1);

        driver.step(&fire());
        assert_eq!(driver.session().bullet_count(), 0);
    }

    #[test]
    fn test_render_per_phase() {
        let mut driver = FrameDriver::new(quick_tuning(), 9);
        let mut list = DrawList::new();
        driver.render(&mut list);
        assert!(list.texts().contains(&"Press fire to start"));

        driver.step(&fire());
        list.clear();
        driver.render(&mut list);
        assert_eq!(list.texts(), vec!["Level 1"]);

        run(&mut driver, 3);
        list.clear();
        driver.render(&mut list);
        assert!(list.texts().contains(&"Lives :  3"));
    }
}
