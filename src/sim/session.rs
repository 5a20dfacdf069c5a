//! Level progression across a run
//!
//! A session builds level after level from one seed. Clearing a level raises
//! the difficulty and builds the next one with the same ship, so score and
//! lives carry over. Running out of lives ends the session.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::level::{AsteroidCounts, GameEvent, Level};
use super::ship::Ship;
use super::tick::TickInput;
use crate::error::Result;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct Session {
    tuning: Tuning,
    /// Seeds each level in turn
    rng: Pcg32,
    difficulty: u32,
    level_number: u32,
    level: Level,
    over: bool,
    events: Vec<GameEvent>,
}

impl Session {
    /// Start a run at level 1 with the tuning's starting lives and difficulty
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self> {
        tuning.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);
        let ship = Ship::new(Vec2::ZERO, tuning.ship, tuning.pellet)?;
        let difficulty = tuning.starting_difficulty;
        let level = Level::generate(
            &tuning,
            ship,
            tuning.lives,
            AsteroidCounts::for_difficulty(difficulty),
            rng.random(),
        )?;
        log::info!("Level 1 started (difficulty {difficulty})");

        Ok(Self {
            tuning,
            rng,
            difficulty,
            level_number: 1,
            level,
            over: false,
            events: vec![GameEvent::LevelStarted { number: 1 }],
        })
    }

    /// Advance the current level one frame, then move on if it was won or
    /// lost. A win is checked first.
    pub fn tick(&mut self, input: &TickInput, dt: f32) {
        self.events.clear();
        if self.over {
            return;
        }

        self.level.tick(input, dt);
        self.events.extend_from_slice(self.level.events());

        if self.level.win() {
            self.advance_level();
        } else if self.level.lose() {
            self.over = true;
            log::info!(
                "Game over on level {} with score {}",
                self.level_number,
                self.final_score()
            );
        }
    }

    /// The tuning was validated in `new`, so building the next level
    /// cannot fail
    fn advance_level(&mut self) {
        self.difficulty += 1;
        self.level_number += 1;
        let mut next = Level::from_validated(
            &self.tuning,
            self.level.ship.clone(),
            self.level.lives(),
            self.rng.random(),
        );
        next.spawn_field(AsteroidCounts::for_difficulty(self.difficulty));
        self.level = next;
        log::info!(
            "Level {} started (difficulty {}, score {})",
            self.level_number,
            self.difficulty,
            self.final_score()
        );
        self.events.push(GameEvent::LevelStarted {
            number: self.level_number,
        });
    }

    #[inline]
    pub fn level(&self) -> &Level {
        &self.level
    }

    #[inline]
    pub fn level_mut(&mut self) -> &mut Level {
        &mut self.level
    }

    #[inline]
    pub fn level_number(&self) -> u32 {
        self.level_number
    }

    #[inline]
    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    #[inline]
    pub fn is_over(&self) -> bool {
        self.over
    }

    pub fn final_score(&self) -> u64 {
        self.level.score()
    }

    /// Events from the most recent tick, including level transitions
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }
}
