//! Masteroids headless demo
//!
//! Plays a run with a scripted autopilot under a fixed-interval frame
//! governor, then records the final score on the leaderboard.
//!
//! Usage: `masteroids [SEED] [LEADERBOARD_PATH] [TUNING_JSON]`
//! Set `RUST_LOG=info` (or `debug`) to follow the run.

use masteroids::sim::{Level, Session, TickInput};
use masteroids::{Leaderboard, Result, Tuning, wrap_angle};

/// Seed used when none is given
const DEFAULT_SEED: u64 = 42;
/// Leaderboard file used when none is given
const DEFAULT_LEADERBOARD: &str = "leader.board";
/// Synthetic display refresh fed to the governor (seconds)
const DISPLAY_DT: f32 = 1.0 / 60.0;
/// Stop the demo after this many simulated frames
const MAX_FRAMES: u64 = 24 * 60 * 5;
/// Name recorded for the autopilot
const PLAYER_NAME: &str = "CPU";

/// Steps the simulation once per frame interval, no matter how often the
/// display refreshes
struct Governor {
    interval: f32,
    accumulator: f32,
}

impl Governor {
    fn new(interval: f32) -> Self {
        Self {
            interval,
            accumulator: 0.0,
        }
    }

    /// Add elapsed time; returns true when a frame is due
    fn advance(&mut self, elapsed: f32) -> bool {
        // Clamp huge stalls so we never owe more than one frame
        self.accumulator = (self.accumulator + elapsed).min(self.interval * 2.0);
        if self.accumulator >= self.interval {
            self.accumulator -= self.interval;
            true
        } else {
            false
        }
    }
}

/// Turn toward the nearest asteroid and keep firing
fn autopilot(level: &Level) -> TickInput {
    let mut input = TickInput {
        // Each level starts paused; a press gets it going
        pause: level.is_paused(),
        fire: true,
        halt: true,
        ..Default::default()
    };

    let ship = &level.ship;
    let position = ship.body.center();
    let nearest = level.asteroids.iter().min_by(|a, b| {
        let da = a.body.center().distance_squared(position);
        let db = b.body.center().distance_squared(position);
        da.total_cmp(&db)
    });
    let Some(target) = nearest else {
        return input;
    };

    let offset = target.body.center() - position;
    let delta = wrap_angle(offset.y.atan2(offset.x) - ship.facing());
    let step = ship.spec().angular_speed * level.tuning().frame_dt;
    if delta > step / 2.0 && delta < std::f32::consts::TAU - step / 2.0 {
        if delta < std::f32::consts::PI {
            input.rotate_right = true;
        } else {
            input.rotate_left = true;
        }
    }
    input
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed = match args.next() {
        Some(s) => s.parse().unwrap_or_else(|_| {
            log::warn!("Ignoring bad seed {s:?}, using {DEFAULT_SEED}");
            DEFAULT_SEED
        }),
        None => DEFAULT_SEED,
    };
    let board_path = args.next().unwrap_or_else(|| DEFAULT_LEADERBOARD.to_string());
    let tuning = match args.next() {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    log::info!("Masteroids starting with seed {seed}");
    let frame_dt = tuning.frame_dt;
    let mut session = Session::new(tuning, seed)?;
    let mut governor = Governor::new(frame_dt);

    let mut frames = 0;
    while !session.is_over() && frames < MAX_FRAMES {
        if !governor.advance(DISPLAY_DT) {
            continue;
        }
        let input = autopilot(session.level());
        session.tick(&input, frame_dt);
        frames += 1;
    }

    if !session.is_over() {
        log::info!("Frame cap reached on level {}", session.level_number());
    }

    let score = session.final_score();
    println!(
        "Reached level {} with score {} after {} frames",
        session.level_number(),
        score,
        frames
    );

    let mut board = Leaderboard::load(&board_path)?;
    let best = board.top_score();
    if board.qualifies(score) {
        if let Some(rank) = board.add(PLAYER_NAME, score) {
            println!("New high score! Rank {rank}");
        }
    }
    if score > best {
        println!("Beat the previous best of {best}");
    }
    board.save(&board_path)?;
    print!("{board}");

    let snapshot = session.level().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}
