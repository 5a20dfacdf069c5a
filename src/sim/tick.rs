//! Fixed timestep simulation tick
//!
//! One call to [`tick`] runs a whole frame: timers, integration, boundaries,
//! collisions, garbage collection, input, and outcome. A frame always runs
//! to completion once started.

use super::asteroid::Asteroid;
use super::body::Body;
use super::level::{GameEvent, Level, LevelPhase};

/// Input intents for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    /// Turn counter-clockwise
    pub rotate_left: bool,
    /// Turn clockwise
    pub rotate_right: bool,
    /// Accelerate along the facing
    pub thrust_forward: bool,
    /// Accelerate against the facing
    pub thrust_backward: bool,
    /// Stop dead
    pub halt: bool,
    /// Shoot (the gun cooldown gates repeats)
    pub fire: bool,
    /// Pause toggle (edge-triggered by the caller)
    pub pause: bool,
}

/// The single throttle action applied in a frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Throttle {
    Forward,
    Backward,
    Halt,
    Coast,
}

impl TickInput {
    /// Rotation sign for this frame. Left and right together cancel out.
    pub fn turn(&self) -> Option<f32> {
        match (self.rotate_left, self.rotate_right) {
            (true, false) => Some(-1.0),
            (false, true) => Some(1.0),
            _ => None,
        }
    }

    /// Throttle precedence: forward, then backward, then halt
    pub fn throttle(&self) -> Throttle {
        if self.thrust_forward {
            Throttle::Forward
        } else if self.thrust_backward {
            Throttle::Backward
        } else if self.halt {
            Throttle::Halt
        } else {
            Throttle::Coast
        }
    }
}

/// Advance the level by one frame of `dt` seconds
pub fn tick(level: &mut Level, input: &TickInput, dt: f32) {
    level.events.clear();

    if input.pause {
        level.toggle_pause();
    }
    if level.phase == LevelPhase::Paused {
        return;
    }

    level.frame += 1;

    // 1-2. Timers, blink, integration
    level.ship.update(dt);
    update_blink(level);
    advance(&mut level.asteroids, dt);
    advance(&mut level.pellets, dt);

    // 3. Boundaries
    let arena = level.arena;
    level
        .ship
        .body
        .confine(&arena, level.tuning.ship_boundary);
    for asteroid in &mut level.asteroids {
        asteroid.body.bounce(&arena);
    }

    // 4-5. Collisions, then removal
    let mut hits = detect_pellet_hits(level);
    resolve_pellet_hits(level, &mut hits);
    check_ship_collision(level);
    collect_garbage(level, hits);

    // 6. Input
    apply_input(level, input, dt);

    // 7. Outcome
    report_outcome(level);
}

fn advance<B: Body>(bodies: &mut [B], dt: f32) {
    for body in bodies {
        body.update(dt);
    }
}

/// Blink while invulnerable; always visible otherwise
fn update_blink(level: &mut Level) {
    let flip = level.frame % u64::from(level.tuning.blink_frames) == 0;
    let protected = level.ship.is_invulnerable();
    let body = &mut level.ship.body;
    if !protected {
        body.visible = true;
    } else if flip {
        body.visible = !body.visible;
    }
}

/// Destroyed entities found during a frame, by index, plus the split
/// children waiting to be added
struct FrameHits {
    pellets: Vec<bool>,
    asteroids: Vec<bool>,
    spawned: Vec<Asteroid>,
}

/// Each pellet destroys at most one asteroid, and each asteroid is
/// destroyed at most once
fn detect_pellet_hits(level: &Level) -> FrameHits {
    let mut hits = FrameHits {
        pellets: vec![false; level.pellets.len()],
        asteroids: vec![false; level.asteroids.len()],
        spawned: Vec::new(),
    };

    for (pi, pellet) in level.pellets.iter().enumerate() {
        let target = level
            .asteroids
            .iter()
            .enumerate()
            .find(|(ai, asteroid)| !hits.asteroids[*ai] && pellet.collides_with(*asteroid));
        if let Some((ai, _)) = target {
            hits.pellets[pi] = true;
            hits.asteroids[ai] = true;
        }
    }
    hits
}

/// Award points and queue split children, in asteroid order
fn resolve_pellet_hits(level: &mut Level, hits: &mut FrameHits) {
    for (ai, destroyed) in hits.asteroids.iter().enumerate() {
        if !destroyed {
            continue;
        }
        let asteroid = &level.asteroids[ai];
        let points = asteroid.point_value();
        let size = asteroid.size();
        hits.spawned.extend(asteroid.split(
            level.tuning.split_policy,
            &level.tuning.asteroids,
            &mut level.rng,
        ));

        let total = level.ship.add_score(points);
        log::debug!("Destroyed {} asteroid (+{points}, score {total})", size.as_str());
        level.events.push(GameEvent::AsteroidDestroyed { size, points });
    }
}

/// First-hit policy: at most one life lost per frame. Asteroids shot this
/// frame are still in the arena until garbage collection, so they count.
fn check_ship_collision(level: &mut Level) {
    if level.ship.is_invulnerable() {
        return;
    }
    let hit = level
        .asteroids
        .iter()
        .any(|asteroid| level.ship.collides_with(asteroid));
    if !hit {
        return;
    }

    level.lives = level.lives.saturating_sub(1);
    let center = level.arena.center();
    level
        .ship
        .respawn(center, level.tuning.invulnerability_secs);
    log::debug!("Ship hit, {} lives left", level.lives);
    level.events.push(GameEvent::ShipLostLife {
        lives_left: level.lives,
    });
}

/// Remove destroyed and escaped entities (descending index order), then
/// append split children
fn collect_garbage(level: &mut Level, hits: FrameHits) {
    let arena = level.arena;
    let mut doomed_pellets = hits.pellets;
    for (pi, pellet) in level.pellets.iter().enumerate() {
        if !pellet.body.in_bounds(&arena) {
            doomed_pellets[pi] = true;
        }
    }

    remove_marked(&mut level.pellets, &doomed_pellets);
    remove_marked(&mut level.asteroids, &hits.asteroids);
    level.asteroids.extend(hits.spawned);
}

fn remove_marked<T>(items: &mut Vec<T>, marked: &[bool]) {
    let doomed: Vec<usize> = marked
        .iter()
        .enumerate()
        .filter_map(|(i, m)| m.then_some(i))
        .collect();
    for i in doomed.into_iter().rev() {
        items.remove(i);
    }
}

fn apply_input(level: &mut Level, input: &TickInput, dt: f32) {
    let ship = &mut level.ship;
    if let Some(sign) = input.turn() {
        ship.rotate(dt, sign);
    }
    match input.throttle() {
        Throttle::Forward => ship.thrust(dt, 1.0),
        Throttle::Backward => ship.thrust(dt, -1.0),
        Throttle::Halt => ship.halt(),
        Throttle::Coast => {}
    }
    if input.fire {
        if let Some(pellet) = ship.fire() {
            level.pellets.push(pellet);
            level.events.push(GameEvent::PelletFired);
        }
    }
}

fn report_outcome(level: &mut Level) {
    if level.win() && !level.cleared_reported {
        level.cleared_reported = true;
        log::info!("Level cleared with score {}", level.score());
        level.events.push(GameEvent::LevelCleared);
    }
    if level.lose() && !level.over_reported {
        level.over_reported = true;
        log::info!("Out of lives with score {}", level.score());
        level.events.push(GameEvent::GameOver);
    }
}
