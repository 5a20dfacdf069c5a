use glam::Vec2;
use masteroids::sim::{
    Asteroid, GameEvent, Level, Pellet, Session, SizeClass, Ship, TickInput, VectorExt,
};
use masteroids::Tuning;
use test_log::test;

fn running_level(tuning: &Tuning, lives: u32) -> Level {
    let ship = Ship::new(Vec2::ZERO, tuning.ship, tuning.pellet).unwrap();
    let mut level = Level::new(tuning, ship, lives, 0).unwrap();
    level.toggle_pause();
    level
}

fn asteroid(tuning: &Tuning, size: SizeClass, center: Vec2, radius: f32) -> Asteroid {
    Asteroid::with_velocity(size, center, radius, Vec2::ZERO, &tuning.asteroids).unwrap()
}

fn idle() -> TickInput {
    TickInput::default()
}

#[test]
fn test_ship_hit_loses_life_and_respawns() {
    let tuning = Tuning::default();
    let mut level = running_level(&tuning, 3);
    let center = level.arena().center();

    level.ship.body.collider.move_to(Vec2::new(100.0, 100.0));
    level.ship.body.velocity = Vec2::new(20.0, 0.0);
    level
        .asteroids
        .push(asteroid(&tuning, SizeClass::Medium, Vec2::new(115.0, 100.0), 20.0));
    assert!(!level.ship.is_invulnerable());

    level.tick(&idle(), tuning.frame_dt);

    assert_eq!(level.lives(), 2);
    assert_eq!(level.ship.body.center(), center);
    assert_eq!(level.ship.body.velocity, Vec2::ZERO);
    assert!(level.ship.invulnerable_for() > 0.0);
    assert_eq!(level.asteroids.len(), 1);
    assert!(!level.win());
    assert!(!level.lose());
    assert_eq!(level.events(), &[GameEvent::ShipLostLife { lives_left: 2 }]);
}

#[test]
fn test_only_one_life_lost_per_frame() {
    let tuning = Tuning::default();
    let mut level = running_level(&tuning, 3);
    let center = level.arena().center();
    for _ in 0..3 {
        level
            .asteroids
            .push(asteroid(&tuning, SizeClass::Small, center, 10.0));
    }

    level.tick(&idle(), 0.0);
    assert_eq!(level.lives(), 2);

    // Still overlapping at the respawn point, but protected
    level.tick(&idle(), tuning.frame_dt);
    assert_eq!(level.lives(), 2);
}

#[test]
fn test_shooting_last_asteroid_wins() {
    let tuning = Tuning::default();
    let mut level = running_level(&tuning, 3);
    let target = asteroid(&tuning, SizeClass::Large, Vec2::new(110.0, 100.0), 10.0);
    let points = target.point_value();
    level.asteroids.push(target);
    level
        .pellets
        .push(Pellet::launch(Vec2::new(90.0, 100.0), 0.0, &tuning.pellet));

    // Not touching yet; one step of 0.1s closes the gap
    level.tick(&idle(), 0.1);

    assert!(level.asteroids.is_empty());
    assert!(level.pellets.is_empty());
    assert!(level.win());
    assert_eq!(level.score(), points);
    assert_eq!(
        level.events(),
        &[
            GameEvent::AsteroidDestroyed {
                size: SizeClass::Large,
                points
            },
            GameEvent::LevelCleared
        ]
    );

    // Reported once
    level.tick(&idle(), 0.1);
    assert!(level.events().is_empty());
}

#[test]
fn test_pellet_leaving_arena_is_removed() {
    let tuning = Tuning::default();
    let mut level = running_level(&tuning, 3);
    level
        .asteroids
        .push(asteroid(&tuning, SizeClass::Small, Vec2::new(20.0, 20.0), 10.0));
    level
        .pellets
        .push(Pellet::launch(Vec2::new(480.0, 250.0), 0.0, &tuning.pellet));

    let mut frames = 0;
    while !level.pellets.is_empty() {
        let before = level.pellets[0].body.center();
        level.tick(&idle(), tuning.frame_dt);
        frames += 1;
        assert!(frames < 100, "pellet never expired");
        if level.pellets.is_empty() {
            // It was removed on the frame it crossed the edge
            let moved = before.x + tuning.pellet.speed * tuning.frame_dt;
            assert!(moved + tuning.pellet.radius >= tuning.arena_width);
        }
    }
    assert_eq!(level.asteroids.len(), 1);
}

#[test]
fn test_clearing_shot_and_collision_on_last_life_both_count() {
    let tuning = Tuning::default();
    let mut level = running_level(&tuning, 1);
    let center = level.arena().center();

    // The last asteroid sits on the ship and is shot in the same frame
    level
        .asteroids
        .push(asteroid(&tuning, SizeClass::Small, center, 10.0));
    level
        .pellets
        .push(Pellet::launch(center, 0.0, &tuning.pellet));

    level.tick(&idle(), 0.0);

    assert!(level.win());
    assert!(level.lose());
    assert_eq!(level.lives(), 0);
    let events = level.events();
    assert_eq!(events[events.len() - 2], GameEvent::LevelCleared);
    assert_eq!(events[events.len() - 1], GameEvent::GameOver);
}

#[test]
fn test_session_prefers_win_when_both_happen() {
    let tuning = Tuning {
        lives: 1,
        ..Default::default()
    };
    let mut session = Session::new(tuning.clone(), 5).unwrap();
    let level = session.level_mut();
    let center = level.arena().center();
    level.asteroids = vec![asteroid(&tuning, SizeClass::Small, center, 10.0)];
    level
        .pellets
        .push(Pellet::launch(center, 0.0, &tuning.pellet));

    session.tick(
        &TickInput {
            pause: true,
            ..Default::default()
        },
        0.0,
    );

    assert!(!session.is_over());
    assert_eq!(session.level_number(), 2);
    // The life was spent; the next level carries the zero over
    assert_eq!(session.level().lives(), 0);
    assert!(session.events().contains(&GameEvent::LevelStarted { number: 2 }));

    // Starting the next level ends the run
    session.tick(
        &TickInput {
            pause: true,
            ..Default::default()
        },
        0.0,
    );
    assert!(session.is_over());
    assert_eq!(session.level_number(), 2);
}

#[test]
fn test_fire_cooldown_through_input() {
    let tuning = Tuning::default();
    let mut level = running_level(&tuning, 3);
    level
        .asteroids
        .push(asteroid(&tuning, SizeClass::Small, Vec2::new(250.0, 20.0), 10.0));
    let fire = TickInput {
        fire: true,
        ..Default::default()
    };

    level.tick(&fire, tuning.frame_dt);
    level.tick(&fire, tuning.ship.cooldown / 2.0);
    assert_eq!(level.pellets.len(), 1);

    level.tick(&fire, tuning.ship.cooldown);
    assert_eq!(level.pellets.len(), 2);

    let heading = level.pellets[1].body.velocity.unit().unwrap();
    assert!((heading - Vec2::X).length() < 1e-5);
}

#[test]
fn test_session_plays_deterministically() {
    let tuning = Tuning::default();
    let mut a = Session::new(tuning.clone(), 1234).unwrap();
    let mut b = Session::new(tuning.clone(), 1234).unwrap();
    let inputs = [
        TickInput {
            pause: true,
            ..Default::default()
        },
        TickInput {
            thrust_forward: true,
            fire: true,
            ..Default::default()
        },
        TickInput {
            rotate_left: true,
            fire: true,
            ..Default::default()
        },
    ];

    for i in 0..500 {
        let input = if i == 0 { inputs[0] } else { inputs[1 + i % 2] };
        a.tick(&input, tuning.frame_dt);
        b.tick(&input, tuning.frame_dt);
        assert_eq!(a.events(), b.events());
    }
    assert_eq!(a.level().snapshot(), b.level().snapshot());
    assert_eq!(a.level_number(), b.level_number());
}
