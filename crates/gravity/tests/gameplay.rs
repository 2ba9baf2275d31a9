use gravity::screens::{keys, Screen};
use gravity::{App, GameConfig, GameScreen, ScreenKind};
use gravity_engine::InputEvent;

fn running(config: GameConfig) -> GameScreen {
    let mut game = GameScreen::new(config);
    game.set_paused(false);
    game
}

#[test]
fn frame_rate_does_not_change_the_simulation() {
    let config = GameConfig::default().without_spawns();
    let mut a = running(config.clone());
    let mut b = running(config);

    for dt in [0.016, 0.016, 0.016] {
        a.advance(dt);
    }
    for dt in [0.024, 0.024] {
        b.advance(dt);
    }

    assert_eq!(a.round().time, b.round().time);
    assert_eq!(a.planet_positions(), b.planet_positions());
    assert_eq!(a.round().score(), b.round().score());
}

#[test]
fn seeded_rounds_replay_identically() {
    let mut config = GameConfig::default();
    config.collectibles.spawn_interval = 0.2;
    config.enemies.spawn_interval = 0.3;
    let mut a = running(config.clone());
    let mut b = running(config);

    for _ in 0..60 {
        a.advance(0.016);
        b.advance(0.016);
    }

    let kinds = |g: &GameScreen| g.scene().iter().map(|e| (e.id, e.kind, e.pos)).collect::<Vec<_>>();
    assert_eq!(kinds(&a), kinds(&b));
}

#[test]
fn countdown_ticks_once_per_simulated_second() {
    let mut game = running(GameConfig::default().without_spawns());
    let start = game.planet_positions()[0];

    for _ in 0..199 {
        game.advance(0.005);
    }
    assert_eq!(game.round().time_remaining(), 120);

    game.advance(0.005);
    assert_eq!(game.round().time_remaining(), 119);
    assert!((game.round().time - 1.0).abs() < 1e-3);
    assert_ne!(game.planet_positions()[0], start);
}

#[test]
fn a_full_round_ends_on_the_high_score_screen() {
    let mut config = GameConfig::default().without_spawns();
    config.rules.game_time = 1;
    let mut app = App::new(config);

    app.push_input(InputEvent::KeyDown {
        key_code: keys::ENTER,
    });
    app.tick(0.0);
    assert_eq!(app.active(), ScreenKind::Game);

    app.push_input(InputEvent::KeyDown { key_code: keys::P });
    for _ in 0..300 {
        app.tick(0.005);
        if app.active() != ScreenKind::Game {
            break;
        }
    }

    assert_eq!(app.active(), ScreenKind::HighScores);
    let table = app.high_scores().table();
    assert_eq!(table.len(), 1);
    assert_eq!(table.best(), Some(app.game().round().score()));
    assert_eq!(app.high_scores().last_rank(), Some(1));

    app.push_input(InputEvent::KeyDown {
        key_code: keys::ESCAPE,
    });
    app.tick(0.016);
    assert_eq!(app.active(), ScreenKind::Menu);
}
