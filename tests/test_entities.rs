use buzz_bombers::config::GameConfig;
use buzz_bombers::entities::*;

fn close(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn tier_speed_and_score_tables() {
    let cfg = GameConfig::default();
    assert!(close(Tier::Worker.speed(&cfg), cfg.worker_speed));
    assert!(close(Tier::Killer.speed(&cfg), cfg.killer_speed));
    assert_eq!(Tier::Worker.score(&cfg), cfg.worker_score);
    assert_eq!(Tier::Killer.score(&cfg), cfg.killer_score);

    // Enums derive PartialEq — equality comparisons must work
    assert_eq!(Tier::Worker, Tier::Worker);
    assert_ne!(Tier::Worker, Tier::Killer);
    assert_eq!(GamePhase::Playing, GamePhase::Playing);
    assert_ne!(GamePhase::Playing, GamePhase::GameOver);
    assert_eq!(Tier::Killer.clone(), Tier::Killer);
}

#[test]
fn bullet_off_top_is_strict() {
    assert!(!Bullet { x: 5.0, y: 0.0 }.off_top());
    assert!(Bullet { x: 5.0, y: -0.1 }.off_top());
}

#[test]
fn bee_at_edge_on_both_walls() {
    let cfg = GameConfig::default();
    let wall = cfg.field_w as f32 - Bee::W;

    let mut bee = Bee::new(10.0, 0.0, Tier::Worker, 1.0, &cfg);
    assert!(!bee.at_edge(&cfg));

    bee.x = 0.0;
    assert!(bee.at_edge(&cfg));
    bee.x = wall;
    assert!(bee.at_edge(&cfg));
    bee.x = wall - 0.1;
    assert!(!bee.at_edge(&cfg));
}

#[test]
fn bee_escaped_at_the_bottom_row() {
    let cfg = GameConfig::default();
    let mut bee = Bee::new(10.0, cfg.field_h as f32 - 0.1, Tier::Killer, -1.0, &cfg);
    assert!(!bee.escaped(&cfg));
    bee.y = cfg.field_h as f32;
    assert!(bee.escaped(&cfg));
}

#[test]
fn bee_new_takes_speed_from_tier() {
    let cfg = GameConfig::default();
    let worker = Bee::new(0.0, 0.0, Tier::Worker, 1.0, &cfg);
    let killer = Bee::new(0.0, 0.0, Tier::Killer, -1.0, &cfg);
    assert!(close(worker.speed, cfg.worker_speed));
    assert!(close(killer.speed, cfg.killer_speed));
    assert!(worker.alive && killer.alive);
}

#[test]
fn honeycomb_spawns_centered_on_the_bee() {
    let cfg = GameConfig::default();
    let bee = Bee::new(30.0, 5.0, Tier::Worker, 1.0, &cfg);
    let comb = Honeycomb::from_bee(&bee);
    // 1-wide comb centered under a 3-wide bee sits one cell in
    assert!(close(comb.x, 31.0));
    assert!(close(comb.y, 5.0));
    assert!(close(comb.age, 0.0));
    assert!(!comb.collected);
}

#[test]
fn honeycomb_immunity_window() {
    let cfg = GameConfig::default();
    let bee = Bee::new(30.0, 5.0, Tier::Worker, 1.0, &cfg);
    let mut comb = Honeycomb::from_bee(&bee);
    assert!(comb.immune(&cfg)); // fresh
    comb.age = cfg.immune_secs - 0.01;
    assert!(comb.immune(&cfg));
    comb.age = cfg.immune_secs;
    assert!(!comb.immune(&cfg));
}

#[test]
fn player_nose_is_the_sprite_center() {
    let player = Player { x: 20.0, y: 17.0 };
    assert!(close(player.nose_x(), 21.0));
}

#[test]
fn intersects_is_strict_on_touching_edges() {
    let a = (10.0, 10.0, 3.0, 1.0);
    assert!(intersects(a, (11.0, 10.5, 1.0, 1.0))); // overlapping
    assert!(intersects(a, (12.9, 10.9, 1.0, 1.0))); // corner overlap
    assert!(!intersects(a, (13.0, 10.0, 1.0, 1.0))); // touching right edge
    assert!(!intersects(a, (10.0, 11.0, 1.0, 1.0))); // touching bottom edge
    assert!(!intersects(a, (9.0, 10.0, 1.0, 1.0))); // touching left edge
    assert!(!intersects(a, (20.0, 20.0, 1.0, 1.0))); // far apart
}

#[test]
fn game_state_clone_is_independent() {
    let cfg = GameConfig::default();
    let original = GameState {
        player: Player { x: 20.0, y: 17.0 },
        bullets: Vec::new(),
        bees: Vec::new(),
        combs: Vec::new(),
        score: 0,
        ammo: cfg.max_bullets,
        level: 1,
        intro: false,
        intro_age: 0.0,
        end_age: 0.0,
        phase: GamePhase::Playing,
    };
    let mut cloned = original.clone();

    // Mutating the clone must not affect the original
    cloned.player.x = 99.0;
    cloned.score = 999;
    cloned.bees.push(Bee::new(5.0, 5.0, Tier::Killer, -1.0, &cfg));
    cloned.phase = GamePhase::GameOver;

    assert!(close(original.player.x, 20.0));
    assert_eq!(original.score, 0);
    assert!(original.bees.is_empty());
    assert_eq!(original.phase, GamePhase::Playing);
}
