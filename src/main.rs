//! Star Catcher entry point
//!
//! The web build is driven from JS through `platform::web::WebGame`. Natively
//! this runs a headless autopilot session and prints the result.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use star_catcher::platform::platform_store;
    use star_catcher::sim::{Game, ScoreEventKind, autopilot_input};
    use star_catcher::{AdManager, GameConfig, RewardLedger};

    env_logger::init();
    log::info!("Star Catcher (native) starting...");

    let mut args = std::env::args().skip(1);
    let seed = args
        .next()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(12345);
    let rewarded = args.any(|a| a == "--rewarded");

    let mut store = platform_store();
    let mut ledger = RewardLedger::load(store.as_ref());
    let mut ads = AdManager::load(store.as_ref());

    let mut game = Game::with_seed(GameConfig::load(), seed);
    if rewarded {
        if let Some(grant) = ads.show_rewarded(true, 0.0, game.rng_mut()) {
            ledger.grant(&grant);
        }
    }
    game.set_modifier(ledger.session_modifier());
    ledger.save(store.as_mut());

    // 60 FPS, capped at ten simulated minutes
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    game.start(0.0);
    let mut now = 0.0;
    let mut caught = 0usize;
    let mut missed = 0usize;
    let mut final_result = None;
    for _ in 0..MAX_FRAMES {
        now += FRAME_MS;
        let input = autopilot_input(game.state());
        let report = game.tick(now, &input);
        for event in &report.events {
            match event.kind {
                ScoreEventKind::Catch | ScoreEventKind::BombHit => caught += 1,
                ScoreEventKind::Miss => missed += 1,
                ScoreEventKind::LevelUp => log::info!("{}", event.text),
            }
        }
        if let Some(result) = report.game_over {
            final_result = Some(result);
            break;
        }
    }
    ads.save(store.as_mut());

    let state = game.state();
    println!("\nSeed {} finished after {:.1}s of play", seed, now / 1000.0);
    println!("  caught: {}  missed: {}", caught, missed);
    match final_result {
        Some(result) => println!("  GAME OVER - score {} at level {}", result.score, result.level),
        None => println!(
            "  still alive - score {} at level {}, {} lives left",
            state.score,
            state.level(),
            state.lives
        ),
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is platform::web::wasm_start, this is just to satisfy the compiler
}
