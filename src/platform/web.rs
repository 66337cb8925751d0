//! JS bindings for the browser shell
//!
//! The page owns the canvas, DOM and `requestAnimationFrame`; it calls into a
//! `WebGame` handle and renders the JSON it gets back.

use rand_pcg::Pcg32;
use serde::Serialize;
use wasm_bindgen::prelude::*;

use super::storage::LocalStore;
use crate::ads::AdManager;
use crate::config::GameConfig;
use crate::rewards::RewardLedger;
use crate::sim::{Direction, Game, GamePhase, TickInput, TickReport, seeded};

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Star Catcher wasm module loaded");
}

/// Tick result plus shell-side cues
#[derive(Debug, Serialize)]
struct WebTickResult<'a> {
    #[serde(flatten)]
    report: &'a TickReport,
    show_interstitial: bool,
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| {
        log::error!("Failed to serialize for JS: {}", e);
        "null".to_string()
    })
}

/// Game handle owned by the page
#[wasm_bindgen]
pub struct WebGame {
    game: Game,
    ads: AdManager,
    ledger: RewardLedger,
    store: LocalStore,
    /// Separate stream so ad rolls never perturb gameplay
    ad_rng: Pcg32,
    pending_interstitial: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game for a canvas of the given size
    #[wasm_bindgen(constructor)]
    pub fn new(seed: f64, canvas_width: f32, canvas_height: f32) -> WebGame {
        let store = LocalStore;
        let config = GameConfig {
            canvas_width,
            canvas_height,
            ..GameConfig::load()
        };
        let seed = seed as u64;
        log::info!("Game initialized with seed: {}", seed);

        WebGame {
            game: Game::with_seed(config, seed),
            ads: AdManager::load(&store),
            ledger: RewardLedger::load(&store),
            store,
            ad_rng: seeded(seed ^ 0x5EED_AD5),
            pending_interstitial: false,
        }
    }

    /// Start a session with this page's purchases and any pending reward
    pub fn start(&mut self, now_ms: f64) -> bool {
        if matches!(self.game.phase(), GamePhase::Running | GamePhase::Paused) {
            return false;
        }
        self.game.set_modifier(self.ledger.session_modifier());
        self.ledger.save(&mut self.store);

        let started = self.game.start(now_ms);
        if started {
            self.request_interstitial();
        }
        started
    }

    /// Advance one frame. Returns the tick report as JSON.
    pub fn tick(&mut self, now_ms: f64, left: bool, right: bool, pointer_x: Option<f32>) -> String {
        let direction = match (left, right) {
            (true, false) => Direction::Left,
            (false, true) => Direction::Right,
            _ => Direction::None,
        };
        let input = TickInput { direction, pointer_x };
        let report = self.game.tick(now_ms, &input);
        if report.game_over.is_some() {
            self.request_interstitial();
        }

        to_json(&WebTickResult {
            report: &report,
            show_interstitial: self.take_pending_interstitial(),
        })
    }

    pub fn pause(&mut self) -> bool {
        self.game.pause()
    }

    pub fn resume(&mut self, now_ms: f64) -> bool {
        self.game.resume(now_ms)
    }

    pub fn toggle_pause(&mut self, now_ms: f64) -> bool {
        self.game.toggle_pause(now_ms)
    }

    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// Current numbers as JSON, without advancing
    pub fn report(&self) -> String {
        to_json(&self.game.report())
    }

    /// Full state (objects, basket, cosmetics) as JSON for rendering
    pub fn state_json(&self) -> String {
        to_json(self.game.state())
    }

    /// Resolve a rewarded-ad prompt; the grant applies to the next session
    pub fn watch_rewarded_ad(&mut self, accepted: bool) -> bool {
        let now = js_sys::Date::now();
        match self.ads.show_rewarded(accepted, now, &mut self.ad_rng) {
            Some(grant) => {
                self.ledger.grant(&grant);
                self.ledger.save(&mut self.store);
                self.ads.save(&mut self.store);
                true
            }
            None => false,
        }
    }

    pub fn purchase(&mut self, id: &str) -> bool {
        let added = self.ledger.purchase(id);
        if added {
            self.ledger.save(&mut self.store);
        }
        added
    }

    pub fn banner_visible(&self) -> bool {
        self.ads.banner_visible()
    }

    pub fn remove_ads(&mut self) {
        self.ads.remove_ads();
        self.ads.save(&mut self.store);
    }

    pub fn restore_ads(&mut self) {
        self.ads.restore_ads();
        self.ads.save(&mut self.store);
    }

    pub fn ad_report(&self) -> String {
        to_json(&self.ads.report())
    }

    /// True once after an interstitial was scheduled
    pub fn take_pending_interstitial(&mut self) -> bool {
        std::mem::take(&mut self.pending_interstitial)
    }
}

impl WebGame {
    fn request_interstitial(&mut self) {
        let now = js_sys::Date::now();
        if self.ads.request_interstitial(now, &mut self.ad_rng) {
            self.pending_interstitial = true;
        }
        self.ads.save(&mut self.store);
    }
}
