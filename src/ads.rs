//! Simulated ad pacing and statistics
//!
//! No ad network is contacted. This decides when the shell should show a
//! banner, interstitial or rewarded ad, tracks simulated impressions and
//! clicks, and turns a watched rewarded ad into a `RewardModifier`.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, load_json, save_json};
use crate::sim::{RewardModifier, UnitSource};

/// Storage keys
pub const PREFS_KEY: &str = "ad_preferences";
pub const STATS_KEY: &str = "ad_stats";

/// Minimum time between interstitials
pub const INTERSTITIAL_MIN_INTERVAL_MS: f64 = 60.0 * 1000.0;
/// Simulated click-through rate per impression
pub const CLICK_RATE: f32 = 0.01;
/// Simulated revenue per click: MIN + draw * SPREAD dollars
pub const REVENUE_PER_CLICK_MIN: f64 = 0.001;
pub const REVENUE_PER_CLICK_SPREAD: f64 = 0.004;

/// Ad placement types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdKind {
    Banner,
    Interstitial,
    Rewarded,
}

impl AdKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdKind::Banner => "banner",
            AdKind::Interstitial => "interstitial",
            AdKind::Rewarded => "rewarded",
        }
    }
}

/// User-facing ad preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdPrefs {
    pub ads_enabled: bool,
    /// Unix time (ms) of the last interstitial shown
    pub last_ad_shown: f64,
    /// Show an interstitial on every Nth request
    pub ad_frequency: u32,
    /// Interstitial requests so far
    pub game_count: u32,
}

impl Default for AdPrefs {
    fn default() -> Self {
        Self {
            ads_enabled: true,
            last_ad_shown: 0.0,
            ad_frequency: 3,
            game_count: 0,
        }
    }
}

/// Simulated ad statistics
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdStats {
    pub impressions: u64,
    pub clicks: u64,
    /// Estimated revenue in dollars
    pub revenue: f64,
    pub last_shown: Option<f64>,
}

impl AdStats {
    /// Click-through rate as a percentage
    pub fn click_through_rate(&self) -> f64 {
        if self.impressions == 0 {
            0.0
        } else {
            self.clicks as f64 / self.impressions as f64 * 100.0
        }
    }
}

/// Snapshot for the shell's stats panel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdReport {
    pub stats: AdStats,
    pub preferences: AdPrefs,
    pub click_through_rate: f64,
}

/// Ad pacing state machine
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AdManager {
    pub prefs: AdPrefs,
    pub stats: AdStats,
}

impl AdManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load preferences and stats; missing or corrupt entries use defaults
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let mut prefs: AdPrefs = load_json(store, PREFS_KEY).unwrap_or_default();
        if prefs.ad_frequency == 0 {
            prefs.ad_frequency = AdPrefs::default().ad_frequency;
        }
        let stats = load_json(store, STATS_KEY).unwrap_or_default();
        log::info!("Ad manager loaded (ads enabled: {})", prefs.ads_enabled);
        Self { prefs, stats }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        save_json(store, PREFS_KEY, &self.prefs);
        save_json(store, STATS_KEY, &self.stats);
    }

    pub fn ads_enabled(&self) -> bool {
        self.prefs.ads_enabled
    }

    /// Whether the banner slot should show an ad
    pub fn banner_visible(&self) -> bool {
        self.prefs.ads_enabled
    }

    /// Pacing check for a placement
    pub fn should_show(&self, kind: AdKind, now_ms: f64) -> bool {
        if !self.prefs.ads_enabled {
            return false;
        }
        match kind {
            AdKind::Interstitial => now_ms - self.prefs.last_ad_shown >= INTERSTITIAL_MIN_INTERVAL_MS,
            AdKind::Banner | AdKind::Rewarded => true,
        }
    }

    /// Ask for an interstitial (game start / game over). Returns true if the shell should show one.
    pub fn request_interstitial<R: UnitSource>(&mut self, now_ms: f64, rng: &mut R) -> bool {
        if !self.should_show(AdKind::Interstitial, now_ms) {
            return false;
        }

        self.prefs.game_count += 1;
        if self.prefs.game_count % self.prefs.ad_frequency.max(1) != 0 {
            return false;
        }

        self.prefs.last_ad_shown = now_ms;
        self.record_impression(AdKind::Interstitial, now_ms, rng);
        true
    }

    /// Resolve a rewarded-ad offer. Returns the grant if the user watched it.
    pub fn show_rewarded<R: UnitSource>(
        &mut self,
        accepted: bool,
        now_ms: f64,
        rng: &mut R,
    ) -> Option<RewardModifier> {
        if !self.should_show(AdKind::Rewarded, now_ms) || !accepted {
            return None;
        }
        self.record_impression(AdKind::Rewarded, now_ms, rng);
        log::info!("Rewarded ad watched, granting reward");
        Some(RewardModifier::rewarded_ad(now_ms))
    }

    /// Count an impression and roll a simulated click
    pub fn record_impression<R: UnitSource>(&mut self, kind: AdKind, now_ms: f64, rng: &mut R) {
        self.stats.impressions += 1;
        self.stats.last_shown = Some(now_ms);

        if rng.next_unit() < CLICK_RATE {
            self.stats.clicks += 1;
            self.stats.revenue += REVENUE_PER_CLICK_MIN + rng.next_unit() as f64 * REVENUE_PER_CLICK_SPREAD;
        }
        log::debug!("{} impression #{}", kind.as_str(), self.stats.impressions);
    }

    pub fn remove_ads(&mut self) {
        self.prefs.ads_enabled = false;
        log::info!("Ads removed");
    }

    pub fn restore_ads(&mut self) {
        self.prefs.ads_enabled = true;
        log::info!("Ads restored");
    }

    pub fn reset_stats(&mut self) {
        self.stats = AdStats::default();
    }

    pub fn report(&self) -> AdReport {
        AdReport {
            stats: self.stats.clone(),
            preferences: self.prefs.clone(),
            click_through_rate: self.stats.click_through_rate(),
        }
    }
}
