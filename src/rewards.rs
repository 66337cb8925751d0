//! Purchase and reward bookkeeping
//!
//! Persisted to key-value storage. Purchases are permanent; a rewarded-ad
//! grant applies to the next session only.

use serde::{Deserialize, Serialize};

use crate::platform::{KeyValueStore, load_json, save_json};
use crate::sim::{BasketSkin, Cosmetic, Purchase, RewardModifier};

/// Storage key for the purchase id list
pub const PURCHASES_KEY: &str = "game_purchases";
/// Storage key for the pending reward grant
pub const REWARDS_KEY: &str = "game_rewards";

/// Stored rewarded-ad grant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardGrant {
    #[serde(default)]
    pub double_score: bool,
    #[serde(default)]
    pub extra_lives: u32,
    #[serde(default)]
    pub special_skin: Option<String>,
    /// Unix time (ms)
    #[serde(default)]
    pub reward_time: f64,
}

impl RewardGrant {
    pub fn from_modifier(modifier: &RewardModifier) -> Self {
        let special_skin = modifier.cosmetics.iter().find_map(|c| match c {
            Cosmetic::GoldenBasket => Some(BasketSkin::Golden.as_str().to_string()),
            Cosmetic::RainbowBasket => Some(BasketSkin::Rainbow.as_str().to_string()),
            Cosmetic::SparkleTrail => None,
        });
        Self {
            double_score: modifier.multiplier >= RewardModifier::DOUBLE_SCORE,
            extra_lives: modifier.bonus_lives,
            special_skin,
            reward_time: modifier.granted_at_ms.unwrap_or(0.0),
        }
    }

    /// Unknown skins are dropped rather than failing the grant
    pub fn to_modifier(&self) -> RewardModifier {
        let mut modifier = RewardModifier::neutral();
        if self.double_score {
            modifier.multiplier = RewardModifier::DOUBLE_SCORE;
        }
        modifier.bonus_lives = self.extra_lives;
        match self.special_skin.as_deref().and_then(BasketSkin::from_name) {
            Some(BasketSkin::Golden) => modifier.cosmetics.push(Cosmetic::GoldenBasket),
            Some(BasketSkin::Rainbow) => modifier.cosmetics.push(Cosmetic::RainbowBasket),
            Some(BasketSkin::Default) | None => {}
        }
        modifier.granted_at_ms = Some(self.reward_time);
        modifier
    }
}

/// Owned purchases plus an optional pending reward
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RewardLedger {
    purchases: Vec<String>,
    pending: Option<RewardGrant>,
}

impl RewardLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from storage; corrupt entries are treated as empty
    pub fn load(store: &dyn KeyValueStore) -> Self {
        let purchases: Vec<String> = load_json(store, PURCHASES_KEY).unwrap_or_default();
        let pending: Option<RewardGrant> = load_json(store, REWARDS_KEY);
        log::info!(
            "Loaded {} purchases, pending reward: {}",
            purchases.len(),
            pending.is_some()
        );
        Self { purchases, pending }
    }

    pub fn save(&self, store: &mut dyn KeyValueStore) {
        save_json(store, PURCHASES_KEY, &self.purchases);
        match &self.pending {
            Some(grant) => {
                save_json(store, REWARDS_KEY, grant);
            }
            None => store.remove(REWARDS_KEY),
        }
    }

    pub fn purchases(&self) -> &[String] {
        &self.purchases
    }

    pub fn pending_reward(&self) -> Option<&RewardGrant> {
        self.pending.as_ref()
    }

    /// Record a purchase by store id. Returns false for unknown or already owned ids.
    pub fn purchase(&mut self, id: &str) -> bool {
        let Some(purchase) = Purchase::from_id(id) else {
            log::warn!("Unknown purchase id '{}'", id);
            return false;
        };
        if self.owns(purchase) {
            return false;
        }
        self.purchases.push(purchase.id().to_string());
        log::info!("Purchased {}", purchase.id());
        true
    }

    pub fn owns(&self, purchase: Purchase) -> bool {
        self.purchases
            .iter()
            .any(|id| Purchase::from_id(id) == Some(purchase))
    }

    /// Store a reward for the next session, replacing any unclaimed one
    pub fn grant(&mut self, modifier: &RewardModifier) {
        self.pending = Some(RewardGrant::from_modifier(modifier));
    }

    /// Modifier for a new session; consumes the pending reward
    pub fn session_modifier(&mut self) -> RewardModifier {
        let mut modifier = RewardModifier::from_purchases(self.purchases.iter().map(String::as_str));
        if let Some(grant) = self.pending.take() {
            log::info!("Applying reward granted at {}", grant.reward_time);
            modifier = modifier.merge(&grant.to_modifier());
        }
        modifier
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::MemoryStore;

    #[test]
    fn test_reads_legacy_storage_format() {
        let mut store = MemoryStore::default();
        store.set(PURCHASES_KEY, r#"["powerup","skin1"]"#);
        store.set(
            REWARDS_KEY,
            r#"{"doubleScore":true,"extraLives":3,"specialSkin":"golden","rewardTime":1700000000000}"#,
        );

        let mut ledger = RewardLedger::load(&store);
        assert!(ledger.owns(Purchase::DoubleScore));
        assert!(ledger.owns(Purchase::RainbowBasket));
        assert!(!ledger.owns(Purchase::SparkleTrail));

        let modifier = ledger.session_modifier();
        assert_eq!(modifier.multiplier, 2);
        assert_eq!(modifier.bonus_lives, 3);
        assert!(modifier.cosmetics.contains(&Cosmetic::GoldenBasket));
        assert!(modifier.cosmetics.contains(&Cosmetic::RainbowBasket));
    }

    #[test]
    fn test_reward_is_one_shot() {
        let mut ledger = RewardLedger::new();
        ledger.grant(&RewardModifier::rewarded_ad(42.0));
        assert_eq!(ledger.session_modifier().bonus_lives, 3);
        assert!(ledger.pending_reward().is_none());
        assert!(ledger.session_modifier().is_neutral());
    }

    #[test]
    fn test_purchase_dedup_and_unknown() {
        let mut ledger = RewardLedger::new();
        assert!(ledger.purchase("skin2"));
        assert!(!ledger.purchase("skin_sparkle"));
        assert!(!ledger.purchase("jetpack"));
        assert_eq!(ledger.purchases().to_vec(), vec!["skin_sparkle".to_string()]);
    }

    #[test]
    fn test_save_load() {
        let mut store = MemoryStore::default();
        let mut ledger = RewardLedger::new();
        ledger.purchase("powerup_double");
        ledger.grant(&RewardModifier::rewarded_ad(7.0));
        ledger.save(&mut store);

        let mut loaded = RewardLedger::load(&store);
        assert_eq!(loaded, ledger);

        loaded.session_modifier();
        loaded.save(&mut store);
        assert_eq!(store.get(REWARDS_KEY), None);
    }

    #[test]
    fn test_corrupt_storage_is_empty() {
        let mut store = MemoryStore::default();
        store.set(PURCHASES_KEY, "{{{");
        store.set(REWARDS_KEY, "nope");
        let ledger = RewardLedger::load(&store);
        assert!(ledger.purchases().is_empty());
        assert!(ledger.pending_reward().is_none());
    }
}
