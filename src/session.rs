//! Per-chat session state: the user's inventory, active filters and chef stats.
//!
//! A `Session` is owned by the bot's dialogue storage and handed to each
//! handler invocation; nothing here is global.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::catalog::Catalog;
use crate::matcher::{rank_matches, IngredientCountRange, MatchFilters, MatchResult};
use crate::recipe_model::{inventory_from, Inventory, RecipeFlag};

/// Ingredients a new session starts with
pub const DEFAULT_INVENTORY: &[&str] = &["eggs", "cheese", "butter"];

/// Gamification counters for one chat
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChefStats {
    /// Number of times matches were computed for this chat
    pub searches: u32,
    /// Number of recipes the user marked as cooked
    pub cooked: u32,
    /// When the user last marked a recipe as cooked
    pub last_cooked: Option<DateTime<Utc>>,
}

/// Title shown in the stats panel, earned by cooking
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChefRank {
    Apprentice,
    LineCook,
    SousChef,
    HeadChef,
}

impl ChefStats {
    pub fn record_search(&mut self) {
        self.searches = self.searches.saturating_add(1);
    }

    pub fn record_cooked(&mut self, at: DateTime<Utc>) {
        self.cooked = self.cooked.saturating_add(1);
        self.last_cooked = Some(at);
    }

    pub fn rank(&self) -> ChefRank {
        match self.cooked {
            0 => ChefRank::Apprentice,
            1..=4 => ChefRank::LineCook,
            5..=14 => ChefRank::SousChef,
            _ => ChefRank::HeadChef,
        }
    }
}

impl ChefRank {
    /// Localization key for the rank title
    pub fn message_key(&self) -> &'static str {
        match self {
            ChefRank::Apprentice => "rank-apprentice",
            ChefRank::LineCook => "rank-line-cook",
            ChefRank::SousChef => "rank-sous-chef",
            ChefRank::HeadChef => "rank-head-chef",
        }
    }
}

/// Conversation state kept for every chat
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    inventory: Inventory,
    filters: MatchFilters,
    pub stats: ChefStats,
    pub language_code: Option<String>,
}

/// Type alias for the bot's session dialogue
pub type SessionDialogue = Dialogue<Session, InMemStorage<Session>>;

impl Default for Session {
    fn default() -> Self {
        Self {
            inventory: inventory_from(DEFAULT_INVENTORY.iter().copied()),
            filters: MatchFilters::default(),
            stats: ChefStats::default(),
            language_code: None,
        }
    }
}

impl Session {
    /// A session with an empty inventory and no filters
    pub fn empty() -> Self {
        Self {
            inventory: Inventory::new(),
            ..Default::default()
        }
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn filters(&self) -> &MatchFilters {
        &self.filters
    }

    pub fn set_inventory(&mut self, items: Inventory) {
        self.inventory = items;
    }

    pub fn set_filters(&mut self, filters: MatchFilters) {
        self.filters = filters;
    }

    /// Add ingredients, returning how many were new
    pub fn add_ingredients<I: IntoIterator<Item = String>>(&mut self, items: I) -> usize {
        let before = self.inventory.len();
        self.inventory.extend(items);
        self.inventory.len() - before
    }

    pub fn remove_ingredient(&mut self, item: &str) -> bool {
        self.inventory.remove(item)
    }

    pub fn clear_inventory(&mut self) {
        self.inventory.clear();
    }

    /// Rank the catalog against this session's inventory and filters
    pub fn ranked_matches<'a>(&self, catalog: &'a Catalog) -> Vec<MatchResult<'a>> {
        rank_matches(&self.inventory, catalog, &self.filters)
    }

    pub fn toggle_full_match(&mut self) {
        self.filters.full_match_only = !self.filters.full_match_only;
    }

    pub fn toggle_vegan(&mut self) {
        self.filters.exclusion_set = match self.filters.exclusion_set.take() {
            Some(_) => None,
            None => MatchFilters::vegan().exclusion_set,
        };
    }

    pub fn toggle_quick(&mut self) {
        self.filters.ingredient_count_range = match self.filters.ingredient_count_range {
            Some(_) => None,
            None => Some(IngredientCountRange::QUICK),
        };
    }

    pub fn toggle_one_pot(&mut self) {
        self.filters.require_flag = match self.filters.require_flag {
            Some(_) => None,
            None => Some(RecipeFlag::OnePot),
        };
    }

    pub fn vegan_enabled(&self) -> bool {
        self.filters.exclusion_set.is_some()
    }

    pub fn quick_enabled(&self) -> bool {
        self.filters.ingredient_count_range.is_some()
    }

    pub fn one_pot_enabled(&self) -> bool {
        self.filters.require_flag == Some(RecipeFlag::OnePot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_default_session_is_seeded() {
        let session = Session::default();
        assert_eq!(session.inventory(), &inventory_from(["eggs", "cheese", "butter"]));
        assert!(!session.filters().is_active());
    }

    #[test]
    fn test_add_ingredients_counts_new_only() {
        let mut session = Session::empty();
        assert_eq!(session.add_ingredients(vec!["eggs".to_string(), "milk".to_string()]), 2);
        assert_eq!(session.add_ingredients(vec!["eggs".to_string()]), 0);
        assert!(session.remove_ingredient("eggs"));
        assert!(!session.remove_ingredient("eggs"));
    }

    #[test]
    fn test_toggles_round_trip() {
        let mut session = Session::empty();

        session.toggle_vegan();
        session.toggle_quick();
        session.toggle_one_pot();
        session.toggle_full_match();
        assert!(session.vegan_enabled());
        assert!(session.quick_enabled());
        assert!(session.one_pot_enabled());
        assert!(session.filters().full_match_only);

        session.toggle_vegan();
        session.toggle_quick();
        session.toggle_one_pot();
        session.toggle_full_match();
        assert!(!session.filters().is_active());
    }

    #[test]
    fn test_chef_rank_progression() {
        let mut stats = ChefStats::default();
        assert_eq!(stats.rank(), ChefRank::Apprentice);

        let at = Utc.with_ymd_and_hms(2024, 5, 1, 18, 30, 0).unwrap();
        stats.record_cooked(at);
        assert_eq!(stats.rank(), ChefRank::LineCook);
        assert_eq!(stats.last_cooked, Some(at));

        for _ in 0..4 {
            stats.record_cooked(at);
        }
        assert_eq!(stats.rank(), ChefRank::SousChef);
    }
}
