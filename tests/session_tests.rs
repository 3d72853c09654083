//! # Session Tests
//!
//! Per-chat state driven the way the bot handlers drive it.

use chrono::{TimeZone, Utc};
use fridge_raider::bot::CallbackAction;
use fridge_raider::catalog::Catalog;
use fridge_raider::session::{ChefRank, Session, DEFAULT_INVENTORY};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_ranks_default_inventory() {
        let catalog = Catalog::embedded().unwrap();
        let session = Session::default();

        assert_eq!(session.inventory().len(), DEFAULT_INVENTORY.len());

        let matches = session.ranked_matches(&catalog);
        assert!(!matches.is_empty());
        assert!(matches[0].recipe.name.starts_with("Classic Omelette"));
        assert_eq!(matches[0].match_percent, 75);
    }

    #[test]
    fn test_callbacks_toggle_filters() {
        let catalog = Catalog::embedded().unwrap();
        let mut session = Session::default();

        for data in ["filter_vegan", "filter_quick", "filter_one_pot", "filter_full"] {
            let action = CallbackAction::parse(data).unwrap();
            assert_eq!(action.apply(&mut session, &catalog), None);
        }
        assert!(session.vegan_enabled());
        assert!(session.quick_enabled());
        assert!(session.one_pot_enabled());
        assert!(session.filters().full_match_only);

        // eggs/cheese/butter cannot satisfy a vegan recipe
        assert!(session.ranked_matches(&catalog).is_empty());

        CallbackAction::ToggleVegan.apply(&mut session, &catalog);
        assert!(!session.vegan_enabled());
    }

    #[test]
    fn test_adding_ingredients_completes_omelette() {
        let catalog = Catalog::embedded().unwrap();
        let mut session = Session::default();
        session.toggle_full_match();
        assert!(session.ranked_matches(&catalog).is_empty());

        let added = session.add_ingredients(["salt".to_string(), "eggs".to_string()]);
        assert_eq!(added, 1);

        let matches = session.ranked_matches(&catalog);
        assert!(matches.iter().all(|m| m.match_percent == 100));
        assert!(matches
            .iter()
            .any(|m| m.recipe.name.starts_with("Classic Omelette")));
    }

    #[test]
    fn test_cooking_progresses_rank() {
        let catalog = Catalog::embedded().unwrap();
        let mut session = Session::default();
        assert_eq!(session.stats.rank(), ChefRank::Apprentice);

        for _ in 0..5 {
            CallbackAction::Cooked(0).apply(&mut session, &catalog);
        }
        assert_eq!(session.stats.cooked, 5);
        assert_eq!(session.stats.rank(), ChefRank::SousChef);
        assert!(session.stats.last_cooked.is_some());
    }

    #[test]
    fn test_session_serialization() {
        let mut session = Session::empty();
        session.add_ingredients(["rice".to_string()]);
        session.toggle_quick();
        session
            .stats
            .record_cooked(Utc.with_ymd_and_hms(2024, 3, 1, 18, 30, 0).unwrap());
        session.language_code = Some("fr".to_string());

        let json = serde_json::to_string(&session).unwrap();
        let restored: Session = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
