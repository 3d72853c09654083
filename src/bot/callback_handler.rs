//! Callback Handler module for processing inline keyboard callback queries

use anyhow::Result;
use chrono::Utc;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::localization::{t_args_lang, t_lang};
use crate::session::{Session, SessionDialogue};

use super::ui_builder::{create_matches_keyboard, format_matches};

/// Actions encoded in inline keyboard callback data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallbackAction {
    ToggleFullMatch,
    ToggleVegan,
    ToggleQuick,
    ToggleOnePot,
    /// Catalog index of the recipe the user cooked
    Cooked(usize),
    ClearFridge,
}

impl CallbackAction {
    /// Encode as callback data (Telegram allows at most 64 bytes)
    pub fn to_data(&self) -> String {
        match self {
            CallbackAction::ToggleFullMatch => "filter_full".to_string(),
            CallbackAction::ToggleVegan => "filter_vegan".to_string(),
            CallbackAction::ToggleQuick => "filter_quick".to_string(),
            CallbackAction::ToggleOnePot => "filter_one_pot".to_string(),
            CallbackAction::Cooked(index) => format!("cooked_{}", index),
            CallbackAction::ClearFridge => "clear".to_string(),
        }
    }

    /// Decode callback data, `None` for anything unrecognized
    pub fn parse(data: &str) -> Option<Self> {
        match data {
            "filter_full" => Some(CallbackAction::ToggleFullMatch),
            "filter_vegan" => Some(CallbackAction::ToggleVegan),
            "filter_quick" => Some(CallbackAction::ToggleQuick),
            "filter_one_pot" => Some(CallbackAction::ToggleOnePot),
            "clear" => Some(CallbackAction::ClearFridge),
            _ => data
                .strip_prefix("cooked_")
                .and_then(|index| index.parse().ok())
                .map(CallbackAction::Cooked),
        }
    }

    /// Apply the action to a session; returns the name of a cooked recipe, if any
    ///
    /// Every action except "cooked" re-renders the match list and counts as a search.
    pub fn apply(&self, session: &mut Session, catalog: &Catalog) -> Option<String> {
        match self {
            CallbackAction::ToggleFullMatch => session.toggle_full_match(),
            CallbackAction::ToggleVegan => session.toggle_vegan(),
            CallbackAction::ToggleQuick => session.toggle_quick(),
            CallbackAction::ToggleOnePot => session.toggle_one_pot(),
            CallbackAction::ClearFridge => session.clear_inventory(),
            CallbackAction::Cooked(index) => {
                let recipe = catalog.get(*index)?;
                session.stats.record_cooked(Utc::now());
                return Some(recipe.name.clone());
            }
        }
        session.stats.record_search();
        None
    }
}

/// Handle callback queries from inline keyboards
pub async fn callback_handler(
    bot: Bot,
    q: CallbackQuery,
    dialogue: SessionDialogue,
    mut session: Session,
    catalog: Arc<Catalog>,
    config: Arc<AppConfig>,
) -> Result<()> {
    debug!(user_id = %q.from.id, "Received callback query from user");

    // Answer first to remove the loading state on the button
    bot.answer_callback_query(q.id.clone()).await?;

    let language_code = session
        .language_code
        .clone()
        .or_else(|| q.from.language_code.clone())
        .unwrap_or_else(|| config.default_language.clone());
    let language_code = Some(language_code.as_str());

    let Some(action) = q.data.as_deref().and_then(CallbackAction::parse) else {
        debug!(user_id = %q.from.id, data = ?q.data, "Ignoring unknown callback data");
        return Ok(());
    };

    let Some(msg) = &q.message else {
        return Ok(());
    };
    let chat_id = msg.chat().id;

    let cooked = action.apply(&mut session, &catalog);

    // The session is stored before any Telegram call
    dialogue.update(session.clone()).await?;

    if let CallbackAction::Cooked(_) = action {
        match &cooked {
            Some(recipe) => {
                info!(user_id = %q.from.id, recipe = %recipe, "User cooked a recipe");
                bot.send_message(
                    chat_id,
                    t_args_lang("cooked-recorded", &[("recipe", recipe.as_str())], language_code),
                )
                .await?;
            }
            None => {
                bot.send_message(chat_id, t_lang("recipe-unavailable", language_code))
                    .await?;
            }
        }
        return Ok(());
    }

    let matches = session.ranked_matches(&catalog);
    let text = format_matches(&matches, &session, config.max_results, language_code);
    let keyboard =
        create_matches_keyboard(&matches, &session, &catalog, config.max_results, language_code);

    // Telegram rejects edits that leave the message unchanged
    if let Err(e) = bot
        .edit_message_text(chat_id, msg.id(), text)
        .reply_markup(keyboard)
        .await
    {
        error!(user_id = %q.from.id, error = %e, "Failed to edit matches message");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::Recipe;

    #[test]
    fn test_callback_data_round_trip() {
        let actions = [
            CallbackAction::ToggleFullMatch,
            CallbackAction::ToggleVegan,
            CallbackAction::ToggleQuick,
            CallbackAction::ToggleOnePot,
            CallbackAction::Cooked(17),
            CallbackAction::ClearFridge,
        ];
        for action in actions {
            assert_eq!(CallbackAction::parse(&action.to_data()), Some(action));
            assert!(action.to_data().len() <= 64);
        }
    }

    #[test]
    fn test_unknown_callback_data() {
        assert_eq!(CallbackAction::parse("edit_3"), None);
        assert_eq!(CallbackAction::parse("cooked_abc"), None);
        assert_eq!(CallbackAction::parse(""), None);
    }

    #[test]
    fn test_apply_cooked() {
        let catalog = Catalog::new(vec![Recipe::new("Toast").with_ingredients(["bread"])]);
        let mut session = Session::empty();

        assert_eq!(
            CallbackAction::Cooked(0).apply(&mut session, &catalog),
            Some("Toast".to_string())
        );
        assert_eq!(session.stats.cooked, 1);

        assert_eq!(CallbackAction::Cooked(5).apply(&mut session, &catalog), None);
        assert_eq!(session.stats.cooked, 1);
        assert_eq!(session.stats.searches, 0);
    }

    #[test]
    fn test_apply_toggle_counts_search() {
        let catalog = Catalog::default();
        let mut session = Session::default();

        assert_eq!(CallbackAction::ToggleVegan.apply(&mut session, &catalog), None);
        assert!(session.vegan_enabled());
        assert_eq!(session.stats.searches, 1);
    }

    #[test]
    fn test_apply_clear() {
        let catalog = Catalog::default();
        let mut session = Session::default();
        assert!(!session.inventory().is_empty());

        CallbackAction::ClearFridge.apply(&mut session, &catalog);
        assert!(session.inventory().is_empty());
    }
}
