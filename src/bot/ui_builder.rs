//! UI Builder module for creating keyboards and formatting messages

use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use crate::catalog::Catalog;
use crate::localization::{t_args_lang, t_lang};
use crate::matcher::MatchResult;
use crate::recipe_model::Inventory;
use crate::session::{ChefStats, Session};

use super::callback_handler::CallbackAction;

/// Width of the text progress bar on result cards
const PROGRESS_BAR_WIDTH: usize = 10;

/// Longest recipe name shown on a button before truncation
const BUTTON_LABEL_MAX_CHARS: usize = 24;

/// Render a percentage as a fixed-width bar, e.g. `▓▓▓▓▓░░░░░`
pub fn progress_bar(percent: u8) -> String {
    let filled = (percent.min(100) as usize * PROGRESS_BAR_WIDTH) / 100;
    format!(
        "{}{}",
        "▓".repeat(filled),
        "░".repeat(PROGRESS_BAR_WIDTH - filled)
    )
}

/// Format the user's inventory as a bullet list
pub fn format_inventory(inventory: &Inventory, language_code: Option<&str>) -> String {
    if inventory.is_empty() {
        return t_lang("fridge-empty", language_code);
    }

    let mut result = format!("{}\n\n", t_lang("fridge-title", language_code));
    for item in inventory {
        result.push_str(&format!("• {}\n", item));
    }
    result
}

/// Format every known ingredient as a comma-separated list
pub fn format_vocabulary(catalog: &Catalog, language_code: Option<&str>) -> String {
    let vocabulary = catalog.vocabulary();
    let count = vocabulary.len().to_string();
    let items: Vec<&str> = vocabulary.iter().map(String::as_str).collect();

    format!(
        "{}\n{}",
        t_args_lang("vocabulary-title", &[("count", count.as_str())], language_code),
        items.join(", ")
    )
}

/// Format one ranked recipe as a card
///
/// The "You need" list is left out when only full matches are shown.
pub fn format_match_card(
    result: &MatchResult<'_>,
    full_match_only: bool,
    language_code: Option<&str>,
) -> String {
    let recipe = result.recipe;
    let mut card = format!("🍽 {}\n", recipe.name);

    let percent_label = if result.is_full_match() {
        t_lang("perfect-match", language_code)
    } else {
        t_args_lang(
            "match-percent",
            &[("percent", result.match_percent.to_string().as_str())],
            language_code,
        )
    };
    card.push_str(&format!("{} {}\n", progress_bar(result.match_percent), percent_label));

    let mut badges = Vec::new();
    if let Some(time) = &recipe.time {
        badges.push(format!("⏱ {}", time));
    }
    if recipe.one_pot {
        badges.push(t_lang("one-pot-badge", language_code));
    }
    if !badges.is_empty() {
        card.push_str(&format!("{}\n", badges.join(" · ")));
    }

    let have: Vec<String> = result.have.iter().map(|i| format!("✔ {}", i)).collect();
    card.push_str(&format!("{} {}\n", t_lang("you-have", language_code), have.join(", ")));

    if !result.missing.is_empty() && !full_match_only {
        let missing: Vec<&str> = result.missing.iter().map(String::as_str).collect();
        card.push_str(&format!("{} {}\n", t_lang("you-need", language_code), missing.join(", ")));
    }

    if result.is_full_match() {
        card.push_str(&format!("{}\n", t_lang("ready-to-cook", language_code)));
    }

    if !recipe.instructions.is_empty() {
        card.push_str(&format!("📝 {}\n", recipe.instructions));
    }

    card
}

/// Format the ranked list for a session, showing at most `max_results` cards
pub fn format_matches(
    matches: &[MatchResult<'_>],
    session: &Session,
    max_results: usize,
    language_code: Option<&str>,
) -> String {
    let full_match_only = session.filters().full_match_only;

    if matches.is_empty() {
        let key = if full_match_only { "no-full-matches" } else { "no-matches" };
        return t_lang(key, language_code);
    }

    let count = matches.len().to_string();
    let mut text = format!(
        "{}\n\n",
        t_args_lang("matches-title", &[("count", count.as_str())], language_code)
    );

    for result in matches.iter().take(max_results) {
        text.push_str(&format_match_card(result, full_match_only, language_code));
        text.push('\n');
    }

    if matches.len() > max_results {
        let remaining = (matches.len() - max_results).to_string();
        text.push_str(&t_args_lang("matches-more", &[("count", remaining.as_str())], language_code));
    }

    text
}

fn toggle_label(enabled: bool, label: String) -> String {
    format!("{} {}", if enabled { "✅" } else { "⬜" }, label)
}

fn truncate_label(label: &str) -> String {
    if label.chars().count() > BUTTON_LABEL_MAX_CHARS {
        let truncated: String = label.chars().take(BUTTON_LABEL_MAX_CHARS - 3).collect();
        format!("{}...", truncated)
    } else {
        label.to_string()
    }
}

/// Create the inline keyboard under a match list: filter toggles, "cooked" buttons, clear
pub fn create_matches_keyboard(
    matches: &[MatchResult<'_>],
    session: &Session,
    catalog: &Catalog,
    max_results: usize,
    language_code: Option<&str>,
) -> InlineKeyboardMarkup {
    let filters = session.filters();
    let mut buttons = vec![
        vec![
            InlineKeyboardButton::callback(
                toggle_label(filters.full_match_only, t_lang("filter-full-match", language_code)),
                CallbackAction::ToggleFullMatch.to_data(),
            ),
            InlineKeyboardButton::callback(
                toggle_label(session.vegan_enabled(), t_lang("filter-vegan", language_code)),
                CallbackAction::ToggleVegan.to_data(),
            ),
        ],
        vec![
            InlineKeyboardButton::callback(
                toggle_label(session.quick_enabled(), t_lang("filter-quick", language_code)),
                CallbackAction::ToggleQuick.to_data(),
            ),
            InlineKeyboardButton::callback(
                toggle_label(session.one_pot_enabled(), t_lang("filter-one-pot", language_code)),
                CallbackAction::ToggleOnePot.to_data(),
            ),
        ],
    ];

    for result in matches.iter().take(max_results).filter(|r| r.is_full_match()) {
        if let Some(index) = catalog.index_of(result.recipe) {
            let label = t_args_lang(
                "button-cooked",
                &[("recipe", truncate_label(&result.recipe.name).as_str())],
                language_code,
            );
            buttons.push(vec![InlineKeyboardButton::callback(
                label,
                CallbackAction::Cooked(index).to_data(),
            )]);
        }
    }

    buttons.push(vec![InlineKeyboardButton::callback(
        t_lang("button-clear", language_code),
        CallbackAction::ClearFridge.to_data(),
    )]);

    InlineKeyboardMarkup::new(buttons)
}

/// Format the gamification panel
pub fn format_stats(stats: &ChefStats, language_code: Option<&str>) -> String {
    let rank = t_lang(stats.rank().message_key(), language_code);
    let mut text = format!(
        "{}\n\n{}\n{}\n{}\n",
        t_lang("stats-title", language_code),
        t_args_lang("stats-rank", &[("rank", rank.as_str())], language_code),
        t_args_lang("stats-searches", &[("count", stats.searches.to_string().as_str())], language_code),
        t_args_lang("stats-cooked", &[("count", stats.cooked.to_string().as_str())], language_code),
    );

    if let Some(last) = stats.last_cooked {
        let date = last.format("%Y-%m-%d %H:%M UTC").to_string();
        text.push_str(&t_args_lang("stats-last-cooked", &[("date", date.as_str())], language_code));
        text.push('\n');
    }

    text
}
