//! Message Handler module for processing incoming Telegram messages

use anyhow::Result;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::AppConfig;
use crate::inventory_parser::IngredientResolver;
use crate::localization::{t_args_lang, t_lang};
use crate::session::{Session, SessionDialogue};

use super::ui_builder::{
    create_matches_keyboard, format_inventory, format_matches, format_stats, format_vocabulary,
};

/// Commands understood by the bot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Help,
    Fridge,
    Matches,
    Ingredients,
    Clear,
    Stats,
    Unknown(String),
}

impl Command {
    /// Parse a message starting with `/`, ignoring a trailing `@botname`
    pub fn parse(text: &str) -> Option<Self> {
        let word = text.trim().split_whitespace().next()?;
        let name = word.strip_prefix('/')?;
        let name = name.split('@').next().unwrap_or(name).to_lowercase();

        Some(match name.as_str() {
            "start" => Command::Start,
            "help" => Command::Help,
            "fridge" => Command::Fridge,
            "matches" | "cook" => Command::Matches,
            "ingredients" => Command::Ingredients,
            "clear" => Command::Clear,
            "stats" => Command::Stats,
            _ => Command::Unknown(name),
        })
    }
}

/// What the bot should send back, decided before anything goes over the wire
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Welcome,
    Help,
    Inventory,
    Vocabulary,
    Matches,
    Cleared,
    Stats,
    UnknownCommand,
    Unresolved(Vec<String>),
    Added(usize),
    NothingRecognized,
}

/// Store the client language the first time it is reported
pub fn remember_language(session: &mut Session, language_code: Option<&str>) {
    if session.language_code.is_none() {
        session.language_code = language_code.map(str::to_string);
    }
}

/// Apply a message to the session and decide the replies
///
/// Every session change happens here, so the caller can persist the
/// session before sending anything. `None` stands for a non-text message.
pub fn apply_message(
    text: Option<&str>,
    session: &mut Session,
    resolver: &IngredientResolver,
) -> Vec<Reply> {
    let Some(text) = text else {
        return vec![Reply::Help];
    };

    match Command::parse(text) {
        Some(Command::Start) => vec![Reply::Welcome, Reply::Inventory],
        Some(Command::Help) => vec![Reply::Help],
        Some(Command::Fridge) => vec![Reply::Inventory],
        Some(Command::Matches) => {
            session.stats.record_search();
            vec![Reply::Matches]
        }
        Some(Command::Ingredients) => vec![Reply::Vocabulary],
        Some(Command::Clear) => {
            session.clear_inventory();
            vec![Reply::Cleared]
        }
        Some(Command::Stats) => vec![Reply::Stats],
        Some(Command::Unknown(name)) => {
            debug!(command = %name, "Unknown command");
            vec![Reply::UnknownCommand]
        }
        None => {
            let parsed = resolver.parse(text);
            let mut replies = Vec::new();

            if !parsed.unresolved.is_empty() {
                replies.push(Reply::Unresolved(parsed.unresolved.clone()));
            }

            if parsed.is_empty() {
                replies.push(Reply::NothingRecognized);
            } else {
                let added = session.add_ingredients(parsed.inventory());
                session.stats.record_search();
                replies.push(Reply::Added(added));
                replies.push(Reply::Matches);
            }
            replies
        }
    }
}

/// Rank the session's matches and send them with the filter keyboard
pub async fn send_matches(
    bot: &Bot,
    chat_id: ChatId,
    session: &Session,
    catalog: &Catalog,
    config: &AppConfig,
    language_code: Option<&str>,
) -> Result<()> {
    let matches = session.ranked_matches(catalog);
    info!(user_id = %chat_id, matches = matches.len(), "Sending ranked matches");

    let text = format_matches(&matches, session, config.max_results, language_code);
    let keyboard =
        create_matches_keyboard(&matches, session, catalog, config.max_results, language_code);

    bot.send_message(chat_id, text).reply_markup(keyboard).await?;
    Ok(())
}

async fn send_reply(
    bot: &Bot,
    chat_id: ChatId,
    reply: &Reply,
    session: &Session,
    catalog: &Catalog,
    config: &AppConfig,
    language_code: Option<&str>,
) -> Result<()> {
    let text = match reply {
        Reply::Matches => {
            return send_matches(bot, chat_id, session, catalog, config, language_code).await;
        }
        Reply::Welcome => format!(
            "{}\n\n{}",
            t_lang("welcome", language_code),
            t_lang("help-commands", language_code)
        ),
        Reply::Help => t_lang("help-commands", language_code),
        Reply::Inventory => format_inventory(session.inventory(), language_code),
        Reply::Vocabulary => format_vocabulary(catalog, language_code),
        Reply::Cleared => t_lang("fridge-cleared", language_code),
        Reply::Stats => format_stats(&session.stats, language_code),
        Reply::UnknownCommand => t_lang("unknown-command", language_code),
        Reply::Unresolved(items) => {
            warn!(
                user_id = %chat_id,
                unresolved = items.len(),
                "Some ingredients could not be resolved"
            );
            let items = items.join(", ");
            t_args_lang("ingredients-unresolved", &[("items", items.as_str())], language_code)
        }
        Reply::Added(count) => {
            info!(user_id = %chat_id, added = *count, "Ingredients added to fridge");
            t_args_lang(
                "ingredients-added",
                &[("count", count.to_string().as_str())],
                language_code,
            )
        }
        Reply::NothingRecognized => t_lang("nothing-recognized", language_code),
    };

    bot.send_message(chat_id, text).await?;
    Ok(())
}

/// Handle incoming messages: commands and free-text ingredient lists
pub async fn message_handler(
    bot: Bot,
    msg: Message,
    dialogue: SessionDialogue,
    mut session: Session,
    catalog: Arc<Catalog>,
    resolver: Arc<IngredientResolver>,
    config: Arc<AppConfig>,
) -> Result<()> {
    let chat_id = msg.chat.id;

    remember_language(
        &mut session,
        msg.from.as_ref().and_then(|user| user.language_code.as_deref()),
    );
    if msg.text().is_none() {
        debug!(user_id = %chat_id, "Non-text message, sending help");
    }

    let replies = apply_message(msg.text(), &mut session, &resolver);

    // The session is stored before any Telegram call
    dialogue.update(session.clone()).await?;

    let language_code = session
        .language_code
        .clone()
        .unwrap_or_else(|| config.default_language.clone());
    let language_code = Some(language_code.as_str());

    for reply in &replies {
        send_reply(&bot, chat_id, reply, &session, &catalog, &config, language_code).await?;
    }

    Ok(())
}
