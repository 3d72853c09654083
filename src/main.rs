use anyhow::{Context, Result};
use std::env;
use std::sync::Arc;
use teloxide::dispatching::dialogue::InMemStorage;
use teloxide::prelude::*;
use tracing::info;
use tracing_subscriber::EnvFilter;

use fridge_raider::bot;
use fridge_raider::catalog::Catalog;
use fridge_raider::config::AppConfig;
use fridge_raider::inventory_parser::IngredientResolver;
use fridge_raider::localization::init_localization;
use fridge_raider::session::Session;

/// Install the tracing subscriber; `LOG_FORMAT=json` switches to JSON lines
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let json = env::var("LOG_FORMAT")
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    init_tracing();

    info!("Starting Fridge Raider Telegram Bot");

    let config = AppConfig::from_env()?;
    let bot_token = config
        .bot_token
        .clone()
        .context("TELEGRAM_BOT_TOKEN must be set")?;

    init_localization()?;

    let catalog = match &config.catalog_path {
        Some(path) => Catalog::load_from_path(path)
            .with_context(|| format!("Failed to load catalog from {}", path.display()))?,
        None => Catalog::embedded().context("Bundled catalog is invalid")?,
    };
    info!(recipes = catalog.len(), "Recipe catalog loaded");

    let resolver = IngredientResolver::for_catalog(&catalog, config.resolver.clone());

    // Catalog and resolver are read-only after startup and shared by every chat
    let catalog = Arc::new(catalog);
    let resolver = Arc::new(resolver);
    let config = Arc::new(config);

    let bot = Bot::new(bot_token);

    info!("Bot initialized, starting dispatcher");

    let handler = dptree::entry()
        .branch(
            Update::filter_message()
                .enter_dialogue::<Message, InMemStorage<Session>, Session>()
                .endpoint(bot::message_handler),
        )
        .branch(
            Update::filter_callback_query()
                .enter_dialogue::<CallbackQuery, InMemStorage<Session>, Session>()
                .endpoint(bot::callback_handler),
        );

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<Session>::new(),
            catalog,
            resolver,
            config
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
