//! # Fridge Raider
//!
//! Matches the ingredients a user has on hand against a fixed recipe catalog
//! and ranks the recipes by how much of each one the user can already cook.
//! A Telegram bot serves the ranked results.

pub mod bot;
pub mod catalog;
pub mod catalog_errors;
pub mod config;
pub mod inventory_parser;
pub mod localization;
pub mod matcher;
pub mod recipe_model;
pub mod session;

// Re-export types for easier access
pub use catalog::Catalog;
pub use config::AppConfig;
pub use inventory_parser::{IngredientResolver, ResolverConfig};
pub use matcher::{rank_matches, MatchFilters, MatchResult};
pub use recipe_model::{Inventory, Recipe};
pub use session::Session;
