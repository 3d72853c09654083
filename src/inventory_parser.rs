//! # Inventory Parser Module
//!
//! This module turns free text typed by a user ("2 eggs, some Cheese\nbutter")
//! into an inventory of ingredient names known to the catalog.
//!
//! ## Features
//!
//! - Tokenizing on commas, semicolons and newlines
//! - Cleaning tokens: lowercasing, dropping leading quantities and filler words
//! - Resolving tokens against the catalog vocabulary with pluggable strategies,
//!   tried in order until one succeeds:
//!   - **Exact**: the cleaned token is a known ingredient
//!   - **PluralStripping**: singular/plural variants ("egg" -> "eggs", "berry" -> "berries")
//!   - **EditDistance**: a unique closest name within a Levenshtein threshold ("parmesean" -> "parmesan")
//!
//! Resolution is kept apart from ranking so the matcher only ever sees clean
//! catalog names.

use lazy_static::lazy_static;
use log::{debug, info, trace};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::recipe_model::{normalize_name, Inventory};

/// Shortest token the edit-distance strategy will consider
pub const MIN_FUZZY_TOKEN_LENGTH: usize = 4;

/// Default upper bound on a cleaned token's length
pub const DEFAULT_MAX_TOKEN_LENGTH: usize = 50;

lazy_static! {
    static ref TOKEN_SEPARATOR: Regex =
        Regex::new(r"[,;\n\r]+").expect("Token separator pattern should be valid");
    static ref LEADING_QUANTITY: Regex = Regex::new(
        r"(?i)^\d+(?:[.,/]\d+)?\s*(?:x\s+|(?:cups?|tbsp|tsp|g|kg|ml|l|lbs?|oz|cans?|pieces?|slices?)\b)?\s*"
    )
    .expect("Leading quantity pattern should be valid");
}

/// Filler words removed from the front of a token, repeatedly until none is left
const FILLER_PREFIXES: &[&str] = &[
    "some ", "a few ", "a bit of ", "a ", "an ", "the ", "of ", "fresh ", "leftover ",
];

/// A way of mapping a cleaned token onto a known ingredient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ResolveStrategy {
    /// Token equals a known ingredient
    Exact,
    /// Token equals a known ingredient after adding or removing a plural suffix
    PluralStripping,
    /// Token is within `max_distance` edits of exactly one closest ingredient
    EditDistance {
        /// Largest accepted Levenshtein distance
        max_distance: usize,
    },
}

/// Configuration options for ingredient resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolverConfig {
    /// Strategies tried in order for every token
    pub strategies: Vec<ResolveStrategy>,
    /// Tokens longer than this after cleaning are reported as unresolved
    pub max_token_length: usize,
    /// Whether to drop leading quantities like "2" or "200 g"
    pub strip_quantities: bool,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            strategies: vec![
                ResolveStrategy::Exact,
                ResolveStrategy::PluralStripping,
                ResolveStrategy::EditDistance { max_distance: 1 },
            ],
            max_token_length: DEFAULT_MAX_TOKEN_LENGTH,
            strip_quantities: true,
        }
    }
}

impl ResolverConfig {
    /// Only accept tokens that are already catalog names
    pub fn exact_only() -> Self {
        Self {
            strategies: vec![ResolveStrategy::Exact],
            ..Default::default()
        }
    }

    /// Replace the edit-distance threshold, removing the strategy when it is 0
    pub fn with_max_edit_distance(mut self, max_distance: usize) -> Self {
        self.strategies
            .retain(|s| !matches!(s, ResolveStrategy::EditDistance { .. }));
        if max_distance > 0 {
            self.strategies
                .push(ResolveStrategy::EditDistance { max_distance });
        }
        self
    }
}

/// A token successfully mapped onto a catalog ingredient
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    /// The cleaned token as typed
    pub input: String,
    /// The catalog ingredient it resolved to
    pub ingredient: String,
    /// Which strategy produced the match
    pub strategy: ResolveStrategy,
}

/// Outcome of parsing a block of free text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedInventory {
    /// Tokens mapped onto catalog ingredients, in input order
    pub resolved: Vec<Resolution>,
    /// Cleaned tokens that matched nothing
    pub unresolved: Vec<String>,
}

impl ParsedInventory {
    /// The set of resolved ingredient names
    pub fn inventory(&self) -> Inventory {
        self.resolved.iter().map(|r| r.ingredient.clone()).collect()
    }

    /// Check if nothing at all was recognized
    pub fn is_empty(&self) -> bool {
        self.resolved.is_empty()
    }
}

/// Resolves user-typed ingredient names against a fixed vocabulary
#[derive(Debug, Clone)]
pub struct IngredientResolver {
    vocabulary: BTreeSet<String>,
    config: ResolverConfig,
}

/// Split free text into raw tokens, dropping blanks
pub fn tokenize(text: &str) -> Vec<String> {
    TOKEN_SEPARATOR
        .split(text)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

impl IngredientResolver {
    /// Create a resolver over a vocabulary with the default strategies
    pub fn new(vocabulary: BTreeSet<String>) -> Self {
        Self::with_config(vocabulary, ResolverConfig::default())
    }

    /// Create a resolver with explicit configuration
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fridge_raider::inventory_parser::{IngredientResolver, ResolverConfig};
    /// use fridge_raider::recipe_model::inventory_from;
    ///
    /// let resolver = IngredientResolver::with_config(
    ///     inventory_from(["eggs", "milk"]),
    ///     ResolverConfig::exact_only(),
    /// );
    /// let parsed = resolver.parse("Eggs, egg, milk");
    ///
    /// assert_eq!(parsed.resolved.len(), 2);
    /// assert_eq!(parsed.unresolved, vec!["egg".to_string()]);
    /// ```
    pub fn with_config(vocabulary: BTreeSet<String>, config: ResolverConfig) -> Self {
        info!(
            "Creating IngredientResolver over {} ingredients with strategies {:?}",
            vocabulary.len(),
            config.strategies
        );
        Self { vocabulary, config }
    }

    /// Create a resolver over every ingredient in a catalog
    pub fn for_catalog(catalog: &Catalog, config: ResolverConfig) -> Self {
        Self::with_config(catalog.vocabulary(), config)
    }

    /// Known ingredient names
    pub fn vocabulary(&self) -> &BTreeSet<String> {
        &self.vocabulary
    }

    /// Parse a block of free text into resolved and unresolved tokens
    pub fn parse(&self, text: &str) -> ParsedInventory {
        let mut parsed = ParsedInventory::default();

        for raw in tokenize(text) {
            let token = self.clean_token(&raw);
            if token.is_empty() {
                trace!("Token '{}' is empty after cleaning", raw);
                continue;
            }

            match self.resolve(&token) {
                Some(resolution) => {
                    // Two spellings of the same ingredient only count once
                    if !parsed
                        .resolved
                        .iter()
                        .any(|r| r.ingredient == resolution.ingredient)
                    {
                        parsed.resolved.push(resolution);
                    }
                }
                None => {
                    if !parsed.unresolved.contains(&token) {
                        parsed.unresolved.push(token);
                    }
                }
            }
        }

        debug!(
            "Parsed inventory text: {} resolved, {} unresolved",
            parsed.resolved.len(),
            parsed.unresolved.len()
        );
        parsed
    }

    /// Resolve a single cleaned token, trying each strategy in order
    pub fn resolve(&self, token: &str) -> Option<Resolution> {
        if token.len() > self.config.max_token_length {
            debug!("Token too long to resolve ({} chars)", token.len());
            return None;
        }

        self.config.strategies.iter().find_map(|strategy| {
            let ingredient = match strategy {
                ResolveStrategy::Exact => self.resolve_exact(token),
                ResolveStrategy::PluralStripping => self.resolve_plural(token),
                ResolveStrategy::EditDistance { max_distance } => {
                    self.resolve_edit_distance(token, *max_distance)
                }
            }?;

            trace!("Resolved '{}' -> '{}' via {:?}", token, ingredient, strategy);
            Some(Resolution {
                input: token.to_string(),
                ingredient,
                strategy: *strategy,
            })
        })
    }

    /// Lowercase, collapse whitespace, drop quantities, filler words and trailing punctuation
    fn clean_token(&self, raw: &str) -> String {
        let mut token = normalize_name(raw);

        if self.config.strip_quantities {
            token = LEADING_QUANTITY.replace(&token, "").into_owned();
        }

        while let Some(rest) = FILLER_PREFIXES
            .iter()
            .find_map(|prefix| token.strip_prefix(prefix))
        {
            token = rest.trim_start().to_string();
        }

        token
            .trim_matches(|c: char| !c.is_alphanumeric() && c != ' ')
            .trim()
            .to_string()
    }

    fn resolve_exact(&self, token: &str) -> Option<String> {
        self.vocabulary.get(token).cloned()
    }

    fn resolve_plural(&self, token: &str) -> Option<String> {
        let mut candidates = vec![format!("{token}s"), format!("{token}es")];

        if let Some(stem) = token.strip_suffix("ies") {
            candidates.push(format!("{stem}y"));
        }
        if let Some(stem) = token.strip_suffix('y') {
            candidates.push(format!("{stem}ies"));
        }
        if let Some(stem) = token.strip_suffix("es") {
            candidates.push(stem.to_string());
        }
        if let Some(stem) = token.strip_suffix('s') {
            candidates.push(stem.to_string());
        }

        candidates
            .into_iter()
            .find(|candidate| self.vocabulary.contains(candidate))
    }

    fn resolve_edit_distance(&self, token: &str, max_distance: usize) -> Option<String> {
        if token.chars().count() < MIN_FUZZY_TOKEN_LENGTH {
            return None;
        }

        let mut best: Option<(usize, &String)> = None;
        let mut tied = false;

        for candidate in &self.vocabulary {
            let distance = strsim::levenshtein(token, candidate);
            if distance > max_distance {
                continue;
            }
            match best {
                Some((best_distance, _)) if distance > best_distance => {}
                Some((best_distance, _)) if distance == best_distance => tied = true,
                _ => {
                    best = Some((distance, candidate));
                    tied = false;
                }
            }
        }

        if tied {
            debug!("Token '{}' is equally close to several ingredients", token);
            return None;
        }
        best.map(|(_, candidate)| candidate.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::inventory_from;

    fn create_resolver() -> IngredientResolver {
        IngredientResolver::new(inventory_from([
            "eggs", "cheese", "butter", "berries", "tomato", "parmesan", "olive oil", "potatoes",
        ]))
    }

    #[test]
    fn test_tokenize_separators() {
        let tokens = tokenize("eggs, cheese;butter\n\n  milk  ,");
        assert_eq!(tokens, vec!["eggs", "cheese", "butter", "milk"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize(" ,\n; ").is_empty());
    }

    #[test]
    fn test_clean_token() {
        let resolver = create_resolver();
        assert_eq!(resolver.clean_token("  2 Eggs "), "eggs");
        assert_eq!(resolver.clean_token("200 g Cheese."), "cheese");
        assert_eq!(resolver.clean_token("some butter"), "butter");
        assert_eq!(resolver.clean_token("3 x Tomato"), "tomato");
        assert_eq!(resolver.clean_token("Olive  Oil!"), "olive oil");
    }

    #[test]
    fn test_clean_token_stacked_fillers() {
        let resolver = create_resolver();
        assert_eq!(resolver.clean_token("some fresh basil"), "basil");
        assert_eq!(resolver.clean_token("the leftover rice"), "rice");
        assert_eq!(resolver.clean_token("2 a few fresh eggs"), "eggs");
    }

    #[test]
    fn test_exact_resolution() {
        let resolution = create_resolver().resolve("cheese").unwrap();
        assert_eq!(resolution.ingredient, "cheese");
        assert_eq!(resolution.strategy, ResolveStrategy::Exact);
    }

    #[test]
    fn test_plural_resolution() {
        let resolver = create_resolver();

        let egg = resolver.resolve("egg").unwrap();
        assert_eq!(egg.ingredient, "eggs");
        assert_eq!(egg.strategy, ResolveStrategy::PluralStripping);

        assert_eq!(resolver.resolve("berry").unwrap().ingredient, "berries");
        assert_eq!(resolver.resolve("tomatoes").unwrap().ingredient, "tomato");
        assert_eq!(resolver.resolve("potato").unwrap().ingredient, "potatoes");
    }

    #[test]
    fn test_edit_distance_resolution() {
        let resolution = create_resolver().resolve("parmesam").unwrap();
        assert_eq!(resolution.ingredient, "parmesan");
        assert_eq!(resolution.strategy, ResolveStrategy::EditDistance { max_distance: 1 });
    }

    #[test]
    fn test_edit_distance_ignores_short_tokens() {
        let resolver = IngredientResolver::new(inventory_from(["oil"]));
        assert!(resolver.resolve("oik").is_none());
    }

    #[test]
    fn test_edit_distance_rejects_ties() {
        let resolver = IngredientResolver::with_config(
            inventory_from(["cake", "lake"]),
            ResolverConfig::exact_only().with_max_edit_distance(1),
        );
        assert!(resolver.resolve("bake").is_none());
    }

    #[test]
    fn test_no_substring_matching() {
        // "oil" is inside "olive oil" but is not the same ingredient
        assert!(create_resolver().resolve("oil").is_none());
    }

    #[test]
    fn test_max_edit_distance_zero_disables_strategy() {
        let config = ResolverConfig::default().with_max_edit_distance(0);
        assert!(!config
            .strategies
            .iter()
            .any(|s| matches!(s, ResolveStrategy::EditDistance { .. })));
    }

    #[test]
    fn test_parse_deduplicates() {
        let parsed = create_resolver().parse("eggs, 2 eggs, egg, unicorn, Unicorn");
        assert_eq!(parsed.resolved.len(), 1);
        assert_eq!(parsed.unresolved, vec!["unicorn".to_string()]);
        assert_eq!(parsed.inventory(), inventory_from(["eggs"]));
    }
}
