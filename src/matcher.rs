//! # Recipe Matcher
//!
//! Ranks catalog recipes against a user's inventory.
//!
//! For each recipe the matcher computes which required ingredients the user
//! has, which are missing, and the integer match percentage. Optional filters
//! then drop recipes, and the survivors are ordered by match percentage,
//! highest first. Recipes with equal percentages keep their catalog order.
//!
//! The matcher holds no state: every call works only on the references it is
//! given, so it can run concurrently for any number of sessions.
//!
//! ## Usage
//!
//! ```rust
//! use fridge_raider::catalog::Catalog;
//! use fridge_raider::matcher::{rank_matches, MatchFilters};
//! use fridge_raider::recipe_model::{inventory_from, Recipe};
//!
//! let catalog = Catalog::new(vec![
//!     Recipe::new("Omelette").with_ingredients(["eggs", "cheese", "butter", "salt"]),
//! ]);
//! let inventory = inventory_from(["eggs", "cheese", "butter"]);
//!
//! let matches = rank_matches(&inventory, &catalog, &MatchFilters::default());
//! assert_eq!(matches.len(), 1);
//! assert_eq!(matches[0].match_percent, 75);
//! assert!(matches[0].missing.contains("salt"));
//! ```

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::recipe_model::{Inventory, Recipe, RecipeFlag};

/// Ingredients that rule a recipe out of the vegan filter
pub const NON_VEGAN_INGREDIENTS: &[&str] = &[
    "bacon",
    "beef",
    "broth",
    "butter",
    "cheese",
    "chicken",
    "chocolate chips",
    "croutons",
    "dressing",
    "eggs",
    "feta",
    "granola",
    "ground beef",
    "honey",
    "mayo",
    "milk",
    "mozzarella",
    "parmesan",
    "pepperoni",
    "pesto",
    "salmon",
    "shrimp",
    "tuna",
    "yogurt",
];

/// Result of matching one recipe against an inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchResult<'a> {
    /// The matched recipe
    pub recipe: &'a Recipe,
    /// Required ingredients the user has
    pub have: BTreeSet<String>,
    /// Required ingredients the user lacks
    pub missing: BTreeSet<String>,
    /// `floor(100 * |have| / |ingredients|)`, 0 for a recipe without ingredients
    pub match_percent: u8,
}

/// Inclusive bounds on the number of ingredients a recipe may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngredientCountRange {
    /// Smallest allowed ingredient count
    pub min: usize,
    /// Largest allowed ingredient count
    pub max: usize,
}

/// Filters applied while ranking; all active filters must pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchFilters {
    /// Keep only recipes the user can cook right now
    pub full_match_only: bool,
    /// Drop recipes using any of these ingredients
    pub exclusion_set: Option<BTreeSet<String>>,
    /// Drop recipes whose ingredient count falls outside the range
    pub ingredient_count_range: Option<IngredientCountRange>,
    /// Drop recipes without this attribute
    pub require_flag: Option<RecipeFlag>,
}

impl IngredientCountRange {
    /// Recipes needing at most four ingredients
    pub const QUICK: IngredientCountRange = IngredientCountRange { min: 1, max: 4 };

    /// Create a range, swapping the bounds if given in the wrong order
    pub fn new(min: usize, max: usize) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    /// Check if a count lies within the range
    pub fn contains(&self, count: usize) -> bool {
        (self.min..=self.max).contains(&count)
    }
}

impl MatchFilters {
    /// Filters that only exclude non-vegan recipes
    pub fn vegan() -> Self {
        Self::default().with_exclusions(NON_VEGAN_INGREDIENTS.iter().copied())
    }

    /// Only keep full matches
    pub fn with_full_match_only(mut self, enabled: bool) -> Self {
        self.full_match_only = enabled;
        self
    }

    /// Exclude recipes using any of the given ingredients
    pub fn with_exclusions<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclusion_set = Some(crate::recipe_model::inventory_from(ingredients));
        self
    }

    /// Restrict the number of required ingredients
    pub fn with_ingredient_count_range(mut self, range: IngredientCountRange) -> Self {
        self.ingredient_count_range = Some(range);
        self
    }

    /// Require a recipe attribute
    pub fn with_required_flag(mut self, flag: RecipeFlag) -> Self {
        self.require_flag = Some(flag);
        self
    }

    /// Check if any filter beyond the base inclusion rule is active
    pub fn is_active(&self) -> bool {
        self.full_match_only
            || self.exclusion_set.is_some()
            || self.ingredient_count_range.is_some()
            || self.require_flag.is_some()
    }

    /// Check a computed match against every active filter
    pub fn accepts(&self, result: &MatchResult<'_>) -> bool {
        if self.full_match_only && !result.is_full_match() {
            return false;
        }

        if let Some(excluded) = &self.exclusion_set {
            if !result.recipe.ingredients.is_disjoint(excluded) {
                return false;
            }
        }

        if let Some(range) = &self.ingredient_count_range {
            if !range.contains(result.recipe.ingredient_count()) {
                return false;
            }
        }

        if let Some(flag) = self.require_flag {
            if !result.recipe.has_flag(flag) {
                return false;
            }
        }

        true
    }
}

impl MatchResult<'_> {
    /// Check if the user has every required ingredient
    pub fn is_full_match(&self) -> bool {
        self.match_percent == 100
    }
}

/// Integer percentage of `have` over `total`, truncated, 0 when `total` is 0
pub fn match_percent(have: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    // have <= total, so the quotient never exceeds 100
    ((100 * have.min(total)) / total) as u8
}

/// Compute the overlap between an inventory and a single recipe
pub fn match_recipe<'a>(inventory: &Inventory, recipe: &'a Recipe) -> MatchResult<'a> {
    let have: BTreeSet<String> = recipe.ingredients.intersection(inventory).cloned().collect();
    let missing: BTreeSet<String> = recipe.ingredients.difference(inventory).cloned().collect();
    let match_percent = match_percent(have.len(), recipe.ingredients.len());

    MatchResult {
        recipe,
        have,
        missing,
        match_percent,
    }
}

/// Rank every catalog recipe sharing at least one ingredient with the inventory
///
/// Results are ordered by match percentage, highest first; ties keep catalog
/// order. An empty inventory always yields an empty list.
pub fn rank_matches<'a>(
    inventory: &Inventory,
    catalog: &'a Catalog,
    filters: &MatchFilters,
) -> Vec<MatchResult<'a>> {
    let mut matches: Vec<MatchResult<'a>> = catalog
        .recipes()
        .iter()
        .map(|recipe| match_recipe(inventory, recipe))
        .filter(|result| {
            let keep = filters.accepts(result) && !result.have.is_empty();
            trace!(
                "Recipe '{}' at {}% -> {}",
                result.recipe.name,
                result.match_percent,
                if keep { "kept" } else { "dropped" }
            );
            keep
        })
        .collect();

    // sort_by is stable, so equal percentages stay in catalog order
    matches.sort_by(|a, b| b.match_percent.cmp(&a.match_percent));

    debug!(
        "Ranked {} of {} recipes for an inventory of {} ingredients",
        matches.len(),
        catalog.len(),
        inventory.len()
    );
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recipe_model::inventory_from;

    fn omelette() -> Recipe {
        Recipe::new("Omelette").with_ingredients(["eggs", "cheese", "butter", "salt"])
    }

    #[test]
    fn test_match_percent_truncates() {
        assert_eq!(match_percent(1, 3), 33);
        assert_eq!(match_percent(2, 3), 66);
        assert_eq!(match_percent(3, 3), 100);
        assert_eq!(match_percent(0, 5), 0);
    }

    #[test]
    fn test_match_percent_zero_denominator() {
        assert_eq!(match_percent(0, 0), 0);
    }

    #[test]
    fn test_match_recipe_partition() {
        let recipe = omelette();
        let inventory = inventory_from(["eggs", "cheese", "milk"]);
        let result = match_recipe(&inventory, &recipe);

        assert_eq!(result.have, inventory_from(["eggs", "cheese"]));
        assert_eq!(result.missing, inventory_from(["butter", "salt"]));
        assert_eq!(result.match_percent, 50);
        assert!(!result.is_full_match());
    }

    #[test]
    fn test_recipe_without_ingredients_scores_zero() {
        let recipe = Recipe::new("Air Soup");
        let result = match_recipe(&inventory_from(["eggs"]), &recipe);
        assert_eq!(result.match_percent, 0);
        assert!(result.have.is_empty());
        assert!(result.missing.is_empty());
    }

    #[test]
    fn test_count_range_normalizes_bounds() {
        let range = IngredientCountRange::new(6, 2);
        assert_eq!(range, IngredientCountRange { min: 2, max: 6 });
        assert!(range.contains(2));
        assert!(range.contains(6));
        assert!(!range.contains(7));
    }

    #[test]
    fn test_filters_inactive_by_default() {
        assert!(!MatchFilters::default().is_active());
        assert!(MatchFilters::vegan().is_active());
        assert!(MatchFilters::default().with_full_match_only(true).is_active());
    }

    #[test]
    fn test_vegan_filter_uses_fixed_list() {
        let filters = MatchFilters::vegan();
        let excluded = filters.exclusion_set.unwrap();
        assert!(excluded.contains("eggs"));
        assert!(excluded.contains("ground beef"));
        assert!(!excluded.contains("tofu"));
    }

    #[test]
    fn test_vegan_filter_drops_dairy_and_honey_mixes() {
        let catalog = Catalog::new(vec![
            Recipe::new("Mug Cake").with_ingredients(["chocolate chips", "flour", "sugar"]),
            Recipe::new("Granola Bowl").with_ingredients(["granola", "berries"]),
            Recipe::new("Fruit Bowl").with_ingredients(["berries", "banana"]),
        ]);
        let inventory = inventory_from(["chocolate chips", "flour", "granola", "berries"]);
        let matches = rank_matches(&inventory, &catalog, &MatchFilters::vegan());

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].recipe.name, "Fruit Bowl");
    }

    #[test]
    fn test_required_flag_filter() {
        let catalog = Catalog::new(vec![
            Recipe::new("Stew").with_ingredients(["beef", "carrots"]).one_pot(),
            Recipe::new("Salad").with_ingredients(["lettuce", "carrots"]),
        ]);
        let filters = MatchFilters::default().with_required_flag(RecipeFlag::OnePot);
        let matches = rank_matches(&inventory_from(["carrots"]), &catalog, &filters);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].recipe.name, "Stew");
    }

    #[test]
    fn test_count_range_filter() {
        let catalog = Catalog::new(vec![
            Recipe::new("Toast").with_ingredients(["bread", "butter"]),
            Recipe::new("Club").with_ingredients(["bread", "bacon", "lettuce", "tomato", "mayo"]),
        ]);
        let filters = MatchFilters::default().with_ingredient_count_range(IngredientCountRange::QUICK);
        let matches = rank_matches(&inventory_from(["bread"]), &catalog, &filters);

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].recipe.name, "Toast");
    }
}
