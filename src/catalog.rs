//! # Recipe Catalog
//!
//! The catalog is the fixed, ordered list of recipes loaded once at startup and
//! shared read-only afterwards. Catalog order matters: ranking ties keep it.
//!
//! Recipes can come from the bundled table compiled into the binary or from a
//! JSON file with the same shape:
//!
//! ```json
//! [
//!   {
//!     "name": "Classic Omelette",
//!     "ingredients": ["eggs", "cheese", "butter", "salt"],
//!     "instructions": "Whisk eggs, melt butter, cook until fluffy, add cheese.",
//!     "time": "10 min",
//!     "one_pot": true,
//!     "image": "https://example.com/omelette.jpg"
//!   }
//! ]
//! ```

use log::{debug, info, warn};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use crate::catalog_errors::CatalogError;
use crate::recipe_model::Recipe;

/// Recipe table shipped with the bot
const EMBEDDED_CATALOG: &str = include_str!("../data/recipes.json");

/// Ordered, immutable collection of recipes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    recipes: Vec<Recipe>,
}

impl Catalog {
    /// Wrap an already-built list of recipes without validation
    ///
    /// Recipes with an empty ingredient set are kept; the ranker scores them at 0%.
    pub fn new(recipes: Vec<Recipe>) -> Self {
        for recipe in recipes.iter().filter(|r| r.ingredients.is_empty()) {
            warn!("Recipe '{}' has no ingredients and will never match", recipe.name);
        }
        Self { recipes }
    }

    /// Load the bundled recipe table
    ///
    /// # Examples
    ///
    /// ```rust
    /// use fridge_raider::catalog::Catalog;
    ///
    /// let catalog = Catalog::embedded()?;
    /// assert!(!catalog.is_empty());
    /// assert!(catalog.knows("eggs"));
    /// # Ok::<(), fridge_raider::catalog_errors::CatalogError>(())
    /// ```
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json_str(EMBEDDED_CATALOG)
    }

    /// Parse and validate a catalog from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let mut recipes: Vec<Recipe> = serde_json::from_str(json)?;

        if recipes.is_empty() {
            return Err(CatalogError::Empty);
        }

        for recipe in recipes.iter_mut() {
            recipe.normalize();
            if recipe.ingredients.is_empty() {
                return Err(CatalogError::EmptyIngredients(recipe.name.clone()));
            }
        }

        debug!("Parsed {} recipes from JSON", recipes.len());
        Ok(Self { recipes })
    }

    /// Read and validate a catalog from a JSON file
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        info!("Loading recipe catalog from {}", path.display());
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }

    /// Recipes in catalog order
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    /// Number of recipes
    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    /// Check if the catalog has no recipes
    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    /// Every ingredient used by at least one recipe, sorted alphabetically
    pub fn vocabulary(&self) -> BTreeSet<String> {
        self.recipes
            .iter()
            .flat_map(|recipe| recipe.ingredients.iter().cloned())
            .collect()
    }

    /// Check if any recipe uses the given ingredient
    pub fn knows(&self, ingredient: &str) -> bool {
        self.recipes.iter().any(|recipe| recipe.requires(ingredient))
    }

    /// Look up a recipe by position
    pub fn get(&self, index: usize) -> Option<&Recipe> {
        self.recipes.get(index)
    }

    /// Position of a recipe borrowed from this catalog
    pub fn index_of(&self, recipe: &Recipe) -> Option<usize> {
        self.recipes.iter().position(|r| std::ptr::eq(r, recipe))
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Recipe;
    type IntoIter = std::slice::Iter<'a, Recipe>;

    fn into_iter(self) -> Self::IntoIter {
        self.recipes.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_catalog_loads() {
        let catalog = Catalog::embedded().unwrap();
        assert_eq!(catalog.len(), 38);
        assert!(catalog.recipes().iter().all(|r| !r.ingredients.is_empty()));
        assert!(catalog.recipes()[0].name.starts_with("Classic Omelette"));
    }

    #[test]
    fn test_vocabulary_is_sorted_and_unique() {
        let catalog = Catalog::new(vec![
            Recipe::new("A").with_ingredients(["salt", "eggs"]),
            Recipe::new("B").with_ingredients(["eggs", "butter"]),
        ]);

        let vocabulary: Vec<String> = catalog.vocabulary().into_iter().collect();
        assert_eq!(vocabulary, vec!["butter", "eggs", "salt"]);
    }

    #[test]
    fn test_rejects_recipe_without_ingredients() {
        let json = r#"[{"name": "Air Soup", "ingredients": [], "instructions": "Stir."}]"#;
        let err = Catalog::from_json_str(json).unwrap_err();
        assert!(matches!(err, CatalogError::EmptyIngredients(name) if name == "Air Soup"));
    }

    #[test]
    fn test_rejects_blank_only_ingredients() {
        let json = r#"[{"name": "Air Soup", "ingredients": ["  "], "instructions": "Stir."}]"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(CatalogError::EmptyIngredients(_))
        ));
    }

    #[test]
    fn test_rejects_empty_catalog() {
        assert!(matches!(Catalog::from_json_str("[]"), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_duplicate_names_are_kept() {
        let json = r#"[
            {"name": "Toast", "ingredients": ["bread"], "instructions": "Toast."},
            {"name": "Toast", "ingredients": ["bread", "butter"], "instructions": "Toast and butter."}
        ]"#;
        let catalog = Catalog::from_json_str(json).unwrap();
        assert_eq!(catalog.len(), 2);
    }
}
