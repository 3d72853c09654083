//! # Recipe Data Model
//!
//! This module defines the data structures for recipes in the catalog and the
//! inventory a user matches against them.
//!
//! ## Core Concepts
//!
//! - **Recipe**: A named dish with a set of required ingredients
//! - **Inventory**: The set of ingredient names a user has on hand
//! - **RecipeFlag**: A boolean attribute of a recipe that a filter can require
//!
//! Ingredient names are always stored trimmed and lowercased so that set
//! operations between recipes and inventories compare like with like.
//!
//! ## Usage
//!
//! ```rust
//! use fridge_raider::recipe_model::{Recipe, RecipeFlag};
//!
//! let omelette = Recipe::new("Classic Omelette")
//!     .with_ingredients(["Eggs", "cheese", "butter", "salt"])
//!     .with_time("10 min")
//!     .one_pot();
//!
//! assert!(omelette.requires("eggs"));
//! assert!(omelette.has_flag(RecipeFlag::OnePot));
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Set of lowercase ingredient names the user has on hand
pub type Inventory = BTreeSet<String>;

/// Normalize an ingredient name to the form used in sets
pub fn normalize_name(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<&str>>()
        .join(" ")
        .to_lowercase()
}

/// Build an inventory from any list of names, normalizing each and dropping blanks
pub fn inventory_from<I, S>(items: I) -> Inventory
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|item| normalize_name(item.as_ref()))
        .filter(|item| !item.is_empty())
        .collect()
}

/// A recipe record from the catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recipe {
    /// Display label, may include decorative characters (e.g., "Fried Rice 🍚")
    pub name: String,

    /// Required ingredients, lowercase and unique
    pub ingredients: BTreeSet<String>,

    /// Free-text preparation steps
    pub instructions: String,

    /// Optional duration label (e.g., "15 min")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,

    /// Whether the dish is cooked in a single pot or pan
    #[serde(default)]
    pub one_pot: bool,

    /// Optional image URL, passed through to the presentation layer
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// Boolean recipe attributes a filter can require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecipeFlag {
    /// Cooked in a single pot or pan
    OnePot,
}

impl Recipe {
    /// Create a new recipe with just a name
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ingredients: BTreeSet::new(),
            instructions: String::new(),
            time: None,
            one_pot: false,
            image: None,
        }
    }

    /// Add required ingredients to this recipe
    pub fn with_ingredients<I, S>(mut self, ingredients: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.ingredients.extend(inventory_from(ingredients));
        self
    }

    /// Set the preparation steps
    pub fn with_instructions(mut self, instructions: &str) -> Self {
        self.instructions = instructions.to_string();
        self
    }

    /// Set the duration label
    pub fn with_time(mut self, time: &str) -> Self {
        self.time = Some(time.to_string());
        self
    }

    /// Set the image URL
    pub fn with_image(mut self, url: &str) -> Self {
        self.image = Some(url.to_string());
        self
    }

    /// Mark this recipe as a one-pot dish
    pub fn one_pot(mut self) -> Self {
        self.one_pot = true;
        self
    }

    /// Number of required ingredients
    pub fn ingredient_count(&self) -> usize {
        self.ingredients.len()
    }

    /// Check if the recipe needs the given ingredient
    pub fn requires(&self, ingredient: &str) -> bool {
        self.ingredients.contains(ingredient)
    }

    /// Check if a boolean attribute is set on this recipe
    pub fn has_flag(&self, flag: RecipeFlag) -> bool {
        match flag {
            RecipeFlag::OnePot => self.one_pot,
        }
    }

    /// Re-apply name normalization, used after deserializing untrusted data
    pub(crate) fn normalize(&mut self) {
        let ingredients = std::mem::take(&mut self.ingredients);
        self.ingredients = inventory_from(ingredients);
    }
}

impl RecipeFlag {
    /// Attribute name as it appears in catalog data
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipeFlag::OnePot => "one_pot",
        }
    }
}

impl FromStr for RecipeFlag {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "one_pot" | "onepot" => Ok(RecipeFlag::OnePot),
            other => Err(format!("unknown recipe flag: {other}")),
        }
    }
}

impl fmt::Display for RecipeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Recipe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)?;

        if let Some(time) = &self.time {
            write!(f, " ({})", time)?;
        }

        let ingredients: Vec<&str> = self.ingredients.iter().map(String::as_str).collect();
        write!(f, ": {}", ingredients.join(", "))
    }
}
