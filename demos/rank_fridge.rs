//! # Rank Fridge Example
//!
//! Ranks the bundled recipe catalog against a few inventories and shows how
//! the filters narrow the list.

use fridge_raider::catalog::Catalog;
use fridge_raider::matcher::{rank_matches, IngredientCountRange, MatchFilters};
use fridge_raider::recipe_model::{inventory_from, RecipeFlag};

fn print_matches(title: &str, inventory: &[&str], filters: &MatchFilters, catalog: &Catalog) {
    println!("{}", title);
    println!("{}", "-".repeat(title.chars().count()));

    let matches = rank_matches(&inventory_from(inventory.iter().copied()), catalog, filters);
    if matches.is_empty() {
        println!("   (no matches)\n");
        return;
    }

    for result in matches.iter().take(5) {
        let missing: Vec<&str> = result.missing.iter().map(String::as_str).collect();
        println!(
            "   {:>3}%  {}  missing: [{}]",
            result.match_percent,
            result.recipe.name,
            missing.join(", ")
        );
    }
    if matches.len() > 5 {
        println!("   ... {} more", matches.len() - 5);
    }
    println!();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("🧊 Fridge Raider Ranking Example");
    println!("================================\n");

    let catalog = Catalog::embedded()?;
    println!("Loaded {} recipes\n", catalog.len());

    let breakfast = ["eggs", "cheese", "butter", "milk", "bread"];

    print_matches("📖 Everything", &breakfast, &MatchFilters::default(), &catalog);
    print_matches(
        "✅ Cook now",
        &breakfast,
        &MatchFilters::default().with_full_match_only(true),
        &catalog,
    );
    print_matches(
        "🌱 Vegan",
        &["rice", "tofu", "soy sauce", "garlic", "broccoli", "oats", "banana"],
        &MatchFilters::vegan(),
        &catalog,
    );
    print_matches(
        "🍲 Quick one-pot",
        &breakfast,
        &MatchFilters::default()
            .with_required_flag(RecipeFlag::OnePot)
            .with_ingredient_count_range(IngredientCountRange::QUICK),
        &catalog,
    );

    Ok(())
}
