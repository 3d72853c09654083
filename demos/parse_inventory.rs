//! # Parse Inventory Example
//!
//! Shows how free text is resolved against the catalog vocabulary and which
//! strategy recognized each ingredient.

use fridge_raider::catalog::Catalog;
use fridge_raider::inventory_parser::{IngredientResolver, ResolverConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("📝 Inventory Parser Example");
    println!("===========================\n");

    let catalog = Catalog::embedded()?;
    let text = "2 Eggs, some cheese\n200 g butter; tomatoes\nparmesean, tortillas, dragon fruit";
    println!("Input:\n{}\n", text);

    let configs = [
        ("Default strategies", ResolverConfig::default()),
        ("Exact names only", ResolverConfig::exact_only()),
    ];

    for (title, config) in configs {
        println!("{}", title);
        println!("{}", "-".repeat(title.len()));

        let resolver = IngredientResolver::for_catalog(&catalog, config);
        let parsed = resolver.parse(text);

        for resolution in &parsed.resolved {
            println!(
                "   {:<14} -> {:<14} ({:?})",
                resolution.input, resolution.ingredient, resolution.strategy
            );
        }
        for token in &parsed.unresolved {
            println!("   {:<14} -> ?", token);
        }
        println!();
    }

    Ok(())
}
