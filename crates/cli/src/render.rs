//! # Plain-Text Rendering
//!
//! Formats API records for the terminal. Every function returns a `String` so
//! the output can be checked without capturing stdout.

use shopper::{CheapestStore, Item, Recipe, Store, StorePrice};
use std::fmt::Write;

fn price(value: f64) -> String {
    format!("${value:.2}")
}

pub fn stores(stores: &[Store]) -> String {
    let mut out = format!("Stores ({})\n", stores.len());
    for store in stores {
        let _ = write!(out, "- {} [{}]", store.name, store.id);
        if let Some(location) = &store.location {
            let _ = write!(out, " @ {location}");
        }
        out.push('\n');
        for item in store.items.as_deref().unwrap_or_default() {
            let _ = writeln!(out, "    {} {} / {}", item.name, price(item.price), item.unit);
        }
    }
    out
}

pub fn store(store: &Store) -> String {
    format!("Created store '{}' [{}]\n", store.name, store.id)
}

pub fn items(items: &[Item]) -> String {
    let mut out = format!("Items ({})\n", items.len());
    for item in items {
        let store_name = item
            .store
            .as_ref()
            .map(|store| store.name.as_str())
            .unwrap_or("unknown store");
        let _ = writeln!(
            out,
            "- {} {} / {} at {} [{}]",
            item.name,
            price(item.price),
            item.unit,
            store_name,
            item.id
        );
    }
    out
}

pub fn item(item: &Item) -> String {
    format!("Created item '{}' [{}]\n", item.name, item.id)
}

pub fn recipes(recipes: &[Recipe]) -> String {
    let mut out = format!("Recipes ({})\n", recipes.len());
    for recipe in recipes {
        let _ = write!(out, "- {} [{}]", recipe.name, recipe.id);
        if let Some(description) = &recipe.description {
            let _ = write!(out, ": {description}");
        }
        out.push('\n');
        for ingredient in recipe.ingredients.as_deref().unwrap_or_default() {
            let _ = writeln!(
                out,
                "    {} {} {}",
                ingredient.quantity, ingredient.unit, ingredient.item_name
            );
        }
    }
    out
}

pub fn recipe(recipe: &Recipe) -> String {
    format!("Created recipe '{}' [{}]\n", recipe.name, recipe.id)
}

fn quote_line(quote: &StorePrice) -> String {
    let availability = if quote.all_items_available {
        "all items"
    } else {
        "missing items"
    };
    format!(
        "- {}: {} ({availability})\n",
        quote.store.name,
        price(quote.total_price)
    )
}

pub fn cheapest_store(outcome: &CheapestStore) -> String {
    match outcome {
        CheapestStore::Found(quote) => format!(
            "Cheapest store: {} [{}]\nTotal price: {}\n",
            quote.store.name,
            quote.store.id,
            price(quote.total_price)
        ),
        CheapestStore::NoCompleteStore(none) => {
            let mut out = format!("{}\n", none.message);
            for quote in &none.store_prices {
                out.push_str(&quote_line(quote));
            }
            out
        }
    }
}
