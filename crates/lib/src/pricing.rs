//! # Recipe Pricing
//!
//! Scores every store by what a recipe would cost there and picks the cheapest
//! store that stocks all of the recipe's ingredients.
//!
//! An ingredient is matched to the first item of the store whose name equals
//! the ingredient's `item_name`, ignoring case. Stores are scored in the order
//! they were fetched, and that order also breaks ties between equally cheap
//! stores.

use crate::types::{RecipeIngredient, Store};
use serde::{Deserialize, Serialize};

/// The message returned when no store can supply a whole recipe.
pub const NO_COMPLETE_STORE_MESSAGE: &str = "No store has all ingredients";

/// What a recipe costs at one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorePrice {
    pub store: Store,
    /// Sum of `price * quantity` over the ingredients the store stocks.
    pub total_price: f64,
    pub all_items_available: bool,
}

/// Returned instead of a single store when no store stocks every ingredient.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoCompleteStore {
    pub message: String,
    pub store_prices: Vec<StorePrice>,
}

/// The outcome of a cheapest-store lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CheapestStore {
    Found(StorePrice),
    NoCompleteStore(NoCompleteStore),
}

impl CheapestStore {
    /// The winning quote, if some store stocks every ingredient.
    pub fn found(&self) -> Option<&StorePrice> {
        match self {
            CheapestStore::Found(price) => Some(price),
            CheapestStore::NoCompleteStore(_) => None,
        }
    }
}

/// Prices a recipe's ingredients at a single store.
///
/// The store's `items` must be loaded; a store without loaded items is treated
/// as stocking nothing. Ingredients the store does not stock leave the total
/// untouched and clear `all_items_available`.
pub fn quote_store(store: Store, ingredients: &[RecipeIngredient]) -> StorePrice {
    let items = store.items.as_deref().unwrap_or_default();
    let mut total_price = 0.0;
    let mut all_items_available = true;

    for ingredient in ingredients {
        let wanted = ingredient.item_name.to_lowercase();
        match items.iter().find(|item| item.name.to_lowercase() == wanted) {
            Some(item) => total_price += item.price * ingredient.quantity,
            None => all_items_available = false,
        }
    }

    StorePrice {
        store,
        total_price,
        all_items_available,
    }
}

/// Finds the cheapest store among those that stock every ingredient.
///
/// When none qualifies, every store's quote is returned so callers can see
/// what is missing where.
pub fn find_cheapest_store(stores: Vec<Store>, ingredients: &[RecipeIngredient]) -> CheapestStore {
    let mut quotes: Vec<StorePrice> = stores
        .into_iter()
        .map(|store| quote_store(store, ingredients))
        .collect();

    // `min_by` keeps the first of several equal minima.
    let cheapest = quotes
        .iter()
        .enumerate()
        .filter(|(_, quote)| quote.all_items_available)
        .min_by(|(_, a), (_, b)| a.total_price.total_cmp(&b.total_price))
        .map(|(index, _)| index);

    match cheapest {
        Some(index) => CheapestStore::Found(quotes.swap_remove(index)),
        None => CheapestStore::NoCompleteStore(NoCompleteStore {
            message: NO_COMPLETE_STORE_MESSAGE.to_string(),
            store_prices: quotes,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Item;
    use chrono::Utc;

    fn store(id: &str, items: &[(&str, f64)]) -> Store {
        let now = Utc::now();
        Store {
            id: id.to_string(),
            name: format!("Store {id}"),
            location: None,
            created_at: now,
            updated_at: now,
            items: Some(
                items
                    .iter()
                    .enumerate()
                    .map(|(i, (name, price))| Item {
                        id: format!("{id}-item-{i}"),
                        name: name.to_string(),
                        price: *price,
                        unit: "each".to_string(),
                        store_id: id.to_string(),
                        created_at: now,
                        updated_at: now,
                        store: None,
                    })
                    .collect(),
            ),
        }
    }

    fn ingredient(item_name: &str, quantity: f64) -> RecipeIngredient {
        RecipeIngredient {
            id: format!("ing-{item_name}"),
            recipe_id: "recipe".to_string(),
            item_name: item_name.to_string(),
            quantity,
            unit: "each".to_string(),
        }
    }

    #[test]
    fn quote_sums_price_times_quantity() {
        let quote = quote_store(
            store("a", &[("Flour", 2.0), ("Eggs", 0.5)]),
            &[ingredient("flour", 3.0), ingredient("eggs", 4.0)],
        );
        assert!(quote.all_items_available);
        assert_eq!(quote.total_price, 8.0);
    }

    #[test]
    fn quote_matches_names_ignoring_case() {
        let quote = quote_store(store("a", &[("MILK", 1.25)]), &[ingredient("mIlK", 2.0)]);
        assert!(quote.all_items_available);
        assert_eq!(quote.total_price, 2.5);
    }

    #[test]
    fn quote_uses_first_item_with_matching_name() {
        let quote = quote_store(
            store("a", &[("Butter", 3.0), ("butter", 1.0)]),
            &[ingredient("butter", 1.0)],
        );
        assert_eq!(quote.total_price, 3.0);
    }

    #[test]
    fn quote_flags_missing_ingredient_but_keeps_partial_total() {
        let quote = quote_store(
            store("a", &[("Flour", 2.0)]),
            &[ingredient("flour", 1.0), ingredient("sugar", 1.0)],
        );
        assert!(!quote.all_items_available);
        assert_eq!(quote.total_price, 2.0);
    }

    #[test]
    fn quote_treats_unloaded_items_as_empty() {
        let mut bare = store("a", &[]);
        bare.items = None;
        let quote = quote_store(bare, &[ingredient("flour", 1.0)]);
        assert!(!quote.all_items_available);
        assert_eq!(quote.total_price, 0.0);
    }

    #[test]
    fn cheapest_ignores_cheaper_incomplete_store() {
        let stores = vec![
            store("partial", &[("Flour", 0.1)]),
            store("pricey", &[("Flour", 5.0), ("Sugar", 5.0)]),
            store("fair", &[("flour", 2.0), ("sugar", 1.0)]),
        ];
        let outcome = find_cheapest_store(
            stores,
            &[ingredient("Flour", 1.0), ingredient("Sugar", 2.0)],
        );

        let winner = outcome.found().expect("a complete store exists");
        assert_eq!(winner.store.id, "fair");
        assert_eq!(winner.total_price, 4.0);
    }

    #[test]
    fn cheapest_breaks_ties_by_fetch_order() {
        let stores = vec![
            store("first", &[("Rice", 2.0)]),
            store("second", &[("Rice", 2.0)]),
        ];
        let outcome = find_cheapest_store(stores, &[ingredient("rice", 1.0)]);
        assert_eq!(outcome.found().unwrap().store.id, "first");
    }

    #[test]
    fn cheapest_lists_all_quotes_when_no_store_qualifies() {
        let stores = vec![store("a", &[("Flour", 1.0)]), store("b", &[("Sugar", 1.0)])];
        let outcome = find_cheapest_store(
            stores,
            &[ingredient("flour", 1.0), ingredient("sugar", 1.0)],
        );

        match outcome {
            CheapestStore::NoCompleteStore(none) => {
                assert_eq!(none.message, NO_COMPLETE_STORE_MESSAGE);
                let ids: Vec<_> = none.store_prices.iter().map(|p| p.store.id.as_str()).collect();
                assert_eq!(ids, ["a", "b"]);
                assert!(none.store_prices.iter().all(|p| !p.all_items_available));
            }
            CheapestStore::Found(price) => panic!("unexpected winner {}", price.store.id),
        }
    }

    #[test]
    fn empty_recipe_is_supplied_by_first_store() {
        let stores = vec![store("a", &[]), store("b", &[("Salt", 1.0)])];
        let outcome = find_cheapest_store(stores, &[]);
        let winner = outcome.found().unwrap();
        assert_eq!(winner.store.id, "a");
        assert_eq!(winner.total_price, 0.0);
    }

    #[test]
    fn no_stores_yields_empty_quote_list() {
        let outcome = find_cheapest_store(Vec::new(), &[ingredient("salt", 1.0)]);
        assert_eq!(
            outcome,
            CheapestStore::NoCompleteStore(NoCompleteStore {
                message: NO_COMPLETE_STORE_MESSAGE.to_string(),
                store_prices: Vec::new(),
            })
        );
    }

    #[test]
    fn serializes_in_camel_case() {
        let outcome =
            find_cheapest_store(vec![store("a", &[("Salt", 1.5)])], &[ingredient("salt", 2.0)]);
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["totalPrice"], 3.0);
        assert_eq!(json["allItemsAvailable"], true);
        assert_eq!(json["store"]["items"][0]["storeId"], "a");
    }
}
