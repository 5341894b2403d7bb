//! Sample produce catalog used by the `seed` binary and by the storefront
//! when it starts against an empty database.

use harvest_core::{Category, ItemFields};

const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

/// (name, category, price in cents, unit, description)
const SAMPLE_ITEMS: &[(&str, Category, i64, &str, &str)] = &[
    (
        "Fresh Carrots",
        Category::Vegetable,
        199,
        "kg",
        "Fresh, locally grown carrots. Perfect for salads and cooking.",
    ),
    (
        "Ripe Tomatoes",
        Category::Vegetable,
        249,
        "kg",
        "Juicy, ripe tomatoes grown in our organic farms.",
    ),
    (
        "Green Apples",
        Category::Fruit,
        399,
        "kg",
        "Crisp and sweet green apples. Great for snacking or baking.",
    ),
    (
        "Bananas",
        Category::Fruit,
        179,
        "kg",
        "Perfectly ripe bananas, rich in potassium and natural sweetness.",
    ),
    (
        "Fresh Spinach",
        Category::Vegetable,
        229,
        "bunch",
        "Nutrient-packed spinach leaves, excellent for salads and cooking.",
    ),
    (
        "Red Onions",
        Category::Vegetable,
        149,
        "kg",
        "Sweet red onions, perfect for salads and garnishing.",
    ),
    (
        "Sweet Oranges",
        Category::Fruit,
        499,
        "kg",
        "Juicy, vitamin-C rich oranges. Perfect for juicing or eating.",
    ),
    (
        "Fresh Cucumber",
        Category::Vegetable,
        189,
        "kg",
        "Crisp cucumbers, perfect for salads and sandwiches.",
    ),
];

pub fn sample_catalog() -> Vec<ItemFields> {
    SAMPLE_ITEMS
        .iter()
        .map(|(name, category, price_cents, unit, description)| ItemFields {
            name: name.to_string(),
            category: *category,
            price_cents: *price_cents,
            unit: unit.to_string(),
            description: description.to_string(),
            image: PLACEHOLDER_IMAGE.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use harvest_core::validation::validate_item_fields;

    #[test]
    fn test_sample_catalog_is_valid() {
        let items = sample_catalog();
        assert_eq!(items.len(), 8);
        assert!(items.iter().all(|f| validate_item_fields(f).is_ok()));
        assert!(items.iter().any(|f| f.category == Category::Fruit));
        assert!(items.iter().any(|f| f.category == Category::Vegetable));
    }
}
