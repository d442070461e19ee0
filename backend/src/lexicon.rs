//! Keyword lexicons.
//!
//! Every list here is matched by lowercase substring. The household list
//! (freshness filter) and the pantry list (pantry separator) are deliberately
//! kept apart: they overlap but disagree on butter, stock, pasta, rice,
//! canned and dried goods, and merging them changes which items reach the
//! shopping categories.

use crate::models::Category;

/// Items dropped from database-sourced dishes because they are assumed on hand.
pub const HOUSEHOLD_STAPLES: &[&str] = &[
    "salt", "pepper", "olive oil", "vegetable oil", "canola oil", "cooking oil",
    "sugar", "flour", "baking powder", "baking soda", "vanilla extract",
    "soy sauce", "vinegar", "oil", "black pepper", "white pepper", "oregano",
    "basil", "thyme", "rosemary", "paprika", "cumin", "cinnamon", "nutmeg",
    "mayonnaise", "ketchup", "mustard", "hot sauce", "butter", "margarine",
    "dried herbs", "spices", "seasoning",
];

/// Items moved out of the shopping categories into the pantry list.
pub const PANTRY_STAPLES: &[&str] = &[
    "salt", "pepper", "sugar", "flour", "oil", "vinegar", "spice", "herb",
    "seasoning", "stock", "pasta", "rice", "grain", "canned", "dried",
    "baking", "sauce",
];

/// Category keyword tables, in matching priority. `Other` has no keywords.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Meat,
        &[
            "beef", "chicken", "pork", "turkey", "veal", "lamb", "ground meat",
            "steak", "sausage", "bacon", "ham", "salami",
        ],
    ),
    (
        Category::Fish,
        &[
            "fish", "salmon", "tuna", "cod", "tilapia", "shrimp", "seafood", "crab",
            "lobster", "clam", "oyster", "mussel", "scallop",
        ],
    ),
    (
        Category::Produce,
        &[
            "vegetable", "fruit", "tomato", "lettuce", "onion", "garlic", "pepper",
            "carrot", "broccoli", "cabbage", "spinach", "apple", "orange", "banana",
            "herb", "lemon",
        ],
    ),
    (
        Category::Dairy,
        &["milk", "cheese", "yogurt", "butter", "cream", "dairy", "ice cream"],
    ),
    (
        Category::Grains,
        &["rice", "pasta", "bread", "flour", "cereal", "oat", "grain", "wheat", "barley"],
    ),
    (
        Category::Condiments,
        &[
            "sauce", "oil", "vinegar", "ketchup", "mustard", "mayo", "dressing",
            "seasoning", "spice",
        ],
    ),
];

/// Default amounts for ingredients listed without a quantity, in priority order.
pub const AS_NEEDED_ESTIMATES: &[(&[&str], &str)] = &[
    (&["meat", "chicken", "beef", "pork", "steak"], "250g"),
    (&["fish", "salmon", "tuna"], "200g"),
    (&["vegetable", "carrot", "potato", "tomato"], "100g"),
];

/// Names measured in millilitres rather than grams when given in cups.
pub const LIQUID_KEYWORDS: &[&str] = &["milk", "water", "juice", "broth", "stock"];

/// `true` if the lowercased `name` contains any keyword.
pub fn contains_any(name: &str, keywords: &[&str]) -> bool {
    let lower = name.to_lowercase();
    keywords.iter().any(|k| lower.contains(k))
}
