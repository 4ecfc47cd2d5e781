//! Boolean predicates deciding whether a recipe matches a query or a tag.
//!
//! Every comparison is a case-insensitive substring test. Nothing is tokenized or scored.

use crate::dataset::Recipe;
use crate::search::facet::Facet;

/// Case-insensitive substring test
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// True if `query` appears in the name, the description, or any ingredient name.
/// An empty query matches every recipe.
pub fn matches_query(recipe: &Recipe, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    let needle = query.to_lowercase();
    let hit = |text: &str| text.to_lowercase().contains(&needle);

    hit(&recipe.name)
        || hit(&recipe.description)
        || recipe.ingredients.iter().any(|i| hit(&i.name))
}

/// True if the recipe carries `value` in the given facet
pub fn matches_tag(recipe: &Recipe, facet: Facet, value: &str) -> bool {
    match facet {
        Facet::Ingredient => recipe
            .ingredients
            .iter()
            .any(|i| contains_ignore_case(&i.name, value)),
        Facet::Appliance => contains_ignore_case(&recipe.appliance, value),
        Facet::Utensil => recipe
            .utensils
            .iter()
            .any(|u| contains_ignore_case(u, value)),
    }
}

/// True if the recipe carries every one of `values` in the given facet
pub fn matches_all_tags<S: AsRef<str>>(recipe: &Recipe, facet: Facet, values: &[S]) -> bool {
    values
        .iter()
        .all(|value| matches_tag(recipe, facet, value.as_ref()))
}
