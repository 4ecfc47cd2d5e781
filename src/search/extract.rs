use crate::dataset::Recipe;
use crate::search::facet::Facet;
use std::collections::HashSet;

/// Values of `facet` across `recipes`.
///
/// Ingredient and utensil values are de-duplicated case-insensitively, keeping the
/// first spelling seen. Appliances are not: the list holds one entry per recipe.
pub fn extract_facet<'a, I>(recipes: I, facet: Facet) -> Vec<String>
where
    I: IntoIterator<Item = &'a Recipe>,
{
    match facet {
        Facet::Appliance => recipes
            .into_iter()
            .map(|recipe| recipe.appliance.clone())
            .collect(),
        Facet::Ingredient => dedup_ignore_case(
            recipes
                .into_iter()
                .flat_map(|recipe| recipe.ingredients.iter().map(|i| i.name.as_str())),
        ),
        Facet::Utensil => dedup_ignore_case(
            recipes
                .into_iter()
                .flat_map(|recipe| recipe.utensils.iter().map(String::as_str)),
        ),
    }
}

fn dedup_ignore_case<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .filter(|value| seen.insert(value.to_lowercase()))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::Ingredient;

    fn recipe(id: u64, ingredients: &[&str], appliance: &str, utensils: &[&str]) -> Recipe {
        Recipe {
            id,
            name: format!("Recette {id}"),
            servings: None,
            ingredients: ingredients
                .iter()
                .map(|name| Ingredient {
                    name: name.to_string(),
                    quantity: None,
                    unit: None,
                })
                .collect(),
            time: 10,
            description: String::new(),
            appliance: appliance.to_string(),
            utensils: utensils.iter().map(|u| u.to_string()).collect(),
        }
    }

    #[test]
    fn test_ingredients_dedup_first_spelling_wins() {
        let recipes = vec![
            recipe(1, &["Lait de coco", "Sucre"], "Blender", &["verres"]),
            recipe(2, &["sucre", "Citron"], "Four", &["Verres", "moule"]),
        ];

        assert_eq!(
            extract_facet(&recipes, Facet::Ingredient),
            vec!["Lait de coco", "Sucre", "Citron"]
        );
        assert_eq!(extract_facet(&recipes, Facet::Utensil), vec!["verres", "moule"]);
    }

    #[test]
    fn test_appliances_one_per_recipe() {
        let recipes = vec![
            recipe(1, &[], "Four", &[]),
            recipe(2, &[], "Blender", &[]),
            recipe(3, &[], "Four", &[]),
        ];

        let appliances = extract_facet(&recipes, Facet::Appliance);
        assert_eq!(appliances.len(), recipes.len());
        assert_eq!(appliances, vec!["Four", "Blender", "Four"]);
    }

    #[test]
    fn test_utensil_duplicates_within_recipe() {
        let recipes = vec![recipe(1, &[], "Four", &["couteau", "Couteau", "couteau"])];
        assert_eq!(extract_facet(&recipes, Facet::Utensil), vec!["couteau"]);
    }

    #[test]
    fn test_empty_set() {
        let recipes: Vec<Recipe> = Vec::new();
        for facet in Facet::ALL {
            assert!(extract_facet(&recipes, facet).is_empty());
        }
    }
}
