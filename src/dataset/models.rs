use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub servings: Option<u32>,
    pub ingredients: Vec<Ingredient>,
    /// Preparation time in minutes
    pub time: u32,
    pub description: String,
    pub appliance: String,
    #[serde(rename = "ustensils", alias = "utensils", default)]
    pub utensils: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    #[serde(rename = "ingredient")]
    pub name: String,
    #[serde(default, alias = "quantite", skip_serializing_if = "Option::is_none")]
    pub quantity: Option<Quantity>,
    #[serde(default, alias = "unite", skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}

/// Amount of an ingredient, either a number (`400`) or free text (`"une pincée"`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Number(f64),
    Text(String),
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Number(n) => write!(f, "{n}"),
            Quantity::Text(s) => f.write_str(s),
        }
    }
}

impl fmt::Display for Ingredient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)?;
        match (&self.quantity, &self.unit) {
            (Some(quantity), Some(unit)) => write!(f, ": {quantity} {unit}"),
            (Some(quantity), None) => write!(f, ": {quantity}"),
            _ => Ok(()),
        }
    }
}

/// The full recipe list, read-only once loaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RecipeDocument")]
pub struct Dataset {
    recipes: Vec<Recipe>,
}

/// Wire shape of the dataset, before id checks
#[derive(Deserialize)]
struct RecipeDocument {
    recipes: Vec<Recipe>,
}

impl TryFrom<RecipeDocument> for Dataset {
    type Error = String;

    fn try_from(document: RecipeDocument) -> std::result::Result<Self, String> {
        check_unique_ids(&document.recipes)?;
        Ok(Self {
            recipes: document.recipes,
        })
    }
}

fn check_unique_ids(recipes: &[Recipe]) -> std::result::Result<(), String> {
    let mut seen = HashSet::with_capacity(recipes.len());
    match recipes.iter().find(|recipe| !seen.insert(recipe.id)) {
        Some(recipe) => Err(format!("Duplicate recipe id {}", recipe.id)),
        None => Ok(()),
    }
}

impl Dataset {
    pub fn new(recipes: Vec<Recipe>) -> Result<Self> {
        check_unique_ids(&recipes).map_err(Error::Parse)?;
        Ok(Self { recipes })
    }

    /// Decode a `{ "recipes": [...] }` document
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| Error::Parse(e.to_string()))
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn get(&self, position: usize) -> Option<&Recipe> {
        self.recipes.get(position)
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }
}
