use crate::search::facet::{Facet, Tag};
use crate::search::matcher::contains_ignore_case;
use serde::{Deserialize, Serialize};

/// Selected tag values per facet, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveTags {
    pub ingredient: Vec<String>,
    pub appliance: Vec<String>,
    pub utensil: Vec<String>,
}

impl ActiveTags {
    pub fn get(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Ingredient => &self.ingredient,
            Facet::Appliance => &self.appliance,
            Facet::Utensil => &self.utensil,
        }
    }

    pub(crate) fn get_mut(&mut self, facet: Facet) -> &mut Vec<String> {
        match facet {
            Facet::Ingredient => &mut self.ingredient,
            Facet::Appliance => &mut self.appliance,
            Facet::Utensil => &mut self.utensil,
        }
    }

    /// Index of `value` in the facet's tags, compared case-insensitively
    pub fn position(&self, facet: Facet, value: &str) -> Option<usize> {
        let value = value.to_lowercase();
        self.get(facet).iter().position(|v| v.to_lowercase() == value)
    }

    pub fn contains(&self, facet: Facet, value: &str) -> bool {
        self.position(facet, value).is_some()
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|&facet| self.get(facet).is_empty())
    }

    pub fn len(&self) -> usize {
        Facet::ALL.iter().map(|&facet| self.get(facet).len()).sum()
    }

    /// All tags, facet by facet, each facet in insertion order
    pub fn iter(&self) -> impl Iterator<Item = Tag> + '_ {
        Facet::ALL.into_iter().flat_map(move |facet| {
            self.get(facet)
                .iter()
                .map(move |value| Tag::new(facet, value.clone()))
        })
    }
}

/// Selectable values per facet, derived from the current results
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacetOptions {
    pub ingredient: Vec<String>,
    pub appliance: Vec<String>,
    pub utensil: Vec<String>,
}

impl FacetOptions {
    pub fn get(&self, facet: Facet) -> &[String] {
        match facet {
            Facet::Ingredient => &self.ingredient,
            Facet::Appliance => &self.appliance,
            Facet::Utensil => &self.utensil,
        }
    }

    pub fn is_empty(&self) -> bool {
        Facet::ALL.iter().all(|&facet| self.get(facet).is_empty())
    }

    /// Options of `facet` containing `needle`, for narrowing a dropdown as the user types
    pub fn filtered(&self, facet: Facet, needle: &str) -> Vec<&str> {
        self.get(facet)
            .iter()
            .map(String::as_str)
            .filter(|option| contains_ignore_case(option, needle))
            .collect()
    }
}

/// Mutable state of one search session.
///
/// Result sets are positions into the dataset, ordered by recipe id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub(crate) main_query: Option<String>,
    pub(crate) main_matches: Vec<usize>,
    pub(crate) active_tags: ActiveTags,
    pub(crate) final_results: Vec<usize>,
    pub(crate) facet_options: FacetOptions,
}

impl SessionState {
    pub fn main_query(&self) -> Option<&str> {
        self.main_query.as_deref()
    }

    pub fn main_matches(&self) -> &[usize] {
        &self.main_matches
    }

    pub fn active_tags(&self) -> &ActiveTags {
        &self.active_tags
    }

    pub fn final_results(&self) -> &[usize] {
        &self.final_results
    }

    pub fn facet_options(&self) -> &FacetOptions {
        &self.facet_options
    }
}
