use crate::dataset::{Dataset, Recipe};
use crate::error::Result;
use crate::search::extract::extract_facet;
use crate::search::facet::Facet;
use crate::search::matcher::{matches_all_tags, matches_query};
use crate::search::session::{ActiveTags, FacetOptions, SessionState};
use crate::utils::validation::{validate_query, validate_tag_value};
use std::sync::Arc;
use tracing::debug;

/// Incremental search over a loaded dataset.
///
/// Every operation either applies fully or returns an error with the state untouched.
/// After each successful call, `final_results` holds the recipes matching the main query
/// and every active tag, and `facet_options` is derived from exactly that set.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    dataset: Arc<Dataset>,
    state: SessionState,
}

impl SearchEngine {
    /// Start a session with no query and no tags: every recipe matches
    pub fn new(dataset: Arc<Dataset>) -> Self {
        let mut all: Vec<usize> = (0..dataset.len()).collect();
        sort_by_id(&dataset, &mut all);
        let mut engine = Self {
            dataset,
            state: SessionState {
                main_query: None,
                main_matches: all,
                ..SessionState::default()
            },
        };
        engine.recompute();
        engine
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn main_query(&self) -> Option<&str> {
        self.state.main_query()
    }

    pub fn active_tags(&self) -> &ActiveTags {
        &self.state.active_tags
    }

    pub fn facet_options(&self) -> &FacetOptions {
        &self.state.facet_options
    }

    pub fn main_matches(&self) -> Vec<&Recipe> {
        self.resolve(&self.state.main_matches)
    }

    pub fn final_results(&self) -> Vec<&Recipe> {
        self.resolve(&self.state.final_results)
    }

    /// Run the free-text search. An empty query clears it.
    pub fn set_main_query(&mut self, query: &str) -> Result<()> {
        validate_query(query)?;

        let mut matches: Vec<usize> = self
            .dataset
            .recipes()
            .iter()
            .enumerate()
            .filter(|(_, recipe)| matches_query(recipe, query))
            .map(|(position, _)| position)
            .collect();
        sort_by_id(&self.dataset, &mut matches);
        self.state.main_matches = matches;
        self.state.main_query = (!query.is_empty()).then(|| query.to_string());

        debug!(
            "Main query {:?} matched {} recipes",
            query,
            self.state.main_matches.len()
        );
        self.recompute();
        Ok(())
    }

    /// Add a tag. Returns false if the facet already had that value, in any case.
    pub fn add_tag(&mut self, facet: Facet, value: &str) -> Result<bool> {
        validate_tag_value(value)?;

        let added = if self.state.active_tags.contains(facet, value) {
            debug!("Tag {}:{} already active", facet, value);
            false
        } else {
            self.state.active_tags.get_mut(facet).push(value.to_string());
            true
        };

        self.recompute();
        Ok(added)
    }

    /// Remove the first occurrence of a tag, ignoring case. Returns false if it was not active.
    pub fn remove_tag(&mut self, facet: Facet, value: &str) -> bool {
        let removed = match self.state.active_tags.position(facet, value) {
            Some(index) => {
                self.state.active_tags.get_mut(facet).remove(index);
                true
            }
            None => {
                debug!("Tag {}:{} not active, nothing to remove", facet, value);
                false
            }
        };

        self.recompute();
        removed
    }

    /// Narrow the main matches by each facet's tags in turn, then rebuild facet options
    fn recompute(&mut self) {
        let mut results = self.state.main_matches.clone();

        for facet in Facet::ALL {
            let values = self.state.active_tags.get(facet);
            if values.is_empty() {
                continue;
            }
            let recipes = self.dataset.recipes();
            results.retain(|&position| matches_all_tags(&recipes[position], facet, values));
        }

        let recipes = self.resolve(&results);
        let facet_options = FacetOptions {
            ingredient: extract_facet(recipes.iter().copied(), Facet::Ingredient),
            appliance: extract_facet(recipes.iter().copied(), Facet::Appliance),
            utensil: extract_facet(recipes.iter().copied(), Facet::Utensil),
        };

        debug!(
            "{} of {} recipes match ({} tags active)",
            results.len(),
            self.state.main_matches.len(),
            self.state.active_tags.len()
        );

        self.state.final_results = results;
        self.state.facet_options = facet_options;
    }

    fn resolve(&self, positions: &[usize]) -> Vec<&Recipe> {
        positions
            .iter()
            .filter_map(|&position| self.dataset.get(position))
            .collect()
    }
}

fn sort_by_id(dataset: &Dataset, positions: &mut [usize]) {
    positions.sort_by_key(|&position| dataset.get(position).map(|recipe| recipe.id));
}
