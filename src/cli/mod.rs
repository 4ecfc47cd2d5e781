// Command-line consumer of the search engine

pub mod commands;

use crate::search::Facet;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "finder")]
#[command(about = "Recipe Finder - incremental recipe search", long_about = None)]
pub struct Cli {
    /// YAML settings file (defaults to environment variables)
    #[arg(short, long, global = true, env = "FINDER_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Search recipes by text and tags
    Search {
        /// Free-text query (at least 3 characters)
        query: Option<String>,

        /// Require an ingredient (repeatable)
        #[arg(long = "ingredient")]
        ingredients: Vec<String>,

        /// Require an appliance (repeatable)
        #[arg(long = "appliance")]
        appliances: Vec<String>,

        /// Require a utensil (repeatable)
        #[arg(long = "utensil", alias = "ustensil")]
        utensils: Vec<String>,
    },

    /// List the values of a facet across all recipes
    Facets {
        /// ingredient, appliance or utensil
        facet: Facet,

        /// Only show values containing this text
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Interactive search session reading commands from stdin
    Shell,

    /// Drop the cached dataset and fetch it again
    Refresh,
}
