use crate::dataset::Recipe;
use crate::search::{Facet, SearchEngine};
use crate::{Error, Result};
use std::io::{BufRead, Write};
use tracing::warn;

/// Tags given on the command line, per facet
#[derive(Debug, Default)]
pub struct TagArgs {
    pub ingredients: Vec<String>,
    pub appliances: Vec<String>,
    pub utensils: Vec<String>,
}

/// Apply a query and tags, then print results and facet lists
pub fn search(
    engine: &mut SearchEngine,
    query: Option<&str>,
    tags: &TagArgs,
    out: &mut impl Write,
) -> Result<()> {
    if let Some(query) = query {
        engine.set_main_query(query)?;
    }

    let groups = [
        (Facet::Ingredient, &tags.ingredients),
        (Facet::Appliance, &tags.appliances),
        (Facet::Utensil, &tags.utensils),
    ];
    for (facet, values) in groups {
        for value in values {
            engine.add_tag(facet, value)?;
        }
    }

    print_results(engine, out)?;
    print_facets(engine, out)?;
    Ok(())
}

/// Print the values of one facet over the current results
pub fn facets(
    engine: &SearchEngine,
    facet: Facet,
    filter: Option<&str>,
    out: &mut impl Write,
) -> Result<()> {
    let options = engine.facet_options().filtered(facet, filter.unwrap_or(""));
    if options.is_empty() {
        writeln!(out, "No {facet} values found")?;
        return Ok(());
    }

    for option in options {
        writeln!(out, "{option}")?;
    }
    Ok(())
}

/// A line typed in the interactive shell
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Query(String),
    Clear,
    Add(Facet, String),
    Remove(Facet, String),
    Show,
    Help,
    Quit,
}

pub fn parse_shell_command(line: &str) -> Result<ShellCommand> {
    let line = line.trim();
    let (verb, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
    let rest = rest.trim();

    let tag = |rest: &str| -> Result<(Facet, String)> {
        let (facet, value) = rest.split_once(char::is_whitespace).ok_or_else(|| {
            Error::Validation("Expected a facet and a value, e.g. `add ingredient coco`".to_string())
        })?;
        Ok((facet.parse()?, value.trim().to_string()))
    };

    match verb.to_lowercase().as_str() {
        "query" | "q" => Ok(ShellCommand::Query(rest.to_string())),
        "clear" => Ok(ShellCommand::Clear),
        "add" => tag(rest).map(|(facet, value)| ShellCommand::Add(facet, value)),
        "remove" | "rm" => tag(rest).map(|(facet, value)| ShellCommand::Remove(facet, value)),
        "show" | "" => Ok(ShellCommand::Show),
        "help" | "?" => Ok(ShellCommand::Help),
        "quit" | "exit" => Ok(ShellCommand::Quit),
        other => Err(Error::Validation(format!(
            "Unknown command: {other}. Type `help` for the list"
        ))),
    }
}

/// Read commands line by line until `quit` or end of input.
/// Validation errors are reported and the session continues.
pub fn shell(engine: &mut SearchEngine, input: impl BufRead, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{} recipes loaded. Type `help` for commands.",
        engine.dataset().len()
    )?;

    for line in input.lines() {
        let line = line?;
        let outcome = parse_shell_command(&line).and_then(|command| match command {
            ShellCommand::Quit => Ok(false),
            command => run_shell_command(engine, command, out).map(|()| true),
        });

        match outcome {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) if e.is_recoverable() => {
                writeln!(out, "✗ {e}")?;
            }
            Err(e) => return Err(e),
        }
    }

    Ok(())
}

fn run_shell_command(
    engine: &mut SearchEngine,
    command: ShellCommand,
    out: &mut impl Write,
) -> Result<()> {
    match command {
        ShellCommand::Query(query) => {
            engine.set_main_query(&query)?;
            print_results(engine, out)?;
        }
        ShellCommand::Clear => {
            engine.set_main_query("")?;
            print_results(engine, out)?;
        }
        ShellCommand::Add(facet, value) => {
            if !engine.add_tag(facet, &value)? {
                writeln!(out, "{facet}:{value} is already active")?;
            }
            print_results(engine, out)?;
        }
        ShellCommand::Remove(facet, value) => {
            if !engine.remove_tag(facet, &value) {
                warn!("Tried to remove inactive tag {}:{}", facet, value);
                writeln!(out, "{facet}:{value} was not active")?;
            }
            print_results(engine, out)?;
        }
        ShellCommand::Show => {
            print_results(engine, out)?;
            print_facets(engine, out)?;
        }
        ShellCommand::Help => print_help(out)?,
        ShellCommand::Quit => {}
    }
    Ok(())
}

// Helper functions

fn print_results(engine: &SearchEngine, out: &mut impl Write) -> Result<()> {
    let tags: Vec<String> = engine.active_tags().iter().map(|t| t.to_string()).collect();
    if let Some(query) = engine.main_query() {
        writeln!(out, "Query: {query}")?;
    }
    if !tags.is_empty() {
        writeln!(out, "Tags: {}", tags.join(", "))?;
    }

    let results = engine.final_results();
    if results.is_empty() {
        writeln!(out, "No recipes found")?;
        return Ok(());
    }

    writeln!(out, "\nFound {} recipes:\n", results.len())?;
    writeln!(out, "{:<5} {:<50} {:>6}", "ID", "Name", "Time")?;
    writeln!(out, "{}", "-".repeat(63))?;
    for recipe in results {
        print_recipe_row(recipe, out)?;
    }
    writeln!(out)?;
    Ok(())
}

fn print_recipe_row(recipe: &Recipe, out: &mut impl Write) -> Result<()> {
    writeln!(
        out,
        "{:<5} {:<50} {:>3} min",
        recipe.id,
        truncate(&recipe.name, 48),
        recipe.time
    )?;
    Ok(())
}

fn print_facets(engine: &SearchEngine, out: &mut impl Write) -> Result<()> {
    let options = engine.facet_options();
    for facet in Facet::ALL {
        let values = options.get(facet);
        if values.is_empty() {
            writeln!(out, "{facet}s: -")?;
        } else {
            writeln!(out, "{facet}s: {}", values.join(", "))?;
        }
    }
    Ok(())
}

fn print_help(out: &mut impl Write) -> Result<()> {
    writeln!(out, "Commands:")?;
    writeln!(out, "  query <text>            search names, descriptions and ingredients")?;
    writeln!(out, "  clear                   drop the text query")?;
    writeln!(out, "  add <facet> <value>     require an ingredient, appliance or utensil")?;
    writeln!(out, "  remove <facet> <value>  drop a tag")?;
    writeln!(out, "  show                    list results and facet values")?;
    writeln!(out, "  quit")?;
    Ok(())
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len - 3).collect();
        format!("{head}...")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Dataset, Ingredient};
    use std::sync::Arc;

    fn engine() -> SearchEngine {
        let recipe = |id: u64, name: &str, ingredient: &str, appliance: &str| Recipe {
            id,
            name: name.to_string(),
            servings: Some(4),
            ingredients: vec![Ingredient {
                name: ingredient.to_string(),
                quantity: None,
                unit: None,
            }],
            time: 20,
            description: String::new(),
            appliance: appliance.to_string(),
            utensils: vec!["couteau".to_string()],
        };
        let dataset = Dataset::new(vec![
            recipe(1, "Tarte aux pommes", "pomme", "four"),
            recipe(2, "Poisson grillé", "poisson", "grill"),
        ])
        .unwrap();
        SearchEngine::new(Arc::new(dataset))
    }

    #[test]
    fn test_parse_shell_command() {
        assert_eq!(
            parse_shell_command("query tarte aux").unwrap(),
            ShellCommand::Query("tarte aux".to_string())
        );
        assert_eq!(
            parse_shell_command("add ustensil moule à tarte").unwrap(),
            ShellCommand::Add(Facet::Utensil, "moule à tarte".to_string())
        );
        assert_eq!(
            parse_shell_command("  rm appliance four ").unwrap(),
            ShellCommand::Remove(Facet::Appliance, "four".to_string())
        );
        assert_eq!(parse_shell_command("").unwrap(), ShellCommand::Show);
        assert!(parse_shell_command("add ingredient").is_err());
        assert!(parse_shell_command("add spice sel").is_err());
        assert!(parse_shell_command("bake").is_err());
    }

    #[test]
    fn test_search_command_output() {
        let mut engine = engine();
        let mut out = Vec::new();
        let tags = TagArgs {
            appliances: vec!["four".to_string()],
            ..TagArgs::default()
        };

        search(&mut engine, None, &tags, &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("Found 1 recipes"));
        assert!(out.contains("Tarte aux pommes"));
        assert!(!out.contains("Poisson grillé"));
        assert!(out.contains("ingredients: pomme"));
    }

    #[test]
    fn test_search_command_rejects_short_query() {
        let mut engine = engine();
        let mut out = Vec::new();
        let result = search(&mut engine, Some("po"), &TagArgs::default(), &mut out);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_facets_command_filters() {
        let engine = engine();
        let mut out = Vec::new();
        facets(&engine, Facet::Ingredient, Some("POIS"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "poisson\n");
    }

    #[test]
    fn test_shell_keeps_going_after_validation_error() {
        let mut engine = engine();
        let input = "query po\nquery tarte\nadd ingredient pomme\nremove utensil fouet\nquit\nquery poisson\n";
        let mut out = Vec::new();

        shell(&mut engine, input.as_bytes(), &mut out).unwrap();
        let out = String::from_utf8(out).unwrap();

        assert!(out.contains("✗ Validation error"));
        assert!(out.contains("utensil:fouet was not active"));
        // Nothing after quit is run
        assert_eq!(engine.main_query(), Some("tarte"));
        assert_eq!(engine.active_tags().ingredient, vec!["pomme"]);
    }
}
