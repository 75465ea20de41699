//! Headless Formation Search
//!
//! Ranks every formation a roster allows and prints the best attack and
//! garrison picks as JSON (for scripts) or text.

use clap::Parser;
use serde::Serialize;
use skillmod::bot::format::format_formations;
use skillmod::catalog::{load_catalog, HeroCatalog};
use skillmod::core::config::validate_search_limits;
use skillmod::core::error::Result;
use skillmod::formation::{enumerate_formations, recommend, Recommendation, Roster};
use std::path::PathBuf;

/// Headless Formation Search - best joiner lineups for a roster
#[derive(Parser, Debug)]
#[command(name = "formation_search")]
#[command(about = "Rank joiner formations by damage dealt and damage taken")]
struct Args {
    /// Owned heroes, e.g. "Chenko:3,Amane:2". Defaults to every hero.
    #[arg(long)]
    heroes: Option<String>,

    /// Largest team to consider (1..=8)
    #[arg(long, default_value_t = 4)]
    max_size: u32,

    /// Formations to print per objective
    #[arg(long, default_value_t = 2)]
    top: usize,

    /// Hero catalog TOML (built-in values when omitted)
    #[arg(long)]
    catalog: Option<PathBuf>,

    /// Output format: json or text
    #[arg(long, default_value = "json")]
    format: String,
}

/// JSON output structure
#[derive(Serialize)]
struct SearchOutput {
    roster: String,
    max_size: u32,
    formations_evaluated: usize,
    #[serde(flatten)]
    recommendation: Recommendation,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("skillmod=warn")
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    validate_search_limits(args.max_size, args.top)?;

    let catalog = match &args.catalog {
        Some(path) => load_catalog(path)?,
        None => HeroCatalog::builtin(),
    };

    let (roster, roster_label) = match &args.heroes {
        Some(raw) => (Roster::parse(&catalog, raw)?, raw.clone()),
        None => (Roster::full(&catalog, args.max_size), "all heroes".to_string()),
    };

    let formations_evaluated = enumerate_formations(&roster, args.max_size).len();
    let recommendation = recommend(&catalog, &roster, args.max_size, args.top)?;

    if args.format == "json" {
        let output = SearchOutput {
            roster: roster_label,
            max_size: args.max_size,
            formations_evaluated,
            recommendation,
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("=== FORMATION SEARCH ===");
        println!("Roster: {}", roster_label);
        println!("Formations evaluated: {}", formations_evaluated);
        println!();
        println!("--- Attack Focus (Damage Output) ---");
        println!("{}", format_formations(&recommendation.best_attack));
        println!();
        println!("--- Garrison Focus (Damage Reduction) ---");
        println!("{}", format_formations(&recommendation.best_garrison));
    }

    Ok(())
}
