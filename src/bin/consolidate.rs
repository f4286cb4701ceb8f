//! Consolidate an ingredient list from the command line
//!
//! Usage: consolidate [FILE]
//!
//! Reads a JSON array of ingredients from FILE (or stdin when omitted or "-")
//! and prints the consolidated list as JSON.

use std::io::Read;

use larder::build_info::BuildInfo;
use larder::consolidate::{consolidate_ingredients, IngredientItem};
use tracing_subscriber::EnvFilter;

fn read_input(path: Option<&str>) -> std::io::Result<String> {
    match path {
        Some(path) if path != "-" => std::fs::read_to_string(path),
        _ => {
            let mut input = String::new();
            std::io::stdin().read_to_string(&mut input)?;
            Ok(input)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("larder=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    let arg = std::env::args().nth(1);
    match arg.as_deref() {
        Some("-h") | Some("--help") => {
            eprintln!("Usage: consolidate [FILE]");
            eprintln!("Reads a JSON array of {{name, quantity, unit, category}} objects and prints the consolidated list.");
            return Ok(());
        }
        Some("-V") | Some("--version") => {
            println!("{}", BuildInfo::current().version_line());
            return Ok(());
        }
        _ => {}
    }

    let input = read_input(arg.as_deref())?;
    println!("{}", render(&input)?);

    Ok(())
}

/// Parse a JSON ingredient array and render the consolidated list
fn render(input: &str) -> serde_json::Result<String> {
    let items: Vec<IngredientItem> = serde_json::from_str(input)?;
    let consolidated = consolidate_ingredients(&items);
    serde_json::to_string_pretty(&consolidated)
}
