//! Command handlers. Each returns the JSON value to print; `main` renders it.

use armory_core::{AppConfig, OutputFormat};
use armory_tooltip::{
    ark_passive_colors, classify_item_type, extract_all_tooltip_sections, font_to_span,
    grade_color, parse_effect_description, parse_tooltip, short_type, strip_html, ItemFacts,
    ItemTypeCategory,
};
use serde::Serialize;
use serde_json::{json, Value};

use crate::input::read_input;
use crate::Commands;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Classification<'a> {
    label: &'a str,
    category: ItemTypeCategory,
    short_label: &'a str,
}

/// Runs one subcommand against the loaded configuration.
///
/// # Errors
///
/// Returns an error if the input cannot be read or the result cannot be
/// serialized. Unparseable tooltips are not errors: they produce empty output.
pub(crate) fn run(command: Commands, config: &AppConfig) -> anyhow::Result<Value> {
    let max_bytes = config.max_input_bytes;
    let value = match command {
        Commands::Sections { file } => {
            let raw = read_input(file.as_deref(), max_bytes)?;
            serde_json::to_value(extract_all_tooltip_sections(&raw))?
        }
        Commands::Facts { file, name } => {
            let raw = read_input(file.as_deref(), max_bytes)?;
            let facts = ItemFacts::from_tooltip(name.as_deref().unwrap_or_default(), &raw);
            serde_json::to_value(facts)?
        }
        Commands::Text { file } => {
            let raw = read_input(file.as_deref(), max_bytes)?;
            let lines = parse_tooltip(&raw)
                .map(|tree| tree.collect_text())
                .unwrap_or_default();
            json!(lines)
        }
        Commands::Strip { file, span } => {
            let text = read_input(file.as_deref(), max_bytes)?;
            let stripped = if span {
                font_to_span(&text)
            } else {
                strip_html(&text)
            };
            Value::String(stripped)
        }
        Commands::Classify { label } => serde_json::to_value(Classification {
            label: &label,
            category: classify_item_type(&label),
            short_label: short_type(&label),
        })?,
        Commands::Effect { desc } => {
            serde_json::to_value(parse_effect_description(Some(desc.as_str())))?
        }
        Commands::Colors { grade, category } => match (grade, category) {
            (Some(grade), _) => json!({ "grade": grade, "color": grade_color(&grade) }),
            (None, Some(category)) => {
                let colors = ark_passive_colors(&category);
                json!({ "category": category, "colors": colors })
            }
            (None, None) => anyhow::bail!("either --grade or --category is required"),
        },
    };
    Ok(value)
}

/// Renders a command result for stdout.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render(value: &Value, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => serde_json::to_string(value)?,
        OutputFormat::Pretty => serde_json::to_string_pretty(value)?,
    };
    Ok(rendered)
}
