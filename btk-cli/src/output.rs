//! Printing and saving fetch results.
use std::path::Path;

use btk_common::serde_json::{self, json, Map, Value};
use btk_core::result::{FetchResult, ImageSource, OutputField, OutputValue};
use btk_extractors::prelude::{BooruHandler, HandlerFeatures, HandlerRegistry};
use dialoguer::Confirm;
use log::debug;
use owo_colors::OwoColorize;

use crate::error::CliError;

/// Human readable names of the features a handler has.
pub fn feature_names(features: HandlerFeatures) -> Vec<&'static str> {
    let mut names = Vec::with_capacity(4);

    if features.contains(HandlerFeatures::CATEGORIZED_TAGS) {
        names.push("Categorized Tags");
    }

    if features.contains(HandlerFeatures::SIZE_VARIANTS) {
        names.push("Size Variants");
    }

    if features.contains(HandlerFeatures::URL_CREDENTIALS) {
        names.push("URL Credentials");
    }

    if features.contains(HandlerFeatures::SPECIES_TAGS) {
        names.push("Species Tags");
    }

    names
}

pub fn print_services(registry: &HandlerRegistry) {
    println!(
        "{}\n----------------",
        "Available Services:".underline().bold().blue()
    );

    for handler in registry.handlers() {
        println!(
            "{}:\n - {} {}\n - {} {:?}\n",
            handler.name().bold().green(),
            "Domains:".bold().blue(),
            handler.supported_domains().join(", ").bold().purple(),
            "Available features:".bold().blue(),
            feature_names(handler.features()),
        );
    }
}

fn describe_image(result: &FetchResult) -> String {
    let size = format!("{}x{}", result.image.width(), result.image.height());
    match &result.image_source {
        ImageSource::Downloaded { url } => format!("{size} from {url}"),
        ImageSource::Placeholder { reason } => format!("{size} placeholder ({reason})"),
    }
}

pub fn print_result(result: &FetchResult, fields: &[OutputField]) {
    println!(
        "{} {}",
        "Post from".bold(),
        result.handler.bold().green()
    );

    for (field, value) in fields.iter().zip(result.outputs(fields)) {
        let name = format!("{field}:");
        match value {
            OutputValue::Image(_) => {
                let image = describe_image(result);
                if result.image_source.is_placeholder() {
                    println!("{:<16} {}", name.bold().blue(), image.yellow());
                } else {
                    println!("{:<16} {}", name.bold().blue(), image);
                }
            }
            OutputValue::Int(n) => println!("{:<16} {}", name.bold().blue(), n.bold().yellow()),
            OutputValue::Text(text) if text.is_empty() => {
                println!("{:<16} {}", name.bold().blue(), "-".dimmed())
            }
            OutputValue::Text(text) => println!("{:<16} {}", name.bold().blue(), text),
        }
    }
}

/// The result as a JSON object: handler, image source and one entry per output field.
pub fn result_json(result: &FetchResult, fields: &[OutputField]) -> Result<Value, CliError> {
    let mut outputs = Map::with_capacity(fields.len());

    for (field, value) in fields.iter().zip(result.outputs(fields)) {
        let value = match value {
            OutputValue::Image(img) => {
                let source = serde_json::to_value(&result.image_source)?;
                json!({
                    "width": img.width(),
                    "height": img.height(),
                    "source": source,
                })
            }
            OutputValue::Int(n) => json!(n),
            OutputValue::Text(text) => json!(text),
        };
        outputs.insert(field.to_string(), value);
    }

    Ok(json!({
        "handler": result.handler,
        "outputs": outputs,
    }))
}

/// Saves the result image, asking before overwriting an existing file unless `overwrite` is set.
///
/// Returns `false` if the user declined.
pub fn save_image(result: &FetchResult, path: &Path, overwrite: bool) -> Result<bool, CliError> {
    if path.exists() && !overwrite {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "The file {} already exists. Do you want to overwrite it?",
                path.display().bold().blue().italic()
            ))
            .wait_for_newline(true)
            .interact()?;

        if !confirmed {
            return Ok(false);
        }
    }

    result.image.save(path)?;
    debug!("Image saved to {}", path.display());
    Ok(true)
}
