use std::path::PathBuf;

use btk_common::{log::warn, post::size::ImageSize};
use btk_core::request::{FetchRequest, ServiceSelector};
use btk_extractors::tags::TagOptions;
use clap::Parser;

use crate::{config::Config, error::CliError, PresetArg};

#[derive(Parser, Debug)]
#[clap(name = "Booru Toolkit", author, version, about, long_about = None)]
pub struct Cli {
    /// URL of the post to fetch
    #[clap(value_parser, required_unless_present_any = ["services", "write_config"])]
    pub url: Option<String>,

    /// Service to fetch from. `auto` picks it from the URL
    ///
    /// Run with `--services` to list the available names
    #[clap(short, long, value_name = "NAME", help_heading = "FETCH")]
    pub service: Option<String>,

    /// Always use the preset's service and only show its tag categories
    #[clap(short, long, value_enum, ignore_case = true, help_heading = "FETCH")]
    pub preset: Option<PresetArg>,

    /// Size of the image to download
    ///
    /// [possible values: none, 180x180, 360x360, 720x720, sample, original]
    #[clap(
        short,
        long,
        value_name = "SIZE",
        value_parser = parse_image_size,
        help_heading = "FETCH"
    )]
    pub image_size: Option<ImageSize>,

    /// Keep underscores and unescaped parentheses in tags
    #[clap(long, action, help_heading = "TAGS")]
    pub no_format: bool,

    /// Append a comma to the tags of each category
    #[clap(long, action, help_heading = "TAGS")]
    pub trailing_comma: bool,

    /// Don't remove excluded tags
    #[clap(long, action, help_heading = "TAGS")]
    pub no_exclude: bool,

    /// Comma separated list of tags to remove
    #[clap(short, long, value_name = "CSV", help_heading = "TAGS", conflicts_with = "no_exclude")]
    pub exclude: Option<String>,

    /// Save the image (or the placeholder) to this path
    #[clap(short, long, value_name = "PATH", help_heading = "SAVE")]
    pub output: Option<PathBuf>,

    /// Overwrite the output file without asking
    #[clap(short = 'y', long, action, help_heading = "SAVE")]
    pub overwrite: bool,

    /// Print the result as JSON
    #[clap(long, action, help_heading = "GENERAL")]
    pub json: bool,

    /// Print all available services and exit
    #[clap(long, action, help_heading = "GENERAL")]
    pub services: bool,

    /// Write a config file with the default options and exit
    #[clap(long, action, help_heading = "GENERAL")]
    pub write_config: bool,
}

fn parse_image_size(input: &str) -> Result<ImageSize, String> {
    input.parse().map_err(|e| format!("{e}"))
}

impl Cli {
    /// Merges the command line flags over the config file defaults.
    pub fn fetch_request(&self, config: &Config) -> Result<FetchRequest, CliError> {
        let url = self
            .url
            .as_deref()
            .filter(|u| !u.trim().is_empty())
            .ok_or(CliError::MissingUrl)?;
        let defaults = &config.defaults;

        let service = self
            .service
            .as_deref()
            .unwrap_or(defaults.service.as_str())
            .parse::<ServiceSelector>()
            .unwrap_or_default();

        let image_size = self.image_size.unwrap_or(defaults.image_size);
        if image_size == ImageSize::None && self.output.is_some() {
            warn!("Image size is none, the saved image will be a placeholder");
        }

        let tag_options = TagOptions {
            format_tags: defaults.format_tags && !self.no_format,
            trailing_comma: defaults.trailing_comma || self.trailing_comma,
            exclude_tags: defaults.exclude_tags && !self.no_exclude,
            excluded_tags: self
                .exclude
                .clone()
                .unwrap_or_else(|| defaults.excluded_tags.clone()),
        };

        Ok(FetchRequest::new(url.trim())
            .with_service(service)
            .with_image_size(image_size)
            .with_tag_options(tag_options))
    }
}
