#![deny(clippy::all)]
use std::{error::Error, process::exit};

use btk_cli::{
    cli::Cli,
    clap::Parser,
    config::{config_path, Config},
    error::CliError,
    output::{print_result, print_services, result_json, save_image},
};
use btk_common::serde_json;
use btk_core::{
    fetcher::{FetcherConfig, PostFetcher},
    preset::OutputPreset,
};
use btk_extractors::prelude::DEFAULT_REGISTRY;
use color_eyre::eyre::Result;
use color_eyre::owo_colors::OwoColorize;
use dialoguer::Confirm;

#[tokio::main]
async fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.services {
        print_services(&DEFAULT_REGISTRY);
        exit(0)
    }

    env_logger::builder().format_timestamp(None).init();
    color_eyre::install()?;

    if let Err(error) = run(&args).await {
        eprintln!("{} {}", "Error:".bold().red(), error);

        let mut source = error.source();
        while let Some(cause) = source {
            eprintln!("  {} {}", "Caused by:".bold(), cause);
            source = cause.source();
        }

        exit(error.exit_code())
    }

    Ok(())
}

async fn run(args: &Cli) -> Result<(), CliError> {
    if args.write_config {
        return write_config(args.overwrite).await;
    }

    let config = Config::load().await?;
    let request = args.fetch_request(&config)?;
    let preset = args.preset.map_or(OutputPreset::Any, |p| *p);

    let fetcher = PostFetcher::new(&FetcherConfig::default())?.with_preset(preset)?;
    let result = fetcher.fetch(&request).await?;
    let fields = preset.fields();

    if args.json {
        let value = result_json(&result, &fields)?;
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        print_result(&result, &fields);
    }

    if let Some(path) = &args.output {
        let message = if save_image(&result, path, args.overwrite)? {
            format!("{} {}", "Image saved to".bold(), path.display().bold().blue())
        } else {
            format!("{}", "Image not saved".bold().yellow())
        };

        if args.json {
            eprintln!("{message}");
        } else {
            println!("{message}");
        }
    }

    Ok(())
}

async fn write_config(overwrite: bool) -> Result<(), CliError> {
    let path = config_path()?;

    if path.exists() && !overwrite {
        let confirmed = Confirm::new()
            .with_prompt(format!(
                "The config file {} already exists. Do you want to replace it with the defaults?",
                path.display().bold().blue().italic()
            ))
            .wait_for_newline(true)
            .interact()?;

        if !confirmed {
            println!("{}", "Config left untouched".bold().blue());
            return Ok(());
        }
    }

    Config::write_default(&path).await?;
    println!(
        "{} {}",
        "Config written to".bold(),
        path.display().bold().blue()
    );
    Ok(())
}
