use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use client_core::{
    compose_map_prompt,
    config::{load_settings, load_settings_file},
    spawn_loading_ticker, GeminiClient, LoadingTicker, MapGenerator, MapSession,
};
use shared::{
    catalog,
    domain::{MapExport, StyleCategory, StyleDescriptor},
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "map_maker", about = "Generate stylized city maps")]
struct Cli {
    /// Settings file; defaults to ./map_maker.toml when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the style catalog.
    Styles {
        #[arg(long)]
        category: Option<StyleCategory>,
    },
    /// Print the prompt that would be sent for a city and style.
    Prompt {
        #[arg(long)]
        city: String,
        #[arg(long, default_value = "realistic")]
        style: String,
    },
    /// Generate one map per city and save each as PNG.
    Generate {
        #[arg(long = "city", required = true)]
        cities: Vec<String>,
        #[arg(long, default_value = "realistic")]
        style: String,
        #[arg(long)]
        out_dir: Option<PathBuf>,
    },
}

fn resolve_style(id: &str) -> Result<&'static StyleDescriptor> {
    catalog::find(id.trim())
        .ok_or_else(|| anyhow!("unknown style '{id}'; run `map_maker styles` for the list"))
}

fn print_styles(category: Option<StyleCategory>) {
    let categories: Vec<StyleCategory> = match category {
        Some(category) => vec![category],
        None => StyleCategory::ALL.to_vec(),
    };
    for category in categories {
        println!("{category}");
        for style in catalog::in_category(category) {
            println!(
                "  {} {:<18} {:<22} {}",
                style.icon, style.id, style.name, style.description
            );
        }
    }
}

async fn write_export(out_dir: &Path, export: &MapExport) -> Result<PathBuf> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("failed to create output directory '{}'", out_dir.display()))?;
    let path = out_dir.join(&export.file_name);
    tokio::fs::write(&path, &export.bytes)
        .await
        .with_context(|| format!("failed to write '{}'", path.display()))?;
    Ok(path)
}

/// Generates each city in turn. Failures are reported and skipped; returns
/// how many failed.
async fn run_generate<G>(
    session: &mut MapSession,
    generator: &G,
    cities: &[String],
    style: &'static StyleDescriptor,
    out_dir: &Path,
) -> Result<usize>
where
    G: MapGenerator + ?Sized,
{
    let mut failures = 0;

    for city in cities {
        let ticker = spawn_loading_ticker(LoadingTicker::default());
        let mut messages = ticker.subscribe();
        eprintln!("{}", ticker.current());

        let outcome = {
            let generation = session.generate(generator, city, style);
            tokio::pin!(generation);
            loop {
                tokio::select! {
                    outcome = &mut generation => break outcome,
                    changed = messages.changed() => {
                        if changed.is_ok() {
                            eprintln!("{}", *messages.borrow());
                        }
                    }
                }
            }
        };
        ticker.stop();

        match outcome {
            Ok(map) => {
                let export = session
                    .download()
                    .context("generated map missing from session")?;
                let path = write_export(out_dir, &export).await?;
                info!(city = %map.city_name, path = %path.display(), "map saved");
                println!("{} {} -> {}", map.style.icon, map.city_name, path.display());
            }
            Err(err) => {
                failures += 1;
                warn!(city = %city, "generation failed: {err}");
                eprintln!("{city}: {}", err.user_message());
            }
        }
    }

    if !session.history().is_empty() {
        println!("History (most recent first):");
        for map in session.history().iter() {
            println!(
                "  {}  {:<20} {:<18} {}",
                map.created_at.format("%H:%M:%S"),
                map.city_name,
                map.style.id,
                map.export_file_name()
            );
        }
    }

    Ok(failures)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Styles { category } => print_styles(category),
        Command::Prompt { city, style } => {
            let style = resolve_style(&style)?;
            if city.trim().is_empty() {
                return Err(anyhow!("{}", client_core::MapError::Validation));
            }
            println!("{}", compose_map_prompt(&city, style));
        }
        Command::Generate {
            cities,
            style,
            out_dir,
        } => {
            let style = resolve_style(&style)?;
            let settings = match &cli.config {
                Some(path) => load_settings_file(path)?,
                None => load_settings(),
            };
            let out_dir = out_dir.unwrap_or_else(|| settings.output_dir.clone());
            let client = GeminiClient::new(&settings)?;
            info!(endpoint = %client.endpoint(), style = style.id, "starting generation run");

            let mut session = MapSession::new();
            let failures = run_generate(&mut session, &client, &cities, style, &out_dir).await?;
            if failures > 0 {
                return Err(anyhow!("{failures} of {} generations failed", cities.len()));
            }
        }
    }

    Ok(())
}
