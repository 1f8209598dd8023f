//! Swatch CLI
//!
//! Compiles the theme variants declared in a `swatch.toml` manifest.
//!
//! ```bash
//! swatch init my-tokens
//! swatch check
//! swatch build --format css --out dist
//! swatch preset classic --format json
//! ```

mod compile;
mod config;
mod project;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use swatch_tokens::{CssOptions, ThemePreset};
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::compile::{build_variants, check_variable_names, css_options, render, write_themes, OutputFormat};
use crate::config::SwatchConfig;

/// Design-token theme compiler
#[derive(Parser)]
#[command(name = "swatch")]
#[command(about = "Compile layered design tokens into resolved themes")]
#[command(version)]
struct Cli {
    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new token project
    Init {
        /// Project directory
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Project name (defaults to the directory name)
        #[arg(short, long)]
        name: Option<String>,
    },

    /// Build every variant and write one file per variant
    Build {
        /// Manifest file or the directory containing swatch.toml
        #[arg(short, long, default_value = ".")]
        manifest: PathBuf,

        /// Output directory (defaults to `project.output`)
        #[arg(short, long)]
        out: Option<PathBuf>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },

    /// Build every variant and report errors without writing anything
    Check {
        #[arg(short, long, default_value = ".")]
        manifest: PathBuf,
    },

    /// Print a built-in preset
    Preset {
        /// Preset id (omit to list presets)
        id: Option<String>,

        #[arg(short, long, value_enum, default_value_t = OutputFormat::Json)]
        format: OutputFormat,
    },
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Directory that relative source paths in the manifest are resolved against.
fn manifest_root(manifest: &Path) -> PathBuf {
    if manifest.is_file() {
        manifest
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    } else {
        manifest.to_path_buf()
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Init { path, name } => {
            let name = match name {
                Some(name) => name,
                None => path
                    .canonicalize()
                    .ok()
                    .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
                    .unwrap_or_else(|| "tokens".to_string()),
            };
            std::fs::create_dir_all(&path).with_context(|| format!("Failed to create {}", path.display()))?;
            project::create_project(&path, &name)?;
            info!("Created project `{name}` in {}", path.display());
        }

        Commands::Build {
            manifest,
            out,
            format,
        } => {
            let config = SwatchConfig::load_from_dir(&manifest)?;
            let root = manifest_root(&manifest);
            let themes = build_variants(&root, &config)?;
            let out = out.unwrap_or_else(|| root.join(&config.project.output));
            let written = write_themes(&themes, &out, format, &css_options(&config))?;
            info!("Built {} variant(s) of `{}`", written.len(), config.project.name);
        }

        Commands::Check { manifest } => {
            let config = SwatchConfig::load_from_dir(&manifest)?;
            let themes = build_variants(&manifest_root(&manifest), &config)?;
            check_variable_names(&themes)?;
            for (name, theme) in &themes {
                println!(
                    "{name}: {} tokens, {} contexts",
                    theme.tokens().len(),
                    theme.contexts().len()
                );
            }
        }

        Commands::Preset { id: None, .. } => {
            for preset in ThemePreset::all() {
                println!("{:<16} {}", preset.id(), preset.display_name());
            }
        }

        Commands::Preset {
            id: Some(id),
            format,
        } => {
            let Some(preset) = ThemePreset::from_id(&id) else {
                let known: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
                anyhow::bail!("Unknown preset `{id}` (expected one of: {})", known.join(", "));
            };
            let theme = preset
                .build()
                .with_context(|| format!("Failed to build preset `{id}`"))?;
            println!("{}", render(&theme, format, &CssOptions::default())?);
        }
    }

    Ok(())
}
