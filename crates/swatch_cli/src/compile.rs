//! Building the variants a manifest declares

use anyhow::{Context, Result};
use clap::ValueEnum;
use indexmap::IndexMap;
use std::fs;
use std::path::{Path, PathBuf};
use swatch_tokens::{
    parse_category, parse_context, parse_metadata, to_css, variable_collisions, CssOptions, ModeRegistry,
    SourceFormat, Theme, ThemeBuilder,
};
use tracing::{debug, info};

use crate::config::{SwatchConfig, VariantConfig};

/// Output format for emitted themes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Json,
    Css,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Css => "css",
        }
    }
}

fn read_source(root: &Path, file: &str) -> Result<(String, SourceFormat)> {
    let path = root.join(file);
    let text = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    Ok((text, SourceFormat::from_path(&path)))
}

fn variant_builder(
    root: &Path,
    config: &SwatchConfig,
    variant: &VariantConfig,
    built: &IndexMap<String, Theme>,
) -> Result<ThemeBuilder> {
    let mut builder = match &variant.parent {
        Some(parent) => {
            let parent = built
                .get(parent)
                .with_context(|| format!("Parent `{parent}` of `{}` was not built", variant.name))?;
            ThemeBuilder::derive(variant.name.clone(), parent)
        }
        None => ThemeBuilder::new(
            variant.name.clone(),
            ModeRegistry::with_selector_prefix(&config.modes.selector_prefix),
        ),
    };

    for file in &variant.categories {
        let (text, format) = read_source(root, file)?;
        let category = parse_category(&text, format).with_context(|| format!("Invalid category file {file}"))?;
        builder
            .add_tokens(&category.tokens, category.scope)
            .with_context(|| format!("Failed to add {file} to `{}`", variant.name))?;
    }
    for file in &variant.contexts {
        let (text, format) = read_source(root, file)?;
        let context = parse_context(&text, format).with_context(|| format!("Invalid context file {file}"))?;
        builder.add_context(context.name, context.selector, context.tokens);
    }
    for file in &variant.metadata {
        let (text, format) = read_source(root, file)?;
        let index = parse_metadata(&text, format).with_context(|| format!("Invalid metadata file {file}"))?;
        builder.add_metadata(&index);
    }
    Ok(builder)
}

/// Build every variant, parents first. `root` is the manifest directory.
pub fn build_variants(root: &Path, config: &SwatchConfig) -> Result<IndexMap<String, Theme>> {
    let order = config.build_order()?;
    let mut built: IndexMap<String, Theme> = IndexMap::with_capacity(order.len());
    for variant in order {
        let builder = variant_builder(root, config, variant, &built)?;
        let theme = builder
            .build()
            .with_context(|| format!("Failed to build variant `{}`", variant.name))?;
        debug!(variant = %variant.name, tokens = theme.tokens().len(), "built variant");
        built.insert(variant.name.clone(), theme);
    }
    Ok(built)
}

pub fn css_options(config: &SwatchConfig) -> CssOptions {
    CssOptions {
        prefix: config.css.prefix.clone(),
        root_selector: config.css.root_selector.clone(),
    }
}

pub fn render(theme: &Theme, format: OutputFormat, options: &CssOptions) -> Result<String> {
    match format {
        OutputFormat::Json => theme.to_json().context("Failed to serialize theme"),
        OutputFormat::Css => Ok(to_css(theme, options)),
    }
}

/// Fail when two tokens of any variant would emit the same CSS variable.
pub fn check_variable_names(themes: &IndexMap<String, Theme>) -> Result<()> {
    let mut clashes = Vec::new();
    for (name, theme) in themes {
        for (variable, tokens) in variable_collisions(theme) {
            let tokens: Vec<&str> = tokens.iter().map(|t| t.as_str()).collect();
            clashes.push(format!("{name}: --{variable} ({})", tokens.join(", ")));
        }
    }
    if !clashes.is_empty() {
        anyhow::bail!("Tokens share a CSS variable name:\n  {}", clashes.join("\n  "));
    }
    Ok(())
}

/// Write one file per theme into `out`, returning the written paths.
pub fn write_themes(
    themes: &IndexMap<String, Theme>,
    out: &Path,
    format: OutputFormat,
    options: &CssOptions,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(out).with_context(|| format!("Failed to create {}", out.display()))?;
    let mut written = Vec::with_capacity(themes.len());
    for (name, theme) in themes {
        let path = out.join(format!("{name}.{}", format.extension()));
        fs::write(&path, render(theme, format, options)?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!(path = %path.display(), "wrote theme");
        written.push(path);
    }
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn write(dir: &Path, file: &str, content: &str) {
        let path = dir.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn project() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        write(
            dir.path(),
            "swatch.toml",
            r#"
[project]
name = "console"

[css]
prefix = "awsui"

[modes]
selector_prefix = "awsui"

[[variants]]
name = "classic"
parent = "visual-refresh"
categories = ["classic/palette.json"]

[[variants]]
name = "visual-refresh"
categories = ["tokens/palette.toml", "tokens/color.toml"]
contexts = ["tokens/header.toml"]
metadata = ["tokens/metadata.toml"]
"#,
        );
        write(
            dir.path(),
            "tokens/palette.toml",
            r##"
[tokens]
colorWhite = "#ffffff"
colorGrey900 = "#0f1b2a"
"##,
        );
        write(
            dir.path(),
            "tokens/color.toml",
            r#"
scope = "color"

[tokens]
colorBackgroundLayoutMain = { light = "{colorWhite}", dark = "{colorGrey900}" }
"#,
        );
        write(
            dir.path(),
            "tokens/header.toml",
            r#"
name = "header"
selector = ".awsui-context-content-header"

[tokens]
colorBackgroundLayoutMain = "{colorGrey900}"
"#,
        );
        write(
            dir.path(),
            "tokens/metadata.toml",
            r#"
[tokens.colorBackgroundLayoutMain]
public = true
"#,
        );
        write(dir.path(), "classic/palette.json", r##"{"tokens": {"colorGrey900": "#16191f"}}"##);
        dir
    }

    #[test]
    fn builds_variants_parents_first() {
        let dir = project();
        let config = SwatchConfig::load_from_dir(dir.path()).unwrap();
        let themes = build_variants(dir.path(), &config).unwrap();
        let names: Vec<&str> = themes.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["visual-refresh", "classic"]);

        let classic = &themes["classic"];
        assert_eq!(classic.value("colorBackgroundLayoutMain", "dark"), Some("#16191f"));
        assert_eq!(
            classic.context_value("header", "colorBackgroundLayoutMain", "light"),
            Some("#16191f")
        );
        assert!(classic.metadata("colorBackgroundLayoutMain").is_some_and(|m| m.public));
    }

    #[test]
    fn writes_one_file_per_variant() {
        let dir = project();
        let config = SwatchConfig::load_from_dir(dir.path()).unwrap();
        let themes = build_variants(dir.path(), &config).unwrap();
        let out = dir.path().join("dist");
        let written = write_themes(&themes, &out, OutputFormat::Css, &css_options(&config)).unwrap();
        assert_eq!(written, vec![out.join("visual-refresh.css"), out.join("classic.css")]);

        let css = fs::read_to_string(out.join("classic.css")).unwrap();
        assert!(css.contains("--awsui-color-background-layout-main: #ffffff;"));
        assert!(css.contains(".awsui-dark-mode {"));
    }

    #[test]
    fn renders_json_through_the_theme() {
        let dir = project();
        let config = SwatchConfig::load_from_dir(dir.path()).unwrap();
        let themes = build_variants(dir.path(), &config).unwrap();
        let json = render(&themes["classic"], OutputFormat::Json, &css_options(&config)).unwrap();
        assert!(json.contains("\"colorGrey900\""), "{json}");
        assert!(json.contains("#16191f"), "{json}");
    }

    #[test]
    fn clashing_variable_names_fail_the_check() {
        let dir = project();
        let config = SwatchConfig::load_from_dir(dir.path()).unwrap();
        let themes = build_variants(dir.path(), &config).unwrap();
        check_variable_names(&themes).unwrap();

        write(
            dir.path(),
            "tokens/palette.toml",
            r##"
[tokens]
colorWhite = "#ffffff"
colorGrey900 = "#0f1b2a"
"color-grey-900" = "#000000"
"##,
        );
        let themes = build_variants(dir.path(), &config).unwrap();
        let message = format!("{:#}", check_variable_names(&themes).unwrap_err());
        assert!(message.contains("visual-refresh: --color-grey-900 (colorGrey900, color-grey-900)"), "{message}");
    }

    #[test]
    fn missing_source_file_is_reported() {
        let dir = project();
        fs::remove_file(dir.path().join("tokens/color.toml")).unwrap();
        let config = SwatchConfig::load_from_dir(dir.path()).unwrap();
        let err = build_variants(dir.path(), &config).unwrap_err();
        assert!(format!("{err:#}").contains("color.toml"), "{err:#}");
    }

    #[test]
    fn resolution_errors_name_the_variant() {
        let dir = project();
        write(
            dir.path(),
            "tokens/color.toml",
            r#"
scope = "color"

[tokens]
colorBackgroundLayoutMain = "{colorMissing}"
"#,
        );
        let config = SwatchConfig::load_from_dir(dir.path()).unwrap();
        let err = build_variants(dir.path(), &config).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("visual-refresh"), "{message}");
        assert!(message.contains("colorMissing"), "{message}");
    }
}
