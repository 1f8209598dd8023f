//! Project creation and scaffolding

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::{SwatchConfig, VariantConfig};

/// Create a new Swatch project with one starter variant
pub fn create_project(path: &Path, name: &str) -> Result<()> {
    if path.join("swatch.toml").exists() {
        anyhow::bail!("{} already contains a swatch.toml", path.display());
    }

    fs::create_dir_all(path.join("tokens"))?;

    let mut config = SwatchConfig::new(name);
    config.variants.push(VariantConfig {
        name: "base".to_string(),
        parent: None,
        categories: vec![
            "tokens/palette.toml".to_string(),
            "tokens/color.toml".to_string(),
            "tokens/spacing.toml".to_string(),
        ],
        contexts: vec!["tokens/header.toml".to_string()],
        metadata: vec!["tokens/metadata.toml".to_string()],
    });
    fs::write(path.join("swatch.toml"), config.to_toml()?)?;

    fs::write(
        path.join("tokens/palette.toml"),
        r##"# Global palette: one value, no modes
[tokens]
colorWhite = "#ffffff"
colorGrey200 = "#e9ebed"
colorGrey900 = "#0f1b2a"
colorBlue600 = "#0972d3"
spaceStaticS = "12px"
"##,
    )?;

    fs::write(
        path.join("tokens/color.toml"),
        r##"scope = "color"

[tokens]
colorBackgroundLayoutMain = { light = "{colorWhite}", dark = "{colorGrey900}" }
colorTextBody = { light = "{colorGrey900}", dark = "{colorGrey200}" }
colorTextLinkDefault = "{colorBlue600}"
"##,
    )?;

    fs::write(
        path.join("tokens/spacing.toml"),
        r##"scope = "density"

[tokens]
spaceScaledS = { comfortable = "{spaceStaticS}", compact = "8px" }
"##,
    )?;

    fs::write(
        path.join("tokens/header.toml"),
        format!(
            r##"name = "header"
selector = ".{}-context-header"

[tokens]
colorBackgroundLayoutMain = "{{colorGrey900}}"
colorTextBody = "{{colorGrey200}}"
"##,
            config.modes.selector_prefix
        ),
    )?;

    fs::write(
        path.join("tokens/metadata.toml"),
        r##"[tokens.colorTextLinkDefault]
description = "Link text color"
public = true
themeable = true
"##,
    )?;

    fs::write(
        path.join(".gitignore"),
        format!("# Swatch build output\n/{}/\n", config.project.output),
    )?;

    Ok(())
}
