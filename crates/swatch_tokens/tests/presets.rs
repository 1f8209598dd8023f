use swatch_tokens::{to_css, CssOptions, Dictionary, Mode, ThemeError, ThemeOverride, ThemePreset};

#[test]
fn preset_catalog_contains_expected_presets() {
    let ids: Vec<&str> = ThemePreset::all().iter().map(|p| p.id()).collect();
    assert_eq!(ids, vec!["visual-refresh", "classic"]);
    assert_eq!(ThemePreset::Classic.parent(), Some(ThemePreset::VisualRefresh));
}

#[test]
fn visual_refresh_resolves_every_mode() {
    let theme = ThemePreset::VisualRefresh.build().unwrap();
    assert_eq!(theme.value("colorTextBody", "light"), Some("#000716"));
    assert_eq!(theme.value("colorTextBody", "dark"), Some("#e9ebed"));
    assert_eq!(theme.value("colorTextLinkDefault", "dark"), Some("#539fe5"));
    assert_eq!(theme.value("spaceScaledXs", "comfortable"), Some("8px"));
    assert_eq!(theme.value("spaceScaledXs", "compact"), Some("4px"));
    assert_eq!(theme.value("motionDurationExpressive", "disabled"), Some("0ms"));
    assert_eq!(theme.global("borderRadiusButton"), Some("20px"));

    let easing = theme.get("motionEasingExpressive").unwrap();
    assert_eq!(easing.scope().mode(), Some(Mode::Motion));
    assert_eq!(easing.get("default"), easing.get("disabled"));
}

#[test]
fn classic_overrides_only_what_it_changes() {
    let classic = ThemePreset::Classic.build().unwrap();
    assert_eq!(classic.global("borderRadiusButton"), Some("2px"));
    assert_eq!(classic.value("colorBackgroundButtonPrimaryDefault", "dark"), Some("#ec7211"));
    assert_eq!(classic.value("colorTextLinkDefault", "light"), Some("#0972d3"));
    // Partial override plus an aliased palette change.
    assert_eq!(classic.value("colorBackgroundLayoutMain", "light"), Some("#f4f4f4"));
    assert_eq!(classic.value("colorBackgroundLayoutMain", "dark"), Some("#16191f"));
    // Inherited untouched.
    assert_eq!(classic.value("colorTextBody", "light"), Some("#000716"));
    assert_eq!(classic.value("spaceScaledM", "compact"), Some("16px"));
}

#[test]
fn contexts_overlay_the_variant() {
    let refresh = ThemePreset::VisualRefresh.build().unwrap();
    assert_eq!(refresh.context_value("flashbar", "colorTextBody", "light"), Some("#ffffff"));
    assert_eq!(refresh.context_value("flashbar", "colorTextLinkDefault", "dark"), Some("#ffffff"));
    assert_eq!(refresh.context_value("alert", "colorTextLinkDefault", "light"), Some("#002b66"));
    // Tokens a context leaves alone come from the theme.
    assert_eq!(refresh.context_value("alert", "colorTextBody", "dark"), Some("#e9ebed"));

    let classic = ThemePreset::Classic.build().unwrap();
    assert_eq!(classic.context_value("header", "colorBackgroundLayoutMain", "light"), Some("#ffffff"));
    assert_eq!(classic.context_value("header", "colorBackgroundLayoutMain", "dark"), Some("#000716"));
    assert_eq!(classic.context_value("header", "colorTextBody", "light"), Some("#16191f"));
    assert_eq!(classic.context_value("header", "colorTextBody", "dark"), Some("#e9ebed"));
}

#[test]
fn classic_stylesheet_scopes_dark_header() {
    let css = to_css(&ThemePreset::Classic.build().unwrap(), &CssOptions::default());
    assert!(css.starts_with("/* classic */\n:root {\n"));
    assert!(css.contains("@media not print {\n  .awsui-dark-mode {\n"));
    assert!(css.contains(".awsui-dark-mode .awsui-context-content-header {"));
    assert!(css.contains(".awsui-compact-mode {\n  --space-scaled-xs: 4px;\n"));
    assert!(css.contains(".awsui-disabled-mode {\n  --motion-duration-expressive: 0ms;\n"));
}

#[test]
fn themeable_override_flows_through_aliases() {
    let refresh = ThemePreset::VisualRefresh.build().unwrap();
    let branded = refresh
        .with_overrides(&ThemeOverride::new(
            Dictionary::new().with("colorBackgroundButtonPrimaryDefault", "#ff9900"),
        ))
        .unwrap();
    assert_eq!(branded.value("colorTextLinkDefault", "light"), Some("#ff9900"));
    assert_eq!(refresh.value("colorTextLinkDefault", "light"), Some("#0972d3"));

    let err = refresh
        .with_overrides(&ThemeOverride::new(Dictionary::new().with("colorTextBody", "red")))
        .unwrap_err();
    assert!(matches!(err, ThemeError::NotThemeable { .. }));
}

#[test]
fn theme_serializes_to_json() {
    let theme = ThemePreset::VisualRefresh.build().unwrap();
    let json: serde_json::Value = serde_json::from_str(&theme.to_json().unwrap()).unwrap();
    assert_eq!(json["name"], "visual-refresh");
    assert_eq!(json["tokens"]["colorWhite"], "#ffffff");
    assert_eq!(json["tokens"]["colorTextBody"]["dark"], "#e9ebed");
    assert_eq!(json["metadata"]["colorTextLinkDefault"]["themeable"], true);
}

#[test]
fn variants_are_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<swatch_tokens::Theme>();
    assert_send_sync::<swatch_tokens::ThemeBuilder>();
}
