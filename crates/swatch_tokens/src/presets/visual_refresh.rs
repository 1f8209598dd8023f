//! Visual-refresh token set.

use crate::dictionary::Dictionary;
use crate::metadata::{MetadataEntry, MetadataIndex};

pub(super) fn palette() -> Dictionary {
    Dictionary::new()
        .with("colorWhite", "#ffffff")
        .with("colorBlack", "#000000")
        .with("colorGrey100", "#f4f4f4")
        .with("colorGrey200", "#e9ebed")
        .with("colorGrey600", "#414d5c")
        .with("colorGrey800", "#192534")
        .with("colorGrey900", "#0f1b2a")
        .with("colorGrey950", "#000716")
        .with("colorBlue100", "#f2f8fd")
        .with("colorBlue400", "#539fe5")
        .with("colorBlue600", "#0972d3")
        .with("colorBlue900", "#002b66")
        .with("colorRed400", "#eb6f6f")
        .with("colorRed600", "#d91515")
        .with("colorGreen500", "#29ad32")
        .with("colorGreen600", "#037f0c")
}

pub(super) fn typography() -> Dictionary {
    Dictionary::new()
        .with("fontFamilyBase", "'Open Sans', 'Helvetica Neue', Roboto, Arial, sans-serif")
        .with("fontSizeBody", "14px")
        .with("fontSizeHeadingXl", "24px")
        .with("lineHeightBody", "20px")
        .with("fontWeightHeading", "700")
}

pub(super) fn borders() -> Dictionary {
    Dictionary::new()
        .with("borderRadiusButton", "20px")
        .with("borderRadiusContainer", "16px")
        .with("borderWidthField", "2px")
        .with("spaceStaticXs", "8px")
        .with("spaceStaticM", "20px")
}

pub(super) fn colors() -> Dictionary {
    Dictionary::new()
        .with_states("colorTextBody", [("light", "{colorGrey950}"), ("dark", "{colorGrey200}")])
        .with_states(
            "colorBackgroundLayoutMain",
            [("light", "{colorWhite}"), ("dark", "{colorGrey900}")],
        )
        .with_states(
            "colorBackgroundContainerContent",
            [("light", "{colorWhite}"), ("dark", "{colorGrey800}")],
        )
        .with_states(
            "colorBackgroundButtonPrimaryDefault",
            [("light", "{colorBlue600}"), ("dark", "{colorBlue400}")],
        )
        .with_states(
            "colorTextButtonPrimaryDefault",
            [("light", "{colorWhite}"), ("dark", "{colorGrey900}")],
        )
        .with("colorTextLinkDefault", "{colorBackgroundButtonPrimaryDefault}")
        .with_states(
            "colorBorderDividerDefault",
            [("light", "{colorGrey200}"), ("dark", "{colorGrey600}")],
        )
        .with_states("colorTextStatusError", [("light", "{colorRed600}"), ("dark", "{colorRed400}")])
        .with_states(
            "colorTextStatusSuccess",
            [("light", "{colorGreen600}"), ("dark", "{colorGreen500}")],
        )
        .with("colorBackgroundNotificationBlue", "{colorBlue600}")
        .with("colorTextNotificationDefault", "{colorWhite}")
        .with_states(
            "shadowContainer",
            [
                ("light", "0 1px 8px 2px rgba(0, 7, 22, 0.12)"),
                ("dark", "0 1px 8px 2px rgba(0, 7, 22, 0.6)"),
            ],
        )
}

pub(super) fn density() -> Dictionary {
    Dictionary::new()
        .with_states("spaceScaledXs", [("comfortable", "{spaceStaticXs}"), ("compact", "4px")])
        .with_states("spaceScaledM", [("comfortable", "{spaceStaticM}"), ("compact", "16px")])
        .with_states("sizeVerticalInput", [("comfortable", "32px"), ("compact", "28px")])
}

pub(super) fn motion() -> Dictionary {
    Dictionary::new()
        .with_states("motionDurationExpressive", [("default", "165ms"), ("disabled", "0ms")])
        .with("motionEasingExpressive", "cubic-bezier(0.84, 0, 0.16, 1)")
}

pub(super) fn top_navigation() -> Dictionary {
    Dictionary::new()
        .with("colorBackgroundContainerContent", "{colorGrey950}")
        .with("colorTextBody", "{colorGrey200}")
}

pub(super) fn header() -> Dictionary {
    Dictionary::new()
        .with_states(
            "colorBackgroundLayoutMain",
            [("light", "{colorGrey950}"), ("dark", "{colorGrey950}")],
        )
        .with("colorTextBody", "{colorGrey200}")
}

pub(super) fn flashbar() -> Dictionary {
    Dictionary::new()
        .with("colorTextBody", "{colorTextNotificationDefault}")
        .with("colorTextLinkDefault", "{colorTextBody}")
}

pub(super) fn alert() -> Dictionary {
    Dictionary::new().with_states(
        "colorTextLinkDefault",
        [("light", "{colorBlue900}"), ("dark", "{colorBlue100}")],
    )
}

pub(super) fn metadata() -> MetadataIndex {
    MetadataIndex::new()
        .with(
            "colorTextBody",
            MetadataEntry::new().description("Default body text color.").public(true),
        )
        .with(
            "colorBackgroundButtonPrimaryDefault",
            MetadataEntry::new()
                .description("Background of primary buttons.")
                .public(true)
                .themeable(true),
        )
        .with(
            "colorTextLinkDefault",
            MetadataEntry::new().description("Link text color.").public(true).themeable(true),
        )
        .with(
            "borderRadiusButton",
            MetadataEntry::new().description("Corner radius of buttons.").public(true).themeable(true),
        )
        .with(
            "fontFamilyBase",
            MetadataEntry::new().description("Base font stack.").public(true).themeable(true),
        )
        .with("spaceScaledXs", MetadataEntry::new().public(true))
}
