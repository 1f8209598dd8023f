//! Classic overrides, layered over visual refresh.

use crate::dictionary::Dictionary;

pub(super) fn palette() -> Dictionary {
    Dictionary::new()
        .with("colorOrange600", "#ec7211")
        .with("colorGrey900", "#16191f")
}

pub(super) fn typography() -> Dictionary {
    Dictionary::new().with("fontFamilyBase", "'Amazon Ember', 'Helvetica Neue', Roboto, Arial, sans-serif")
}

pub(super) fn borders() -> Dictionary {
    Dictionary::new()
        .with("borderRadiusButton", "2px")
        .with("borderRadiusContainer", "0px")
        .with("borderWidthField", "1px")
}

pub(super) fn colors() -> Dictionary {
    Dictionary::new()
        .with("colorBackgroundButtonPrimaryDefault", "{colorOrange600}")
        .with_states("colorTextLinkDefault", [("light", "{colorBlue600}"), ("dark", "{colorBlue400}")])
        .with_states("colorBackgroundLayoutMain", [("light", "{colorGrey100}")])
}

/// Classic headers stay light in light mode.
pub(super) fn header() -> Dictionary {
    Dictionary::new()
        .with_states("colorBackgroundLayoutMain", [("light", "{colorWhite}")])
        .with_states("colorTextBody", [("light", "{colorGrey900}")])
}
