use url::Url;

/// Inline style of the overlay: full viewport, borderless, above page content.
pub const OVERLAY_STYLE: &[(&str, &str)] = &[
    ("border", "none"),
    ("z-index", "10000"),
    ("position", "fixed"),
    ("display", "block"),
    ("top", "0"),
    ("left", "0"),
    ("width", "100%"),
    ("height", "100%"),
];

/// Permissions policy granted to the widget (hardware wallets need WebUSB).
const DEFAULT_ALLOW: &str = "usb";

/// What a host needs to attach one overlay frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameSpec {
    pub url: Url,
    /// Value of the iframe `allow` attribute.
    pub allow: Option<String>,
    pub style: &'static [(&'static str, &'static str)],
}

impl FrameSpec {
    pub fn overlay(url: Url) -> Self {
        Self {
            url,
            allow: Some(DEFAULT_ALLOW.to_owned()),
            style: OVERLAY_STYLE,
        }
    }
}

/// Why a frame was removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    /// The widget answered the frame's request.
    Resolved,
    /// The widget sent a `close` action.
    ClosedByWidget,
    /// A newer frame replaced it.
    Replaced,
    /// The adapter was torn down.
    Teardown,
}
