//! Configuration schema types.
//!
//! `AdapterConfig` uses `serde(default)` so partial configs work; keys are
//! camelCase to match what a host page passes in.

use serde::{Deserialize, Serialize};
use url::Url;

use wallet_adapter_common::ConfigError;

use crate::validation;

/// Hosted wallet widget.
pub const DEFAULT_WIDGET_URL: &str = "https://wallet-adapter.fastnear.com";

/// Target origin meaning "any origin".
pub const WILDCARD_ORIGIN: &str = "*";

/// Origin restriction for inbound messages and outbound `postMessage`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TargetOrigin {
    #[default]
    Any,
    Exact(String),
}

impl TargetOrigin {
    pub fn exact(origin: impl Into<String>) -> Self {
        Self::from(origin.into())
    }

    /// Whether a message from `origin` passes the restriction.
    pub fn matches(&self, origin: &str) -> bool {
        match self {
            Self::Any => true,
            Self::Exact(expected) => expected == origin,
        }
    }

    /// Value passed as `targetOrigin` to `postMessage`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Any => WILDCARD_ORIGIN,
            Self::Exact(origin) => origin,
        }
    }
}

impl From<String> for TargetOrigin {
    fn from(origin: String) -> Self {
        if origin == WILDCARD_ORIGIN {
            Self::Any
        } else {
            Self::Exact(origin)
        }
    }
}

impl From<TargetOrigin> for String {
    fn from(origin: TargetOrigin) -> Self {
        match origin {
            TargetOrigin::Any => WILDCARD_ORIGIN.to_owned(),
            TargetOrigin::Exact(origin) => origin,
        }
    }
}

/// Connector configuration. Immutable once handed to an adapter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdapterConfig {
    /// Base URL the widget pages (`/login.html`, `/sign.html`) resolve against.
    pub widget_url: String,
    pub target_origin: TargetOrigin,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            widget_url: DEFAULT_WIDGET_URL.to_owned(),
            target_origin: TargetOrigin::Any,
        }
    }
}

impl AdapterConfig {
    pub fn with_widget_url(mut self, widget_url: impl Into<String>) -> Self {
        self.widget_url = widget_url.into();
        self
    }

    pub fn with_target_origin(mut self, target_origin: TargetOrigin) -> Self {
        self.target_origin = target_origin;
        self
    }

    /// Parse and validate a JSON config object.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(raw).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        validation::validate(&config)?;
        Ok(config)
    }

    /// The parsed widget base URL.
    pub fn widget_base(&self) -> Result<Url, ConfigError> {
        Url::parse(&self.widget_url)
            .map_err(|e| ConfigError::ValidationError(format!("widgetUrl: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_hosted_widget() {
        let config = AdapterConfig::default();
        assert_eq!(config.widget_url, "https://wallet-adapter.fastnear.com");
        assert_eq!(config.target_origin, TargetOrigin::Any);
    }

    #[test]
    fn empty_json_gives_defaults() {
        let config = AdapterConfig::from_json("{}").unwrap();
        assert_eq!(config, AdapterConfig::default());
    }

    #[test]
    fn partial_json_overrides_one_field() {
        let config = AdapterConfig::from_json(r#"{ "widgetUrl": "http://localhost:3000" }"#).unwrap();
        assert_eq!(config.widget_url, "http://localhost:3000");
        assert_eq!(config.target_origin, TargetOrigin::Any);
    }

    #[test]
    fn malformed_json_is_parse_error() {
        let err = AdapterConfig::from_json("{ widgetUrl: ").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn wildcard_string_maps_to_any() {
        assert_eq!(TargetOrigin::exact("*"), TargetOrigin::Any);
        assert_eq!(TargetOrigin::Any.as_str(), "*");
        let json = serde_json::to_string(&TargetOrigin::Any).unwrap();
        assert_eq!(json, "\"*\"");
    }

    #[test]
    fn exact_origin_matches_only_itself() {
        let origin = TargetOrigin::exact("https://wallet.example");
        assert!(origin.matches("https://wallet.example"));
        assert!(!origin.matches("https://evil.example"));
        assert!(!origin.matches("https://wallet.example:8443"));
        assert!(TargetOrigin::Any.matches("https://anything.example"));
    }

    #[test]
    fn widget_base_parses_configured_url() {
        let config = AdapterConfig::default().with_widget_url("https://widget.example/app/");
        assert_eq!(config.widget_base().unwrap().path(), "/app/");
        assert_eq!(
            AdapterConfig::default().widget_base().unwrap().as_str(),
            "https://wallet-adapter.fastnear.com/"
        );
    }
}
