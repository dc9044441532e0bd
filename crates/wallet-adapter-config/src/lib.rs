//! Wallet adapter configuration.
//!
//! A connector is configured once, at construction, with the widget base
//! URL and the target origin used both to filter inbound messages and to
//! scope outbound `postMessage` calls. Every field has a default, so an
//! empty config (`{}`) talks to the hosted widget and accepts any origin.
//!
//! ```rust
//! use wallet_adapter_config::{AdapterConfig, TargetOrigin};
//!
//! let config = AdapterConfig::from_json(r#"{ "targetOrigin": "https://wallet.example" }"#)
//!     .expect("valid config");
//! assert_eq!(config.target_origin, TargetOrigin::exact("https://wallet.example"));
//! ```

pub mod schema;
pub mod validation;

pub use schema::{AdapterConfig, TargetOrigin, DEFAULT_WIDGET_URL, WILDCARD_ORIGIN};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_serializes_with_wire_names() {
        let json = serde_json::to_string_pretty(&AdapterConfig::default()).unwrap();
        assert!(json.contains("\"widgetUrl\""));
        assert!(json.contains("\"targetOrigin\": \"*\""));
        assert!(json.contains(DEFAULT_WIDGET_URL));
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = AdapterConfig::default()
            .with_target_origin(TargetOrigin::exact("https://wallet-adapter.fastnear.com"));
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(AdapterConfig::from_json(&json).unwrap(), config);
    }
}
