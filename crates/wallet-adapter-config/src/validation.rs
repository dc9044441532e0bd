//! Configuration validation.
//!
//! Collects every problem into one `ConfigError::ValidationError`.

use url::Url;

use wallet_adapter_common::ConfigError;

use crate::schema::{AdapterConfig, TargetOrigin};

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &AdapterConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    let widget = validate_widget_url(&mut errors, &config.widget_url);
    validate_target_origin(&mut errors, &config.target_origin);

    // A mismatch is legal (the widget may relay through another origin) but
    // usually means every response will be filtered out.
    if let (Some(widget), TargetOrigin::Exact(origin)) = (widget, &config.target_origin) {
        let widget_origin = widget.origin().ascii_serialization();
        if &widget_origin != origin {
            tracing::warn!(
                widget_origin = %widget_origin,
                target_origin = %origin,
                "targetOrigin differs from widget origin; widget replies will be ignored"
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_widget_url(errors: &mut Vec<String>, raw: &str) -> Option<Url> {
    let url = match Url::parse(raw) {
        Ok(url) => url,
        Err(e) => {
            errors.push(format!("widgetUrl = {raw:?} is not a valid URL: {e}"));
            return None;
        }
    };

    if !matches!(url.scheme(), "http" | "https") {
        errors.push(format!(
            "widgetUrl = {raw:?} must use http or https, got {}",
            url.scheme()
        ));
        return None;
    }

    if url.cannot_be_a_base() || url.host().is_none() {
        errors.push(format!("widgetUrl = {raw:?} has no host"));
        return None;
    }

    Some(url)
}

fn validate_target_origin(errors: &mut Vec<String>, origin: &TargetOrigin) {
    let TargetOrigin::Exact(raw) = origin else {
        return;
    };

    match Url::parse(raw) {
        Ok(url) if url.origin().is_tuple() => {
            let serialized = url.origin().ascii_serialization();
            if &serialized != raw {
                errors.push(format!(
                    "targetOrigin = {raw:?} must be a bare origin (did you mean {serialized:?}?)"
                ));
            }
        }
        Ok(_) => errors.push(format!("targetOrigin = {raw:?} has an opaque origin")),
        Err(e) => errors.push(format!("targetOrigin = {raw:?} is not a valid origin: {e}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn validation_message(config: &AdapterConfig) -> String {
        match validate(config) {
            Err(ConfigError::ValidationError(msg)) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn default_config_validates() {
        assert!(validate(&AdapterConfig::default()).is_ok());
    }

    #[test]
    fn localhost_widget_validates() {
        let config = AdapterConfig::default()
            .with_widget_url("http://localhost:5173")
            .with_target_origin(TargetOrigin::exact("http://localhost:5173"));
        assert!(validate(&config).is_ok());
    }

    #[test]
    fn rejects_unparseable_widget_url() {
        let config = AdapterConfig::default().with_widget_url("not a url");
        assert!(validation_message(&config).contains("widgetUrl"));
    }

    #[test]
    fn rejects_non_http_widget_url() {
        let config = AdapterConfig::default().with_widget_url("javascript:alert(1)");
        assert!(validation_message(&config).contains("http or https"));

        let config = AdapterConfig::default().with_widget_url("file:///etc/passwd");
        assert!(validation_message(&config).contains("http or https"));
    }

    #[test]
    fn rejects_origin_with_path() {
        let config = AdapterConfig::default()
            .with_target_origin(TargetOrigin::exact("https://wallet-adapter.fastnear.com/"));
        let msg = validation_message(&config);
        assert!(msg.contains("bare origin"));
        assert!(msg.contains("\"https://wallet-adapter.fastnear.com\""));
    }

    #[test]
    fn rejects_garbage_origin() {
        let config = AdapterConfig::default().with_target_origin(TargetOrigin::exact("wallet"));
        assert!(validation_message(&config).contains("targetOrigin"));
    }

    #[test]
    fn collects_all_errors() {
        let config = AdapterConfig::default()
            .with_widget_url("ftp://files.example")
            .with_target_origin(TargetOrigin::exact("nope"));
        let msg = validation_message(&config);
        assert!(msg.contains("widgetUrl"));
        assert!(msg.contains("targetOrigin"));
        assert!(msg.contains("; "));
    }

    #[test]
    fn mismatched_origin_is_allowed() {
        let config = AdapterConfig::default()
            .with_target_origin(TargetOrigin::exact("https://relay.example"));
        assert!(validate(&config).is_ok());
    }
}
