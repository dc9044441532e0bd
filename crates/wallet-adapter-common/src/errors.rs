use crate::outcome::AbandonReason;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    #[error("no document available: {0}")]
    NoDocument(String),

    #[error("invalid frame url: {0}")]
    InvalidUrl(String),

    #[error("frame mount failed: {0}")]
    MountFailed(String),

    #[error("frame not mounted: {0}")]
    NotMounted(String),

    #[error("post message failed: {0}")]
    PostFailed(String),

    #[error("message listener error: {0}")]
    ListenerError(String),
}

#[derive(Debug, thiserror::Error)]
pub enum AdapterError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Frame(#[from] FrameError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid request params: {0}")]
    InvalidParams(String),

    /// The wallet widget answered with an `error` field.
    #[error("wallet error: {0}")]
    Wallet(String),

    #[error("request abandoned: {0}")]
    Abandoned(AbandonReason),

    #[error("wallet adapter has been destroyed")]
    Destroyed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::ParseError("expected value at line 1".into());
        assert_eq!(
            err.to_string(),
            "config parse error: expected value at line 1"
        );

        let err = ConfigError::ValidationError("widgetUrl must use http or https".into());
        assert_eq!(
            err.to_string(),
            "config validation error: widgetUrl must use http or https"
        );
    }

    #[test]
    fn frame_error_display() {
        let err = FrameError::NoDocument("window has no document".into());
        assert_eq!(err.to_string(), "no document available: window has no document");

        let err = FrameError::PostFailed("contentWindow is null".into());
        assert_eq!(err.to_string(), "post message failed: contentWindow is null");

        let err = FrameError::NotMounted("frame-3".into());
        assert_eq!(err.to_string(), "frame not mounted: frame-3");
    }

    #[test]
    fn adapter_error_from_config() {
        let config_err = ConfigError::ParseError("bad json".into());
        let err: AdapterError = config_err.into();
        assert!(matches!(err, AdapterError::Config(_)));
        assert!(err.to_string().contains("bad json"));
    }

    #[test]
    fn adapter_error_from_frame() {
        let frame_err = FrameError::MountFailed("appendChild threw".into());
        let err: AdapterError = frame_err.into();
        assert!(matches!(err, AdapterError::Frame(_)));
        assert!(err.to_string().contains("appendChild threw"));
    }

    #[test]
    fn adapter_error_from_serde() {
        let serde_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: AdapterError = serde_err.into();
        assert!(matches!(err, AdapterError::Serialization(_)));
    }

    #[test]
    fn adapter_error_other_variants() {
        let err = AdapterError::Wallet("User rejected".into());
        assert_eq!(err.to_string(), "wallet error: User rejected");

        let err = AdapterError::Abandoned(AbandonReason::ClosedByUser);
        assert_eq!(err.to_string(), "request abandoned: closed by user");

        let err = AdapterError::Destroyed;
        assert_eq!(err.to_string(), "wallet adapter has been destroyed");
    }
}
