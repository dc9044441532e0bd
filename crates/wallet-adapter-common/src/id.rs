use serde::{Deserialize, Serialize};
use std::fmt;

/// Generate a fresh request id.
///
/// Ids are opaque random tokens. Collisions are treated as impossible and
/// nothing deduplicates them.
pub fn new_request_id() -> RequestId {
    RequestId(uuid::Uuid::new_v4().simple().to_string())
}

/// Correlates one outgoing request with the widget's response.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(String);

impl RequestId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for RequestId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for RequestId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_id_is_simple_uuid() {
        let id = new_request_id();
        assert_eq!(id.as_str().len(), 32);
        assert!(id.as_str().chars().all(|c| c.is_ascii_hexdigit()));
        let parsed = uuid::Uuid::parse_str(id.as_str());
        assert_eq!(parsed.unwrap().get_version_num(), 4);
    }

    #[test]
    fn request_id_is_unique() {
        let a = new_request_id();
        let b = new_request_id();
        assert_ne!(a, b);
    }

    #[test]
    fn request_id_from_wire_string() {
        let id = RequestId::from("k3j9x1");
        assert_eq!(id.as_str(), "k3j9x1");
        assert_eq!(id.to_string(), "k3j9x1");
        assert_eq!(id, RequestId::from("k3j9x1".to_string()));
    }

    #[test]
    fn request_id_serializes_as_plain_string() {
        let id = RequestId::from("abc123");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"abc123\"");
        let back: RequestId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn request_id_hash() {
        use std::collections::HashSet;
        let mut set = HashSet::new();
        let a = new_request_id();
        set.insert(a.clone());
        set.insert(a);
        assert_eq!(set.len(), 1);
    }
}
