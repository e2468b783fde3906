//! Request DTOs for the cache admin API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

/// What an invalidation request targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationTarget {
    /// Every key matching a glob pattern
    Pattern(String),
    /// One exact key
    Key(String),
}

/// Request body for POST /cache/invalidate
///
/// # Fields
/// - `pattern`: Glob pattern such as `tags:*`
/// - `key`: Exact cache key
///
/// Exactly one of the two must be given.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InvalidateRequest {
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub key: Option<String>,
}

impl InvalidateRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        match (&self.pattern, &self.key) {
            (Some(_), Some(_)) => Some("Provide either 'pattern' or 'key', not both".to_string()),
            (None, None) => Some("One of 'pattern' or 'key' is required".to_string()),
            (Some(value), None) | (None, Some(value)) if value.is_empty() => {
                Some("Invalidation target cannot be empty".to_string())
            }
            _ => None,
        }
    }

    /// The validated target, if any.
    pub fn target(&self) -> Option<InvalidationTarget> {
        if self.validate().is_some() {
            return None;
        }
        match (&self.pattern, &self.key) {
            (Some(pattern), None) => Some(InvalidationTarget::Pattern(pattern.clone())),
            (None, Some(key)) => Some(InvalidationTarget::Key(key.clone())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalidate_request_deserialize_pattern() {
        let json = r#"{"pattern": "tags:*"}"#;
        let req: InvalidateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.pattern.as_deref(), Some("tags:*"));
        assert!(req.key.is_none());
        assert_eq!(
            req.target(),
            Some(InvalidationTarget::Pattern("tags:*".to_string()))
        );
    }

    #[test]
    fn test_invalidate_request_deserialize_key() {
        let json = r#"{"key": "posts:detail:1"}"#;
        let req: InvalidateRequest = serde_json::from_str(json).unwrap();
        assert_eq!(
            req.target(),
            Some(InvalidationTarget::Key("posts:detail:1".to_string()))
        );
    }

    #[test]
    fn test_validate_requires_one_target() {
        assert!(InvalidateRequest::default().validate().is_some());

        let both = InvalidateRequest {
            pattern: Some("tags:*".to_string()),
            key: Some("tags:list".to_string()),
        };
        assert!(both.validate().is_some());
        assert!(both.target().is_none());
    }

    #[test]
    fn test_validate_empty_target() {
        let req = InvalidateRequest {
            pattern: Some(String::new()),
            key: None,
        };
        assert!(req.validate().is_some());
    }
}
