//! Error types for the document layer
//!
//! Parsing never fails: malformed headers degrade to an empty mapping.
//! Errors only arise when producing text.

/// Errors while producing document text
#[derive(Debug, thiserror::Error)]
pub enum DocError {
    /// Metadata could not be serialized back to YAML
    #[error("metadata serialization failed: {0}")]
    Serialize(#[from] serde_yaml::Error),

    /// Title yields an empty identifier after slugification
    #[error("title '{0}' does not produce a usable spec id")]
    EmptySlug(String),
}

/// Result type alias for document operations
pub type DocResult<T> = Result<T, DocError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_slug_display() {
        let err = DocError::EmptySlug("!!!".to_string());
        assert_eq!(
            err.to_string(),
            "title '!!!' does not produce a usable spec id"
        );
    }
}
