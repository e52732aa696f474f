//! Error types for contact-store

use thiserror::Error;

use crate::domain::DomainError;

/// Result type alias for contact-store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while reading, writing or mutating the contact collection
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed contacts XML at byte {position}: {source}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("contact {0} not found")]
    NotFound(u32),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl StoreError {
    pub(crate) fn io(path: &std::path::Path, source: std::io::Error) -> Self {
        StoreError::Io {
            path: path.display().to_string(),
            source,
        }
    }

    /// True when the error only means the contacts file does not exist yet
    pub fn is_not_found_file(&self) -> bool {
        matches!(self, StoreError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(id) => DomainError::NotFound(format!("contact {}", id)),
            StoreError::InvalidConfig(msg) => DomainError::InvalidInput(msg),
            other => DomainError::Internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_errors_map_to_domain_errors() {
        assert_eq!(
            DomainError::from(StoreError::NotFound(4)),
            DomainError::NotFound("contact 4".to_string())
        );
        assert!(matches!(
            DomainError::from(StoreError::InvalidConfig("bad".into())),
            DomainError::InvalidInput(_)
        ));

        let missing = StoreError::io(
            std::path::Path::new("contacts.xml"),
            std::io::Error::from(std::io::ErrorKind::NotFound),
        );
        assert!(missing.is_not_found_file());
        assert!(matches!(DomainError::from(missing), DomainError::Internal(_)));
    }
}
