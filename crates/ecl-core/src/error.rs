//! Unified error type for stub resolution.
//!
//! Every stage funnels its failures into [`Error`]. Only
//! [`Error::MetadataParse`] is recoverable at the item level: the metadata
//! mapper logs it and degrades to "no metadata" instead of propagating.

use std::fmt;

/// Unified error type covering all failure modes of stub resolution.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The reference does not point into the external content library.
    #[error("Unable to get ECL URI for reference: {reference}")]
    ReferenceParse {
        /// The local reference that could not be translated.
        reference: String,
    },

    /// The batched lookup returned no multimedia item for the handle.
    #[error("ECL item '{handle}' not found (reference: '{reference}')")]
    ItemNotFound {
        /// The remote handle that was looked up.
        handle: String,
        /// The local reference the handle was derived from.
        reference: String,
    },

    /// External metadata could not be parsed or converted.
    #[error("Metadata error for ECL item '{item_id}': {message}")]
    MetadataParse {
        /// Id of the item whose metadata failed.
        item_id: String,
        /// Human-readable description of the failure.
        message: String,
    },

    /// The remote library transport reported a failure.
    #[error("Remote library error: {0}")]
    Remote(String),

    /// Configuration or input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// An I/O operation failed.
    #[error("IO error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },
}

impl Error {
    /// Convenience constructor for [`Error::ReferenceParse`].
    pub fn reference_parse(reference: impl fmt::Display) -> Self {
        Error::ReferenceParse {
            reference: reference.to_string(),
        }
    }

    /// Convenience constructor for [`Error::ItemNotFound`].
    pub fn item_not_found(handle: impl fmt::Display, reference: impl fmt::Display) -> Self {
        Error::ItemNotFound {
            handle: handle.to_string(),
            reference: reference.to_string(),
        }
    }

    /// Convenience constructor for [`Error::MetadataParse`].
    pub fn metadata_parse(item_id: impl fmt::Display, message: impl Into<String>) -> Self {
        Error::MetadataParse {
            item_id: item_id.to_string(),
            message: message.into(),
        }
    }

    /// Convenience constructor for [`Error::Remote`].
    pub fn remote(message: impl Into<String>) -> Self {
        Error::Remote(message.into())
    }

    /// Whether this error aborts processing of the whole item.
    ///
    /// Metadata failures degrade to "no metadata"; everything else is fatal
    /// for the item being resolved.
    pub fn is_item_fatal(&self) -> bool {
        !matches!(self, Error::MetadataParse { .. })
    }
}

/// Result alias using the crate-level [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn reference_parse_display() {
        let err = Error::reference_parse("tcm:5-123");
        assert_eq!(
            err.to_string(),
            "Unable to get ECL URI for reference: tcm:5-123"
        );
        assert!(err.is_item_fatal());
    }

    #[test]
    fn item_not_found_display() {
        let err = Error::item_not_found("ecl:5-mm-42-file", "tcm:5-123");
        assert_eq!(
            err.to_string(),
            "ECL item 'ecl:5-mm-42-file' not found (reference: 'tcm:5-123')"
        );
        assert_matches!(err, Error::ItemNotFound { ref handle, .. } if handle == "ecl:5-mm-42-file");
    }

    #[test]
    fn metadata_parse_is_not_fatal() {
        let err = Error::metadata_parse("ecl:5-mm-42-file", "bad number");
        assert_eq!(
            err.to_string(),
            "Metadata error for ECL item 'ecl:5-mm-42-file': bad number"
        );
        assert!(!err.is_item_fatal());
    }

    #[test]
    fn remote_display() {
        let err = Error::remote("channel faulted");
        assert_eq!(err.to_string(), "Remote library error: channel faulted");
    }

    #[test]
    fn io_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err = Error::from(io_err);
        assert_matches!(err, Error::Io { .. });
    }
}
