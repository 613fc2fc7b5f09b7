//! Failures raised while mapping external metadata.

use ecl_core::Error;

/// Reason a metadata document could not be mapped.
///
/// Any of these aborts mapping for the whole item.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MappingError {
    /// The document is not well-formed XML.
    #[error("malformed metadata XML: {0}")]
    Xml(String),

    /// The document has no root element.
    #[error("metadata XML has no root element")]
    MissingRoot,

    /// A number field holds text that is not a number.
    #[error("field '{field}': '{value}' is not a valid number")]
    InvalidNumber { field: String, value: String },

    /// A date field holds text that is not a date.
    #[error("field '{field}': '{value}' is not a valid date")]
    InvalidDate { field: String, value: String },

    /// Two schema definitions produced a field with the same name.
    #[error("field '{0}' is defined more than once")]
    DuplicateField(String),
}

impl MappingError {
    /// Attach the offending item id, yielding the crate-wide error.
    pub fn into_error(self, item_id: impl std::fmt::Display) -> Error {
        Error::metadata_parse(item_id, self.to_string())
    }
}
