//! Metadata schema definitions supplied by the remote library.

use serde::{Deserialize, Serialize};

use ecl_core::{Error, Result};

/// Schema description of one external metadata element.
///
/// Each variant carries only what its kind needs; groups own their child
/// definitions in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FieldDefinition {
    Text {
        name: String,
    },
    MultiLineText {
        name: String,
    },
    /// Markup-bearing text.
    Xhtml {
        name: String,
    },
    Number {
        name: String,
    },
    Date {
        name: String,
    },
    Group {
        name: String,
        #[serde(default)]
        fields: Vec<FieldDefinition>,
    },
}

impl FieldDefinition {
    pub fn text(name: impl Into<String>) -> Self {
        Self::Text { name: name.into() }
    }

    pub fn multi_line_text(name: impl Into<String>) -> Self {
        Self::MultiLineText { name: name.into() }
    }

    pub fn xhtml(name: impl Into<String>) -> Self {
        Self::Xhtml { name: name.into() }
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self::Number { name: name.into() }
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::Date { name: name.into() }
    }

    pub fn group(name: impl Into<String>, fields: Vec<FieldDefinition>) -> Self {
        Self::Group {
            name: name.into(),
            fields,
        }
    }

    /// Local name of the XML element this definition matches.
    pub fn xml_element_name(&self) -> &str {
        match self {
            Self::Text { name }
            | Self::MultiLineText { name }
            | Self::Xhtml { name }
            | Self::Number { name }
            | Self::Date { name }
            | Self::Group { name, .. } => name,
        }
    }
}

/// Ordered field definitions describing an item's metadata document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataSchema {
    #[serde(default)]
    fields: Vec<FieldDefinition>,
}

impl MetadataSchema {
    pub fn new(fields: Vec<FieldDefinition>) -> Self {
        Self { fields }
    }

    /// Deserialize a schema from its JSON description.
    pub fn from_json(json_str: &str) -> Result<Self> {
        serde_json::from_str(json_str)
            .map_err(|e| Error::Validation(format!("metadata schema parse error: {e}")))
    }

    /// Top-level definitions in declaration order.
    pub fn fields(&self) -> &[FieldDefinition] {
        &self.fields
    }
}
