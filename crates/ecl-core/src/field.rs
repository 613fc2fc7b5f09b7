//! The local typed field model.
//!
//! A [`Field`] is a named, possibly multi-valued container whose storage is
//! chosen by its kind. Storage and kind live together in [`FieldValues`], so
//! a field can never hold values that disagree with its declared type.
//! A [`FieldSet`] keeps fields in insertion order, keyed by name.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Field types
// ---------------------------------------------------------------------------

/// Declared type of a [`Field`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldType {
    Text,
    MultiLineText,
    Xhtml,
    Number,
    Date,
    Embedded,
}

impl FieldType {
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "Text",
            FieldType::MultiLineText => "MultiLineText",
            FieldType::Xhtml => "Xhtml",
            FieldType::Number => "Number",
            FieldType::Date => "Date",
            FieldType::Embedded => "Embedded",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Flavour of a string-valued field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TextKind {
    #[default]
    Text,
    MultiLineText,
    /// Markup-bearing text; values hold inner markup verbatim.
    Xhtml,
}

impl From<TextKind> for FieldType {
    fn from(kind: TextKind) -> Self {
        match kind {
            TextKind::Text => FieldType::Text,
            TextKind::MultiLineText => FieldType::MultiLineText,
            TextKind::Xhtml => FieldType::Xhtml,
        }
    }
}

// ---------------------------------------------------------------------------
// Field values
// ---------------------------------------------------------------------------

/// Kind-specific value storage, in document order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValues {
    Text { kind: TextKind, values: Vec<String> },
    Number(Vec<f64>),
    Date(Vec<NaiveDateTime>),
    Embedded(Vec<FieldSet>),
}

impl FieldValues {
    /// The field type implied by this storage.
    pub fn field_type(&self) -> FieldType {
        match self {
            FieldValues::Text { kind, .. } => (*kind).into(),
            FieldValues::Number(_) => FieldType::Number,
            FieldValues::Date(_) => FieldType::Date,
            FieldValues::Embedded(_) => FieldType::Embedded,
        }
    }

    /// Number of values held.
    pub fn len(&self) -> usize {
        match self {
            FieldValues::Text { values, .. } => values.len(),
            FieldValues::Number(v) => v.len(),
            FieldValues::Date(v) => v.len(),
            FieldValues::Embedded(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// ---------------------------------------------------------------------------
// Field
// ---------------------------------------------------------------------------

/// A named, typed value container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    values: FieldValues,
}

impl Field {
    pub fn new(name: impl Into<String>, values: FieldValues) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Plain text field.
    pub fn text(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(
            name,
            FieldValues::Text {
                kind: TextKind::Text,
                values,
            },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn field_type(&self) -> FieldType {
        self.values.field_type()
    }

    pub fn values(&self) -> &FieldValues {
        &self.values
    }

    /// String values; empty unless this is a text-kind field.
    pub fn text_values(&self) -> &[String] {
        match &self.values {
            FieldValues::Text { values, .. } => values,
            _ => &[],
        }
    }

    /// Numeric values; empty unless this is a number field.
    pub fn numeric_values(&self) -> &[f64] {
        match &self.values {
            FieldValues::Number(v) => v,
            _ => &[],
        }
    }

    /// Date values; empty unless this is a date field.
    pub fn date_time_values(&self) -> &[NaiveDateTime] {
        match &self.values {
            FieldValues::Date(v) => v,
            _ => &[],
        }
    }

    /// Nested field sets; empty unless this is an embedded field.
    pub fn embedded_values(&self) -> &[FieldSet] {
        match &self.values {
            FieldValues::Embedded(v) => v,
            _ => &[],
        }
    }
}

// ---------------------------------------------------------------------------
// FieldSet
// ---------------------------------------------------------------------------

/// Insertion-ordered mapping from field name to [`Field`].
///
/// The key of every entry is the contained field's own name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    fields: Vec<Field>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a field under its own name.
    ///
    /// An existing field with the same name is replaced in place (keeping its
    /// position) and returned.
    pub fn insert(&mut self, field: Field) -> Option<Field> {
        match self.fields.iter_mut().find(|f| f.name == field.name) {
            Some(existing) => Some(std::mem::replace(existing, field)),
            None => {
                self.fields.push(field);
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Field names in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|f| f.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Field> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = &'a Field;
    type IntoIter = std::slice::Iter<'a, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl IntoIterator for FieldSet {
    type Item = Field;
    type IntoIter = std::vec::IntoIter<Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl FromIterator<Field> for FieldSet {
    fn from_iter<I: IntoIterator<Item = Field>>(iter: I) -> Self {
        let mut set = FieldSet::new();
        for field in iter {
            set.insert(field);
        }
        set
    }
}
