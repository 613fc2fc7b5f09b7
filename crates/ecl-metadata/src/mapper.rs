//! Recursive mapping of metadata XML onto the local field model.
//!
//! For every definition, in schema order, all same-named immediate children
//! of the parent element are collected in document order. No match means no
//! field; otherwise one field is produced holding one value per element.
//! Groups recurse with the matched element as the new parent.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use ecl_core::{Field, FieldSet, FieldValues, TextKind};

use crate::document::{self, Element};
use crate::error::MappingError;
use crate::schema::{FieldDefinition, MetadataSchema};

/// Local date-time layouts accepted for date fields, tried in order.
const DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Build the metadata field set for one item.
///
/// Returns `None` when the item has no metadata, when metadata exists but no
/// schema describes it (logged as a warning), or when mapping fails (logged
/// as an error with the item id). A partial field set is never returned.
pub fn build_field_set(
    item_id: &str,
    metadata_xml: Option<&str>,
    schema: Option<&MetadataSchema>,
) -> Option<FieldSet> {
    let xml = metadata_xml.filter(|xml| !xml.trim().is_empty())?;

    let Some(schema) = schema else {
        tracing::warn!(
            item = item_id,
            "ECL item has external metadata, but no schema defining it"
        );
        return None;
    };

    match try_build_field_set(xml, schema) {
        Ok(fields) => {
            let names = fields.keys().collect::<Vec<_>>().join(", ");
            tracing::debug!(item = item_id, fields = %names, "ECL item has external metadata");
            Some(fields)
        }
        Err(e) => {
            let err = e.into_error(item_id);
            tracing::error!(
                item = item_id,
                error = %err,
                "An error occurred while parsing the external metadata"
            );
            None
        }
    }
}

/// Map `xml` against `schema`, surfacing the first failure.
pub fn try_build_field_set(xml: &str, schema: &MetadataSchema) -> Result<FieldSet, MappingError> {
    let root = document::parse(xml)?;
    map_fields(schema.fields(), &root)
}

fn map_fields(
    definitions: &[FieldDefinition],
    parent: &Element,
) -> Result<FieldSet, MappingError> {
    let mut fields = FieldSet::new();

    for definition in definitions {
        let name = definition.xml_element_name();
        let elements: Vec<&Element> = parent.children_named(name).collect();
        if elements.is_empty() {
            continue;
        }

        let values = match definition {
            FieldDefinition::Number { .. } => FieldValues::Number(
                elements
                    .iter()
                    .map(|el| parse_number(name, el.text()))
                    .collect::<Result<_, _>>()?,
            ),
            FieldDefinition::Date { .. } => FieldValues::Date(
                elements
                    .iter()
                    .map(|el| parse_date(name, el.text()))
                    .collect::<Result<_, _>>()?,
            ),
            FieldDefinition::Group {
                fields: children, ..
            } => FieldValues::Embedded(
                elements
                    .iter()
                    .map(|el| map_fields(children, el))
                    .collect::<Result<_, _>>()?,
            ),
            FieldDefinition::Xhtml { .. } => text_values(TextKind::Xhtml, &elements, Element::inner_xml),
            FieldDefinition::MultiLineText { .. } => {
                text_values(TextKind::MultiLineText, &elements, Element::text)
            }
            FieldDefinition::Text { .. } => text_values(TextKind::Text, &elements, Element::text),
        };

        if fields.contains_key(name) {
            return Err(MappingError::DuplicateField(name.to_string()));
        }
        fields.insert(Field::new(name, values));
    }

    Ok(fields)
}

fn text_values(kind: TextKind, elements: &[&Element], read: fn(&Element) -> &str) -> FieldValues {
    FieldValues::Text {
        kind,
        values: elements.iter().map(|el| read(el).to_string()).collect(),
    }
}

fn parse_number(field: &str, text: &str) -> Result<f64, MappingError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| MappingError::InvalidNumber {
            field: field.to_string(),
            value: text.to_string(),
        })
}

fn parse_date(field: &str, text: &str) -> Result<NaiveDateTime, MappingError> {
    let trimmed = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.naive_utc());
    }
    for format in DATE_TIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| MappingError::InvalidDate {
            field: field.to_string(),
            value: text.to_string(),
        })
}
