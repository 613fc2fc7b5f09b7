//! Host content records that may stand in for external assets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use ecl_core::{Field, FieldSet};

/// Mutable content record the stub processor writes into.
pub trait ContentRecord {
    /// Local identifier of the record; doubles as its external reference.
    fn id(&self) -> &str;

    fn set_ecl_id(&mut self, ecl_id: String);

    /// Set the URL slot of the record's multimedia part.
    fn set_multimedia_url(&mut self, url: String);

    /// Set a single-valued property within an extension section.
    fn add_extension_property(&mut self, section: &str, name: &str, value: String);

    /// Attach a whole field set as extension data under `key`.
    fn set_extension_data(&mut self, key: &str, fields: FieldSet);
}

/// Multimedia part of a [`Component`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Multimedia {
    pub url: Option<String>,
}

/// Owned content record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Component {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub ecl_id: Option<String>,
    #[serde(default)]
    pub multimedia: Option<Multimedia>,
    /// Extension sections and metadata, keyed by section name or data key.
    #[serde(default)]
    pub extension_data: HashMap<String, FieldSet>,
}

impl Component {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Self::default()
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// First value of an extension property, if set.
    pub fn extension_property(&self, section: &str, name: &str) -> Option<&str> {
        self.extension_data
            .get(section)?
            .get(name)?
            .text_values()
            .first()
            .map(String::as_str)
    }
}

impl ContentRecord for Component {
    fn id(&self) -> &str {
        &self.id
    }

    fn set_ecl_id(&mut self, ecl_id: String) {
        self.ecl_id = Some(ecl_id);
    }

    fn set_multimedia_url(&mut self, url: String) {
        self.multimedia.get_or_insert_with(Multimedia::default).url = Some(url);
    }

    fn add_extension_property(&mut self, section: &str, name: &str, value: String) {
        self.extension_data
            .entry(section.to_string())
            .or_default()
            .insert(Field::text(name, vec![value]));
    }

    fn set_extension_data(&mut self, key: &str, fields: FieldSet) {
        self.extension_data.insert(key.to_string(), fields);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multimedia_created_on_demand() {
        let mut c = Component::new("tcm:5-123");
        assert!(c.multimedia.is_none());
        c.set_multimedia_url("https://cdn/x.jpg".into());
        assert_eq!(
            c.multimedia.as_ref().and_then(|m| m.url.as_deref()),
            Some("https://cdn/x.jpg")
        );
    }

    #[test]
    fn extension_properties_group_by_section() {
        let mut c = Component::new("tcm:5-123");
        c.add_extension_property("ECL", "MimeType", "image/png".into());
        c.add_extension_property("ECL", "FileName", "a.png".into());
        c.add_extension_property("ECL", "MimeType", "image/gif".into());

        let section = &c.extension_data["ECL"];
        assert_eq!(section.keys().collect::<Vec<_>>(), ["MimeType", "FileName"]);
        assert_eq!(c.extension_property("ECL", "MimeType"), Some("image/gif"));
        assert_eq!(c.extension_property("ECL", "Missing"), None);
        assert_eq!(c.extension_property("Other", "MimeType"), None);
    }

    #[test]
    fn component_json_roundtrip() {
        let mut c = Component::new("tcm:5-123").with_title("Stub");
        c.set_ecl_id("ecl:5-mm-42-file".into());
        c.add_extension_property("ECL", "FileName", "a.png".into());

        let json = serde_json::to_string(&c).unwrap();
        let back: Component = serde_json::from_str(&json).unwrap();
        assert_eq!(back, c);
    }
}
