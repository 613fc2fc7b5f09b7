//! Inline markup elements carrying XLink references.

use quick_xml::escape::escape;

/// Namespace of the `href` attribute on inline links.
pub const XLINK_NAMESPACE: &str = "http://www.w3.org/1999/xlink";

/// An element whose attributes can be read by namespace and written plainly.
pub trait LinkElement {
    /// Value of the attribute `local_name` in `namespace` (`None` for no
    /// namespace).
    fn attribute(&self, local_name: &str, namespace: Option<&str>) -> Option<&str>;

    /// Set an un-namespaced attribute, replacing any previous value.
    fn set_attribute(&mut self, name: &str, value: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Attribute {
    namespace: Option<(String, String)>,
    local_name: String,
    value: String,
}

impl Attribute {
    fn qualified_name(&self) -> String {
        match &self.namespace {
            Some((prefix, _)) => format!("{prefix}:{}", self.local_name),
            None => self.local_name.clone(),
        }
    }
}

/// Owned element with ordered attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkupElement {
    name: String,
    attributes: Vec<Attribute>,
}

impl MarkupElement {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
        }
    }

    /// An `<a>` element pointing at `href` through `xlink:href`.
    pub fn xlink(href: impl Into<String>) -> Self {
        Self::new("a").with_namespaced_attribute("xlink", XLINK_NAMESPACE, "href", href)
    }

    pub fn with_attribute(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set_attribute(name, &value.into());
        self
    }

    pub fn with_namespaced_attribute(
        mut self,
        prefix: impl Into<String>,
        namespace: impl Into<String>,
        local_name: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        self.attributes.push(Attribute {
            namespace: Some((prefix.into(), namespace.into())),
            local_name: local_name.into(),
            value: value.into(),
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether an un-namespaced attribute named `name` is present.
    pub fn has_attribute(&self, name: &str) -> bool {
        self.attribute(name, None).is_some()
    }

    /// Serialize as an empty element, escaping attribute values.
    ///
    /// Namespace declarations are emitted for every prefix in use.
    pub fn to_xml(&self) -> String {
        let mut out = format!("<{}", self.name);

        let mut declared: Vec<&str> = Vec::new();
        for (prefix, uri) in self.attributes.iter().filter_map(|a| a.namespace.as_ref()) {
            if !declared.contains(&prefix.as_str()) {
                declared.push(prefix);
                out.push_str(&format!(" xmlns:{prefix}=\"{}\"", escape(uri.as_str())));
            }
        }
        for attr in &self.attributes {
            out.push_str(&format!(
                " {}=\"{}\"",
                attr.qualified_name(),
                escape(attr.value.as_str())
            ));
        }

        out.push_str("/>");
        out
    }
}

impl LinkElement for MarkupElement {
    fn attribute(&self, local_name: &str, namespace: Option<&str>) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| {
                a.local_name == local_name
                    && a.namespace.as_ref().map(|(_, uri)| uri.as_str()) == namespace
            })
            .map(|a| a.value.as_str())
    }

    fn set_attribute(&mut self, name: &str, value: &str) {
        match self
            .attributes
            .iter_mut()
            .find(|a| a.namespace.is_none() && a.local_name == name)
        {
            Some(existing) => existing.value = value.to_string(),
            None => self.attributes.push(Attribute {
                namespace: None,
                local_name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn namespaced_lookup() {
        let el = MarkupElement::xlink("tcm:5-123").with_attribute("href", "plain");
        assert_eq!(el.attribute("href", Some(XLINK_NAMESPACE)), Some("tcm:5-123"));
        assert_eq!(el.attribute("href", None), Some("plain"));
        assert_eq!(el.attribute("href", Some("urn:other")), None);
    }

    #[test]
    fn set_attribute_replaces() {
        let mut el = MarkupElement::new("a");
        el.set_attribute("data-x", "1");
        el.set_attribute("data-x", "2");
        assert_eq!(el.attribute("data-x", None), Some("2"));
        assert!(el.has_attribute("data-x"));
        assert!(!el.has_attribute("data-y"));
    }

    #[test]
    fn to_xml_escapes_values() {
        let el = MarkupElement::xlink("tcm:5-123")
            .with_attribute("data-frag", "<img src=\"a&b.png\"/>");
        assert_eq!(
            el.to_xml(),
            "<a xmlns:xlink=\"http://www.w3.org/1999/xlink\" xlink:href=\"tcm:5-123\" \
             data-frag=\"&lt;img src=&quot;a&amp;b.png&quot;/&gt;\"/>"
        );
    }
}
