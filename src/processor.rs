//! Rewrites stub records and inline links to reference external assets.

use ecl_core::{Config, Error, ExternalReference, Result};
use ecl_library::{ExternalItemResolver, LibrarySession};

use crate::markup::{LinkElement, XLINK_NAMESPACE};
use crate::record::ContentRecord;

/// Processes stubs against one library session for the length of a run.
///
/// The session is closed exactly once: by [`StubProcessor::close`] or, failing
/// that, when the processor is dropped.
pub struct StubProcessor<S: LibrarySession> {
    session: S,
    config: Config,
    closed: bool,
}

impl<S: LibrarySession> StubProcessor<S> {
    pub fn new(session: S) -> Self {
        Self::with_config(session, Config::default())
    }

    pub fn with_config(session: S, config: Config) -> Self {
        for warning in config.validate() {
            tracing::warn!("Stub processor config: {warning}");
        }
        Self {
            session,
            config,
            closed: false,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    /// Fill a stub record from the external item its id points at.
    ///
    /// Sets the external id, the multimedia URL, the display type, MIME type,
    /// file name and template fragment as extension properties, and the
    /// mapped external metadata (when there is any) as extension data.
    ///
    /// # Errors
    ///
    /// Propagates resolution failures; the record is left untouched then.
    /// Metadata failures are logged and only drop the metadata.
    pub fn apply_to_record<R: ContentRecord + ?Sized>(&self, record: &mut R) -> Result<()> {
        let reference = ExternalReference::from(record.id());
        let item = ExternalItemResolver::new(&self.session)
            .resolve(&reference)?
            .into_snapshot()?;

        record.set_ecl_id(item.id.to_string());
        record.set_multimedia_url(item.direct_link.clone());

        let section = self.config.extension_section.as_str();
        record.add_extension_property(section, "DisplayTypeId", item.display_type_id.clone());
        record.add_extension_property(section, "MimeType", item.mime_type.clone());
        record.add_extension_property(section, "FileName", item.filename.clone());
        record.add_extension_property(section, "TemplateFragment", item.template_fragment.clone());

        if let Some(fields) = item.external_metadata() {
            record.set_extension_data(&self.config.metadata_key, fields);
        }

        Ok(())
    }

    /// Decorate an inline link with data attributes describing the external
    /// item its `xlink:href` points at, and return the item's publish URL.
    ///
    /// The id and display type are always written; MIME type, file name and
    /// template fragment only when non-empty. External metadata is not mapped
    /// for inline links.
    pub fn apply_to_element<E: LinkElement + ?Sized>(&self, element: &mut E) -> Result<String> {
        let reference = element
            .attribute("href", Some(XLINK_NAMESPACE))
            .map(ExternalReference::from)
            .filter(|reference| !reference.is_empty())
            .ok_or_else(|| Error::reference_parse(""))?;
        let item = ExternalItemResolver::new(&self.session)
            .resolve(&reference)?
            .into_link_snapshot()?;

        let attr = |suffix: &str| self.config.attribute_name(suffix);
        element.set_attribute(&attr("Id"), &item.id.to_string());
        element.set_attribute(&attr("DisplayTypeId"), &item.display_type_id);
        if !item.mime_type.is_empty() {
            element.set_attribute(&attr("MimeType"), &item.mime_type);
        }
        if !item.filename.is_empty() {
            element.set_attribute(&attr("FileName"), &item.filename);
        }
        // The whole fragment goes into one attribute; attribute size is unbounded.
        if !item.template_fragment.is_empty() {
            element.set_attribute(&attr("TemplateFragment"), &item.template_fragment);
        }

        Ok(item.direct_link)
    }

    /// Close the session now.
    pub fn close(mut self) {
        self.close_session();
    }

    fn close_session(&mut self) {
        if !self.closed {
            self.closed = true;
            self.session.close();
            tracing::debug!("Closed ECL session");
        }
    }
}

impl<S: LibrarySession> Drop for StubProcessor<S> {
    fn drop(&mut self) {
        self.close_session();
    }
}
