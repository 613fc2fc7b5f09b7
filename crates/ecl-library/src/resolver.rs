//! Resolution of an external reference into one multimedia item.

use ecl_core::{Error, ExternalReference, FieldSet, RemoteHandle, Result};
use ecl_metadata::{build_field_set, MetadataSchema};

use crate::guard::ContextGuard;
use crate::library::{ItemKind, LibraryContext, LibraryItem, LibrarySession};

/// Resolves external references against a [`LibrarySession`].
pub struct ExternalItemResolver<'s, S: LibrarySession> {
    session: &'s S,
}

impl<'s, S: LibrarySession> ExternalItemResolver<'s, S> {
    pub fn new(session: &'s S) -> Self {
        Self { session }
    }

    /// Resolve `reference` to a single multimedia item.
    ///
    /// The item is fetched through the batched lookup so a miss never puts
    /// the transport into its fault state. The returned [`Resolution`] keeps
    /// the context open; release it once every needed value has been read.
    ///
    /// # Errors
    ///
    /// - [`Error::ReferenceParse`] if the reference does not belong to the
    ///   library.
    /// - [`Error::ItemNotFound`] if the lookup yields no multimedia item. The
    ///   context has already been released.
    /// - Any error from opening the context or the lookup itself.
    pub fn resolve(&self, reference: &ExternalReference) -> Result<Resolution<S::Context>> {
        tracing::debug!(reference = %reference, "Retrieving ECL item for ECL Stub Component");

        let handle = self
            .session
            .handle_for(reference)
            .ok_or_else(|| Error::reference_parse(reference))?;

        let context = ContextGuard::new(self.session.open_context(&handle)?);
        let items = context
            .context()
            .get_items(std::slice::from_ref(&handle))?;

        let Some(item) = items
            .into_iter()
            .find(|item| item.kind() == ItemKind::Multimedia)
        else {
            context.release();
            return Err(Error::item_not_found(&handle, reference));
        };

        tracing::debug!(
            reference = %reference,
            handle = %handle,
            "Retrieved ECL item for ECL Stub Component"
        );

        Ok(Resolution {
            handle,
            item,
            context,
        })
    }
}

/// A resolved item together with the still-open context that serves it.
#[derive(Debug)]
pub struct Resolution<C: LibraryContext> {
    handle: RemoteHandle,
    item: C::Item,
    context: ContextGuard<C>,
}

impl<C: LibraryContext> Resolution<C> {
    /// The handle the item was looked up by.
    pub fn handle(&self) -> &RemoteHandle {
        &self.handle
    }

    /// The live remote item. Only valid until the resolution is consumed.
    pub fn item(&self) -> &C::Item {
        &self.item
    }

    /// Copy every value needed downstream into an owned [`ResolvedItem`],
    /// then release the context.
    ///
    /// The context is released even when reading a value fails.
    pub fn into_snapshot(self) -> Result<ResolvedItem> {
        self.snapshot(true)
    }

    /// Like [`Resolution::into_snapshot`], but never reads the external
    /// metadata or its schema; both are `None` in the result.
    pub fn into_link_snapshot(self) -> Result<ResolvedItem> {
        self.snapshot(false)
    }

    fn snapshot(self, with_metadata: bool) -> Result<ResolvedItem> {
        let Resolution { item, context, .. } = self;

        let (metadata_xml, metadata_schema) = if with_metadata {
            (item.metadata_xml()?, item.metadata_schema()?)
        } else {
            (None, None)
        };
        let snapshot = ResolvedItem {
            id: item.id().clone(),
            display_type_id: item.display_type_id()?,
            mime_type: item.mime_type()?,
            filename: item.filename()?,
            template_fragment: item.template_fragment(None)?,
            direct_link: item.direct_link_to_published(None)?,
            metadata_xml,
            metadata_schema,
        };

        drop(item);
        context.release();
        Ok(snapshot)
    }

    /// Release the context without reading anything further.
    pub fn release(self) {
        self.context.release();
    }
}

/// Owned snapshot of a resolved multimedia item, valid after its context is
/// gone.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedItem {
    pub id: RemoteHandle,
    pub display_type_id: String,
    pub mime_type: String,
    pub filename: String,
    pub template_fragment: String,
    /// Direct URL of the published binary.
    pub direct_link: String,
    pub metadata_xml: Option<String>,
    pub metadata_schema: Option<MetadataSchema>,
}

impl ResolvedItem {
    /// Map the item's external metadata, if any, into a field set.
    ///
    /// Missing metadata, a missing schema, or a mapping failure all yield
    /// `None`; see [`ecl_metadata::build_field_set`].
    pub fn external_metadata(&self) -> Option<FieldSet> {
        build_field_set(
            &self.id.to_string(),
            self.metadata_xml.as_deref(),
            self.metadata_schema.as_ref(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::{MemoryItem, MemoryLibrary};
    use assert_matches::assert_matches;
    use ecl_metadata::FieldDefinition;

    fn handle() -> RemoteHandle {
        RemoteHandle::new(5, "mm", "42", "file")
    }

    fn reference() -> ExternalReference {
        ExternalReference::from("tcm:5-123")
    }

    #[test]
    fn resolves_registered_item() {
        let library = MemoryLibrary::new();
        library.register(
            "tcm:5-123",
            MemoryItem::multimedia(handle())
                .display_type_id("img")
                .mime_type("image/jpeg")
                .filename("photo.jpg")
                .template_fragment("<img src=\"photo.jpg\"/>")
                .direct_link("https://cdn.example.com/photo.jpg"),
        );

        let resolution = ExternalItemResolver::new(&library).resolve(&reference()).unwrap();
        assert_eq!(resolution.handle(), &handle());
        assert_eq!(library.stats().open_contexts(), 1);

        let item = resolution.into_snapshot().unwrap();
        assert_eq!(item.id, handle());
        assert_eq!(item.display_type_id, "img");
        assert_eq!(item.mime_type, "image/jpeg");
        assert_eq!(item.filename, "photo.jpg");
        assert_eq!(item.direct_link, "https://cdn.example.com/photo.jpg");
        assert!(item.metadata_xml.is_none());

        let stats = library.stats();
        assert_eq!(stats.contexts_opened, 1);
        assert_eq!(stats.contexts_closed, 1);
        assert_eq!(stats.batch_calls, 1);
    }

    #[test]
    fn foreign_reference_is_parse_error() {
        let library = MemoryLibrary::new();
        let result = ExternalItemResolver::new(&library).resolve(&ExternalReference::from("tcm:5-999"));

        assert_matches!(result, Err(Error::ReferenceParse { ref reference }) if reference == "tcm:5-999");
        assert_eq!(library.stats().contexts_opened, 0);
    }

    #[test]
    fn empty_lookup_is_not_found_and_releases_once() {
        let library = MemoryLibrary::new();
        library.map_reference("tcm:5-123", handle());

        let result = ExternalItemResolver::new(&library).resolve(&reference());

        assert_matches!(
            result,
            Err(Error::ItemNotFound { ref handle, ref reference })
                if handle == "ecl:5-mm-42-file" && reference == "tcm:5-123"
        );
        let stats = library.stats();
        assert_eq!(stats.contexts_opened, 1);
        assert_eq!(stats.contexts_closed, 1);
        assert_eq!(stats.batch_calls, 1);
    }

    #[test]
    fn non_multimedia_item_is_not_found() {
        let library = MemoryLibrary::new();
        library.register("tcm:5-123", MemoryItem::folder(handle()));

        let result = ExternalItemResolver::new(&library).resolve(&reference());

        assert_matches!(result, Err(Error::ItemNotFound { .. }));
        assert_eq!(library.stats().open_contexts(), 0);
    }

    #[test]
    fn failed_lookup_propagates_and_releases() {
        let library = MemoryLibrary::new();
        library.register("tcm:5-123", MemoryItem::multimedia(handle()));
        library.fail_lookups("channel faulted");

        let result = ExternalItemResolver::new(&library).resolve(&reference());

        assert_matches!(result, Err(Error::Remote(ref msg)) if msg == "channel faulted");
        assert_eq!(library.stats().contexts_closed, 1);
    }

    #[test]
    fn items_are_unreadable_after_release() {
        let library = MemoryLibrary::new();
        library.register("tcm:5-123", MemoryItem::multimedia(handle()).filename("a.png"));

        let resolution = ExternalItemResolver::new(&library).resolve(&reference()).unwrap();
        let item = resolution.item().clone();
        assert_eq!(item.filename().unwrap(), "a.png");

        resolution.release();
        assert_matches!(item.filename(), Err(Error::Remote(_)));
        assert_eq!(library.stats().contexts_closed, 1);
    }

    #[test]
    fn external_metadata_is_mapped_from_snapshot() {
        let library = MemoryLibrary::new();
        library.register(
            "tcm:5-123",
            MemoryItem::multimedia(handle()).metadata(
                "<Meta><Title>Hello</Title></Meta>",
                Some(MetadataSchema::new(vec![FieldDefinition::text("Title")])),
            ),
        );

        let item = ExternalItemResolver::new(&library)
            .resolve(&reference())
            .and_then(Resolution::into_snapshot)
            .unwrap();

        let fields = item.external_metadata().unwrap();
        assert_eq!(fields.get("Title").unwrap().text_values(), ["Hello"]);
    }

    #[test]
    fn failed_value_read_releases_context() {
        let library = MemoryLibrary::new();
        library.register(
            "tcm:5-123",
            MemoryItem::multimedia(handle()).fail_metadata_reads("metadata service down"),
        );

        let resolution = ExternalItemResolver::new(&library).resolve(&reference()).unwrap();
        let result = resolution.into_snapshot();

        assert_matches!(result, Err(Error::Remote(ref msg)) if msg == "metadata service down");
        let stats = library.stats();
        assert_eq!(stats.contexts_closed, 1);
        assert_eq!(stats.open_contexts(), 0);
    }

    #[test]
    fn link_snapshot_skips_metadata() {
        let library = MemoryLibrary::new();
        library.register(
            "tcm:5-123",
            MemoryItem::multimedia(handle())
                .direct_link("https://x/a.png")
                .fail_metadata_reads("metadata service down"),
        );

        let item = ExternalItemResolver::new(&library)
            .resolve(&reference())
            .and_then(Resolution::into_link_snapshot)
            .unwrap();

        assert_eq!(item.direct_link, "https://x/a.png");
        assert!(item.metadata_xml.is_none());
        assert!(item.metadata_schema.is_none());
        assert_eq!(library.stats().contexts_closed, 1);
    }
}
