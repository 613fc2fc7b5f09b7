//! Traits the remote content library must provide.
//!
//! The library is consumed through three seams: a process-scoped
//! [`LibrarySession`], a [`LibraryContext`] bound to one mount point, and the
//! [`LibraryItem`] descriptors a context returns.

use ecl_core::{ExternalReference, RemoteHandle, Result};
use ecl_metadata::MetadataSchema;

/// Kind of item a batched lookup can return.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// A file-like asset with a publishable binary.
    Multimedia,
    Folder,
    Other,
}

/// Connection to the remote library for one processing run.
///
/// Sessions are not assumed to be thread-safe; concurrent resolutions must
/// each use their own context.
pub trait LibrarySession {
    type Context: LibraryContext;

    /// Translate a local reference into the library's own handle.
    ///
    /// Returns `None` when the reference does not belong to the library.
    fn handle_for(&self, reference: &ExternalReference) -> Option<RemoteHandle>;

    /// Open a context scoped to the handle's mount point.
    fn open_context(&self, handle: &RemoteHandle) -> Result<Self::Context>;

    /// Release the session. Called once, at the end of a run.
    fn close(&mut self);
}

/// A connection to a single mount point.
pub trait LibraryContext {
    type Item: LibraryItem;

    /// Fetch items in one batched call.
    ///
    /// Misses yield fewer items rather than an error, which keeps the
    /// transport channel usable for the rest of the session.
    fn get_items(&self, handles: &[RemoteHandle]) -> Result<Vec<Self::Item>>;

    /// Release the context. Values of items it returned may become invalid.
    fn close(&mut self);
}

/// Remote descriptor of one item.
///
/// Accessors may reach back to the library, so they are fallible and only
/// valid while the owning context is open.
pub trait LibraryItem {
    fn kind(&self) -> ItemKind;

    fn id(&self) -> &RemoteHandle;

    fn display_type_id(&self) -> Result<String>;

    fn mime_type(&self) -> Result<String>;

    fn filename(&self) -> Result<String>;

    /// Renderable fragment for the item, optionally parameterised.
    fn template_fragment(&self, parameters: Option<&str>) -> Result<String>;

    /// URL of the published binary, optionally parameterised.
    fn direct_link_to_published(&self, parameters: Option<&str>) -> Result<String>;

    /// Raw external metadata document, if the item has one.
    fn metadata_xml(&self) -> Result<Option<String>>;

    /// Schema describing [`LibraryItem::metadata_xml`], if published.
    fn metadata_schema(&self) -> Result<Option<MetadataSchema>>;
}
