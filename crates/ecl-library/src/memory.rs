//! In-memory content library.
//!
//! [`MemoryLibrary`] implements the session, context and item contracts over
//! registered items. It records every context opened and closed, every batch
//! call, and every session close, and invalidates items once the context that
//! returned them is closed, mirroring a library that serves values lazily.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use ecl_core::{Error, ExternalReference, RemoteHandle, Result};
use ecl_metadata::MetadataSchema;

use crate::library::{ItemKind, LibraryContext, LibraryItem, LibrarySession};

// ---------------------------------------------------------------------------
// Registered items
// ---------------------------------------------------------------------------

/// Descriptor registered with a [`MemoryLibrary`].
#[derive(Debug, Clone, PartialEq)]
pub struct MemoryItem {
    kind: ItemKind,
    id: RemoteHandle,
    display_type_id: String,
    mime_type: String,
    filename: String,
    template_fragment: String,
    direct_link: String,
    metadata_xml: Option<String>,
    metadata_schema: Option<MetadataSchema>,
    metadata_failure: Option<String>,
}

impl MemoryItem {
    fn new(kind: ItemKind, id: RemoteHandle) -> Self {
        Self {
            kind,
            id,
            display_type_id: String::new(),
            mime_type: String::new(),
            filename: String::new(),
            template_fragment: String::new(),
            direct_link: String::new(),
            metadata_xml: None,
            metadata_schema: None,
            metadata_failure: None,
        }
    }

    pub fn multimedia(id: RemoteHandle) -> Self {
        Self::new(ItemKind::Multimedia, id)
    }

    pub fn folder(id: RemoteHandle) -> Self {
        Self::new(ItemKind::Folder, id)
    }

    pub fn display_type_id(mut self, value: impl Into<String>) -> Self {
        self.display_type_id = value.into();
        self
    }

    pub fn mime_type(mut self, value: impl Into<String>) -> Self {
        self.mime_type = value.into();
        self
    }

    pub fn filename(mut self, value: impl Into<String>) -> Self {
        self.filename = value.into();
        self
    }

    pub fn template_fragment(mut self, value: impl Into<String>) -> Self {
        self.template_fragment = value.into();
        self
    }

    pub fn direct_link(mut self, value: impl Into<String>) -> Self {
        self.direct_link = value.into();
        self
    }

    /// Attach external metadata and, optionally, the schema describing it.
    pub fn metadata(mut self, xml: impl Into<String>, schema: Option<MetadataSchema>) -> Self {
        self.metadata_xml = Some(xml.into());
        self.metadata_schema = schema;
        self
    }

    /// Make reads of the metadata and its schema fail with `message`, as a
    /// library does when its metadata backend is unavailable.
    pub fn fail_metadata_reads(mut self, message: impl Into<String>) -> Self {
        self.metadata_failure = Some(message.into());
        self
    }
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// Counters describing how a [`MemoryLibrary`] has been used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LibraryStats {
    pub contexts_opened: usize,
    /// Every `close` call on a context, including repeated ones.
    pub contexts_closed: usize,
    pub batch_calls: usize,
    pub session_closes: usize,
}

impl LibraryStats {
    /// Contexts opened but not yet closed.
    pub fn open_contexts(&self) -> usize {
        self.contexts_opened.saturating_sub(self.contexts_closed)
    }
}

#[derive(Debug, Default)]
struct State {
    references: HashMap<ExternalReference, RemoteHandle>,
    items: HashMap<RemoteHandle, MemoryItem>,
    stats: LibraryStats,
    lookup_failure: Option<String>,
}

/// Content library held entirely in memory.
///
/// Cloning yields another handle onto the same library.
#[derive(Debug, Clone, Default)]
pub struct MemoryLibrary {
    state: Arc<Mutex<State>>,
}

impl MemoryLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `item` and make `reference` point at it.
    pub fn register(&self, reference: impl Into<ExternalReference>, item: MemoryItem) {
        let mut state = self.state.lock();
        state.references.insert(reference.into(), item.id.clone());
        state.items.insert(item.id.clone(), item);
    }

    /// Make `reference` point at `handle` without registering an item.
    pub fn map_reference(&self, reference: impl Into<ExternalReference>, handle: RemoteHandle) {
        self.state.lock().references.insert(reference.into(), handle);
    }

    /// Make every subsequent batch lookup fail with `message`.
    pub fn fail_lookups(&self, message: impl Into<String>) {
        self.state.lock().lookup_failure = Some(message.into());
    }

    pub fn stats(&self) -> LibraryStats {
        self.state.lock().stats
    }
}

impl LibrarySession for MemoryLibrary {
    type Context = MemoryContext;

    fn handle_for(&self, reference: &ExternalReference) -> Option<RemoteHandle> {
        self.state.lock().references.get(reference).cloned()
    }

    fn open_context(&self, handle: &RemoteHandle) -> Result<MemoryContext> {
        self.state.lock().stats.contexts_opened += 1;
        Ok(MemoryContext {
            library: self.clone(),
            mount_point: handle.mount_point().to_string(),
            live: Arc::new(AtomicBool::new(true)),
        })
    }

    fn close(&mut self) {
        self.state.lock().stats.session_closes += 1;
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Context over one mount point of a [`MemoryLibrary`].
#[derive(Debug)]
pub struct MemoryContext {
    library: MemoryLibrary,
    mount_point: String,
    live: Arc<AtomicBool>,
}

impl LibraryContext for MemoryContext {
    type Item = LiveItem;

    fn get_items(&self, handles: &[RemoteHandle]) -> Result<Vec<LiveItem>> {
        if !self.live.load(Ordering::SeqCst) {
            return Err(Error::remote("context is closed"));
        }

        let mut state = self.library.state.lock();
        state.stats.batch_calls += 1;
        if let Some(message) = &state.lookup_failure {
            return Err(Error::remote(message.clone()));
        }

        Ok(handles
            .iter()
            .filter(|h| h.mount_point() == self.mount_point)
            .filter_map(|h| state.items.get(h))
            .map(|item| LiveItem {
                item: item.clone(),
                live: self.live.clone(),
            })
            .collect())
    }

    fn close(&mut self) {
        self.live.store(false, Ordering::SeqCst);
        self.library.state.lock().stats.contexts_closed += 1;
    }
}

/// Item returned by a [`MemoryContext`]; unreadable once the context closes.
#[derive(Debug, Clone)]
pub struct LiveItem {
    item: MemoryItem,
    live: Arc<AtomicBool>,
}

impl LiveItem {
    fn read<T>(&self, value: impl FnOnce(&MemoryItem) -> T) -> Result<T> {
        if self.live.load(Ordering::SeqCst) {
            Ok(value(&self.item))
        } else {
            Err(Error::remote(format!(
                "ECL item '{}' read after its context was closed",
                self.item.id
            )))
        }
    }

    fn read_metadata<T>(&self, value: impl FnOnce(&MemoryItem) -> T) -> Result<T> {
        match &self.item.metadata_failure {
            Some(message) => Err(Error::remote(message.clone())),
            None => self.read(value),
        }
    }
}

impl LibraryItem for LiveItem {
    fn kind(&self) -> ItemKind {
        self.item.kind
    }

    fn id(&self) -> &RemoteHandle {
        &self.item.id
    }

    fn display_type_id(&self) -> Result<String> {
        self.read(|i| i.display_type_id.clone())
    }

    fn mime_type(&self) -> Result<String> {
        self.read(|i| i.mime_type.clone())
    }

    fn filename(&self) -> Result<String> {
        self.read(|i| i.filename.clone())
    }

    fn template_fragment(&self, _parameters: Option<&str>) -> Result<String> {
        self.read(|i| i.template_fragment.clone())
    }

    fn direct_link_to_published(&self, _parameters: Option<&str>) -> Result<String> {
        self.read(|i| i.direct_link.clone())
    }

    fn metadata_xml(&self) -> Result<Option<String>> {
        self.read_metadata(|i| i.metadata_xml.clone())
    }

    fn metadata_schema(&self) -> Result<Option<MetadataSchema>> {
        self.read_metadata(|i| i.metadata_schema.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_scoped_to_mount_point() {
        let library = MemoryLibrary::new();
        let here = RemoteHandle::new(1, "mm", "1", "file");
        let there = RemoteHandle::new(1, "other", "2", "file");
        library.register("tcm:1-1", MemoryItem::multimedia(here.clone()));
        library.register("tcm:1-2", MemoryItem::multimedia(there.clone()));

        let context = library.open_context(&here).unwrap();
        let items = context.get_items(&[here.clone(), there]).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), &here);
    }

    #[test]
    fn closed_context_rejects_lookups() {
        let library = MemoryLibrary::new();
        let handle = RemoteHandle::new(1, "mm", "1", "file");
        let mut context = library.open_context(&handle).unwrap();
        context.close();

        assert!(context.get_items(&[handle]).is_err());
        assert_eq!(library.stats().open_contexts(), 0);
    }

    #[test]
    fn session_close_is_counted() {
        let mut library = MemoryLibrary::new();
        library.close();
        assert_eq!(library.stats().session_closes, 1);
    }

    #[test]
    fn unknown_reference_has_no_handle() {
        let library = MemoryLibrary::new();
        assert!(library
            .handle_for(&ExternalReference::from("tcm:1-1"))
            .is_none());
    }
}
