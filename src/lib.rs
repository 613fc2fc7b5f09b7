//! eclstub - resolution of external content library stubs.
//!
//! Content often refers to assets hosted by an external content library,
//! either through a dedicated stub record or through an inline XLink. This
//! crate rewrites both so that downstream rendering can treat external assets
//! like native ones:
//!
//! - [`StubProcessor::apply_to_record`] fills a stub [`ContentRecord`] with
//!   the item's id, publish URL, extension properties and mapped external
//!   metadata.
//! - [`StubProcessor::apply_to_element`] decorates an inline
//!   [`LinkElement`] with data attributes and returns the publish URL.
//!
//! The remote library itself is reached through the
//! [`ecl_library::LibrarySession`] trait.

pub mod logging;
pub mod markup;
pub mod processor;
pub mod record;

pub use ecl_core::{Config, Error, FieldSet, Result};
pub use ecl_metadata::{FieldDefinition, MetadataSchema};
pub use markup::{LinkElement, MarkupElement, XLINK_NAMESPACE};
pub use processor::StubProcessor;
pub use record::{Component, ContentRecord, Multimedia};
