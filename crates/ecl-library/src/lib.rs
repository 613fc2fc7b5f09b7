//! # ecl-library
//!
//! Contracts for the remote content library and the resolver that turns an
//! [`ExternalReference`](ecl_core::ExternalReference) into a single
//! multimedia item.
//!
//! Remote item properties may be computed lazily by the library and become
//! invalid once their context closes. A [`Resolution`] therefore keeps the
//! context open until [`Resolution::into_snapshot`] has copied every needed
//! value into an owned [`ResolvedItem`]; the [`ContextGuard`] closes it on
//! every exit path.
//!
//! ## Quick start
//!
//! ```
//! use ecl_core::{ExternalReference, RemoteHandle};
//! use ecl_library::memory::{MemoryItem, MemoryLibrary};
//! use ecl_library::ExternalItemResolver;
//!
//! let library = MemoryLibrary::new();
//! let handle = RemoteHandle::new(5, "mm", "42", "file");
//! library.register("tcm:5-123", MemoryItem::multimedia(handle).filename("photo.jpg"));
//!
//! let resolver = ExternalItemResolver::new(&library);
//! let item = resolver
//!     .resolve(&ExternalReference::from("tcm:5-123"))
//!     .and_then(|resolution| resolution.into_snapshot())
//!     .unwrap();
//! assert_eq!(item.filename, "photo.jpg");
//! assert_eq!(library.stats().open_contexts(), 0);
//! ```

pub mod guard;
pub mod library;
pub mod memory;
pub mod resolver;

pub use guard::ContextGuard;
pub use library::{ItemKind, LibraryContext, LibraryItem, LibrarySession};
pub use resolver::{ExternalItemResolver, Resolution, ResolvedItem};
