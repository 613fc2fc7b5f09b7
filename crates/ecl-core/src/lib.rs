//! ecl-core: shared types, identifiers, errors, configuration, and the local
//! typed field model.
//!
//! This crate is the foundational dependency for the other ecl-* crates. It
//! owns the vocabulary every stage agrees on:
//!
//! - **Identifiers**: [`ExternalReference`] (the local id of a stub) and
//!   [`RemoteHandle`] (the remote library's pointer to an item).
//! - **Field model**: [`Field`], [`FieldValues`] and [`FieldSet`], the
//!   structured-field containers that external metadata is mapped into.
//! - **Errors**: a unified [`Error`] and [`Result`] alias.
//! - **Configuration**: extension names and attribute prefixes in [`config`].

pub mod config;
pub mod error;
pub mod field;
pub mod ids;

pub use config::Config;
pub use error::{Error, Result};
pub use field::{Field, FieldSet, FieldType, FieldValues, TextKind};
pub use ids::{ExternalReference, RemoteHandle};
