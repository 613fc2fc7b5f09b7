//! # ecl-metadata
//!
//! Translates an externally-supplied XML metadata document into the local
//! typed field model, guided by the schema the remote library publishes for
//! it.
//!
//! Mapping is all-or-nothing per item: malformed XML or a value that cannot
//! be converted to its declared type yields no field set at all, never a
//! partial one.
//!
//! ## Quick start
//!
//! ```
//! use ecl_metadata::{try_build_field_set, FieldDefinition, MetadataSchema};
//!
//! let schema = MetadataSchema::new(vec![FieldDefinition::text("Title")]);
//! let fields = try_build_field_set("<Meta><Title>Hello</Title></Meta>", &schema).unwrap();
//! assert_eq!(fields.get("Title").unwrap().text_values(), ["Hello"]);
//! ```

mod document;
pub mod error;
pub mod mapper;
pub mod schema;

pub use error::MappingError;
pub use mapper::{build_field_set, try_build_field_set};
pub use schema::{FieldDefinition, MetadataSchema};
