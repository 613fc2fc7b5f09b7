//! Identifier types for stub resolution.
//!
//! An [`ExternalReference`] is the local identifier captured from content (a
//! stub record id or an XLink `href`). A [`RemoteHandle`] is the remote
//! library's own pointer to an item, in the `ecl:` URI form
//! `ecl:<publication>-<mount point>-<item id>-<item type>`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Local identifier that may encode a pointer to an externally-hosted item.
///
/// Immutable once captured from the source content.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExternalReference(String);

impl ExternalReference {
    /// Capture a reference from its string form.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// The reference as it appeared in the source content.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the reference carries no text at all.
    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for ExternalReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ExternalReference {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ExternalReference {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Scheme prefix of remote handles.
const ECL_SCHEME: &str = "ecl:";

/// Remote library pointer to a single item.
///
/// The mount point is the item's namespace: a remote context is always opened
/// for exactly one mount point.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct RemoteHandle {
    publication_id: u32,
    mount_point: String,
    item_id: String,
    item_type: String,
}

impl RemoteHandle {
    /// Build a handle from its parts.
    pub fn new(
        publication_id: u32,
        mount_point: impl Into<String>,
        item_id: impl Into<String>,
        item_type: impl Into<String>,
    ) -> Self {
        Self {
            publication_id,
            mount_point: mount_point.into(),
            item_id: item_id.into(),
            item_type: item_type.into(),
        }
    }

    pub fn publication_id(&self) -> u32 {
        self.publication_id
    }

    /// Namespace the item lives in.
    pub fn mount_point(&self) -> &str {
        &self.mount_point
    }

    /// Provider-specific item id; may itself contain dashes.
    pub fn item_id(&self) -> &str {
        &self.item_id
    }

    pub fn item_type(&self) -> &str {
        &self.item_type
    }
}

impl fmt::Display for RemoteHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{ECL_SCHEME}{}-{}-{}-{}",
            self.publication_id, self.mount_point, self.item_id, self.item_type
        )
    }
}

impl FromStr for RemoteHandle {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::Validation(format!("invalid ECL URI: {s}"));

        let body = s.strip_prefix(ECL_SCHEME).ok_or_else(invalid)?;
        let (publication, rest) = body.split_once('-').ok_or_else(invalid)?;
        let (mount_point, rest) = rest.split_once('-').ok_or_else(invalid)?;
        let (item_id, item_type) = rest.rsplit_once('-').ok_or_else(invalid)?;

        if mount_point.is_empty() || item_id.is_empty() || item_type.is_empty() {
            return Err(invalid());
        }
        let publication_id = publication.parse::<u32>().map_err(|_| invalid())?;

        Ok(Self::new(publication_id, mount_point, item_id, item_type))
    }
}

impl TryFrom<String> for RemoteHandle {
    type Error = Error;

    fn try_from(s: String) -> Result<Self> {
        s.parse()
    }
}

impl From<RemoteHandle> for String {
    fn from(handle: RemoteHandle) -> Self {
        handle.to_string()
    }
}
