//! Document identity, collection/document references, and field maps
//!
//! Documents live in named collections and are addressed by a generated id.
//! A document can own sub-collections, addressed through its reference
//! (e.g. `notasFiscais/<id>/items`). References are plain path values; they
//! carry no connection state and are cheap to clone.
//!
//! # Serialization strategy
//!
//! Document fields are a `serde_json` object map. Typed domain structs
//! convert through `serde_json::Value`, which keeps one consistent handling
//! of UUID ids (strings) and timestamps (RFC 3339 strings) across backends.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use uuid::Uuid;

use crate::core::error::StoreError;

/// Field map of a single document.
pub type Fields = serde_json::Map<String, Value>;

/// Identity of a document within its collection.
///
/// Generated ids are UUID v4 in simple (dashless) form; caller-supplied ids
/// are accepted as-is.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId(String);

impl DocumentId {
    /// Wrap an existing id string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generate a fresh random id.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for DocumentId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Reference to a collection, either top-level (`notasFiscais`) or nested
/// under a document (`notasFiscais/<id>/items`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CollectionRef {
    path: String,
}

impl CollectionRef {
    /// Reference a top-level collection by name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { path: name.into() }
    }

    /// Reference a document in this collection by id.
    pub fn doc(&self, id: impl Into<DocumentId>) -> DocumentRef {
        DocumentRef {
            collection: self.clone(),
            id: id.into(),
        }
    }

    /// Reference a new document with a freshly generated id.
    pub fn new_doc(&self) -> DocumentRef {
        self.doc(DocumentId::generate())
    }

    /// Slash-joined path of this collection.
    pub fn path(&self) -> &str {
        &self.path
    }
}

impl fmt::Display for CollectionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Reference to a single document: its collection plus its id.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct DocumentRef {
    collection: CollectionRef,
    id: DocumentId,
}

impl DocumentRef {
    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    /// The collection this document belongs to.
    pub fn parent(&self) -> &CollectionRef {
        &self.collection
    }

    /// Reference a sub-collection nested under this document.
    ///
    /// Sub-collections are independent collections addressed by path; the
    /// store does not delete them when the parent document is deleted.
    pub fn collection(&self, name: &str) -> CollectionRef {
        CollectionRef {
            path: format!("{}/{}/{}", self.collection.path, self.id, name),
        }
    }

    /// Slash-joined path of this document.
    pub fn path(&self) -> String {
        format!("{}/{}", self.collection.path, self.id)
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.collection.path, self.id)
    }
}

/// A document as returned by the store: its id plus its field map.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    id: DocumentId,
    fields: Fields,
}

impl Document {
    pub fn new(id: DocumentId, fields: Fields) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> &DocumentId {
        &self.id
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Look up a single field value.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Deserialize the field map into a typed domain struct.
    pub fn to<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        let value = Value::Object(self.fields.clone());
        Ok(serde_json::from_value(value)?)
    }
}

/// Serialize a typed domain struct into a document field map.
pub fn to_fields<T: Serialize>(value: &T) -> Result<Fields, StoreError> {
    match serde_json::to_value(value)? {
        Value::Object(map) => Ok(map),
        other => Err(StoreError::Backend {
            message: format!("expected a JSON object for document fields, got {other}"),
        }),
    }
}
