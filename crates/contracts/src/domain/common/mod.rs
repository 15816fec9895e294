//! Common types shared by all resources

pub mod envelope;
pub mod flex;

pub use envelope::{check_mutation, normalize_list, unwrap_list, EnvelopeError};

/// Server-assigned primary key of a resource row.
pub type RecordId = i64;

/// Anything mirrored from a server collection and addressable by id.
pub trait Keyed {
    fn key(&self) -> RecordId;
}

/// Name of the collection key a resource uses in `{ "<key>": [...] }` responses.
pub trait Resource: Keyed {
    const COLLECTION_KEY: &'static str;
}
