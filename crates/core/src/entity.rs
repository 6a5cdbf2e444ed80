//! Identity of persisted planning documents.

/// A document that carries its own storage key.
///
/// Repositories key documents by this identifier, so callers never pass an id
/// that disagrees with the document body.
pub trait Entity {
    type Id: Clone + Eq + Ord + core::hash::Hash + core::fmt::Debug;

    fn id(&self) -> &Self::Id;

    /// Owned copy of the identifier, for use as a repository key.
    fn key(&self) -> Self::Id {
        self.id().clone()
    }
}
