//! JSON-backed section loaders.
//!
//! Each loader binds one page region, fetches one document, renders it,
//! and substitutes an embedded record sequence when the fetch fails. The
//! two loaders are independent: disjoint regions, no shared state, no
//! ordering between them.

mod publications;
mod projects;

pub use publications::{fallback_publications, PublicationList};
pub use projects::{fallback_projects, ResearchProjectList};

/// Which path produced the rendered output. Exposed so callers assert the
/// path directly instead of inferring it from markup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// The fetched document rendered (possibly as an empty list).
    Loaded,
    /// Transport or decode failed; the embedded sequence rendered instead.
    Fallback,
}
