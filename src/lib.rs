//! Academic homepage, server side.
//!
//! The page's two dynamic sections (publications, research projects) are
//! loaded from JSON documents and rendered into page regions, with an
//! embedded fallback sequence when loading fails:
//! - `model`: record and document types
//! - `markup`: element tree with pure record-to-markup transforms
//! - `page`: named render regions behind shared handles
//! - `fetch`: the async fetch seam (site directory in production)
//! - `loaders`: the two fetch-render-fallback components
//! - `server` / `web`: axum assembly of the page and static serving
//! - `scholar`: Google Scholar scraping for the publications refresher

pub mod fetch;
pub mod loaders;
pub mod markup;
pub mod model;
pub mod page;
pub mod scholar;
pub mod server;
pub mod web;

// Re-export commonly used types
pub use fetch::{FsFetcher, LoadError, ResourceFetcher};
pub use loaders::{LoadOutcome, PublicationList, ResearchProjectList};
pub use model::{Publication, Project, PublicationsDocument, ProjectsDocument};
pub use page::{Container, Page};
pub use server::{create_router, AppState};
