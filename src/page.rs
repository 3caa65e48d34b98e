//! Page regions.
//!
//! The surrounding page exposes a handful of named regions the loaders
//! render into, addressed by the selectors the original markup uses. A
//! missing region is a non-fatal condition: the loader logs and skips.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::markup::{render_nodes, Node};

/// Selector for the publications region.
pub const PUBLICATION_LIST_SELECTOR: &str = ".publication-list";

/// Selector for the research projects region.
pub const RESEARCH_ROW_SELECTOR: &str = "#research .row";

/// Shared handle to one region's child list.
///
/// Clones refer to the same children, so a loader and the page that
/// assembles the final document observe the same subtree.
#[derive(Debug, Clone, Default)]
pub struct Container {
    children: Arc<Mutex<Vec<Node>>>,
}

impl Container {
    pub fn new() -> Self {
        Self::default()
    }

    /// Swap the entire child list in one step.
    pub fn replace_children(&self, nodes: Vec<Node>) {
        *self.lock() = nodes;
    }

    /// Append one node after the existing children.
    pub fn append(&self, node: Node) {
        self.lock().push(node);
    }

    pub fn child_count(&self) -> usize {
        self.lock().len()
    }

    pub fn children(&self) -> Vec<Node> {
        self.lock().clone()
    }

    pub fn to_html(&self) -> String {
        render_nodes(&self.lock())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Node>> {
        self.children.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Registry of the page's render regions, keyed by selector.
#[derive(Debug, Default)]
pub struct Page {
    regions: HashMap<String, Container>,
}

impl Page {
    /// A page with no regions. Loaders bound against it skip rendering.
    pub fn new() -> Self {
        Self::default()
    }

    /// A page carrying the two regions the homepage markup provides.
    pub fn with_default_regions() -> Self {
        let mut page = Self::new();
        page.register(PUBLICATION_LIST_SELECTOR);
        page.register(RESEARCH_ROW_SELECTOR);
        page
    }

    /// Add a region and return its handle.
    pub fn register(&mut self, selector: &str) -> Container {
        let container = Container::new();
        self.regions.insert(selector.to_string(), container.clone());
        container
    }

    /// Look up a region handle. `None` mirrors a selector with no match.
    pub fn query(&self, selector: &str) -> Option<Container> {
        self.regions.get(selector).cloned()
    }
}
