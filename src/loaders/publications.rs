//! Publications section loader.
//!
//! Renders up to [`MAX_DISPLAYED`] records as linked entries, collapses
//! the remainder into a single show-more entry pointing at the Scholar
//! profile, and appends a "last updated" footer when the document carries
//! a timestamp. A failed fetch renders the embedded sequence through the
//! same path, followed by a cached-data notice.

use crate::fetch::{LoadError, ResourceFetcher};
use crate::markup::{Element, Node};
use crate::model::{Publication, PublicationsDocument, Year};
use crate::page::{Container, Page, PUBLICATION_LIST_SELECTOR};

use super::LoadOutcome;

/// Resource path, relative to the site directory.
pub const PUBLICATIONS_RESOURCE: &str = "publications.json";

/// Display cap; records past it collapse into the show-more entry.
pub const MAX_DISPLAYED: usize = 10;

/// External catalog the show-more entry points at.
pub const SCHOLAR_PROFILE_URL: &str =
    "https://scholar.google.com/citations?user=0ZahlvEAAAAJ&hl=en";

pub struct PublicationList {
    container: Option<Container>,
    resource_path: String,
}

impl PublicationList {
    /// Explicit constructor; both the region handle and the resource path
    /// accept test doubles.
    pub fn new(container: Option<Container>, resource_path: impl Into<String>) -> Self {
        PublicationList {
            container,
            resource_path: resource_path.into(),
        }
    }

    /// Bind against the page's publications region.
    pub fn bind(page: &Page) -> Self {
        Self::new(page.query(PUBLICATION_LIST_SELECTOR), PUBLICATIONS_RESOURCE)
    }

    /// Run one full fetch-render cycle. Re-invocation repeats the cycle;
    /// there is no guard against re-entry and no retry inside it.
    ///
    /// Returns `None` when the region is missing (logged, nothing
    /// rendered, no fallback), otherwise which path produced the output.
    pub async fn load(&self, fetcher: &impl ResourceFetcher) -> Option<LoadOutcome> {
        let Some(container) = self.container.as_ref() else {
            tracing::error!("publications container not found");
            return None;
        };

        // Placeholder goes up before the fetch suspends.
        container.replace_children(vec![loading_placeholder()]);

        match self.fetch_document(fetcher).await {
            Ok(doc) => {
                display_publications(container, &doc.publications);
                if let Some(stamp) = doc.last_updated.as_deref() {
                    container.append(last_updated_footer(stamp));
                }
                Some(LoadOutcome::Loaded)
            }
            Err(err) => {
                tracing::error!("error loading publications: {err}");
                display_publications(container, &fallback_publications());
                container.append(fallback_note());
                Some(LoadOutcome::Fallback)
            }
        }
    }

    async fn fetch_document(
        &self,
        fetcher: &impl ResourceFetcher,
    ) -> Result<PublicationsDocument, LoadError> {
        let bytes = fetcher.fetch(&self.resource_path).await?;
        Ok(serde_json::from_slice(&bytes)?)
    }
}

/// Replace the region's content with the rendered record sequence, capped,
/// plus the show-more entry when records were cut.
fn display_publications(container: &Container, publications: &[Publication]) {
    let mut nodes: Vec<Node> = publications
        .iter()
        .take(MAX_DISPLAYED)
        .map(publication_entry)
        .collect();

    if publications.len() > MAX_DISPLAYED {
        nodes.push(show_more_entry(publications.len() - MAX_DISPLAYED));
    }

    container.replace_children(nodes);
}

/// One publication block: linked bold title, venue line beneath.
fn publication_entry(publication: &Publication) -> Node {
    Element::new("div")
        .class("publication-item")
        .child(
            Element::new("div")
                .class("pub-info")
                .child(
                    Element::new("h4").class("pub-title").child(
                        Element::new("a")
                            .attr("href", publication.best_link())
                            .attr("target", "_blank")
                            .child(Element::new("strong").text(&publication.title)),
                    ),
                )
                .child(
                    Element::new("p")
                        .class("pub-venue")
                        .text(&publication.venue),
                ),
        )
        .into()
}

/// Summary entry for the records past the display cap.
fn show_more_entry(remaining: usize) -> Node {
    Element::new("div")
        .class("publication-item")
        .class("show-more")
        .child(
            Element::new("div").class("pub-info").child(
                Element::new("p").class("pub-title").child(
                    Element::new("a")
                        .attr("href", SCHOLAR_PROFILE_URL)
                        .attr("target", "_blank")
                        .text(format!(
                            "View {remaining} more publications on Google Scholar →"
                        )),
                ),
            ),
        )
        .into()
}

fn loading_placeholder() -> Node {
    Element::new("div")
        .class("publication-loading")
        .child(Element::new("div").class("loading-spinner"))
        .child(Element::new("p").text("Loading publications..."))
        .into()
}

fn fallback_note() -> Node {
    Element::new("div")
        .class("fallback-note")
        .text("Using cached publication data")
        .into()
}

fn last_updated_footer(stamp: &str) -> Node {
    Element::new("div")
        .class("last-updated")
        .text(format!("Last updated: {stamp}"))
        .into()
}

/// Embedded records rendered when the fetch fails.
pub fn fallback_publications() -> Vec<Publication> {
    let record = |title: &str, venue: &str, year: &str, citations: u64, link: &str| Publication {
        title: title.to_string(),
        venue: venue.to_string(),
        year: Some(Year::Text(year.to_string())),
        authors: None,
        citations: Some(citations),
        link: Some(link.to_string()),
        scholar_link: None,
    };

    vec![
        record(
            "Screening and diagnosis of cardiovascular disease using artificial intelligence-enabled cardiac magnetic resonance imaging",
            "Nature Medicine",
            "2024",
            94,
            "https://www.nature.com/articles/s41591-024-02971-2",
        ),
        record(
            "Variational transformer ansatz for the density operator of steady states in dissipative quantum many-body systems",
            "Physical Review B",
            "2025",
            1,
            "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=0ZahlvEAAAAJ&citation_for_view=0ZahlvEAAAAJ:d1gkVwhDpl0C",
        ),
        record(
            "Spectra-to-Structure and Structure-to-Spectra Inference Across the Periodic Table",
            "arXiv",
            "2025",
            0,
            "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=0ZahlvEAAAAJ&citation_for_view=0ZahlvEAAAAJ:2osOgNQ5qMEC",
        ),
        record(
            "An X-ray absorption spectrum database for iron-containing proteins",
            "arXiv",
            "2025",
            0,
            "https://scholar.google.com/citations?view_op=view_citation&hl=en&user=0ZahlvEAAAAJ&citation_for_view=0ZahlvEAAAAJ:9yKSN-GCB0IC",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn minimal(title: &str) -> Publication {
        Publication {
            title: title.into(),
            venue: "Venue".into(),
            year: None,
            authors: None,
            citations: None,
            link: None,
            scholar_link: None,
        }
    }

    #[test]
    fn entry_links_title_and_shows_venue() {
        let mut publication = minimal("Deep Widgets");
        publication.link = Some("https://example.org/widgets".into());

        let html = publication_entry(&publication).to_html();
        assert!(html.contains("<a href=\"https://example.org/widgets\" target=\"_blank\">"));
        assert!(html.contains("<strong>Deep Widgets</strong>"));
        assert!(html.contains("<p class=\"pub-venue\">Venue</p>"));
    }

    #[test]
    fn entry_without_links_uses_placeholder_anchor() {
        let html = publication_entry(&minimal("No Links")).to_html();
        assert!(html.contains("href=\"#\""));
    }

    #[test]
    fn show_more_entry_carries_remaining_count() {
        let html = show_more_entry(7).to_html();
        assert!(html.contains("View 7 more publications on Google Scholar"));
        assert!(html.contains(SCHOLAR_PROFILE_URL.replace('&', "&amp;").as_str()));
        assert!(html.contains("show-more"));
    }

    #[test]
    fn fallback_sequence_has_four_records() {
        assert_eq!(fallback_publications().len(), 4);
    }

    #[test]
    fn display_caps_and_appends_show_more() {
        let records: Vec<Publication> = (0..14).map(|i| minimal(&format!("P{i}"))).collect();
        let container = Container::new();
        display_publications(&container, &records);

        // 10 entries plus the single summary entry.
        assert_eq!(container.child_count(), MAX_DISPLAYED + 1);
        assert!(container.to_html().contains("View 4 more publications"));
    }

    #[test]
    fn display_under_cap_has_no_show_more() {
        let records: Vec<Publication> = (0..3).map(|i| minimal(&format!("P{i}"))).collect();
        let container = Container::new();
        display_publications(&container, &records);

        assert_eq!(container.child_count(), 3);
        assert!(!container.to_html().contains("show-more"));
    }
}
