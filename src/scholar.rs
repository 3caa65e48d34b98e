//! Google Scholar scraping for the publications refresher.
//!
//! Pulls the public profile's citation table page by page and turns each
//! row into a [`Publication`]. Parsing works directly on the row markup;
//! the table layout (gsc_a_tr rows, gs_gray metadata divs) has been
//! stable for years.

use std::time::Duration;

use anyhow::{Context, Result};
use regex::Regex;

use crate::model::{Publication, PublicationsDocument, Year};

/// Profile the homepage belongs to.
pub const DEFAULT_USER_ID: &str = "0ZahlvEAAAAJ";

const BASE_URL: &str = "https://scholar.google.com";
const PAGE_SIZE: usize = 20;
const REQUEST_GAP: Duration = Duration::from_secs(2);

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// ============================================================================
// Fetcher
// ============================================================================

pub struct ScholarFetcher {
    user_id: String,
    client: reqwest::blocking::Client,
    parser: RowParser,
}

impl ScholarFetcher {
    pub fn new(user_id: impl Into<String>) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("failed to build HTTP client")?;

        Ok(ScholarFetcher {
            user_id: user_id.into(),
            client,
            parser: RowParser::new()?,
        })
    }

    /// Fetch up to `max_pages` profile pages, stopping early on an empty
    /// page or a failed request. Waits between requests.
    pub fn fetch_publications(&self, max_pages: usize) -> Vec<Publication> {
        let mut publications = Vec::new();

        for page in 0..max_pages {
            let url = format!(
                "{BASE_URL}/citations?user={}&hl=en&oi=ao&cstart={}",
                self.user_id,
                page * PAGE_SIZE
            );
            tracing::info!("fetching page {}", page + 1);

            let rows = match self.fetch_page(&url) {
                Ok(rows) => rows,
                Err(err) => {
                    tracing::error!("error fetching page {}: {err:#}", page + 1);
                    break;
                }
            };
            if rows.is_empty() {
                tracing::info!("no more publications found on page {}", page + 1);
                break;
            }
            publications.extend(rows);

            std::thread::sleep(REQUEST_GAP);
        }

        publications
    }

    fn fetch_page(&self, url: &str) -> Result<Vec<Publication>> {
        let body = self
            .client
            .get(url)
            .send()
            .with_context(|| format!("request failed: {url}"))?
            .error_for_status()
            .context("non-success status")?
            .text()
            .context("failed to read response body")?;

        Ok(self.parser.parse_page(&body, &self.user_id))
    }
}

/// Assemble the document the publications loader consumes, stamped now.
pub fn document_from(publications: Vec<Publication>) -> PublicationsDocument {
    PublicationsDocument {
        last_updated: Some(chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string()),
        total_publications: Some(publications.len()),
        publications,
    }
}

// ============================================================================
// Row Parsing
// ============================================================================

pub struct RowParser {
    row: Regex,
    title_anchor: Regex,
    href: Regex,
    gray: Regex,
    citations: Regex,
    year: Regex,
    citation_id: Regex,
    tag: Regex,
}

impl RowParser {
    pub fn new() -> Result<Self> {
        Ok(RowParser {
            row: Regex::new(r#"(?s)<tr class="gsc_a_tr">(.*?)</tr>"#)?,
            title_anchor: Regex::new(r#"(?s)<a([^>]*class="gsc_a_at"[^>]*)>(.*?)</a>"#)?,
            href: Regex::new(r#"href="([^"]*)""#)?,
            gray: Regex::new(r#"(?s)<div class="gs_gray">(.*?)</div>"#)?,
            citations: Regex::new(r#"(?s)<a[^>]*class="gsc_a_ac[^"]*"[^>]*>([^<]*)</a>"#)?,
            year: Regex::new(r"\b(?:19|20)\d{2}\b")?,
            citation_id: Regex::new(r"citation_for_view=.*?:([^&]*)")?,
            tag: Regex::new(r"<[^>]+>")?,
        })
    }

    /// Every publication row on one profile page, in page order.
    pub fn parse_page(&self, html: &str, user_id: &str) -> Vec<Publication> {
        self.row
            .captures_iter(html)
            .filter_map(|row| self.parse_row(&row[1], user_id))
            .collect()
    }

    fn parse_row(&self, row_html: &str, user_id: &str) -> Option<Publication> {
        let anchor = self.title_anchor.captures(row_html)?;
        let title = self.text_of(&anchor[2]);
        if title.is_empty() {
            return None;
        }

        let link = self
            .href
            .captures(&anchor[1])
            .map(|c| decode_entities(&c[1]))
            .filter(|href| !href.is_empty())
            .map(|href| {
                if href.starts_with("http") {
                    href
                } else {
                    format!("{BASE_URL}{href}")
                }
            });

        // First gray div is the author line, second the venue line.
        let mut grays = self.gray.captures_iter(row_html);
        let authors = grays.next().map(|c| self.text_of(&c[1]));
        let venue_info = grays.next().map(|c| self.text_of(&c[1])).unwrap_or_default();
        let (venue, year) = self.parse_venue_year(&venue_info);

        let citations = self
            .citations
            .captures(row_html)
            .map(|c| c[1].trim().to_string())
            .filter(|text| !text.is_empty() && text != "*")
            .and_then(|text| text.parse::<u64>().ok())
            .unwrap_or(0);

        let scholar_link = link.as_deref().and_then(|l| {
            self.extract_citation_id(l).map(|id| {
                format!(
                    "{BASE_URL}/citations?view_op=view_citation&hl=en&user={user_id}&citation_for_view={user_id}:{id}"
                )
            })
        });

        Some(Publication {
            title,
            venue,
            year,
            authors,
            citations: Some(citations),
            link,
            scholar_link,
        })
    }

    /// Split "Nature Medicine 30 (4), 1234-1240, 2024" into the venue and
    /// the first four-digit year found in it.
    fn parse_venue_year(&self, venue_info: &str) -> (String, Option<Year>) {
        match self.year.find(venue_info) {
            Some(found) => {
                let year = found.as_str().to_string();
                let venue = venue_info
                    .replace(&year, "")
                    .trim_matches(|c| c == ' ' || c == ',' || c == '.')
                    .to_string();
                (venue, Some(Year::Text(year)))
            }
            None => (venue_info.to_string(), None),
        }
    }

    fn extract_citation_id<'a>(&self, link: &'a str) -> Option<&'a str> {
        self.citation_id
            .captures(link)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .filter(|id| !id.is_empty())
    }

    /// Visible text of a markup snippet: tags stripped, entities decoded.
    fn text_of(&self, html: &str) -> String {
        decode_entities(self.tag.replace_all(html, "").trim())
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .replace("&hellip;", "…")
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_PAGE: &str = concat!(
        r#"<table><tbody id="gsc_a_b">"#,
        r#"<tr class="gsc_a_tr"><td class="gsc_a_t">"#,
        r#"<a href="/citations?view_op=view_citation&amp;hl=en&user=0ZahlvEAAAAJ&citation_for_view=0ZahlvEAAAAJ:abc123" class="gsc_a_at">Deep learning for cardiac MRI</a>"#,
        r#"<div class="gs_gray">A Author, B Author</div>"#,
        r#"<div class="gs_gray">Nature Medicine 30 (4), 1234-1240<span class="gs_oph">, 2024</span></div>"#,
        r##"</td><td class="gsc_a_c"><a href="#" class="gsc_a_ac gs_ibl">94</a></td>"##,
        r#"<td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc gs_ibl">2024</span></td></tr>"#,
        r#"<tr class="gsc_a_tr"><td class="gsc_a_t">"#,
        r#"<a href="/citations?view_op=view_citation&user=0ZahlvEAAAAJ&citation_for_view=0ZahlvEAAAAJ:def456" class="gsc_a_at">Uncited preprint</a>"#,
        r#"<div class="gs_gray">C Author</div>"#,
        r#"<div class="gs_gray">arXiv preprint arXiv:2501.00001</div>"#,
        r##"</td><td class="gsc_a_c"><a href="#" class="gsc_a_ac gs_ibl"></a></td>"##,
        r#"<td class="gsc_a_y"><span class="gsc_a_h gsc_a_hc gs_ibl"></span></td></tr>"#,
        r#"</tbody></table>"#,
    );

    #[test]
    fn parses_rows_in_page_order() {
        let parser = RowParser::new().unwrap();
        let publications = parser.parse_page(SAMPLE_PAGE, "0ZahlvEAAAAJ");

        assert_eq!(publications.len(), 2);
        assert_eq!(publications[0].title, "Deep learning for cardiac MRI");
        assert_eq!(publications[1].title, "Uncited preprint");
    }

    #[test]
    fn extracts_link_venue_year_citations() {
        let parser = RowParser::new().unwrap();
        let publication = &parser.parse_page(SAMPLE_PAGE, "0ZahlvEAAAAJ")[0];

        assert_eq!(
            publication.link.as_deref(),
            Some("https://scholar.google.com/citations?view_op=view_citation&hl=en&user=0ZahlvEAAAAJ&citation_for_view=0ZahlvEAAAAJ:abc123")
        );
        assert_eq!(publication.venue, "Nature Medicine 30 (4), 1234-1240");
        assert_eq!(publication.year, Some(Year::Text("2024".into())));
        assert_eq!(publication.citations, Some(94));
        assert_eq!(publication.authors.as_deref(), Some("A Author, B Author"));
    }

    #[test]
    fn missing_citation_count_parses_as_zero() {
        let parser = RowParser::new().unwrap();
        let publication = &parser.parse_page(SAMPLE_PAGE, "0ZahlvEAAAAJ")[1];

        assert_eq!(publication.citations, Some(0));
        assert_eq!(publication.year, None);
        assert_eq!(publication.venue, "arXiv preprint arXiv:2501.00001");
    }

    #[test]
    fn builds_scholar_link_from_citation_id() {
        let parser = RowParser::new().unwrap();
        let publication = &parser.parse_page(SAMPLE_PAGE, "0ZahlvEAAAAJ")[1];

        assert_eq!(
            publication.scholar_link.as_deref(),
            Some("https://scholar.google.com/citations?view_op=view_citation&hl=en&user=0ZahlvEAAAAJ&citation_for_view=0ZahlvEAAAAJ:def456")
        );
    }

    #[test]
    fn venue_year_split_strips_separators() {
        let parser = RowParser::new().unwrap();
        let (venue, year) = parser.parse_venue_year("Physical Review B, 2025");
        assert_eq!(venue, "Physical Review B");
        assert_eq!(year, Some(Year::Text("2025".into())));

        let (venue, year) = parser.parse_venue_year("");
        assert_eq!(venue, "");
        assert_eq!(year, None);
    }

    #[test]
    fn document_carries_count_and_timestamp() {
        let doc = document_from(vec![]);
        assert_eq!(doc.total_publications, Some(0));
        assert!(doc.last_updated.is_some());
    }
}
