// Axum server: assembles the homepage from loader-rendered regions and
// serves the site directory's static files (including the two JSON
// documents the loaders fetch).

use std::sync::Arc;

use axum::{
    extract::State,
    response::{Html, IntoResponse, Json},
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, services::ServeDir, trace::TraceLayer,
};

use crate::fetch::FsFetcher;
use crate::loaders::{LoadOutcome, PublicationList, ResearchProjectList};
use crate::page::{Page, PUBLICATION_LIST_SELECTOR, RESEARCH_ROW_SELECTOR};
use crate::web::handlers::pages::home_page;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub site_dir: String,
    pub fetcher: Arc<FsFetcher>,
}

impl AppState {
    pub fn new(site_dir: &str) -> Self {
        AppState {
            site_dir: site_dir.to_string(),
            fetcher: Arc::new(FsFetcher::new(site_dir)),
        }
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    let static_files = ServeDir::new(state.site_dir.clone());

    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Assembled homepage
        .route("/", get(home_page))
        // Region fragments (same HTML the page embeds)
        .route("/fragments/publications", get(publications_fragment))
        .route("/fragments/research-projects", get(projects_fragment))
        // Everything else comes straight from the site directory
        .fallback_service(static_files)
        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Region Rendering
// ============================================================================

/// Both regions rendered for one page view, plus which path each loader
/// took. The loaders run unordered on disjoint containers.
pub struct RenderedRegions {
    pub publications_html: String,
    pub projects_html: String,
    pub publications_outcome: Option<LoadOutcome>,
    pub projects_outcome: Option<LoadOutcome>,
}

pub async fn render_regions(state: &AppState) -> RenderedRegions {
    let page = Page::with_default_regions();
    let publications = PublicationList::bind(&page);
    let projects = ResearchProjectList::bind(&page);

    let (publications_outcome, projects_outcome) = tokio::join!(
        publications.load(state.fetcher.as_ref()),
        projects.load(state.fetcher.as_ref()),
    );

    RenderedRegions {
        publications_html: region_html(&page, PUBLICATION_LIST_SELECTOR),
        projects_html: region_html(&page, RESEARCH_ROW_SELECTOR),
        publications_outcome,
        projects_outcome,
    }
}

fn region_html(page: &Page, selector: &str) -> String {
    page.query(selector).map(|c| c.to_html()).unwrap_or_default()
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

async fn publications_fragment(State(state): State<AppState>) -> impl IntoResponse {
    let page = Page::with_default_regions();
    PublicationList::bind(&page)
        .load(state.fetcher.as_ref())
        .await;
    Html(region_html(&page, PUBLICATION_LIST_SELECTOR))
}

async fn projects_fragment(State(state): State<AppState>) -> impl IntoResponse {
    let page = Page::with_default_regions();
    ResearchProjectList::bind(&page)
        .load(state.fetcher.as_ref())
        .await;
    Html(region_html(&page, RESEARCH_ROW_SELECTOR))
}
