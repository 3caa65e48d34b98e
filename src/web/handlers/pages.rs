// Page handlers for HTML rendering with Askama

use askama::Template;
use axum::extract::State;
use axum::response::{Html, IntoResponse};

use crate::server::{render_regions, AppState};

// ============================================================================
// Home Page
// ============================================================================

#[derive(Template)]
#[template(path = "pages/home.html")]
pub struct HomeTemplate {
    pub title: String,
    pub publications_html: String,
    pub projects_html: String,
}

pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let regions = render_regions(&state).await;
    let template = HomeTemplate {
        title: "Academic Homepage".to_string(),
        publications_html: regions.publications_html,
        projects_html: regions.projects_html,
    };
    Html(template.render().unwrap_or_else(|e| {
        format!("Template error: {}", e)
    }))
}
