// Server integration tests: page assembly, fragments, health, and static
// serving of the JSON documents, against a temporary site directory.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use scholar_site::{create_router, AppState};
use serde_json::Value;
use tower::ServiceExt; // for oneshot

// Helper: site directory with both documents present
fn populated_site() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");

    let publications: Vec<Value> = (0..12)
        .map(|i| {
            serde_json::json!({
                "title": format!("Publication {i}"),
                "venue": format!("Venue {i}"),
                "link": format!("https://example.org/paper/{i}"),
            })
        })
        .collect();
    std::fs::write(
        dir.path().join("publications.json"),
        serde_json::to_vec_pretty(&serde_json::json!({
            "publications": publications,
            "last_updated": "2025-06-18 09:41:27",
        }))
        .unwrap(),
    )
    .unwrap();

    std::fs::write(
        dir.path().join("research-projects.json"),
        serde_json::to_vec_pretty(&serde_json::json!({
            "projects": [{
                "title": "Spectral Reconstruction",
                "institution": "Example Lab",
                "period": "2024 - Present",
                "description": "Reconstructing structures from spectra.",
                "technologies": "Rust, Diffusion Models",
                "icon": "flaticon-process",
            }]
        }))
        .unwrap(),
    )
    .unwrap();

    dir
}

fn app_for(dir: &tempfile::TempDir) -> axum::Router {
    create_router(AppState::new(dir.path().to_str().expect("utf-8 path")))
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    String::from_utf8(body.to_vec()).expect("Body is not UTF-8")
}

async fn json_response(response: axum::response::Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read response body");
    serde_json::from_slice(&body).expect("Failed to parse JSON")
}

// =========================================================================
// Section 1: Health Check
// =========================================================================

#[tokio::test]
async fn test_health_check() {
    let dir = populated_site();
    let response = app_for(&dir)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].is_string());
}

// =========================================================================
// Section 2: Home Page Assembly
// =========================================================================

#[tokio::test]
async fn test_home_page_renders_both_sections() {
    let dir = populated_site();
    let response = app_for(&dir)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("Publication 0"));
    assert!(html.contains("Publication 9"));
    // 12 records: capped at 10 with a two-record summary entry.
    assert!(!html.contains("Publication 10"));
    assert!(html.contains("View 2 more publications on Google Scholar"));
    assert!(html.contains("Last updated: 2025-06-18 09:41:27"));
    assert!(html.contains("Spectral Reconstruction"));
}

#[tokio::test]
async fn test_home_page_falls_back_when_documents_are_missing() {
    let dir = tempfile::tempdir().expect("tempdir");
    let response = app_for(&dir)
        .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    // Publications fall back with a notice; projects fall back silently.
    assert!(html.contains("Using cached publication data"));
    assert!(html.contains("Nature Medicine"));
    assert!(html.contains("LLM-driven Molecular Structure Elucidation"));
}

// =========================================================================
// Section 3: Region Fragments
// =========================================================================

#[tokio::test]
async fn test_fragments_match_the_embedded_sections() {
    let dir = populated_site();
    let app = app_for(&dir);

    let fragment = body_string(
        app.clone()
            .oneshot(
                Request::builder()
                    .uri("/fragments/publications")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap(),
    )
    .await;
    assert!(fragment.contains("Publication 0"));

    let home = body_string(
        app.oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap(),
    )
    .await;
    assert!(home.contains(&fragment));
}

#[tokio::test]
async fn test_projects_fragment_renders_blocks() {
    let dir = populated_site();
    let response = app_for(&dir)
        .oneshot(
            Request::builder()
                .uri("/fragments/research-projects")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let html = body_string(response).await;
    assert!(html.contains("research-project"));
    assert!(html.contains("<i class=\"flaticon-process\"></i>"));
    // Data-only fields stay out of the markup.
    assert!(!html.contains("Example Lab"));
}

// =========================================================================
// Section 4: Static Site Files
// =========================================================================

#[tokio::test]
async fn test_documents_are_served_statically() {
    let dir = populated_site();
    let response = app_for(&dir)
        .oneshot(
            Request::builder()
                .uri("/publications.json")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_response(response).await;
    assert_eq!(body["publications"].as_array().unwrap().len(), 12);
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let dir = populated_site();
    let response = app_for(&dir)
        .oneshot(
            Request::builder()
                .uri("/no-such-file.txt")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
