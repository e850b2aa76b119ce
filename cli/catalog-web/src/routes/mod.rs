//! HTTP routes.
//!
//! Each request is resolved from its URL alone and makes at most one call
//! to the catalog.

use std::sync::Arc;

use axum::Router;
use axum::extract::{Path, Query, RawQuery, State};
use axum::response::{Html, Redirect};
use axum::routing::get;
use catalog_client::{Client, ClientTrait};
use serde::Deserialize;
use tracing::{debug, instrument};
use url::Url;

use crate::navigation::relative;
use crate::query::{RawParams, resolve_detail_query, resolve_list_query};
use crate::render::{detail_page, list_page};
use crate::search_control::SearchControl;

mod error;

pub use error::PageError;

/// Shared, read-only state of all handlers.
#[derive(Clone, Debug)]
pub struct AppState {
    pub client: Arc<Client>,
    /// Absolute URL of the index page, navigation URLs are resolved against it.
    pub public_url: Url,
}

impl AppState {
    /// The absolute URL of an index request with the given query.
    fn index_url(&self, query: Option<&str>) -> Url {
        let mut url = self.public_url.clone();
        url.set_fragment(None);
        url.set_query(query);
        url
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/character/{id}", get(character))
        .route("/search", get(search))
        .with_state(state)
}

#[instrument(skip(state))]
async fn index(State(state): State<AppState>, RawQuery(query): RawQuery) -> Html<String> {
    let current = state.index_url(query.as_deref());
    let params = RawParams::from_query(query.as_deref().unwrap_or_default());
    let query_state = resolve_list_query(&params);

    let page = state
        .client
        .search_entities(&query_state.search_term, query_state.page_number)
        .await
        .into_page();
    debug!(n_results = page.results.len(), "rendering list page");

    Html(list_page(&query_state, &page, &current))
}

#[instrument(skip(state))]
async fn character(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Html<String>, PageError> {
    let id = resolve_detail_query(&raw_id)?;
    let record = state.client.fetch_entity_by_id(id).await?;
    Ok(Html(detail_page(&record)))
}

#[derive(Debug, Deserialize)]
struct SearchSubmission {
    /// Content of the search box.
    #[serde(default)]
    name: String,
    /// Relative URL of the page the search was submitted from.
    from: Option<String>,
}

/// Submit the search box and redirect to the resulting list page.
#[instrument(skip(state))]
async fn search(
    State(state): State<AppState>,
    Query(submission): Query<SearchSubmission>,
) -> Redirect {
    let index = state.index_url(None);
    let from = submission
        .from
        .as_deref()
        .and_then(|from| index.join(from).ok())
        .filter(|from| from.origin() == index.origin())
        .unwrap_or(index);

    let mut control = SearchControl::from_url(&from);
    control.input(submission.name);
    debug!(
        state = ?control.state(),
        committed = control.committed(),
        buffer = control.buffer(),
        "submitting search"
    );
    let destination = control.submit(&from);
    debug!(%destination, "redirecting search submission");

    Redirect::to(&relative(&destination))
}

#[cfg(test)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use catalog_client::{CatalogPage, EntityRecord, MockClient, NamedLocation, PageInfo};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn record(id: u64, name: &str) -> EntityRecord {
        EntityRecord {
            id,
            name: name.to_string(),
            status: "Alive".to_string(),
            species: "Human".to_string(),
            gender: "Male".to_string(),
            image: Url::parse(&format!(
                "https://rickandmortyapi.com/api/character/avatar/{id}.jpeg"
            ))
            .unwrap(),
            origin: NamedLocation {
                name: "Earth (C-137)".to_string(),
            },
            location: NamedLocation {
                name: "Citadel of Ricks".to_string(),
            },
        }
    }

    fn app(mock: MockClient) -> Router {
        router(AppState {
            client: Arc::new(mock.into()),
            public_url: Url::parse("http://localhost:8000/").unwrap(),
        })
    }

    async fn get(app: Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, String) {
        let response = app
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, String::from_utf8(body.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn index_renders_results() {
        let mut mock = MockClient::default();
        mock.push_search_response(CatalogPage {
            results: vec![record(2, "Morty Smith")],
            info: PageInfo {
                page_count: 2,
                has_next: false,
                has_prev: true,
            },
        });

        let (status, _, body) = get(app(mock), "/?name=Morty&page=2").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Morty Smith"));
        assert!(body.contains(r#"href="/?name=Morty&amp;page=1""#));
        assert!(body.contains("2 / 2"));
    }

    #[tokio::test]
    async fn index_failure_renders_empty_page_with_200() {
        let mut mock = MockClient::default();
        mock.push_failure_response(500);

        let (status, _, body) = get(app(mock), "/?name=Rick&page=abc").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("No se encontraron personajes"));
    }

    #[tokio::test]
    async fn character_renders_record() {
        let mut mock = MockClient::default();
        mock.push_entity_response(record(1, "Rick Sanchez"));

        let (status, _, body) = get(app(mock), "/character/1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<h1>Rick Sanchez</h1>"));
    }

    #[tokio::test]
    async fn character_invalid_id_is_400() {
        for uri in ["/character/x", "/character/-5", "/character/0"] {
            let (status, _, body) = get(app(MockClient::default()), uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert!(body.contains("Invalid ID"));
        }
    }

    #[tokio::test]
    async fn character_not_found_is_404() {
        let mut mock = MockClient::default();
        mock.push_failure_response(404);

        let (status, _, body) = get(app(mock), "/character/9999").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.contains("Personaje no encontrado"));
    }

    #[tokio::test]
    async fn search_redirects_with_trimmed_term() {
        let (status, headers, _) = get(
            app(MockClient::default()),
            "/search?name=+Squanchy+&from=%2F%3Fname%3DRick%26page%3D3",
        )
        .await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/?name=Squanchy");
    }

    #[tokio::test]
    async fn blank_search_redirects_to_index() {
        let (status, headers, _) =
            get(app(MockClient::default()), "/search?name=++&from=%2F%3Fpage%3D4").await;
        assert_eq!(status, StatusCode::SEE_OTHER);
        assert_eq!(headers[header::LOCATION], "/");
    }

    #[tokio::test]
    async fn search_ignores_foreign_origin() {
        let (_, headers, _) = get(
            app(MockClient::default()),
            "/search?name=Beth&from=https%3A%2F%2Fexample.com%2F%3Fpage%3D2",
        )
        .await;
        assert_eq!(headers[header::LOCATION], "/?name=Beth");
    }
}
