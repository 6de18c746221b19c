//! HTTP routes
//!
//! `GET /` renders the map page; `/articles`, `/search` and `/update` answer
//! the map widget with JSON arrays.

use crate::constants::{api, headers};
use crate::error::Error;
use crate::news::{lookup_articles, Article};
use crate::place::Place;
use crate::search::search;
use crate::server::state::AppState;
use crate::viewport::{find_places, Viewport};

use axum::{
    extract::{Query, State},
    http::{
        header::{CACHE_CONTROL, EXPIRES, PRAGMA},
        HeaderValue, StatusCode,
    },
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;
use tracing::{debug, warn};

/// Create the router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/articles", get(articles_handler))
        .route("/search", get(search_handler))
        .route("/update", get(update_handler))
        .nest_service("/static", ServeDir::new(static_path()))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(headers::CACHE_CONTROL),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            PRAGMA,
            HeaderValue::from_static(headers::PRAGMA),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            EXPIRES,
            HeaderValue::from_static(headers::EXPIRES),
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Static assets directory
///
/// Relative to cwd first, then next to the executable
fn static_path() -> String {
    if std::path::Path::new("static").exists() {
        return "static".to_string();
    }

    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("static")))
        .filter(|path| path.exists())
        .map(|path| path.to_string_lossy().to_string())
        .unwrap_or_else(|| "static".to_string())
}

/// API error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
    pub code: String,
    #[serde(skip, default = "internal_error")]
    pub status: StatusCode,
}

fn internal_error() -> StatusCode {
    StatusCode::INTERNAL_SERVER_ERROR
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let (status, code) = match &err {
            Error::MissingParameter(_) => (StatusCode::BAD_REQUEST, "MISSING_PARAMETER"),
            Error::InvalidParameter(_) => (StatusCode::BAD_REQUEST, "INVALID_PARAMETER"),
            Error::UnsupportedQueryShape(_) => {
                (StatusCode::BAD_REQUEST, "UNSUPPORTED_QUERY_SHAPE")
            }
            Error::UnconfiguredServer(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "UNCONFIGURED_SERVER")
            }
            Error::Upstream(_) | Error::Http(_) => (StatusCode::BAD_GATEWAY, "UPSTREAM_FAILURE"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            warn!("Request failed: {}", err);
        } else {
            debug!("Rejected request: {}", err);
        }

        ApiError {
            error: err.to_string(),
            code: code.to_string(),
            status,
        }
    }
}

/// Present and non-empty, or `MissingParameter`
fn required(name: &str, value: Option<String>) -> Result<String, Error> {
    value
        .filter(|v| !v.is_empty())
        .ok_or_else(|| Error::MissingParameter(name.to_string()))
}

/// Render the map page
///
/// GET /
async fn index_handler(State(state): State<Arc<AppState>>) -> Result<Html<String>, ApiError> {
    let key = state
        .maps_api_key
        .as_deref()
        .ok_or_else(|| Error::UnconfiguredServer("API_KEY not set".to_string()))?;

    Ok(Html(render_index(key)))
}

fn render_index(key: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
    <head>
        <meta charset="utf-8"/>
        <meta content="initial-scale=1, width=device-width" name="viewport"/>
        <title>Mashup</title>
        <link href="/static/styles.css" rel="stylesheet"/>
        <script src="{}?key={}&amp;v=3"></script>
        <script src="/static/scripts.js"></script>
    </head>
    <body>
        <div id="map-canvas"></div>
        <form id="form">
            <input id="q" placeholder="City, State, Postal Code" type="text"/>
        </form>
    </body>
</html>
"#,
        api::MAPS_JS_URL,
        urlencoding::encode(key)
    )
}

#[derive(Debug, Deserialize)]
pub struct ArticlesParams {
    pub geo: Option<String>,
}

/// Articles about a place
///
/// GET /articles?geo=
async fn articles_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ArticlesParams>,
) -> Result<Json<Vec<Article>>, ApiError> {
    let geo = required("geo", params.geo)?;
    let articles = lookup_articles(state.news.as_ref(), &geo).await?;
    Ok(Json(articles))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

/// Places matching a free-text query
///
/// GET /search?q=
async fn search_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<Place>>, ApiError> {
    let q = required("q", params.q)?;
    let places = search(&state.store, &q).await?;
    Ok(Json(places))
}

#[derive(Debug, Deserialize)]
pub struct UpdateParams {
    pub sw: Option<String>,
    pub ne: Option<String>,
}

/// Up to ten places within the visible map area
///
/// GET /update?sw=lat,lng&ne=lat,lng
async fn update_handler(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UpdateParams>,
) -> Result<Json<Vec<Place>>, ApiError> {
    let sw = required("sw", params.sw)?;
    let ne = required("ne", params.ne)?;
    let viewport = Viewport::parse(&sw, &ne)?;
    let places = find_places(&state.store, &viewport).await?;
    Ok(Json(places))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::news::fixed::FixedNewsSource;
    use crate::news::NewsSource;
    use crate::place::fixtures::*;
    use crate::place::PlaceStore;
    use axum::body::{Body, Bytes};
    use axum::http::{HeaderMap, Request};
    use futures::future::BoxFuture;
    use http_body_util::BodyExt;
    use serde_json::json;
    use tower::ServiceExt;

    struct FailingNewsSource;

    impl NewsSource for FailingNewsSource {
        fn name(&self) -> &'static str {
            "failing"
        }

        fn lookup<'a>(&'a self, _geo: &'a str) -> BoxFuture<'a, Result<Vec<Article>>> {
            Box::pin(async { Err(Error::Upstream("connection refused".to_string())) })
        }
    }

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| serde_json::from_value(json!({ "title": format!("story {}", i), "link": "l" })).unwrap())
            .collect()
    }

    async fn create_test_state(key: Option<&str>) -> Arc<AppState> {
        Arc::new(AppState::new(
            sample_store().await,
            Arc::new(FixedNewsSource::new(articles(8))),
            key.map(str::to_string),
        ))
    }

    async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, HeaderMap, Bytes) {
        let response = create_router(state)
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.into_body().collect().await.unwrap().to_bytes();
        (status, headers, body)
    }

    async fn get_places(uri: &str) -> Vec<Place> {
        let (status, _, body) = get(create_test_state(None).await, uri).await;
        assert_eq!(status, StatusCode::OK, "{}", String::from_utf8_lossy(&body));
        serde_json::from_slice(&body).unwrap()
    }

    async fn get_error(state: Arc<AppState>, uri: &str) -> (StatusCode, ApiError) {
        let (status, _, body) = get(state, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_search_city_region() {
        let places = get_places("/search?q=Cambridge%2C%20MA").await;

        assert_eq!(places.len(), 2);
        for place in &places {
            assert!(place.place_name.starts_with("Cambridge"));
            assert_eq!(place.admin_code1.as_deref(), Some("MA"));
        }
    }

    #[tokio::test]
    async fn test_search_postal_code() {
        let places = get_places("/search?q=95139").await;
        assert_eq!(places.len(), 1);
        assert!(places[0].postal_code.starts_with("95139"));
    }

    #[tokio::test]
    async fn test_search_plus_as_space() {
        let places = get_places("/search?q=New+Haven").await;
        assert_eq!(places.len(), 1);
        assert_eq!(places[0].place_name, "New Haven");
    }

    #[tokio::test]
    async fn test_search_missing_query() {
        for uri in ["/search", "/search?q="] {
            let (status, err) = get_error(create_test_state(None).await, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(err.code, "MISSING_PARAMETER");
        }
    }

    #[tokio::test]
    async fn test_search_unsupported_shape() {
        let (status, err) =
            get_error(create_test_state(None).await, "/search?q=a+b+c+d+e").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "UNSUPPORTED_QUERY_SHAPE");
    }

    #[tokio::test]
    async fn test_missing_parameters_checked_before_database() {
        let store = PlaceStore::in_memory().await.unwrap();
        store.pool().close().await;
        let state = Arc::new(AppState::new(
            store,
            Arc::new(FixedNewsSource::default()),
            None,
        ));

        let (status, err) = get_error(state.clone(), "/search?q=").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "MISSING_PARAMETER");

        let (status, err) = get_error(state.clone(), "/update?ne=1,1").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "MISSING_PARAMETER");

        let (status, _) = get_error(state, "/search?q=Boston").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn test_update_within_bounds() {
        let places = get_places("/update?sw=40,-75&ne=43,-70").await;

        assert!(!places.is_empty());
        assert!(places.len() <= 10);
        for place in &places {
            assert!(40.0 <= place.latitude && place.latitude <= 43.0);
            assert!(-75.0 <= place.longitude && place.longitude <= -70.0);
        }
    }

    #[tokio::test]
    async fn test_update_antimeridian() {
        let places = get_places("/update?sw=50,170&ne=55,-170").await;

        assert_eq!(places.len(), 2);
        for place in &places {
            assert!(50.0 <= place.latitude && place.latitude <= 55.0);
            assert!(place.longitude >= 170.0 || place.longitude <= -170.0);
        }
    }

    #[tokio::test]
    async fn test_update_missing_corner() {
        for uri in ["/update?ne=1,1", "/update?sw=1,1", "/update?sw=&ne=1,1"] {
            let (status, err) = get_error(create_test_state(None).await, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(err.code, "MISSING_PARAMETER", "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_update_invalid_corner() {
        for uri in [
            "/update?sw=200,0&ne=0,0",
            "/update?sw=0,0&ne=abc",
            "/update?sw=1.5&ne=2,2",
        ] {
            let (status, err) = get_error(create_test_state(None).await, uri).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{}", uri);
            assert_eq!(err.code, "INVALID_PARAMETER", "{}", uri);
        }
    }

    #[tokio::test]
    async fn test_articles() {
        let (status, _, body) = get(create_test_state(None).await, "/articles?geo=Boston").await;
        assert_eq!(status, StatusCode::OK);

        let received: Vec<Article> = serde_json::from_slice(&body).unwrap();
        assert_eq!(received, articles(5));
    }

    #[tokio::test]
    async fn test_articles_missing_geo() {
        let (status, err) = get_error(create_test_state(None).await, "/articles").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "MISSING_PARAMETER");
    }

    #[tokio::test]
    async fn test_articles_upstream_failure() {
        let state = Arc::new(AppState::new(
            sample_store().await,
            Arc::new(FailingNewsSource),
            None,
        ));
        let (status, err) = get_error(state, "/articles?geo=Boston").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(err.code, "UPSTREAM_FAILURE");
    }

    #[tokio::test]
    async fn test_index_requires_key() {
        let (status, err) = get_error(create_test_state(None).await, "/").await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "UNCONFIGURED_SERVER");
    }

    #[tokio::test]
    async fn test_index_embeds_key() {
        let (status, headers, body) = get(create_test_state(Some("abc123")).await, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(headers[axum::http::header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/html"));

        let html = String::from_utf8(body.to_vec()).unwrap();
        assert!(html.contains("key=abc123"));
    }

    #[test]
    fn test_render_index_encodes_key() {
        let html = render_index("a\"b&c");
        assert!(html.contains("key=a%22b%26c"));
        assert!(!html.contains("a\"b"));
    }

    #[tokio::test]
    async fn test_no_cache_headers() {
        for uri in ["/search?q=Boston", "/search", "/"] {
            let (_, headers, _) = get(create_test_state(None).await, uri).await;
            assert_eq!(headers[CACHE_CONTROL], "no-cache, no-store, must-revalidate", "{}", uri);
            assert_eq!(headers[PRAGMA], "no-cache", "{}", uri);
            assert_eq!(headers[EXPIRES], "0", "{}", uri);
        }
    }

    #[test]
    fn test_required() {
        assert_eq!(required("q", Some("x".to_string())).unwrap(), "x");
        assert!(matches!(required("q", None), Err(Error::MissingParameter(ref n)) if n == "q"));
        assert!(matches!(
            required("q", Some(String::new())),
            Err(Error::MissingParameter(_))
        ));
    }
}
