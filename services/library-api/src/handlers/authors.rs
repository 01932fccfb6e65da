//! Authors collection endpoints

use axum::{
    extract::{FromRequestParts, Path, Query, State},
    http::{request::Parts, HeaderMap},
    Json,
};
use chrono::Utc;
use resource_query::paging::ParameterQuery;
use resource_query::response::PagedResponse;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{LibraryError, LibraryResult};
use crate::links::AuthorLinks;
use crate::models::AuthorDto;
use crate::{AppState, View};

/// Query string of `GET /api/authors`
///
/// `genre` is the filter value; `filterValue` is accepted as an alias.
/// A malformed query string is rejected with a JSON `400`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorsQuery {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    #[serde(alias = "filterValue")]
    pub genre: Option<String>,
    pub search_query: Option<String>,
    pub order_by: Option<String>,
    pub fields: Option<String>,
}

impl From<AuthorsQuery> for ParameterQuery {
    fn from(query: AuthorsQuery) -> Self {
        Self {
            page_number: query.page_number,
            page_size: query.page_size,
            filter_value: query.genre,
            search_query: query.search_query,
            order_by: query.order_by,
            fields: query.fields,
        }
    }
}

impl<S> FromRequestParts<S> for AuthorsQuery
where
    S: Send + Sync,
{
    type Rejection = LibraryError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(query) = Query::<Self>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| LibraryError::InvalidQuery(rejection.body_text()))?;
        Ok(query)
    }
}

/// `GET /api/authors`
///
/// Sorted, filtered, paged and shaped author list. Paging details go in
/// the `X-Pagination` header. An unknown `orderBy` or `fields` name is a
/// `400 Bad Request`.
#[tracing::instrument(skip(state, headers))]
pub async fn list_authors(
    State(state): State<AppState>,
    headers: HeaderMap,
    query: AuthorsQuery,
) -> LibraryResult<PagedResponse> {
    let params = state.query.parameters(query.into());
    let today = Utc::now().date_naive();

    let page = state
        .query
        .execute(
            View::AuthorDto,
            View::Author,
            &params,
            state.store.as_ref(),
            |author| AuthorDto::from_author_on(author, today),
        )
        .await?;

    let links = AuthorLinks::for_request(&headers, state.config.service.port);
    Ok(PagedResponse::new(&page, &params, &links))
}

/// `GET /api/authors/all`
///
/// Every author, unpaged, in store order.
pub async fn all_authors(State(state): State<AppState>) -> Json<Vec<AuthorDto>> {
    let today = Utc::now().date_naive();
    Json(
        state
            .store
            .all()
            .iter()
            .map(|author| AuthorDto::from_author_on(author, today))
            .collect(),
    )
}

/// `GET /api/authors/{id}`
pub async fn get_author(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> LibraryResult<Json<AuthorDto>> {
    let author = state
        .store
        .find(|author| author.id == id)
        .ok_or(LibraryError::AuthorNotFound(id))?;

    Ok(Json(AuthorDto::from_author(author)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{router, seed};
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
        response::Response,
        Router,
    };
    use resource_query::config::Config;
    use resource_query::paging::PaginationMetadata;
    use serde_json::Value;
    use tower::ServiceExt;

    fn app() -> Router {
        router(AppState::new(Config::default(), seed::authors()).unwrap())
    }

    async fn get(uri: &str) -> Response {
        app()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header("host", "library.test")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    async fn json_body(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn pagination(response: &Response) -> PaginationMetadata {
        let header = response.headers().get("X-Pagination").unwrap();
        serde_json::from_str(header.to_str().unwrap()).unwrap()
    }

    fn names(body: &Value) -> Vec<String> {
        body.as_array()
            .unwrap()
            .iter()
            .map(|item| item["Name"].as_str().unwrap().to_string())
            .collect()
    }

    #[test]
    fn test_query_overrides_defaults() {
        let state = AppState::new(Config::default(), seed::authors()).unwrap();
        let params = state.query.parameters(
            AuthorsQuery {
                page_size: Some(50),
                genre: Some("Fantasy".to_string()),
                ..Default::default()
            }
            .into(),
        );

        assert_eq!(params.page_number(), 1);
        assert_eq!(params.page_size(), 20);
        assert_eq!(params.filter_value(), Some("Fantasy"));
        assert_eq!(params.order_by(), "Name");
    }

    #[test]
    fn test_raised_max_page_size_is_honoured() {
        let mut config = Config::default();
        config.query.max_page_size = 50;
        let state = AppState::new(config, seed::authors()).unwrap();
        let params = state.query.parameters(
            AuthorsQuery {
                page_size: Some(40),
                ..Default::default()
            }
            .into(),
        );
        assert_eq!(params.page_size(), 40);
    }

    #[tokio::test]
    async fn test_malformed_query_is_json_bad_request() {
        let response = get("/api/authors?pageNumber=abc").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = json_body(response).await;
        assert_eq!(body["code"], "INVALID_QUERY");
        assert_eq!(body["status"], 400);
    }

    #[tokio::test]
    async fn test_list_defaults_to_name_order() {
        let response = get("/api/authors").await;
        assert_eq!(response.status(), StatusCode::OK);

        let meta = pagination(&response);
        assert_eq!(meta.total_count, 6);
        assert_eq!(meta.page_size, 10);
        assert_eq!(meta.current_page, 1);
        assert_eq!(meta.total_pages, 1);
        assert!(meta.previous_page_link.is_none());
        assert!(meta.next_page_link.is_none());

        let body = json_body(response).await;
        assert_eq!(
            names(&body),
            vec![
                "Douglas Adams",
                "George RR Martin",
                "Jens Lapidus",
                "Neil Gaiman",
                "Stephen King",
                "Tom Lanoye",
            ]
        );
        let first = body[0].as_object().unwrap();
        let keys: Vec<_> = first.keys().map(String::as_str).collect();
        assert_eq!(keys.len(), 4);
        assert!(first.contains_key("Age"));
    }

    #[tokio::test]
    async fn test_age_desc_lists_oldest_first() {
        let response = get("/api/authors?orderBy=Age%20desc").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = json_body(response).await;
        assert_eq!(names(&body)[0], "Stephen King");
        assert_eq!(names(&body)[5], "Jens Lapidus");
    }

    #[tokio::test]
    async fn test_unknown_order_by_is_bad_request() {
        let response = get("/api/authors?orderBy=Shoe").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(response.headers().get("X-Pagination").is_none());

        let body = json_body(response).await;
        assert_eq!(body["code"], "UNKNOWN_FIELD");
    }

    #[tokio::test]
    async fn test_unknown_shape_field_is_bad_request() {
        let response = get("/api/authors?fields=Id,DateOfBirth").await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_fields_and_paging_links() {
        let response = get("/api/authors?fields=Id,Name&pageSize=2&pageNumber=2").await;
        assert_eq!(response.status(), StatusCode::OK);

        let meta = pagination(&response);
        assert_eq!(meta.total_pages, 3);
        assert_eq!(
            meta.previous_page_link.as_deref(),
            Some("http://library.test/api/authors?pageNumber=1&pageSize=2&orderBy=Name&fields=Id%2CName")
        );
        assert_eq!(
            meta.next_page_link.as_deref(),
            Some("http://library.test/api/authors?pageNumber=3&pageSize=2&orderBy=Name&fields=Id%2CName")
        );

        let body = json_body(response).await;
        assert_eq!(names(&body), vec!["Jens Lapidus", "Neil Gaiman"]);
        let keys: Vec<_> = body[0].as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys.len(), 2);
        assert!(body[0].get("Genre").is_none());
    }

    #[tokio::test]
    async fn test_page_size_is_capped() {
        let response = get("/api/authors?pageSize=50").await;
        assert_eq!(pagination(&response).page_size, 20);
    }

    #[tokio::test]
    async fn test_genre_and_search_filters() {
        let response = get("/api/authors?genre=fantasy").await;
        assert_eq!(pagination(&response).total_count, 2);
        let body = json_body(response).await;
        assert_eq!(names(&body), vec!["George RR Martin", "Neil Gaiman"]);

        let response = get("/api/authors?searchQuery=KING").await;
        let body = json_body(response).await;
        assert_eq!(names(&body), vec!["Stephen King"]);
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let response = get("/api/authors?pageNumber=9").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(pagination(&response).total_count, 6);
        assert_eq!(json_body(response).await, serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_all_authors_unpaged() {
        let response = get("/api/authors/all").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get("X-Pagination").is_none());
        let body = json_body(response).await;
        assert_eq!(body.as_array().unwrap().len(), 6);
        assert_eq!(body[0]["Name"], "Stephen King");
    }

    #[tokio::test]
    async fn test_get_author_by_id() {
        let response = get("/api/authors/76053df4-6687-4353-8937-b45556748abe").await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["Name"], "George RR Martin");
        assert_eq!(body["Genre"], "Fantasy");
    }

    #[tokio::test]
    async fn test_get_missing_author_is_not_found() {
        let response = get(&format!("/api/authors/{}", Uuid::nil())).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(json_body(response).await["code"], "NOT_FOUND");
    }
}
