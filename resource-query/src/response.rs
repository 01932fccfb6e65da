//! HTTP response for shaped collection pages
//!
//! # Example
//!
//! ```rust,ignore
//! async fn list_authors(
//!     State(state): State<AppState>,
//!     Query(query): Query<ParameterQuery>,
//! ) -> Result<PagedResponse> {
//!     let params = state.query.parameters(query);
//!     let page = state
//!         .query
//!         .execute(View::AuthorDto, View::Author, &params, &state.store, AuthorDto::from_entity)
//!         .await?;
//!     Ok(PagedResponse::new(&page, &params, &state.links))
//! }
//! ```

use axum::{
    http::{HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::error::ErrorResponse;
use crate::paging::{LinkBuilder, PaginationMetadata, ResourceParameters};
use crate::pipeline::ShapedPage;
use crate::shaping::ShapedEntity;

/// Response header carrying [`PaginationMetadata`] as JSON
pub static X_PAGINATION: HeaderName = HeaderName::from_static("x-pagination");

/// `200 OK` with shaped items as a JSON array and an `X-Pagination` header
#[derive(Debug, Clone)]
pub struct PagedResponse {
    /// Shaped items
    pub items: Vec<ShapedEntity>,
    /// Pagination summary for the header
    pub metadata: PaginationMetadata,
}

impl PagedResponse {
    /// Build a response for a page, with links from `links`
    pub fn new<L>(page: &ShapedPage, params: &ResourceParameters, links: &L) -> Self
    where
        L: LinkBuilder + ?Sized,
    {
        Self {
            items: page.items().to_vec(),
            metadata: page.metadata(params, links),
        }
    }

    /// Build a response from parts
    pub fn from_parts(items: Vec<ShapedEntity>, metadata: PaginationMetadata) -> Self {
        Self { items, metadata }
    }
}

impl IntoResponse for PagedResponse {
    fn into_response(self) -> Response {
        let header_value = self
            .metadata
            .to_header_value()
            .map_err(|e| e.to_string())
            .and_then(|json| HeaderValue::from_str(&json).map_err(|e| e.to_string()));

        match header_value {
            Ok(value) => (
                StatusCode::OK,
                [(X_PAGINATION.clone(), value)],
                Json(self.items),
            )
                .into_response(),
            Err(e) => {
                tracing::error!("Failed to encode pagination header: {}", e);
                let status = StatusCode::INTERNAL_SERVER_ERROR;
                (
                    status,
                    Json(ErrorResponse::with_code(
                        status,
                        "PAGINATION_HEADER",
                        "An internal error occurred",
                    )),
                )
                    .into_response()
            }
        }
    }
}
