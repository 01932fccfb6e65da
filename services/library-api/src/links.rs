//! Absolute navigation links for the authors collection

use axum::http::{header::HOST, HeaderMap};
use resource_query::paging::{LinkBuilder, ResourceParameters};
use url::Url;

/// Collection path the links address
pub const AUTHORS_PATH: &str = "/api/authors";

/// Builds `/api/authors` links on a fixed origin
#[derive(Debug, Clone)]
pub struct AuthorLinks {
    base: Option<Url>,
}

impl AuthorLinks {
    /// Links rooted at `base`, whose path is replaced by the collection path
    pub fn new(base: Url) -> Self {
        Self {
            base: Some(collection_url(base)),
        }
    }

    /// Links on the origin the request was addressed to
    ///
    /// Uses the `Host` header, falling back to `localhost:{port}` when it is
    /// missing or unusable.
    pub fn for_request(headers: &HeaderMap, port: u16) -> Self {
        let base = headers
            .get(HOST)
            .and_then(|value| value.to_str().ok())
            .and_then(|host| Url::parse(&format!("http://{host}")).ok())
            .or_else(|| {
                tracing::debug!("No usable Host header; linking to localhost");
                Url::parse(&format!("http://localhost:{port}")).ok()
            });

        Self {
            base: base.map(collection_url),
        }
    }
}

fn collection_url(mut base: Url) -> Url {
    base.set_path(AUTHORS_PATH);
    base.set_query(None);
    base
}

impl LinkBuilder for AuthorLinks {
    fn link(&self, params: &ResourceParameters) -> Option<String> {
        let mut url = self.base.clone()?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("pageNumber", &params.page_number().to_string())
                .append_pair("pageSize", &params.page_size().to_string());
            if let Some(genre) = params.filter_value() {
                query.append_pair("genre", genre);
            }
            if let Some(search) = params.search_query() {
                query.append_pair("searchQuery", search);
            }
            query.append_pair("orderBy", params.order_by());
            if let Some(fields) = params.fields() {
                query.append_pair("fields", fields);
            }
        }
        Some(url.into())
    }
}
