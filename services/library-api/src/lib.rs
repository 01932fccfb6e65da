//! Authors collection API
//!
//! `GET /api/authors` supports `pageNumber`, `pageSize`, `genre`,
//! `searchQuery`, `orderBy` and `fields`, and reports paging in the
//! `X-Pagination` response header.

pub mod error;
pub mod handlers;
pub mod links;
pub mod mapping;
pub mod models;
pub mod seed;

use std::sync::Arc;

use axum::{routing::get, Router};
use resource_query::prelude::{Config, InMemoryStore, ResourceQuery};

pub use error::{LibraryError, LibraryResult};
pub use mapping::View;
pub use models::{Author, AuthorDto};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub query: ResourceQuery<View>,
    pub store: Arc<InMemoryStore<Author>>,
}

impl AppState {
    /// Build the registry and author store
    pub fn new(config: Config, authors: Vec<Author>) -> resource_query::Result<Self> {
        let query = ResourceQuery::new(mapping::registry()?, config.query.clone());
        let store = InMemoryStore::new(authors).with_filter(Author::matches);
        Ok(Self {
            config,
            query,
            store: Arc::new(store),
        })
    }
}

/// All routes of the service
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/ready", get(handlers::readiness))
        .route("/api/authors", get(handlers::list_authors))
        .route("/api/authors/all", get(handlers::all_authors))
        .route("/api/authors/{id}", get(handlers::get_author))
        .with_state(state)
}
