pub mod authors;
pub mod health;

pub use authors::{all_authors, get_author, list_authors, AuthorsQuery};
pub use health::{health, readiness};
