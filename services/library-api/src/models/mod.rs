//! Author entity and its public view

pub mod author;

pub use author::{age_on, Author, AuthorDto};
