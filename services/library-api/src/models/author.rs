use chrono::{Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;
use resource_query::fields::{FieldAccessors, FieldSource};
use resource_query::store::ResourceFilter;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stored author record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: NaiveDate,
    pub genre: String,
}

static AUTHOR_FIELDS: Lazy<FieldAccessors<Author>> = Lazy::new(|| {
    FieldAccessors::new()
        .with("Id", |a: &Author| a.id.into())
        .with("FirstName", |a: &Author| a.first_name.as_str().into())
        .with("LastName", |a: &Author| a.last_name.as_str().into())
        .with("DateOfBirth", |a: &Author| a.date_of_birth.into())
        .with("Genre", |a: &Author| a.genre.as_str().into())
});

impl FieldSource for Author {
    fn field_accessors() -> &'static FieldAccessors<Self> {
        &AUTHOR_FIELDS
    }
}

impl Author {
    pub fn new(
        id: Uuid,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        date_of_birth: NaiveDate,
        genre: impl Into<String>,
    ) -> Self {
        Self {
            id,
            first_name: first_name.into(),
            last_name: last_name.into(),
            date_of_birth,
            genre: genre.into(),
        }
    }

    /// Store filter for the authors collection
    ///
    /// The filter value is an exact genre, ignoring case. The search query
    /// matches a substring of the genre, first name or last name, also
    /// ignoring case. Both must hold when both are given.
    pub fn matches(&self, filter: &ResourceFilter) -> bool {
        let genre_matches = filter
            .filter_value
            .as_deref()
            .map_or(true, |genre| self.genre.eq_ignore_ascii_case(genre));

        let search_matches = filter.search_query.as_deref().map_or(true, |query| {
            let query = query.to_lowercase();
            [&self.genre, &self.first_name, &self.last_name]
                .iter()
                .any(|value| value.to_lowercase().contains(&query))
        });

        genre_matches && search_matches
    }
}

/// Whole years between `date_of_birth` and `today`
///
/// One less when this year's birthday has not happened yet.
pub fn age_on(date_of_birth: NaiveDate, today: NaiveDate) -> i64 {
    let mut age = i64::from(today.year() - date_of_birth.year());
    if (today.month(), today.day()) < (date_of_birth.month(), date_of_birth.day()) {
        age -= 1;
    }
    age
}

/// Public view of an author
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct AuthorDto {
    pub id: Uuid,
    pub name: String,
    pub age: i64,
    pub genre: String,
}

static AUTHOR_DTO_FIELDS: Lazy<FieldAccessors<AuthorDto>> = Lazy::new(|| {
    FieldAccessors::new()
        .with("Id", |a: &AuthorDto| a.id.into())
        .with("Name", |a: &AuthorDto| a.name.as_str().into())
        .with("Age", |a: &AuthorDto| a.age.into())
        .with("Genre", |a: &AuthorDto| a.genre.as_str().into())
});

impl FieldSource for AuthorDto {
    fn field_accessors() -> &'static FieldAccessors<Self> {
        &AUTHOR_DTO_FIELDS
    }
}

impl AuthorDto {
    /// View of `author` with its age as of today (UTC)
    pub fn from_author(author: &Author) -> Self {
        Self::from_author_on(author, Utc::now().date_naive())
    }

    /// View of `author` with its age as of `today`
    pub fn from_author_on(author: &Author, today: NaiveDate) -> Self {
        Self {
            id: author.id,
            name: format!("{} {}", author.first_name, author.last_name),
            age: age_on(author.date_of_birth, today),
            genre: author.genre.clone(),
        }
    }
}
