//! Authors the service starts with

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::Author;

const SEED: [(u128, &str, &str, (i32, u32, u32), &str); 6] = [
    (0x25320c5e_f58a_4b1f_b63a_8ee07a840bdf, "Stephen", "King", (1947, 9, 21), "Horror"),
    (0x76053df4_6687_4353_8937_b45556748abe, "George", "RR Martin", (1948, 9, 20), "Fantasy"),
    (0x412c3012_d891_4f5e_9613_ff7aa63e6bb3, "Neil", "Gaiman", (1960, 11, 10), "Fantasy"),
    (0x578359b7_1967_41d6_8b87_64ab7605587e, "Tom", "Lanoye", (1958, 8, 27), "Various"),
    (0xf74d6899_9ed2_4137_9876_66b070553f8f, "Douglas", "Adams", (1952, 3, 11), "Science fiction"),
    (0xa1da1d8e_1988_4634_b538_a01709477b77, "Jens", "Lapidus", (1974, 5, 24), "Thriller"),
];

/// Seed authors in insertion order
pub fn authors() -> Vec<Author> {
    SEED.iter()
        .filter_map(|&(id, first, last, (y, m, d), genre)| {
            let born = NaiveDate::from_ymd_opt(y, m, d)?;
            Some(Author::new(Uuid::from_u128(id), first, last, born, genre))
        })
        .collect()
}
