//! Book records as the catalog API returns them.

use serde::{Deserialize, Serialize};

use super::Pagination;
use crate::domain::foundation::BookId;

/// The compact book shape used by listings, search results and
/// recommendations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookSummary {
    pub book_id: BookId,
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub ratings_count: u64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, alias = "original_publication_year")]
    pub publication_year: Option<i32>,
    #[serde(default)]
    pub language_code: Option<String>,
    /// Why a personalized recommendation was made.
    #[serde(default)]
    pub reason: Option<String>,
}

impl BookSummary {
    pub fn new(book_id: BookId, title: impl Into<String>, authors: impl Into<String>) -> Self {
        Self {
            book_id,
            title: title.into(),
            authors: authors.into(),
            average_rating: 0.0,
            ratings_count: 0,
            image_url: None,
            publication_year: None,
            language_code: None,
            reason: None,
        }
    }
}

/// Count of ratings per star value.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingsDistribution {
    #[serde(rename = "1_star", default)]
    pub one: u64,
    #[serde(rename = "2_star", default)]
    pub two: u64,
    #[serde(rename = "3_star", default)]
    pub three: u64,
    #[serde(rename = "4_star", default)]
    pub four: u64,
    #[serde(rename = "5_star", default)]
    pub five: u64,
}

impl RatingsDistribution {
    pub fn total(&self) -> u64 {
        self.one + self.two + self.three + self.four + self.five
    }

    /// Share of ratings with the given star value, in percent.
    pub fn percentage(&self, stars: u8) -> f64 {
        let total = self.total();
        if total == 0 {
            return 0.0;
        }
        let count = match stars {
            1 => self.one,
            2 => self.two,
            3 => self.three,
            4 => self.four,
            5 => self.five,
            _ => 0,
        };
        count as f64 * 100.0 / total as f64
    }
}

/// A tag attached to a book, with how many readers shelved it that way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookTag {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

/// Everything the book details page shows about one book.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookDetails {
    pub book_id: BookId,
    pub title: String,
    #[serde(default)]
    pub authors: String,
    #[serde(default)]
    pub goodreads_book_id: Option<u64>,
    #[serde(default)]
    pub work_id: Option<u64>,
    #[serde(default)]
    pub original_title: Option<String>,
    #[serde(default)]
    pub original_publication_year: Option<i32>,
    #[serde(default)]
    pub language_code: Option<String>,
    #[serde(default)]
    pub average_rating: f64,
    #[serde(default)]
    pub ratings_count: u64,
    #[serde(default)]
    pub ratings_distribution: RatingsDistribution,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub small_image_url: Option<String>,
    #[serde(default)]
    pub isbn: Option<String>,
    #[serde(default)]
    pub tags: Vec<BookTag>,
}

impl BookDetails {
    /// Collapses the details into the listing shape.
    pub fn summary(&self) -> BookSummary {
        BookSummary {
            book_id: self.book_id,
            title: self.title.clone(),
            authors: self.authors.clone(),
            average_rating: self.average_rating,
            ratings_count: self.ratings_count,
            image_url: self.image_url.clone(),
            publication_year: self.original_publication_year,
            language_code: self.language_code.clone(),
            reason: None,
        }
    }
}

/// One page of books from `/books/` or `/books/search`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookPage {
    #[serde(default)]
    pub books: Vec<BookSummary>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_accepts_original_publication_year_alias() {
        let book: BookSummary = serde_json::from_str(
            r#"{"book_id": 1, "title": "Dune", "authors": "Frank Herbert",
                "original_publication_year": 1965}"#,
        )
        .unwrap();
        assert_eq!(book.publication_year, Some(1965));
    }

    #[test]
    fn distribution_reads_star_keys() {
        let dist: RatingsDistribution = serde_json::from_str(
            r#"{"1_star": 1, "2_star": 1, "3_star": 2, "4_star": 4, "5_star": 2}"#,
        )
        .unwrap();
        assert_eq!(dist.total(), 10);
        assert!((dist.percentage(4) - 40.0).abs() < f64::EPSILON);
        assert_eq!(dist.percentage(9), 0.0);
    }

    #[test]
    fn empty_distribution_has_zero_percentages() {
        assert_eq!(RatingsDistribution::default().percentage(5), 0.0);
    }

    #[test]
    fn details_collapse_into_summary() {
        let details: BookDetails = serde_json::from_str(
            r#"{"book_id": 9, "title": "Emma", "authors": "Jane Austen",
                "original_publication_year": 1815, "average_rating": 3.9,
                "tags": [{"name": "classics", "count": 120}]}"#,
        )
        .unwrap();
        let summary = details.summary();
        assert_eq!(summary.book_id, BookId::new(9));
        assert_eq!(summary.publication_year, Some(1815));
        assert_eq!(details.tags[0].name, "classics");
    }

    #[test]
    fn book_page_defaults_missing_pagination() {
        let page: BookPage = serde_json::from_str(r#"{"books": []}"#).unwrap();
        assert!(page.books.is_empty());
        assert_eq!(page.pagination.current_page, 1);
    }
}
