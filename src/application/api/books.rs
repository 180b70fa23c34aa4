//! BooksApi - Catalog listings, details, reviews and ratings.

use http::Method;
use serde_json::json;
use std::sync::Arc;

use crate::application::gateway::{ApiError, ApiGateway, RequestOptions};
use crate::domain::catalog::{
    BookDetails, BookPage, BookSummary, PageRequest, RatingReceipt, ReviewPage, TagPage,
};
use crate::domain::foundation::{BookId, StarRating};
use crate::domain::search::SortBy;

pub struct BooksApi {
    gateway: Arc<ApiGateway>,
}

impl BooksApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// `GET /books/` with filter parameters.
    pub async fn list(&self, params: Vec<(String, String)>) -> Result<BookPage, ApiError> {
        let page: BookPage = self
            .gateway
            .fetch(Method::GET, "/books/", RequestOptions::new().params(params))
            .await?;
        Ok(normalize(page))
    }

    /// `GET /books/search?q=...` with filter parameters.
    pub async fn search(
        &self,
        query: &str,
        params: Vec<(String, String)>,
    ) -> Result<BookPage, ApiError> {
        let options = RequestOptions::new().param("q", query).params(params);
        let page: BookPage = self
            .gateway
            .fetch(Method::GET, "/books/search", options)
            .await?;
        Ok(normalize(page))
    }

    pub async fn popular(&self, limit: u32) -> Result<Vec<BookSummary>, ApiError> {
        self.gateway
            .fetch(
                Method::GET,
                "/books/popular",
                RequestOptions::new().param("limit", limit),
            )
            .await
    }

    pub async fn tags(&self, page: PageRequest, sort_by: SortBy) -> Result<TagPage, ApiError> {
        let options = RequestOptions::new()
            .params(page.to_params())
            .param("sort_by", sort_by.as_str());
        let mut tags: TagPage = self
            .gateway
            .fetch(Method::GET, "/books/tags", options)
            .await?;
        tags.pagination = tags.pagination.normalized();
        Ok(tags)
    }

    pub async fn get(&self, book_id: BookId) -> Result<BookDetails, ApiError> {
        self.gateway
            .fetch(
                Method::GET,
                &format!("/books/{}", book_id),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn similar(&self, book_id: BookId) -> Result<Vec<BookSummary>, ApiError> {
        self.gateway
            .fetch(
                Method::GET,
                &format!("/books/similar/{}", book_id),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn reviews(&self, book_id: BookId) -> Result<ReviewPage, ApiError> {
        self.gateway
            .fetch(
                Method::GET,
                &format!("/books/reviews/{}", book_id),
                RequestOptions::new(),
            )
            .await
    }

    /// `PUT /books/rate/{id}`; an absent review is sent as an empty string.
    pub async fn rate(
        &self,
        book_id: BookId,
        rating: StarRating,
        review: Option<&str>,
    ) -> Result<RatingReceipt, ApiError> {
        let body = json!({
            "rating": rating.value(),
            "review": review.unwrap_or_default(),
        });
        self.gateway
            .fetch(
                Method::PUT,
                &format!("/books/rate/{}", book_id),
                RequestOptions::new().body(body),
            )
            .await
    }
}

fn normalize(mut page: BookPage) -> BookPage {
    page.pagination = page.pagination.normalized();
    page
}
