//! RecommendationsApi - Popular and personalized picks.

use http::Method;
use std::sync::Arc;

use crate::application::gateway::{ApiError, ApiGateway, RequestOptions};
use crate::domain::catalog::BookSummary;

pub struct RecommendationsApi {
    gateway: Arc<ApiGateway>,
}

impl RecommendationsApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    /// Top-rated books; `exclude_rated` skips books the signed-in reader rated.
    pub async fn popular(&self, limit: u32, exclude_rated: bool) -> Result<Vec<BookSummary>, ApiError> {
        let options = RequestOptions::new()
            .param("limit", limit)
            .param("exclude_rated", exclude_rated);
        self.gateway
            .fetch(Method::GET, "/recommendations/popular", options)
            .await
    }

    /// Picks based on the reader's ratings; requires a session.
    pub async fn personalized(&self, limit: u32) -> Result<Vec<BookSummary>, ApiError> {
        self.gateway
            .fetch(
                Method::GET,
                "/recommendations/personalized",
                RequestOptions::new().param("limit", limit),
            )
            .await
    }
}
