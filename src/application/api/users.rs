//! UsersApi - Profile, shelves and statistics of the signed-in reader.

use http::Method;
use std::sync::Arc;

use crate::application::gateway::{ApiError, ApiGateway, RequestOptions};
use crate::domain::catalog::PageRequest;
use crate::domain::foundation::BookId;
use crate::domain::user::{
    ActivityEntry, ProfileUpdate, RatingsPage, ReadingListAddition, ReadingListPage, UserProfile,
    UserStats,
};

pub struct UsersApi {
    gateway: Arc<ApiGateway>,
}

impl UsersApi {
    pub fn new(gateway: Arc<ApiGateway>) -> Self {
        Self { gateway }
    }

    pub async fn profile(&self) -> Result<UserProfile, ApiError> {
        self.gateway
            .fetch(Method::GET, "/users/profile", RequestOptions::new())
            .await
    }

    /// Returns the server's confirmation message.
    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<Option<String>, ApiError> {
        update.validate()?;
        let options = RequestOptions::new().json(update)?;
        self.gateway
            .execute(Method::PUT, "/users/profile", options)
            .await
    }

    pub async fn ratings(&self, page: PageRequest) -> Result<RatingsPage, ApiError> {
        let mut ratings: RatingsPage = self
            .gateway
            .fetch(
                Method::GET,
                "/users/ratings",
                RequestOptions::new().params(page.to_params()),
            )
            .await?;
        ratings.pagination = ratings.pagination.normalized();
        Ok(ratings)
    }

    pub async fn reading_list(&self, page: PageRequest) -> Result<ReadingListPage, ApiError> {
        let mut list: ReadingListPage = self
            .gateway
            .fetch(
                Method::GET,
                "/users/to-read",
                RequestOptions::new().params(page.to_params()),
            )
            .await?;
        list.pagination = list.pagination.normalized();
        Ok(list)
    }

    /// Whether `book_id` is anywhere on the reading list, walking every page.
    pub async fn reading_list_contains(
        &self,
        book_id: BookId,
        per_page: u32,
    ) -> Result<bool, ApiError> {
        let mut request = PageRequest::first(per_page);
        loop {
            let page = self.reading_list(request).await?;
            if page.entries.iter().any(|entry| entry.book_id == book_id) {
                return Ok(true);
            }
            if page.entries.is_empty() || request.page >= page.pagination.pages {
                return Ok(false);
            }
            request = request.next();
        }
    }

    pub async fn add_to_reading_list(
        &self,
        book_id: BookId,
    ) -> Result<ReadingListAddition, ApiError> {
        self.gateway
            .fetch(
                Method::POST,
                &format!("/users/to-read/{}", book_id),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn remove_from_reading_list(&self, book_id: BookId) -> Result<Option<String>, ApiError> {
        self.gateway
            .execute(
                Method::DELETE,
                &format!("/users/to-read/{}", book_id),
                RequestOptions::new(),
            )
            .await
    }

    pub async fn stats(&self) -> Result<UserStats, ApiError> {
        self.gateway
            .fetch(Method::GET, "/users/stats", RequestOptions::new())
            .await
    }

    pub async fn activity(&self, page: PageRequest) -> Result<Vec<ActivityEntry>, ApiError> {
        self.gateway
            .fetch(
                Method::GET,
                "/users/activity",
                RequestOptions::new().params(page.to_params()),
            )
            .await
    }
}
