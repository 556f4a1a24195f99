use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

use crate::error::GameError;
use crate::types::{CategoryDetail, CategorySummary};

#[cfg(test)]
pub(crate) mod fake;

/// Where boards get their categories and clues from.
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Up to `count` candidate categories.
    async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>, GameError>;

    /// The full clue list for one category.
    async fn get_category_detail(&self, id: u64) -> Result<CategoryDetail, GameError>;
}

/// HTTP client for the jService API.
#[derive(Debug, Clone)]
pub struct JServiceClient {
    client: Client,
    base_url: String,
}

impl JServiceClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, GameError> {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl DataSource for JServiceClient {
    async fn list_categories(&self, count: usize) -> Result<Vec<CategorySummary>, GameError> {
        let response = self
            .client
            .get(format!("{}categories", self.base_url))
            .query(&[("count", count)])
            .send()
            .await?
            .error_for_status()?;

        let categories: Vec<CategorySummary> = response.json().await?;
        log::debug!("Received {} candidate categories", categories.len());
        Ok(categories)
    }

    async fn get_category_detail(&self, id: u64) -> Result<CategoryDetail, GameError> {
        let response = self
            .client
            .get(format!("{}category", self.base_url))
            .query(&[("id", id)])
            .send()
            .await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Err(GameError::NotFound(id));
        }

        let detail: Option<CategoryDetail> = response.error_for_status()?.json().await?;
        detail.ok_or(GameError::NotFound(id))
    }
}
