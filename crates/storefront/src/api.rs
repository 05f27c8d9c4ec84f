//! Client for the remote catalog API.
//!
//! Thin JSON wrapper over the product/review/order/auth endpoints. Every
//! call is a single attempt; the [`Shop`](crate::shop::Shop) controller
//! decides what a failure means (local fallback, advisory notice), never
//! this layer.

use mirai_core::{Email, OrderDraft, OrderId, OrderStatus, Product, ProductDraft, ProductId, Review, ReviewDraft};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use thiserror::Error;
use url::Url;

/// Errors from a remote catalog call.
///
/// Anything in here is `RemoteUnavailable` territory for the controller:
/// the interface must keep working on local state.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("API returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },

    /// The response body was not the expected JSON.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A request URL could not be built from the configured base.
    #[error("invalid API URL: {0}")]
    Url(#[from] url::ParseError),
}

impl ApiError {
    /// Whether the failure was a rejected request rather than an unreachable
    /// service (used to distinguish bad credentials from a dead network).
    #[must_use]
    pub const fn is_rejection(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

/// Successful login payload.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub email: Email,
}

/// Acknowledgement of a captured order.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderReceipt {
    pub id: OrderId,
    pub status: OrderStatus,
}

/// HTTP client for the catalog API.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    client: reqwest::Client,
    base: Url,
}

impl CatalogClient {
    /// Create a client for the API at `base`.
    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            client: reqwest::Client::new(),
            base,
        }
    }

    /// The configured API base URL.
    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        Ok(self.base.join(path)?)
    }

    /// Fetch the full product collection, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the API is unreachable or answers abnormally.
    pub async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.client.get(self.endpoint("/api/products")?).send().await?;
        read_json(response).await
    }

    /// Fetch the review collection, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] if the API is unreachable or answers abnormally.
    pub async fn fetch_reviews(&self) -> Result<Vec<Review>, ApiError> {
        let response = self.client.get(self.endpoint("/api/reviews")?).send().await?;
        read_json(response).await
    }

    /// Create a product; requires an admin bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or rejection (401, 400).
    pub async fn create_product(
        &self,
        draft: &ProductDraft,
        token: &str,
    ) -> Result<Product, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/products")?)
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        read_json(response).await
    }

    /// Replace a product; requires an admin bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or rejection (401, 404).
    pub async fn update_product(
        &self,
        id: ProductId,
        draft: &ProductDraft,
        token: &str,
    ) -> Result<Product, ApiError> {
        let response = self
            .client
            .put(self.endpoint(&format!("/api/products/{id}"))?)
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        read_json(response).await
    }

    /// Delete a product; requires an admin bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or rejection (401, 404).
    pub async fn delete_product(&self, id: ProductId, token: &str) -> Result<(), ApiError> {
        let response = self
            .client
            .delete(self.endpoint(&format!("/api/products/{id}"))?)
            .bearer_auth(token)
            .send()
            .await?;
        check_status(response).await?;
        Ok(())
    }

    /// Submit a review (no authentication).
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or rejection (400, 429).
    pub async fn create_review(&self, draft: &ReviewDraft) -> Result<Review, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/reviews")?)
            .json(draft)
            .send()
            .await?;
        read_json(response).await
    }

    /// Submit an order for record keeping.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] on transport failure or rejection (400, 429).
    pub async fn create_order(&self, draft: &OrderDraft) -> Result<OrderReceipt, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/orders")?)
            .json(draft)
            .send()
            .await?;
        read_json(response).await
    }

    /// Exchange admin credentials for a bearer token.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`]; a 401 means bad credentials, anything else an
    /// unreachable or misbehaving API.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let response = self
            .client
            .post(self.endpoint("/api/auth/login")?)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        read_json(response).await
    }
}

/// Reject non-success statuses, capturing a trimmed body for diagnostics.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message: String = response
        .text()
        .await
        .unwrap_or_default()
        .chars()
        .take(200)
        .collect();
    Err(ApiError::Status { status, message })
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let response = check_status(response).await?;
    let body = response.text().await?;
    Ok(serde_json::from_str(&body)?)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_against_base() {
        let client = CatalogClient::new(Url::parse("http://127.0.0.1:4000/").unwrap());
        let url = client.endpoint("/api/products/7").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:4000/api/products/7");
    }

    #[tokio::test]
    async fn test_unreachable_api_is_an_error() {
        // Nothing listens on port 9; a connect error must surface as Http.
        let client = CatalogClient::new(Url::parse("http://127.0.0.1:9/").unwrap());
        let err = client.fetch_products().await.unwrap_err();
        assert!(matches!(err, ApiError::Http(_)));
        assert!(!err.is_rejection());
    }
}
