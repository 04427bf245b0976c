use crate::core::classifier::classify_response;
use crate::domain::model::{ClassifiedResponse, GraphqlRequest, RawApiResponse};
use crate::domain::ports::{ConfigProvider, GraphqlTransport};
use crate::utils::error::{Result, ShopifyError};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Access-Token";

/// Sends GraphQL documents to a Shopify Admin API endpoint. One request
/// per call; no retries, caching or rate limiting.
pub struct ShopifyClient<C: ConfigProvider> {
    config: C,
    client: Client,
}

impl<C: ConfigProvider> ShopifyClient<C> {
    pub fn new(config: C) -> Result<Self> {
        let mut builder =
            Client::builder().timeout(Duration::from_secs(config.timeout_seconds()));
        if let Some(user_agent) = config.user_agent() {
            builder = builder.user_agent(user_agent.to_string());
        }

        Ok(Self {
            client: builder.build()?,
            config,
        })
    }

    pub fn config(&self) -> &C {
        &self.config
    }

    /// Sends `request` and classifies the response.
    pub async fn execute(&self, request: &GraphqlRequest) -> Result<ClassifiedResponse> {
        let response = self.send(request).await?;
        let classified = classify_response(&response);

        let kind = classified.kind();
        if kind.is_success() {
            tracing::debug!("Response classified as {} (HTTP {})", kind, response.http_status);
        } else {
            tracing::warn!(
                "Response classified as {} (HTTP {}): {}",
                kind,
                response.http_status,
                kind.recovery_hint()
            );
        }

        Ok(classified)
    }
}

#[async_trait]
impl<C: ConfigProvider> GraphqlTransport for ShopifyClient<C> {
    async fn send(&self, request: &GraphqlRequest) -> Result<RawApiResponse> {
        let endpoint = self.config.graphql_endpoint();
        tracing::debug!("Posting GraphQL request to: {}", endpoint);

        let response = self
            .client
            .post(&endpoint)
            .header(ACCESS_TOKEN_HEADER, self.config.access_token())
            .json(request)
            .send()
            .await?;

        let http_status = response.status().as_u16();
        tracing::debug!("API response status: {}", http_status);

        let text = response.text().await?;
        let body = serde_json::from_str(&text).map_err(|e| ShopifyError::InvalidResponseBody {
            status: http_status,
            message: e.to_string(),
        })?;

        Ok(RawApiResponse::new(http_status, body))
    }
}
