use crate::domain::model::{GraphqlRequest, RawApiResponse};
use crate::utils::error::Result;
use async_trait::async_trait;

pub trait ConfigProvider: Send + Sync {
    fn graphql_endpoint(&self) -> String;
    fn access_token(&self) -> &str;
    fn timeout_seconds(&self) -> u64;
    fn user_agent(&self) -> Option<&str> {
        None
    }
}

/// Produces the `(status, body)` pair the classifier consumes. Retries,
/// caching and rate limiting are the implementor's business, not the
/// classifier's.
#[async_trait]
pub trait GraphqlTransport: Send + Sync {
    async fn send(&self, request: &GraphqlRequest) -> Result<RawApiResponse>;
}
