use anyhow::Result;
use httpmock::prelude::*;
use serde_json::json;
use shopify_gql::core::GraphqlTransport;
use shopify_gql::utils::validation::Validate;
use shopify_gql::{
    ClassifiedResponse, GraphqlRequest, OutcomeKind, ShopifyClient, ShopifyError, TomlConfig,
};

const ORDERS_QUERY: &str = "query Orders($first: Int!) { orders(first: $first) { edges { node { id name } } } }";

fn config_for(server: &MockServer) -> Result<TomlConfig> {
    let config = TomlConfig::from_toml_str(&format!(
        r#"
[shop]
api_version = "2024-10"
access_token = "shpat_test"

[client]
endpoint = "{}"
timeout_seconds = 5
"#,
        server.url("/graphql")
    ))?;
    config.validate()?;
    Ok(config)
}

fn orders_request() -> GraphqlRequest {
    GraphqlRequest::new(ORDERS_QUERY).with_variables(json!({"first": 1}))
}

#[tokio::test]
async fn test_execute_classifies_full_result() -> Result<()> {
    let server = MockServer::start_async().await;
    let data = json!({"orders": {"edges": [{"node": {"id": "gid://shopify/Order/1", "name": "#43262"}}]}});

    let api_mock = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/graphql")
                .header("x-shopify-access-token", "shpat_test")
                .json_body(json!({"query": ORDERS_QUERY, "variables": {"first": 1}}));
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(json!({"data": data.clone()}));
        })
        .await;

    let client = ShopifyClient::new(config_for(&server)?)?;
    let classified = client.execute(&orders_request()).await?;

    api_mock.assert_async().await;
    assert_eq!(classified, ClassifiedResponse::Ok(data));
    Ok(())
}

#[tokio::test]
async fn test_send_returns_raw_status_and_body() -> Result<()> {
    let server = MockServer::start_async().await;
    let body = json!({"errors": "[API] Invalid API key or access token (unrecognized login or wrong password)"});

    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(401).json_body(body.clone());
        })
        .await;

    let client = ShopifyClient::new(config_for(&server)?)?;
    let response = client.send(&orders_request()).await?;

    assert_eq!(response.http_status, 401);
    assert_eq!(response.body, body);
    Ok(())
}

#[tokio::test]
async fn test_execute_access_denied() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(200).json_body(json!({
                "errors": [{"message": "Access denied for orders field.", "extensions": {"code": "ACCESS_DENIED"}}],
                "data": null
            }));
        })
        .await;

    let client = ShopifyClient::new(config_for(&server)?)?;
    let classified = client.execute(&orders_request()).await?;

    assert_eq!(classified.kind(), OutcomeKind::Forbidden);
    assert_eq!(
        classified.messages(),
        vec!["Access denied for orders field.".to_string()]
    );
    Ok(())
}

#[tokio::test]
async fn test_execute_server_error_is_unknown() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(503).json_body(json!({"errors": "Service Unavailable"}));
        })
        .await;

    let client = ShopifyClient::new(config_for(&server)?)?;
    let classified = client.execute(&orders_request()).await?;

    assert_eq!(
        classified,
        ClassifiedResponse::Unknown {
            http_status: 503,
            body: json!({"errors": "Service Unavailable"})
        }
    );
    Ok(())
}

#[tokio::test]
async fn test_non_json_body_is_transport_error() -> Result<()> {
    let server = MockServer::start_async().await;

    server
        .mock_async(|when, then| {
            when.method(POST).path("/graphql");
            then.status(502)
                .header("Content-Type", "text/html")
                .body("<html><body>Bad Gateway</body></html>");
        })
        .await;

    let client = ShopifyClient::new(config_for(&server)?)?;
    let result = client.execute(&orders_request()).await;

    match result {
        Err(ShopifyError::InvalidResponseBody { status, .. }) => assert_eq!(status, 502),
        other => panic!("expected InvalidResponseBody, got {:?}", other),
    }
    Ok(())
}
