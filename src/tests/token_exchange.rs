// End-to-end exchange against a mocked Lark endpoint through the real reqwest client.

#[cfg(test)]
mod tests {
    use httpmock::Method::POST;
    use httpmock::MockServer;
    use serde_json::json;
    use std::collections::HashMap;

    use crate::node::error::{ItemError, RequestFailure};
    use crate::node::{InputItem, NodeDescription, TokenRequester};
    use crate::tests::common::{build_reqwest_client, credential_items, item_parameters};

    const TOKEN_PATH: &str = "/open-apis/auth/v3/tenant_access_token/internal";

    #[tokio::test]
    async fn sends_exact_body_and_forwards_response_verbatim() {
        let server = MockServer::start_async().await;
        let upstream = json!({"code": 0, "tenant_access_token": "t-123", "expire": 7200});
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .header("content-type", "application/json")
                    .body(r#"{"app_id":"cli_abc","app_secret":"secretXYZ"}"#);
                then.status(200)
                    .header("Content-Type", "application/json")
                    .json_body(upstream.clone());
            })
            .await;

        let items = credential_items(&[("cli_abc", "secretXYZ")]);
        let node_values = HashMap::new();
        let description = NodeDescription::lark_authentication();
        let params = item_parameters(&items, &node_values, &description);
        let requester = TokenRequester::with_url(build_reqwest_client(), server.url(TOKEN_PATH));

        let output = requester.process(&items, &params, false).await.unwrap();

        mock.assert_async().await;
        assert_eq!(output.len(), 1);
        assert_eq!(output[0].json, upstream);
    }

    #[tokio::test]
    async fn node_level_parameters_fill_items_without_credentials() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path(TOKEN_PATH)
                    .json_body(json!({"app_id": "cli_node", "app_secret": "node_secret"}));
                then.status(200).json_body(json!({"code": 0, "tenant_access_token": "t-node", "expire": 60}));
            })
            .await;

        let items = vec![InputItem::default()];
        let node_values = HashMap::from([
            ("app_id".to_string(), "cli_node".to_string()),
            ("app_secret".to_string(), "node_secret".to_string()),
        ]);
        let description = NodeDescription::lark_authentication();
        let params = item_parameters(&items, &node_values, &description);
        let requester = TokenRequester::with_url(build_reqwest_client(), server.url(TOKEN_PATH));

        let output = requester.process(&items, &params, false).await.unwrap();

        mock.assert_async().await;
        assert_eq!(output[0].json["tenant_access_token"], json!("t-node"));
    }

    #[tokio::test]
    async fn http_400_aborts_with_upstream_message() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(400)
                    .header("Content-Type", "application/json")
                    .json_body(json!({"code": 10003, "msg": "invalid param"}));
            })
            .await;

        let items = credential_items(&[("cli_bad", "nope"), ("cli_next", "never_sent")]);
        let node_values = HashMap::new();
        let description = NodeDescription::lark_authentication();
        let params = item_parameters(&items, &node_values, &description);
        let requester = TokenRequester::with_url(build_reqwest_client(), server.url(TOKEN_PATH));

        let err = requester.process(&items, &params, false).await.unwrap_err();

        assert_eq!(err.item_index, 0);
        assert_eq!(err.node_name, "Lark Authentication");
        assert!(err.to_string().contains("invalid param"), "got: {}", err);
        assert!(err.to_string().contains("400"), "got: {}", err);
        assert!(matches!(
            err.source,
            ItemError::Request(RequestFailure::Status { .. })
        ));
    }

    #[tokio::test]
    async fn http_400_becomes_error_item_when_continuing() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH).json_body(json!({"app_id": "cli_bad", "app_secret": "nope"}));
                then.status(400).json_body(json!({"code": 10003, "msg": "invalid param"}));
            })
            .await;
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH).json_body(json!({"app_id": "cli_ok", "app_secret": "fine"}));
                then.status(200).json_body(json!({"code": 0, "tenant_access_token": "t-ok", "expire": 7200}));
            })
            .await;

        let items = credential_items(&[("cli_bad", "nope"), ("cli_ok", "fine")]);
        let node_values = HashMap::new();
        let description = NodeDescription::lark_authentication();
        let params = item_parameters(&items, &node_values, &description);
        let requester = TokenRequester::with_url(build_reqwest_client(), server.url(TOKEN_PATH));

        let output = requester.process(&items, &params, true).await.unwrap();

        assert_eq!(output.len(), 2);
        assert_eq!(
            output[0].json,
            json!({"error": "Request failed with status code 400: invalid param"})
        );
        assert_eq!(output[1].json["tenant_access_token"], json!("t-ok"));
    }

    #[tokio::test]
    async fn lark_business_error_is_forwarded_not_failed() {
        let server = MockServer::start_async().await;
        let upstream = json!({"code": 10014, "msg": "app secret invalid"});
        server
            .mock_async(|when, then| {
                when.method(POST).path(TOKEN_PATH);
                then.status(200).json_body(upstream.clone());
            })
            .await;

        let items = credential_items(&[("cli_abc", "wrong")]);
        let node_values = HashMap::new();
        let description = NodeDescription::lark_authentication();
        let params = item_parameters(&items, &node_values, &description);
        let requester = TokenRequester::with_url(build_reqwest_client(), server.url(TOKEN_PATH));

        let output = requester.process(&items, &params, false).await.unwrap();
        assert_eq!(output[0].json, upstream);
    }
}
