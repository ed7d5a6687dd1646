use std::time::Duration;

use secrecy::SecretString;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use binance_account_fn::error::AccountFnError;
use binance_account_fn::secrets::{
    DEFAULT_SECRET_ID, ExtensionSecretStore, SecretStore, load_credentials,
};

fn build_store(server: &MockServer) -> ExtensionSecretStore {
    ExtensionSecretStore::new(
        &server.uri(),
        Some(SecretString::from("session-token".to_string())),
        None,
    )
    .unwrap()
}

#[tokio::test]
async fn test_fetches_secret_string() {
    let server = MockServer::start().await;
    let secret_string = r#"{"BINANCE_API_KEY":"ext_key","BINANCE_SECRET_KEY":"ext_secret"}"#;

    Mock::given(method("GET"))
        .and(path("/secretsmanager/get"))
        .and(query_param("secretId", DEFAULT_SECRET_ID))
        .and(header("X-Aws-Parameters-Secrets-Token", "session-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "ARN": "arn:aws:secretsmanager:eu-west-1:123456789012:secret:binance-api-keys-AbCdEf",
            "Name": "binance-api-keys",
            "VersionId": "EXAMPLE1-90ab-cdef-fedc-ba987SECRET1",
            "SecretString": secret_string,
            "VersionStages": ["AWSCURRENT"],
            "CreatedDate": "2024-01-01T00:00:00.000000+00:00"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let store = build_store(&server);
    let credentials = load_credentials(&store, DEFAULT_SECRET_ID).await.unwrap();

    assert_eq!(credentials.api_key, "ext_key");
    assert_eq!(credentials.expose_secret(), "ext_secret");
}

#[tokio::test]
async fn test_not_found_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secretsmanager/get"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let store = build_store(&server);
    assert!(store.get_secret_string(DEFAULT_SECRET_ID).await.unwrap().is_none());

    let err = load_credentials(&store, DEFAULT_SECRET_ID).await.unwrap_err();
    assert!(matches!(err, AccountFnError::CredentialUnavailable { .. }));
}

#[tokio::test]
async fn test_binary_secret_is_unavailable() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secretsmanager/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "Name": "binance-api-keys",
            "SecretBinary": "AAEC"
        })))
        .mount(&server)
        .await;

    let err = load_credentials(&build_store(&server), DEFAULT_SECRET_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, AccountFnError::CredentialUnavailable { .. }));
}

#[tokio::test]
async fn test_extension_failure_is_store_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secretsmanager/get"))
        .respond_with(ResponseTemplate::new(400).set_body_string("missing token"))
        .mount(&server)
        .await;

    let err = build_store(&server)
        .get_secret_string(DEFAULT_SECRET_ID)
        .await
        .unwrap_err();
    assert!(matches!(err, AccountFnError::SecretStore(ref msg) if msg.contains("missing token")));
    assert!(err.is_credential_error());
}

#[tokio::test]
async fn test_unreachable_extension_is_store_error() {
    // Bind then release a port so nothing is listening on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let uri = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);

    let store = ExtensionSecretStore::new(&uri, None, None).unwrap();
    let err = load_credentials(&store, DEFAULT_SECRET_ID).await.unwrap_err();

    assert!(matches!(err, AccountFnError::SecretStore(_)), "got {err:?}");
    assert!(err.is_credential_error());
}

#[tokio::test]
async fn test_slow_extension_hits_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/secretsmanager/get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "SecretString": "{}" }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let store =
        ExtensionSecretStore::new(&server.uri(), None, Some(Duration::from_millis(100))).unwrap();
    let err = store
        .get_secret_string(DEFAULT_SECRET_ID)
        .await
        .unwrap_err();

    assert!(matches!(err, AccountFnError::SecretStore(_)), "got {err:?}");
    assert!(err.is_credential_error());
}
