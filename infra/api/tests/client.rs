use csync_api::mock::ScriptedTransport;
use csync_api::{ApiClient, ApiRequest, Method, RequestError};
use csync_domain::config::{ApiConfig, Credentials};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::builder()
        .base_url("https://crm.test")
        .credentials(Credentials::new("ops", "pw"))
        .timeout(Duration::from_secs(15))
        .transport(transport.clone())
        .build()
        .expect("client builds")
}

#[test]
fn get_carries_auth_query_and_timeout() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, &json!({"data": []}));

    let response = client(&transport)
        .send(ApiRequest::get("subscribers").query("per_page", 100).query("page", 1))
        .unwrap();
    assert!(response.is_success());

    let requests = transport.requests();
    assert_eq!(requests.len(), 1);
    let sent = &requests[0];
    assert_eq!(sent.method, Method::Get);
    assert_eq!(sent.url, "https://crm.test/wp-json/fluent-crm/v2/subscribers");
    assert_eq!(sent.query_param("per_page"), Some("100"));
    assert_eq!(sent.query_param("page"), Some("1"));
    assert_eq!(sent.credentials, Credentials::new("ops", "pw"));
    assert_eq!(sent.timeout, Duration::from_secs(15));
    assert!(sent.body.is_none());
}

#[test]
fn non_success_status_is_returned_not_raised() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_raw(401, "{\"code\":\"rest_forbidden\"}");

    let response = client(&transport).request("subscribers", Method::Get, None, None).unwrap();
    assert_eq!(response.status, 401);
    assert!(!response.is_success());
}

#[test]
fn post_sends_json_body_and_timeout_override() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(201, &json!({"contact": {"id": 5}}));

    let body = json!({"email": "a@b.co", "status": "subscribed"});
    let response = client(&transport)
        .request("subscribers", Method::Post, Some(body.clone()), Some(Duration::from_secs(3)))
        .unwrap();
    assert_eq!(response.status, 201);

    let sent = &transport.requests()[0];
    assert_eq!(sent.method, Method::Post);
    assert_eq!(sent.body, Some(body));
    assert_eq!(sent.timeout, Duration::from_secs(3));
}

#[test]
fn transport_errors_propagate_unchanged() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_error(RequestError::timeout("read timed out"));
    transport.push_error(RequestError::connection("refused"));

    let api = client(&transport);
    let first = api.send(ApiRequest::get("tags")).unwrap_err();
    assert!(matches!(first, RequestError::Timeout { .. }));
    let second = api.send(ApiRequest::get("lists")).unwrap_err();
    assert!(matches!(second, RequestError::ConnectionFailure { .. }));
    assert_eq!(transport.request_count(), 2, "no retries");
}

#[test]
fn responder_answers_after_script_runs_out() {
    let transport = Arc::new(ScriptedTransport::with_responder(|request| {
        Ok(csync_api::RawResponse::new(200, format!("\"{}\"", request.url)))
    }));
    transport.push_raw(404, "");

    let api = client(&transport);
    assert_eq!(api.send(ApiRequest::get("tags")).unwrap().status, 404);
    let echoed = api.send(ApiRequest::get("lists")).unwrap().json().unwrap();
    assert_eq!(echoed, json!("https://crm.test/wp-json/fluent-crm/v2/lists"));
}

#[test]
fn config_seeds_builder() {
    let transport = Arc::new(ScriptedTransport::new());
    let config = ApiConfig {
        base_url: "http://localhost:9000/".into(),
        api_prefix: "api".into(),
        timeout_secs: 7,
        ..ApiConfig::default()
    };

    let api = ApiClient::builder().config(&config).transport(transport).build().unwrap();
    assert_eq!(api.root().as_str(), "http://localhost:9000/api/");
    assert_eq!(api.timeout(), Duration::from_secs(7));
    assert!(!api.credentials().is_complete());
}

#[test]
fn empty_credentials_are_still_attached() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, &json!([]));

    let api = ApiClient::builder()
        .base_url("https://crm.test")
        .transport(transport.clone())
        .build()
        .unwrap();
    api.send(ApiRequest::get("tags")).unwrap();
    assert_eq!(transport.requests()[0].credentials, Credentials::default());
}

#[test]
fn error_context_is_rendered() {
    use csync_api::RequestErrorExt;

    let result: Result<(), RequestError> = Err(RequestError::protocol("bad gateway framing"));
    let err = result.context("Fetching page 2").unwrap_err();
    assert_eq!(err.to_string(), "Protocol error (Fetching page 2): bad gateway framing");
}
