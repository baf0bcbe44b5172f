use csync::api::mock::ScriptedTransport;
use csync::domain::config::{ApiConfig, Credentials};
use csync::domain::{ErrorKind, RecordId};
use csync::features::forms::{CoreFields, CustomValue, FormModel, serialize};
use csync::{Session, SessionError};
use serde_json::{Value, json};
use std::sync::Arc;
use std::time::Duration;

fn config() -> ApiConfig {
    ApiConfig {
        base_url: "https://crm.test".into(),
        username: "ops".into(),
        password: "secret".into(),
        per_page: 2,
        ..ApiConfig::default()
    }
}

fn session_with(config: ApiConfig, transport: &Arc<ScriptedTransport>) -> Session {
    Session::builder().config(config).transport(transport.clone()).build().expect("session builds")
}

fn connected(transport: &Arc<ScriptedTransport>) -> Session {
    let session = session_with(config(), transport);
    transport.push_json(200, &json!([]));
    session.test_connection().expect("connection succeeds");
    session
}

fn ids(records: &[csync::domain::Record]) -> Vec<String> {
    records.iter().map(|r| r.id().to_string()).collect()
}

#[test]
fn data_calls_wait_for_a_verified_connection() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = session_with(config(), &transport);

    let err = session.records().unwrap_err();
    assert!(matches!(err, SessionError::NotAuthenticated { .. }));
    assert_eq!(transport.request_count(), 0);

    let errors = session.errors();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].kind, ErrorKind::NotAuthenticated);
}

#[test]
fn connection_test_needs_both_credentials() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = session_with(ApiConfig { password: "  ".into(), ..config() }, &transport);

    let err = session.test_connection().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(transport.request_count(), 0);
    assert!(!session.is_authenticated());
}

#[test]
fn connection_test_uses_connect_timeout() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    assert!(session.is_authenticated());

    let sent = &transport.requests()[0];
    assert_eq!(sent.url, "https://crm.test/wp-json/fluent-crm/v2/subscribers");
    assert_eq!(sent.timeout, Duration::from_secs(10));
    assert_eq!(sent.credentials, Credentials::new("ops", "secret"));
}

#[test]
fn connection_failures_are_classified() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);

    transport.push_raw(401, r#"{"code":"rest_forbidden"}"#);
    let err = session.test_connection().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Auth);
    assert!(!session.is_authenticated());

    transport.push_raw(404, "<html>missing</html>");
    let err = session.test_connection().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    assert!(err.to_string().contains("https://crm.test"));

    let err = session.test_connection().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
}

#[test]
fn records_are_fetched_once_then_served_from_cache() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    transport
        .push_json(200, &json!({"data": [{"id": 1}, {"id": 2}], "current_page": 1, "last_page": 2}))
        .push_json(200, &json!({"data": [{"id": 3}], "current_page": 2, "last_page": 2}));

    let first = session.load_records().unwrap();
    assert!(!first.from_cache);
    assert_eq!(ids(&first.records), ["1", "2", "3"]);
    assert_eq!(transport.request_count(), 3);

    let page = &transport.requests()[1];
    assert_eq!(page.query_param("per_page"), Some("2"));
    assert_eq!(page.query_param("page"), Some("1"));
    assert_eq!(page.query_param("custom_fields"), Some("true"));

    let second = session.load_records().unwrap();
    assert!(second.from_cache);
    assert!(Arc::ptr_eq(&first.records, &second.records));
    assert_eq!(transport.request_count(), 3);
}

#[test]
fn partial_results_are_returned_but_not_cached() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    transport
        .push_json(200, &json!({"data": [{"id": 1}, {"id": 2}], "current_page": 1, "last_page": 3}))
        .push_raw(500, "upstream exploded");

    let partial = session.load_records().unwrap();
    assert_eq!(ids(&partial.records), ["1", "2"]);
    assert_eq!(partial.degraded.as_ref().map(SessionError::kind), Some(ErrorKind::Status));
    assert!(session.errors().iter().any(|e| e.kind == ErrorKind::Status));

    transport.push_json(200, &json!([{"id": 9}]));
    let retry = session.load_records().unwrap();
    assert!(!retry.from_cache);
    assert_eq!(ids(&retry.records), ["9"]);
}

#[test]
fn failure_before_any_record_is_an_error() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    transport.push_raw(200, "<html>maintenance</html>");

    let err = session.load_records().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[test]
fn invalid_entries_are_dropped_and_logged() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    transport.push_json(200, &json!([{"id": 1}, {"name": "no id"}, {"id": 3}]));

    let set = session.load_records().unwrap();
    assert_eq!(ids(&set.records), ["1", "3"]);
    assert_eq!(set.dropped, 1);
    assert!(set.degraded.is_none());

    let logged: Vec<_> =
        session.errors().into_iter().filter(|e| e.kind == ErrorKind::InvalidRecord).collect();
    assert_eq!(logged.len(), 1);
}

#[test]
fn refresh_and_reconnect_drop_the_cache() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    transport.push_json(200, &json!([{"id": 1}]));
    session.load_records().unwrap();

    transport.push_json(200, &json!([{"id": 1}, {"id": 2}]));
    assert_eq!(session.refresh().unwrap().len(), 2);

    transport.push_json(200, &json!([])).push_json(200, &json!([{"id": 7}]));
    session.test_connection().unwrap();
    assert_eq!(ids(&session.records().unwrap()), ["7"]);
}

#[test]
fn created_contact_invalidates_records() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    transport.push_json(200, &json!([{"id": 1}]));
    session.records().unwrap();

    let core = CoreFields::builder().email("new@example.com").first_name("New").build();
    let payload = serialize(&core, Vec::<(String, CustomValue)>::new(), &[], &[]).unwrap();
    transport.push_json(201, &json!({"contact": {"id": 2, "email": "new@example.com"}}));

    let created = session.create_contact(&payload).unwrap();
    assert_eq!(created["contact"]["id"], 2);

    let post = transport.requests().pop().unwrap();
    assert_eq!(
        post.body,
        Some(json!({"email": "new@example.com", "status": "subscribed", "first_name": "New"}))
    );

    transport.push_json(200, &json!([{"id": 1}, {"id": 2}]));
    assert_eq!(session.records().unwrap().len(), 2);
}

#[test]
fn rejected_creation_is_classified() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    let core = CoreFields::builder().email("dup@example.com").build();
    let payload = serialize(&core, Vec::<(String, CustomValue)>::new(), &[], &[]).unwrap();

    transport.push_raw(422, r#"{"message":"email exists"}"#);
    let err = session.create_contact(&payload).unwrap_err();
    assert!(matches!(err, SessionError::Status { status: 422, .. }));

    transport.push_raw(200, "created!");
    let err = session.create_contact(&payload).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MalformedResponse);
}

#[test]
fn form_validation_happens_before_the_network() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    let form = FormModel::build(&[], Vec::new(), Vec::new());
    let before = transport.request_count();

    let core = CoreFields::builder().email("   ").build();
    let err = session.submit_form(&form, &core, Vec::new(), &[], &[]).unwrap_err();
    assert_eq!(err.to_string(), "Validation error: Email is required");

    let core = CoreFields::builder().email("a@b.com").build();
    let err =
        session.submit_form(&form, &core, Vec::new(), &[RecordId::Number(4)], &[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
    assert_eq!(transport.request_count(), before);
}

#[test]
fn form_model_combines_schemas_and_catalogs() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    transport
        .push_json(
            200,
            &json!({"fields": [
                {"slug": "size", "label": "Size", "type": "select-one", "options": ["S", "M"]},
                {"label": "No slug", "type": "text"}
            ]}),
        )
        .push_raw(500, "tags unavailable")
        .push_json(200, &json!({"data": [{"id": 3, "title": "Newsletter"}]}));

    let form = session.form_model().unwrap();
    assert_eq!(form.inputs().len(), 1);
    assert!(form.tags().is_empty());
    assert_eq!(form.lists()[0].title, "Newsletter");
    assert!(session.errors().iter().any(|e| e.kind == ErrorKind::Status));

    let before = transport.request_count();
    session.field_schemas().unwrap();
    assert_eq!(transport.request_count(), before);
}

#[test]
fn error_log_keeps_the_latest_hundred() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = session_with(config(), &transport);

    for _ in 0..105 {
        let _ = session.records();
    }
    assert_eq!(session.errors().len(), 100);
}

#[test]
fn changing_settings_requires_a_new_connection_test() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = connected(&transport);

    session.set_base_url("https://other.test").unwrap();
    assert!(!session.is_authenticated());
    assert_eq!(session.settings().base_url, "https://other.test");

    transport.push_json(200, &json!([]));
    session.test_connection().unwrap();
    session.set_credentials(Credentials::new("ops", "rotated")).unwrap();
    assert!(!session.is_authenticated());

    session.set_per_page(0);
    session.set_max_records(Some(50));
    assert_eq!(session.settings().per_page, 1);
    assert_eq!(session.settings().max_records, Some(50));

    let err = session.set_base_url("ftp://nope").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Transport);
    assert_eq!(session.settings().base_url, "https://other.test");
}

#[test]
fn changing_the_record_ceiling_drops_the_cache() {
    let transport = Arc::new(ScriptedTransport::new());
    let mut session = connected(&transport);
    let first_page = json!({"data": [{"id": 1}, {"id": 2}], "current_page": 1, "last_page": 2});

    session.set_max_records(Some(1));
    transport.push_json(200, &first_page);
    let capped = session.load_records().unwrap();
    assert_eq!(ids(&capped.records), ["1"]);
    assert!(capped.degraded.is_none());

    session.set_max_records(Some(1));
    assert!(session.load_records().unwrap().from_cache);

    session.set_max_records(None);
    transport
        .push_json(200, &first_page)
        .push_json(200, &json!({"data": [{"id": 3}], "current_page": 2, "last_page": 2}));
    let full = session.load_records().unwrap();
    assert!(!full.from_cache);
    assert_eq!(ids(&full.records), ["1", "2", "3"]);
}

#[test]
fn exports_render_loaded_contacts() {
    let transport = Arc::new(ScriptedTransport::new());
    let session = connected(&transport);
    transport.push_json(
        200,
        &json!([
            {"id": 1, "full_name": "Ada", "email": "ada@example.com", "status": "subscribed"},
            {"id": 2, "full_name": "Grace"},
            {"id": 3, "email": "anon@example.com"}
        ]),
    );

    let all = session.export_all().unwrap();
    assert!(all.file_name.starts_with("all_contacts_"));
    let parsed: Vec<Value> = serde_json::from_slice(&all.bytes).unwrap();
    assert_eq!(parsed.len(), 3);
    assert_eq!(parsed[1], json!({"id": 2, "full_name": "Grace"}));
    assert!(all.download_link("Download").contains("data:file/json;base64,"));

    let workflow = session.export_workflow(&[RecordId::Number(3), RecordId::Number(1)]).unwrap();
    let graph: Value = serde_json::from_slice(&workflow.bytes).unwrap();
    assert_eq!(graph["nodes"][0]["name"], "Contact: Ada");
    assert_eq!(graph["nodes"][1]["name"], "Contact: Unknown");
    assert_eq!(graph["connections"]["contact_0"]["main"][0][0]["node"], "contact_1");

    let one = session.export_contact(&RecordId::Number(2)).unwrap();
    assert_eq!(one.file_name, "contact_2.json");

    let dir = tempfile::tempdir().unwrap();
    let path = one.write_to(dir.path()).unwrap();
    assert_eq!(std::fs::read(path).unwrap(), one.bytes);

    let err = session.export_contact(&RecordId::Number(99)).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
    let err = session.export_workflow(&[]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);

    assert_eq!(transport.request_count(), 2);
}
