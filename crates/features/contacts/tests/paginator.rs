use csync_api::mock::ScriptedTransport;
use csync_api::{ApiClient, RawResponse, RequestError};
use csync_contacts::{FetchError, Paginator, StopReason};
use csync_domain::RecordId;
use proptest::prelude::*;
use serde_json::{Value, json};
use std::sync::Arc;

fn client(transport: &Arc<ScriptedTransport>) -> ApiClient {
    ApiClient::builder()
        .base_url("https://crm.test")
        .transport(transport.clone())
        .build()
        .expect("client builds")
}

fn contacts(range: std::ops::Range<i64>) -> Vec<Value> {
    range.map(|id| json!({"id": id, "email": format!("c{id}@crm.test")})).collect()
}

fn page(data: Vec<Value>, current: u64, last: u64) -> Value {
    json!({"data": data, "current_page": current, "last_page": last, "total": 0})
}

fn ids(records: &[csync_domain::Record]) -> Vec<i64> {
    records
        .iter()
        .map(|r| match r.id() {
            RecordId::Number(n) => *n,
            RecordId::Text(t) => panic!("unexpected text id {t}"),
        })
        .collect()
}

#[test]
fn walks_until_last_page() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .push_json(200, &page(contacts(0..2), 1, 3))
        .push_json(200, &page(contacts(2..4), 2, 3))
        .push_json(200, &page(contacts(4..5), 3, 3));

    let api = client(&transport);
    let mut progress = Vec::new();
    let outcome = Paginator::new(&api, "subscribers")
        .per_page(2)
        .query("custom_fields", true)
        .fetch_all_with(|p| progress.push(p.fetched));

    assert!(matches!(outcome.stop, StopReason::LastPage));
    assert!(outcome.is_complete());
    assert_eq!(ids(&outcome.records), vec![0, 1, 2, 3, 4]);
    assert_eq!(outcome.pages, 3);
    assert_eq!(progress, vec![2, 4, 5]);

    let requests = transport.requests();
    let pages: Vec<_> = requests.iter().filter_map(|r| r.query_param("page")).collect();
    assert_eq!(pages, vec!["1", "2", "3"]);
    assert!(requests.iter().all(|r| r.query_param("per_page") == Some("2")));
    assert!(requests.iter().all(|r| r.query_param("custom_fields") == Some("true")));
}

#[test]
fn failure_keeps_earlier_pages() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, &page(contacts(0..3), 1, 4)).push_raw(500, "upstream exploded");

    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert_eq!(ids(&outcome.records), vec![0, 1, 2]);
    assert!(!outcome.is_complete());
    match outcome.error() {
        Some(FetchError::Status { status, body, .. }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "upstream exploded");
        },
        other => panic!("expected status error, got {other:?}"),
    }
    assert_eq!(outcome.error().and_then(FetchError::status_code), Some(500));
}

#[test]
fn transport_and_parse_failures_are_partial_results() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .push_json(200, &page(contacts(0..1), 1, 9))
        .push_error(RequestError::timeout("read timed out"));
    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert_eq!(outcome.records.len(), 1);
    assert!(matches!(outcome.error(), Some(FetchError::Request { .. })));
    assert_eq!(outcome.error().and_then(FetchError::status_code), None);

    let transport = Arc::new(ScriptedTransport::new());
    transport.push_raw(200, "<html>maintenance</html>");
    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert!(outcome.records.is_empty());
    assert!(matches!(outcome.error(), Some(FetchError::Malformed { .. })));
}

#[test]
fn bare_array_is_one_complete_page() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, &Value::Array(contacts(0..4)));

    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert!(matches!(outcome.stop, StopReason::SinglePage));
    assert_eq!(outcome.records.len(), 4);
    assert_eq!(transport.request_count(), 1);
}

#[test]
fn empty_page_ends_the_loop() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(200, &page(contacts(0..2), 1, 10)).push_json(200, &page(vec![], 2, 10));

    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert!(matches!(outcome.stop, StopReason::Exhausted));
    assert_eq!(outcome.records.len(), 2);
    assert_eq!(transport.request_count(), 2);
}

#[test]
fn max_records_truncates_to_earliest() {
    let transport = Arc::new(ScriptedTransport::with_responder(|request| {
        let n: i64 = request.query_param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        let body = page(contacts((n - 1) * 10..n * 10), n as u64, 50);
        Ok(RawResponse::new(200, body.to_string()))
    }));

    let outcome =
        Paginator::new(&client(&transport), "subscribers").per_page(10).max_records(Some(25)).fetch_all();
    assert!(matches!(outcome.stop, StopReason::MaxRecords));
    assert_eq!(ids(&outcome.records), (0..25).collect::<Vec<_>>());
    assert_eq!(transport.request_count(), 3);
}

#[test]
fn zero_max_records_makes_no_request() {
    let transport = Arc::new(ScriptedTransport::new());
    let outcome = Paginator::new(&client(&transport), "subscribers").max_records(Some(0)).fetch_all();
    assert!(outcome.records.is_empty());
    assert_eq!(transport.request_count(), 0);
}

#[test]
fn invalid_entries_are_dropped_not_fatal() {
    let transport = Arc::new(ScriptedTransport::new());
    transport.push_json(
        200,
        &page(vec![json!({"id": 1}), json!({"email": "x@y.z"}), json!("junk"), json!({"id": 3})], 1, 1),
    );

    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert_eq!(ids(&outcome.records), vec![1, 3]);
    assert_eq!(outcome.rejected.len(), 2);
}

#[test]
fn duplicates_are_kept_and_reported() {
    let transport = Arc::new(ScriptedTransport::new());
    transport
        .push_json(200, &page(contacts(0..2), 1, 2))
        .push_json(200, &page(contacts(1..3), 2, 2));

    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert_eq!(ids(&outcome.records), vec![0, 1, 1, 2]);
    assert_eq!(outcome.duplicate_ids, vec![RecordId::Number(1)]);
}

#[test]
fn server_ignoring_page_stops_on_the_first_repeat() {
    let transport = Arc::new(ScriptedTransport::with_responder(|_| {
        let body = json!({"data": [{"id": 1}, {"id": 2}], "current_page": 1, "last_page": 999_999});
        Ok(RawResponse::new(200, body.to_string()))
    }));

    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert!(matches!(outcome.stop, StopReason::Exhausted));
    assert!(outcome.is_complete());
    assert_eq!(transport.request_count(), 2);
    assert_eq!(ids(&outcome.records), vec![1, 2]);
    assert_eq!(outcome.duplicate_ids, vec![RecordId::Number(1), RecordId::Number(2)]);
}

#[test]
fn runaway_metadata_hits_the_page_ceiling() {
    let transport = Arc::new(ScriptedTransport::with_responder(|request| {
        let n: i64 = request.query_param("page").and_then(|p| p.parse().ok()).unwrap_or(1);
        // Always claims more pages and always returns a fresh record.
        let body = json!({"data": [{"id": n}], "current_page": 1, "last_page": 999_999});
        Ok(RawResponse::new(200, body.to_string()))
    }));

    let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
    assert!(matches!(outcome.stop, StopReason::PageCeiling));
    assert!(!outcome.is_complete());
    assert_eq!(transport.request_count(), 1000);
    assert_eq!(outcome.records.len(), 1000);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn terminates_within_needed_pages(
        sizes in prop::collection::vec(0usize..5, 1..12),
        claimed_last in 1u64..20,
        max_records in prop::option::of(0usize..30),
    ) {
        let pages: Vec<Value> = {
            let mut next_id = 0i64;
            sizes
                .iter()
                .enumerate()
                .map(|(i, &size)| {
                    let data = contacts(next_id..next_id + size as i64);
                    next_id += size as i64;
                    page(data, i as u64 + 1, claimed_last)
                })
                .collect()
        };
        let transport = Arc::new(ScriptedTransport::new());
        for body in &pages {
            transport.push_json(200, body);
        }

        let outcome = Paginator::new(&client(&transport), "subscribers").fetch_all();
        let calls = transport.request_count();

        // Never asks past the reported last page, never past the first empty page.
        prop_assert!(calls as u64 <= claimed_last);
        let first_empty = sizes.iter().position(|&s| s == 0).map_or(usize::MAX, |p| p + 1);
        prop_assert!(calls <= first_empty);
        // Running out of script means a connection failure, which also stops the loop.
        prop_assert!(calls <= pages.len() + 1);

        let expected: usize = sizes.iter().take(calls.min(pages.len())).sum();
        prop_assert_eq!(outcome.records.len(), expected);

        if let Some(max) = max_records {
            let transport = Arc::new(ScriptedTransport::new());
            for body in &pages {
                transport.push_json(200, body);
            }
            let limited = Paginator::new(&client(&transport), "subscribers")
                .max_records(Some(max))
                .fetch_all();
            prop_assert!(limited.records.len() <= max);
            let prefix: Vec<_> = outcome.records.iter().take(max).map(|r| r.id().clone()).collect();
            let got: Vec<_> = limited.records.iter().map(|r| r.id().clone()).collect();
            prop_assert_eq!(&got[..], &prefix[..got.len()]);
        }
    }
}
