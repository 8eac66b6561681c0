//! Integration tests for the page aggregator
//!
//! Drives `PageAggregator` against a scripted executor to pin down the
//! request sequence of the paging protocol and the supplementary queries.

mod support;

use std::sync::Arc;

use serde_json::{json, Value};
use studyreport_core::PageAggregator;
use studyreport_domain::{EntityId, HttpMethod, RecordListing, StudyError};
use support::{page, session, ScriptedExecutor};

const BASE: &str = "https://service.test/api-org";

fn aggregator(executor: &ScriptedExecutor) -> PageAggregator {
    PageAggregator::new(Arc::new(executor.clone()), BASE, 1000)
}

/// totalPages = 3 leads to pages 1, 1, 2, 3 and one concatenated dataset.
#[tokio::test]
async fn three_pages_fetch_page_one_twice_and_concatenate_in_order() {
    let executor = ScriptedExecutor::new()
        .ok(page(3, 1, 2))
        .ok(page(3, 1, 2))
        .ok(page(3, 3, 2))
        .ok(page(3, 5, 1));

    let records = aggregator(&executor)
        .fetch_all(RecordListing::Finished, &session(), &EntityId::from(68), None)
        .await
        .expect("aggregation should succeed");

    assert_eq!(executor.pages_requested(), vec![1, 1, 2, 3]);
    let ids: Vec<_> = records.iter().map(|r| r.text("id")).collect();
    assert_eq!(ids, vec!["1", "2", "3", "4", "5"]);
}

/// For any N >= 1 the aggregator issues exactly N + 1 requests.
#[tokio::test]
async fn request_count_is_pages_plus_one() {
    for total in 1..=5u32 {
        let mut executor = ScriptedExecutor::new().ok(page(total, 0, 3));
        for p in 1..=total {
            executor = executor.ok(page(total, u64::from(p) * 10, 3));
        }

        let records = aggregator(&executor)
            .fetch_all(RecordListing::Unfinished, &session(), &EntityId::from(68), None)
            .await
            .expect("aggregation should succeed");

        assert_eq!(executor.requests().len(), total as usize + 1);
        assert_eq!(records.len(), total as usize * 3);
    }
}

/// Page requests carry the listing path, paging body, token and cookies.
#[tokio::test]
async fn page_requests_are_authorized_posts_with_paging_body() {
    let executor = ScriptedExecutor::new().ok(page(1, 1, 1)).ok(page(1, 1, 1));
    let parent = EntityId::from("9001");

    aggregator(&executor)
        .fetch_all(RecordListing::Unfinished, &session(), &EntityId::from(68), Some(&parent))
        .await
        .expect("aggregation should succeed");

    let requests = executor.requests();
    let last = requests.last().expect("requests recorded");
    assert_eq!(last.method, HttpMethod::Post);
    assert_eq!(last.url, format!("{BASE}/record/getUserNotFinishRecording"));
    assert_eq!(
        last.body,
        Some(json!({ "classId": 68, "pageSize": 1000, "currentPage": 1, "parentId": "9001" }))
    );
    assert!(last.headers.contains(&("Authorization".to_string(), "T".to_string())));
    assert_eq!(last.cookies.as_ref().and_then(|c| c.get("sid")), Some("X"));
}

/// A page that exhausts its retries fails the whole aggregation.
#[tokio::test]
async fn failing_page_aborts_aggregation() {
    let executor = ScriptedExecutor::new()
        .ok(page(2, 1, 1))
        .ok(page(2, 1, 1))
        .err(StudyError::MaxRetriesExceeded {
            attempts: 3,
            source: Box::new(StudyError::Transport("HTTP error: 502".into())),
        });

    let result = aggregator(&executor)
        .fetch_all(RecordListing::Finished, &session(), &EntityId::from(68), None)
        .await;

    assert!(matches!(result, Err(StudyError::MaxRetriesExceeded { attempts: 3, .. })));
    assert_eq!(executor.requests().len(), 3);
}

#[tokio::test]
async fn zero_pages_yields_empty_dataset_after_probe() {
    let executor =
        ScriptedExecutor::new().ok(json!({ "page": { "totalPages": 0 }, "data": null }));

    let records = aggregator(&executor)
        .fetch_all(RecordListing::Finished, &session(), &EntityId::from(68), None)
        .await
        .expect("aggregation should succeed");

    assert!(records.is_empty());
    assert_eq!(executor.requests().len(), 1);
}

#[tokio::test]
async fn hierarchy_maps_ids_to_names_from_org_class_record() {
    let executor = ScriptedExecutor::new().ok(json!([
        { "id": "11", "orgName": "一班", "allNum": 40, "num": 30, "occupancy": 75.0 },
        { "id": "12", "orgName": "二班", "allNum": 20, "num": 20, "occupancy": 100.0 }
    ]));

    let hierarchy = aggregator(&executor)
        .org_hierarchy(&session(), &EntityId::from(68))
        .await
        .expect("hierarchy should load");

    assert_eq!(hierarchy.name_for("12"), Some("二班"));
    assert_eq!(hierarchy.summary("一班").map(|s| s.num), Some(30));

    let request = &executor.requests()[0];
    assert_eq!(request.url, format!("{BASE}/record/getOrgClassRecord"));
    assert_eq!(request.body, Some(json!({ "classId": 68 })));
}

#[tokio::test]
async fn supplementary_queries_decode_payloads() {
    let executor = ScriptedExecutor::new()
        .ok(json!({ "members": 2398, "cadre": 120, "orgNum": 45 }))
        .ok(json!({ "parentIdName": "南昌团委", "orgName": "学院团委", "num": 2398 }))
        .ok(json!([
            { "id": 68, "title": "2024年第2期", "theme": "青春", "startTime": "2024-03-26 11:00:00",
              "endTime": "2024-04-02 23:59:59", "url": "https://h5.test/m.html" },
            { "id": 67, "title": "2024年第1期", "theme": "奋进" }
        ]))
        .ok(json!({ "id": "68", "allNum": 2398, "num": 2097, "title": "2024年第2期",
                    "orgName": "学院团委", "occupancy": 87.45 }));
    let agg = aggregator(&executor);
    let s = session();

    assert_eq!(agg.org_numbers(&s).await.expect("numbers").org_num, 45);
    assert_eq!(agg.org_detail(&s).await.expect("detail").parent_id_name, "南昌团委");
    let catalog = agg.classes(&s).await.expect("classes");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.get(0).map(|c| c.end_time.as_str()), Some("2024-04-02 23:59:59"));
    let progress = agg.class_progress(&s, &EntityId::from(68)).await.expect("progress");
    assert_eq!(progress.num, 2097);

    let requests = executor.requests();
    assert!(requests.iter().all(|r| r.headers.iter().any(|(k, _)| k == "Authorization")));
    assert_eq!(requests[0].method, HttpMethod::Get);
    assert_eq!(requests[3].query_pairs(), vec![("classId".to_string(), "68".to_string())]);
}

#[tokio::test]
async fn malformed_payload_is_invalid_response() {
    let executor = ScriptedExecutor::new().ok(json!("not an object"));

    let result = aggregator(&executor).org_numbers(&session()).await;

    assert!(matches!(result, Err(StudyError::InvalidResponse(_))));
}

/// One row with null or textual numbers must not sink the whole hierarchy.
#[tokio::test]
async fn loosely_typed_summary_rows_read_as_defaults() {
    let executor = ScriptedExecutor::new().ok(json!([
        { "id": "11", "orgName": "一班", "allNum": 40, "num": 30, "occupancy": 75.0 },
        { "id": "12", "orgName": "二班", "allNum": "20", "num": null, "occupancy": null },
        { "id": 13, "orgName": null, "allNum": 8, "num": 6, "occupancy": "75.00" },
        null
    ]));

    let hierarchy = aggregator(&executor)
        .org_hierarchy(&session(), &EntityId::from(68))
        .await
        .expect("hierarchy should tolerate loose rows");

    assert_eq!(hierarchy.summaries().len(), 3);
    let second = hierarchy.summary("二班").expect("second row kept");
    assert_eq!((second.all_num, second.num, second.occupancy), (20, 0, 0.0));
    let third = hierarchy.summary("").expect("nameless row kept");
    assert_eq!(third.occupancy, 75.0);
    assert_eq!(hierarchy.name_for("13"), Some(""));
}

#[tokio::test]
async fn null_payloads_read_as_empty() {
    let executor = ScriptedExecutor::new().ok(Value::Null).ok(Value::Null);
    let agg = aggregator(&executor);

    let numbers = agg.org_numbers(&session()).await.expect("null numbers decode");
    assert_eq!(numbers.members, 0);
    assert!(agg.classes(&session()).await.expect("null class list decodes").is_empty());
}
