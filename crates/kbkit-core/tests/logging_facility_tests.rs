#![allow(clippy::unwrap_used, clippy::expect_used)]

use kbkit_core::errors::KbError;
use kbkit_core::logging_facility::test_capture::init_test_capture;
use kbkit_core::{log_op_end, log_op_error, log_op_start};

#[test]
fn test_log_op_start_end_recorded() {
    let capture = init_test_capture();

    log_op_start!("facility_start_end");
    log_op_end!("facility_start_end", duration_ms = 5);

    capture.assert_event_exists("facility_start_end", "start");
    capture.assert_event_exists("facility_start_end", "end");

    let end = capture
        .events()
        .into_iter()
        .find(|e| e.op.as_deref() == Some("facility_start_end") && e.event.as_deref() == Some("end"))
        .unwrap();
    assert_eq!(end.fields.get("duration_ms").map(String::as_str), Some("5"));
}

#[test]
fn test_log_op_error_carries_stable_code() {
    let capture = init_test_capture();
    let err = KbError::CacheMiss {
        path: "shard/abc.json".to_string(),
    };

    log_op_error!("facility_error", err, duration_ms = 1, path = "shard/abc.json");

    let matching = capture.count_events(|e| {
        e.op.as_deref() == Some("facility_error")
            && e.event.as_deref() == Some("end_error")
            && e.level == tracing::Level::ERROR
            && e.fields.get("err.code").map(String::as_str) == Some("ERR_NOT_FOUND")
            && e.fields.get("path").map(String::as_str) == Some("shard/abc.json")
    });
    assert_eq!(matching, 1);
}

#[test]
fn test_log_op_start_with_fields() {
    let capture = init_test_capture();

    log_op_start!("facility_fields", source = "docs/a.md");

    let matching = capture.count_events(|e| {
        e.op.as_deref() == Some("facility_fields")
            && e.fields.get("source").map(String::as_str) == Some("docs/a.md")
    });
    assert_eq!(matching, 1);
}
