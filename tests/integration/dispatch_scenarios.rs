//! End-to-end dispatch through the registrar with a spy remote service.

use crate::integration::test_utils::{dispatch, SpyReply, SpyService};

#[test]
fn test_unauthenticated_account_never_calls_remote() {
    let spy = SpyService::new(SpyReply::Succeed);
    let run = dispatch(&["stratus", "account"], false, spy.clone());

    assert_eq!(run.code, 1);
    assert_eq!(spy.calls(), 0, "auth gate must run before the remote call");
    assert!(run.stdout.is_empty());
    assert!(run.stderr.contains("Missing credentials"));
    assert!(run.stderr.contains("STRATUS_API_KEY"));
}

#[test]
fn test_authenticated_account_human_output() {
    let spy = SpyService::new(SpyReply::Succeed);
    let run = dispatch(&["stratus", "account"], true, spy.clone());

    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    assert_eq!(spy.calls(), 1);
    assert!(run.stdout.contains("user@example.com"));
    assert!(run.stdout.contains("-120.50"));
    assert!(run.stderr.is_empty());
}

#[test]
fn test_transport_error_is_reported_with_cause() {
    let spy = SpyService::new(SpyReply::Fail("connection reset by peer"));
    let run = dispatch(&["stratus", "account"], true, spy.clone());

    assert_eq!(run.code, 1);
    assert_eq!(spy.calls(), 1, "exactly one call, no retry");
    assert!(run.stdout.is_empty(), "no partial output on failure");
    assert!(run
        .stderr
        .contains("Error getting account information: connection reset by peer"));
}

#[test]
fn test_unknown_command_prints_help() {
    let spy = SpyService::new(SpyReply::Succeed);
    let run = dispatch(&["stratus", "instances", "list"], true, spy.clone());

    assert_ne!(run.code, 0);
    assert_eq!(spy.calls(), 0);
    assert!(run.stderr.contains("Unknown command 'instances'"));
    assert!(run.stderr.contains("Usage"));
    assert!(run.stderr.contains("account"));
}

#[test]
fn test_regions_list_needs_no_credentials() {
    let spy = SpyService::new(SpyReply::Succeed);
    let run = dispatch(&["stratus", "regions", "list"], false, spy.clone());

    assert_eq!(run.code, 0, "stderr: {}", run.stderr);
    assert_eq!(spy.calls(), 1);
    assert!(run.stdout.contains("No regions found."));
}

#[test]
fn test_invalid_per_page_is_validation_error() {
    let spy = SpyService::new(SpyReply::Succeed);
    let run = dispatch(
        &["stratus", "regions", "list", "--per-page", "1000"],
        false,
        spy.clone(),
    );

    assert_eq!(run.code, 1);
    assert_eq!(spy.calls(), 0);
    assert!(run.stderr.contains("Invalid value for 'per-page'"));
}

#[test]
fn test_structured_error_output() {
    let spy = SpyService::new(SpyReply::Succeed);
    let run = dispatch(&["stratus", "-o", "json", "account"], false, spy);

    assert_eq!(run.code, 1);
    let body: serde_json::Value = serde_json::from_str(&run.stderr).unwrap();
    assert_eq!(body["error"]["kind"], "auth");
    assert_eq!(body["error"]["exit_code"], 1);
}

#[test]
fn test_unknown_output_mode_rejected_before_remote_call() {
    let spy = SpyService::new(SpyReply::Succeed);
    let run = dispatch(&["stratus", "account", "--output", "xml"], true, spy.clone());

    assert_eq!(run.code, 1);
    assert_eq!(spy.calls(), 0);
    assert!(run.stderr.contains("Invalid value for 'output'"));
}
