//! 用量统计测试

mod common;

use common::{ScriptedTransport, API_KEY};
use deepl_doc::application::usage::usage;
use deepl_doc::presentation::report::format_usage;
use deepl_doc::{DocError, UsageSnapshot};

#[test]
fn test_percent_with_zero_limit_is_undefined() {
    let snapshot = UsageSnapshot {
        character_count: 10,
        character_limit: 0,
    };
    assert_eq!(snapshot.percent_used(), None);
    assert!(format_usage(&snapshot).contains("undefined"));
}

#[test]
fn test_percent_is_rounded() {
    let snapshot = UsageSnapshot {
        character_count: 125_000,
        character_limit: 500_000,
    };
    assert_eq!(snapshot.percent_used(), Some(25));
    assert_eq!(format_usage(&snapshot), "125000/500000 (25%)");
}

#[tokio::test]
async fn test_usage_query_sends_only_auth_key() {
    let transport =
        ScriptedTransport::standard().json(r#"{"character_count":7,"character_limit":0}"#);

    let snapshot = usage(&transport, API_KEY).await.unwrap();
    assert_eq!(snapshot.percent_used(), None);

    let request = &transport.calls()[0].request;
    assert_eq!(request.path, "usage");
    assert_eq!(request.param("auth_key"), Some(API_KEY));
    assert_eq!(request.param("document_key"), None);
}

#[tokio::test]
async fn test_usage_rejection_is_surfaced() {
    let transport = ScriptedTransport::standard().fail(DocError::ProviderRejected {
        status: 456,
        body: "Quota exceeded".to_string(),
    });

    let err = usage(&transport, API_KEY).await.unwrap_err();
    assert!(matches!(err, DocError::ProviderRejected { status: 456, .. }));
}
