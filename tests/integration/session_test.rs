use std::time::Duration;

use pgscribe::common::ScribeError;
use pgscribe::ServiceOptions;

#[path = "../common/mod.rs"]
mod common;

use common::{credentials, shop_service};

#[tokio::test]
async fn test_scope_defaults_to_public_after_connect() {
    let (service, _) = shop_service(ServiceOptions::default());
    assert_eq!(service.session().scope().schemas(), ["public".to_string()]);

    service.connect(&credentials()).await.unwrap();
    assert!(service.session().is_connected());
    assert_eq!(service.session().scope().schemas(), ["public".to_string()]);
}

#[tokio::test]
async fn test_reconnect_keeps_one_live_handle() {
    let (service, connector) = shop_service(ServiceOptions::default());

    service.connect(&credentials()).await.unwrap();
    let first = service.resolve_schemas().await.unwrap();
    let first_scope = service.session().scope();

    service.connect(&credentials()).await.unwrap();
    assert_eq!(connector.connect_count(), 2);
    assert_eq!(connector.db.open_handles(), 1);
    // Reconnect resets the scope until schemas are resolved again
    assert_eq!(service.session().scope().schemas(), ["public".to_string()]);

    let second = service.resolve_schemas().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first_scope, service.session().scope());
}

#[tokio::test]
async fn test_resolve_drops_reserved_schemas() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let schemas = service.resolve_schemas().await.unwrap();
    assert_eq!(schemas, vec!["public".to_string(), "sales".to_string()]);
    assert!(service.session().scope().contains("sales"));
}

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    let (service, connector) = shop_service(ServiceOptions::default());

    service.disconnect().await;
    assert!(!service.session().is_connected());

    service.connect(&credentials()).await.unwrap();
    service.disconnect().await;
    service.disconnect().await;
    assert!(!service.session().is_connected());
    assert_eq!(connector.db.open_handles(), 0);
}

#[tokio::test]
async fn test_not_connected_short_circuits() {
    let (service, connector) = shop_service(ServiceOptions::default());

    assert!(matches!(service.resolve_schemas().await, Err(ScribeError::NotConnected)));
    assert!(matches!(service.list_tables(None).await, Err(ScribeError::NotConnected)));
    assert!(matches!(service.columns("users").await, Err(ScribeError::NotConnected)));
    assert!(matches!(service.ddl("users").await, Err(ScribeError::NotConnected)));
    assert!(matches!(service.dml("users", Some(2)).await, Err(ScribeError::NotConnected)));
    // Table name validation comes after the connection check
    assert!(matches!(service.ddl("").await, Err(ScribeError::NotConnected)));

    assert_eq!(connector.db.query_count(), 0);
}

#[tokio::test]
async fn test_failed_connect_leaves_session_disconnected() {
    let (service, connector) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    connector.set_refuse(true);
    let err = service.connect(&credentials()).await.unwrap_err();
    assert!(matches!(err, ScribeError::Connection(_)));
    assert!(!service.session().is_connected());
    assert_eq!(connector.db.open_handles(), 0);
    assert!(matches!(service.list_tables(None).await, Err(ScribeError::NotConnected)));

    connector.set_refuse(false);
    service.connect(&credentials()).await.unwrap();
    assert_eq!(service.list_tables(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_query_timeout_leaves_session_usable() {
    let options = ServiceOptions {
        query_timeout: Duration::from_millis(50),
        ..ServiceOptions::default()
    };
    let (service, connector) = shop_service(options);
    service.connect(&credentials()).await.unwrap();

    connector.db.set_query_delay(Some(Duration::from_millis(500)));
    let err = service.list_tables(None).await.unwrap_err();
    assert!(matches!(err, ScribeError::Timeout(_)));
    assert!(service.session().is_connected());

    connector.db.set_query_delay(None);
    assert_eq!(service.list_tables(None).await.unwrap().len(), 3);
}

#[tokio::test]
async fn test_query_failure_does_not_touch_handle() {
    let (service, connector) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    connector.db.fail_queries.store(true, std::sync::atomic::Ordering::SeqCst);
    assert!(matches!(service.ddl("users").await, Err(ScribeError::MetadataQuery(_))));
    assert!(service.session().is_connected());
    assert_eq!(connector.connect_count(), 1);
}

#[tokio::test]
async fn test_concurrent_reads_during_reconnect() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let mut handles = Vec::new();
    for i in 0..8 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            if i % 4 == 0 {
                service.connect(&credentials()).await.map(|_| ())
            } else {
                service.ddl("users").await.map(|_| ())
            }
        }));
    }
    for handle in handles {
        let result = handle.await.unwrap();
        // Reads racing a reconnect either succeed or find no connection
        assert!(matches!(result, Ok(()) | Err(ScribeError::NotConnected) | Err(ScribeError::MetadataQuery(_))));
    }
    assert!(service.session().is_connected());
}
