use pgscribe::common::ScribeError;
use pgscribe::ServiceOptions;

#[path = "../common/mod.rs"]
mod common;

use common::{credentials, shop_service};

#[tokio::test]
async fn test_search_semantics() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    // "bill" only appears in the comment on orders.customer_id
    assert_eq!(service.list_tables(Some("bill")).await.unwrap(), vec!["orders".to_string()]);
    assert!(service.list_tables(Some("zzz")).await.unwrap().is_empty());

    let all = service.list_tables(None).await.unwrap();
    assert_eq!(
        all,
        vec!["orders".to_string(), "placeholder".to_string(), "users".to_string()]
    );
    assert_eq!(service.list_tables(Some("")).await.unwrap(), all);
    assert_eq!(service.list_tables(Some("   ")).await.unwrap(), all);
}

#[tokio::test]
async fn test_search_matches_column_names_case_insensitively() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    assert_eq!(service.list_tables(Some("EMAIL")).await.unwrap(), vec!["users".to_string()]);
    assert_eq!(
        service.list_tables(Some("id")).await.unwrap(),
        vec!["orders".to_string(), "users".to_string()]
    );
}

#[tokio::test]
async fn test_scope_limits_visible_tables() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    // Before resolution only `public` is in scope
    assert!(!service.list_tables(None).await.unwrap().contains(&"accounts".to_string()));
    assert!(matches!(
        service.ddl("accounts").await,
        Err(ScribeError::TableNotFound { .. })
    ));

    service.resolve_schemas().await.unwrap();
    assert_eq!(
        service.list_tables(None).await.unwrap(),
        vec![
            "accounts".to_string(),
            "orders".to_string(),
            "placeholder".to_string(),
            "users".to_string()
        ]
    );
    assert!(service.ddl("accounts").await.is_ok());
}

#[tokio::test]
async fn test_primary_key_dominates_unique() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();
    service.resolve_schemas().await.unwrap();

    let columns = service.columns("accounts").await.unwrap();
    assert_eq!(columns.len(), 2);
    assert_eq!(columns[0].name, "id");
    assert_eq!(columns[0].key, "PRI");
    assert_eq!(columns[1].name, "code");
    assert_eq!(columns[1].key, "UNI");
    assert_eq!(columns[1].data_type, "character varying(16)");
    assert_eq!(columns[1].null, "NO");
}

#[tokio::test]
async fn test_columns_carry_comments_in_ordinal_order() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let columns = service.columns("orders").await.unwrap();
    let names: Vec<&str> = columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["id", "customer_id", "note", "paid"]);
    assert_eq!(columns[1].comment.as_deref(), Some("billing id"));
    assert_eq!(columns[1].key, "");
    assert!(columns[2].comment.is_none());
}

#[tokio::test]
async fn test_unknown_table_is_not_found() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    match service.columns("ghost").await {
        Err(ScribeError::TableNotFound { table, scope }) => {
            assert_eq!(table, "ghost");
            assert_eq!(scope, "[public]");
        }
        other => panic!("expected TableNotFound, got {:?}", other.map(|c| c.len())),
    }
    assert!(matches!(service.dml("ghost", None).await, Err(ScribeError::TableNotFound { .. })));
}

#[tokio::test]
async fn test_blank_table_name_is_invalid() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    assert!(matches!(service.ddl("  ").await, Err(ScribeError::InvalidRequest(_))));
}

#[tokio::test]
async fn test_table_without_columns_is_described() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    assert!(service.list_tables(None).await.unwrap().contains(&"placeholder".to_string()));
    assert!(service.columns("placeholder").await.unwrap().is_empty());
    assert_eq!(service.ddl("placeholder").await.unwrap(), "CREATE TABLE placeholder (\n\n);");

    let output = service.dml("placeholder", None).await.unwrap();
    assert_eq!(output.row_count, 2);
    assert_eq!(
        output.dml,
        "INSERT INTO placeholder DEFAULT VALUES;\nINSERT INTO placeholder DEFAULT VALUES;\n"
    );
}
