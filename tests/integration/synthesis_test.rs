use pgscribe::synth::{DdlOptions, ForeignKeyStyle};
use pgscribe::ServiceOptions;

#[path = "../common/mod.rs"]
mod common;

use common::{credentials, shop_service};

/// Undo single-quote doubling on a rendered string literal
fn parse_literal(literal: &str) -> String {
    let inner = literal
        .strip_prefix('\'')
        .and_then(|s| s.strip_suffix('\''))
        .expect("quoted literal");
    inner.replace("''", "'")
}

#[tokio::test]
async fn test_users_ddl() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let ddl = service.ddl("users").await.unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE users (\n  id INTEGER NOT NULL,\n  email VARCHAR(255),\n  PRIMARY KEY (id)\n);"
    );
}

#[tokio::test]
async fn test_ddl_is_deterministic() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let first = service.ddl("orders").await.unwrap();
    let second = service.ddl("orders").await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_orders_ddl_with_foreign_key_and_comment() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let ddl = service.ddl("orders").await.unwrap();
    assert_eq!(
        ddl,
        "CREATE TABLE orders (\n\
         \x20 id INTEGER NOT NULL,\n\
         \x20 customer_id INTEGER,\n\
         \x20 note TEXT,\n\
         \x20 paid BOOLEAN NOT NULL,\n\
         \x20 PRIMARY KEY (id),\n\
         \x20 CONSTRAINT orders_customer_id_fkey FOREIGN KEY (customer_id) REFERENCES users(id)\n\
         );\n\
         \n\
         COMMENT ON COLUMN orders.customer_id IS 'billing id';"
    );
}

#[tokio::test]
async fn test_composite_style_option_flows_through() {
    let options = ServiceOptions {
        ddl: DdlOptions {
            foreign_keys: ForeignKeyStyle::Composite,
        },
        ..ServiceOptions::default()
    };
    let (service, _) = shop_service(options);
    service.connect(&credentials()).await.unwrap();

    // A single-column key renders the same in either style
    let ddl = service.ddl("orders").await.unwrap();
    assert!(ddl.contains("CONSTRAINT orders_customer_id_fkey FOREIGN KEY (customer_id) REFERENCES users(id)"));
}

#[tokio::test]
async fn test_row_limit_is_honored() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let output = service.dml("orders", Some(2)).await.unwrap();
    assert_eq!(output.row_count, 2);
    assert_eq!(output.dml.lines().count(), 2);
    // Rows come back in primary key order
    assert_eq!(
        output.dml,
        "INSERT INTO orders (id, customer_id, note, paid) VALUES (1, 1, 'first', FALSE);\n\
         INSERT INTO orders (id, customer_id, note, paid) VALUES (2, 1, 'second', TRUE);\n"
    );
}

#[tokio::test]
async fn test_default_row_limit() {
    let options = ServiceOptions {
        default_row_limit: 3,
        ..ServiceOptions::default()
    };
    let (service, _) = shop_service(options);
    service.connect(&credentials()).await.unwrap();

    assert_eq!(service.dml("orders", None).await.unwrap().row_count, 3);
    assert_eq!(service.dml("orders", Some(50)).await.unwrap().row_count, 5);
    assert_eq!(service.dml("orders", Some(0)).await.unwrap().dml, "");
}

#[tokio::test]
async fn test_string_escaping_round_trips() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let output = service.dml("orders", Some(3)).await.unwrap();
    let third = output.dml.lines().nth(2).unwrap();
    let values = third
        .split_once(" VALUES (")
        .and_then(|(_, rest)| rest.strip_suffix(");"))
        .expect("values list");
    let note = values.split(", ").nth(2).expect("note literal");
    assert_eq!(note, "'it''s third'");
    assert_eq!(parse_literal(note), "it's third");
}

#[tokio::test]
async fn test_null_values_render_null() {
    let (service, _) = shop_service(ServiceOptions::default());
    service.connect(&credentials()).await.unwrap();

    let output = service.dml("users", None).await.unwrap();
    assert_eq!(
        output.dml,
        "INSERT INTO users (id, email) VALUES (1, 'ann@example.com');\n\
         INSERT INTO users (id, email) VALUES (2, NULL);\n"
    );
}
