use super::*;

#[test]
fn normalize_client_name_trims() {
    assert_eq!(normalize_client_name("  uptime-1 ").unwrap(), "uptime-1");
}

#[test]
fn normalize_client_name_rejects_blank_and_overlong() {
    assert!(matches!(normalize_client_name("   "), Err(StatusError::InvalidClientName)));
    assert!(matches!(
        normalize_client_name(&"x".repeat(201)),
        Err(StatusError::InvalidClientName)
    ));
    assert!(normalize_client_name(&"x".repeat(200)).is_ok());
}

#[test]
fn status_check_serializes_rfc3339_timestamp() {
    let check = StatusCheck {
        id: Uuid::nil(),
        client_name: "uptime".into(),
        timestamp: OffsetDateTime::UNIX_EPOCH,
    };
    let json = serde_json::to_value(&check).unwrap();
    assert_eq!(json["client_name"], "uptime");
    assert_eq!(json["timestamp"], "1970-01-01T00:00:00Z");
}

#[test]
fn error_codes_are_stable() {
    assert_eq!(StatusError::InvalidClientName.error_code(), "INVALID_CLIENT_NAME");
}

#[tokio::test]
async fn create_rejects_blank_name_without_touching_db() {
    let state = crate::state::test_helpers::test_app_state();
    let err = create_status_check(&state.pool, " ").await.unwrap_err();
    assert!(matches!(err, StatusError::InvalidClientName));
}

// =============================================================================
// LIVE DATABASE
// =============================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn create_then_list_returns_oldest_first() {
    let _guard = crate::state::test_helpers::LIVE_DB_LOCK.lock().await;
    let pool = crate::state::test_helpers::integration_pool().await;

    let first = create_status_check(&pool, " uptime-1 ").await.unwrap();
    assert_eq!(first.client_name, "uptime-1");
    sqlx::query("UPDATE status_checks SET created_at = now() - interval '1 minute' WHERE id = $1")
        .bind(first.id)
        .execute(&pool)
        .await
        .expect("backdate should succeed");
    let second = create_status_check(&pool, "uptime-2").await.unwrap();

    let listed = list_status_checks(&pool).await.unwrap();
    let ids: Vec<Uuid> = listed.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn list_status_checks_caps_at_one_thousand() {
    let _guard = crate::state::test_helpers::LIVE_DB_LOCK.lock().await;
    let pool = crate::state::test_helpers::integration_pool().await;

    sqlx::query(
        "INSERT INTO status_checks (id, client_name)
         SELECT gen_random_uuid(), 'bulk-' || g FROM generate_series(1, 1001) AS g",
    )
    .execute(&pool)
    .await
    .expect("bulk insert should succeed");

    assert_eq!(list_status_checks(&pool).await.unwrap().len(), 1000);
}
