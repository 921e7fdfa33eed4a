use axum::http::HeaderValue;

use super::*;
use crate::mail::MailError;
use crate::rate_limit::RateLimitError;
use crate::routes::tests::body_json;
use crate::state::test_helpers;

fn headers(pairs: &[(&'static str, &'static str)]) -> HeaderMap {
    let mut map = HeaderMap::new();
    for (name, value) in pairs {
        map.insert(*name, HeaderValue::from_static(value));
    }
    map
}

fn body(name: &str, email: &str, message: &str) -> Json<ContactSubmission> {
    Json(ContactSubmission { name: name.into(), email: email.into(), message: message.into() })
}

#[test]
fn client_key_prefers_real_ip() {
    let map = headers(&[("x-forwarded-for", "203.0.113.7, 10.0.0.1"), ("x-real-ip", "10.0.0.9")]);
    assert_eq!(client_key(&map), "10.0.0.9");
}

#[test]
fn client_key_uses_last_forwarded_entry() {
    // A client can send its own X-Forwarded-For; only the proxy's entry counts.
    let map = headers(&[("x-forwarded-for", "1.2.3.4, 5.6.7.8, 198.51.100.20")]);
    assert_eq!(client_key(&map), "198.51.100.20");

    let spoofed = headers(&[("x-forwarded-for", "1.1.1.1, 198.51.100.20")]);
    let honest = headers(&[("x-forwarded-for", "198.51.100.20")]);
    assert_eq!(client_key(&spoofed), client_key(&honest));
}

#[test]
fn client_key_falls_back_to_anonymous() {
    assert_eq!(client_key(&headers(&[("x-real-ip", " ")])), "anonymous");
    assert_eq!(client_key(&headers(&[("x-forwarded-for", " ")])), "anonymous");
    assert_eq!(client_key(&headers(&[("x-forwarded-for", "10.0.0.1, ")])), "anonymous");
    assert_eq!(client_key(&HeaderMap::new()), "anonymous");
}

#[test]
fn contact_error_to_status_mapping() {
    assert_eq!(contact_error_to_status(&ContactError::InvalidEmail), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        contact_error_to_status(&ContactError::RateLimited(RateLimitError::GlobalExceeded {
            limit: 1,
            window_secs: 60
        })),
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        contact_error_to_status(&ContactError::Db(sqlx::Error::PoolTimedOut)),
        StatusCode::INTERNAL_SERVER_ERROR
    );
    assert_eq!(
        contact_error_to_status(&ContactError::Mail(MailError::Delivery("down".into()))),
        StatusCode::BAD_GATEWAY
    );
}

#[test]
fn bearer_token_parses_authorization_header() {
    assert_eq!(bearer_token(&headers(&[("authorization", "Bearer s3cret")])), Some("s3cret"));
    assert_eq!(bearer_token(&headers(&[("authorization", "Basic abc")])), None);
    assert_eq!(bearer_token(&HeaderMap::new()), None);
}

#[test]
fn tokens_match_requires_exact_token() {
    assert!(tokens_match("s3cret", "s3cret"));
    assert!(!tokens_match("s3cres", "s3cret"));
    assert!(!tokens_match("s3cret-longer", "s3cret"));
    assert!(!tokens_match("", "s3cret"));
}

#[tokio::test]
async fn post_contact_invalid_email_is_422() {
    let state = test_helpers::test_app_state();
    let response = post_contact(
        State(state),
        HeaderMap::new(),
        body("Test User", "spaces in@email.com", "This is a test message"),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json, serde_json::json!({ "ok": false, "error": "INVALID_EMAIL" }));
}

#[tokio::test]
async fn post_contact_blank_message_is_422() {
    let state = test_helpers::test_app_state();
    let response = post_contact(State(state), HeaderMap::new(), body("Test User", "t@example.com", "   ")).await;
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "INVALID_MESSAGE");
}

#[tokio::test]
async fn list_messages_hidden_without_admin_token() {
    let state = test_helpers::test_app_state();
    let response = list_messages(
        State(state),
        headers(&[("authorization", "Bearer anything")]),
        Query(ListQuery::default()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_messages_rejects_wrong_token() {
    let state = test_helpers::test_app_state_with_admin("s3cret");
    let response = list_messages(
        State(state.clone()),
        headers(&[("authorization", "Bearer nope")]),
        Query(ListQuery::default()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = list_messages(
        State(state.clone()),
        headers(&[("authorization", "Bearer s3cret-extra")]),
        Query(ListQuery::default()),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = list_messages(State(state), HeaderMap::new(), Query(ListQuery::default())).await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// LIVE DATABASE
// =============================================================================

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn post_contact_without_mailer_reports_saved() {
    let _guard = test_helpers::LIVE_DB_LOCK.lock().await;
    let pool = test_helpers::integration_pool().await;
    let state = test_helpers::live_app_state(pool, None);

    let response = post_contact(State(state), HeaderMap::new(), body("Sam", "sam@example.com", "hello")).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::json!({ "ok": true, "message": "Message saved" }));
}

#[cfg(feature = "live-db-tests")]
#[tokio::test]
#[ignore = "requires TEST_DATABASE_URL/live Postgres"]
async fn post_contact_mail_failure_is_502() {
    use std::sync::Arc;

    use crate::mail::Mailer;
    use crate::state::test_helpers::CaptureMailer;

    let _guard = test_helpers::LIVE_DB_LOCK.lock().await;
    let pool = test_helpers::integration_pool().await;
    let mailer: Arc<dyn Mailer> = Arc::new(CaptureMailer::new(true));
    let state = test_helpers::live_app_state(pool, Some(mailer));

    let response = post_contact(State(state), HeaderMap::new(), body("Sam", "sam@example.com", "hello")).await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    assert_eq!(body_json(response).await, serde_json::json!({ "ok": false, "error": "MAIL_SEND_FAILED" }));
}
