//! End-to-end session lifecycle flows against the mock admin backend.

use std::sync::Arc;
use std::sync::atomic::Ordering;

use http::StatusCode;

use admin_session::{
    ApiError, ApiRequest, AuthConfig, AuthFlowError, AuthStack, ExchangeError,
    InMemorySessionStore, MultipartField, SessionStore,
};

use crate::common::test_server::MockBackend;
use crate::common::{TEST_API_KEY, TestProvider, test_identity_session};

pub fn stack_against(
    backend: &MockBackend,
) -> (Arc<AuthStack>, Arc<TestProvider>, Arc<dyn SessionStore>) {
    let provider = Arc::new(TestProvider::new());
    let store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());
    let config = AuthConfig {
        base_url: backend.base_url.clone(),
        api_key: TEST_API_KEY.to_string(),
        sign_in_route: "/login".to_string(),
        landing_route: "/dashboard".to_string(),
    };
    let stack = Arc::new(AuthStack::new(config, provider.clone(), store.clone()));
    (stack, provider, store)
}

#[tokio::test]
async fn test_sign_in_persists_session_for_provider_uid() {
    let backend = MockBackend::spawn().await;
    let (stack, _provider, store) = stack_against(&backend);

    let session = stack
        .sign_in(test_identity_session(), "hunter2", true)
        .await
        .expect("sign-in should succeed");

    assert_eq!(session.issued_for_uid, "uid-42");

    let persisted = store
        .get()
        .expect("get should succeed")
        .expect("a session should be persisted");
    assert_eq!(persisted.uid, "uid-42");
    assert_eq!(persisted.admin_token, session.token);
    assert!(persisted.remember_me);

    // Display claims come straight out of the token payload.
    let display = session.display.expect("display claims should decode");
    assert_eq!(display.email.as_deref(), Some("admin@example.com"));
    assert_eq!(display.name.as_deref(), Some("Admin"));
}

#[tokio::test]
async fn test_rejected_login_leaves_store_untouched() {
    let backend = MockBackend::spawn().await;
    let (stack, _provider, store) = stack_against(&backend);
    backend.state.reject_login.store(true, Ordering::SeqCst);

    let result = stack
        .sign_in(test_identity_session(), "wrong-password", true)
        .await;

    match result {
        Err(AuthFlowError::Exchange(ExchangeError::LoginRejected(reason))) => {
            assert_eq!(reason, "Invalid admin credentials");
        }
        other => panic!("Expected LoginRejected, got {other:?}"),
    }
    assert_eq!(store.get().expect("get should succeed"), None);
    assert!(stack.identity().current().is_none());
}

#[tokio::test]
async fn test_malformed_login_response_is_a_rejection_without_partial_write() {
    let backend = MockBackend::spawn().await;
    let (stack, _provider, store) = stack_against(&backend);
    backend.state.malformed_login.store(true, Ordering::SeqCst);

    let result = stack.sign_in(test_identity_session(), "hunter2", true).await;

    match result {
        Err(AuthFlowError::Exchange(ExchangeError::LoginRejected(reason))) => {
            assert!(reason.contains("malformed login response"), "reason: {reason}");
        }
        other => panic!("Expected LoginRejected, got {other:?}"),
    }
    assert_eq!(store.get().expect("get should succeed"), None);
}

#[tokio::test]
async fn test_authorized_call_passes_through() {
    let backend = MockBackend::spawn().await;
    let (stack, _provider, _store) = stack_against(&backend);
    stack
        .sign_in(test_identity_session(), "hunter2", true)
        .await
        .expect("sign-in should succeed");

    let response = stack
        .api()
        .execute(&ApiRequest::get("/api/admin/stats"))
        .await
        .expect("authorized call should succeed");

    assert_eq!(response.status, StatusCode::OK);
    let body: serde_json::Value = response.json().expect("body should parse");
    assert_eq!(body["status"], true);
    assert_eq!(body["data"]["listeners"], 120);
}

#[tokio::test]
async fn test_unauthenticated_call_fails_fast_without_reaching_backend() {
    let backend = MockBackend::spawn().await;
    let (stack, _provider, _store) = stack_against(&backend);

    let result = stack
        .api()
        .execute(&ApiRequest::get("/api/admin/stats"))
        .await;

    assert!(matches!(result, Err(ApiError::Unauthenticated)));
    assert_eq!(backend.state.protected_hits(), 0);
}

#[tokio::test]
async fn test_expired_session_is_renewed_transparently() {
    let backend = MockBackend::spawn().await;
    let (stack, provider, store) = stack_against(&backend);
    stack
        .sign_in(test_identity_session(), "hunter2", true)
        .await
        .expect("sign-in should succeed");
    backend.state.expire_session();

    let response = stack
        .api()
        .execute(&ApiRequest::get("/api/admin/stats"))
        .await
        .expect("the caller should never see the intermediate 401");

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(provider.mints(), 1);
    // Initial sign-in plus exactly one renewal exchange.
    assert_eq!(backend.state.logins(), 2);
    // The renewed token is what is persisted now.
    let persisted = store
        .get()
        .expect("get should succeed")
        .expect("renewed session should be persisted");
    assert!(persisted.remember_me);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_expiry_coalesces_into_single_renewal() {
    let backend = MockBackend::spawn().await;
    let (stack, provider, _store) = stack_against(&backend);
    stack
        .sign_in(test_identity_session(), "hunter2", true)
        .await
        .expect("sign-in should succeed");
    backend.state.expire_session();

    let mut handles = Vec::new();
    for _ in 0..5 {
        let stack = stack.clone();
        handles.push(tokio::spawn(async move {
            stack.api().execute(&ApiRequest::get("/api/admin/stats")).await
        }));
    }

    for handle in handles {
        let response = handle
            .await
            .expect("task should not panic")
            .expect("every caller should resolve via the renewed session");
        assert_eq!(response.status, StatusCode::OK);
    }

    // One provider-token mint and one renewal exchange, no refresh storm.
    assert_eq!(provider.mints(), 1);
    assert_eq!(backend.state.logins(), 2);
}

#[tokio::test]
async fn test_expiry_without_remember_me_forces_single_logout() {
    let backend = MockBackend::spawn().await;
    let (stack, provider, store) = stack_against(&backend);
    stack
        .sign_in(test_identity_session(), "hunter2", false)
        .await
        .expect("sign-in should succeed");
    backend.state.expire_session();

    // Count sign-out events as the guard would see them. The immediate
    // snapshot still carries the signed-in session, so it does not count.
    let sign_out_events = Arc::new(std::sync::atomic::AtomicUsize::new(0));
    let counter = sign_out_events.clone();
    let _subscription = stack.identity().subscribe(move |event| {
        if event.session.is_none() {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    });

    let result = stack
        .api()
        .execute(&ApiRequest::get("/api/admin/stats"))
        .await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert_eq!(store.get().expect("get should succeed"), None);
    assert!(stack.identity().current().is_none());
    // No silent recovery was attempted, and exactly one sign-out was announced.
    assert_eq!(provider.mints(), 0);
    assert_eq!(provider.sign_outs(), 1);
    assert_eq!(sign_out_events.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_non_expiry_401_passes_through_without_side_effects() {
    let backend = MockBackend::spawn().await;
    let (stack, provider, store) = stack_against(&backend);
    stack
        .sign_in(test_identity_session(), "hunter2", true)
        .await
        .expect("sign-in should succeed");
    let persisted_before = store.get().expect("get should succeed");

    let result = stack
        .api()
        .execute(&ApiRequest::get("/api/admin/blocked"))
        .await;

    match result {
        Err(ApiError::Unauthorized(body)) => assert!(body.contains("ip blocked")),
        other => panic!("Expected Unauthorized passthrough, got {other:?}"),
    }
    // Neither a renewal nor a logout happened.
    assert_eq!(provider.mints(), 0);
    assert_eq!(provider.sign_outs(), 0);
    assert_eq!(store.get().expect("get should succeed"), persisted_before);
    assert!(stack.identity().current().is_some());
}

#[tokio::test]
async fn test_failed_renewal_signs_out_and_surfaces_session_expired() {
    let backend = MockBackend::spawn().await;
    let (stack, provider, store) = stack_against(&backend);
    stack
        .sign_in(test_identity_session(), "hunter2", true)
        .await
        .expect("sign-in should succeed");
    backend.state.expire_session();
    provider.fail_mint.store(true, Ordering::SeqCst);

    let result = stack
        .api()
        .execute(&ApiRequest::get("/api/admin/stats"))
        .await;

    assert!(matches!(result, Err(ApiError::SessionExpired)));
    assert_eq!(store.get().expect("get should succeed"), None);
    assert!(stack.identity().current().is_none());
}

#[tokio::test]
async fn test_multipart_upload_lets_the_transport_set_the_boundary() {
    let backend = MockBackend::spawn().await;
    let (stack, _provider, _store) = stack_against(&backend);
    stack
        .sign_in(test_identity_session(), "hunter2", true)
        .await
        .expect("sign-in should succeed");

    let request = ApiRequest::post_multipart(
        "/api/admin/banners",
        vec![
            MultipartField::text("title", "summer promo"),
            MultipartField::file("image", "promo.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]),
        ],
    );
    let response = stack
        .api()
        .execute(&request)
        .await
        .expect("upload should succeed");

    assert_eq!(response.status, StatusCode::OK);
    let body: serde_json::Value = response.json().expect("body should parse");
    let content_type = body["data"].as_str().expect("echoed content type");
    assert!(
        content_type.starts_with("multipart/form-data; boundary="),
        "content type: {content_type}"
    );
}

#[tokio::test]
async fn test_resume_mints_a_fresh_backend_session() {
    let backend = MockBackend::spawn().await;
    let (stack, _provider, store) = stack_against(&backend);

    let session = stack
        .resume(test_identity_session(), true)
        .await
        .expect("resume should succeed");

    assert_eq!(session.issued_for_uid, "uid-42");
    let persisted = store
        .get()
        .expect("get should succeed")
        .expect("resumed session should be persisted");
    assert_eq!(persisted.admin_token, session.token);
    assert!(stack.identity().current().is_some());
}
