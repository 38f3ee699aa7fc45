//! Tests for the user registration handler.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use actix_web::http::{Method, StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use rstest::rstest;
use serde_json::Value;

use super::*;
use crate::domain::ports::{
    MockUserIndex, MockUserRegistration, MockUserStore, RegisteredUser, UserIndexError, UserStore,
    UserStoreError,
};
use crate::domain::{FixedResponseDelay, User, UserId, UserRegistrationService};

const ADA: &str = r#"{"name":"Ada","email":"ada@example.com"}"#;

/// Store that keeps every inserted record in memory.
#[derive(Default)]
struct RecordingStore {
    records: Mutex<Vec<NewUser>>,
}

#[async_trait]
impl UserStore for RecordingStore {
    async fn insert(&self, user: &NewUser) -> Result<UserId, UserStoreError> {
        let mut records = self.records.lock().expect("records lock");
        records.push(user.clone());
        Ok(UserId::numeric(i64::try_from(records.len()).expect("small count")))
    }

    async fn ping(&self) -> Result<(), UserStoreError> {
        Ok(())
    }
}

fn state_for<R>(registration: R) -> web::Data<HttpState>
where
    R: crate::domain::ports::UserRegistration + 'static,
{
    web::Data::new(HttpState::new(Arc::new(registration)))
}

async fn call(
    state: web::Data<HttpState>,
    method: Method,
    body: impl Into<web::Bytes>,
) -> actix_web::dev::ServiceResponse {
    let app = test::init_service(App::new().app_data(state).configure(configure)).await;
    let req = test::TestRequest::default()
        .method(method)
        .uri("/users")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(body)
        .to_request();
    test::call_service(&app, req).await
}

async fn body_text(res: actix_web::dev::ServiceResponse) -> String {
    let bytes = test::read_body(res).await;
    String::from_utf8(bytes.to_vec()).expect("utf-8 body")
}

fn no_delay_service<S, I>(store: Arc<S>, index: I) -> UserRegistrationService<S, I>
where
    S: UserStore,
{
    UserRegistrationService::new(store, Arc::new(index))
        .with_delay(Arc::new(FixedResponseDelay(Duration::ZERO)))
}

#[actix_web::test]
async fn created_user_is_returned_as_json() {
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .withf(|user| user.name() == "Ada" && user.email() == "ada@example.com")
        .times(1)
        .returning(|user| {
            let stored: User = user.with_id(UserId::text("65f1c0a4e4b0a1b2c3d4e5f6"));
            let document = serde_json::to_vec(&stored).expect("serialise user");
            Ok(RegisteredUser::new(stored, document))
        });

    let res = call(state_for(registration), Method::POST, ADA).await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let content_type = res
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);
    assert_eq!(content_type.as_deref(), Some("application/json"));
    let body: Value = test::read_body_json(res).await;
    assert_eq!(
        body,
        serde_json::json!({
            "id": "65f1c0a4e4b0a1b2c3d4e5f6",
            "name": "Ada",
            "email": "ada@example.com"
        })
    );
}

#[actix_web::test]
async fn caller_supplied_id_is_ignored() {
    let mut registration = MockUserRegistration::new();
    registration.expect_register().times(1).returning(|user| {
        let stored = user.with_id(UserId::numeric(7));
        let document = serde_json::to_vec(&stored).expect("serialise user");
        Ok(RegisteredUser::new(stored, document))
    });

    let res = call(
        state_for(registration),
        Method::POST,
        r#"{"id":"forged","name":"Ada","email":"ada@example.com"}"#,
    )
    .await;

    assert_eq!(res.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], Value::from(7));
}

#[rstest]
#[case::not_json("not json")]
#[case::empty("")]
#[case::array("[]")]
#[case::missing_email(r#"{"name":"Ada"}"#)]
#[case::mistyped_name(r#"{"name":42,"email":"ada@example.com"}"#)]
#[actix_web::test]
async fn malformed_body_is_rejected_without_a_store_write(#[case] body: &'static str) {
    let mut store = MockUserStore::new();
    store.expect_insert().times(0);
    let mut index = MockUserIndex::new();
    index.expect_index().times(0);
    let service = no_delay_service(Arc::new(store), index);

    let res = call(state_for(service), Method::POST, body).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "Invalid input");
}

#[rstest]
#[case(Method::GET)]
#[case(Method::PUT)]
#[case(Method::DELETE)]
#[case(Method::PATCH)]
#[actix_web::test]
async fn other_methods_are_not_allowed(#[case] method: Method) {
    let mut registration = MockUserRegistration::new();
    registration.expect_register().times(0);

    let res = call(state_for(registration), method, ADA).await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(body_text(res).await, "Method not allowed");
}

#[actix_web::test]
async fn unreachable_store_reports_a_persistence_failure() {
    let mut store = MockUserStore::new();
    store
        .expect_insert()
        .times(1)
        .returning(|_| Err(UserStoreError::connection("no servers available")));
    let mut index = MockUserIndex::new();
    index.expect_index().times(0);
    let service = no_delay_service(Arc::new(store), index);

    let res = call(state_for(service), Method::POST, ADA).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(res).await, "Failed to save to MongoDB");
}

#[rstest]
#[case::unreachable(UserIndexError::transport("connection refused"), "Failed to save to Elasticsearch")]
#[case::rejected(UserIndexError::rejected(400_u16, "mapper_parsing_exception"), "Failed to index user")]
#[actix_web::test]
async fn index_failure_keeps_the_stored_record(
    #[case] failure: UserIndexError,
    #[case] expected_body: &str,
) {
    let store = Arc::new(RecordingStore::default());
    let mut index = MockUserIndex::new();
    index
        .expect_index()
        .times(1)
        .returning(move |_, _| Err(failure.clone()));
    let service = no_delay_service(store.clone(), index);

    let res = call(state_for(service), Method::POST, ADA).await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body_text(res).await, expected_body);
    let records = store.records.lock().expect("records lock");
    assert_eq!(records.as_slice(), [NewUser::new("Ada", "ada@example.com")]);
}

#[actix_web::test]
async fn bodies_beyond_the_framework_default_limit_are_accepted() {
    let name = "a".repeat(300 * 1024);
    let expected_name = name.clone();
    let mut registration = MockUserRegistration::new();
    registration
        .expect_register()
        .withf(move |user| user.name() == expected_name)
        .times(1)
        .returning(|user| {
            let stored = user.with_id(UserId::numeric(1));
            let document = serde_json::to_vec(&stored).expect("serialise user");
            Ok(RegisteredUser::new(stored, document))
        });
    let body = serde_json::json!({ "name": name, "email": "ada@example.com" }).to_string();

    let res = call(state_for(registration), Method::POST, body).await;

    assert_eq!(res.status(), StatusCode::CREATED);
}

#[rstest]
#[case::large_garbage(vec![b'x'; 300 * 1024])]
#[case::over_the_cap(vec![b' '; MAX_BODY_BYTES + 1])]
#[actix_web::test]
async fn oversized_or_garbage_bodies_are_invalid_input(#[case] body: Vec<u8>) {
    let mut registration = MockUserRegistration::new();
    registration.expect_register().times(0);

    let res = call(state_for(registration), Method::POST, body).await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_text(res).await, "Invalid input");
}
