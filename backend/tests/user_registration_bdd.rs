//! Behaviour tests for registering users over HTTP.
//!
//! Each scenario wires the registration service to in-memory backends whose
//! availability the steps toggle, then drives `POST /users` through Actix.

#[path = "support/in_memory.rs"]
mod in_memory;

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use actix_web::{App, test as actix_test, web};
use in_memory::{InMemoryIndex, InMemoryStore};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use serde_json::Value;
use users_backend::Trace;
use users_backend::domain::{
    BackendReadiness, FixedResponseDelay, NewUser, UserId, UserRegistrationService,
};
use users_backend::inbound::http::health::{HealthState, live, ready};
use users_backend::inbound::http::state::HttpState;
use users_backend::inbound::http::users;

const ADA: &str = r#"{"name":"Ada","email":"ada@example.com"}"#;

#[derive(Debug)]
struct Snapshot {
    status: u16,
    body: Vec<u8>,
}

#[derive(Default)]
struct World {
    store: Arc<InMemoryStore>,
    index: Arc<InMemoryIndex>,
    readiness: Arc<BackendReadiness>,
    response: Option<Snapshot>,
}

fn run_async<T>(future: impl Future<Output = T>) -> T {
    tokio::runtime::Runtime::new()
        .expect("runtime")
        .block_on(future)
}

impl World {
    fn request(&self, method: actix_web::http::Method, uri: &str, body: &'static str) -> Snapshot {
        let service = UserRegistrationService::new(self.store.clone(), self.index.clone())
            .with_delay(Arc::new(FixedResponseDelay(Duration::ZERO)))
            .with_readiness(self.readiness.clone());
        let health = HealthState::new(self.readiness.clone());
        health.mark_ready();
        let req = actix_test::TestRequest::default()
            .method(method)
            .uri(uri)
            .insert_header(("content-type", "application/json"))
            .set_payload(body)
            .to_request();

        run_async(async move {
            let app = actix_test::init_service(
                App::new()
                    .app_data(web::Data::new(HttpState::new(Arc::new(service))))
                    .app_data(web::Data::new(health))
                    .wrap(Trace)
                    .configure(users::configure)
                    .service(ready)
                    .service(live),
            )
            .await;
            let res = actix_test::call_service(&app, req).await;
            let status = res.status().as_u16();
            let body = actix_test::read_body(res).await.to_vec();
            Snapshot { status, body }
        })
    }

    fn post_user(&mut self, body: &'static str) {
        let snapshot = self.request(actix_web::http::Method::POST, "/users", body);
        self.response = Some(snapshot);
    }

    fn response(&self) -> &Snapshot {
        self.response.as_ref().expect("a request was sent")
    }
}

#[fixture]
fn world() -> World {
    World::default()
}

#[given("the document store is online")]
fn the_document_store_is_online(world: &mut World) {
    world.store = Arc::new(InMemoryStore::default());
}

#[given("the document store is offline")]
fn the_document_store_is_offline(world: &mut World) {
    world.store = Arc::new(InMemoryStore::offline());
}

#[given("the search index is online")]
fn the_search_index_is_online(world: &mut World) {
    world.index = Arc::new(InMemoryIndex::default());
}

#[given("the search index is offline")]
fn the_search_index_is_offline(world: &mut World) {
    world.index = Arc::new(InMemoryIndex::offline());
}

#[when("Ada registers")]
fn ada_registers(world: &mut World) {
    world.post_user(ADA);
}

#[when("a client posts a body that is not JSON")]
fn a_client_posts_a_body_that_is_not_json(world: &mut World) {
    world.post_user("not json");
}

#[then("the response status is {status}")]
fn the_response_status_is(world: &mut World, status: u16) {
    assert_eq!(world.response().status, status);
}

#[then("the response body reads {text}")]
fn the_response_body_reads(world: &mut World, text: String) {
    let body = String::from_utf8(world.response().body.clone()).expect("utf-8 body");
    assert_eq!(body, text);
}

#[then("the response echoes Ada with a generated id")]
fn the_response_echoes_ada_with_a_generated_id(world: &mut World) {
    let body: Value = serde_json::from_slice(&world.response().body).expect("json body");
    let id = body["id"].as_str().expect("id is text");
    assert!(!id.is_empty());
    assert_eq!(body["name"], "Ada");
    assert_eq!(body["email"], "ada@example.com");

    let records = world.store.records.lock().expect("store lock");
    assert_eq!(
        records.as_slice(),
        [(UserId::text(id), NewUser::new("Ada", "ada@example.com"))]
    );
}

#[then("the search index holds Ada")]
fn the_search_index_holds_ada(world: &mut World) {
    let documents = world.index.documents.lock().expect("index lock");
    assert_eq!(documents.len(), 1);
    let (index_name, document) = &documents[0];
    assert_eq!(index_name, "users");
    assert_eq!(document["name"], "Ada");
    assert_eq!(document["email"], "ada@example.com");
}

#[then("the search index is empty")]
fn the_search_index_is_empty(world: &mut World) {
    assert!(world.index.documents.lock().expect("index lock").is_empty());
}

#[then("the document store holds Ada")]
fn the_document_store_holds_ada(world: &mut World) {
    let records = world.store.records.lock().expect("store lock");
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1, NewUser::new("Ada", "ada@example.com"));
}

#[then("the document store is empty")]
fn the_document_store_is_empty(world: &mut World) {
    assert!(world.store.records.lock().expect("store lock").is_empty());
}

#[then("the readiness endpoint answers {status}")]
fn the_readiness_endpoint_answers(world: &mut World, status: u16) {
    let readiness = world.request(actix_web::http::Method::GET, "/health/ready", "");
    assert_eq!(readiness.status, status);
}

#[scenario(
    path = "tests/features/user_registration.feature",
    name = "Registering Ada against healthy backends"
)]
fn registering_ada_against_healthy_backends(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_registration.feature",
    name = "Registering while the document store is down"
)]
fn registering_while_the_document_store_is_down(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_registration.feature",
    name = "Registering while the search index is down"
)]
fn registering_while_the_search_index_is_down(world: World) {
    drop(world);
}

#[scenario(
    path = "tests/features/user_registration.feature",
    name = "Posting a body that is not JSON"
)]
fn posting_a_body_that_is_not_json(world: World) {
    drop(world);
}
