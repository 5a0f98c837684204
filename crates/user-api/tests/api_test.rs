//! HTTP-level tests, run against both store backends.

use actix_web::dev::ServiceResponse;
use actix_web::http::header::{self, ContentType};
use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use rstest::rstest;
use serde_json::{json, Value};
use std::sync::Arc;
use user_api::api;
use user_api::store::{SqliteUserStore, UserStore};
use user_api::user_actor;

#[derive(Debug, Clone, Copy)]
enum Backend {
    Memory,
    Sqlite,
}

async fn store_for(backend: Backend) -> Arc<dyn UserStore> {
    match backend {
        Backend::Memory => {
            let (actor, client) = user_actor::new(16);
            tokio::spawn(actor.run(()));
            Arc::new(client)
        }
        Backend::Sqlite => Arc::new(SqliteUserStore::in_memory().await.unwrap()),
    }
}

macro_rules! app_for {
    ($backend:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::from(store_for($backend).await))
                .configure(api::configure),
        )
        .await
    };
}

fn uri(suffix: &str) -> String {
    format!("{}{suffix}", api::USERS_SCOPE)
}

async fn json_body(response: ServiceResponse) -> Value {
    let bytes = test::read_body(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[actix_web::test]
async fn create_duplicate_delete_scenario(#[case] backend: Backend) {
    let app = app_for!(backend);

    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"name": "Alice", "rate": 10.5, "sqft": 120}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert!(location.ends_with("/api/UserApi/1"), "location was {location}");
    let created = json_body(resp).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["area"], 120);

    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"name": "alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["errors"]["UserError"], json!(["Name already exists!"]));

    let req = test::TestRequest::get().uri(&uri("")).to_request();
    let users = json_body(test::call_service(&app, req).await).await;
    assert_eq!(users.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete().uri(&uri("/1")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri("/1")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[actix_web::test]
async fn ids_grow_past_deleted_records(#[case] backend: Backend) {
    let app = app_for!(backend);

    let mut ids = Vec::new();
    for name in ["A", "B"] {
        let req = test::TestRequest::post()
            .uri(&uri(""))
            .set_json(json!({"name": name}))
            .to_request();
        ids.push(json_body(test::call_service(&app, req).await).await["id"].clone());
    }
    let req = test::TestRequest::delete().uri(&uri("/2")).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"name": "C"}))
        .to_request();
    ids.push(json_body(test::call_service(&app, req).await).await["id"].clone());

    assert_eq!(ids, vec![json!(1), json!(2), json!(3)]);
}

#[rstest]
#[case::get_zero(test::TestRequest::get(), "/0", StatusCode::BAD_REQUEST)]
#[case::get_missing(test::TestRequest::get(), "/42", StatusCode::NOT_FOUND)]
#[case::get_non_numeric(test::TestRequest::get(), "/abc", StatusCode::BAD_REQUEST)]
#[case::delete_zero(test::TestRequest::delete(), "/0", StatusCode::BAD_REQUEST)]
#[case::delete_missing(test::TestRequest::delete(), "/42", StatusCode::NOT_FOUND)]
#[actix_web::test]
async fn rejects_bad_and_unknown_ids(
    #[case] request: test::TestRequest,
    #[case] suffix: &str,
    #[case] status: StatusCode,
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let app = app_for!(backend);
    let resp = test::call_service(&app, request.uri(&uri(suffix)).to_request()).await;
    assert_eq!(resp.status(), status);
}

#[rstest]
#[case::client_supplied_id(json!({"id": 5, "name": "Eve"}), StatusCode::INTERNAL_SERVER_ERROR)]
#[case::missing_name(json!({"rate": 1.0}), StatusCode::BAD_REQUEST)]
#[case::blank_name(json!({"name": "   "}), StatusCode::BAD_REQUEST)]
#[case::null_body(json!(null), StatusCode::BAD_REQUEST)]
#[case::wrong_type(json!({"name": "Eve", "occupancy": "lots"}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn rejected_creates_store_nothing(
    #[case] body: Value,
    #[case] status: StatusCode,
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let app = app_for!(backend);

    let req = test::TestRequest::post().uri(&uri("")).set_json(body).to_request();
    assert_eq!(test::call_service(&app, req).await.status(), status);

    let req = test::TestRequest::get().uri(&uri("")).to_request();
    assert_eq!(json_body(test::call_service(&app, req).await).await, json!([]));
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[actix_web::test]
async fn duplicate_name_wins_over_supplied_id(#[case] backend: Backend) {
    let app = app_for!(backend);
    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"name": "Alice"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"id": 5, "name": "alice"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["errors"]["UserError"], json!(["Name already exists!"]));
}

#[rstest]
#[case::invalid_id("/0", StatusCode::BAD_REQUEST, "invalid_identifier")]
#[case::unknown_id("/42", StatusCode::NOT_FOUND, "not_found")]
#[actix_web::test]
async fn errors_are_json_even_when_xml_is_accepted(
    #[case] suffix: &str,
    #[case] status: StatusCode,
    #[case] code: &str,
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let app = app_for!(backend);
    let req = test::TestRequest::get()
        .uri(&uri(suffix))
        .insert_header((header::ACCEPT, "application/xml"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), status);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    assert_eq!(json_body(resp).await["code"], code);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[actix_web::test]
async fn missing_name_is_reported_by_field(#[case] backend: Backend) {
    let app = app_for!(backend);
    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"details": "no name"}))
        .to_request();
    let body = json_body(test::call_service(&app, req).await).await;
    assert_eq!(body["code"], "validation_failed");
    assert_eq!(body["errors"]["name"], json!(["The Name field is required."]));
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[actix_web::test]
async fn replace_requires_matching_existing_id(#[case] backend: Backend) {
    let app = app_for!(backend);
    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"name": "Alice"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::put()
        .uri(&uri("/1"))
        .set_json(json!({"id": 2, "name": "Alice"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&uri("/9"))
        .set_json(json!({"id": 9, "name": "Ghost"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::put()
        .uri(&uri("/0"))
        .set_json(json!({"id": 0, "name": "Zero"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::put()
        .uri(&uri("/1"))
        .set_json(json!({"id": 1, "name": "Alicia", "occupancy": 3}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri("/1")).to_request();
    let user = json_body(test::call_service(&app, req).await).await;
    assert_eq!(user["name"], "Alicia");
    assert_eq!(user["occupancy"], 3);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[actix_web::test]
async fn patch_then_read_back(#[case] backend: Backend) {
    let app = app_for!(backend);
    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"name": "Villa", "rate": 100.0, "amenity": "Pool", "details": "Sea"}))
        .to_request();
    test::call_service(&app, req).await;

    let req = test::TestRequest::patch()
        .uri(&uri("/1"))
        .set_json(json!([
            {"op": "replace", "path": "/name", "value": "Villa Royal"},
            {"op": "replace", "path": "/Rate", "value": 150},
            {"op": "remove", "path": "/details"}
        ]))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);

    let req = test::TestRequest::get().uri(&uri("/1")).to_request();
    let user = json_body(test::call_service(&app, req).await).await;
    assert_eq!(user["id"], 1);
    assert_eq!(user["name"], "Villa Royal");
    assert_eq!(user["rate"], 150.0);
    assert_eq!(user["details"], "");
    assert_eq!(user["amenity"], "Pool");
}

#[rstest]
#[case::touches_id(json!([{"op": "replace", "path": "/id", "value": 7}]), StatusCode::BAD_REQUEST)]
#[case::blanks_name(json!([{"op": "replace", "path": "/name", "value": ""}]), StatusCode::BAD_REQUEST)]
#[case::failed_test(
    json!([{"op": "replace", "path": "/rate", "value": 1}, {"op": "test", "path": "/name", "value": "x"}]),
    StatusCode::BAD_REQUEST
)]
#[case::not_an_array(json!({"op": "remove", "path": "/name"}), StatusCode::BAD_REQUEST)]
#[actix_web::test]
async fn failed_patches_change_nothing(
    #[case] document: Value,
    #[case] status: StatusCode,
    #[values(Backend::Memory, Backend::Sqlite)] backend: Backend,
) {
    let app = app_for!(backend);
    let req = test::TestRequest::post()
        .uri(&uri(""))
        .set_json(json!({"name": "Villa", "rate": 100.0}))
        .to_request();
    let before = json_body(test::call_service(&app, req).await).await;

    let req = test::TestRequest::patch()
        .uri(&uri("/1"))
        .set_json(document)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), status);

    let req = test::TestRequest::get().uri(&uri("/1")).to_request();
    assert_eq!(json_body(test::call_service(&app, req).await).await, before);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[actix_web::test]
async fn patch_of_missing_or_zero_id(#[case] backend: Backend) {
    let app = app_for!(backend);
    let document = json!([{"op": "replace", "path": "/name", "value": "x"}]);

    let req = test::TestRequest::patch()
        .uri(&uri("/5"))
        .set_json(&document)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::patch()
        .uri(&uri("/0"))
        .set_json(&document)
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::patch()
        .uri(&uri("/5"))
        .insert_header(ContentType::json())
        .set_payload("")
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[rstest]
#[case::memory(Backend::Memory)]
#[case::sqlite(Backend::Sqlite)]
#[actix_web::test]
async fn speaks_xml_when_asked(#[case] backend: Backend) {
    let app = app_for!(backend);

    let req = test::TestRequest::post()
        .uri(&uri(""))
        .insert_header(ContentType::xml())
        .insert_header((header::ACCEPT, "application/xml"))
        .set_payload("<User><name>Bob</name><occupancy>2</occupancy></User>")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/xml"
    );
    let body = String::from_utf8(test::read_body(resp).await.to_vec()).unwrap();
    assert!(body.starts_with("<User>"), "body was {body}");
    assert!(body.contains("<name>Bob</name>"));

    let req = test::TestRequest::get()
        .uri(&uri(""))
        .insert_header((header::ACCEPT, "text/xml"))
        .to_request();
    let body = String::from_utf8(test::call_and_read_body(&app, req).await.to_vec()).unwrap();
    assert!(body.starts_with("<ArrayOfUser><User>"), "body was {body}");

    // Unsupported media types fall back to JSON.
    let req = test::TestRequest::get()
        .uri(&uri("/1"))
        .insert_header((header::ACCEPT, "text/csv"))
        .to_request();
    let user = json_body(test::call_service(&app, req).await).await;
    assert_eq!(user["occupancy"], 2);
}
