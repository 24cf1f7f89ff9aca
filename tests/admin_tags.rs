// This file is part of the product Tagstore.
// SPDX-FileCopyrightText: 2026 Tagstore Contributors
// SPDX-License-Identifier: AGPL-3.0-or-later
// The code and documentation in this repository is licensed under the GNU Affero General Public License v3.0 or later (AGPL-3.0-or-later). See LICENSE.

mod common;

use actix_web::http::StatusCode;
use actix_web::test;
use serde_json::{Value, json};

#[actix_web::test]
async fn new_tag_form_parent_field_defaults_to_empty() {
    let harness = common::TestHarness::new();
    harness.store.create_taxonomy("science").expect("taxonomy");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri("/admin/tags/new")
        .insert_header(common::auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8 body");
    assert!(body.contains(r#"name="parent" value="""#));
    assert!(body.contains("science"));
}

#[actix_web::test]
async fn existing_tag_form_shows_parent_name() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let physics = harness
        .store
        .add_tag(taxonomy.id, "physics", None)
        .expect("parent");
    let quantum = harness
        .store
        .add_tag(taxonomy.id, "quantum", Some(physics.id))
        .expect("child");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/admin/tags/show/{}", quantum.id))
        .insert_header(common::auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8 body");
    assert!(body.contains(r#"name="parent" value="physics""#));
    assert!(body.contains(r#"name="path" value="physics/quantum""#));
}

#[actix_web::test]
async fn root_tag_form_parent_is_empty() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let physics = harness
        .store
        .add_tag(taxonomy.id, "physics", None)
        .expect("tag");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri(&format!("/admin/tags/show/{}", physics.id))
        .insert_header(common::auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8 body");
    assert!(body.contains(r#"name="parent" value="""#));
}

#[actix_web::test]
async fn unknown_tag_show_returns_404() {
    let harness = common::TestHarness::new();
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri("/admin/tags/show/999")
        .insert_header(common::auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn create_with_empty_parent_creates_root_tag() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::post()
        .uri("/admin/tags/create-api")
        .insert_header(common::auth_header())
        .set_json(json!({
            "taxonomy": taxonomy.id,
            "name": "physics",
            "parent": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(true));

    let tag = harness
        .store
        .tag_by_name(taxonomy.id, "physics")
        .expect("lookup")
        .expect("created");
    assert_eq!(tag.parent_id, None);
    assert_eq!(tag.path, "physics");
}

#[actix_web::test]
async fn create_with_existing_parent_resolves_its_id() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let physics = harness
        .store
        .add_tag(taxonomy.id, "physics", None)
        .expect("parent");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::post()
        .uri("/admin/tags/create-api")
        .insert_header(common::auth_header())
        .set_json(json!({
            "taxonomy": taxonomy.id,
            "name": "quantum",
            "parent": "physics"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let tag = harness
        .store
        .tag_by_name(taxonomy.id, "quantum")
        .expect("lookup")
        .expect("created");
    assert_eq!(tag.parent_id, Some(physics.id));
    assert_eq!(tag.path, "physics/quantum");
}

#[actix_web::test]
async fn create_accepts_form_encoded_submissions() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::post()
        .uri("/admin/tags/create-api")
        .insert_header(common::auth_header())
        .set_form([
            ("taxonomy", taxonomy.id.to_string()),
            ("name", "biology".to_string()),
            ("parent", String::new()),
        ])
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let tag = harness
        .store
        .tag_by_name(taxonomy.id, "biology")
        .expect("lookup")
        .expect("created");
    assert_eq!(tag.path, "biology");
}

#[actix_web::test]
async fn create_with_unknown_parent_fails_and_creates_nothing() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::post()
        .uri("/admin/tags/create-api")
        .insert_header(common::auth_header())
        .set_json(json!({
            "taxonomy": taxonomy.id,
            "name": "quantum",
            "parent": "does-not-exist"
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["success"], json!(false));

    let tags = harness.store.list_tags(None, None).expect("tags");
    assert!(tags.is_empty());
}

#[actix_web::test]
async fn create_duplicate_name_is_rejected() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    harness
        .store
        .add_tag(taxonomy.id, "physics", None)
        .expect("tag");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::post()
        .uri("/admin/tags/create-api")
        .insert_header(common::auth_header())
        .set_json(json!({
            "taxonomy": taxonomy.id,
            "name": "physics",
            "parent": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[actix_web::test]
async fn modifying_existing_tag_is_denied() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let physics = harness
        .store
        .add_tag(taxonomy.id, "physics", None)
        .expect("tag");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::post()
        .uri(&format!("/admin/tags/save-api/{}", physics.id))
        .insert_header(common::auth_header())
        .set_json(json!({
            "taxonomy": taxonomy.id,
            "name": "renamed",
            "parent": ""
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let unchanged = harness
        .store
        .tag(physics.id)
        .expect("lookup")
        .expect("present");
    assert_eq!(unchanged.name, "physics");
}

#[actix_web::test]
async fn deleting_tag_is_denied() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    harness
        .store
        .add_tag(taxonomy.id, "physics", None)
        .expect("tag");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::delete()
        .uri("/admin/tags/delete-api")
        .insert_header(common::auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::FORBIDDEN);

    let tags = harness.store.list_tags(None, None).expect("tags");
    assert_eq!(tags.len(), 1);
}

#[actix_web::test]
async fn list_api_filters_by_path_substring() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let physics = harness
        .store
        .add_tag(taxonomy.id, "physics", None)
        .expect("tag");
    harness
        .store
        .add_tag(taxonomy.id, "quantum", Some(physics.id))
        .expect("tag");
    harness
        .store
        .add_tag(taxonomy.id, "biology", None)
        .expect("tag");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri("/admin/tags/list-api?q=physics")
        .insert_header(common::auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    let tags = body["tags"].as_array().expect("tags array");
    let paths: Vec<&str> = tags
        .iter()
        .map(|tag| tag["path"].as_str().expect("path"))
        .collect();
    assert_eq!(paths, vec!["physics", "physics/quantum"]);
}

#[actix_web::test]
async fn index_page_lists_tag_paths() {
    let harness = common::TestHarness::new();
    let taxonomy = harness.store.create_taxonomy("science").expect("taxonomy");
    let physics = harness
        .store
        .add_tag(taxonomy.id, "physics", None)
        .expect("tag");
    harness
        .store
        .add_tag(taxonomy.id, "quantum", Some(physics.id))
        .expect("tag");
    let app = test::init_service(common::build_test_app(harness.app_bundle())).await;

    let req = test::TestRequest::get()
        .uri("/admin/tags")
        .insert_header(common::auth_header())
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body = String::from_utf8(test::read_body(resp).await.to_vec()).expect("utf8 body");
    assert!(body.contains("physics/quantum"));
    assert!(body.contains("science"));
}
