//! HTTP API integration tests
//!
//! Each test builds a fresh app over its own `MemoryStorage`, so ids start at 1.

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use bookmarkd::api::services::{AppStartTime, ErrorBody, api_routes, health_routes};
use bookmarkd::storage::{MemoryStorage, Storage};

macro_rules! bookmark_app {
    () => {
        bookmark_app!(Arc::new(MemoryStorage::new()) as Arc<dyn Storage>)
    };
    ($storage:expr) => {
        test::init_service(
            App::new()
                .app_data(web::Data::new($storage))
                .app_data(web::Data::new(AppStartTime::now()))
                .service(health_routes("/health"))
                .service(api_routes("/api")),
        )
        .await
    };
}

// =============================================================================
// Folders
// =============================================================================

#[actix_rt::test]
async fn test_folder_crud() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/folders")
        .set_json(json!({ "name": "Work" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["id"], 1);
    assert_eq!(created["name"], "Work");

    let req = TestRequest::put()
        .uri("/api/folders/1")
        .set_json(json!({ "name": "Office" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let renamed: Value = test::read_body_json(resp).await;
    assert_eq!(renamed["name"], "Office");

    let req = TestRequest::get().uri("/api/folders").to_request();
    let folders: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(folders.as_array().unwrap().len(), 1);
    assert_eq!(folders[0]["bookmarkCount"], 0);

    let req = TestRequest::delete().uri("/api/folders/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);

    let req = TestRequest::get().uri("/api/folders/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Folder not found");
}

#[actix_rt::test]
async fn test_folder_not_found_on_update_and_delete() {
    let app = bookmark_app!();

    let req = TestRequest::put()
        .uri("/api/folders/42")
        .set_json(json!({ "name": "Ghost" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );

    let req = TestRequest::delete().uri("/api/folders/42").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn test_folder_validation_errors() {
    let app = bookmark_app!();

    for body in [json!({}), json!({ "name": "" }), json!({ "name": "   " }), json!({ "name": 7 })] {
        let req = TestRequest::post()
            .uri("/api/folders")
            .set_json(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);

        let err: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(err.message, "Invalid folder data");
        assert_eq!(err.errors.unwrap()[0].field, "name");
    }

    // 校验失败不会写入数据
    let req = TestRequest::get().uri("/api/folders").to_request();
    let folders: Value = test::call_and_read_body_json(&app, req).await;
    assert!(folders.as_array().unwrap().is_empty());
}

#[actix_rt::test]
async fn test_invalid_path_ids() {
    let app = bookmark_app!();

    for uri in ["/api/folders/abc", "/api/folders/0", "/api/folders/-1"] {
        let req = TestRequest::get().uri(uri).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "uri: {}", uri);
        let body: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(body.message, "Invalid folder ID");
    }

    let req = TestRequest::delete().uri("/api/bookmarks/xyz").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Invalid bookmark ID");
}

#[actix_rt::test]
async fn test_malformed_json_body() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/folders")
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{ not json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Invalid request body");
}

#[actix_rt::test]
async fn test_malformed_query_string() {
    let app = bookmark_app!();

    let req = TestRequest::get()
        .uri("/api/bookmarks?search=a&search=b")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Invalid query parameters");
    assert!(body.errors.is_none());
}

#[actix_rt::test]
async fn test_get_folder_includes_bookmark_count() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/folders")
        .set_json(json!({ "name": "Learning" }))
        .to_request();
    test::call_service(&app, req).await;

    for url in ["https://doc.rust-lang.org", "https://docs.rs"] {
        let req = TestRequest::post()
            .uri("/api/bookmarks")
            .set_json(json!({ "title": "Docs", "url": url, "folderId": 1 }))
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = TestRequest::get().uri("/api/folders/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let folder: Value = test::read_body_json(resp).await;
    assert_eq!(folder["id"], 1);
    assert_eq!(folder["name"], "Learning");
    assert_eq!(folder["bookmarkCount"], 2);
}

#[actix_rt::test]
async fn test_update_folder_validation_errors() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/folders")
        .set_json(json!({ "name": "Work" }))
        .to_request();
    test::call_service(&app, req).await;

    for body in [json!({}), json!({ "name": "  " }), json!({ "name": false })] {
        let req = TestRequest::put()
            .uri("/api/folders/1")
            .set_json(body.clone())
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "body: {}", body);

        let err: ErrorBody = test::read_body_json(resp).await;
        assert_eq!(err.message, "Invalid folder data");
        assert_eq!(err.errors.unwrap()[0].field, "name");
    }

    // 名称保持不变
    let req = TestRequest::get().uri("/api/folders/1").to_request();
    let folder: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(folder["name"], "Work");
}

// =============================================================================
// Bookmarks
// =============================================================================

#[actix_rt::test]
async fn test_folder_lifecycle_scenario() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/folders")
        .set_json(json!({ "name": "Work" }))
        .to_request();
    let folder: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(folder["id"], 1);

    let req = TestRequest::post()
        .uri("/api/bookmarks")
        .set_json(json!({ "title": "Ex", "url": "https://example.com", "folderId": 1 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bookmark: Value = test::read_body_json(resp).await;
    assert_eq!(bookmark["id"], 1);
    assert_eq!(bookmark["favicon"], "https://example.com/favicon.ico");

    let req = TestRequest::get().uri("/api/folders").to_request();
    let folders: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(folders[0]["bookmarkCount"], 1);

    let req = TestRequest::get().uri("/api/bookmarks/1").to_request();
    let fetched: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(fetched["folderName"], "Work");
    assert_eq!(fetched["folderId"], 1);

    let req = TestRequest::delete().uri("/api/folders/1").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = TestRequest::get().uri("/api/bookmarks/1").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Bookmark not found");
}

#[actix_rt::test]
async fn test_bookmark_validation_reports_all_fields() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/bookmarks")
        .set_json(json!({ "title": "", "url": "not-a-url" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Invalid bookmark data");
    let fields: Vec<String> = body.errors.unwrap().into_iter().map(|e| e.field).collect();
    assert!(fields.contains(&"title".to_string()));
    assert!(fields.contains(&"url".to_string()));
}

#[actix_rt::test]
async fn test_bookmark_with_unknown_folder_rejected() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/bookmarks")
        .set_json(json!({ "title": "Ex", "url": "https://example.com", "folderId": 99 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Invalid bookmark data");
    assert_eq!(body.errors.unwrap()[0].field, "folderId");
}

#[actix_rt::test]
async fn test_favicon_derivation() {
    let app = bookmark_app!();

    let cases = [
        (json!({ "title": "A", "url": "http://localhost:3000/x" }), "http://localhost:3000/favicon.ico"),
        (json!({ "title": "B", "url": "https://github.com/a/b", "favicon": "" }), "https://github.com/favicon.ico"),
        (json!({ "title": "C", "url": "https://github.com", "favicon": "https://cdn.example.com/c.png" }), "https://cdn.example.com/c.png"),
    ];

    for (body, expected) in cases {
        let req = TestRequest::post()
            .uri("/api/bookmarks")
            .set_json(body)
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(created["favicon"], expected);
    }
}

#[actix_rt::test]
async fn test_bookmark_url_is_stored_trimmed() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/bookmarks")
        .set_json(json!({ "title": "Example", "url": "  https://example.com  " }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(resp).await;
    assert_eq!(created["url"], "https://example.com");
    assert_eq!(created["favicon"], "https://example.com/favicon.ico");

    let req = TestRequest::put()
        .uri("/api/bookmarks/1")
        .set_json(json!({ "title": "Example", "url": "\thttps://example.org/page " }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["url"], "https://example.org/page");
}

#[actix_rt::test]
async fn test_list_bookmarks_query_precedence() {
    let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
    let app = bookmark_app!(storage.clone());

    let req = TestRequest::post()
        .uri("/api/folders")
        .set_json(json!({ "name": "Dev" }))
        .to_request();
    test::call_service(&app, req).await;

    for body in [
        json!({ "title": "GitHub", "url": "https://github.com", "folderId": 1 }),
        json!({ "title": "Docs", "url": "https://docs.rs", "folderId": 1 }),
        json!({ "title": "GitLab", "url": "https://gitlab.com" }),
    ] {
        let req = TestRequest::post()
            .uri("/api/bookmarks")
            .set_json(body)
            .to_request();
        assert_eq!(
            test::call_service(&app, req).await.status(),
            StatusCode::CREATED
        );
    }

    let req = TestRequest::get().uri("/api/bookmarks").to_request();
    let all: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(all.as_array().unwrap().len(), 3);

    let req = TestRequest::get().uri("/api/bookmarks?folderId=1").to_request();
    let in_folder: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(in_folder.as_array().unwrap().len(), 2);

    // search 优先于 folderId
    let req = TestRequest::get()
        .uri("/api/bookmarks?search=git&folderId=1")
        .to_request();
    let searched: Value = test::call_and_read_body_json(&app, req).await;
    let titles: Vec<&str> = searched
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["GitHub", "GitLab"]);

    // 空参数视为未提供
    let req = TestRequest::get()
        .uri("/api/bookmarks?search=&folderId=")
        .to_request();
    let empty_params: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(empty_params.as_array().unwrap().len(), 3);

    let req = TestRequest::get()
        .uri("/api/bookmarks?folderId=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorBody = test::read_body_json(resp).await;
    assert_eq!(body.message, "Invalid folder ID");

    // 超出 id 范围的整数合法，但不会匹配任何书签
    let req = TestRequest::get()
        .uri("/api/bookmarks?folderId=3000000000")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let out_of_range: Value = test::read_body_json(resp).await;
    assert!(out_of_range.as_array().unwrap().is_empty());

    // 无效 folderId 只在没有 search 时才检查
    let req = TestRequest::get()
        .uri("/api/bookmarks?search=docs&folderId=abc")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    assert_eq!(storage.list_bookmarks().await.unwrap().len(), 3);
}

#[actix_rt::test]
async fn test_update_bookmark_merges_nullable_fields() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/folders")
        .set_json(json!({ "name": "Work" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::post()
        .uri("/api/bookmarks")
        .set_json(json!({ "title": "Ex", "url": "https://example.com", "folderId": 1 }))
        .to_request();
    test::call_service(&app, req).await;

    // folderId / favicon 缺失时保持原值
    let req = TestRequest::put()
        .uri("/api/bookmarks/1")
        .set_json(json!({ "title": "Example", "url": "https://example.com/home" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated: Value = test::read_body_json(resp).await;
    assert_eq!(updated["title"], "Example");
    assert_eq!(updated["folderId"], 1);
    assert_eq!(updated["favicon"], "https://example.com/favicon.ico");

    // 显式 null 清空
    let req = TestRequest::put()
        .uri("/api/bookmarks/1")
        .set_json(json!({ "title": "Example", "url": "https://example.com", "folderId": null }))
        .to_request();
    let updated: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated["folderId"], Value::Null);

    // PUT 同样要求 title / url
    let req = TestRequest::put()
        .uri("/api/bookmarks/1")
        .set_json(json!({ "title": "Only title" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );

    let req = TestRequest::put()
        .uri("/api/bookmarks/77")
        .set_json(json!({ "title": "Ghost", "url": "https://example.com" }))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_rt::test]
async fn test_delete_bookmark() {
    let app = bookmark_app!();

    let req = TestRequest::post()
        .uri("/api/bookmarks")
        .set_json(json!({ "title": "Ex", "url": "https://example.com" }))
        .to_request();
    test::call_service(&app, req).await;

    let req = TestRequest::delete().uri("/api/bookmarks/1").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );

    let req = TestRequest::delete().uri("/api/bookmarks/1").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

// =============================================================================
// Health
// =============================================================================

#[actix_rt::test]
async fn test_health_check() {
    let app = bookmark_app!();

    let req = TestRequest::get().uri("/health").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["backend"], "memory");
    assert!(body["uptime"].is_u64());

    let req = TestRequest::get().uri("/health/live").to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NO_CONTENT
    );
}
