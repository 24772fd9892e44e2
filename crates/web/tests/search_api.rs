//! Integration tests for search history and saved searches.

mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::{body_json, delete_authed, get_authed, get_public, post_authed, request, test_app};

// ---------------------------------------------------------------------------
// History
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recorded_searches_come_back_most_recent_first() {
    let (app, _stub) = test_app().await;

    for keyword in ["inari", "daruma", "komainu"] {
        let response = post_authed(
            app.clone(),
            "/api/search/history",
            json!({ "keyword": keyword }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    let response = get_authed(app, "/api/search/history").await;
    let json = body_json(response).await;
    let keywords: Vec<&str> = json
        .as_array()
        .unwrap()
        .iter()
        .map(|entry| entry["filters"]["keyword"].as_str().unwrap())
        .collect();
    assert_eq!(keywords, vec!["komainu", "daruma", "inari"]);
}

#[tokio::test]
async fn empty_filter_sets_are_skipped() {
    let (app, _stub) = test_app().await;

    let response = post_authed(app.clone(), "/api/search/history", json!({})).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_authed(app, "/api/search/history").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn history_keeps_only_the_last_ten() {
    let (app, _stub) = test_app().await;

    for i in 0..12 {
        post_authed(
            app.clone(),
            "/api/search/history",
            json!({ "keyword": format!("query-{i}") }),
        )
        .await;
    }

    let response = get_authed(app, "/api/search/history").await;
    let json = body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 10);
    assert_eq!(entries[0]["filters"]["keyword"], "query-11");
    assert_eq!(entries[9]["filters"]["keyword"], "query-2");
}

#[tokio::test]
async fn clear_history_empties_it() {
    let (app, _stub) = test_app().await;

    post_authed(
        app.clone(),
        "/api/search/history",
        json!({ "keyword": "inari" }),
    )
    .await;

    let response = request(
        app.clone(),
        Method::DELETE,
        "/api/search/history",
        Some(common::TEST_TOKEN),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_authed(app, "/api/search/history").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn history_requires_authentication() {
    let (app, _stub) = test_app().await;
    let response = get_public(app, "/api/search/history").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

// ---------------------------------------------------------------------------
// Saved searches
// ---------------------------------------------------------------------------

#[tokio::test]
async fn saved_search_crud_round_trip() {
    let (app, _stub) = test_app().await;

    let response = post_authed(
        app.clone(),
        "/api/search/saved",
        json!({
            "name": "Kyoto shrines",
            "filters": { "prefectures": ["Kyoto"], "categories": ["shrine"] },
        }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    assert_eq!(created["name"], "Kyoto shrines");
    let id = created["id"].as_str().unwrap().to_string();

    let response = get_authed(app.clone(), "/api/search/saved").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);
    assert_eq!(json[0]["id"], id);

    let response = delete_authed(app.clone(), &format!("/api/search/saved/{id}")).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = get_authed(app, "/api/search/saved").await;
    let json = body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn deleting_unknown_saved_search_is_404() {
    let (app, _stub) = test_app().await;
    let response = delete_authed(
        app,
        &format!("/api/search/saved/{}", uuid::Uuid::new_v4()),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
}

#[tokio::test]
async fn blank_saved_search_name_is_rejected() {
    let (app, _stub) = test_app().await;
    let response = post_authed(
        app,
        "/api/search/saved",
        json!({ "name": "   ", "filters": { "keyword": "inari" } }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "VALIDATION_ERROR");
}
