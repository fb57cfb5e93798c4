//! Browser workflow over the HTMX search page and JSON endpoints.

use reqwest::StatusCode;
use reqwest::header::{ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE, ORIGIN};

use crate::support::{sample_catalog, spawn_app};

/// Extracts the load-more URL from a fragment, if one is offered.
fn load_more_url(fragment: &str) -> Option<String> {
    let start = fragment.find("hx-get=\"/htmx/search?")? + "hx-get=\"".len();
    let end = start + fragment[start..].find('"')?;
    Some(fragment[start..end].replace("&amp;", "&"))
}

#[tokio::test]
async fn test_search_page_then_load_more_until_exhausted() {
    let addr = spawn_app(sample_catalog()).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let page = client.get(&base).send().await.unwrap();
    assert_eq!(page.status(), StatusCode::OK);
    let page = page.text().await.unwrap();
    assert!(page.contains("Fashion Search"));
    assert!(page.contains(r#"hx-get="/htmx/search""#));

    let first = client
        .get(format!("{base}/htmx/search"))
        .query(&[("query", "blue jeans")])
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(first.matches("% match").count(), 5);
    assert!(first.contains(r#"<div id="results""#));
    assert!(first.contains("₹999"));

    let next = load_more_url(&first).unwrap();
    assert_eq!(next, "/htmx/search?query=blue%20jeans&page=2");

    let second = client
        .get(format!("{base}{next}"))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert_eq!(second.matches("% match").count(), 3);
    assert!(second.contains(r##"hx-swap-oob="beforeend:#results""##));
    assert_eq!(load_more_url(&second), None);

    // Cards from page two never repeat page one.
    for letter in ["F", "G", "H"] {
        let name = format!("Roadster Men Jeans {letter}<");
        assert!(!first.contains(&name));
        assert!(second.contains(&name));
    }
}

#[tokio::test]
async fn test_blank_query_leaves_page_untouched() {
    let addr = spawn_app(sample_catalog()).await;

    let response = reqwest::get(format!("http://{addr}/htmx/search?query=+"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_card_placeholder_is_served() {
    let addr = spawn_app(sample_catalog()).await;
    let base = format!("http://{addr}");

    let fragment = reqwest::get(format!("{base}/htmx/search?query=kurta"))
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(fragment.contains(r#"src="/api/placeholder/400/400""#));

    let image = reqwest::get(format!("{base}/api/placeholder/400/400"))
        .await
        .unwrap();
    assert_eq!(image.status(), StatusCode::OK);
    assert_eq!(image.headers()[CONTENT_TYPE], "image/svg+xml");
}

#[tokio::test]
async fn test_json_api_and_status() {
    let addr = spawn_app(sample_catalog()).await;
    let base = format!("http://{addr}");
    let client = reqwest::Client::new();

    let response = client
        .post(format!("{base}/search"))
        .json(&serde_json::json!({ "query": "jeans", "page_size": 100, "page": 1 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["results"].as_array().unwrap().len(), 8);
    assert_eq!(body["has_more"], false);
    assert_eq!(body["current_page"], 1);

    let response = client
        .post(format!("{base}/search"))
        .json(&serde_json::json!({ "query": "jeans", "page_size": 500 }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let status: serde_json::Value = client
        .get(format!("{base}/api/status"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["status"], "online");
    assert_eq!(status["dataset_size"], 10);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let addr = spawn_app(sample_catalog()).await;

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/api/status"))
        .header(ORIGIN, "http://localhost:5173")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response.headers()[ACCESS_CONTROL_ALLOW_ORIGIN],
        "http://localhost:5173"
    );

    let response = reqwest::Client::new()
        .get(format!("http://{addr}/api/status"))
        .header(ORIGIN, "http://evil.test")
        .send()
        .await
        .unwrap();
    assert!(response.headers().get(ACCESS_CONTROL_ALLOW_ORIGIN).is_none());
}
