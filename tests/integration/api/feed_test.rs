//! Feed API integration tests
//!
//! Tests for post creation, listing, reading, and the owner-only update and
//! delete rules.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

use crate::{assert_ok, assert_status};
use crate::common::{create_test_user, TestApp, TestUser, TEST_PAGE_SIZE};

async fn create_post(app: &TestApp, user: &TestUser, title: &str) -> Value {
    let response = app
        .request(
            Method::POST,
            "/feed/post",
            Some(&user.token),
            Some(json!({
                "title": title,
                "content": "Some interesting content",
                "imageUrl": "images\\duck.png"
            })),
        )
        .await;
    assert_status!(response, StatusCode::CREATED);
    response.body["post"].clone()
}

fn post_uri(post: &Value) -> String {
    format!("/feed/post/{}", post["_id"].as_str().unwrap())
}

#[tokio::test]
async fn test_create_post() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;

    let response = app
        .request(
            Method::POST,
            "/feed/post",
            Some(&ann.token),
            Some(json!({
                "title": "First post",
                "content": "Some interesting content",
                "imageUrl": "images\\duck.png"
            })),
        )
        .await;

    assert_status!(response, StatusCode::CREATED);
    assert_eq!(response.body["message"], "Post created successfully!");
    assert_eq!(response.body["creator"], json!({ "_id": ann.id, "name": "ann" }));
    assert_eq!(response.body["post"]["title"], "First post");
    assert_eq!(response.body["post"]["imageUrl"], "images/duck.png");
    assert_eq!(response.body["post"]["creator"]["_id"], ann.id.as_str());
}

#[tokio::test]
async fn test_create_post_requires_token() {
    let app = TestApp::new();

    let response = app
        .request(
            Method::POST,
            "/feed/post",
            None,
            Some(json!({ "title": "First post", "content": "Some content", "imageUrl": "a.png" })),
        )
        .await;

    assert_status!(response, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body, json!({ "message": "Not authenticated." }));
}

#[tokio::test]
async fn test_create_post_validation() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;

    let response = app
        .request(
            Method::POST,
            "/feed/post",
            Some(&ann.token),
            Some(json!({ "title": "Hi", "content": "Tiny", "imageUrl": "a.png" })),
        )
        .await;

    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["data"].as_array().map(Vec::len), Some(2));
}

#[tokio::test]
async fn test_create_post_incomplete_body_is_json_error() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;

    let response = app
        .request(
            Method::POST,
            "/feed/post",
            Some(&ann.token),
            Some(json!({ "title": "abcdef" })),
        )
        .await;

    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "Validation failed.");
    assert_eq!(response.body["data"][0]["field"], "body");
    assert!(response.body["data"][0]["message"]
        .as_str()
        .is_some_and(|m| m.contains("content")));
}

#[tokio::test]
async fn test_list_posts_pages_newest_first() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;
    for title in ["Post number one", "Post number two", "Post number three"] {
        create_post(&app, &ann, title).await;
    }

    let response = app.get("/feed/posts?page=1", Some(&ann.token)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["totalItems"], 3);
    let titles: Vec<&str> = response.body["posts"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles.len(), TEST_PAGE_SIZE as usize);
    assert_eq!(titles, vec!["Post number three", "Post number two"]);

    let response = app.get("/feed/posts?page=2", Some(&ann.token)).await;
    assert_eq!(response.body["posts"][0]["title"], "Post number one");
    assert_eq!(response.body["posts"][0]["creator"]["name"], "ann");
}

#[tokio::test]
async fn test_list_posts_page_below_one_is_first_page() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;
    for title in ["Post number one", "Post number two", "Post number three"] {
        create_post(&app, &ann, title).await;
    }

    for uri in ["/feed/posts?page=0", "/feed/posts?page=-1"] {
        let response = app.get(uri, Some(&ann.token)).await;
        assert_status!(response, StatusCode::OK);
        assert_eq!(response.body["posts"][0]["title"], "Post number three");
        assert_eq!(response.body["totalItems"], 3);
    }
}

#[tokio::test]
async fn test_list_posts_rejects_non_numeric_page_as_json() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;

    let response = app.get("/feed/posts?page=two", Some(&ann.token)).await;
    assert_status!(response, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(response.body["message"], "Validation failed.");
    assert_eq!(response.body["data"][0]["field"], "query");
}

#[tokio::test]
async fn test_list_posts_requires_token() {
    let app = TestApp::new();
    let response = app.get("/feed/posts", None).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_get_post() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;
    let bob = create_test_user(&app, "bob@x.com").await;
    let post = create_post(&app, &ann, "First post").await;

    // Reading is open to any signed-in user
    let response = app.get(&post_uri(&post), Some(&bob.token)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["post"]["_id"], post["_id"]);
}

#[tokio::test]
async fn test_unknown_or_malformed_post_is_404() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;

    let response = app
        .get("/feed/post/6f1c2a9e-3b4d-4e5f-8a9b-0c1d2e3f4a5b", Some(&ann.token))
        .await;
    assert_status!(response, StatusCode::NOT_FOUND);
    assert_eq!(response.body["message"], "Could not find post.");

    let response = app.get("/feed/post/5c0f66b979af55031b34728a", Some(&ann.token)).await;
    assert_status!(response, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_owner_cannot_delete() {
    let app = TestApp::new();
    let u1 = create_test_user(&app, "u1@x.com").await;
    let u2 = create_test_user(&app, "u2@x.com").await;
    let post = create_post(&app, &u2, "Owned by u2").await;

    let response = app
        .request(Method::DELETE, &post_uri(&post), Some(&u1.token), None)
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);
    assert_eq!(response.body, json!({ "message": "Not authorized!" }));

    // The post is retained
    let response = app.get(&post_uri(&post), Some(&u2.token)).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["post"]["title"], "Owned by u2");
}

#[tokio::test]
async fn test_non_owner_cannot_update() {
    let app = TestApp::new();
    let u1 = create_test_user(&app, "u1@x.com").await;
    let u2 = create_test_user(&app, "u2@x.com").await;
    let post = create_post(&app, &u2, "Owned by u2").await;

    let response = app
        .request(
            Method::PUT,
            &post_uri(&post),
            Some(&u1.token),
            Some(json!({ "title": "Hijacked!", "content": "Hijacked content" })),
        )
        .await;
    assert_status!(response, StatusCode::FORBIDDEN);

    let response = app.get(&post_uri(&post), Some(&u2.token)).await;
    assert_eq!(response.body["post"]["title"], "Owned by u2");
}

#[tokio::test]
async fn test_anonymous_mutation_is_401_not_403() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;
    let post = create_post(&app, &ann, "First post").await;

    let response = app.request(Method::DELETE, &post_uri(&post), None, None).await;
    assert_status!(response, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_owner_updates_post() {
    let app = TestApp::new();
    let ann = create_test_user(&app, "ann@x.com").await;
    let post = create_post(&app, &ann, "First post").await;

    let response = app
        .request(
            Method::PUT,
            &post_uri(&post),
            Some(&ann.token),
            Some(json!({
                "title": "Edited title",
                "content": "Edited content",
                "imageUrl": "undefined"
            })),
        )
        .await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Post updated!");
    assert_eq!(response.body["post"]["title"], "Edited title");
    assert_eq!(response.body["post"]["imageUrl"], "images/duck.png");
}

#[tokio::test]
async fn test_owner_deletes_post_and_image() {
    let app = TestApp::new();
    let image = app.images.path().join("duck.png");
    std::fs::write(&image, b"png").unwrap();

    let ann = create_test_user(&app, "ann@x.com").await;
    let post = create_post(&app, &ann, "First post").await;

    let response = app
        .request(Method::DELETE, &post_uri(&post), Some(&ann.token), None)
        .await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body["message"], "Deleted post.");
    assert!(!image.exists());

    let response = app.get(&post_uri(&post), Some(&ann.token)).await;
    assert_status!(response, StatusCode::NOT_FOUND);

    let response = app.get("/feed/posts", Some(&ann.token)).await;
    assert_eq!(response.body["totalItems"], 0);
}

#[tokio::test]
async fn test_deleting_own_post_keeps_image_shared_with_others() {
    let app = TestApp::new();
    let image = app.images.path().join("duck.png");
    assert_ok!(std::fs::write(&image, b"png"), "Failed to seed image");

    let ann = create_test_user(&app, "ann@x.com").await;
    let bob = create_test_user(&app, "bob@x.com").await;
    let anns_post = create_post(&app, &ann, "Ann's post").await;
    let bobs_post = create_post(&app, &bob, "Bob's post").await;

    let response = app
        .request(Method::DELETE, &post_uri(&bobs_post), Some(&bob.token), None)
        .await;
    assert_status!(response, StatusCode::OK);
    assert!(image.exists());

    let response = app
        .request(Method::DELETE, &post_uri(&anns_post), Some(&ann.token), None)
        .await;
    assert_status!(response, StatusCode::OK);
    assert!(!image.exists());
}

#[tokio::test]
async fn test_images_are_served() {
    let app = TestApp::new();
    std::fs::write(app.images.path().join("duck.png"), b"png").unwrap();

    let response = app.get("/images/duck.png", None).await;
    assert_status!(response, StatusCode::OK);
    assert_eq!(response.body, Value::String("png".to_string()));
}

#[tokio::test]
async fn test_cors_preflight() {
    let app = TestApp::new();

    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/feed/posts")
        .header(header::ORIGIN, "http://localhost:3000")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "GET")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization")
        .body(Body::empty())
        .unwrap();
    let response = app.send(request).await;

    assert_status!(response, StatusCode::OK);
    assert_eq!(
        response.headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
}
