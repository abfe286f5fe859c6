mod common;

use common::{app, get, json, post_form};

#[tokio::test]
async fn create_then_list() {
    let app = app().await;
    let res = post_form(&app, "/feedback/create", "name=Kim&message=Really+useful&rating=4", None).await;
    assert_eq!(res.status_code(), 200);
    assert_eq!(json(&res)["success"], true);

    let body = json(&get(&app, "/feedback", None).await);
    let entries = body["feedbacks"].as_array().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[1]["id"], 2);
    assert_eq!(entries[1]["name"], "Kim");
    assert_eq!(entries[1]["rating"], 4);
}

#[tokio::test]
async fn rejection_echoes_every_field() {
    let app = app().await;
    let res = post_form(&app, "/feedback/create", "name=Kim&message=meh&rating=2", None).await;
    assert_eq!(res.status_code(), 400);
    let body = json(&res);
    assert_eq!(body["name"], "Kim");
    assert_eq!(body["message"], "meh");
    assert_eq!(body["rating"], 2);
    assert_eq!(body["error"], "message must be at least 5 characters");

    let listed = json(&get(&app, "/feedback", None).await);
    assert_eq!(listed["feedbacks"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn delete_removes_and_ignores_unknown() {
    let app = app().await;
    post_form(&app, "/feedback/delete", "id=42", None).await;
    assert_eq!(json(&get(&app, "/feedback", None).await)["feedbacks"].as_array().unwrap().len(), 1);

    let res = post_form(&app, "/feedback/delete", "id=1", None).await;
    assert_eq!(json(&res)["deleted"], true);
    assert_eq!(json(&get(&app, "/feedback", None).await)["feedbacks"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn posts_are_listed() {
    let app = app().await;
    let body = json(&get(&app, "/posts", None).await);
    assert_eq!(body["posts"].as_array().unwrap().len(), 3);
    assert_eq!(body["posts"][0]["date"], "2026-02-20");
}
