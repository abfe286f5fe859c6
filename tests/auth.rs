mod common;

use common::{app, get, head, json, post_form, session_token};

const GOOD_LOGIN: &str = "email=hong%40test.com&password=password123";

#[tokio::test]
async fn dashboard_without_session_redirects_to_login() {
    let app = app().await;
    for path in ["/dashboard", "/dashboard/settings"] {
        let res = get(&app, path, None).await;
        assert_eq!(res.status_code(), 302, "{path}");
        assert_eq!(res.header("location"), Some("/login"));
    }
}

#[tokio::test]
async fn unknown_token_is_treated_as_anonymous() {
    let app = app().await;
    let res = get(&app, "/dashboard", Some("forged-token")).await;
    assert_eq!(res.status_code(), 302);

    // Unprotected routes do not care either way.
    let res = get(&app, "/todos", Some("forged-token")).await;
    assert_eq!(res.status_code(), 200);
}

#[tokio::test]
async fn login_issues_cookie_that_resolves_to_user() {
    let app = app().await;
    let res = post_form(&app, "/login", GOOD_LOGIN, None).await;
    assert_eq!(res.status_code(), 302);
    assert_eq!(res.header("location"), Some("/dashboard"));

    let cookie = res.header("set-cookie").unwrap();
    assert!(cookie.contains("Path=/"));
    assert!(cookie.contains("HttpOnly"));
    assert!(cookie.contains("SameSite=Strict"));
    assert!(cookie.contains("Max-Age=86400"));

    let token = session_token(&res).unwrap();
    let res = get(&app, "/dashboard", Some(&token)).await;
    assert_eq!(res.status_code(), 200);
    let user = &json(&res)["user"];
    assert_eq!(user["id"], "1");
    assert_eq!(user["email"], "hong@test.com");
    assert_eq!(user["name"], "Hong Gildong");
}

#[tokio::test]
async fn wrong_password_is_401_without_cookie() {
    let app = app().await;
    let res = post_form(&app, "/login", "email=hong%40test.com&password=nope", None).await;
    assert_eq!(res.status_code(), 401);
    assert_eq!(res.header("set-cookie"), None);
    let body = json(&res);
    assert_eq!(body["email"], "hong@test.com");
    assert_eq!(body["error"], "invalid email or password");
    assert_eq!(app.sessions.len().await, 0);
}

#[tokio::test]
async fn login_page_redirects_signed_in_users() {
    let app = app().await;
    assert_eq!(get(&app, "/login", None).await.status_code(), 200);

    let token = session_token(&post_form(&app, "/login", GOOD_LOGIN, None).await).unwrap();
    let res = get(&app, "/login", Some(&token)).await;
    assert_eq!(res.status_code(), 302);
    assert_eq!(res.header("location"), Some("/dashboard"));
}

#[tokio::test]
async fn logout_deletes_session_and_clears_cookie() {
    let app = app().await;
    let token = session_token(&post_form(&app, "/login", GOOD_LOGIN, None).await).unwrap();
    assert_eq!(app.sessions.len().await, 1);

    let res = post_form(&app, "/logout", "", Some(&token)).await;
    assert_eq!(res.status_code(), 302);
    assert_eq!(res.header("location"), Some("/login"));
    assert!(res.header("set-cookie").unwrap().contains("Max-Age=0"));
    assert_eq!(session_token(&res), None);
    assert_eq!(app.sessions.len().await, 0);

    let res = get(&app, "/dashboard", Some(&token)).await;
    assert_eq!(res.status_code(), 302);
}

#[tokio::test]
async fn guard_runs_before_404() {
    let app = app().await;
    assert_eq!(get(&app, "/dashboard/missing", None).await.status_code(), 302);
    assert_eq!(get(&app, "/elsewhere/missing", None).await.status_code(), 404);
}

#[tokio::test]
async fn health_checks_answer() {
    let app = app().await;
    assert_eq!(get(&app, "/healthz", None).await.body(), b"ok");
    assert_eq!(get(&app, "/readyz", None).await.body(), b"ready");
}

#[tokio::test]
async fn health_checks_answer_head() {
    let app = app().await;
    for path in ["/healthz", "/readyz"] {
        let res = head(&app, path).await;
        assert_eq!(res.status_code(), 200, "{path}");
        assert!(res.body().is_empty());
    }
}

#[tokio::test]
async fn expired_session_no_longer_opens_dashboard() {
    let mut config = trellis::Config::default();
    config.session.ttl_secs = 0;
    let app = trellis::apps::App::build(&config).await.unwrap();

    let token = session_token(&post_form(&app, "/login", GOOD_LOGIN, None).await).unwrap();
    assert_eq!(get(&app, "/dashboard", Some(&token)).await.status_code(), 302);
    assert_eq!(app.sessions.len().await, 0);
}
