mod common;

use serde_json::json;
use url_shortener::domain::repositories::ShortUrlRepository;

#[tokio::test]
async fn test_redirect_success() {
    let (state, repo) = common::create_test_state();
    let server = common::create_test_server(state);

    common::create_test_record(&repo, "redir1", "https://example.com/target").await;

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), 302);

    let location = response.header("location");
    assert_eq!(location, "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let (state, _repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let response = server.get("/nothere").await;

    response.assert_status_not_found();
    response.assert_json(&json!({ "error": "Short URL not found" }));
}

#[tokio::test]
async fn test_redirect_counts_clicks() {
    let (state, repo) = common::create_test_state();
    let server = common::create_test_server(state);

    common::create_test_record(&repo, "clickm", "https://example.com").await;

    for expected in 1..=3 {
        let response = server.get("/clickm").await;
        assert_eq!(response.status_code(), 302);

        let record = repo.find_by_short_code("clickm").await.unwrap().unwrap();
        assert_eq!(record.clicks, expected);
    }
}

#[tokio::test]
async fn test_shorten_then_redirect_round_trip() {
    let (state, repo) = common::create_test_state();
    let server = common::create_test_server(state);

    let json = server
        .post("/shorten")
        .add_header("Host", common::TEST_HOST)
        .json(&json!({ "longUrl": "https://example.com/a?b=1" }))
        .await
        .json::<serde_json::Value>();
    let code = common::code_of(json["shortUrl"].as_str().unwrap());

    let response = server.get(&format!("/{code}")).await;
    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/a?b=1");
    assert_eq!(
        repo.find_by_short_code(&code).await.unwrap().unwrap().clicks,
        1
    );

    server.get(&format!("/{code}")).await;
    assert_eq!(
        repo.find_by_short_code(&code).await.unwrap().unwrap().clicks,
        2
    );
}

#[tokio::test]
async fn test_redirect_storage_failure() {
    let server = common::create_test_server(common::create_unavailable_state());

    let response = server.get("/abc123").await;

    assert_eq!(response.status_code(), 500);
    response.assert_json(&json!({ "error": "Server error" }));
}

#[tokio::test]
async fn test_redirect_with_trailing_slash() {
    let (state, repo) = common::create_test_state();
    let server = common::create_normalized_test_server(state);

    common::create_test_record(&repo, "slash1", "https://example.com/target").await;

    let response = server.get("/slash1/").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");

    let record = repo.find_by_short_code("slash1").await.unwrap().unwrap();
    assert_eq!(record.clicks, 1);
}
