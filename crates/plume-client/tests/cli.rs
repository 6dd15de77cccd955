use assert_cmd::Command;
use httpmock::prelude::*;
use predicates::str::contains;
use serde_json::json;

fn sample_posts() -> serde_json::Value {
    json!([{
        "id": "7b7c2f2e-90e3-4b2f-8f54-3a1f0f6f2b11",
        "title": "Hello from the mock",
        "author": "Ada",
        "content": "body",
        "created_at": "2025-06-01T12:00:00Z",
        "updated_at": "2025-06-01T12:00:00Z",
    }])
}

#[test]
fn list_prints_the_collection() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/api/posts");
        then.status(200).json_body(sample_posts());
    });
    let url = server.base_url();

    Command::cargo_bin("plume-client")
        .unwrap()
        .args(["--site", url.as_str(), "posts", "list"])
        .assert()
        .success()
        .stdout(contains("Hello from the mock"));
}

#[test]
fn offline_list_with_no_cache_fails_cleanly() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(GET).path("/api/posts");
        then.status(200).json_body(sample_posts());
    });
    let url = server.base_url();

    Command::cargo_bin("plume-client")
        .unwrap()
        .args(["--site", url.as_str(), "--offline", "posts", "list"])
        .assert()
        .failure()
        .stderr(contains("NoCachedData"));

    mock.assert_hits(0);
}

#[test]
fn offline_create_is_refused_before_any_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/api/posts");
        then.status(201).json_body(sample_posts());
    });
    let url = server.base_url();

    Command::cargo_bin("plume-client")
        .unwrap()
        .args([
            "--site",
            url.as_str(),
            "--offline",
            "posts",
            "create",
            "--title",
            "t",
            "--author",
            "a",
            "--content",
            "c",
        ])
        .assert()
        .failure()
        .stderr(contains("Offline"));

    mock.assert_hits(0);
}

#[test]
fn missing_site_is_reported() {
    Command::cargo_bin("plume-client")
        .unwrap()
        .env_remove("PLUME_SITE_URL")
        .args(["posts", "list"])
        .assert()
        .failure()
        .stderr(contains("MissingSite"));
}
