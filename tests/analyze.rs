use std::time::Duration;

use axum::body::Body;
use axum::http::StatusCode;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use repolens::api::AppState;
use repolens::config::Config;
use repolens::db::Database;
use repolens::github::GithubClient;

async fn state_with_mock_github(server: &MockServer) -> AppState {
    let config = Config {
        github_token: None,
        github_api_url: server.uri(),
        github_timeout: Duration::from_secs(5),
    };
    AppState {
        db: Database::in_memory().unwrap(),
        github: GithubClient::new(&config).unwrap(),
    }
}

fn app(state: &AppState) -> axum::Router {
    repolens::api::build_router(state.clone())
}

fn github_repo_json(full_name: &str) -> Value {
    let (owner, name) = full_name.split_once('/').unwrap();
    json!({
        "full_name": full_name,
        "name": name,
        "owner": {"login": owner},
        "description": "My first repository on GitHub!",
        "html_url": format!("https://github.com/{full_name}"),
        "visibility": "public",
        "stargazers_count": 1420,
        "forks_count": 9,
        "watchers_count": 1420,
        "language": "Rust",
    })
}

fn analyze_request(url: &str, token: Option<&str>) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder()
        .method("POST")
        .uri("/api/analyze")
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder
        .body(Body::from(
            serde_json::to_string(&json!({"repository_url": url})).unwrap(),
        ))
        .unwrap()
}

fn post_json(uri: &str, body: Value) -> axum::http::Request<Body> {
    axum::http::Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

#[tokio::test]
async fn test_analyze_new_repository_scores_100() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_repo_json("octocat/Hello-World")))
        .mount(&server)
        .await;

    let state = state_with_mock_github(&server).await;
    let response = app(&state)
        .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["total_issues"], 0);
    assert_eq!(body["code_quality_score"], 100);
    assert_eq!(body["issues_by_severity"]["critical"], 0);
    assert_eq!(body["issues_by_type"]["security"], 0);

    // The repository row was created with fetched metadata and the score
    let repo_id = body["repository_id"].as_i64().unwrap();
    let repo = state.db.find_repository(repo_id).unwrap().unwrap();
    assert_eq!(repo.full_name, "octocat/Hello-World");
    assert_eq!(repo.stars, Some(1420));
    assert_eq!(repo.code_quality, Some(100));
    assert_eq!(repo.issues_count, Some(0));
}

#[tokio::test]
async fn test_analyze_with_issues_weighted_score() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_repo_json("octocat/Hello-World")))
        .mount(&server)
        .await;

    let state = state_with_mock_github(&server).await;

    // First pass registers the repository
    let response = app(&state)
        .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
        .await
        .unwrap();
    let repo_id = response_json(response).await["repository_id"].as_i64().unwrap();

    // Ingest 1 critical + 2 high issues
    for (severity, issue_type) in [("critical", "security"), ("high", "bug"), ("high", "security")] {
        let response = app(&state)
            .oneshot(post_json(
                &format!("/api/repositories/{repo_id}/issues"),
                json!({
                    "file_path": "src/auth.rs",
                    "line_number": 7,
                    "issue_type": issue_type,
                    "severity": severity,
                    "message": "flagged by scanner",
                    "code": "eval(input)",
                }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
    }

    // Second pass recomputes: 100 - (10*1 + 5*2) = 80
    let response = app(&state)
        .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["repository_id"], repo_id);
    assert_eq!(body["total_issues"], 3);
    assert_eq!(body["code_quality_score"], 80);
    assert_eq!(body["issues_by_severity"], json!({"low": 0, "medium": 0, "high": 2, "critical": 1}));
    assert_eq!(body["issues_by_type"]["security"], 2);
    assert_eq!(body["issues_by_type"]["bug"], 1);

    let repo = state.db.find_repository(repo_id).unwrap().unwrap();
    assert_eq!(repo.code_quality, Some(80));
    assert_eq!(repo.issues_count, Some(3));
}

#[tokio::test]
async fn test_analyze_idempotent_with_unchanged_issues() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_repo_json("octocat/Hello-World")))
        .mount(&server)
        .await;

    let state = state_with_mock_github(&server).await;

    let first = response_json(
        app(&state)
            .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
            .await
            .unwrap(),
    )
    .await;
    let second = response_json(
        app(&state)
            .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
            .await
            .unwrap(),
    )
    .await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_analyze_nonexistent_repository_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not Found"})))
        .mount(&server)
        .await;

    let state = state_with_mock_github(&server).await;
    let response = app(&state)
        .oneshot(analyze_request("https://github.com/octocat/Missing", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("not found"));
}

#[tokio::test]
async fn test_analyze_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let state = state_with_mock_github(&server).await;
    let response = app(&state)
        .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let body = response_json(response).await;
    assert!(body["error"].as_str().unwrap().contains("500"));
}

#[tokio::test]
async fn test_analyze_forwards_bearer_token_to_github() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .and(header("authorization", "token ghp_secret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_repo_json("octocat/Hello-World")))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_with_mock_github(&server).await;
    let response = app(&state)
        .oneshot(analyze_request(
            "https://github.com/octocat/Hello-World",
            Some("ghp_secret"),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_uses_configured_default_token() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .and(header("authorization", "token default_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(github_repo_json("octocat/Hello-World")))
        .expect(1)
        .mount(&server)
        .await;

    let config = Config {
        github_token: Some("default_token".to_string()),
        github_api_url: server.uri(),
        github_timeout: Duration::from_secs(5),
    };
    let state = AppState {
        db: Database::in_memory().unwrap(),
        github: GithubClient::new(&config).unwrap(),
    };

    let response = app(&state)
        .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_analyze_refreshes_metadata_on_rerun() {
    let server = MockServer::start().await;
    let mut first = github_repo_json("octocat/Hello-World");
    first["stargazers_count"] = json!(10);

    let guard = Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(200).set_body_json(first))
        .mount_as_scoped(&server)
        .await;

    let state = state_with_mock_github(&server).await;
    let body = response_json(
        app(&state)
            .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
            .await
            .unwrap(),
    )
    .await;
    let repo_id = body["repository_id"].as_i64().unwrap();
    assert_eq!(state.db.find_repository(repo_id).unwrap().unwrap().stars, Some(10));
    drop(guard);

    let mut second = github_repo_json("octocat/Hello-World");
    second["stargazers_count"] = json!(77);
    Mock::given(method("GET"))
        .and(path("/repos/octocat/Hello-World"))
        .respond_with(ResponseTemplate::new(200).set_body_json(second))
        .mount(&server)
        .await;

    let body = response_json(
        app(&state)
            .oneshot(analyze_request("https://github.com/octocat/Hello-World", None))
            .await
            .unwrap(),
    )
    .await;
    // Same row, refreshed metadata
    assert_eq!(body["repository_id"], repo_id);
    assert_eq!(state.db.find_repository(repo_id).unwrap().unwrap().stars, Some(77));
}
