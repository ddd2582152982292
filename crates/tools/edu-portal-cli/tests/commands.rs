use clap::Parser;
use edu_portal_cli::cli::{Args, Command};
use edu_portal_cli::error::CliError;
use edu_portal_controllers::DashboardError;
use serde_json::json;
use std::path::{Path, PathBuf};
use tempfile::TempDir;
use wiremock::matchers::{body_json, body_string, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Config file pointing at the mock server with the token kept in `dir`.
fn write_config(dir: &TempDir, server: &MockServer) -> PathBuf {
    let config_path = dir.path().join("config.toml");
    let token_file = dir.path().join("session.json");
    let contents = format!(
        "server_url = \"{}\"\n\
         request_timeout_ms = 2000\n\
         locale = \"en\"\n\
         token_file = {:?}\n\
         \n\
         [retry]\n\
         max_attempts = 1\n",
        server.uri(),
        token_file.to_string_lossy(),
    );
    std::fs::write(&config_path, contents).unwrap();
    config_path
}

fn args(config: &Path, rest: &[&str]) -> Args {
    let mut argv = vec!["edu-portal", "--config", config.to_str().unwrap()];
    argv.extend_from_slice(rest);
    Args::try_parse_from(argv).unwrap()
}

fn stored_token(dir: &TempDir) -> Option<String> {
    let raw = std::fs::read_to_string(dir.path().join("session.json")).ok()?;
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    value["token"].as_str().map(str::to_string)
}

#[test]
fn test_parse_subcommands() {
    let parsed = Args::try_parse_from(["edu-portal", "register", "--email", "t@x.io", "--teacher"])
        .unwrap();
    assert_eq!(
        parsed.command,
        Command::Register {
            email: "t@x.io".to_string(),
            password: None,
            teacher: true,
        }
    );

    let parsed = Args::try_parse_from([
        "edu-portal",
        "submit-answer",
        "--assignment",
        "7",
        "--content",
        "42",
        "--server-url",
        "http://127.0.0.1:9000",
    ])
    .unwrap();
    assert_eq!(
        parsed.command,
        Command::SubmitAnswer {
            assignment: 7,
            content: Some("42".to_string()),
        }
    );
    assert_eq!(parsed.server_url.as_deref(), Some("http://127.0.0.1:9000"));

    let parsed = Args::try_parse_from(["edu-portal", "read-notification", "3", "--ephemeral"])
        .unwrap();
    assert_eq!(parsed.command, Command::ReadNotification { id: 3 });
    assert!(parsed.ephemeral);

    let parsed = Args::try_parse_from(["edu-portal", "grade", "--answer", "9", "--grade", "5"])
        .unwrap();
    assert_eq!(parsed.command, Command::Grade { answer: 9, grade: 5 });

    let parsed = Args::try_parse_from(["edu-portal", "comments", "9"]).unwrap();
    assert_eq!(parsed.command, Command::Comments { answer: 9 });

    let parsed =
        Args::try_parse_from(["edu-portal", "comment", "--answer", "9", "--content", "Nice"])
            .unwrap();
    assert_eq!(
        parsed.command,
        Command::Comment {
            answer: 9,
            content: "Nice".to_string(),
        }
    );
}

#[test]
fn test_parse_rejects_missing_email() {
    assert!(Args::try_parse_from(["edu-portal", "login"]).is_err());
    assert!(Args::try_parse_from(["edu-portal", "submit-answer"]).is_err());
    assert!(Args::try_parse_from(["edu-portal", "grade", "--answer", "9"]).is_err());
}

#[test]
fn test_server_url_flag_overrides_config() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    std::fs::write(&config_path, "server_url = \"https://file.example\"\n").unwrap();

    let parsed = args(&config_path, &["--server-url", "https://flag.example", "logout"]);
    let config = parsed.load_config().unwrap();
    assert_eq!(config.server_url, "https://flag.example");

    let parsed = args(&config_path, &["--server-url", "not a url", "logout"]);
    assert!(matches!(parsed.load_config(), Err(CliError::Client(_))));
}

#[tokio::test]
async fn test_login_stores_token_and_loads_dashboard() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);

    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string("username=s%40x.io&password=secret"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "access_token": "T", "token_type": "bearer" })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .and(header("Authorization", "Bearer T"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 1, "email": "s@x.io", "is_teacher": false })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/my-assignments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 7, "title": "Essay", "description": "500 words" }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    args(&config, &["login", "--email", "s@x.io", "--password", "secret"])
        .run()
        .await
        .unwrap();

    assert_eq!(stored_token(&dir).as_deref(), Some("T"));
}

#[tokio::test]
async fn test_failed_login_keeps_no_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);

    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = args(&config, &["login", "--email", "s@x.io", "--password", "wrong"])
        .run()
        .await;

    assert!(matches!(result, Err(CliError::Auth(_))));
    assert_eq!(stored_token(&dir), None);
}

#[tokio::test]
async fn test_dashboard_without_session_makes_no_requests() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);

    let result = args(&config, &["dashboard"]).run().await;

    assert!(matches!(
        result,
        Err(CliError::Dashboard(DashboardError::NoSession))
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_submit_answer_then_logout() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);
    std::fs::write(dir.path().join("session.json"), r#"{ "token": "T" }"#).unwrap();

    Mock::given(method("POST"))
        .and(path("/answers"))
        .and(header("Authorization", "Bearer T"))
        .and(body_json(json!({ "content": "42", "assignment_id": 7 })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "content": "42", "assignment_id": 7 })),
        )
        .expect(1)
        .mount(&server)
        .await;

    args(&config, &["submit-answer", "--assignment", "7", "--content", "42"])
        .run()
        .await
        .unwrap();
    assert_eq!(stored_token(&dir).as_deref(), Some("T"));

    args(&config, &["logout"]).run().await.unwrap();
    assert_eq!(stored_token(&dir), None);
}

#[tokio::test]
async fn test_rejected_token_is_cleared() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);
    std::fs::write(dir.path().join("session.json"), r#"{ "token": "T" }"#).unwrap();

    Mock::given(method("GET"))
        .and(path("/notifications"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let result = args(&config, &["notifications"]).run().await;

    assert!(matches!(
        result,
        Err(CliError::Dashboard(DashboardError::SessionExpired))
    ));
    assert_eq!(stored_token(&dir), None);
}

#[tokio::test]
async fn test_grade_comment_and_list_comments() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);
    std::fs::write(dir.path().join("session.json"), r#"{ "token": "T" }"#).unwrap();

    Mock::given(method("PUT"))
        .and(path("/answers/9/grade"))
        .and(body_json(json!({ "grade": 5 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "message": "ok" })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/users/me"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "id": 1, "email": "t@x.io", "is_teacher": true })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/comments"))
        .and(body_json(json!({ "content": "Nice", "answer_id": 9, "is_teacher": true })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "content": "Nice", "answer_id": 9, "is_teacher": true })),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/answers/9/comments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "content": "Nice", "answer_id": 9, "is_teacher": true }
        ])))
        .expect(1)
        .mount(&server)
        .await;

    args(&config, &["grade", "--answer", "9", "--grade", "5"])
        .run()
        .await
        .unwrap();
    args(&config, &["comment", "--answer", "9", "--content", "Nice"])
        .run()
        .await
        .unwrap();
    args(&config, &["comments", "9"]).run().await.unwrap();

    assert_eq!(stored_token(&dir).as_deref(), Some("T"));
}

#[tokio::test]
async fn test_forbidden_grade_keeps_token() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(&dir, &server);
    std::fs::write(dir.path().join("session.json"), r#"{ "token": "T" }"#).unwrap();

    Mock::given(method("PUT"))
        .and(path("/answers/9/grade"))
        .respond_with(ResponseTemplate::new(403))
        .expect(1)
        .mount(&server)
        .await;

    let result = args(&config, &["grade", "--answer", "9", "--grade", "5"])
        .run()
        .await;

    assert!(matches!(
        result,
        Err(CliError::Dashboard(DashboardError::Request(_)))
    ));
    assert_eq!(stored_token(&dir).as_deref(), Some("T"));
}
