use anyhow::Result;
use mockito::Matcher;
use test_utils::gemini_sse_fixture;

use super::Gemini;
use crate::domain::models::Backend;
use crate::domain::models::BackendPrompt;

impl Gemini {
    fn with_url(url: String) -> Gemini {
        return Gemini {
            url,
            token: "abc".to_string(),
            model: "gemini-2.0-flash".to_string(),
            temperature: "0.7".to_string(),
            timeout: "200".to_string(),
        };
    }
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1beta/models/gemini-2.0-flash?key=abc")
        .with_status(200)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_ok());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/v1beta/models/gemini-2.0-flash?key=abc")
        .with_status(500)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend.health_check().await;

    assert!(res.is_err());
    mock.assert_async().await;
}

#[tokio::test]
async fn it_fails_health_checks_without_a_token() {
    let mut backend = Gemini::with_url("http://localhost".to_string());
    backend.token = "".to_string();

    let res = backend.health_check().await;

    assert_eq!(res.unwrap_err().to_string(), "Gemini token is not defined");
}

#[test]
fn it_normalizes_model_names() {
    let mut backend = Gemini::with_url("http://localhost".to_string());
    assert_eq!(backend.model_path(), "models/gemini-2.0-flash");

    backend.model = "models/gemini-pro".to_string();
    assert_eq!(backend.model_path(), "models/gemini-pro");
}

#[tokio::test]
async fn it_gets_completions() -> Result<()> {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock(
            "POST",
            "/v1beta/models/gemini-2.0-flash:streamGenerateContent?alt=sse&key=abc",
        )
        .match_body(Matcher::Json(serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": "Say hi to the world" }] }],
            "generationConfig": { "temperature": 0.7 },
        })))
        .with_status(200)
        .with_body(gemini_sse_fixture())
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend
        .get_completion(BackendPrompt::new("Say hi to the world".to_string()))
        .await?;

    mock.assert_async().await;
    assert_eq!(res, "Hello World");

    return Ok(());
}

#[tokio::test]
async fn it_fails_completions_on_error_status() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock(
            "POST",
            "/v1beta/models/gemini-2.0-flash:streamGenerateContent?alt=sse&key=abc",
        )
        .with_status(429)
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend
        .get_completion(BackendPrompt::new("Hi".to_string()))
        .await;

    assert_eq!(
        res.unwrap_err().to_string(),
        "Failed to make completion request to Gemini, 429"
    );
}

#[tokio::test]
async fn it_fails_completions_without_text() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock(
            "POST",
            "/v1beta/models/gemini-2.0-flash:streamGenerateContent?alt=sse&key=abc",
        )
        .with_status(200)
        .with_body("data: {\"candidates\": []}\n\n")
        .create_async()
        .await;

    let backend = Gemini::with_url(server.url());
    let res = backend
        .get_completion(BackendPrompt::new("Hi".to_string()))
        .await;

    assert_eq!(
        res.unwrap_err().to_string(),
        "Gemini returned an empty response"
    );
}
