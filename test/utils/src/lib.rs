/// Server-sent events body as returned by Gemini's `streamGenerateContent`
/// with `alt=sse`.
pub fn gemini_sse_fixture() -> &'static str {
    return r#"
data: {"candidates": [{"content": {"parts": [{"text": "Hello "}],"role": "model"},"index": 0}]}

data: {"candidates": [{"content": {"parts": [{"text": "World"}],"role": "model"},"finishReason": "STOP","index": 0}]}
"#
    .trim_start();
}

/// Newline delimited JSON body as returned by Ollama's `/api/generate`.
pub fn ollama_ndjson_fixture() -> &'static str {
    return r#"
{"model":"codellama:latest","response":"Hello ","done":false}
{"model":"codellama:latest","response":"World","done":true}
"#
    .trim_start();
}

/// Minimal config file exercising every section of the loader.
pub fn config_fixture() -> &'static str {
    return r#"
# Assist backend
backend = "ollama"
model = "codellama:13b"
compiler-url = "http://compiler.internal:4000"
request-timeout = 5000
language = "python"
store = "memory"
"#
    .trim_start();
}
