use std::sync::Arc;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, StatusCode};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;
use aegis::accounts::{Account, ACCESS_DENIED_MESSAGE};
use aegis::api::{build_router, create_app_state, create_app_state_with_llm, AppState};
use aegis::config::AegisConfig;
use aegis::errors::AegisError;
use aegis::llm::{LLMProvider, LLMResponse};
use aegis::models::Tier;

fn test_config(dir: &TempDir) -> AegisConfig {
    let mut config = AegisConfig::default();
    config.pacing.enabled = false;
    config.llm.provider = "none".into();
    config.storage.audit_log = dir.path().join("audit.jsonl");
    config.storage.reports_dir = dir.path().join("reports");
    config.accounts = vec![
        Account::new("pro@x.com", "Pro Analyst", Tier::Pro),
        Account::new("premium@x.com", "Enterprise Admin", Tier::Premium),
        Account::new("free@x.com", "Free User", Tier::Free),
    ];
    config
}

fn create_test_state() -> (AppState, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let state = create_app_state(test_config(&dir)).unwrap();
    (state, dir)
}

fn app(state: &AppState) -> axum::Router {
    build_router(state.clone())
}

fn make_request(method: &str, uri: &str, body: Option<Value>) -> axum::http::Request<Body> {
    let builder = axum::http::Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json");

    match body {
        Some(b) => builder.body(Body::from(serde_json::to_string(&b).unwrap())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn remediate_request(body: Value, api_key: Option<&str>) -> axum::http::Request<Body> {
    let mut builder = axum::http::Request::builder()
        .method("POST")
        .uri("/api/remediate")
        .header("content-type", "application/json");
    if let Some(key) = api_key {
        builder = builder.header("x-api-key", key);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

async fn response_json(response: axum::http::Response<Body>) -> Value {
    let (parts, body) = response.into_parts();
    let bytes = body.collect().await.unwrap().to_bytes();
    if bytes.is_empty() {
        panic!("Empty response body. Status: {}, Headers: {:?}", parts.status, parts.headers);
    }
    serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("JSON parse error: {}. Body: {:?}", e, String::from_utf8_lossy(&bytes)))
}

async fn ndjson_lines(response: axum::http::Response<Body>) -> Vec<Value> {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.ends_with('\n'), "stream must end with a newline");
    text.lines()
        .map(|line| serde_json::from_str(line).unwrap_or_else(|e| panic!("bad line {:?}: {}", line, e)))
        .collect()
}

fn messages(lines: &[Value]) -> Vec<String> {
    lines.iter().map(|l| l["message"].as_str().unwrap().to_string()).collect()
}

#[tokio::test]
async fn test_health_endpoint() {
    let (state, _dir) = create_test_state();
    let req = make_request("GET", "/api/health", None);
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "aegis");
    assert_eq!(body["mode"], "SIMULATION");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_remediate_requires_email() {
    let (state, dir) = create_test_state();

    let response = app(&state).oneshot(remediate_request(json!({"threatId": "T1"}), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response_json(response).await["error"], "Email required");

    let response = app(&state).oneshot(remediate_request(json!({"email": "   "}), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // No side effects before validation.
    assert!(!dir.path().join("audit.jsonl").exists());
}

#[tokio::test]
async fn test_remediate_rejects_malformed_json() {
    let (state, _dir) = create_test_state();
    let req = axum::http::Request::builder()
        .method("POST")
        .uri("/api/remediate")
        .header("content-type", "application/json")
        .body(Body::from("{\"email\": "))
        .unwrap();
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_remediate_forbidden_for_free_tier() {
    let (state, dir) = create_test_state();

    for email in ["a@b.com", "free@x.com"] {
        let response = app(&state).oneshot(remediate_request(json!({"email": email}), None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_ne!(response.headers()[header::CONTENT_TYPE], "application/x-ndjson");
        assert_eq!(response_json(response).await["error"], ACCESS_DENIED_MESSAGE);
    }
    assert!(!dir.path().join("audit.jsonl").exists());
}

#[tokio::test]
async fn test_remediate_streams_ndjson_for_pro() {
    let (state, dir) = create_test_state();
    let response = app(&state)
        .oneshot(remediate_request(json!({"email": "pro@x.com", "threatId": "T1"}), Some("live-demonstration-key")))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()[header::CONTENT_TYPE], "application/x-ndjson");
    assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");

    let lines = ndjson_lines(response).await;
    for line in &lines {
        let obj = line.as_object().unwrap();
        assert_eq!(obj.len(), 3);
        assert!(obj.contains_key("timestamp") && obj.contains_key("message") && obj.contains_key("type"));
    }
    let timestamps: Vec<&str> = lines.iter().map(|l| l["timestamp"].as_str().unwrap()).collect();
    assert!(timestamps.windows(2).all(|w| w[0] <= w[1]));

    let msgs = messages(&lines);
    assert_eq!(msgs[0], "Initiating remediation workflow for pro@x.com...");
    assert_eq!(msgs[1], "[Workflow] Authenticating with Vault for Threat ID: T1");
    assert_eq!(msgs[2], "[Workflow] RBAC Check Passed: User Tier is PRO");
    assert!(msgs.contains(&"Aegis Vizier Protocol Initiated...".to_string()));
    assert!(msgs.contains(&"AI Brain is currently offline. Please try manual steps.".to_string()));
    assert!(msgs.contains(&"Remediation outcome: TEXT".to_string()));
    assert!(msgs.iter().any(|m| m.starts_with("Audit record ") && m.ends_with(" committed.")));
    assert!(msgs.iter().any(|m| m.starts_with("Compliance report stored at http://localhost:8080/api/reports/pro@x.com/")));
    assert_eq!(msgs.last().unwrap(), "[Workflow] 'cyber-remediator-ops' completed successfully.");
    assert_eq!(lines.last().unwrap()["type"], "success");

    let audit = std::fs::read_to_string(dir.path().join("audit.jsonl")).unwrap();
    let record: Value = serde_json::from_str(audit.lines().next().unwrap()).unwrap();
    assert_eq!(record["identity"], "pro@x.com");
    assert_eq!(record["tier"], "PRO");
    assert_eq!(record["threatId"], "T1");
}

#[tokio::test]
async fn test_remediate_premium_runs_workflow_steps() {
    let (state, _dir) = create_test_state();
    let response = app(&state)
        .oneshot(remediate_request(json!({"email": "premium@x.com"}), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let msgs = messages(&ndjson_lines(response).await);
    assert_eq!(msgs[1], "[Workflow] Authenticating with Vault for Threat ID: Unknown");
    assert!(msgs.contains(&"AUTONOMOUS REMEDIATION SUCCESSFUL.".to_string()));
    assert!(msgs.contains(&"Remediation outcome: EXECUTION".to_string()));
    assert!(msgs.contains(&"[Workflow] Vault Authentication Handshake".to_string()));
}

struct ScriptLLM;

#[async_trait]
impl LLMProvider for ScriptLLM {
    async fn complete(&self, _prompt: &str, _system: Option<&str>) -> Result<LLMResponse, AegisError> {
        Ok(LLMResponse {
            content: "Dear Data Controller, ...".into(),
            input_tokens: Some(10),
            output_tokens: Some(20),
            model: "stub".into(),
        })
    }

    fn provider_name(&self) -> &str { "stub" }
    fn model_name(&self) -> &str { "stub" }
}

#[tokio::test]
async fn test_remediate_pro_with_generator_returns_script() {
    let dir = tempfile::tempdir().unwrap();
    let state = create_app_state_with_llm(test_config(&dir), Arc::new(ScriptLLM)).unwrap();
    let response = app(&state)
        .oneshot(remediate_request(json!({"email": "pro@x.com"}), None))
        .await
        .unwrap();

    let msgs = messages(&ndjson_lines(response).await);
    assert!(msgs.contains(&"Custom Remediation Script Generated.".to_string()));
    assert!(msgs.contains(&"Remediation outcome: SCRIPT".to_string()));
    assert!(msgs.contains(&"Identity state verified. Cleaning up worker containers.".to_string()));
}

#[tokio::test]
async fn test_empty_api_key_is_unauthorized() {
    let (state, _dir) = create_test_state();
    let response = app(&state)
        .oneshot(remediate_request(json!({"email": "pro@x.com"}), Some("")))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_configured_api_token_must_match() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = test_config(&dir);
    config.api_token = Some("s3cret".into());
    let state = create_app_state(config).unwrap();

    let response = app(&state).oneshot(remediate_request(json!({"email": "pro@x.com"}), Some("wrong"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app(&state).oneshot(remediate_request(json!({"email": "pro@x.com"}), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = app(&state).oneshot(remediate_request(json!({"email": "pro@x.com"}), Some("s3cret"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    ndjson_lines(response).await;
}

#[tokio::test]
async fn test_side_channel_failures_do_not_abort_stream() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x").unwrap();

    let mut config = test_config(&dir);
    config.storage.audit_log = blocker.join("audit.jsonl");
    config.storage.reports_dir = blocker.join("reports");
    let state = create_app_state(config).unwrap();

    let response = app(&state).oneshot(remediate_request(json!({"email": "pro@x.com"}), None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let msgs = messages(&ndjson_lines(response).await);
    assert!(!msgs.iter().any(|m| m.starts_with("Audit record")));
    assert!(!msgs.iter().any(|m| m.starts_with("Compliance report stored")));
    assert_eq!(msgs.last().unwrap(), "[Workflow] 'cyber-remediator-ops' completed successfully.");
}

#[tokio::test]
async fn test_scan_endpoint() {
    let (state, _dir) = create_test_state();

    let req = make_request("POST", "/api/scan", Some(json!({"type": "EMAIL", "value": "a@b.com"})));
    let response = app(&state).oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["riskScore"], 85);
    assert_eq!(body["foundBreaches"], 8);

    let req = make_request("POST", "/api/scan", Some(json!({"type": "SOCIAL", "value": "@handle", "mode": "REAL"})));
    let body = response_json(app(&state).oneshot(req).await.unwrap()).await;
    assert_eq!(body["details"]["sources"][0]["status"], "SKIPPED");
    assert_eq!(body["graphData"]["nodes"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_scan_rejects_invalid_input() {
    let (state, _dir) = create_test_state();
    for body in [
        json!({"type": "FAX", "value": "123"}),
        json!({"type": "EMAIL", "value": "not-an-email"}),
        json!({"type": "EMAIL", "value": "a@b.com", "mode": "TURBO"}),
    ] {
        let req = make_request("POST", "/api/scan", Some(body));
        let response = app(&state).oneshot(req).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn test_graph_endpoint() {
    let (state, _dir) = create_test_state();

    let response = app(&state).oneshot(make_request("GET", "/api/graph", None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app(&state)
        .oneshot(make_request("GET", "/api/graph?identity=a@b.com", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response_json(response).await;
    assert_eq!(body["nodes"].as_array().unwrap().len(), 9);
    assert_eq!(body["edges"].as_array().unwrap().len(), 8);
    assert_eq!(body["riskScore"], 85);

    let response = app(&state)
        .oneshot(make_request("GET", "/api/graph?identity=ghost@x.com&mode=REAL", None))
        .await
        .unwrap();
    let body = response_json(response).await;
    assert_eq!(body["nodes"][0]["label"], "GHOST@X.COM");
    assert_eq!(body["riskScore"], 0);
}

#[tokio::test]
async fn test_stored_report_is_retrievable() {
    let (state, _dir) = create_test_state();
    let response = app(&state)
        .oneshot(remediate_request(json!({"email": "pro@x.com", "threatId": "T9"}), None))
        .await
        .unwrap();
    let msgs = messages(&ndjson_lines(response).await);
    let url = msgs
        .iter()
        .find_map(|m| m.strip_prefix("Compliance report stored at "))
        .unwrap()
        .to_string();
    let path = url.strip_prefix("http://localhost:8080").unwrap();

    let response = app(&state).oneshot(make_request("GET", path, None)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(response.headers()[header::CONTENT_TYPE].to_str().unwrap().starts_with("text/plain"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("pro@x.com"));
    assert!(text.contains("T9"));
}

#[tokio::test]
async fn test_report_lookup_errors() {
    let (state, _dir) = create_test_state();

    let response = app(&state)
        .oneshot(make_request("GET", "/api/reports/pro@x.com/missing.txt", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app(&state)
        .oneshot(make_request("GET", "/api/reports/.hidden/report.txt", None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
