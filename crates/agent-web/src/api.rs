//! API Client

use serde::{Deserialize, Serialize};

/// The three form fields, as the server expects them
#[derive(Clone, Debug, Default, Serialize)]
pub struct AnalysisForm {
    pub cryptocurrency: String,
    pub openai_api_key: String,
    pub serp_api_key: String,
}

#[derive(Debug, Deserialize)]
struct AnalyzeResponse {
    result: String,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

/// reqwest on wasm needs an absolute URL
fn endpoint(path: &str) -> String {
    let origin = web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost:3000".into());
    format!("{}{}", origin.trim_end_matches('/'), path)
}

/// Run the analysis; the error string is shown in place of the report
pub async fn run_analysis(form: &AnalysisForm) -> Result<String, String> {
    let response = reqwest::Client::new()
        .post(endpoint("/api/analyze"))
        .json(form)
        .send()
        .await
        .map_err(|e| e.to_string())?;

    let status = response.status();
    let body = response.text().await.map_err(|e| e.to_string())?;
    parse_reply(status.is_success(), &body)
}

fn parse_reply(success: bool, body: &str) -> Result<String, String> {
    if success {
        serde_json::from_str::<AnalyzeResponse>(body)
            .map(|r| r.result)
            .map_err(|e| format!("Unreadable response: {}", e))
    } else {
        Err(serde_json::from_str::<ErrorResponse>(body)
            .map(|r| r.error)
            .unwrap_or_else(|_| "Request failed".into()))
    }
}
