use axum::{
    Json,
    body::Bytes,
    extract::State,
    response::{IntoResponse, Response},
};
use serde_json::{Value, json};

use crate::routes::TRANSLATE;

use super::AppState;
use super::forward::unreadable_body;
use super::models::{TranslateRequest, TranslateResponse};

/// Best-effort translation. Every failure hands back the original text.
pub async fn translate_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Response {
    let request: TranslateRequest = match serde_json::from_slice(&body) {
        Ok(request) => request,
        Err(e) => return unreadable_body(&TRANSLATE, &e),
    };

    if request.source_language == request.target_language {
        return Json(TranslateResponse::untranslated(request.text, None)).into_response();
    }

    let payload = json!({
        "text": request.text,
        "sourceLanguage": request.source_language,
        "targetLanguage": request.target_language,
    });
    let url = TRANSLATE.url(&state.config);
    let reply = state.upstream.post_json(&url, &payload, TRANSLATE.timeout).await;

    let response = match reply {
        Ok(data) => {
            let translated = data
                .get("translatedText")
                .and_then(Value::as_str)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .unwrap_or(request.text);
            TranslateResponse {
                translated_text: translated,
                source_language: request.source_language,
                target_language: request.target_language,
                error: None,
            }
        }
        Err(err) => {
            tracing::warn!(error = %err, "translation service failed");
            let error = match err.status_code() {
                Some(status) => {
                    let prefix = TRANSLATE.on_status.map(|s| s.prefix).unwrap_or_default();
                    format!("{prefix}: {}", status.as_u16())
                }
                None => err.to_string(),
            };
            TranslateResponse::untranslated(request.text, Some(error))
        }
    };
    Json(response).into_response()
}
