use axum::http::StatusCode;
use serde_json::json;

use realtor_gateway::translation::TranslationClient;
use realtor_gateway::upstream::Upstream;

mod test_helpers;
use test_helpers::*;

mod client {
    use super::*;

    fn client_for(base_url: &str) -> TranslationClient {
        TranslationClient::new(Upstream::new(), format!("{base_url}/api/translate"))
    }

    #[tokio::test]
    async fn test_same_language_skips_the_network() {
        let stub = spawn_stub(Reply::Json(StatusCode::OK, json!({"translatedText": "x"}))).await;

        let out = client_for(&stub.base_url)
            .translate_text("Three bedrooms", "en", "en")
            .await;

        assert_eq!(out, "Three bedrooms");
        assert_eq!(stub.recorder.count(), 0);
    }

    #[tokio::test]
    async fn test_translated_text_is_returned() {
        let stub =
            spawn_stub(Reply::Json(StatusCode::OK, json!({"translatedText": "Tres habitaciones"})))
                .await;

        let out = client_for(&stub.base_url)
            .translate_text("Three bedrooms", "en", "es")
            .await;

        assert_eq!(out, "Tres habitaciones");
        assert_eq!(
            stub.recorder.last().body,
            Some(json!({"text": "Three bedrooms", "sourceLanguage": "en", "targetLanguage": "es"}))
        );
    }

    #[tokio::test]
    async fn test_failing_endpoint_returns_original() {
        let stub = spawn_stub(Reply::Json(StatusCode::INTERNAL_SERVER_ERROR, json!({}))).await;

        let out = client_for(&stub.base_url)
            .translate_text("Three bedrooms", "en", "es")
            .await;

        assert_eq!(out, "Three bedrooms");
        assert_eq!(stub.recorder.count(), 1);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_original() {
        let base = unreachable_base_url().await;

        let out = client_for(&base).translate_text("Near transit", "en", "fr").await;

        assert_eq!(out, "Near transit");
    }

    #[tokio::test]
    async fn test_through_the_gateway() {
        // client -> gateway /api/translate -> failing translation backend
        let backend = spawn_stub(Reply::Json(StatusCode::BAD_GATEWAY, json!({}))).await;
        let gateway = serve(app_for(&backend.base_url)).await;

        let out = client_for(&gateway)
            .translate_text("Garden and garage", "en", "de")
            .await;

        assert_eq!(out, "Garden and garage");
        assert_eq!(backend.recorder.count(), 1);
    }
}

mod route {
    use super::*;

    #[tokio::test]
    async fn test_same_language_short_circuits() {
        let stub = spawn_stub(Reply::Json(StatusCode::OK, json!({}))).await;

        let (status, body) = post_json(
            app_for(&stub.base_url),
            "/api/translate",
            json!({"text": "hello", "sourceLanguage": "en", "targetLanguage": "en"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"translatedText": "hello"}));
        assert_eq!(stub.recorder.count(), 0);
    }

    #[tokio::test]
    async fn test_success_echoes_languages() {
        let stub = spawn_stub(Reply::Json(StatusCode::OK, json!({"translatedText": "hola"}))).await;

        let (status, body) = post_json(
            app_for(&stub.base_url),
            "/api/translate",
            json!({"text": "hello", "sourceLanguage": "en", "targetLanguage": "es"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"translatedText": "hola", "sourceLanguage": "en", "targetLanguage": "es"})
        );
        assert_eq!(stub.recorder.last().path_and_query, "/api/translate");
    }

    #[tokio::test]
    async fn test_empty_translation_falls_back_to_input() {
        let stub = spawn_stub(Reply::Json(StatusCode::OK, json!({"translatedText": ""}))).await;

        let (_, body) = post_json(
            app_for(&stub.base_url),
            "/api/translate",
            json!({"text": "hello", "sourceLanguage": "en", "targetLanguage": "zh"}),
        )
        .await;

        assert_eq!(body["translatedText"], "hello");
    }

    #[tokio::test]
    async fn test_unreadable_request() {
        let stub = spawn_stub(Reply::Json(StatusCode::OK, json!({}))).await;

        let (status, body) = post_raw(app_for(&stub.base_url), "/api/translate", "{text").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"translatedText": "", "error": "Translation failed"}));
        assert_eq!(stub.recorder.count(), 0);
    }

    #[tokio::test]
    async fn test_service_error_keeps_original_text() {
        let stub = spawn_stub(Reply::Json(StatusCode::SERVICE_UNAVAILABLE, json!({}))).await;

        let (status, body) = post_json(
            app_for(&stub.base_url),
            "/api/translate",
            json!({"text": "hello", "sourceLanguage": "en", "targetLanguage": "es"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"translatedText": "hello", "error": "Translation service error: 503"})
        );
    }
}
