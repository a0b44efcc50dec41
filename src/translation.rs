use serde_json::{Value, json};

use crate::upstream::Upstream;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

/// Languages offered by the language selector.
pub const LANGUAGE_OPTIONS: [Language; 5] = [
    Language { code: "en", name: "English" },
    Language { code: "es", name: "Spanish" },
    Language { code: "fr", name: "French" },
    Language { code: "zh", name: "Chinese" },
    Language { code: "de", name: "German" },
];

pub fn language_name(code: &str) -> Option<&'static str> {
    LANGUAGE_OPTIONS
        .iter()
        .find(|lang| lang.code == code)
        .map(|lang| lang.name)
}

/// Client for a `/api/translate` style endpoint. Translation never fails
/// the caller: on any problem the input text is returned.
#[derive(Debug, Clone)]
pub struct TranslationClient {
    upstream: Upstream,
    endpoint: String,
}

impl TranslationClient {
    pub fn new(upstream: Upstream, endpoint: impl Into<String>) -> Self {
        Self {
            upstream,
            endpoint: endpoint.into(),
        }
    }

    pub async fn translate_text(&self, text: &str, source: &str, target: &str) -> String {
        if source == target {
            return text.to_string();
        }

        let body = json!({
            "text": text,
            "sourceLanguage": source,
            "targetLanguage": target,
        });
        match self.upstream.post_json(&self.endpoint, &body, None).await {
            Ok(reply) => match reply.get("translatedText").and_then(Value::as_str) {
                Some(translated) => translated.to_string(),
                None => {
                    log::error!("Translation error: reply has no translatedText");
                    text.to_string()
                }
            },
            Err(e) => {
                log::error!("Translation error: {e}");
                text.to_string()
            }
        }
    }
}
