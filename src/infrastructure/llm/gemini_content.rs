use serde::Serialize;

/// Wire shape shared by the `embedContent` and `generateContent` endpoints.
#[derive(Serialize)]
pub(crate) struct GeminiContent<'a> {
    parts: Vec<GeminiPart<'a>>,
}

#[derive(Serialize)]
struct GeminiPart<'a> {
    text: &'a str,
}

impl<'a> GeminiContent<'a> {
    pub(crate) fn from_text(text: &'a str) -> Self {
        Self {
            parts: vec![GeminiPart { text }],
        }
    }
}
