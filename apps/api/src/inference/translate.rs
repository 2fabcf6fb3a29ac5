//! Optional translation pass for generated question text.

use tracing::warn;

use super::{parse_translation_text, InferenceClient, HINDI_TRANSLATION_MODEL};
use crate::models::candidate::Language;

impl InferenceClient {
    /// Translates question text into the candidate's preferred language.
    ///
    /// English is a passthrough. `Other` has no model mapping yet, so it
    /// passes through with a warning instead of calling a placeholder
    /// model. Remote failures keep the untranslated text.
    pub async fn translate_text(&self, text: &str, target: Language) -> String {
        let model = match target {
            Language::English => return text.to_string(),
            Language::Hindi => HINDI_TRANSLATION_MODEL,
            Language::Other => {
                warn!("no translation model mapped for 'Other'; keeping text as-is");
                return text.to_string();
            }
        };

        match self.call_model(model, text).await {
            Ok(body) => parse_translation_text(&body).unwrap_or_else(|| {
                warn!("translation response shape unexpected; keeping original text");
                text.to_string()
            }),
            Err(err) => {
                warn!("translation call failed: {err}; keeping original text");
                text.to_string()
            }
        }
    }
}
