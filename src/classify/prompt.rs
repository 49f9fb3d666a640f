//! The fixed instruction sent with every image. Wording changes alter model
//! behavior, so any edit must bump [`PROMPT_VERSION`].

use crate::llm::{ChatCompletionRequest, ChatMessage, ContentPart};

pub const PROMPT_VERSION: u32 = 1;

pub const CLASSIFICATION_PROMPT: &str = concat!(
    "You are a nutrition assistant. Analyze the food image and reply ONLY strict JSON with keys EXACTLY:\n",
    r#"{"label":"<english name>","label_ar":"<arabic name>","#,
    r#""calories_100g":<number>,"protein_100g":<number>,"#,
    r#""carbs_100g":<number>,"fat_100g":<number>,"fiber_100g":<number>,"#,
    r#""confidence":<0..1>}."#,
    "\n",
    "All values are approximate averages per 100 grams. No extra text, no code fences."
);

/// Builds the single upstream request: one user message, prompt then image.
pub fn build_request(model: &str, image_url: &str, max_tokens: u32) -> ChatCompletionRequest {
    ChatCompletionRequest {
        model: model.to_string(),
        messages: vec![ChatMessage::user(vec![
            ContentPart::text(CLASSIFICATION_PROMPT),
            ContentPart::image_url(image_url),
        ])],
        temperature: 0.0,
        max_tokens,
    }
}
