use serde::{Deserialize, Serialize};
use std::borrow::Cow;

pub const DEFAULT_DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Body of `POST /classify`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassifyRequest {
    #[serde(default)]
    pub image: Option<String>,
    /// Legacy field name; `image` wins when both are sent.
    #[serde(default, rename = "imageBase64", skip_serializing_if = "Option::is_none")]
    pub image_base64: Option<String>,
}

impl ClassifyRequest {
    pub fn new(image: impl Into<String>) -> Self {
        Self {
            image: Some(image.into()),
            image_base64: None,
        }
    }

    /// The image string, or `None` when absent or blank.
    pub fn image(&self) -> Option<&str> {
        non_blank(&self.image).or_else(|| non_blank(&self.image_base64))
    }
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field
        .as_deref()
        .map(str::trim)
        .filter(|image| !image.is_empty())
}

/// Raw base64 gets the JPEG data-URL prefix; data URLs pass through.
pub fn to_data_url(image: &str) -> Cow<'_, str> {
    let image = image.trim();
    if image.starts_with("data:") {
        Cow::Borrowed(image)
    } else {
        Cow::Owned(format!("{DEFAULT_DATA_URL_PREFIX}{image}"))
    }
}
