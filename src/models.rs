use serde::de::Error;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::value::RawValue;

#[derive(Debug, Deserialize)]
pub struct FetchImageRequest {
    #[serde(default, deserialize_with = "deserialize_present_string")]
    pub query: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default, deserialize_with = "deserialize_count")]
    pub count: Option<usize>,
}

/// A missing field stays `None`, but an explicit `null` is rejected.
fn deserialize_present_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    String::deserialize(deserializer).map(Some)
}

/// Accepts any JSON integer. Negative values clamp to zero and values past
/// `usize::MAX` saturate. Floats, strings and booleans are rejected.
fn deserialize_count<'de, D>(deserializer: D) -> Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Box<RawValue>>::deserialize(deserializer)? else {
        return Ok(None);
    };

    parse_count(raw.get())
        .map(Some)
        .ok_or_else(|| D::Error::custom(format!("invalid count {}, expected an integer", raw)))
}

fn parse_count(text: &str) -> Option<usize> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(digits) => (true, digits),
        None => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if negative {
        return Some(0);
    }
    // Only overflow can fail once every byte is a digit.
    Some(digits.parse().unwrap_or(usize::MAX))
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ImageResult {
    pub url: String,
    pub data: String,
    pub title: String,
    pub educational_caption: String,
    pub alt_text: String,
    pub source: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct FetchImageResponse {
    pub success: bool,
    pub images: Vec<ImageResult>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub error: Option<String>,
}

impl FetchImageResponse {
    pub fn ok(images: Vec<ImageResult>) -> Self {
        Self {
            success: true,
            images,
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            images: Vec::new(),
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ServiceInfo {
    pub message: &'static str,
    pub status: &'static str,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub cache_size: usize,
}
