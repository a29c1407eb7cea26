use crate::cache::FetchCache;
use crate::catalog::SOURCE_TAG;
use crate::models::{FetchImageRequest, FetchImageResponse, ImageResult};
use crate::resolver;
use futures_util::FutureExt;
use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::{debug, error, info, warn};

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Resolves image requests against the catalog and fills them from the cache.
#[derive(Clone)]
pub struct ImageService {
    cache: FetchCache,
    fetch_timeout: Duration,
}

impl ImageService {
    pub fn new(cache: FetchCache, fetch_timeout: Duration) -> Self {
        Self {
            cache,
            fetch_timeout,
        }
    }

    pub fn cache_size(&self) -> usize {
        self.cache.size()
    }

    /// Decodes a raw JSON body and handles it. Decode errors and panics are
    /// reported in the response envelope instead of escaping.
    pub async fn handle_body(&self, body: &[u8]) -> FetchImageResponse {
        let request = match serde_json::from_slice::<FetchImageRequest>(body) {
            Ok(request) => request,
            Err(e) => {
                warn!(error = %e, "Malformed fetch_image request");
                return FetchImageResponse::failed(e.to_string());
            }
        };

        match AssertUnwindSafe(self.handle(request)).catch_unwind().await {
            Ok(response) => response,
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                error!(error = %message, "Image request failed unexpectedly");
                FetchImageResponse::failed(message)
            }
        }
    }

    pub async fn handle(&self, request: FetchImageRequest) -> FetchImageResponse {
        let query = request.query.unwrap_or_default();
        let subject = request.subject;
        let count = request.count.unwrap_or(1);

        let entries = resolver::resolve(&query, subject.as_deref());
        if entries.is_empty() {
            return FetchImageResponse::failed("No relevant images found");
        }

        let mut images = Vec::new();
        for entry in entries.into_iter().take(count) {
            debug!(key = entry.key, "Serving catalog image");
            let data = self
                .cache
                .get_or_fetch(entry.location, self.fetch_timeout)
                .await
                .ok();

            images.push(ImageResult {
                url: match data {
                    Some(_) => String::new(),
                    None => entry.location.to_string(),
                },
                data: data.unwrap_or_default(),
                title: entry.title.to_string(),
                educational_caption: entry.caption.to_string(),
                alt_text: entry.alt_text.to_string(),
                source: SOURCE_TAG.to_string(),
            });
        }

        info!(
            query = %query,
            subject = ?subject,
            count = images.len(),
            "Resolved image request"
        );
        FetchImageResponse::ok(images)
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "An internal error occurred".to_string()
    }
}
