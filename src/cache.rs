use crate::error::FetchError;
use crate::fetcher::Fetcher;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

pub const DEFAULT_CAPACITY: usize = 20;

/// Base64 image payloads keyed by a digest of their location.
///
/// Records never expire and are never evicted. Once `capacity` fingerprints
/// are stored, further fetches still succeed but are not retained.
#[derive(Clone)]
pub struct FetchCache {
    entries: Arc<DashMap<String, String>>,
    reserved: Arc<AtomicUsize>,
    capacity: usize,
    fetcher: Arc<dyn Fetcher>,
}

pub fn fingerprint(location: &str) -> String {
    format!("{:x}", Sha256::digest(location.as_bytes()))
}

impl FetchCache {
    pub fn new(capacity: usize, fetcher: Arc<dyn Fetcher>) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            reserved: Arc::new(AtomicUsize::new(0)),
            capacity,
            fetcher,
        }
    }

    pub fn size(&self) -> usize {
        self.entries.len()
    }

    pub async fn get_or_fetch(
        &self,
        location: &str,
        timeout: Duration,
    ) -> Result<String, FetchError> {
        let key = fingerprint(location);
        if let Some(cached) = self.entries.get(&key) {
            debug!(location, "Cache hit");
            return Ok(cached.value().clone());
        }

        let fetched = match Url::parse(location) {
            Ok(url) => self.fetcher.fetch(&url, timeout).await,
            Err(e) => Err(e.into()),
        };
        let body = fetched.map_err(|e| {
            warn!(location, error = %e, "Failed to fetch image");
            e
        })?;

        let encoded = BASE64.encode(&body);
        if self.store(key, encoded.clone()) {
            info!(location, size_bytes = body.len(), "Cached image");
        } else {
            info!(
                location,
                capacity = self.capacity,
                "Cache full, serving image uncached"
            );
        }

        Ok(encoded)
    }

    // A slot is reserved before inserting so concurrent misses can never push
    // the map past capacity.
    fn store(&self, key: String, encoded: String) -> bool {
        let reserved = self
            .reserved
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| {
                (n < self.capacity).then_some(n + 1)
            })
            .is_ok();
        if !reserved {
            return false;
        }

        if self.entries.insert(key, encoded).is_some() {
            self.reserved.fetch_sub(1, Ordering::SeqCst);
        }
        true
    }
}
