//! Cached page invalidation
//!
//! Reports are rendered by a separate frontend that caches pages per route.
//! After a write the service tells it which routes went stale. Delivery is
//! fire-and-forget: the caller never waits for it and never sees its errors.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::core::config::RevalidationConfig;
use crate::core::error::AppError;

/// Marks the cached rendering of a logical path as stale
pub trait CacheInvalidator: Send + Sync {
    fn invalidate(&self, path: &str);
}

/// Used when no revalidation webhook is configured
pub struct LogCacheInvalidator;

impl CacheInvalidator for LogCacheInvalidator {
    fn invalidate(&self, path: &str) {
        debug!("Cache path marked stale (no webhook configured): {}", path);
    }
}

#[derive(Debug, Serialize)]
struct RevalidateRequest<'a> {
    path: &'a str,
}

/// Posts `{"path": ...}` to the frontend's revalidation webhook
pub struct HttpCacheInvalidator {
    http_client: Client,
    url: String,
    secret: Option<String>,
}

impl HttpCacheInvalidator {
    pub const SECRET_HEADER: &'static str = "x-revalidate-secret";

    pub fn new(url: String, secret: Option<String>, timeout: Duration) -> Result<Self, AppError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            url,
            secret,
        })
    }

    async fn send(client: Client, url: String, secret: Option<String>, path: String) {
        let mut request = client.post(&url).json(&RevalidateRequest { path: &path });
        if let Some(secret) = secret {
            request = request.header(Self::SECRET_HEADER, secret);
        }

        match request.send().await {
            Ok(resp) if resp.status().is_success() => {
                debug!("Revalidated cache path {}", path);
            }
            Ok(resp) => {
                warn!(
                    "Revalidation webhook returned {} for path {}",
                    resp.status(),
                    path
                );
            }
            Err(e) => {
                warn!("Revalidation webhook failed for path {}: {}", path, e);
            }
        }
    }
}

impl CacheInvalidator for HttpCacheInvalidator {
    fn invalidate(&self, path: &str) {
        let client = self.http_client.clone();
        let url = self.url.clone();
        let secret = self.secret.clone();
        let path = path.to_string();

        // No runtime means nothing can be delivered; skip rather than panic
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(Self::send(client, url, secret, path));
            }
            Err(_) => warn!("No async runtime, dropping revalidation of {}", path),
        }
    }
}

/// Pick the invalidator for the given configuration
pub fn from_config(config: &RevalidationConfig) -> Result<Arc<dyn CacheInvalidator>, AppError> {
    match &config.url {
        Some(url) => {
            info!("Cache revalidation webhook enabled: {}", url);
            Ok(Arc::new(HttpCacheInvalidator::new(
                url.clone(),
                config.secret.clone(),
                config.timeout,
            )?))
        }
        None => {
            info!("Cache revalidation webhook disabled (REVALIDATE_URL not set)");
            Ok(Arc::new(LogCacheInvalidator))
        }
    }
}
