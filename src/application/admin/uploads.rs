//! Admin image uploads into the in-memory store.

use std::sync::Arc;

use bytes::Bytes;
use metrics::counter;
use thiserror::Error;

use crate::infra::uploads::UploadStore;

#[derive(Debug, Error)]
pub enum AdminUploadError {
    #[error("image exceeds the configured limit of {limit_bytes} bytes")]
    TooLarge { limit_bytes: u64 },
    #[error("uploaded image is empty")]
    Empty,
}

#[derive(Debug, Clone)]
pub struct StoredImage {
    pub name: String,
    pub url: String,
}

#[derive(Clone)]
pub struct AdminUploadService {
    store: Arc<UploadStore>,
    max_image_bytes: u64,
}

impl AdminUploadService {
    pub fn new(store: Arc<UploadStore>, max_image_bytes: u64) -> Self {
        Self {
            store,
            max_image_bytes,
        }
    }

    pub fn max_image_bytes(&self) -> u64 {
        self.max_image_bytes
    }

    /// Store an uploaded image, enforcing the configured size ceiling.
    pub fn store_image(
        &self,
        original_name: &str,
        content_type: Option<&str>,
        bytes: Bytes,
    ) -> Result<StoredImage, AdminUploadError> {
        if bytes.is_empty() {
            counter!("fiera_upload_rejected_total").increment(1);
            return Err(AdminUploadError::Empty);
        }
        if bytes.len() as u64 > self.max_image_bytes {
            counter!("fiera_upload_rejected_total").increment(1);
            return Err(AdminUploadError::TooLarge {
                limit_bytes: self.max_image_bytes,
            });
        }

        let name = self.store.store(original_name, content_type, bytes);
        let url = format!("/uploads/{name}");
        Ok(StoredImage { name, url })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(limit: u64) -> AdminUploadService {
        AdminUploadService::new(Arc::new(UploadStore::new()), limit)
    }

    #[test]
    fn stored_images_are_served_under_uploads() {
        let service = service(1024);
        let stored = service
            .store_image("logo.png", Some("image/png"), Bytes::from_static(b"png!"))
            .expect("store");
        assert_eq!(stored.url, format!("/uploads/{}", stored.name));
    }

    #[test]
    fn oversized_images_are_rejected_with_the_limit() {
        let service = service(4);
        let result = service.store_image(
            "big.png",
            Some("image/png"),
            Bytes::from_static(b"too big"),
        );
        assert!(matches!(
            result,
            Err(AdminUploadError::TooLarge { limit_bytes: 4 })
        ));
    }

    #[test]
    fn empty_payloads_are_rejected() {
        let service = service(1024);
        assert!(matches!(
            service.store_image("x.png", None, Bytes::new()),
            Err(AdminUploadError::Empty)
        ));
    }
}
