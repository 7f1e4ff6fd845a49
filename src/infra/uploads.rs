//! In-memory image uploads keyed by content digest.
//!
//! Names are `<digest>-<slugified stem>.<ext>` so re-uploading identical
//! bytes lands on the same entry instead of growing the map.

use bytes::Bytes;
use dashmap::DashMap;
use sha2::{Digest, Sha256};
use slug::slugify;

const DIGEST_PREFIX_LEN: usize = 12;

#[derive(Debug, Clone)]
pub struct StoredUpload {
    pub bytes: Bytes,
    pub content_type: String,
}

#[derive(Default)]
pub struct UploadStore {
    entries: DashMap<String, StoredUpload>,
}

impl UploadStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a payload and return the name it is served under.
    pub fn store(&self, original_name: &str, content_type: Option<&str>, bytes: Bytes) -> String {
        let name = build_stored_name(original_name, &bytes);
        let content_type = content_type
            .map(str::to_string)
            .unwrap_or_else(|| guess_content_type(original_name));

        self.entries
            .insert(name.clone(), StoredUpload { bytes, content_type });
        name
    }

    pub fn get(&self, name: &str) -> Option<StoredUpload> {
        self.entries.get(name).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn build_stored_name(original_name: &str, bytes: &Bytes) -> String {
    let digest = hex::encode(Sha256::digest(bytes));
    let digest = &digest[..DIGEST_PREFIX_LEN];

    let (stem, extension) = match original_name.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => (stem, Some(ext.to_ascii_lowercase())),
        _ => (original_name, None),
    };

    let stem = slugify(stem);
    let stem = if stem.is_empty() {
        "upload".to_string()
    } else {
        stem
    };

    match extension {
        Some(ext) if !ext.is_empty() => format!("{digest}-{stem}.{ext}"),
        _ => format!("{digest}-{stem}"),
    }
}

fn guess_content_type(original_name: &str) -> String {
    mime_guess::from_path(original_name)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_bytes_round_trip_under_the_returned_name() {
        let store = UploadStore::new();
        let name = store.store("Hero Banner.PNG", Some("image/png"), Bytes::from_static(b"img"));
        let stored = store.get(&name).expect("stored entry");
        assert_eq!(stored.bytes.as_ref(), b"img");
        assert_eq!(stored.content_type, "image/png");
        assert!(name.ends_with("-hero-banner.png"));
    }

    #[test]
    fn identical_payloads_dedupe_to_one_entry() {
        let store = UploadStore::new();
        let first = store.store("a.png", None, Bytes::from_static(b"same"));
        let second = store.store("a.png", None, Bytes::from_static(b"same"));
        assert_eq!(first, second);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn content_type_falls_back_to_the_extension() {
        let store = UploadStore::new();
        let name = store.store("logo.jpg", None, Bytes::from_static(b"jpeg"));
        assert_eq!(store.get(&name).expect("entry").content_type, "image/jpeg");
    }

    #[test]
    fn extensionless_names_still_produce_a_stored_name() {
        let store = UploadStore::new();
        let name = store.store("", None, Bytes::from_static(b"data"));
        assert!(name.contains("-upload"));
    }
}
