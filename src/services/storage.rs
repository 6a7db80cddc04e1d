// src/services/storage.rs
use std::path::{Path, PathBuf};

use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use uuid::Uuid;

use crate::error::AppError;

/// Stores uploaded product images on disk under the media root and hands
/// back the public URL they are served from (ServeDir mounts the root at
/// /media).
#[derive(Clone)]
pub struct ImageStore {
    root: PathBuf,
    public_base_url: String,
}

impl ImageStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: String) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Decode a base64 payload and persist it under a collision-free name.
    /// Returns the public URL of the stored file.
    pub async fn store_base64(&self, file_name: &str, file_base64: &str) -> Result<String, AppError> {
        let bytes = BASE64
            .decode(file_base64)
            .map_err(|e| AppError::validation(format!("Invalid base64 image data: {e}")))?;

        if bytes.is_empty() {
            return Err(AppError::validation("Image data is empty"));
        }

        let stored_name = format!("{}-{}", Uuid::new_v4(), sanitize_file_name(file_name));
        let path = self.root.join(&stored_name);

        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| AppError::validation(format!("Failed to prepare media dir: {e}")))?;
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| AppError::validation(format!("Failed to store image: {e}")))?;

        tracing::info!(file = %stored_name, size = bytes.len(), "Stored product image");

        Ok(format!("{}/media/{}", self.public_base_url, stored_name))
    }
}

/// Keep only characters safe in a URL path segment; everything else
/// (separators included) becomes an underscore.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '.' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_strips_path_separators() {
        assert_eq!(sanitize_file_name("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_file_name("ring 1.jpg"), "ring_1.jpg");
        assert_eq!(sanitize_file_name(""), "image");
    }

    #[tokio::test]
    async fn store_base64_writes_file_and_returns_public_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), "https://shop.example".to_string());

        let payload = BASE64.encode(b"fake image bytes");
        let url = store.store_base64("ring.jpg", &payload).await.unwrap();

        assert!(url.starts_with("https://shop.example/media/"));
        assert!(url.ends_with("-ring.jpg"));

        let stored_name = url.rsplit('/').next().unwrap();
        let on_disk = tokio::fs::read(dir.path().join(stored_name)).await.unwrap();
        assert_eq!(on_disk, b"fake image bytes");
    }

    #[tokio::test]
    async fn store_base64_rejects_invalid_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), "https://shop.example".to_string());
        assert!(store.store_base64("x.jpg", "@@not base64@@").await.is_err());
    }

    #[tokio::test]
    async fn store_base64_rejects_empty_payload() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(dir.path(), "https://shop.example".to_string());
        assert!(store.store_base64("x.jpg", "").await.is_err());
    }
}
