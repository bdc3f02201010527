//! Company logo storage.
//!
//! Logos are written under `logos/` in the configured bucket and served back
//! through `/media/logos/:key`. `AppState` holds an `Arc<dyn LogoStorage>`.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use bytes::Bytes;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::forms::LogoUpload;

const LOGO_PREFIX: &str = "logos";

/// Stored object returned to the media route.
#[derive(Debug, Clone)]
pub struct StoredLogo {
    pub content_type: String,
    pub data: Bytes,
}

#[async_trait]
pub trait LogoStorage: Send + Sync {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), AppError>;
    async fn get(&self, key: &str) -> Result<Option<StoredLogo>, AppError>;
}

/// Stores the upload under a fresh key and returns that key. The stored
/// content type comes from the detected image format.
pub async fn store_logo(
    storage: &dyn LogoStorage,
    upload: &LogoUpload,
) -> Result<String, AppError> {
    let format = upload.format().ok_or_else(|| {
        AppError::BadRequest(format!("'{}' is not a supported image", upload.file_name))
    })?;
    let key = format!("{}.{}", Uuid::new_v4(), format.extension());
    storage
        .put(&key, format.content_type(), upload.data.clone())
        .await?;
    info!(
        "Stored logo '{}' ({} bytes) as {key}",
        upload.file_name,
        upload.data.len()
    );
    Ok(key)
}

/// S3 / MinIO backed logo storage.
#[derive(Clone)]
pub struct S3LogoStorage {
    client: S3Client,
    bucket: String,
}

impl S3LogoStorage {
    pub fn new(client: S3Client, bucket: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
        }
    }

    fn object_key(key: &str) -> String {
        format!("{LOGO_PREFIX}/{key}")
    }
}

#[async_trait]
impl LogoStorage for S3LogoStorage {
    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), AppError> {
        let object_key = Self::object_key(key);
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload of {object_key} failed: {e}")))?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<StoredLogo>, AppError> {
        let object_key = Self::object_key(key);
        let output = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&object_key)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let service_error = e.into_service_error();
                if service_error.is_no_such_key() {
                    return Ok(None);
                }
                return Err(AppError::Storage(format!(
                    "S3 download of {object_key} failed: {service_error}"
                )));
            }
        };

        let content_type = output
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = output
            .body
            .collect()
            .await
            .map_err(|e| AppError::Storage(format!("S3 body read of {object_key} failed: {e}")))?
            .into_bytes();

        Ok(Some(StoredLogo { content_type, data }))
    }
}

#[cfg(test)]
pub mod memory {
    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryLogoStorage {
        objects: Mutex<HashMap<String, StoredLogo>>,
    }

    impl MemoryLogoStorage {
        pub fn keys(&self) -> Vec<String> {
            self.objects.lock().unwrap().keys().cloned().collect()
        }
    }

    #[async_trait]
    impl LogoStorage for MemoryLogoStorage {
        async fn put(&self, key: &str, content_type: &str, data: Bytes) -> Result<(), AppError> {
            self.objects.lock().unwrap().insert(
                key.to_string(),
                StoredLogo {
                    content_type: content_type.to_string(),
                    data,
                },
            );
            Ok(())
        }

        async fn get(&self, key: &str) -> Result<Option<StoredLogo>, AppError> {
            Ok(self.objects.lock().unwrap().get(key).cloned())
        }
    }
}
