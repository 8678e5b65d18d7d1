//! Hosted image storage backed by a MinIO/S3-compatible object store.
//!
//! Uploaded images are addressed by an opaque object name (the `public_id`
//! returned to clients) and served through a direct public URL. Deletion by
//! `public_id` is best-effort: owning entities (products) are removed even if
//! the stored image cannot be.

use crate::config::ImageStoreConfig;
use minio::s3::args::{BucketExistsArgs, MakeBucketArgs, PutObjectArgs, RemoveObjectArgs};
use minio::s3::client::{Client, ClientBuilder};
use minio::s3::creds::StaticProvider;
use minio::s3::http::BaseUrl;
use serde::Serialize;
use std::io::Cursor;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum ImageStoreError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Operation error: {0}")]
    OperationError(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),
}

/// Result of a successful upload: the public URL plus the opaque identifier
/// used later for deletion.
#[derive(Debug, Clone, Serialize)]
pub struct UploadedImage {
    pub url: String,
    pub public_id: String,
}

#[derive(Debug, Clone)]
pub struct ImageStoreService {
    client: Client,
    pub config: ImageStoreConfig,
}

impl ImageStoreService {
    #[instrument(skip(config), fields(endpoint = %config.endpoint, bucket = %config.bucket_name))]
    pub async fn new(config: ImageStoreConfig) -> Result<Self, ImageStoreError> {
        info!("Initializing image store");

        config.validate().map_err(|e| {
            error!("Image store configuration validation failed: {}", e);
            ImageStoreError::ConfigError(e.to_string())
        })?;

        let base_url = config.endpoint_url().parse::<BaseUrl>().map_err(|e| {
            error!("Failed to parse image store endpoint URL: {}", e);
            ImageStoreError::ConnectionError(format!("Invalid endpoint URL: {}", e))
        })?;

        let static_provider = StaticProvider::new(&config.access_key, &config.secret_key, None);

        let client = ClientBuilder::new(base_url)
            .provider(Some(Box::new(static_provider)))
            .build()
            .map_err(|e| {
                error!("Failed to create image store client: {}", e);
                ImageStoreError::ConnectionError(format!("Client creation failed: {}", e))
            })?;

        let service = Self { client, config };
        service.ensure_bucket_exists().await?;

        info!("Image store initialized");
        Ok(service)
    }

    #[instrument(skip(self))]
    async fn ensure_bucket_exists(&self) -> Result<(), ImageStoreError> {
        let bucket_exists_args = BucketExistsArgs::new(&self.config.bucket_name)
            .map_err(|e| ImageStoreError::InvalidArguments(e.to_string()))?;

        let exists = self
            .client
            .bucket_exists(&bucket_exists_args)
            .await
            .map_err(|e| ImageStoreError::OperationError(format!("Bucket exists check failed: {}", e)))?;

        if exists {
            debug!("Bucket '{}' already exists", self.config.bucket_name);
            return Ok(());
        }

        warn!("Bucket '{}' does not exist, creating it", self.config.bucket_name);

        let make_bucket_args = MakeBucketArgs::new(&self.config.bucket_name)
            .map_err(|e| ImageStoreError::InvalidArguments(e.to_string()))?;

        self.client
            .make_bucket(&make_bucket_args)
            .await
            .map_err(|e| ImageStoreError::OperationError(format!("Bucket creation failed: {}", e)))?;

        info!("Created bucket '{}'", self.config.bucket_name);
        Ok(())
    }

    /// Uploads image bytes under a generated object name and returns the
    /// public URL plus the object name as deletion handle.
    #[instrument(skip(self, data), fields(size = data.len()))]
    pub async fn upload_image(
        &self,
        filename: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<UploadedImage, ImageStoreError> {
        let extension = filename
            .rsplit('.')
            .next()
            .filter(|ext| *ext != filename)
            .map(|ext| format!(".{}", ext))
            .unwrap_or_default();
        let object_name = format!("images/{}{}", Uuid::new_v4(), extension);

        info!("Uploading image '{}' to bucket '{}'", object_name, self.config.bucket_name);

        let bucket_name = self.config.bucket_name.clone();
        let object_name_owned = object_name.clone();
        let client = self.client.clone();
        let content_type_owned = content_type.map(|ct| ct.to_string());

        tokio::task::spawn_blocking(move || {
            let mut reader = Cursor::new(data);
            let data_len = reader.get_ref().len();

            // Keep the content_type String alive for the duration of args
            let ct_holder = content_type_owned;

            let mut args = PutObjectArgs::new(
                &bucket_name,
                &object_name_owned,
                &mut reader,
                Some(data_len),
                None,
            )
            .map_err(|e| ImageStoreError::InvalidArguments(e.to_string()))?;

            if let Some(ref ct) = ct_holder {
                args.content_type = ct;
            }

            futures::executor::block_on(client.put_object(&mut args))
                .map_err(|e| ImageStoreError::OperationError(format!("Upload failed: {}", e)))?;

            info!("Uploaded object '{}'", &object_name_owned);
            Ok(())
        })
        .await
        .map_err(|e| {
            error!("Failed to join blocking task for upload: {}", e);
            ImageStoreError::OperationError(format!("Join error: {}", e))
        })??;

        Ok(UploadedImage {
            url: self.public_url(&object_name),
            public_id: object_name,
        })
    }

    /// Deletes a previously uploaded image by its `public_id`.
    #[instrument(skip(self), fields(public_id = %public_id))]
    pub async fn remove_image(&self, public_id: &str) -> Result<(), ImageStoreError> {
        info!("Deleting object '{}' from bucket '{}'", public_id, self.config.bucket_name);

        let args = RemoveObjectArgs::new(&self.config.bucket_name, public_id)
            .map_err(|e| ImageStoreError::InvalidArguments(e.to_string()))?;

        self.client
            .remove_object(&args)
            .await
            .map_err(|e| ImageStoreError::OperationError(format!("Delete failed: {}", e)))?;

        info!("Deleted object '{}'", public_id);
        Ok(())
    }

    /// Direct public link for an object, derived from endpoint and bucket.
    pub fn public_url(&self, object_name: &str) -> String {
        format!(
            "{}/{}/{}",
            self.config.endpoint_url().trim_end_matches('/'),
            self.config.bucket_name,
            object_name
        )
    }
}
