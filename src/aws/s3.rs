use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::publisher::ObjectStore;
use async_trait::async_trait;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ObjectCannedAcl;
use aws_sdk_s3::Client;
use tracing::debug;

/// Writes objects into one bucket with a fixed ACL and content type.
#[derive(Clone)]
pub struct S3Store {
    client: Client,
    bucket: String,
    acl: ObjectCannedAcl,
    content_type: String,
}

impl S3Store {
    pub fn new(client: Client, storage: &StorageConfig) -> Self {
        Self {
            client,
            bucket: storage.bucket.clone(),
            acl: ObjectCannedAcl::from(storage.acl.as_str()),
            content_type: storage.content_type.clone(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3Store {
    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()> {
        debug!("PutObject s3://{}/{} ({} bytes)", self.bucket, key, body.len());

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .acl(self.acl.clone())
            .content_type(&self.content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| {
                AppError::Publish(format!(
                    "s3 put {}/{}: {}",
                    self.bucket,
                    key,
                    DisplayErrorContext(&e)
                ))
            })?;

        Ok(())
    }
}
