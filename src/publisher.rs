use crate::config::StorageConfig;
use crate::error::{AppError, Result};
use crate::models::PublishedDataset;
use async_trait::async_trait;
use tracing::info;

/// Object storage with fixed bucket, ACL and content type.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()>;
}

#[async_trait]
impl<T: ObjectStore + ?Sized> ObjectStore for std::sync::Arc<T> {
    async fn put_object(&self, key: &str, body: Vec<u8>) -> Result<()> {
        (**self).put_object(key, body).await
    }
}

/// Both artifacts of one publish, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifacts {
    pub json: Vec<u8>,
    pub script: Vec<u8>,
}

impl Artifacts {
    pub fn render(dataset: &PublishedDataset) -> Result<Self> {
        let json = serde_json::to_vec(dataset)
            .map_err(|e| AppError::Publish(format!("Failed to serialize dataset: {}", e)))?;

        let mut script = Vec::with_capacity(json.len() + 12);
        script.extend_from_slice(b"var data = ");
        script.extend_from_slice(&json);
        script.push(b';');

        Ok(Self { json, script })
    }
}

pub struct Publisher<S: ObjectStore> {
    store: S,
    json_key: String,
    script_key: String,
}

impl<S: ObjectStore> Publisher<S> {
    pub fn new(store: S, storage: &StorageConfig) -> Self {
        Self {
            store,
            json_key: storage.json_key.clone(),
            script_key: storage.script_key.clone(),
        }
    }

    /// Overwrite the JSON document, then its script-embeddable twin.
    ///
    /// The second write is skipped if the first fails. There is no atomicity
    /// across the two keys.
    pub async fn publish(&self, dataset: &PublishedDataset) -> Result<()> {
        let Artifacts { json, script } = Artifacts::render(dataset)?;

        info!("Uploading file: {}", self.json_key);
        self.store.put_object(&self.json_key, json).await?;

        info!("Uploading file: {}", self.script_key);
        self.store.put_object(&self.script_key, script).await?;

        Ok(())
    }
}
