use std::collections::HashMap;
use std::io;

use bytes::Bytes;
use futures::StreamExt;
use futures::stream::BoxStream;
use tokio::sync::RwLock;

use crate::application::ports::{AudioStore, AudioStoreError};
use crate::domain::StoragePath;

/// Keeps audio in process memory. Contents vanish with the process.
#[derive(Default)]
pub struct InMemoryAudioStore {
    objects: RwLock<HashMap<String, Vec<u8>>>,
}

impl InMemoryAudioStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn paths(&self) -> Vec<String> {
        let mut paths: Vec<String> = self.objects.read().await.keys().cloned().collect();
        paths.sort();
        paths
    }
}

#[async_trait::async_trait]
impl AudioStore for InMemoryAudioStore {
    async fn store(
        &self,
        path: &StoragePath,
        mut stream: BoxStream<'_, Result<Bytes, io::Error>>,
        content_length: Option<u64>,
    ) -> Result<u64, AudioStoreError> {
        let mut data = Vec::with_capacity(content_length.unwrap_or_default() as usize);
        while let Some(chunk) = stream.next().await {
            data.extend_from_slice(&chunk?);
        }

        let written = data.len() as u64;
        self.objects
            .write()
            .await
            .insert(path.as_str().to_string(), data);
        Ok(written)
    }

    async fn fetch(&self, path: &StoragePath) -> Result<Vec<u8>, AudioStoreError> {
        self.objects
            .read()
            .await
            .get(path.as_str())
            .cloned()
            .ok_or_else(|| AudioStoreError::NotFound(path.to_string()))
    }

    async fn delete(&self, path: &StoragePath) -> Result<(), AudioStoreError> {
        self.objects
            .write()
            .await
            .remove(path.as_str())
            .map(|_| ())
            .ok_or_else(|| AudioStoreError::NotFound(path.to_string()))
    }
}
