use parking_lot::RwLock;
use std::collections::HashMap;

use crate::domain::GenerationId;
use crate::error::StoreError;
use crate::ports::ArtifactStore;

/// In-memory artifact store for unit tests.
///
/// Each write replaces the whole artifact under one lock, so partial
/// writes are never visible.
#[derive(Default)]
pub struct InMemoryArtifactStore {
    data: RwLock<HashMap<(GenerationId, String), Vec<u8>>>,
}

impl InMemoryArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }
}

impl ArtifactStore for InMemoryArtifactStore {
    fn write(&self, id: &GenerationId, name: &str, bytes: &[u8]) -> Result<(), StoreError> {
        self.data
            .write()
            .insert((id.clone(), name.to_string()), bytes.to_vec());
        Ok(())
    }

    fn read(&self, id: &GenerationId, name: &str) -> Result<Vec<u8>, StoreError> {
        self.data
            .read()
            .get(&(id.clone(), name.to_string()))
            .cloned()
            .ok_or_else(|| StoreError::NotFound {
                path: self.location(id, name),
            })
    }

    fn exists(&self, id: &GenerationId, name: &str) -> Result<bool, StoreError> {
        Ok(self
            .data
            .read()
            .contains_key(&(id.clone(), name.to_string())))
    }

    fn remove(&self, id: &GenerationId, name: &str) -> Result<(), StoreError> {
        self.data.write().remove(&(id.clone(), name.to_string()));
        Ok(())
    }

    fn location(&self, id: &GenerationId, name: &str) -> String {
        format!("memory://{id}/{name}")
    }
}
