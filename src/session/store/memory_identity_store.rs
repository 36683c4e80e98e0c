use std::sync::Mutex;
use async_trait::async_trait;
use crate::core::clinic::ClinicResult;
use crate::session::store::IdentityStore;

// MemoryIdentityStore backs tests and embedded flows without a backend.
#[derive(Debug, Default)]
pub struct MemoryIdentityStore {
    raw: Mutex<Option<String>>,
}

impl MemoryIdentityStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_identity(raw: &str) -> Self {
        Self {
            raw: Mutex::new(Some(raw.to_string())),
        }
    }
}

#[async_trait]
impl IdentityStore for MemoryIdentityStore {
    async fn load(&self) -> ClinicResult<Option<String>> {
        Ok(self.raw.lock().map(|raw| raw.clone()).unwrap_or(None))
    }

    async fn save(&self, raw: &str) -> ClinicResult<()> {
        if let Ok(mut guard) = self.raw.lock() {
            *guard = Some(raw.to_string());
        }
        Ok(())
    }

    async fn clear(&self) -> ClinicResult<()> {
        if let Ok(mut guard) = self.raw.lock() {
            *guard = None;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::session::store::IdentityStore;
    use crate::session::store::memory_identity_store::MemoryIdentityStore;

    #[tokio::test]
    async fn test_should_save_load_clear_identity() {
        let store = MemoryIdentityStore::new();
        assert_eq!(None, store.load().await.expect("should load"));

        let _ = store.save("{}").await.expect("should save");
        assert_eq!(Some("{}".to_string()), store.load().await.expect("should load"));

        let _ = store.clear().await.expect("should clear");
        assert_eq!(None, store.load().await.expect("should load"));
    }
}
