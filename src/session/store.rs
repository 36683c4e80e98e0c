use async_trait::async_trait;
use crate::core::clinic::ClinicResult;

pub mod ddb_identity_store;
pub mod memory_identity_store;

// IdentityStore persists one serialized identity under a fixed key.
// An absent value means nobody is logged in.
#[async_trait]
pub(crate) trait IdentityStore: Sync + Send {
    async fn load(&self) -> ClinicResult<Option<String>>;
    async fn save(&self, raw: &str) -> ClinicResult<()>;
    async fn clear(&self) -> ClinicResult<()>;
}
