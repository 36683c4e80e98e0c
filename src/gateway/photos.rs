use async_trait::async_trait;
use crate::core::clinic::ClinicResult;

// PhotoStore abstracts the path-addressed object store that keeps pet photos.
// Uploads must never overwrite an existing object.
#[async_trait]
pub(crate) trait PhotoStore: Sync + Send {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> ClinicResult<()>;
    fn public_url(&self, path: &str) -> String;
}
