use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::gateway::ddb::store::DDBPhotoStore;
use crate::gateway::photos::PhotoStore;
use crate::gateway::PhotoStoreVia;
use crate::gateway::s3::store::S3PhotoStore;
use crate::utils::ddb::{build_db_client, build_s3_client, create_table};

pub(crate) async fn create_photo_store(config: &Configuration, via: PhotoStoreVia) -> Box<dyn PhotoStore> {
    match via {
        PhotoStoreVia::S3 => {
            let client = build_s3_client().await;
            Box::new(S3PhotoStore::new(client, config.photos_bucket.as_str(), config.photos_region.as_str()))
        }
        PhotoStoreVia::LocalDynamoDB => {
            let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
            let _ = create_table(&client, config.photos_table.as_str(), "object_key", "content_type", "uploaded_at").await;
            Box::new(DDBPhotoStore::new(client, config.photos_table.as_str()))
        }
    }
}
