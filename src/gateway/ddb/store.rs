use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use crate::core::clinic::{ClinicError, ClinicResult};
use crate::gateway::photos::PhotoStore;
use crate::utils::ddb::string_date;

// DDBPhotoStore keeps photo object metadata in a local DynamoDB table so the
// upload flow can run against the same local backend as the repositories.
#[derive(Debug)]
pub struct DDBPhotoStore {
    client: Client,
    table_name: String,
}

impl DDBPhotoStore {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl PhotoStore for DDBPhotoStore {
    async fn upload(&self, path: &str, content_type: &str, bytes: Vec<u8>) -> ClinicResult<()> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(object_key)")
            .item("object_key", AttributeValue::S(path.to_string()))
            .item("content_type", AttributeValue::S(content_type.to_string()))
            .item("content_length", AttributeValue::N(bytes.len().to_string()))
            .item("uploaded_at", string_date(Utc::now().naive_utc()))
            .send()
            .await.map(|_| ()).map_err(ClinicError::from)
    }

    fn public_url(&self, path: &str) -> String {
        format!("https://storage.local/{}/{}", self.table_name, path)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::core::repository::RepositoryStore;
    use crate::gateway::ddb::store::DDBPhotoStore;
    use crate::gateway::photos::PhotoStore;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "photos").await;
                let _ = create_table(&client, "photos", "object_key", "content_type", "uploaded_at").await;
                client
            });
    }

    #[tokio::test]
    async fn test_should_upload_once_per_path() {
        let store = DDBPhotoStore::new(CLIENT.get().await.clone(), "photos");
        let _ = store.upload("pets/upload-once.jpg", "image/jpeg", vec![1, 2, 3]).await.expect("should upload");
        let again = store.upload("pets/upload-once.jpg", "image/jpeg", vec![4, 5]).await;
        assert!(again.is_err());
    }

    #[tokio::test]
    async fn test_should_resolve_public_url() {
        let store = DDBPhotoStore::new(CLIENT.get().await.clone(), "photos");
        assert_eq!("https://storage.local/photos/pets/a.png", store.public_url("pets/a.png"));
    }
}
