use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use crate::core::clinic::{ClinicError, ClinicResult};
use crate::session::store::IdentityStore;
use crate::utils::ddb::parse_string_attribute;

// The fixed key the serialized identity lives under.
const SESSION_KEY: &str = "current";

#[derive(Debug)]
pub struct DDBIdentityStore {
    client: Client,
    table_name: String,
}

impl DDBIdentityStore {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl IdentityStore for DDBIdentityStore {
    async fn load(&self) -> ClinicResult<Option<String>> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .get_item()
            .table_name(table_name)
            .consistent_read(true)
            .key("session_id", AttributeValue::S(SESSION_KEY.to_string()))
            .send()
            .await.map_err(ClinicError::from).map(|out| {
            out.item().and_then(|map| parse_string_attribute("identity", map))
        })
    }

    async fn save(&self, raw: &str) -> ClinicResult<()> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .put_item()
            .table_name(table_name)
            .item("session_id", AttributeValue::S(SESSION_KEY.to_string()))
            .item("identity", AttributeValue::S(raw.to_string()))
            .send()
            .await.map(|_| ()).map_err(ClinicError::from)
    }

    async fn clear(&self) -> ClinicResult<()> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .delete_item()
            .table_name(table_name)
            .key("session_id", AttributeValue::S(SESSION_KEY.to_string()))
            .send()
            .await.map(|_| ()).map_err(ClinicError::from)
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::core::repository::RepositoryStore;
    use crate::session::store::ddb_identity_store::DDBIdentityStore;
    use crate::session::store::IdentityStore;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "sessions").await;
                let _ = create_table(&client, "sessions", "session_id", "kind", "contact").await;
                client
            });
    }

    #[tokio::test]
    async fn test_should_save_load_clear_identity() {
        let store = DDBIdentityStore::new(CLIENT.get().await.clone(), "sessions");
        let raw = r#"{"role_name":"Veterinario","display_name":"Victor","contact":"victor@clinic.mx"}"#;
        let _ = store.save(raw).await.expect("should save identity");

        let loaded = store.load().await.expect("should load identity");
        assert_eq!(Some(raw.to_string()), loaded);

        let _ = store.clear().await.expect("should clear identity");
        let loaded = store.load().await.expect("should load identity");
        assert_eq!(None, loaded);
    }
}
