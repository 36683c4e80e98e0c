use std::collections::HashMap;
use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use crate::breeds::domain::model::BreedEntity;
use crate::breeds::repository::BreedRepository;
use crate::core::clinic::{ClinicError, ClinicResult};
use crate::utils::ddb::{parse_item, parse_opt_number_attribute, parse_string_attribute};

#[derive(Debug)]
pub struct DDBBreedRepository {
    client: Client,
    table_name: String,
}

impl DDBBreedRepository {
    pub(crate) fn new(client: Client, table_name: &str) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
        }
    }
}

#[async_trait]
impl BreedRepository for DDBBreedRepository {
    async fn create(&self, entity: &BreedEntity) -> ClinicResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = serde_json::to_value(entity)?;
        // legacy rows may omit species; a NULL value would break the sparse index key
        let mut item = parse_item(val)?;
        item.retain(|_, v| !matches!(v, AttributeValue::Null(_)));
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(breed_id)")
            .set_item(Some(item))
            .send()
            .await.map(|_| 1).map_err(ClinicError::from)
    }

    async fn list_all(&self) -> ClinicResult<Vec<BreedEntity>> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .scan()
            .table_name(table_name)
            .consistent_read(false)
            .limit(500)
            .send()
            .await.map_err(ClinicError::from).map(|req| {
            let def_items = vec![];
            let items = req.items.as_ref().unwrap_or(&def_items);
            let mut records: Vec<BreedEntity> = items.iter().map(map_to_breed).collect();
            records.sort_by(|a, b| a.breed_id.cmp(&b.breed_id));
            records
        })
    }
}

fn map_to_breed(map: &HashMap<String, AttributeValue>) -> BreedEntity {
    BreedEntity {
        breed_id: parse_string_attribute("breed_id", map).unwrap_or(String::from("")),
        name: parse_string_attribute("name", map).unwrap_or(String::from("")),
        species: parse_string_attribute("species", map),
        species_id: parse_opt_number_attribute("species_id", map),
    }
}

#[cfg(test)]
mod tests {
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use crate::breeds::domain::model::BreedEntity;
    use crate::breeds::repository::ddb_breed_repository::DDBBreedRepository;
    use crate::breeds::repository::BreedRepository;
    use crate::core::repository::RepositoryStore;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "breeds").await;
                let _ = create_table(&client, "breeds", "breed_id", "species", "name").await;
                client
            });
    }

    #[tokio::test]
    async fn test_should_create_and_list_breeds_ordered() {
        let repo = DDBBreedRepository::new(CLIENT.get().await.clone(), "breeds");
        let _ = repo.create(&BreedEntity::new("b-2", "Boxer", None, Some(1))).await.expect("should create breed");
        let _ = repo.create(&BreedEntity::new("b-1", "Labrador", Some("Perro"), None)).await.expect("should create breed");
        let _ = repo.create(&BreedEntity::new("b-3", "Siamese", Some("Gato"), Some(2))).await.expect("should create breed");

        let breeds = repo.list_all().await.expect("should list breeds");
        assert!(breeds.len() >= 3);
        let ids: Vec<&str> = breeds.iter().map(|b| b.breed_id.as_str()).collect();
        let mut sorted = ids.clone();
        sorted.sort();
        assert_eq!(sorted, ids);
    }

    #[tokio::test]
    async fn test_should_reject_duplicate_breed() {
        let repo = DDBBreedRepository::new(CLIENT.get().await.clone(), "breeds");
        let _ = repo.create(&BreedEntity::new("b-9", "Persian", Some("Gato"), Some(2))).await.expect("should create breed");
        let duplicate = repo.create(&BreedEntity::new("b-9", "Persian", Some("Gato"), Some(2))).await;
        assert!(duplicate.is_err());
    }
}
