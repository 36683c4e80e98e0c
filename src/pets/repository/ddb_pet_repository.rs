use std::cmp;
use std::collections::HashMap;

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use aws_sdk_dynamodb::types::AttributeValue;
use chrono::Utc;
use serde_json::{Map, Value};

use crate::core::clinic::{ClinicError, ClinicResult, PaginatedResult};
use crate::core::domain::SchemaRevision;
use crate::core::repository::Repository;
use crate::pets::domain::model::PetEntity;
use crate::pets::repository::PetRepository;
use crate::utils::date::DATE_FMT;
use crate::utils::ddb::{add_filter_expr, from_ddb, parse_date_attribute, parse_item, parse_number_attribute, parse_opt_float_attribute, parse_opt_number_attribute, parse_string_attribute, to_ddb_page, to_update_expression};

#[derive(Debug)]
pub struct DDBPetRepository {
    client: Client,
    table_name: String,
    index_name: String,
    notes_attribute: &'static str,
}

impl DDBPetRepository {
    pub(crate) fn new(client: Client, table_name: &str, index_name: &str, schema: SchemaRevision) -> Self {
        Self {
            client,
            table_name: table_name.to_string(),
            index_name: index_name.to_string(),
            notes_attribute: schema.notes_attribute(),
        }
    }

    // the entity always carries its notes as observations; the stored
    // attribute name follows the schema contract
    fn to_stored_value(&self, entity: &PetEntity) -> ClinicResult<Value> {
        let mut val = serde_json::to_value(entity)?;
        if self.notes_attribute != "observations" {
            if let Value::Object(ref mut map) = val {
                if let Some(notes) = map.remove("observations") {
                    map.insert(self.notes_attribute.to_string(), notes);
                }
            }
        }
        Ok(val)
    }
}

#[async_trait]
impl Repository<PetEntity> for DDBPetRepository {
    async fn create(&self, entity: &PetEntity) -> ClinicResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let val = self.to_stored_value(entity)?;
        self.client
            .put_item()
            .table_name(table_name)
            .condition_expression("attribute_not_exists(pet_id)")
            .set_item(Some(parse_item(val)?))
            .send()
            .await.map(|_| 1).map_err(ClinicError::from)
    }

    async fn update(&self, id: &str, patch: &Map<String, Value>) -> ClinicResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        let mut patch = patch.clone();
        patch.insert("updated_at".to_string(),
                     Value::String(format!("{}", Utc::now().naive_utc().format(DATE_FMT))));
        let (update_expression, names, values) = to_update_expression(&patch);
        self.client
            .update_item()
            .table_name(table_name)
            .key("pet_id", AttributeValue::S(id.to_string()))
            .update_expression(update_expression)
            .set_expression_attribute_names(Some(names))
            .set_expression_attribute_values(Some(values))
            .condition_expression("attribute_exists(pet_id)")
            .send()
            .await.map(|_| 1).map_err(ClinicError::from)
    }

    async fn get(&self, id: &str) -> ClinicResult<PetEntity> {
        let table_name: &str = self.table_name.as_ref();
        self.client
            .get_item()
            .table_name(table_name)
            .consistent_read(true)
            .key("pet_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map_err(ClinicError::from).and_then(|out| {
            if let Some(map) = out.item() {
                Ok(map_to_pet(self.notes_attribute, map))
            } else {
                Err(ClinicError::not_found(format!("pet not found for {}", id).as_str()))
            }
        })
    }

    async fn delete(&self, id: &str) -> ClinicResult<usize> {
        let table_name: &str = self.table_name.as_ref();
        self.client.delete_item()
            .table_name(table_name)
            .key("pet_id", AttributeValue::S(id.to_string()))
            .send()
            .await.map(|_| 1).map_err(ClinicError::from)
    }

    // Note you cannot use certain reserved words per https://docs.aws.amazon.com/amazondynamodb/latest/developerguide/ReservedWords.html
    async fn query(&self, predicate: &HashMap<String, String>,
                   page: Option<&str>, page_size: usize) -> ClinicResult<PaginatedResult<PetEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let index_name: &str = self.index_name.as_ref();
        let owner_phone = predicate.get("owner_phone").ok_or_else(||
            ClinicError::validation("owner_phone predicate is required", Some("400".to_string())))?;
        let exclusive_start_key = to_ddb_page(page, predicate);
        let mut request = self.client
            .query()
            .table_name(table_name)
            .index_name(index_name)
            .limit(cmp::min(page_size, 500) as i32)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .expression_attribute_values(":owner_phone", AttributeValue::S(owner_phone.to_string()));
        // handle GSI keys first
        let mut key_cond = String::new();
        key_cond.push_str("owner_phone = :owner_phone");
        if let Some(name) = predicate.get("name") {
            key_cond.push_str(" AND #name = :name");
            request = request.expression_attribute_names("#name", "name");
            request = request.expression_attribute_values(":name", AttributeValue::S(name.to_string()));
        }
        request = request.key_condition_expression(key_cond);
        let mut filter_expr = String::new();
        // then handle other filters
        for (k, v) in predicate {
            if k != "owner_phone" && k != "name" {
                let ks = add_filter_expr(k.as_str(), &mut filter_expr);
                request = request.expression_attribute_values(format!(":{}", ks).as_str(), AttributeValue::S(v.to_string()));
            }
        }
        if !filter_expr.is_empty() {
            request = request.filter_expression(filter_expr);
        }

        request
            .send()
            .await.map_err(ClinicError::from).map(|req| {
            let records = req.items.as_ref().unwrap_or(&vec![]).iter()
                .map(|map| map_to_pet(self.notes_attribute, map)).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

#[async_trait]
impl PetRepository for DDBPetRepository {
    async fn find_by_owner_phone(&self, owner_phone: &str,
                                 page: Option<&str>, page_size: usize) -> ClinicResult<PaginatedResult<PetEntity>> {
        let predicate = HashMap::from([
            ("owner_phone".to_string(), owner_phone.to_string()),
        ]);
        self.query(&predicate, page, page_size).await
    }

    async fn list(&self, page: Option<&str>, page_size: usize) -> ClinicResult<PaginatedResult<PetEntity>> {
        let table_name: &str = self.table_name.as_ref();
        let exclusive_start_key = to_ddb_page(page, &HashMap::new());
        self.client
            .scan()
            .table_name(table_name)
            .consistent_read(false)
            .set_exclusive_start_key(exclusive_start_key)
            .limit(cmp::min(page_size, 500) as i32)
            .send()
            .await.map_err(ClinicError::from).map(|req| {
            let def_items = vec![];
            let items = req.items.as_ref().unwrap_or(&def_items);
            let records = items.iter().map(|map| map_to_pet(self.notes_attribute, map)).collect();
            from_ddb(page, page_size, req.last_evaluated_key(), records)
        })
    }
}

fn map_to_pet(notes_attribute: &str, map: &HashMap<String, AttributeValue>) -> PetEntity {
    PetEntity {
        pet_id: parse_string_attribute("pet_id", map).unwrap_or(String::from("")),
        name: parse_string_attribute("name", map).unwrap_or(String::from("")),
        age_years: parse_number_attribute("age_years", map),
        age_months: parse_opt_number_attribute("age_months", map),
        weight_kg: parse_opt_float_attribute("weight_kg", map),
        color: parse_string_attribute("color", map),
        owner_phone: parse_string_attribute("owner_phone", map).unwrap_or(String::from("")),
        breed_id: parse_string_attribute("breed_id", map).unwrap_or(String::from("")),
        photo_url: parse_string_attribute("photo_url", map),
        observations: parse_string_attribute(notes_attribute, map),
        treatment: parse_string_attribute("treatment", map),
        created_at: parse_date_attribute("created_at", map).unwrap_or(Utc::now().naive_utc()),
        updated_at: parse_date_attribute("updated_at", map).unwrap_or(Utc::now().naive_utc()),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use async_once::AsyncOnce;
    use aws_sdk_dynamodb::Client;
    use lazy_static::lazy_static;
    use serde_json::{Map, Value};

    use crate::core::clinic::ClinicError;
    use crate::core::domain::SchemaRevision;
    use crate::core::repository::{Repository, RepositoryStore};
    use crate::pets::domain::model::PetEntity;
    use crate::pets::repository::ddb_pet_repository::DDBPetRepository;
    use crate::pets::repository::PetRepository;
    use crate::utils::ddb::{build_db_client, create_table, delete_table};

    lazy_static! {
        static ref CLIENT: AsyncOnce<Client> = AsyncOnce::new(async {
                let client = build_db_client(RepositoryStore::LocalDynamoDB).await;
                let _ = delete_table(&client, "pets").await;
                let _ = create_table(&client, "pets", "pet_id", "owner_phone", "name").await;
                client
            });
    }

    fn build_repository(client: Client) -> DDBPetRepository {
        DDBPetRepository::new(client, "pets", "pets_ndx", SchemaRevision::V1)
    }

    #[tokio::test]
    async fn test_should_create_get_pets() {
        let repo = build_repository(CLIENT.get().await.clone());
        let mut pet = PetEntity::new("Firulais", 3, "555-0001", "b-1");
        pet.observations = Some("limps on the left paw".to_string());
        let size = repo.create(&pet).await.expect("should create pet");
        assert_eq!(1, size);

        let loaded = repo.get(pet.pet_id.as_str()).await.expect("should return pet");
        assert_eq!(pet.pet_id, loaded.pet_id);
        assert_eq!(Some("limps on the left paw".to_string()), loaded.observations);
    }

    #[tokio::test]
    async fn test_should_store_notes_under_legacy_attribute() {
        let repo = DDBPetRepository::new(CLIENT.get().await.clone(), "pets", "pets_ndx", SchemaRevision::V2);
        let mut pet = PetEntity::new("Pelusa", 1, "555-0002", "b-3");
        pet.observations = Some("sheds a lot".to_string());
        let _ = repo.create(&pet).await.expect("should create pet");

        let loaded = repo.get(pet.pet_id.as_str()).await.expect("should return pet");
        assert_eq!(Some("sheds a lot".to_string()), loaded.observations);

        // a reader pinned to the current revision must not see the legacy column
        let v1_repo = build_repository(CLIENT.get().await.clone());
        let loaded = v1_repo.get(pet.pet_id.as_str()).await.expect("should return pet");
        assert_eq!(None, loaded.observations);
    }

    #[tokio::test]
    async fn test_should_update_pets_with_patch() {
        let repo = build_repository(CLIENT.get().await.clone());
        let pet = PetEntity::new("Rocky", 5, "555-0003", "b-2");
        let _ = repo.create(&pet).await.expect("should create pet");

        let mut patch = Map::new();
        patch.insert("weight_kg".to_string(), Value::from(12.5));
        patch.insert("photo_url".to_string(), Value::String("https://storage.local/photos/pets/rocky.jpg".to_string()));
        let size = repo.update(pet.pet_id.as_str(), &patch).await.expect("should update pet");
        assert_eq!(1, size);

        let loaded = repo.get(pet.pet_id.as_str()).await.expect("should return pet");
        assert_eq!(Some(12.5), loaded.weight_kg);
        assert_eq!(Some("https://storage.local/photos/pets/rocky.jpg".to_string()), loaded.photo_url);
        // untouched attributes stay put
        assert_eq!("Rocky", loaded.name.as_str());
        assert_eq!(5, loaded.age_years);
    }

    #[tokio::test]
    async fn test_should_not_update_missing_pet() {
        let repo = build_repository(CLIENT.get().await.clone());
        let mut patch = Map::new();
        patch.insert("weight_kg".to_string(), Value::from(1.0));
        let res = repo.update("missing-pet-id", &patch).await;
        assert!(res.is_err());
    }

    #[tokio::test]
    async fn test_should_report_not_found_pet() {
        let repo = build_repository(CLIENT.get().await.clone());
        let res = repo.get("no-such-pet").await;
        assert!(matches!(res, Err(ClinicError::NotFound { message: _ })));
    }

    #[tokio::test]
    async fn test_should_create_delete_pets() {
        let repo = build_repository(CLIENT.get().await.clone());
        let pet = PetEntity::new("Nube", 2, "555-0004", "b-3");
        let _ = repo.create(&pet).await.expect("should create pet");

        let deleted = repo.delete(pet.pet_id.as_str()).await.expect("should delete pet");
        assert_eq!(1, deleted);

        let loaded = repo.get(pet.pet_id.as_str()).await;
        assert!(loaded.is_err());
    }

    #[tokio::test]
    async fn test_should_query_by_owner_phone() {
        let repo = build_repository(CLIENT.get().await.clone());
        for i in 0..3 {
            let pet = PetEntity::new(format!("pet_{}", i).as_str(), i, "555-0100", "b-1");
            let _ = repo.create(&pet).await.expect("should create pet");
        }
        let res = repo.find_by_owner_phone("555-0100", None, 50).await.expect("should query pets");
        assert_eq!(3, res.records.len());

        let res = repo.query(
            &HashMap::from([("owner_phone".to_string(), "555-0100".to_string()),
                ("name".to_string(), "pet_1".to_string())]),
            None, 50).await.expect("should query pets");
        assert_eq!(1, res.records.len());
    }

    #[tokio::test]
    async fn test_should_require_owner_phone_predicate() {
        let repo = build_repository(CLIENT.get().await.clone());
        let res = repo.query(&HashMap::new(), None, 50).await;
        assert!(matches!(res, Err(ClinicError::Validation { message: _, reason_code: _ })));
    }

    #[tokio::test]
    async fn test_should_list_pets() {
        let repo = build_repository(CLIENT.get().await.clone());
        for i in 0..3 {
            let pet = PetEntity::new(format!("listed_{}", i).as_str(), i, "555-0200", "b-2");
            let _ = repo.create(&pet).await.expect("should create pet");
        }
        let res = repo.list(None, 500).await.expect("should list pets");
        assert!(res.records.len() >= 3);
    }
}
