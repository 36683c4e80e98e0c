use crate::core::domain::Configuration;
use crate::core::repository::RepositoryStore;
use crate::pets::repository::ddb_pet_repository::DDBPetRepository;
use crate::pets::repository::PetRepository;
use crate::utils::ddb::{build_db_client, create_table};

pub(crate) async fn create_pet_repository(config: &Configuration, store: RepositoryStore) -> Box<dyn PetRepository> {
    let index_name = format!("{}_ndx", config.pets_table);
    match store {
        RepositoryStore::DynamoDB => {
            let client = build_db_client(store).await;
            Box::new(DDBPetRepository::new(client, config.pets_table.as_str(), index_name.as_str(), config.schema))
        }
        RepositoryStore::LocalDynamoDB => {
            let client = build_db_client(store).await;
            let _ = create_table(&client, config.pets_table.as_str(), "pet_id", "owner_phone", "name").await;
            Box::new(DDBPetRepository::new(client, config.pets_table.as_str(), index_name.as_str(), config.schema))
        }
    }
}
