pub mod ddb_breed_repository;

use async_trait::async_trait;
use crate::breeds::domain::model::BreedEntity;
use crate::core::clinic::ClinicResult;

// Breeds are read-once reference data, so the repository stays narrow:
// seeding plus an ordered full load.
#[async_trait]
pub(crate) trait BreedRepository: Sync + Send {
    async fn create(&self, entity: &BreedEntity) -> ClinicResult<usize>;

    // the full reference list ordered by breed id
    async fn list_all(&self) -> ClinicResult<Vec<BreedEntity>>;
}
