pub mod ddb_pet_repository;

use async_trait::async_trait;
use crate::core::clinic::{ClinicResult, PaginatedResult};
use crate::core::repository::Repository;
use crate::pets::domain::model::PetEntity;

#[async_trait]
pub(crate) trait PetRepository: Repository<PetEntity> {
    async fn find_by_owner_phone(&self, owner_phone: &str,
                                 page: Option<&str>, page_size: usize) -> ClinicResult<PaginatedResult<PetEntity>>;

    // every pet record, for the listing page
    async fn list(&self, page: Option<&str>, page_size: usize) -> ClinicResult<PaginatedResult<PetEntity>>;
}
