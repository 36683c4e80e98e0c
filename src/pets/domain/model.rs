use chrono::{NaiveDateTime, Utc};
use uuid::Uuid;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// PetEntity is one pet record as the backend stores it. The notes attribute is
// persisted under the name pinned by the schema contract; the struct always
// carries it as observations.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct PetEntity {
    pub pet_id: String,
    pub name: String,
    pub age_years: i64,
    pub age_months: Option<i64>,
    pub weight_kg: Option<f64>,
    pub color: Option<String>,
    pub owner_phone: String,
    pub breed_id: String,
    pub photo_url: Option<String>,
    pub observations: Option<String>,
    pub treatment: Option<String>,
    #[serde(with = "serializer")]
    pub created_at: NaiveDateTime,
    #[serde(with = "serializer")]
    pub updated_at: NaiveDateTime,
}

impl PetEntity {
    pub fn new(name: &str, age_years: i64, owner_phone: &str, breed_id: &str) -> Self {
        Self {
            pet_id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            age_years,
            age_months: None,
            weight_kg: None,
            color: None,
            owner_phone: owner_phone.to_string(),
            breed_id: breed_id.to_string(),
            photo_url: None,
            observations: None,
            treatment: None,
            created_at: Utc::now().naive_utc(),
            updated_at: Utc::now().naive_utc(),
        }
    }
}

impl Identifiable for PetEntity {
    fn id(&self) -> String {
        self.pet_id.to_string()
    }
}

#[cfg(test)]
mod tests {
    use crate::core::domain::Identifiable;
    use crate::pets::domain::model::PetEntity;

    #[tokio::test]
    async fn test_should_build_pet() {
        let pet = PetEntity::new("Firulais", 3, "555-0101", "b-1");
        assert_eq!("Firulais", pet.name.as_str());
        assert_eq!(3, pet.age_years);
        assert_eq!("555-0101", pet.owner_phone.as_str());
        assert_eq!("b-1", pet.breed_id.as_str());
        assert_eq!(None, pet.weight_kg);
        assert_eq!(pet.pet_id, pet.id());
    }
}
