use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use crate::core::domain::Identifiable;
use crate::utils::date::serializer;

// PetDto is the data transfer object the record listing hands out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct PetDto {
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

impl Identifiable for PetDto {
    fn id(&self) -> String {
        self.pet_id.to_string()
    }
}
