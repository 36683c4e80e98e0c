use serde::{Deserialize, Serialize};
use crate::core::clinic::{normalize, Species};
use crate::core::domain::Identifiable;

// BreedEntity is one row of the breed reference list. Legacy rows identify the
// species by name, by numeric id, or both.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct BreedEntity {
    pub breed_id: String,
    pub name: String,
    pub species: Option<String>,
    pub species_id: Option<i64>,
}

impl BreedEntity {
    pub fn new(breed_id: &str, name: &str, species: Option<&str>, species_id: Option<i64>) -> Self {
        Self {
            breed_id: breed_id.to_string(),
            name: name.to_string(),
            species: species.map(str::to_string),
            species_id,
        }
    }

    // the display name of the species, falling back to the numeric-id map
    pub fn species_name(&self) -> String {
        match &self.species {
            Some(name) => name.to_string(),
            None => Species::from_id(self.species_id).label().to_string(),
        }
    }

    pub fn matches_species(&self, token: &str, want: Species) -> bool {
        let name = normalize(self.species.as_deref().unwrap_or(""));
        if !name.is_empty() && name == token {
            return true;
        }
        if want == Species::Unknown {
            return false;
        }
        Species::parse(name.as_str()) == want || Species::from_id(self.species_id) == want
    }
}

impl Identifiable for BreedEntity {
    fn id(&self) -> String {
        self.breed_id.to_string()
    }
}
