use crate::breeds::domain::model::BreedEntity;
use crate::core::clinic::{normalize, Species};

pub mod model;

// filter_by_species keeps the breeds whose species matches the selected token,
// by name or through the numeric-id map. An empty token keeps every breed.
pub(crate) fn filter_by_species<'a>(breeds: &'a [BreedEntity], species: &str) -> Vec<&'a BreedEntity> {
    let token = normalize(species);
    if token.is_empty() {
        return breeds.iter().collect();
    }
    let want = Species::parse(token.as_str());
    breeds.iter().filter(|breed| breed.matches_species(token.as_str(), want)).collect()
}
