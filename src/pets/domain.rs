use serde::{Deserialize, Serialize};
use crate::core::clinic::Role;

pub mod model;

// PetField names every control of the pet form, including the hidden record id.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum PetField {
    PetId,
    Name,
    AgeYears,
    AgeMonths,
    Species,
    Breed,
    OwnerPhone,
    WeightKg,
    Color,
    Photo,
    Observations,
    Treatment,
}

impl PetField {
    pub fn all() -> Vec<PetField> {
        vec![
            PetField::PetId,
            PetField::Name,
            PetField::AgeYears,
            PetField::AgeMonths,
            PetField::Species,
            PetField::Breed,
            PetField::OwnerPhone,
            PetField::WeightKg,
            PetField::Color,
            PetField::Photo,
            PetField::Observations,
            PetField::Treatment,
        ]
    }
}

// The field-level authorization matrix. A receptionist may only touch the
// weight and photo of an already registered pet; the hidden id stays writable
// so the form still knows which record it is editing.
pub(crate) fn editable_fields(role: Role) -> Vec<PetField> {
    match role {
        Role::Receptionist => vec![PetField::PetId, PetField::WeightKg, PetField::Photo],
        Role::Administrator | Role::Veterinarian | Role::Unknown => PetField::all(),
    }
}

pub(crate) fn locked_fields(role: Role) -> Vec<PetField> {
    let editable = editable_fields(role);
    PetField::all().into_iter().filter(|field| !editable.contains(field)).collect()
}

#[cfg(test)]
mod tests {
    use crate::core::clinic::Role;
    use crate::pets::domain::{editable_fields, locked_fields, PetField};

    #[tokio::test]
    async fn test_should_limit_receptionist_to_weight_photo_and_id() {
        let editable = editable_fields(Role::Receptionist);
        assert_eq!(vec![PetField::PetId, PetField::WeightKg, PetField::Photo], editable);
    }

    #[tokio::test]
    async fn test_should_lock_the_complement_for_receptionist() {
        let locked = locked_fields(Role::Receptionist);
        assert_eq!(PetField::all().len() - 3, locked.len());
        assert!(locked.contains(&PetField::Name));
        assert!(locked.contains(&PetField::Breed));
        assert!(locked.contains(&PetField::Observations));
        assert!(locked.contains(&PetField::Treatment));
        assert!(!locked.contains(&PetField::WeightKg));
        assert!(!locked.contains(&PetField::Photo));
        assert!(!locked.contains(&PetField::PetId));
    }

    #[tokio::test]
    async fn test_should_not_lock_fields_for_admin_and_vet() {
        assert_eq!(0, locked_fields(Role::Administrator).len());
        assert_eq!(0, locked_fields(Role::Veterinarian).len());
        assert_eq!(PetField::all(), editable_fields(Role::Veterinarian));
    }
}
