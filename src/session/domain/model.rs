use serde::{Deserialize, Serialize};
use crate::core::clinic::{Capability, Role};

// Identity is the authenticated user's role and contact info as the login page
// persisted it. The raw role name is kept for display; permission checks go
// through the parsed role.
#[derive(Debug, PartialEq, Clone, Serialize, Deserialize)]
pub(crate) struct Identity {
    pub role_name: String,
    pub display_name: String,
    pub contact: String,
}

impl Identity {
    pub fn new(role_name: &str, display_name: &str, contact: &str) -> Self {
        Self {
            role_name: role_name.to_string(),
            display_name: display_name.to_string(),
            contact: contact.to_string(),
        }
    }

    pub fn role(&self) -> Role {
        Role::parse(self.role_name.as_str())
    }

    pub fn role_label(&self) -> String {
        if self.role_name.trim().is_empty() {
            "No role".to_string()
        } else {
            self.role_name.to_string()
        }
    }

    pub fn is_admin(&self) -> bool {
        self.role() == Role::Administrator
    }

    pub fn is_vet(&self) -> bool {
        self.role() == Role::Veterinarian
    }

    pub fn is_receptionist(&self) -> bool {
        self.role() == Role::Receptionist
    }

    pub fn can_view_accounts(&self) -> bool {
        self.role().allows(Capability::ViewAccounts)
    }

    pub fn can_edit_accounts(&self) -> bool {
        self.role().allows(Capability::EditAccounts)
    }

    pub fn can_schedule_appointments(&self) -> bool {
        self.role().allows(Capability::ScheduleAppointments)
    }

    pub fn can_view_own_appointments(&self) -> bool {
        self.role().allows(Capability::ViewOwnAppointments)
    }
}

#[cfg(test)]
mod tests {
    use crate::core::clinic::Role;
    use crate::session::domain::model::Identity;

    #[tokio::test]
    async fn test_should_build_identity() {
        let identity = Identity::new("Administrador", "Ana", "ana@clinic.mx");
        assert_eq!(Role::Administrator, identity.role());
        assert_eq!("Administrador", identity.role_label().as_str());
        assert!(identity.is_admin());
        assert!(!identity.is_vet());
        assert!(!identity.is_receptionist());
    }

    #[tokio::test]
    async fn test_should_fall_back_role_label() {
        let identity = Identity::new("  ", "Ana", "ana@clinic.mx");
        assert_eq!("No role", identity.role_label().as_str());
        assert_eq!(Role::Unknown, identity.role());
    }

    #[tokio::test]
    async fn test_should_check_receptionist_capabilities_any_casing() {
        for role_name in [" recepcionista ", "RECEPCIONISTA", "Receptionist"] {
            let identity = Identity::new(role_name, "Rosa", "rosa@clinic.mx");
            assert!(identity.can_schedule_appointments());
            assert!(!identity.can_view_own_appointments());
            assert!(!identity.can_view_accounts());
            assert!(!identity.can_edit_accounts());
        }
    }

    #[tokio::test]
    async fn test_should_check_admin_and_vet_capabilities() {
        let admin = Identity::new("administrador", "Ana", "ana@clinic.mx");
        assert!(admin.can_view_accounts());
        assert!(admin.can_edit_accounts());
        assert!(admin.can_schedule_appointments());
        assert!(!admin.can_view_own_appointments());

        let vet = Identity::new("Veterinario", "Victor", "victor@clinic.mx");
        assert!(!vet.can_view_accounts());
        assert!(!vet.can_edit_accounts());
        assert!(!vet.can_schedule_appointments());
        assert!(vet.can_view_own_appointments());
    }
}
