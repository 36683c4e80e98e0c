use std::fmt;
use std::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};

#[derive(Debug)]
pub enum ClinicError {
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    AccessDenied {
        message: String,
        reason_code: Option<String>,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    CurrentlyUnavailable {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Serialization {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
    },
}

impl ClinicError {
    pub fn database(message: &str, reason_code: Option<String>, retryable: bool) -> ClinicError {
        ClinicError::Database { message: message.to_string(), reason_code, retryable }
    }

    pub fn access_denied(message: &str, reason_code: Option<String>) -> ClinicError {
        ClinicError::AccessDenied { message: message.to_string(), reason_code }
    }

    pub fn duplicate_key(message: &str) -> ClinicError {
        ClinicError::DuplicateKey { message: message.to_string() }
    }

    pub fn not_found(message: &str) -> ClinicError {
        ClinicError::NotFound { message: message.to_string() }
    }

    pub fn unavailable(message: &str, reason_code: Option<String>, retryable: bool) -> ClinicError {
        ClinicError::CurrentlyUnavailable { message: message.to_string(), reason_code, retryable }
    }

    pub fn database_or_unavailable(message: &str, reason: Option<String>, retryable: bool) -> ClinicError {
        if retryable {
            ClinicError::unavailable(
                format!("backend store unavailable error {:?} {:?}", message, reason).as_str(), reason, true)
        } else if let Some(ref reason_val) = reason {
            if reason_val.as_str().contains("404") {
                ClinicError::not_found(
                    format!("not found error {:?} {:?}", message, reason).as_str())
            } else if reason_val.as_str().contains("400") {
                ClinicError::access_denied(
                    format!("access-denied error {:?} {:?}", message, reason).as_str(), reason)
            } else {
                ClinicError::database(
                    format!("backend store error {:?} {:?}", message, reason).as_str(), reason, false)
            }
        } else {
            ClinicError::database(
                format!("backend store error {:?} {:?}", message, reason).as_str(), reason, false)
        }
    }

    pub fn validation(message: &str, reason_code: Option<String>) -> ClinicError {
        ClinicError::Validation { message: message.to_string(), reason_code }
    }

    pub fn serialization(message: &str) -> ClinicError {
        ClinicError::Serialization { message: message.to_string() }
    }

    pub fn runtime(message: &str, reason_code: Option<String>) -> ClinicError {
        ClinicError::Runtime { message: message.to_string(), reason_code }
    }

    pub fn retryable(&self) -> bool {
        match self {
            ClinicError::Database { retryable, .. } => { *retryable }
            ClinicError::AccessDenied { .. } => { false }
            ClinicError::DuplicateKey { .. } => { false }
            ClinicError::NotFound { .. } => { false }
            ClinicError::CurrentlyUnavailable { retryable, .. } => { *retryable }
            ClinicError::Validation { .. } => { false }
            ClinicError::Serialization { .. } => { false }
            ClinicError::Runtime { .. } => { false }
        }
    }
}

impl From<std::io::Error> for ClinicError {
    fn from(err: std::io::Error) -> Self {
        ClinicError::runtime(
            format!("serde io {:?}", err).as_str(), None)
    }
}

impl From<serde_json::Error> for ClinicError {
    fn from(err: serde_json::Error) -> Self {
        ClinicError::serialization(
            format!("serde json parsing {:?}", err).as_str())
    }
}

impl From<String> for ClinicError {
    fn from(err: String) -> Self {
        ClinicError::serialization(
            format!("serde parsing {:?}", err).as_str())
    }
}

impl Display for ClinicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ClinicError::Database { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            ClinicError::AccessDenied { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ClinicError::DuplicateKey { message } => {
                write!(f, "{}", message)
            }
            ClinicError::NotFound { message } => {
                write!(f, "{}", message)
            }
            ClinicError::CurrentlyUnavailable { message, reason_code, retryable } => {
                write!(f, "{} {:?} {}", message, reason_code, retryable)
            }
            ClinicError::Validation { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
            ClinicError::Serialization { message } => {
                write!(f, "{}", message)
            }
            ClinicError::Runtime { message, reason_code } => {
                write!(f, "{} {:?}", message, reason_code)
            }
        }
    }
}

/// A specialized Result type for clinic services and repositories.
pub type ClinicResult<T> = Result<T, ClinicError>;

// It defines abstraction for paginated result
#[derive(Debug, Clone)]
pub struct PaginatedResult<T> {
    // The page number or token
    pub page: Option<String>,
    // page size
    pub page_size: usize,
    // Next page if available
    pub next_page: Option<String>,
    // list of records
    pub records: Vec<T>,
}

impl<T> PaginatedResult<T> {
    pub(crate) fn new(page: Option<&str>, page_size: usize,
                      next_page: Option<String>, records: Vec<T>) -> Self {
        PaginatedResult {
            page: page.map(str::to_string),
            page_size,
            next_page,
            records,
        }
    }
}

// Single normalization point for role and species tokens read from persisted data.
pub(crate) fn normalize(token: &str) -> String {
    token.trim().to_lowercase()
}

// Role is the closed set of clinic staff roles. Persisted identities carry the
// legacy Spanish role names, so both spellings parse.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum Role {
    Administrator,
    Veterinarian,
    Receptionist,
    Unknown,
}

impl Role {
    pub fn parse(token: &str) -> Role {
        match normalize(token).as_str() {
            "administrador" | "administrator" => Role::Administrator,
            "veterinario" | "veterinarian" => Role::Veterinarian,
            "recepcionista" | "receptionist" => Role::Receptionist,
            _ => Role::Unknown,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewAccounts | Capability::EditAccounts => {
                match self {
                    Role::Administrator => true,
                    Role::Veterinarian | Role::Receptionist | Role::Unknown => false,
                }
            }
            Capability::ScheduleAppointments => {
                match self {
                    Role::Administrator | Role::Receptionist => true,
                    Role::Veterinarian | Role::Unknown => false,
                }
            }
            Capability::ViewOwnAppointments => {
                match self {
                    Role::Veterinarian => true,
                    Role::Administrator | Role::Receptionist | Role::Unknown => false,
                }
            }
        }
    }
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        Role::parse(s.as_str())
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Role::Administrator => write!(f, "Administrator"),
            Role::Veterinarian => write!(f, "Veterinarian"),
            Role::Receptionist => write!(f, "Receptionist"),
            Role::Unknown => write!(f, "Unknown"),
        }
    }
}

// Capability is a named permission checked against a role.
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum Capability {
    ViewAccounts,
    EditAccounts,
    ScheduleAppointments,
    ViewOwnAppointments,
}

// Species of the breed reference list. The legacy rows identify species either
// by name token or by the small numeric id map (1 = dog, 2 = cat).
#[derive(Debug, PartialEq, Clone, Copy, Serialize, Deserialize)]
pub(crate) enum Species {
    Dog,
    Cat,
    Unknown,
}

impl Species {
    pub fn parse(token: &str) -> Species {
        match normalize(token).as_str() {
            "perro" | "dog" => Species::Dog,
            "gato" | "cat" => Species::Cat,
            _ => Species::Unknown,
        }
    }

    pub fn from_id(id: Option<i64>) -> Species {
        match id {
            Some(1) => Species::Dog,
            Some(2) => Species::Cat,
            _ => Species::Unknown,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Species::Dog => "Dog",
            Species::Cat => "Cat",
            Species::Unknown => "",
        }
    }
}

impl From<String> for Species {
    fn from(s: String) -> Self {
        Species::parse(s.as_str())
    }
}

impl Display for Species {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            Species::Dog => write!(f, "Dog"),
            Species::Cat => write!(f, "Cat"),
            Species::Unknown => write!(f, "Unknown"),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::clinic::{Capability, ClinicError, Role, Species};

    #[tokio::test]
    async fn test_should_create_database_error() {
        assert!(matches!(ClinicError::database("test", None, false), ClinicError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_access_error() {
        assert!(matches!(ClinicError::access_denied("test", None), ClinicError::AccessDenied{ message: _, reason_code: _ }));
    }

    #[tokio::test]
    async fn test_should_create_duplicate_key_error() {
        assert!(matches!(ClinicError::duplicate_key("test"), ClinicError::DuplicateKey{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_not_found_error() {
        assert!(matches!(ClinicError::not_found("test"), ClinicError::NotFound{ message: _ }));
    }

    #[tokio::test]
    async fn test_should_create_database_or_unavailable_error() {
        assert!(matches!(ClinicError::database_or_unavailable("test", None, true), ClinicError::CurrentlyUnavailable{ message: _, reason_code: _, retryable: _ }));
        assert!(matches!(ClinicError::database_or_unavailable("test", Some("404".to_string()), false), ClinicError::NotFound{ message: _ }));
        assert!(matches!(ClinicError::database_or_unavailable("test", Some("400".to_string()), false), ClinicError::AccessDenied{ message: _, reason_code: _ }));
        assert!(matches!(ClinicError::database_or_unavailable("test", Some("500".to_string()), false), ClinicError::Database{ message: _, reason_code: _, retryable: _ }));
    }

    #[tokio::test]
    async fn test_should_create_retryable_error() {
        assert_eq!(false, ClinicError::database("test", None, false).retryable());
        assert_eq!(false, ClinicError::access_denied("test", None).retryable());
        assert_eq!(false, ClinicError::duplicate_key("test").retryable());
        assert_eq!(false, ClinicError::not_found("test").retryable());
        assert_eq!(true, ClinicError::unavailable("test", None, true).retryable());
        assert_eq!(false, ClinicError::validation("test", None).retryable());
        assert_eq!(false, ClinicError::serialization("test").retryable());
        assert_eq!(false, ClinicError::runtime("test", None).retryable());
    }

    #[tokio::test]
    async fn test_should_parse_roles_ignoring_case_and_whitespace() {
        assert_eq!(Role::Administrator, Role::parse("administrador"));
        assert_eq!(Role::Administrator, Role::parse(" Administrador "));
        assert_eq!(Role::Administrator, Role::parse("ADMINISTRADOR"));
        assert_eq!(Role::Administrator, Role::parse("Administrator"));
        assert_eq!(Role::Veterinarian, Role::parse("Veterinario"));
        assert_eq!(Role::Receptionist, Role::parse("  recepcionista"));
        assert_eq!(Role::Unknown, Role::parse("groomer"));
        assert_eq!(Role::Unknown, Role::parse(""));
    }

    #[tokio::test]
    async fn test_should_check_capability_matrix() {
        assert!(Role::Administrator.allows(Capability::ViewAccounts));
        assert!(Role::Administrator.allows(Capability::EditAccounts));
        assert!(Role::Administrator.allows(Capability::ScheduleAppointments));
        assert!(!Role::Administrator.allows(Capability::ViewOwnAppointments));

        assert!(!Role::Receptionist.allows(Capability::ViewAccounts));
        assert!(!Role::Receptionist.allows(Capability::EditAccounts));
        assert!(Role::Receptionist.allows(Capability::ScheduleAppointments));
        assert!(!Role::Receptionist.allows(Capability::ViewOwnAppointments));

        assert!(!Role::Veterinarian.allows(Capability::ViewAccounts));
        assert!(!Role::Veterinarian.allows(Capability::EditAccounts));
        assert!(!Role::Veterinarian.allows(Capability::ScheduleAppointments));
        assert!(Role::Veterinarian.allows(Capability::ViewOwnAppointments));

        assert!(!Role::Unknown.allows(Capability::ViewAccounts));
        assert!(!Role::Unknown.allows(Capability::EditAccounts));
        assert!(!Role::Unknown.allows(Capability::ScheduleAppointments));
        assert!(!Role::Unknown.allows(Capability::ViewOwnAppointments));
    }

    #[tokio::test]
    async fn test_should_parse_species_by_name_and_id() {
        assert_eq!(Species::Dog, Species::parse("perro"));
        assert_eq!(Species::Dog, Species::parse(" Dog "));
        assert_eq!(Species::Cat, Species::parse("GATO"));
        assert_eq!(Species::Unknown, Species::parse("parrot"));
        assert_eq!(Species::Dog, Species::from_id(Some(1)));
        assert_eq!(Species::Cat, Species::from_id(Some(2)));
        assert_eq!(Species::Unknown, Species::from_id(Some(7)));
        assert_eq!(Species::Unknown, Species::from_id(None));
    }
}
