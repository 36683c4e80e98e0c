use async_trait::async_trait;
use crate::core::clinic::ClinicError;

#[derive(Debug)]
pub enum CommandError {
    Access {
        message: String,
        reason_code: Option<String>,
    },
    Database {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    DuplicateKey {
        message: String,
    },
    NotFound {
        message: String,
    },
    Runtime {
        message: String,
        reason_code: Option<String>,
        retryable: bool,
    },
    Serialization {
        message: String,
    },
    Validation {
        message: String,
        reason_code: Option<String>,
    },
    Other {
        message: String,
        reason_code: Option<String>,
    },
}

#[async_trait]
pub trait Command<Request, Response> {
    async fn execute(&self, req: Request) -> Result<Response, CommandError>;
}

impl From<ClinicError> for CommandError {
    fn from(other: ClinicError) -> Self {
        match other {
            ClinicError::Database { message, reason_code, retryable } => {
                CommandError::Database { message, reason_code, retryable }
            }
            ClinicError::AccessDenied { message, reason_code } => {
                CommandError::Access { message, reason_code }
            }
            ClinicError::DuplicateKey { message } => {
                CommandError::DuplicateKey { message }
            }
            ClinicError::NotFound { message } => {
                CommandError::NotFound { message }
            }
            ClinicError::CurrentlyUnavailable { message, reason_code, retryable } => {
                CommandError::Runtime { message, reason_code, retryable }
            }
            ClinicError::Validation { message, reason_code } => {
                CommandError::Validation { message, reason_code }
            }
            ClinicError::Serialization { message } => {
                CommandError::Serialization { message }
            }
            ClinicError::Runtime { message, reason_code } => {
                CommandError::Runtime { message, reason_code, retryable: true }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::core::clinic::ClinicError;
    use crate::core::command::CommandError;

    #[tokio::test]
    async fn test_should_build_command_error() {
        let _ = CommandError::Access { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Database { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Runtime { message: "test".to_string(), reason_code: None, retryable: false };
        let _ = CommandError::Serialization { message: "test".to_string() };
        let _ = CommandError::Validation { message: "test".to_string(), reason_code: None };
        let _ = CommandError::Other { message: "test".to_string(), reason_code: None };
    }

    #[tokio::test]
    async fn test_should_convert_clinic_error() {
        assert!(matches!(CommandError::from(ClinicError::not_found("test")), CommandError::NotFound { message: _ }));
        assert!(matches!(CommandError::from(ClinicError::validation("test", None)), CommandError::Validation { message: _, reason_code: _ }));
        assert!(matches!(CommandError::from(ClinicError::access_denied("test", None)), CommandError::Access { message: _, reason_code: _ }));
    }
}
