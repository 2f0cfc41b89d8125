//! Domain errors

use thiserror::Error;

use crate::domain::CustomerUserError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Form input rejected before reaching the backend
    #[error("{0}")]
    Validation(String),

    /// `customerUserErrors` entry returned by a mutation
    #[error("{message}")]
    CustomerUserError {
        code: Option<String>,
        message: String,
    },

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Storefront transport error: {0}")]
    Transport(String),

    #[error("Storefront GraphQL error: {0}")]
    Graphql(String),

    #[error("Session error: {0}")]
    Session(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    /// First user error of a mutation payload, if any.
    pub fn from_user_errors(errors: &[CustomerUserError]) -> Option<Self> {
        errors.first().map(|e| DomainError::CustomerUserError {
            code: e.code.clone(),
            message: e.message.clone(),
        })
    }

    /// Whether the message is meant to be shown next to a form.
    pub fn is_user_facing(&self) -> bool {
        matches!(
            self,
            DomainError::Validation(_) | DomainError::CustomerUserError { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_user_error_wins() {
        let errors = vec![
            CustomerUserError {
                code: Some("TAKEN".into()),
                field: None,
                message: "Email has already been taken".into(),
            },
            CustomerUserError {
                code: None,
                field: None,
                message: "second".into(),
            },
        ];
        let err = DomainError::from_user_errors(&errors).unwrap();
        assert_eq!(err.to_string(), "Email has already been taken");
        assert!(err.is_user_facing());
        assert!(DomainError::from_user_errors(&[]).is_none());
    }
}
