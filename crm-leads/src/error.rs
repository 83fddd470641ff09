use crm_core::{CrmError, ErrorKind};
use thiserror::Error;

use crate::store::StoreError;

/// Result type for resolver operations
pub type AccessResult<T> = Result<T, AccessError>;

/// Failures surfaced by the access scope resolver.
///
/// `NotFound` covers both "does not exist" and "exists outside your scope";
/// callers cannot tell the two apart.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("Permission denied: {action} requires an organisor")]
    PermissionDenied { action: &'static str },

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{entity} does not belong to this organisation")]
    InvalidReference { entity: &'static str },

    #[error("Credential error: {0}")]
    Credential(String),

    #[error(transparent)]
    Store(StoreError),
}

impl From<StoreError> for AccessError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DanglingReference { entity } => Self::InvalidReference { entity },
            StoreError::Missing { entity } => Self::NotFound { entity },
            other => Self::Store(other),
        }
    }
}

impl AccessError {
    pub fn permission_denied(action: &'static str) -> Self {
        Self::PermissionDenied { action }
    }

    pub fn not_found(entity: &'static str) -> Self {
        Self::NotFound { entity }
    }

    pub fn invalid_reference(entity: &'static str) -> Self {
        Self::InvalidReference { entity }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AccessError::PermissionDenied { .. } => ErrorKind::Forbidden,
            AccessError::NotFound { .. } => ErrorKind::NotFound,
            AccessError::InvalidReference { .. } => ErrorKind::Unprocessable,
            AccessError::Credential(_) => ErrorKind::GeneralError,
            AccessError::Store(StoreError::Duplicate { .. }) => ErrorKind::Conflict,
            AccessError::Store(StoreError::DanglingReference { .. }) => ErrorKind::Unprocessable,
            AccessError::Store(StoreError::Missing { .. }) => ErrorKind::NotFound,
            AccessError::Store(StoreError::Unavailable(_)) => ErrorKind::Unavailable,
        }
    }

    pub fn into_anyhow(self) -> anyhow::Error {
        CrmError::from(self).into_anyhow()
    }
}

impl From<AccessError> for CrmError {
    fn from(err: AccessError) -> Self {
        CrmError::new(err.kind(), err.to_string())
    }
}

impl From<bcrypt::BcryptError> for AccessError {
    fn from(err: bcrypt::BcryptError) -> Self {
        Self::Credential(err.to_string())
    }
}
