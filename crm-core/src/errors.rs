//! # Errors
//!
//! Boundary error shared by the CRM crates. Library crates keep their own
//! `thiserror` enums and convert into [`CrmError`] when a failure leaves the
//! domain, so the outer layer only ever sees a kind with a status code, a
//! `name` and a kebab-cased `className`.
//!
//! A `CrmError` travels inside `anyhow::Error` and can be recovered with
//! [`CrmError::from_anyhow`] or [`CrmError::normalize`]. With the `serde`
//! feature it also carries optional `data` and renders via `to_json()`.

use std::fmt;

use anyhow::Error as AnyError;

/// Result type for CRM boundary APIs.
pub type CrmResult<T> = std::result::Result<T, AnyError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Forbidden,
    NotFound,
    Conflict,
    Unprocessable,
    GeneralError,
    Unavailable,
}

impl ErrorKind {
    /// (status code, name, className)
    const fn parts(self) -> (u16, &'static str, &'static str) {
        match self {
            ErrorKind::Forbidden => (403, "Forbidden", "forbidden"),
            ErrorKind::NotFound => (404, "NotFound", "not-found"),
            ErrorKind::Conflict => (409, "Conflict", "conflict"),
            ErrorKind::Unprocessable => (422, "Unprocessable", "unprocessable"),
            ErrorKind::GeneralError => (500, "GeneralError", "general-error"),
            ErrorKind::Unavailable => (503, "Unavailable", "unavailable"),
        }
    }

    pub const fn status_code(self) -> u16 {
        self.parts().0
    }

    pub const fn name(self) -> &'static str {
        self.parts().1
    }

    pub const fn class_name(self) -> &'static str {
        self.parts().2
    }
}

#[derive(Debug)]
pub struct CrmError {
    pub kind: ErrorKind,
    pub message: String,
    #[cfg(feature = "serde")]
    pub data: Option<serde_json::Value>,
    pub source: Option<AnyError>,
}

impl CrmError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            #[cfg(feature = "serde")]
            data: None,
            source: None,
        }
    }

    pub fn with_source(mut self, source: AnyError) -> Self {
        self.source = Some(source);
        self
    }

    pub fn code(&self) -> u16 {
        self.kind.status_code()
    }

    pub fn into_anyhow(self) -> AnyError {
        AnyError::new(self)
    }

    pub fn from_anyhow(err: &AnyError) -> Option<&CrmError> {
        err.downcast_ref::<CrmError>()
    }

    /// Recover the `CrmError` inside `err`, or wrap anything else as a
    /// `GeneralError` keeping the original as source.
    pub fn normalize(err: AnyError) -> CrmError {
        match err.downcast::<CrmError>() {
            Ok(crm) => crm,
            Err(other) => Self::new(ErrorKind::GeneralError, other.to_string()).with_source(other),
        }
    }

    /// Copy without the source chain, for handing back to clients.
    pub fn sanitize_for_client(&self) -> CrmError {
        CrmError {
            kind: self.kind,
            message: self.message.clone(),
            #[cfg(feature = "serde")]
            data: self.data.clone(),
            source: None,
        }
    }
}

impl fmt::Display for CrmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.kind.name(), self.code(), self.message)
    }
}

impl std::error::Error for CrmError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(feature = "serde")]
impl CrmError {
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    pub fn to_json(&self) -> serde_json::Value {
        let mut body = serde_json::json!({
            "name": self.kind.name(),
            "message": self.message,
            "code": self.code(),
            "className": self.kind.class_name(),
        });
        if let Some(data) = &self.data {
            body["data"] = data.clone();
        }
        body
    }
}

/// Return early from an `anyhow` function with a [`CrmError`] of the given
/// kind: `bail_crm!(NotFound, "lead {} not found", id)`.
#[macro_export]
macro_rules! bail_crm {
    ($kind:ident, $msg:expr) => {
        return Err($crate::errors::CrmError::new($crate::errors::ErrorKind::$kind, $msg).into_anyhow())
    };
    ($kind:ident, $fmt:expr, $($arg:tt)*) => {
        return Err($crate::errors::CrmError::new(
            $crate::errors::ErrorKind::$kind,
            format!($fmt, $($arg)*),
        )
        .into_anyhow())
    };
}
